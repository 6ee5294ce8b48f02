//! Modal motion-command emission.
//!
//! # Module structure
//!
//! ```text
//! emitter/
//! ├── config.rs — EmitterConfig: TOML-loadable output dialect
//! ├── format.rs — fixed-precision numeric word formatting
//! ├── block.rs  — Word / Block / BlockBuilder (canonical word order)
//! ├── modal.rs  — ModalState: memory of the last-emitted words
//! └── motion.rs — MotionEmitter: buffering, flush, program lifecycle
//! ```

pub mod block;
pub mod config;
pub mod format;
pub mod modal;
pub mod motion;

pub use config::EmitterConfig;
pub use motion::MotionEmitter;

/// Error type for emitter failures.
///
/// Caller misuse (NaN coordinates, negative tolerance, operations after
/// `end()`) is a panic, not a variant here: a silently degraded command
/// stream would later be trusted by real-time motion execution.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("config error: {0}")]
    Config(String),
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}
