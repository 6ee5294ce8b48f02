//! Toolpath simplification and modal command emission for CNC pipelines.
//!
//! Two cooperating pieces:
//!
//! * [`geometry::simplify`] — pure Douglas–Peucker reduction of a dense
//!   point sequence to the minimal subsequence within a bounded deviation
//!   of the original path.
//! * [`emitter::MotionEmitter`] — a stateful modal command emitter that
//!   buffers cutting moves, runs them through the simplifier on flush, and
//!   writes a line-oriented command stream containing only the words that
//!   changed since the previous command.
//!
//! The command vocabulary (motion tokens, word letters, formatting,
//! retract heights, deviation) is described by a TOML-loadable
//! [`emitter::EmitterConfig`]; the defaults give classic RS-274 words.
//!
//! This is a batch, ahead-of-time transformation: point producers
//! (contouring/pocketing generators) and command consumers (interpreters,
//! real-time executors) live elsewhere.

pub mod emitter;
pub mod geometry;

pub use emitter::{EmitError, EmitterConfig, MotionEmitter};
pub use geometry::{simplify, Point3};
