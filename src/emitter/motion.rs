//! The motion emitter: cut buffering, path simplification and modal
//! command emission.
//!
//! [`MotionEmitter`] accepts discrete motion directives (rapid move,
//! cutting move, feed change, path-mode change) and writes a line-oriented
//! modal command stream that says only what changed. Cutting moves are
//! buffered and run through the Douglas–Peucker reduction on flush, so
//! dense generator output never reaches the stream verbatim.

use std::io::Write;

use tracing::{debug, trace};

use crate::geometry::{simplify_indices, Point3};

use super::block::{Block, BlockBuilder};
use super::config::EmitterConfig;
use super::format::format_coord;
use super::modal::ModalState;
use super::EmitError;

/// A buffered cutting target.
///
/// An axis the caller (and every predecessor in the buffer) never supplied
/// stays unset; unset axes never produce words, matching the modal
/// "unchanged" default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct AxisTarget {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

impl AxisTarget {
    /// Concrete point for distance computation; unset axes measure as 0.
    fn resolve(&self) -> Point3 {
        Point3::new(
            self.x.unwrap_or(0.0),
            self.y.unwrap_or(0.0),
            self.z.unwrap_or(0.0),
        )
    }
}

/// Stateful modal command emitter over an arbitrary byte sink.
///
/// One instance serializes one program: `begin()` once, motion directives,
/// `end()` once. Not thread-safe — the caller owns call serialization.
/// Sink I/O failures are the only runtime errors; caller misuse (NaN
/// coordinates, calls after `end()`) panics.
pub struct MotionEmitter<W: Write> {
    sink: W,
    config: EmitterConfig,
    modal: ModalState,
    buffer: Vec<AxisTarget>,
    begun: bool,
    ended: bool,
}

impl<W: Write> MotionEmitter<W> {
    /// Creates an emitter writing to `sink` with the given dialect.
    ///
    /// # Panics
    ///
    /// Panics on a non-finite or negative simplification deviation or
    /// non-finite machine heights. Configs obtained through
    /// [`EmitterConfig::parse`] are already validated; this guards
    /// hand-constructed ones.
    pub fn new(config: EmitterConfig, sink: W) -> Self {
        assert!(
            config.path.deviation.is_finite() && config.path.deviation >= 0.0,
            "path deviation must be finite and nonnegative, got {}",
            config.path.deviation
        );
        assert!(
            config.machine.safety_height.is_finite() && config.machine.home_height.is_finite(),
            "machine heights must be finite"
        );
        MotionEmitter {
            sink,
            config,
            modal: ModalState::new(),
            buffer: Vec::new(),
            begun: false,
            ended: false,
        }
    }

    /// Consumes the emitter and returns the sink (e.g. to recover a
    /// collected `Vec<u8>`).
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn check_live(&self) {
        assert!(!self.ended, "MotionEmitter used after end()");
    }

    fn check_motion(&self) {
        self.check_live();
        assert!(self.begun, "begin() must be called before motion commands");
    }

    /// Emits the program prologue (verbatim configured lines) followed by
    /// the default feed command. Must be called exactly once, before any
    /// motion directive.
    pub fn begin(&mut self) -> Result<(), EmitError> {
        self.check_live();
        assert!(!self.begun, "begin() may only be called once");
        self.begun = true;
        debug!("program begin");
        for line in &self.config.program.prologue {
            self.sink.write_all(line.as_bytes())?;
            self.sink.write_all(self.config.format.eol.as_bytes())?;
        }
        self.write_feed(self.config.program.default_feed)
    }

    /// Flushes buffered cuts, then emits a rapid positioning command
    /// holding only the axis words that changed. Unsupplied axes retain
    /// their last value. A rapid in which every word is suppressed emits
    /// nothing.
    pub fn rapid(
        &mut self,
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
        a: Option<f64>,
    ) -> Result<(), EmitError> {
        self.check_motion();
        self.flush()?;
        self.write_move(true, [('X', x), ('Y', y), ('Z', z), ('A', a)])
    }

    /// Buffers a cutting move. No output is produced here — emission is
    /// deferred to [`flush`](Self::flush). Missing axes fill in from the
    /// last buffered point, or from the modal position when the buffer is
    /// empty.
    pub fn cut(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Result<(), EmitError> {
        self.check_motion();
        for (letter, value) in [('X', x), ('Y', y), ('Z', z)] {
            if let Some(v) = value {
                assert!(v.is_finite(), "axis {letter} coordinate must be finite, got {v}");
            }
        }

        if self.buffer.is_empty() {
            // Seed the buffer with the current position so the simplifier
            // sees the whole motion from where the tool already sits. Its
            // words all match modal state, so its emission is suppressed.
            let here = AxisTarget {
                x: self.modal.axis_value('X'),
                y: self.modal.axis_value('Y'),
                z: self.modal.axis_value('Z'),
            };
            if here != AxisTarget::default() {
                self.buffer.push(here);
            }
        }

        let prev = self.buffer.last().copied().unwrap_or_default();
        self.buffer.push(AxisTarget {
            x: x.or(prev.x),
            y: y.or(prev.y),
            z: z.or(prev.z),
        });
        Ok(())
    }

    /// Drains the cut buffer: simplifies it to the configured deviation
    /// and emits one cutting command per kept point, each holding only the
    /// words that changed. No-op on an empty buffer.
    pub fn flush(&mut self) -> Result<(), EmitError> {
        self.check_motion();
        if self.buffer.is_empty() {
            return Ok(());
        }

        let targets = std::mem::take(&mut self.buffer);
        let points: Vec<Point3> = targets.iter().map(AxisTarget::resolve).collect();
        let kept = simplify_indices(&points, self.config.path.deviation);
        debug!(
            buffered = targets.len(),
            kept = kept.len(),
            "flushing cut buffer"
        );

        for &i in &kept {
            let t = targets[i];
            self.write_move(false, [('X', t.x), ('Y', t.y), ('Z', t.z), ('A', None)])?;
        }
        Ok(())
    }

    /// Flushes, then emits a feed-rate command if `rate` differs from the
    /// modal feed. Feed changes never apply retroactively to buffered
    /// moves.
    pub fn set_feed(&mut self, rate: f64) -> Result<(), EmitError> {
        self.check_motion();
        self.flush()?;
        self.write_feed(rate)
    }

    /// Flushes, then switches the controller to exact-path mode.
    /// Suppressed when exact-path mode is already active.
    pub fn exact_path(&mut self) -> Result<(), EmitError> {
        self.check_motion();
        self.flush()?;
        let command = self.config.motion.exact_path.clone();
        self.write_path_mode(command)
    }

    /// Flushes, then switches the controller to continuous (blended) path
    /// mode, optionally with a blend tolerance word. Suppressed when the
    /// identical mode command is already active.
    pub fn continuous(&mut self, blend: Option<f64>) -> Result<(), EmitError> {
        self.check_motion();
        self.flush()?;
        let command = match blend {
            Some(b) => {
                assert!(
                    b.is_finite() && b >= 0.0,
                    "blend tolerance must be finite and nonnegative, got {b}"
                );
                format!(
                    "{}{}{}{}",
                    self.config.motion.continuous,
                    self.config.format.word_separator,
                    self.config.motion.blend_word,
                    format_coord(
                        b,
                        self.config.format.decimal_places,
                        !self.config.format.trailing_zeros
                    )
                )
            }
            None => self.config.motion.continuous.clone(),
        };
        self.write_path_mode(command)
    }

    /// Flushes, then rapids to the configured safety height.
    pub fn safety(&mut self) -> Result<(), EmitError> {
        self.check_motion();
        self.flush()?;
        let z = self.config.machine.safety_height;
        self.write_move(true, [('X', None), ('Y', None), ('Z', Some(z)), ('A', None)])
    }

    /// Flushes, then rapids to the configured home height.
    pub fn home(&mut self) -> Result<(), EmitError> {
        self.check_motion();
        self.flush()?;
        let z = self.config.machine.home_height;
        self.write_move(true, [('X', None), ('Y', None), ('Z', Some(z)), ('A', None)])
    }

    /// Flushes, emits a standalone comment line.
    pub fn comment(&mut self, text: &str) -> Result<(), EmitError> {
        self.check_motion();
        self.flush()?;
        self.write_block(BlockBuilder::new().comment(text).build())
    }

    /// Flushes, retracts to the safety height and emits the
    /// end-of-program token. Terminal: the emitter must not be used
    /// afterward.
    pub fn end(&mut self) -> Result<(), EmitError> {
        self.check_motion();
        self.flush()?;
        self.safety()?;
        let token = self.config.words.end_of_program.clone();
        self.write_block(BlockBuilder::new().code(&token).build())?;
        self.ended = true;
        debug!("program end");
        Ok(())
    }

    /// Emits one motion block holding the axis words that differ from
    /// modal state. The motion token itself is modal too; a move in which
    /// no axis word survives suppression emits nothing at all.
    fn write_move(
        &mut self,
        rapid: bool,
        axes: [(char, Option<f64>); 4],
    ) -> Result<(), EmitError> {
        let mut builder = BlockBuilder::new();
        let mut any_axis = false;
        for (letter, value) in axes {
            let Some(v) = value else { continue };
            assert!(v.is_finite(), "axis {letter} coordinate must be finite, got {v}");
            if self.modal.should_emit_axis(letter, v) {
                builder = builder.axis(letter, v);
                any_axis = true;
            }
        }
        if !any_axis {
            return Ok(());
        }

        let token = if rapid {
            self.config.motion.rapid.clone()
        } else {
            self.config.motion.linear.clone()
        };
        if self.modal.should_emit_motion(&token) {
            builder = builder.motion(&token);
        }
        self.write_block(builder.build())
    }

    fn write_feed(&mut self, rate: f64) -> Result<(), EmitError> {
        assert!(
            rate.is_finite() && rate > 0.0,
            "feed rate must be finite and positive, got {rate}"
        );
        if !self.modal.should_emit_feed(rate) {
            return Ok(());
        }
        self.write_block(BlockBuilder::new().feed(rate).build())
    }

    fn write_path_mode(&mut self, command: String) -> Result<(), EmitError> {
        if !self.modal.should_emit_path_mode(&command) {
            return Ok(());
        }
        self.write_block(BlockBuilder::new().code(&command).build())
    }

    fn write_block(&mut self, block: Block) -> Result<(), EmitError> {
        let line = block.render(&self.config);
        if line.is_empty() {
            return Ok(());
        }
        trace!(line = %line.trim_end(), "emit");
        self.sink.write_all(line.as_bytes())?;
        Ok(())
    }
}
