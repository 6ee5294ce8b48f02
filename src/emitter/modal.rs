//! Modal memory of the last-emitted command.
//!
//! Every slot starts "unset" so the first command emits all applicable
//! words. `should_emit_*` returns `true` (and updates the slot) when the
//! new value differs from the cached one, or `false` when it is identical
//! and the word can be omitted from the line.
//!
//! Invariant: this state reflects exactly the last line written to the
//! sink. Every write path that changes position, feed, motion mode or
//! path mode updates the corresponding slot in the same operation.

/// Last-emitted word memory for one emitter instance.
#[derive(Debug, Default)]
pub struct ModalState {
    motion: Option<String>,
    path_mode: Option<String>,
    feed: Option<f64>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    a: Option<f64>,
}

/// Tolerance for floating-point modal comparisons. Slots store the full
/// precision value (never rounded text); this only suppresses redundant
/// words when values differ by pure floating-point noise, far below the
/// emitted decimal resolution.
const NUMERIC_TOLERANCE: f64 = 1e-9;

/// Updates `slot` with `code` if it differs; returns `true` when the
/// caller should emit.
fn update_string_modal(slot: &mut Option<String>, code: &str) -> bool {
    if slot.as_deref() == Some(code) {
        return false;
    }
    *slot = Some(code.to_string());
    true
}

/// Updates `slot` with `value` if it differs by more than
/// `NUMERIC_TOLERANCE`; returns `true` when the caller should emit.
fn update_float_modal(slot: &mut Option<f64>, value: f64) -> bool {
    if let Some(last) = *slot {
        if (last - value).abs() < NUMERIC_TOLERANCE {
            return false;
        }
    }
    *slot = Some(value);
    true
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and caches `code` if it differs from the last
    /// emitted motion token.
    pub fn should_emit_motion(&mut self, code: &str) -> bool {
        update_string_modal(&mut self.motion, code)
    }

    /// Returns `true` and caches `command` if it differs from the active
    /// path-mode command.
    pub fn should_emit_path_mode(&mut self, command: &str) -> bool {
        update_string_modal(&mut self.path_mode, command)
    }

    /// Returns `true` and caches `feed` if it differs from the last
    /// emitted feed rate.
    pub fn should_emit_feed(&mut self, feed: f64) -> bool {
        update_float_modal(&mut self.feed, feed)
    }

    /// Returns `true` and caches the coordinate if it differs from the
    /// last emitted position on that axis.
    pub fn should_emit_axis(&mut self, axis: char, value: f64) -> bool {
        let slot = match axis.to_ascii_uppercase() {
            'X' => &mut self.x,
            'Y' => &mut self.y,
            'Z' => &mut self.z,
            'A' => &mut self.a,
            other => panic!("unknown axis letter {other:?}"),
        };
        update_float_modal(slot, value)
    }

    /// Last emitted position on `axis`, or `None` if no command has
    /// positioned it yet.
    pub fn axis_value(&self, axis: char) -> Option<f64> {
        match axis.to_ascii_uppercase() {
            'X' => self.x,
            'Y' => self.y,
            'Z' => self.z,
            'A' => self.a,
            other => panic!("unknown axis letter {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── motion token ─────────────────────────────────────────────────────────

    #[test]
    fn motion_emits_first_time() {
        let mut ms = ModalState::new();
        assert!(ms.should_emit_motion("G1"));
    }

    #[test]
    fn motion_suppressed_on_repeat() {
        let mut ms = ModalState::new();
        ms.should_emit_motion("G1");
        assert!(!ms.should_emit_motion("G1"));
    }

    #[test]
    fn motion_re_emits_after_change() {
        let mut ms = ModalState::new();
        ms.should_emit_motion("G1");
        assert!(ms.should_emit_motion("G0"));
    }

    // ── path mode ────────────────────────────────────────────────────────────

    #[test]
    fn path_mode_emits_first_time() {
        let mut ms = ModalState::new();
        assert!(ms.should_emit_path_mode("G61"));
    }

    #[test]
    fn path_mode_suppressed_on_repeat() {
        let mut ms = ModalState::new();
        ms.should_emit_path_mode("G61");
        assert!(!ms.should_emit_path_mode("G61"));
    }

    #[test]
    fn path_mode_distinguishes_blend_values() {
        let mut ms = ModalState::new();
        ms.should_emit_path_mode("G64 P0.0100");
        assert!(ms.should_emit_path_mode("G64 P0.5000"));
    }

    // ── feed rate ────────────────────────────────────────────────────────────

    #[test]
    fn feed_emits_first_time() {
        let mut ms = ModalState::new();
        assert!(ms.should_emit_feed(500.0));
    }

    #[test]
    fn feed_suppressed_on_repeat() {
        let mut ms = ModalState::new();
        ms.should_emit_feed(500.0);
        assert!(!ms.should_emit_feed(500.0));
    }

    #[test]
    fn feed_re_emits_after_change() {
        let mut ms = ModalState::new();
        ms.should_emit_feed(500.0);
        assert!(ms.should_emit_feed(1000.0));
    }

    // ── axis words ───────────────────────────────────────────────────────────

    #[test]
    fn axis_emits_first_time() {
        let mut ms = ModalState::new();
        assert!(ms.should_emit_axis('X', 10.0));
    }

    #[test]
    fn axis_suppressed_on_repeat() {
        let mut ms = ModalState::new();
        ms.should_emit_axis('X', 10.0);
        assert!(!ms.should_emit_axis('X', 10.0));
    }

    #[test]
    fn axis_re_emits_after_change() {
        let mut ms = ModalState::new();
        ms.should_emit_axis('X', 10.0);
        assert!(ms.should_emit_axis('X', 20.0));
    }

    #[test]
    fn axis_suppressed_within_noise_tolerance() {
        let mut ms = ModalState::new();
        ms.should_emit_axis('Y', 5.0);
        assert!(!ms.should_emit_axis('Y', 5.0 + 5e-10));
    }

    #[test]
    fn axis_emits_just_above_noise_tolerance() {
        let mut ms = ModalState::new();
        ms.should_emit_axis('Z', 5.0);
        assert!(ms.should_emit_axis('Z', 5.0 + 2e-9));
    }

    #[test]
    fn axes_are_independent() {
        let mut ms = ModalState::new();
        ms.should_emit_axis('X', 1.0);
        assert!(ms.should_emit_axis('Y', 1.0));
    }

    #[test]
    fn all_axes_tracked() {
        let mut ms = ModalState::new();
        for axis in ['X', 'Y', 'Z', 'A'] {
            assert!(ms.should_emit_axis(axis, 0.0), "first emit for {axis}");
            assert!(
                !ms.should_emit_axis(axis, 0.0),
                "repeat suppressed for {axis}"
            );
            assert!(ms.should_emit_axis(axis, 1.0), "change emits for {axis}");
        }
    }

    #[test]
    fn lowercase_axis_letter_accepted() {
        let mut ms = ModalState::new();
        ms.should_emit_axis('x', 3.0);
        assert_eq!(ms.axis_value('X'), Some(3.0));
    }

    // ── axis_value ───────────────────────────────────────────────────────────

    #[test]
    fn axis_value_unset_until_emitted() {
        let mut ms = ModalState::new();
        assert_eq!(ms.axis_value('X'), None);
        ms.should_emit_axis('X', 7.5);
        assert_eq!(ms.axis_value('X'), Some(7.5));
    }

    #[test]
    #[should_panic(expected = "unknown axis")]
    fn unknown_axis_panics() {
        let mut ms = ModalState::new();
        ms.should_emit_axis('B', 1.0);
    }
}
