//! Output dialect configuration.
//!
//! [`EmitterConfig`] describes one command vocabulary. The defaults give
//! the classic RS-274 words (`G0`/`G1`/`F`/`M2`); an embedding system can
//! substitute any equivalent token set from a TOML file without touching
//! the emission logic.

use serde::Deserialize;

use super::EmitError;

/// Fully describes one output dialect and the machine constants the
/// emitter needs. Loaded from TOML; every section and field is optional
/// and falls back to the classic vocabulary.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case", default)]
pub struct EmitterConfig {
    pub format: FormatConfig,
    pub motion: MotionConfig,
    pub words: WordsConfig,
    pub program: ProgramConfig,
    pub machine: MachineConfig,
    pub path: PathConfig,
}

/// `[format]` — numeric word formatting.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct FormatConfig {
    /// Digits after the decimal point in coordinate and feed words.
    pub decimal_places: u32,
    /// Keep trailing fractional zeros (`X1.5000` instead of `X1.5`).
    pub trailing_zeros: bool,
    pub word_separator: String,
    pub eol: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            decimal_places: 4,
            trailing_zeros: true,
            word_separator: " ".to_string(),
            eol: "\n".to_string(),
        }
    }
}

/// `[motion]` — motion and path-mode command tokens.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct MotionConfig {
    pub rapid: String,
    pub linear: String,
    /// Exact-path mode command (no blending between segments).
    pub exact_path: String,
    /// Continuous / blended path mode command.
    pub continuous: String,
    /// Word letter carrying the blend tolerance after `continuous`.
    pub blend_word: String,
}

impl Default for MotionConfig {
    fn default() -> Self {
        MotionConfig {
            rapid: "G0".to_string(),
            linear: "G1".to_string(),
            exact_path: "G61".to_string(),
            continuous: "G64".to_string(),
            blend_word: "P".to_string(),
        }
    }
}

/// `[words]` — remaining word letters and program tokens.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct WordsConfig {
    pub feed: String,
    pub end_of_program: String,
}

impl Default for WordsConfig {
    fn default() -> Self {
        WordsConfig {
            feed: "F".to_string(),
            end_of_program: "M2".to_string(),
        }
    }
}

/// `[program]` — prologue and comment delimiters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ProgramConfig {
    /// Lines emitted verbatim by `begin()`: unit selection, absolute
    /// positioning, stale-modal-code cancel, spin-up dwell.
    pub prologue: Vec<String>,
    /// Feed rate commanded at the end of the prologue and recorded as the
    /// initial modal feed.
    pub default_feed: f64,
    pub comment_open: String,
    pub comment_close: String,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        ProgramConfig {
            prologue: vec![
                "G17 G90 G40 G49 G80".to_string(),
                "G21".to_string(),
                "G4 P3.0".to_string(),
            ],
            default_feed: 60.0,
            comment_open: "(".to_string(),
            comment_close: ")".to_string(),
        }
    }
}

/// `[machine]` — named retract heights.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct MachineConfig {
    /// Z height for clearance moves between cuts.
    pub safety_height: f64,
    /// Z height for the final parking position.
    pub home_height: f64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            safety_height: 0.04,
            home_height: 1.5,
        }
    }
}

/// `[path]` — simplification settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct PathConfig {
    /// Maximum allowed perpendicular deviation, in path units, between the
    /// emitted path and the buffered cutting points.
    pub deviation: f64,
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig { deviation: 0.001 }
    }
}

impl EmitterConfig {
    /// Parse a TOML string into an [`EmitterConfig`], running validation.
    pub fn parse(toml_str: &str) -> Result<EmitterConfig, EmitError> {
        let cfg: EmitterConfig =
            toml::from_str(toml_str).map_err(|e| EmitError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), EmitError> {
        if !(self.path.deviation.is_finite() && self.path.deviation >= 0.0) {
            return Err(EmitError::Config(format!(
                "path.deviation must be finite and nonnegative, got {}",
                self.path.deviation
            )));
        }

        for (name, value) in [
            ("machine.safety_height", self.machine.safety_height),
            ("machine.home_height", self.machine.home_height),
            ("program.default_feed", self.program.default_feed),
        ] {
            if !value.is_finite() {
                return Err(EmitError::Config(format!("{name} must be finite")));
            }
        }

        if self.program.default_feed <= 0.0 {
            return Err(EmitError::Config(
                "program.default_feed must be positive".to_string(),
            ));
        }

        if self.format.decimal_places > 9 {
            return Err(EmitError::Config(format!(
                "format.decimal_places must be at most 9, got {}",
                self.format.decimal_places
            )));
        }

        for (name, token) in [
            ("motion.rapid", &self.motion.rapid),
            ("motion.linear", &self.motion.linear),
            ("motion.exact_path", &self.motion.exact_path),
            ("motion.continuous", &self.motion.continuous),
            ("words.feed", &self.words.feed),
            ("words.end_of_program", &self.words.end_of_program),
        ] {
            if token.is_empty() {
                return Err(EmitError::Config(format!("{name} must not be empty")));
            }
        }

        if self.motion.rapid == self.motion.linear {
            return Err(EmitError::Config(
                "motion.rapid and motion.linear must differ".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── defaults ────────────────────────────────────────────────────────────

    #[test]
    fn default_config_is_valid() {
        assert!(EmitterConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = EmitterConfig::parse("").expect("empty TOML parses");
        assert_eq!(cfg.motion.rapid, "G0");
        assert_eq!(cfg.motion.linear, "G1");
        assert_eq!(cfg.words.end_of_program, "M2");
        assert_eq!(cfg.format.decimal_places, 4);
        assert_eq!(cfg.path.deviation, 0.001);
    }

    // ── overrides ───────────────────────────────────────────────────────────

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let cfg = EmitterConfig::parse(
            r#"
[motion]
rapid = "RAPID"
linear = "CUT"

[path]
deviation = 0.05
"#,
        )
        .expect("partial TOML parses");
        assert_eq!(cfg.motion.rapid, "RAPID");
        assert_eq!(cfg.motion.linear, "CUT");
        assert_eq!(cfg.path.deviation, 0.05);
        // Untouched sections keep defaults.
        assert_eq!(cfg.words.feed, "F");
        assert_eq!(cfg.machine.home_height, 1.5);
    }

    #[test]
    fn alternate_vocabulary_parses() {
        let cfg = EmitterConfig::parse(
            r#"
[words]
feed = "FEED"
end_of_program = "END"

[format]
decimal_places = 3
trailing_zeros = false
"#,
        )
        .expect("alternate vocabulary parses");
        assert_eq!(cfg.words.feed, "FEED");
        assert_eq!(cfg.words.end_of_program, "END");
        assert_eq!(cfg.format.decimal_places, 3);
        assert!(!cfg.format.trailing_zeros);
    }

    // ── validation ──────────────────────────────────────────────────────────

    #[test]
    fn invalid_toml_returns_config_error() {
        let result = EmitterConfig::parse("this is not valid toml ::::");
        assert!(matches!(result, Err(EmitError::Config(_))));
    }

    #[test]
    fn negative_deviation_rejected() {
        let result = EmitterConfig::parse("[path]\ndeviation = -0.1");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("deviation"));
    }

    #[test]
    fn nan_deviation_rejected() {
        let result = EmitterConfig::parse("[path]\ndeviation = nan");
        assert!(result.is_err());
    }

    #[test]
    fn same_rapid_and_linear_token_rejected() {
        let result = EmitterConfig::parse("[motion]\nrapid = \"G1\"");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn empty_motion_token_rejected() {
        let result = EmitterConfig::parse("[motion]\nrapid = \"\"");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("motion.rapid"));
    }

    #[test]
    fn oversized_decimal_places_rejected() {
        let result = EmitterConfig::parse("[format]\ndecimal_places = 12");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("decimal_places"));
    }

    #[test]
    fn nonpositive_default_feed_rejected() {
        let result = EmitterConfig::parse("[program]\ndefault_feed = 0.0");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("default_feed"));
    }
}
