//! Session configuration
//!
//! Everything that shapes a run (surface size, spawn cadence, win/loss limits)
//! lives here so hosts can tune a session from JSON without touching the sim.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "med" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Enemies spawned by `init`
    pub fn enemy_count(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Normal => 5,
            Difficulty::Hard => 8,
        }
    }

    /// Milliseconds of player contact needed to hatch an egg
    pub fn hatch_threshold_ms(&self) -> f32 {
        match self {
            Difficulty::Easy => 1000.0,
            Difficulty::Normal => 1500.0,
            Difficulty::Hard => 2500.0,
        }
    }

    /// Hatchlings that may be lost before the run ends
    pub fn loss_limit(&self) -> u32 {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Normal => 5,
            Difficulty::Hard => 3,
        }
    }
}

/// What happens to hatch progress when the player steps off an egg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HatchPolicy {
    /// Progress drops to zero and the egg goes back to unhatched
    #[default]
    Reset,
    /// Progress is kept; the egg stays mid-hatch until contact resumes
    Pause,
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for placement, spawns and particle jitter
    pub seed: u64,
    /// Preset this config was derived from
    pub difficulty: Difficulty,

    // === Surface ===
    pub width: f32,
    pub height: f32,
    /// Band at the top reserved for the HUD; nothing is placed above it
    pub top_margin: f32,

    // === Timing ===
    /// Logic passes per second
    pub fps: f32,
    /// Milliseconds between egg spawns
    pub egg_interval_ms: f32,
    /// Milliseconds of contact before an egg hatches
    pub hatch_threshold_ms: f32,
    pub hatch_policy: HatchPolicy,

    // === Population ===
    pub max_eggs: usize,
    pub enemy_count: usize,
    pub obstacle_count: usize,
    /// Rejection-sampling budget for obstacle placement
    pub obstacle_attempts: u32,
    /// Extra clearance kept between obstacle circles
    pub obstacle_buffer: f32,

    // === Win / loss ===
    pub winning_score: u32,
    pub loss_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_E665,
            difficulty: Difficulty::Normal,

            width: 1280.0,
            height: 720.0,
            top_margin: 260.0,

            fps: 70.0,
            egg_interval_ms: 1000.0,
            hatch_threshold_ms: Difficulty::Normal.hatch_threshold_ms(),
            hatch_policy: HatchPolicy::Reset,

            max_eggs: 5,
            enemy_count: Difficulty::Normal.enemy_count(),
            obstacle_count: 10,
            obstacle_attempts: 500,
            obstacle_buffer: 100.0,

            winning_score: 40,
            loss_limit: Difficulty::Normal.loss_limit(),
        }
    }
}

impl GameConfig {
    /// Create a config from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a difficulty preset (updates preset-dependent settings)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.enemy_count = preset.enemy_count();
        self.hatch_threshold_ms = preset.hatch_threshold_ms();
        self.loss_limit = preset.loss_limit();
    }

    /// Milliseconds between logic passes
    pub fn frame_interval_ms(&self) -> f32 {
        1000.0 / self.fps
    }

    /// Decode and validate a config
    ///
    /// Missing fields come from the `difficulty` preset when one is given,
    /// otherwise from the defaults. Fields present in the JSON always win.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides = match serde_json::from_str::<serde_json::Value>(json)? {
            serde_json::Value::Object(fields) => fields,
            _ => return Err(ConfigError::Parse("config must be a JSON object".into())),
        };

        let base = match overrides.get("difficulty") {
            Some(preset) => Self::from_preset(Difficulty::deserialize(preset)?),
            None => Self::default(),
        };
        let mut merged = serde_json::to_value(&base)?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the config describes a playable session
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims_ok = |v: f32| v.is_finite() && v > 0.0;
        if !dims_ok(self.width) || !dims_ok(self.height) {
            return Err(ConfigError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.top_margin.is_finite() && self.top_margin >= 0.0 && self.top_margin < self.height)
        {
            return Err(ConfigError::TopMarginOutOfRange {
                top_margin: self.top_margin,
                height: self.height,
            });
        }
        if !dims_ok(self.fps) {
            return Err(ConfigError::InvalidFrameRate { fps: self.fps });
        }
        for (name, value) in [
            ("egg_interval_ms", self.egg_interval_ms),
            ("hatch_threshold_ms", self.hatch_threshold_ms),
            ("obstacle_buffer", self.obstacle_buffer),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidInterval { name, value });
            }
        }
        if self.winning_score == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "winning_score",
            });
        }
        if self.loss_limit == 0 {
            return Err(ConfigError::ZeroLimit { name: "loss_limit" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.frame_interval_ms() - 1000.0 / 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "max_eggs": 3 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_eggs, 3);
        assert_eq!(config.winning_score, 40);
        assert_eq!(config.hatch_policy, HatchPolicy::Reset);
    }

    #[test]
    fn test_from_json_applies_difficulty_preset() {
        let config = GameConfig::from_json(r#"{ "difficulty": "Hard" }"#).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.enemy_count, 8);
        assert_eq!(config.loss_limit, 3);
        assert_eq!(config.hatch_threshold_ms, 2500.0);
    }

    #[test]
    fn test_from_json_fields_override_preset() {
        let config =
            GameConfig::from_json(r#"{ "difficulty": "Easy", "enemy_count": 1 }"#).unwrap();
        assert_eq!(config.enemy_count, 1);
        assert_eq!(config.loss_limit, Difficulty::Easy.loss_limit());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = GameConfig::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_json_rejects_bad_margin() {
        let err = GameConfig::from_json(r#"{ "height": 200, "top_margin": 260 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::TopMarginOutOfRange { .. }));
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = GameConfig {
            loss_limit: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroLimit { name: "loss_limit" })
        );
    }

    #[test]
    fn test_preset_round_trip() {
        for preset in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(preset.as_str()), Some(preset));
        }
        let hard = GameConfig::from_preset(Difficulty::Hard);
        assert_eq!(hard.enemy_count, 8);
        assert_eq!(hard.loss_limit, 3);
    }
}
