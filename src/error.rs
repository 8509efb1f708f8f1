//! Configuration errors
//!
//! Gameplay never fails: running out of placement attempts, an empty egg cap and
//! similar conditions are game state, not errors. Only a malformed session
//! configuration is reported back to the caller.

use core::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Surface width or height is not a positive finite number
    InvalidDimension { width: f32, height: f32 },
    /// Top UI margin leaves no playable band
    TopMarginOutOfRange { top_margin: f32, height: f32 },
    /// Logic rate must be positive
    InvalidFrameRate { fps: f32 },
    /// A timer interval or threshold is negative or not finite
    InvalidInterval { name: &'static str, value: f32 },
    /// A count or limit that must be at least one is zero
    ZeroLimit { name: &'static str },
    /// JSON could not be decoded into a config
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid surface size {width}x{height}")
            }
            Self::TopMarginOutOfRange { top_margin, height } => write!(
                f,
                "top margin {top_margin} leaves no play area on a surface {height} high"
            ),
            Self::InvalidFrameRate { fps } => write!(f, "invalid logic rate {fps} fps"),
            Self::InvalidInterval { name, value } => write!(f, "invalid {name}: {value}"),
            Self::ZeroLimit { name } => write!(f, "{name} must be at least 1"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
