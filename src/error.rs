//! Configuration error types.
//!
//! Gameplay operations never fail: invalid calls are guarded and become
//! no-ops. The only fallible surface is loading and validating tuning data.

use std::fmt;

/// Error produced while loading or validating a [`crate::GameConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config document is not valid JSON for the config schema.
    Parse(serde_json::Error),

    /// A value parsed but is outside its usable range.
    Invalid {
        /// Dotted path of the offending field (for logging).
        field: &'static str,
        /// Human-readable description of the accepted range.
        reason: &'static str,
    },

    /// The config file could not be read.
    Io(std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        ConfigError::Invalid { field, reason }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config value '{}': {}", field, reason)
            }
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
