//! Error types for rule configuration

use thiserror::Error;

/// Accepted shapes of the `attribute-indentation` configuration value
pub const USAGE: &str = "The attribute-indentation rule accepts one of the following values.
  * boolean - `true` to enable with defaults, `false` to disable
  * object -- An object with the following keys:
    * `open-invocation-max-len` -- Maximum length of the opening invocation (default 80)
    * `indentation` -- Number of columns attributes are indented by (default 2)
    * `process-elements` -- `true` to also check markup elements (default false)";

/// Errors raised while activating the rule
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{usage}")]
    InvalidShape {
        usage: &'static str,
        /// The rejected value, as written
        received: String,
    },

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    pub fn invalid_shape(received: impl Into<String>) -> Self {
        Self::InvalidShape {
            usage: USAGE,
            received: received.into(),
        }
    }
}
