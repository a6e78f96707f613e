//! Configuration for the attribute-indentation rule
//!
//! The rule is configured with a single value that is either a boolean or a
//! table of options:
//!
//! ```toml
//! attribute-indentation = true
//!
//! # or
//! [attribute-indentation]
//! open-invocation-max-len = 100
//! indentation = 4
//! process-elements = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Key the rule's value lives under in a configuration document
pub const CONFIG_KEY: &str = "attribute-indentation";

pub const DEFAULT_MAX_LENGTH: usize = 80;
pub const DEFAULT_INDENTATION: usize = 2;

/// Normalized rule options, fixed for the whole tree walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Longest single-line opening invocation that is left alone
    pub max_length: usize,

    /// Columns each attribute or argument is indented past its invocation
    pub indentation: usize,

    /// Whether markup elements are checked as well as invocations
    pub process_elements: bool,
}

/// Options used when the rule is enabled with `true`
impl Default for Options {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            indentation: DEFAULT_INDENTATION,
            process_elements: true,
        }
    }
}

/// Accepted shapes of the raw configuration value
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawConfig {
    Enabled(bool),
    Options(RawOptions),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawOptions {
    open_invocation_max_len: Option<usize>,
    indentation: Option<usize>,
    process_elements: Option<bool>,
}

impl From<RawOptions> for Options {
    fn from(raw: RawOptions) -> Self {
        Self {
            max_length: raw.open_invocation_max_len.unwrap_or(DEFAULT_MAX_LENGTH),
            indentation: raw.indentation.unwrap_or(DEFAULT_INDENTATION),
            process_elements: raw.process_elements.unwrap_or(false),
        }
    }
}

impl Options {
    /// Create options with the defaults used by `true`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum single-line opening invocation length
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Set the indentation width
    pub fn with_indentation(mut self, indentation: usize) -> Self {
        self.indentation = indentation;
        self
    }

    /// Enable or disable checking of markup elements
    pub fn with_process_elements(mut self, process_elements: bool) -> Self {
        self.process_elements = process_elements;
        self
    }

    /// Normalize a raw configuration value
    ///
    /// Returns `Ok(None)` when the rule is disabled (`false` or absent).
    pub fn from_value(value: Option<&toml::Value>) -> Result<Option<Self>, ConfigError> {
        let Some(value) = value else {
            return Ok(None);
        };

        let raw: RawConfig = value
            .clone()
            .try_into()
            .map_err(|_| ConfigError::invalid_shape(value.to_string()))?;

        Ok(match raw {
            RawConfig::Enabled(false) => None,
            RawConfig::Enabled(true) => Some(Self::default()),
            RawConfig::Options(options) => Some(options.into()),
        })
    }

    /// Read the rule's value from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Option<Self>, ConfigError> {
        let document: toml::Table = content.parse()?;
        Self::from_value(document.get(CONFIG_KEY))
    }

    /// Read the rule's value from a TOML file
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
