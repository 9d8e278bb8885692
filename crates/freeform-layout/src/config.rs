//! Tunable behaviour of a freeform panel.
//!
//! ```toml
//! # freeform.toml
//! split_tolerance = 0.05
//! debug_overlay = true
//!
//! [panel_background]
//! color = { r = 36, g = 40, b = 46, a = 230 }
//! ```
//!
//! Every field defaults to the built-in behaviour, so an empty file is a
//! valid configuration.

use std::path::Path;

use freeform_core::color::Background;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::proportions::DEFAULT_SPLIT_TOLERANCE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeformConfig {
    /// Allowed overshoot of the split proportion sum above 1.0.
    pub split_tolerance: f64,
    /// Background restored on a pane when its children are merged away.
    pub panel_background: Background,
    /// Label every visible pane with its identifier.
    pub debug_overlay: bool,
}

impl Default for FreeformConfig {
    fn default() -> Self {
        Self {
            split_tolerance: DEFAULT_SPLIT_TOLERANCE,
            panel_background: Background::default(),
            debug_overlay: false,
        }
    }
}

impl FreeformConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.split_tolerance.is_finite() || self.split_tolerance < 0.0 {
            errors.push(format!(
                "split_tolerance must be a finite non-negative number, got {}",
                self.split_tolerance
            ));
        }
        errors
    }

    /// Split tolerance, falling back to the default when out of range.
    #[must_use]
    pub fn effective_split_tolerance(&self) -> f64 {
        if self.split_tolerance.is_finite() && self.split_tolerance >= 0.0 {
            self.split_tolerance
        } else {
            DEFAULT_SPLIT_TOLERANCE
        }
    }
}
