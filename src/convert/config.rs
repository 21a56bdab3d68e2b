use serde::{Deserialize, Serialize};

use crate::core::{FormError, Result};

/// Coercion configuration
///
/// Formats follow `chrono`'s `strftime` syntax. Timestamps additionally
/// accept RFC 3339 input regardless of `datetime_format`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoercionConfig {
    /// Format for DATE columns
    pub date_format: String,

    /// Format for TIME columns
    pub time_format: String,

    /// Fallback format for TIMESTAMP columns
    pub datetime_format: String,

    /// Trim surrounding whitespace before building TEXT values
    pub trim_text: bool,
}

impl CoercionConfig {
    pub fn new() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M:%S".to_string(),
            datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
            trim_text: false,
        }
    }

    /// Set the DATE format
    pub fn date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Set the TIME format
    pub fn time_format(mut self, format: &str) -> Self {
        self.time_format = format.to_string();
        self
    }

    /// Set the TIMESTAMP fallback format
    pub fn datetime_format(mut self, format: &str) -> Self {
        self.datetime_format = format.to_string();
        self
    }

    /// Enable or disable trimming of TEXT input
    pub fn trim_text(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, format) in [
            ("date_format", &self.date_format),
            ("time_format", &self.time_format),
            ("datetime_format", &self.datetime_format),
        ] {
            if format.trim().is_empty() {
                return Err(FormError::InvalidConfig(format!("{} cannot be empty", name)));
            }
        }

        Ok(())
    }
}

impl Default for CoercionConfig {
    fn default() -> Self {
        Self::new()
    }
}
