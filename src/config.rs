// Thu Jan 16 2026 - Alex

use crate::permission::PermissionError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keep set-uid, set-gid and sticky bits when synchronizing.
    pub preserve_special_bits: bool,
    pub create_if_missing: bool,
    pub dry_run: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preserve_special_bits: false,
            create_if_missing: true,
            dry_run: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self, PermissionError> {
        let contents = std::fs::read_to_string(path).map_err(|e| PermissionError::io(path, e))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| PermissionError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate().map_err(PermissionError::Config)?;
        Ok(config)
    }

    pub fn with_preserve_special_bits(mut self, preserve: bool) -> Self {
        self.preserve_special_bits = preserve;
        self
    }

    pub fn with_create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "log_level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }
        Ok(())
    }
}
