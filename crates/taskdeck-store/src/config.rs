use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::atomic::write_atomic;
use crate::error::StoreError;

pub const CONFIG_VERSION: u32 = 1;

/// Workspace settings, stored as `config.json`. Missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    /// Days after today covered by the dashboard's upcoming list.
    pub upcoming_window_days: u32,
    /// Maximum entries in the upcoming list.
    pub upcoming_limit: usize,
    /// Horizon for the due-soon notification count.
    pub due_soon_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            upcoming_window_days: 7,
            upcoming_limit: 5,
            due_soon_days: 2,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| StoreError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        self.validate()?;
        write_atomic(path, serde_json::to_string_pretty(self)?.as_bytes())
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.version != CONFIG_VERSION {
            return Err(StoreError::InvalidConfig(format!(
                "unsupported version {} (expected {})",
                self.version, CONFIG_VERSION
            )));
        }
        if self.upcoming_limit == 0 {
            return Err(StoreError::InvalidConfig(
                "upcoming_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
