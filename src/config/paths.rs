//! Path management for tally
//!
//! ## Path Resolution Order
//!
//! 1. `TALLY_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `tally` (`~/.config/tally` on Linux)

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::error::TallyError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "TALLY_DATA_DIR";

/// Locations of the settings and data files
#[derive(Debug, Clone)]
pub struct TallyPaths {
    base_dir: PathBuf,
}

impl TallyPaths {
    /// Resolve the base directory from the environment or the platform default
    pub fn new() -> Result<Self, TallyError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "tally")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    TallyError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// All income and expense rows
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    pub fn savings_file(&self) -> PathBuf {
        self.data_dir().join("savings.json")
    }

    /// Registered users
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Latest imported prediction per user
    pub fn predictions_file(&self) -> PathBuf {
        self.data_dir().join("predictions.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> Result<(), TallyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TallyError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| TallyError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Whether `tally init` has written a settings file
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.ledger_file(), temp_dir.path().join("data").join("ledger.json"));
        assert_eq!(paths.savings_file(), temp_dir.path().join("data").join("savings.json"));
        assert_eq!(paths.users_file(), temp_dir.path().join("data").join("users.json"));
        assert_eq!(
            paths.predictions_file(),
            temp_dir.path().join("data").join("predictions.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().join("nested"));

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
    }
}
