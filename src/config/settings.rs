//! User settings for tally
//!
//! Stored as `config.json` in the base directory. Every field has a default so
//! older or hand-edited files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::UserId;
use crate::reports::YearlyIncomePolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// User acted on when `--user` is not given
    #[serde(default)]
    pub active_user: UserId,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// How the yearly report derives its income figure
    #[serde(default)]
    pub yearly_income_policy: YearlyIncomePolicy,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            active_user: UserId::default(),
            currency_symbol: default_currency(),
            yearly_income_policy: YearlyIncomePolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults when the file doesn't exist yet
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let settings_path = paths.settings_file();
        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TallyError::Config(format!("Failed to parse settings file: {}", e)))
    }

    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TallyError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TallyError::Io(format!("Failed to write settings file: {}", e)))?;

        tracing::debug!(path = %paths.settings_file().display(), "saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.active_user, UserId::new(1));
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.yearly_income_policy, YearlyIncomePolicy::AnnualizeLatest);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.active_user = UserId::new(5);
        settings.yearly_income_policy = YearlyIncomePolicy::SumOfPeriod;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.active_user, UserId::new(1));
    }

    #[test]
    fn test_policy_serialized_snake_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"yearly_income_policy\":\"annualize_latest\""));
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, TallyError::Config(_)));
    }
}
