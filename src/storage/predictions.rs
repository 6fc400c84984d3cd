//! Repository for the latest imported prediction of each user

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::models::{PredictedBudget, UserId};

use super::file_io::{lock_error, read_json, write_json_atomic};

#[derive(Debug, Default, Serialize, Deserialize)]
struct PredictionsFile {
    #[serde(default)]
    predictions: Vec<PredictedBudget>,
}

pub struct PredictionRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, PredictedBudget>>,
}

impl PredictionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), TallyError> {
        let file: PredictionsFile = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for budget in file.predictions {
            data.insert(budget.user_id, budget);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), TallyError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut predictions: Vec<PredictedBudget> = data.values().cloned().collect();
        predictions.sort_by_key(|p| p.user_id);
        write_json_atomic(&self.path, &PredictionsFile { predictions })
    }

    pub fn get(&self, user: UserId) -> Result<Option<PredictedBudget>, TallyError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&user).cloned())
    }

    /// Store `budget`, replacing the user's previous prediction
    pub fn replace(&self, budget: PredictedBudget) -> Result<(), TallyError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(budget.user_id, budget);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryTag, Money, PredictionResponse};
    use tempfile::TempDir;

    #[test]
    fn test_replace_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("predictions.json");
        let repo = PredictionRepository::new(path.clone());

        let first = PredictionResponse::from_json(r#"{"Food": 100}"#).unwrap();
        let second = PredictionResponse::from_json(r#"{"Food": 250}"#).unwrap();
        repo.replace(PredictedBudget::new(UserId::new(1), Money::from_units(1000, 0), first)).unwrap();
        repo.replace(PredictedBudget::new(UserId::new(1), Money::from_units(1000, 0), second)).unwrap();
        repo.save().unwrap();

        let reloaded = PredictionRepository::new(path);
        reloaded.load().unwrap();
        let budget = reloaded.get(UserId::new(1)).unwrap().unwrap();
        assert_eq!(budget.allocation(CategoryTag::Food), Money::from_units(250, 0));
        assert!(reloaded.get(UserId::new(2)).unwrap().is_none());
    }
}
