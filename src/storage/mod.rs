//! Storage layer for tally
//!
//! JSON files under the data directory, written atomically. Each repository
//! holds its rows in memory between `load` and `save`.

pub mod file_io;
pub mod predictions;
pub mod savings;
pub mod transactions;
pub mod users;

pub use file_io::{read_json, write_json_atomic};
pub use predictions::PredictionRepository;
pub use savings::SavingsRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

use crate::config::paths::TallyPaths;
use crate::error::TallyError;

/// Access to all repositories
pub struct Storage {
    paths: TallyPaths,
    pub transactions: TransactionRepository,
    pub savings: SavingsRepository,
    pub predictions: PredictionRepository,
    pub users: UserRepository,
}

impl Storage {
    pub fn new(paths: TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.ledger_file()),
            savings: SavingsRepository::new(paths.savings_file()),
            predictions: PredictionRepository::new(paths.predictions_file()),
            users: UserRepository::new(paths.users_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    pub fn load_all(&self) -> Result<(), TallyError> {
        self.transactions.load()?;
        self.savings.load()?;
        self.predictions.load()?;
        self.users.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), TallyError> {
        self.transactions.save()?;
        self.savings.save()?;
        self.predictions.save()?;
        self.users.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Timestamp, Transaction, UserId};
    use tempfile::TempDir;

    #[test]
    fn test_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        assert!(temp_dir.path().join("data").is_dir());

        storage
            .transactions
            .insert(Transaction::income(UserId::new(1), Money::from_units(10, 0), Timestamp::parse("2024-01-01")))
            .unwrap();
        storage.save_all().unwrap();
        assert!(paths.ledger_file().exists());
        assert!(paths.savings_file().exists());
        assert!(paths.users_file().exists());

        let again = Storage::new(paths).unwrap();
        again.load_all().unwrap();
        assert_eq!(again.transactions.count().unwrap(), 1);
    }
}
