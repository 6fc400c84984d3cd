//! Transaction repository
//!
//! Every income and expense row lives in `ledger.json`. Rows are kept in
//! memory keyed by id and written back sorted by date.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::models::{Transaction, TransactionId, UserId};

use super::file_io::{lock_error, read_json, write_json_atomic};

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// Persistence for income and expense rows
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the in-memory rows with the contents of `ledger.json`
    pub fn load(&self) -> Result<(), TallyError> {
        let file: LedgerFile = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for txn in file.transactions {
            if !txn.date.is_valid() {
                tracing::warn!(id = %txn.id, raw = txn.date.raw(), "ledger row has a malformed date");
            }
            data.insert(txn.id, txn);
        }

        tracing::debug!(count = data.len(), path = %self.path.display(), "loaded ledger");
        Ok(())
    }

    pub fn save(&self) -> Result<(), TallyError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut transactions: Vec<Transaction> = data.values().cloned().collect();
        transactions.sort_by(by_date);

        write_json_atomic(&self.path, &LedgerFile { transactions })?;
        tracing::debug!(count = data.len(), "saved ledger");
        Ok(())
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, TallyError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    pub fn insert(&self, txn: Transaction) -> Result<(), TallyError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Remove a row, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, TallyError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id))
    }

    /// All rows of one user, oldest first
    pub fn all_for_user(&self, user: UserId) -> Result<Vec<Transaction>, TallyError> {
        self.select(|txn| txn.user_id == user)
    }

    /// Expense rows of one user, oldest first
    pub fn expenses_for_user(&self, user: UserId) -> Result<Vec<Transaction>, TallyError> {
        self.select(|txn| txn.user_id == user && txn.is_expense())
    }

    /// Income rows of one user, oldest first
    pub fn income_for_user(&self, user: UserId) -> Result<Vec<Transaction>, TallyError> {
        self.select(|txn| txn.user_id == user && txn.is_income())
    }

    /// Rows of `user` whose id starts with `prefix` (display form or bare uuid)
    pub fn find_by_prefix(&self, user: UserId, prefix: &str) -> Result<Vec<Transaction>, TallyError> {
        self.select(|txn| txn.user_id == user && txn.id.matches_prefix(prefix))
    }

    pub fn count(&self) -> Result<usize, TallyError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }

    fn select<F>(&self, keep: F) -> Result<Vec<Transaction>, TallyError>
    where
        F: Fn(&Transaction) -> bool,
    {
        let data = self.data.read().map_err(lock_error)?;
        let mut rows: Vec<Transaction> = data.values().filter(|txn| keep(txn)).cloned().collect();
        rows.sort_by(by_date);
        Ok(rows)
    }
}

fn by_date(a: &Transaction, b: &Transaction) -> Ordering {
    a.date
        .chronological_cmp(&b.date)
        .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
}
