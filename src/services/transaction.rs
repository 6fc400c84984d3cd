//! Transaction service
//!
//! Validated entry, lookup and deletion of income and expense rows.

use crate::error::{TallyError, TallyResult};
use crate::models::{CategoryTag, Money, Timestamp, Transaction, UserId};
use crate::storage::Storage;

pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record income for `user`
    pub fn add_income(&self, user: UserId, amount: Money, date: Timestamp) -> TallyResult<Transaction> {
        validate_entry(amount, &date)?;
        self.store(Transaction::income(user, amount, date))
    }

    /// Record an expense for `user`
    pub fn add_expense(
        &self,
        user: UserId,
        amount: Money,
        category: CategoryTag,
        date: Timestamp,
    ) -> TallyResult<Transaction> {
        validate_entry(amount, &date)?;
        self.store(Transaction::expense(user, amount, category, date))
    }

    /// Look up one of `user`'s rows by full id or unique prefix.
    ///
    /// Rows owned by other users are reported as not found.
    pub fn find(&self, user: UserId, id_text: &str) -> TallyResult<Transaction> {
        let mut matches = self.storage.transactions.find_by_prefix(user, id_text)?;
        match matches.len() {
            0 => Err(TallyError::transaction_not_found(id_text)),
            1 => Ok(matches.remove(0)),
            n => Err(TallyError::Validation(format!(
                "'{}' matches {} transactions; give more of the id",
                id_text, n
            ))),
        }
    }

    /// Delete one of `user`'s rows
    pub fn delete(&self, user: UserId, id_text: &str) -> TallyResult<Transaction> {
        let txn = self.find(user, id_text)?;
        self.storage.transactions.delete(txn.id)?;
        self.storage.transactions.save()?;
        tracing::info!(id = %txn.id, user = %user, "deleted transaction");
        Ok(txn)
    }

    /// All of `user`'s rows, oldest first
    pub fn list_for_user(&self, user: UserId) -> TallyResult<Vec<Transaction>> {
        self.storage.transactions.all_for_user(user)
    }

    fn store(&self, txn: Transaction) -> TallyResult<Transaction> {
        self.storage.transactions.insert(txn.clone())?;
        self.storage.transactions.save()?;
        tracing::info!(id = %txn.id, user = %txn.user_id, kind = txn.category_label(), amount = %txn.amount, "recorded transaction");
        Ok(txn)
    }
}

fn validate_entry(amount: Money, date: &Timestamp) -> TallyResult<()> {
    if !amount.is_positive() {
        return Err(TallyError::Validation(format!(
            "Amount must be greater than zero, got {}",
            amount
        )));
    }
    if !date.is_valid() {
        return Err(TallyError::Validation(format!(
            "Unrecognized date '{}'; use YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]",
            date.raw()
        )));
    }
    Ok(())
}
