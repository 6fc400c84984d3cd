//! Prediction service
//!
//! Builds the request body for the prediction backend and stores the
//! allocation it answers with.

use chrono::NaiveDateTime;

use crate::error::{TallyError, TallyResult};
use crate::models::{PredictedBudget, PredictionRequest, PredictionResponse, Transaction, UserId};
use crate::reports::{latest_income, AllocationReport};
use crate::storage::Storage;

pub struct PredictionService<'a> {
    storage: &'a Storage,
}

impl<'a> PredictionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Request body carrying the user's most recent income
    pub fn build_request(&self, user: UserId) -> TallyResult<PredictionRequest> {
        let income = self.latest_income(user)?;
        Ok(PredictionRequest::new(user, income.amount))
    }

    /// Parse a backend response and keep it as the user's current prediction
    pub fn import_response(&self, user: UserId, body: &str) -> TallyResult<PredictedBudget> {
        let income = self.latest_income(user)?;
        let response = PredictionResponse::from_json(body)
            .map_err(|e| TallyError::Prediction(format!("Unreadable prediction response: {}", e)))?;

        if response.allocations.is_empty() {
            return Err(TallyError::Prediction(
                "Prediction response contains no known categories".into(),
            ));
        }

        let budget = PredictedBudget::new(user, income.amount, response);
        self.storage.predictions.replace(budget.clone())?;
        self.storage.predictions.save()?;
        tracing::info!(user = %user, categories = budget.allocations.len(), "imported prediction");
        Ok(budget)
    }

    /// Stored prediction compared with this month's spending
    pub fn allocation_report(&self, user: UserId, now: NaiveDateTime) -> TallyResult<AllocationReport> {
        let budget = self
            .storage
            .predictions
            .get(user)?
            .ok_or_else(|| TallyError::prediction_not_found(format!("user {}", user)))?;
        let expenses = self.storage.transactions.expenses_for_user(user)?;
        Ok(AllocationReport::generate(&budget, &expenses, now))
    }

    fn latest_income(&self, user: UserId) -> TallyResult<Transaction> {
        let income = self.storage.transactions.income_for_user(user)?;
        latest_income(&income).cloned().ok_or_else(|| {
            TallyError::Prediction(format!("User {} has no income recorded", user))
        })
    }
}
