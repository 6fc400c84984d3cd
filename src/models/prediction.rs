//! Budget prediction contract
//!
//! The prediction backend takes a user's income and answers with an amount per
//! category. Only the wire shapes and the cached result live here; the HTTP
//! exchange itself happens outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::CategoryTag;
use super::ids::UserId;
use super::money::Money;

/// Request body sent to the prediction backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub user_id: u64,
    pub user_income: f64,
}

impl PredictionRequest {
    pub fn new(user_id: UserId, income: Money) -> Self {
        Self {
            user_id: user_id.get(),
            user_income: income.as_f64(),
        }
    }
}

/// Per-category allocation parsed out of a backend response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionResponse {
    pub allocations: BTreeMap<CategoryTag, Money>,
}

impl PredictionResponse {
    /// Parse the backend's JSON object of `label -> amount`.
    ///
    /// Unknown labels, non-numeric and out-of-range values are skipped with a
    /// warning;
    /// negative amounts are clamped to zero.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(body)?;
        let mut allocations = BTreeMap::new();

        for (label, value) in raw {
            let Some(tag) = CategoryTag::from_label(&label) else {
                tracing::warn!(%label, "ignoring unknown category in prediction response");
                continue;
            };
            let Some(amount) = value
                .as_f64()
                .and_then(Money::from_f64)
                .filter(Money::is_within_limit)
            else {
                tracing::warn!(%label, raw = %value, "ignoring non-numeric or out-of-range predicted amount");
                continue;
            };
            allocations.insert(tag, amount.non_negative());
        }

        Ok(Self { allocations })
    }
}

/// The most recent prediction stored for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedBudget {
    pub user_id: UserId,
    pub income_used: Money,
    pub predicted_at: DateTime<Utc>,
    pub allocations: BTreeMap<CategoryTag, Money>,
}

impl PredictedBudget {
    pub fn new(user_id: UserId, income_used: Money, response: PredictionResponse) -> Self {
        Self {
            user_id,
            income_used,
            predicted_at: Utc::now(),
            allocations: response.allocations,
        }
    }

    pub fn allocation(&self, tag: CategoryTag) -> Money {
        self.allocations.get(&tag).copied().unwrap_or_default()
    }

    pub fn total_allocated(&self) -> Money {
        self.allocations.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let request = PredictionRequest::new(UserId::new(4), Money::from_cents(350050));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["user_id"], 4);
        assert_eq!(json["user_income"], 3500.5);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "Bills": 1200.0,
            "Food": 450.456,
            "Personal Spending": -3,
            "Crypto": 999,
            "Savings": "lots"
        }"#;
        let response = PredictionResponse::from_json(body).unwrap();
        assert_eq!(response.allocations.len(), 3);
        assert_eq!(response.allocations[&CategoryTag::Bills], Money::from_units(1200, 0));
        assert_eq!(response.allocations[&CategoryTag::Food], Money::from_cents(45046));
        assert_eq!(response.allocations[&CategoryTag::PersonalSpending], Money::zero());
        assert!(!response.allocations.contains_key(&CategoryTag::Savings));
    }

    #[test]
    fn test_response_must_be_object() {
        assert!(PredictionResponse::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_predicted_budget_serde() {
        let mut response = PredictionResponse::default();
        response.allocations.insert(CategoryTag::PersonalSpending, Money::from_cents(5000));
        let budget = PredictedBudget::new(UserId::new(1), Money::from_cents(300000), response);

        let json = serde_json::to_string(&budget).unwrap();
        assert!(json.contains("\"Personal Spending\":5000"));
        let back: PredictedBudget = serde_json::from_str(&json).unwrap();
        assert_eq!(back, budget);
        assert_eq!(back.total_allocated(), Money::from_cents(5000));
        assert_eq!(back.allocation(CategoryTag::Food), Money::zero());
    }
}
