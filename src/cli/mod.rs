//! CLI command handlers
//!
//! Bridges clap argument parsing with the service and report layers.

pub mod predict;
pub mod report;
pub mod savings;
pub mod transaction;
pub mod user;

pub use predict::{handle_predict_command, PredictCommands};
pub use report::{handle_export, handle_report, ReportArgs};
pub use savings::{handle_savings_command, SavingsCommands};
pub use transaction::{
    handle_expense_command, handle_income_command, handle_txn_command, ExpenseCommands,
    IncomeCommands, TxnCommands,
};
pub use user::{handle_user_command, UserCommands};

use chrono::{Local, NaiveDateTime};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{TallyError, TallyResult};
use crate::models::{Money, Timestamp};

/// clap value parser for positive amounts with at most two decimals
pub fn parse_amount(s: &str) -> Result<Money, String> {
    let amount = Money::parse(s).map_err(|e| e.to_string())?;
    if !amount.is_positive() {
        return Err("amount must be greater than zero".to_string());
    }
    if !amount.is_within_limit() {
        return Err(format!("amount must be at most {}", Money::LIMIT));
    }
    Ok(amount)
}

/// Reference moment for period windows: `--as-of` or the local clock
pub fn resolve_now(as_of: Option<&str>) -> TallyResult<NaiveDateTime> {
    match as_of {
        None => Ok(Local::now().naive_local()),
        Some(text) => Timestamp::parse(text).local().ok_or_else(|| {
            TallyError::Validation(format!(
                "Invalid --as-of '{}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]",
                text
            ))
        }),
    }
}

/// Date of a new entry: `--date` as given, or now
pub fn entry_date(date: Option<String>) -> Timestamp {
    date.map(Timestamp::parse).unwrap_or_else(Timestamp::now)
}

pub(crate) fn create_output(path: &Path) -> TallyResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        TallyError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
