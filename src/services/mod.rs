//! Service layer for tally
//!
//! Validation and persistence on top of the repositories. Aggregation itself
//! lives in `reports` and never touches storage.

pub mod prediction;
pub mod savings;
pub mod transaction;
pub mod user;

pub use prediction::PredictionService;
pub use savings::SavingsService;
pub use transaction::TransactionService;
pub use user::UserService;
