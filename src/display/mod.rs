//! Display formatting for terminal output

pub mod report;
pub mod transaction;
pub mod user;

pub use transaction::{format_transaction_details, format_transaction_table};
pub use user::format_user_table;
