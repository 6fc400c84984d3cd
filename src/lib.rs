//! tally - terminal personal budgeting
//!
//! Records income and categorized expenses per user and aggregates them into
//! period reports, a category breakdown and a monthly CSV export.
//!
//! # Architecture
//!
//! - `models`: money, ids, categories, timestamps, periods and records
//! - `reports`: the pure aggregation core and the reports built on it
//! - `storage`: JSON file repositories with atomic writes
//! - `services`: validated operations over storage
//! - `config`: paths and persisted settings
//! - `display`: terminal formatting
//! - `cli`: clap subcommands and their handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::models::ReportPeriod;
//! use tally::reports::{period_totals, YearlyIncomePolicy};
//!
//! let totals = period_totals(&rows, ReportPeriod::Monthly, now, YearlyIncomePolicy::default());
//! assert_eq!(totals.balance, totals.income - totals.expense);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
