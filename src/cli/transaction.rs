//! CLI commands for entering, listing and deleting transactions

use clap::Subcommand;

use super::{entry_date, parse_amount, resolve_now};
use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::TallyResult;
use crate::models::{CategoryTag, Money, ReportPeriod, UserId};
use crate::reports::history;
use crate::services::TransactionService;
use crate::storage::Storage;

#[derive(Subcommand, Debug)]
pub enum IncomeCommands {
    /// Record income
    Add {
        /// Amount (e.g. 2500 or 2500.00)
        #[arg(value_parser = parse_amount)]
        amount: Money,
        /// Date (YYYY-MM-DD or YYYY-MM-DDTHH:MM); defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount (e.g. 12.50)
        #[arg(value_parser = parse_amount)]
        amount: Money,
        /// Bills, Food, Entertainment, Transportation, "Personal Spending", Savings or Healthcare
        #[arg(short, long)]
        category: CategoryTag,
        /// Date (YYYY-MM-DD or YYYY-MM-DDTHH:MM); defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TxnCommands {
    /// List transactions of a period, newest first
    #[command(alias = "ls")]
    List {
        #[arg(short, long, value_enum, default_value_t = ReportPeriod::Monthly)]
        period: ReportPeriod,
        /// Only rows whose category contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Reference date for the period (defaults to now)
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Show one transaction
    Show {
        /// Transaction ID or prefix
        id: String,
    },
    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID or prefix
        id: String,
        /// Delete without confirmation
        #[arg(short, long)]
        force: bool,
    },
}

pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    user: UserId,
    cmd: IncomeCommands,
) -> TallyResult<()> {
    let service = TransactionService::new(storage);
    match cmd {
        IncomeCommands::Add { amount, date } => {
            let txn = service.add_income(user, amount, entry_date(date))?;
            println!("Recorded income:");
            print!("{}", format_transaction_details(&txn, &settings.currency_symbol));
        }
    }
    Ok(())
}

pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    user: UserId,
    cmd: ExpenseCommands,
) -> TallyResult<()> {
    let service = TransactionService::new(storage);
    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
        } => {
            let txn = service.add_expense(user, amount, category, entry_date(date))?;
            println!("Recorded expense:");
            print!("{}", format_transaction_details(&txn, &settings.currency_symbol));
        }
    }
    Ok(())
}

pub fn handle_txn_command(
    storage: &Storage,
    settings: &Settings,
    user: UserId,
    cmd: TxnCommands,
) -> TallyResult<()> {
    let service = TransactionService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TxnCommands::List {
            period,
            search,
            as_of,
        } => {
            let now = resolve_now(as_of.as_deref())?;
            let rows = service.list_for_user(user)?;
            let listed = history(&rows, period, now, search.as_deref());

            println!("{} transactions: {}", period, period.window(now));
            print!("{}", format_transaction_table(&listed, currency));
            if !listed.is_empty() {
                println!("\nShowing {} transactions", listed.len());
            }
        }
        TxnCommands::Show { id } => {
            let txn = service.find(user, &id)?;
            print!("{}", format_transaction_details(&txn, currency));
        }
        TxnCommands::Delete { id, force } => {
            if !force {
                let txn = service.find(user, &id)?;
                println!("About to delete transaction:");
                print!("{}", format_transaction_details(&txn, currency));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let txn = service.delete(user, &id)?;
            println!("Deleted transaction {}", txn.id);
        }
    }
    Ok(())
}
