//! CLI commands for the savings goal

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use super::parse_amount;
use crate::config::settings::Settings;
use crate::display::report::format_progress;
use crate::error::TallyResult;
use crate::models::{Money, UserId};
use crate::services::SavingsService;
use crate::storage::Storage;

#[derive(Subcommand, Debug)]
pub enum SavingsCommands {
    /// Start a new goal (replaces the current one)
    Set {
        /// Amount to save
        #[arg(value_parser = parse_amount)]
        target: Money,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        by: NaiveDate,
    },
    /// Put money towards the current goal
    Add {
        #[arg(value_parser = parse_amount)]
        amount: Money,
    },
    /// Show progress towards the current goal
    Status,
    /// Remove the goal
    Clear,
}

pub fn handle_savings_command(
    storage: &Storage,
    settings: &Settings,
    user: UserId,
    cmd: SavingsCommands,
) -> TallyResult<()> {
    let service = SavingsService::new(storage);
    let today = Local::now().date_naive();
    let currency = settings.currency_symbol.as_str();

    match cmd {
        SavingsCommands::Set { target, by } => {
            let goal = service.set_goal(user, target, by, today)?;
            println!(
                "Savings goal set: {} by {}",
                goal.target_amount.format_with_symbol(currency),
                goal.target_date
            );
        }
        SavingsCommands::Add { amount } => {
            let goal = service.contribute(user, amount, today)?;
            println!(
                "Added {} (saved {} of {})",
                amount.format_with_symbol(currency),
                goal.saved().format_with_symbol(currency),
                goal.target_amount.format_with_symbol(currency)
            );
        }
        SavingsCommands::Status => {
            let (goal, progress) = service.progress(user, today)?;
            println!("Savings goal: {} by {}", progress.target.format_with_symbol(currency), goal.target_date);
            println!(
                "{} {:.0}%",
                format_progress(progress.fraction(), 30),
                progress.fraction() * 100.0
            );
            println!("Saved:     {}", progress.saved.format_with_symbol(currency));
            println!("Remaining: {}", progress.remaining.format_with_symbol(currency));

            if progress.reached {
                println!("Goal reached!");
            } else if progress.days_left < 0 {
                println!("Target date passed {} days ago", -progress.days_left);
            } else {
                println!("Days left: {}", progress.days_left);
            }
        }
        SavingsCommands::Clear => {
            service.clear(user)?;
            println!("Savings goal cleared");
        }
    }

    Ok(())
}
