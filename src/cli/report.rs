//! CLI commands for period reports and the monthly export

use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use super::{create_output, resolve_now};
use crate::config::settings::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::{ReportPeriod, UserId};
use crate::reports::{pivot, write_csv, PeriodReport};
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[arg(short, long, value_enum, default_value_t = ReportPeriod::Daily)]
    pub period: ReportPeriod,

    /// Reference date for the period (defaults to now)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Export the breakdown to a CSV file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or export the report for one period
pub fn handle_report(
    storage: &Storage,
    settings: &Settings,
    user: UserId,
    args: ReportArgs,
) -> TallyResult<()> {
    let now = resolve_now(args.as_of.as_deref())?;
    let transactions = storage.transactions.all_for_user(user)?;
    let report = PeriodReport::generate(
        &transactions,
        args.period,
        now,
        settings.yearly_income_policy,
    );

    match args.output {
        Some(path) => {
            let mut writer = create_output(&path)?;
            report.export_csv(&mut writer)?;
            writer.flush()?;
            println!("{} report exported to: {}", args.period, path.display());
        }
        None => print!("{}", report.format_terminal(&settings.currency_symbol)),
    }

    Ok(())
}

/// Write the monthly pivot of all the user's rows as CSV
pub fn handle_export(storage: &Storage, user: UserId, output: Option<PathBuf>) -> TallyResult<()> {
    let income = storage.transactions.income_for_user(user)?;
    let expenses = storage.transactions.expenses_for_user(user)?;
    let rows = pivot(&income, &expenses);

    match output {
        Some(path) => {
            let mut writer = create_output(&path)?;
            write_csv(&rows, &mut writer)?;
            writer
                .flush()
                .map_err(|e| TallyError::Export(e.to_string()))?;
            println!("Exported {} months to: {}", rows.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_csv(&rows, stdout.lock())?;
        }
    }

    Ok(())
}
