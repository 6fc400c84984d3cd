//! CLI commands for the budget prediction exchange
//!
//! `request` prints the JSON body to send to the prediction backend; its
//! answer is brought back with `import`.

use clap::Subcommand;
use std::path::{Path, PathBuf};

use super::resolve_now;
use crate::config::settings::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::UserId;
use crate::services::PredictionService;
use crate::storage::Storage;

#[derive(Subcommand, Debug)]
pub enum PredictCommands {
    /// Print the request body for the prediction backend
    Request,
    /// Store a backend response (JSON object of category -> amount)
    Import {
        /// Response file, or "-" for stdin
        file: PathBuf,
    },
    /// Compare the stored prediction with this month's spending
    Show {
        /// Reference date for the month (defaults to now)
        #[arg(long)]
        as_of: Option<String>,
    },
}

pub fn handle_predict_command(
    storage: &Storage,
    settings: &Settings,
    user: UserId,
    cmd: PredictCommands,
) -> TallyResult<()> {
    let service = PredictionService::new(storage);

    match cmd {
        PredictCommands::Request => {
            let request = service.build_request(user)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        PredictCommands::Import { file } => {
            let body = read_body(&file)?;
            let budget = service.import_response(user, &body)?;
            println!(
                "Imported prediction for {} categories (total {})",
                budget.allocations.len(),
                budget.total_allocated().format_with_symbol(&settings.currency_symbol)
            );
        }
        PredictCommands::Show { as_of } => {
            let now = resolve_now(as_of.as_deref())?;
            let report = service.allocation_report(user, now)?;
            print!("{}", report.format_terminal(&settings.currency_symbol));
        }
    }

    Ok(())
}

fn read_body(file: &Path) -> TallyResult<String> {
    if file.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).map_err(TallyError::from);
    }
    std::fs::read_to_string(file).map_err(|e| {
        TallyError::Prediction(format!("Failed to read {}: {}", file.display(), e))
    })
}
