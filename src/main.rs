use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tally::cli::{
    handle_expense_command, handle_export, handle_income_command, handle_predict_command,
    handle_report, handle_savings_command, handle_txn_command, handle_user_command,
    ExpenseCommands, IncomeCommands, PredictCommands, ReportArgs, SavingsCommands, TxnCommands,
    UserCommands,
};
use tally::config::{paths::TallyPaths, settings::Settings};
use tally::models::UserId;
use tally::services::UserService;
use tally::storage::Storage;
use tally::TallyResult;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Terminal personal budgeting",
    long_about = "tally records income and categorized expenses, reports totals and \
                  category breakdowns per day, week, month or year, and exports a \
                  monthly summary as CSV."
)]
struct Cli {
    /// Act as this registered user id instead of the active user
    #[arg(short, long, global = true, env = "TALLY_USER")]
    user: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Register, list and switch users
    #[command(subcommand)]
    User(UserCommands),

    /// Income entry
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Expense entry
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// List, show and delete transactions
    #[command(subcommand, alias = "transaction")]
    Txn(TxnCommands),

    /// Totals and category breakdown for a period
    Report(ReportArgs),

    /// Monthly summary as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Savings goal
    #[command(subcommand)]
    Savings(SavingsCommands),

    /// Budget prediction request and import
    #[command(subcommand)]
    Predict(PredictCommands),
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = TallyPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let requested = cli.user.map(UserId::new);

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    tracing::debug!(user = ?requested, base = %paths.base_dir().display(), "starting");

    match cli.command {
        Some(Commands::Init) => {
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialized tally at: {}", paths.base_dir().display());
            println!("Active user: {}", settings.active_user);
            println!();
            println!("Record something with 'tally income add 2500' or");
            println!("'tally expense add 12.50 --category Food'.");
        }
        Some(Commands::Config) => {
            println!("tally configuration");
            println!("===================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Active user:     {}", settings.active_user);
            if let Some(user) = requested {
                println!("  Acting as user:  {}", user);
            }
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Yearly income:   {}", settings.yearly_income_policy);
        }
        Some(Commands::User(cmd)) => handle_user_command(&storage, &mut settings, cmd)?,
        Some(Commands::Income(cmd)) => {
            let user = acting_user(&storage, &settings, requested)?;
            handle_income_command(&storage, &settings, user, cmd)?
        }
        Some(Commands::Expense(cmd)) => {
            let user = acting_user(&storage, &settings, requested)?;
            handle_expense_command(&storage, &settings, user, cmd)?
        }
        Some(Commands::Txn(cmd)) => {
            let user = acting_user(&storage, &settings, requested)?;
            handle_txn_command(&storage, &settings, user, cmd)?
        }
        Some(Commands::Report(args)) => {
            let user = acting_user(&storage, &settings, requested)?;
            handle_report(&storage, &settings, user, args)?
        }
        Some(Commands::Export { output }) => {
            let user = acting_user(&storage, &settings, requested)?;
            handle_export(&storage, user, output)?
        }
        Some(Commands::Savings(cmd)) => {
            let user = acting_user(&storage, &settings, requested)?;
            handle_savings_command(&storage, &settings, user, cmd)?
        }
        Some(Commands::Predict(cmd)) => {
            let user = acting_user(&storage, &settings, requested)?;
            handle_predict_command(&storage, &settings, user, cmd)?
        }
        None => {
            println!("tally - terminal personal budgeting");
            println!();
            println!("Run 'tally --help' for usage information.");
        }
    }

    Ok(())
}

/// `--user` if given, else the active user, checked against the registry
fn acting_user(storage: &Storage, settings: &Settings, requested: Option<UserId>) -> TallyResult<UserId> {
    UserService::new(storage).resolve_acting(requested, settings.active_user)
}

/// Log to stderr, filtered by `TALLY_LOG` (default `warn`)
fn init_logging() {
    let filter = EnvFilter::try_from_env("TALLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
