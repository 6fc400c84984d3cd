//! CLI commands for registering and switching users

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_user_table;
use crate::error::TallyResult;
use crate::services::UserService;
use crate::storage::Storage;

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Register a new user
    Add {
        /// Username (unique, at most 15 characters)
        name: String,
    },
    /// List registered users
    #[command(alias = "ls")]
    List,
    /// Make a registered user the active user
    Switch {
        /// Username
        name: String,
    },
}

pub fn handle_user_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: UserCommands,
) -> TallyResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Add { name } => {
            let user = service.register(&name, settings.active_user)?;
            println!("Registered user {}", user);
            if user.id == settings.active_user {
                println!("Active user: {}", user);
            }
        }
        UserCommands::List => {
            let users = service.list()?;
            print!("{}", format_user_table(&users, settings.active_user));
        }
        UserCommands::Switch { name } => {
            let user = service.find_by_name(&name)?;
            settings.active_user = user.id;
            settings.save(storage.paths())?;
            println!("Switched to {}", user);
        }
    }
    Ok(())
}
