//! Registered user listing

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{User, UserId};

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Registered")]
    registered: String,
}

/// Render users as a table, marking `active` with `*`
pub fn format_user_table(users: &[User], active: UserId) -> String {
    if users.is_empty() {
        return "No users registered. Add one with 'tally user add <NAME>'.\n".to_string();
    }

    let rows: Vec<UserRow> = users
        .iter()
        .map(|user| UserRow {
            marker: if user.id == active { "*" } else { "" },
            id: user.id.get(),
            username: user.username.clone(),
            registered: user.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}
