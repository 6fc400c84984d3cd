//! Transaction tables for terminal output

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, currency: &str) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.to_string(),
            kind: if txn.is_income() { "income" } else { "expense" },
            category: truncate(txn.category_label(), 24),
            amount: txn.amount.format_with_symbol(currency),
        }
    }
}

/// Render transactions as a table, or a short notice when there are none
pub fn format_transaction_table(transactions: &[&Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|txn| TransactionRow::new(txn, currency))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Detail view of a single transaction
pub fn format_transaction_details(txn: &Transaction, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("User:        {}\n", txn.user_id));
    output.push_str(&format!("Date:        {}\n", txn.date));
    output.push_str(&format!("Category:    {}\n", txn.category_label()));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(currency)));
    output
}
