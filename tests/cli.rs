use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_DATA_DIR", dir.path())
        .env("TALLY_LOG", "warn")
        .env_remove("TALLY_USER");
    cmd
}

fn seed(dir: &TempDir) {
    tally(dir)
        .args(["income", "add", "3000", "--date", "2024-06-01T09:00:00"])
        .assert()
        .success();
    tally(dir)
        .args(["expense", "add", "120.50", "--category", "food", "--date", "2024-06-14T19:00:00"])
        .assert()
        .success();
    tally(dir)
        .args(["expense", "add", "900", "-c", "Bills", "-d", "2024-06-02"])
        .assert()
        .success();
    tally(dir)
        .args(["expense", "add", "40", "-c", "personal-spending", "-d", "2024-05-20"])
        .assert()
        .success();
}

fn register(dir: &TempDir, name: &str) {
    tally(dir).args(["user", "add", name]).assert().success();
}

fn first_transaction_id(dir: &TempDir) -> String {
    let ledger = std::fs::read_to_string(dir.path().join("data").join("ledger.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&ledger).unwrap();
    json["transactions"][0]["id"].as_str().unwrap().to_string()
}

#[test]
fn init_writes_settings() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tally"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("ledger.json").exists());

    tally(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("annualize latest income"));
}

#[test]
fn monthly_report_totals() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    tally(&dir)
        .args(["report", "--period", "monthly", "--as-of", "2024-06-15T10:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Report: 2024-06-01 to 2024-06-30"))
        .stdout(predicate::str::contains("$3000.00"))
        .stdout(predicate::str::contains("$1020.50"))
        .stdout(predicate::str::contains("$1979.50"))
        .stdout(predicate::str::contains("Bills"))
        .stdout(predicate::str::contains("Personal Spending").not());
}

#[test]
fn yearly_report_annualizes_latest_income() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    tally(&dir)
        .args(["report", "-p", "yearly", "--as-of", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$36000.00"))
        .stdout(predicate::str::contains("latest income x 12"))
        .stdout(predicate::str::contains("$1060.50"));
}

#[test]
fn empty_day_shows_placeholder_message() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    tally(&dir)
        .args(["report", "--as-of", "2024-06-16T12:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses recorded in this period."));
}

#[test]
fn report_csv_export() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    let out = dir.path().join("june.csv");

    tally(&dir)
        .args(["report", "-p", "monthly", "--as-of", "2024-06-15"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Period,Start Date,End Date,Category,Amount,Share\n"));
    assert!(csv.contains("Monthly,2024-06-01,2024-06-30,Bills,900.00,"));
}

#[test]
fn monthly_export_to_stdout() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    tally(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "user_id,Month,Income,Bills,Food,Entertainment,Transportation,Personal Spending,Healthcare,Savings\n",
        ))
        .stdout(predicate::str::contains("1,2024-05,0.00,0.00,0.00,0.00,0.00,40.00,0.00,0.00\n"))
        .stdout(predicate::str::contains("1,2024-06,3000.00,900.00,120.50,0.00,0.00,0.00,0.00,0.00\n"));
}

#[test]
fn monthly_export_to_file() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    let out = dir.path().join("export.csv");

    tally(&dir)
        .arg("export")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 months"));

    let csv = std::fs::read_to_string(&out).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn list_with_search() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    tally(&dir)
        .args(["txn", "list", "-p", "yearly", "--as-of", "2024-06-15", "--search", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("$120.50"))
        .stdout(predicate::str::contains("Bills").not())
        .stdout(predicate::str::contains("Showing 1 transactions"));
}

#[test]
fn users_are_isolated() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    register(&dir, "alice");
    register(&dir, "bob");
    let id = first_transaction_id(&dir);

    tally(&dir)
        .args(["--user", "2", "txn", "list", "-p", "yearly", "--as-of", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));

    tally(&dir)
        .args(["--user", "2", "txn", "show", &id[..8]])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Amount").not())
        .stderr(predicate::str::contains("Transaction not found"));

    tally(&dir)
        .args(["--user", "2", "txn", "delete", &id])
        .assert()
        .failure()
        .stdout(predicate::str::contains("About to delete").not());

    tally(&dir)
        .env("TALLY_USER", "2")
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-06").not());

    tally(&dir)
        .args(["txn", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("User:        1"));
}

#[test]
fn unregistered_user_is_rejected() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    tally(&dir)
        .args(["--user", "12", "report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User 12 is not registered"));

    register(&dir, "alice");
    tally(&dir)
        .args(["--user", "12", "income", "add", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not registered"));
    assert!(!std::fs::read_to_string(dir.path().join("data").join("ledger.json"))
        .unwrap()
        .contains("\"user_id\": 12"));
}

#[test]
fn user_registry_flow() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    tally(&dir)
        .args(["user", "add", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered user alice (id 1)"))
        .stdout(predicate::str::contains("Active user: alice (id 1)"));

    tally(&dir)
        .args(["user", "add", "ALICE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    tally(&dir)
        .args(["user", "add", "a_very_long_username"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("15 characters"));

    tally(&dir)
        .args(["user", "add", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered user bob (id 2)"))
        .stdout(predicate::str::contains("Active user").not());

    tally(&dir)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("bob"));

    tally(&dir)
        .args(["user", "switch", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to bob (id 2)"));

    tally(&dir)
        .args(["txn", "list", "-p", "yearly", "--as-of", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));

    tally(&dir)
        .args(["user", "switch", "mallory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found: mallory"));

    tally(&dir)
        .args(["user", "switch", "alice"])
        .assert()
        .success();
    tally(&dir)
        .args(["txn", "list", "-p", "yearly", "--as-of", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 4 transactions"));
}

#[test]
fn rejects_bad_input() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["expense", "add", "10", "--category", "Pets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pets"));

    tally(&dir)
        .args(["income", "add", "10.001"])
        .assert()
        .failure();

    tally(&dir)
        .args(["income", "add", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));

    tally(&dir)
        .args(["income", "add", "10", "--date", "next tuesday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized date"));
}

#[test]
fn delete_requires_force_and_owner() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    register(&dir, "alice");
    register(&dir, "bob");
    let id = first_transaction_id(&dir);

    tally(&dir)
        .args(["txn", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force"));

    tally(&dir)
        .args(["--user", "2", "txn", "delete", &id, "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    tally(&dir)
        .args(["txn", "delete", &id, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction"));

    tally(&dir)
        .args(["txn", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn malformed_ledger_rows_are_skipped() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(
        dir.path().join("data").join("ledger.json"),
        r#"{"transactions": [
            {"id": "0b6e2a64-7f1c-4d7e-9a61-2f9c2c1d5e01", "user_id": 1, "amount": "25",
             "date": "sometime", "kind": "expense", "category": "Food"},
            {"id": "0b6e2a64-7f1c-4d7e-9a61-2f9c2c1d5e02", "user_id": 1, "amount": 10,
             "date": "2024-06-15T08:00:00", "kind": "expense", "category": "Snacks"},
            {"id": "0b6e2a64-7f1c-4d7e-9a61-2f9c2c1d5e03", "user_id": 1, "amount": "7.25",
             "date": "2024-06-15T09:00:00", "kind": "expense", "category": "Food"}
        ]}"#,
    )
    .unwrap();

    tally(&dir)
        .args(["report", "--as-of", "2024-06-15T12:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("$7.25"))
        .stdout(predicate::str::contains("Snacks").not())
        .stderr(predicate::str::contains("malformed date"));

    tally(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("1,2024-06,0.00,0.00,7.25,"));
}

#[test]
fn padded_dates_reach_export_and_report() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(
        dir.path().join("data").join("ledger.json"),
        r#"{"transactions": [
            {"id": "0b6e2a64-7f1c-4d7e-9a61-2f9c2c1d5e11", "user_id": 1, "amount": 500,
             "date": " 2024-06-01", "kind": "income"}
        ]}"#,
    )
    .unwrap();

    tally(&dir)
        .args(["report", "-p", "monthly", "--as-of", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$500.00"));

    tally(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("1,2024-06,500.00,"))
        .stderr(predicate::str::contains("malformed").not());
}

#[test]
fn oversized_stored_amounts_are_zeroed() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(
        dir.path().join("data").join("ledger.json"),
        r#"{"transactions": [
            {"id": "0b6e2a64-7f1c-4d7e-9a61-2f9c2c1d5e21", "user_id": 1, "amount": 10000000000000000,
             "date": "2024-06-01T09:00:00", "kind": "income"},
            {"id": "0b6e2a64-7f1c-4d7e-9a61-2f9c2c1d5e22", "user_id": 1, "amount": "12.00",
             "date": "2024-06-02T09:00:00", "kind": "expense", "category": "Food"}
        ]}"#,
    )
    .unwrap();

    tally(&dir)
        .args(["report", "-p", "yearly", "--as-of", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$12.00"))
        .stderr(predicate::str::contains("out-of-range stored amount"));

    tally(&dir)
        .args(["income", "add", "1000000000000.01"])
        .assert()
        .failure();
}

#[test]
fn savings_goal_flow() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["savings", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Savings goal not found"));

    tally(&dir)
        .args(["savings", "set", "1000", "--by", "2099-12-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1000.00 by 2099-12-31"));

    tally(&dir)
        .args(["savings", "add", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved $250.00 of $1000.00"));

    tally(&dir)
        .args(["savings", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining: $750.00"))
        .stdout(predicate::str::contains("25%"));

    tally(&dir)
        .args(["savings", "set", "50", "--by", "2000-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("in the past"));

    tally(&dir).args(["savings", "clear"]).assert().success();
}

#[test]
fn prediction_exchange() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    tally(&dir)
        .args(["predict", "request"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"user_id\": 1"))
        .stdout(predicate::str::contains("\"user_income\": 3000.0"));

    let response = dir.path().join("response.json");
    std::fs::write(&response, r#"{"Bills": 1000, "Food": 100, "Crypto": 50}"#).unwrap();

    tally(&dir)
        .args(["predict", "import"])
        .arg(&response)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported prediction for 2 categories"));

    tally(&dir)
        .args(["predict", "show", "--as-of", "2024-06-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Based on income of $3000.00"))
        .stdout(predicate::str::contains("-$20.50"));
}

#[test]
fn prediction_request_needs_income() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["predict", "request"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no income"));
}
