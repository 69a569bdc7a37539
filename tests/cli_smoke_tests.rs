use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "dragon_nest_cli";

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("DRAGON_NEST_HOME", home.path())
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn status_starts_at_level_zero() {
    let home = TempDir::new().expect("tempdir");
    cli(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Level 0 (0/25 XP, 0 total)").and(contains("neutral")));
}

#[test]
fn expense_flow_grants_xp() {
    let home = TempDir::new().expect("tempdir");
    cli(&home)
        .args(["nest", "add", "Food", "--budget", "1000"])
        .assert()
        .success()
        .stdout(contains("Created Expense nest `Food`"));

    cli(&home)
        .args(["expense", "food", "500", "--photo"])
        .assert()
        .success()
        .stdout(contains("Filed 500.00 USD into Food").and(contains("7 total")));

    cli(&home)
        .arg("nests")
        .assert()
        .success()
        .stdout(contains("Food").and(contains("50.0%")));

    cli(&home)
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total_xp\": 7"));
}

#[test]
fn check_in_twice_reports_repeat() {
    let home = TempDir::new().expect("tempdir");
    cli(&home)
        .arg("check-in")
        .assert()
        .success()
        .stdout(contains("Checked in"));
    cli(&home)
        .arg("check-in")
        .assert()
        .success()
        .stdout(contains("Already checked in today"));
}

#[test]
fn mood_override_is_reported() {
    let home = TempDir::new().expect("tempdir");
    cli(&home)
        .args(["mood", "happy"])
        .assert()
        .success()
        .stdout(contains("happy").and(contains("(score 2)")));
}

#[test]
fn unknown_nest_fails_with_error() {
    let home = TempDir::new().expect("tempdir");
    cli(&home)
        .args(["expense", "Nowhere", "12"])
        .assert()
        .failure()
        .stderr(contains("Error: Nest not found: Nowhere"));
}

#[test]
fn expense_nest_without_budget_is_rejected() {
    let home = TempDir::new().expect("tempdir");
    cli(&home)
        .args(["nest", "add", "Rent"])
        .assert()
        .failure()
        .stderr(contains("expense nests require a budget"));
}

#[test]
fn evaluate_counts_once_per_day() {
    let home = TempDir::new().expect("tempdir");
    cli(&home)
        .args(["nest", "add", "Food", "--budget", "100"])
        .assert()
        .success();
    cli(&home)
        .arg("evaluate")
        .assert()
        .success()
        .stdout(contains("Budgets evaluated.").and(contains("(score 2)")));
    cli(&home)
        .arg("evaluate")
        .assert()
        .success()
        .stdout(contains("already evaluated today").and(contains("(score 2)")));
}

#[test]
fn first_run_writes_default_config() {
    let home = TempDir::new().expect("tempdir");
    cli(&home).arg("status").assert().success();
    let config = std::fs::read_to_string(home.path().join("config").join("config.json"))
        .expect("config written");
    assert!(config.contains("\"xp_per_level\": 25"));
}
