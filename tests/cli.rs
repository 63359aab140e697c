use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("covid-trend").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("covid-trend"));
}

#[test]
fn get_help_lists_categories() {
    let mut cmd = Command::cargo_bin("covid-trend").unwrap();
    cmd.args(["get", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("recovered"))
        .stdout(predicate::str::contains("deaths"));
}

#[test]
fn unknown_category_is_rejected() {
    let mut cmd = Command::cargo_bin("covid-trend").unwrap();
    cmd.args(["get", "--category", "active"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("active"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn fetch_online_deaths_stats() {
    let mut cmd = Command::cargo_bin("covid-trend").unwrap();
    cmd.args(["get", "--category", "deaths", "--last-days", "30", "--stats"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("deaths  days=29"));
}
