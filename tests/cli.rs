use assert_cmd::Command;
use predicates::prelude::*;

fn trackbook() -> Command {
    Command::cargo_bin("trackbook").unwrap()
}

#[test]
fn refresh_rejects_out_of_range_month() {
    trackbook()
        .args(["refresh", "13", "2026", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("13 is not in 1..=12"));
}

#[test]
fn refresh_rejects_zero_month() {
    trackbook()
        .args(["refresh", "00", "2026", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("0 is not in 1..=12"));
}

#[test]
fn refresh_rejects_malformed_year() {
    trackbook()
        .args(["refresh", "07", "199", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("199 is not in 2000..=9999"));
}

#[test]
fn refresh_requires_month_and_year() {
    trackbook()
        .arg("refresh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required arguments"));
}

#[test]
fn help_lists_subcommands() {
    trackbook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("refresh"))
        .stdout(predicate::str::contains("init"));
}
