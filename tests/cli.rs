use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const HEADER: &str = "Completed Date;Reference;Paid Out (EUR);Paid In (EUR);Exchange Out;Exchange In; Balance (EUR);Exchange Rate;Category";

fn write_statement(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = format!("{HEADER}\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).unwrap();
    path
}

fn giacenza(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("giacenza").unwrap();
    cmd.env("HOME", home);
    cmd
}

fn as_f64(v: &serde_json::Value) -> f64 {
    v.as_f64().expect("amounts are JSON numbers")
}

#[test]
fn report_json_matches_worked_example() {
    let dir = tempfile::tempdir().unwrap();
    let stmt = write_statement(dir.path(), "2023.csv", &["01 lug 2023;Rent;200,00;;;;800,00;;Housing"]);

    let output = giacenza(dir.path())
        .args(["report", "--year", "2023", "--opening-balance", "1000", "--json"])
        .arg(&stmt)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["year"], 2023);
    assert_eq!(report["balances"].as_array().unwrap().len(), 2);
    assert_eq!(report["balances"][1]["date"], "2023-07-01");
    assert_eq!(as_f64(&report["balances"][1]["totalAmount"]), 800.0);
    assert_eq!(report["creditorNumbers"][0]["numDays"], 181);
    assert_eq!(report["creditorNumbers"][1]["numDays"], 184);
    assert_eq!(as_f64(&report["annualBalance"]), 328200.0);
    assert!((as_f64(&report["averageBalance"]) - 899.178).abs() < 0.001);
}

#[test]
fn report_prints_summary_table() {
    let dir = tempfile::tempdir().unwrap();
    let stmt = write_statement(dir.path(), "2023.csv", &["01 lug;Rent;200,00;;;;800,00;;Housing"]);

    giacenza(dir.path())
        .args(["report", "--year", "2023", "--opening-balance", "1000,00", "--details"])
        .arg(&stmt)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 imported, 0 skipped"))
        .stdout(predicate::str::contains("Creditor Numbers"))
        .stdout(predicate::str::contains("€ 328,200.00"))
        .stdout(predicate::str::contains("€ 899.18"));
}

#[test]
fn report_skips_overlapping_rows_across_statements() {
    let dir = tempfile::tempdir().unwrap();
    let jan = write_statement(dir.path(), "jan.csv", &[
        "20 gen;Salary;;1500,00;;;;;General",
        "10 gen;Coffee;2,50;;;;;;Food",
    ]);
    let feb = write_statement(dir.path(), "feb.csv", &[
        "03 feb;Shop;40,00;;;;;;General",
        "20 gen;Salary;;1500,00;;;;;General",
    ]);

    giacenza(dir.path())
        .args(["report", "--year", "2024"])
        .arg(&jan)
        .arg(&feb)
        .assert()
        .success()
        .stdout(predicate::str::contains("jan.csv: 2 imported, 0 skipped"))
        .stdout(predicate::str::contains("feb.csv: 1 imported, 1 skipped"));
}

#[test]
fn report_sorts_statements_and_drops_other_years() {
    let dir = tempfile::tempdir().unwrap();
    let feb = write_statement(dir.path(), "feb.csv", &[
        "03 feb;Shop;40,00;;;;;;General",
        "20 gen;Salary;;1500,00;;;;;General",
    ]);
    let jan = write_statement(dir.path(), "jan.csv", &[
        "20 gen;Salary;;1500,00;;;;;General",
        "10 gen;Coffee;2,50;;;;;;Food",
        "28 dic 2022;Gift;;100,00;;;;;General",
    ]);

    let output = giacenza(dir.path())
        .args(["report", "--year", "2023", "--json"])
        .arg(&feb)
        .arg(&jan)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 transaction(s) outside 2023 ignored"));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let dates: Vec<&str> = report["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2023-01-10", "2023-01-20", "2023-02-03"]);

    let days: Vec<i64> = report["creditorNumbers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["numDays"].as_i64().unwrap())
        .collect();
    assert_eq!(days, [9, 10, 14, 332]);
    // 9 * 0 + 10 * -2.5 + 14 * 1497.5 + 332 * 1457.5
    assert_eq!(as_f64(&report["annualBalance"]), 504830.0);
}

#[test]
fn report_warns_on_wrong_file_type() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.csv");
    std::fs::write(&bogus, "Date,Description,Amount\n01/15/2023,Coffee,-3.00\n").unwrap();

    let output = giacenza(dir.path())
        .args(["report", "--year", "2023", "--opening-balance", "100", "--json"])
        .arg(&bogus)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not look like a supported statement"));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["creditorNumbers"][0]["numDays"], 365);
    assert_eq!(as_f64(&report["averageBalance"]), 100.0);
}

#[test]
fn report_rejects_malformed_rows() {
    let dir = tempfile::tempdir().unwrap();
    let stmt = write_statement(dir.path(), "bad.csv", &["05 mar;Nothing;;;;;;;General"]);

    giacenza(dir.path())
        .args(["report", "--year", "2022"])
        .arg(&stmt)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed amount on line 2"));
}

#[test]
fn parse_resolves_dates_and_signs() {
    let dir = tempfile::tempdir().unwrap();
    let stmt = write_statement(dir.path(), "stmt.csv", &[
        "06 mar 2021;Refund;;10,50;;;;;General",
        "05 mar;Shop;10,50;;;;;;General",
    ]);

    let output = giacenza(dir.path())
        .args(["parse", "--year", "2022", "--json"])
        .arg(&stmt)
        .output()
        .unwrap();
    assert!(output.status.success());

    let txns: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(txns[0]["date"], "2022-03-05");
    assert_eq!(as_f64(&txns[0]["amount"]), -10.5);
    assert_eq!(txns[1]["date"], "2021-03-06");
    assert_eq!(as_f64(&txns[1]["amount"]), 10.5);
}

#[test]
fn parse_fails_on_wrong_file_type() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.csv");
    std::fs::write(&bogus, "just some text\n").unwrap();

    giacenza(dir.path())
        .arg("parse")
        .arg(&bogus)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match the selected statement format"));
}

#[test]
fn unknown_language_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let stmt = write_statement(dir.path(), "stmt.csv", &["05 mar;Shop;1,00;;;;;;General"]);

    giacenza(dir.path())
        .args(["parse", "--language", "XX"])
        .arg(&stmt)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown calendar language: XX"));
}

#[test]
fn disclaimer_acceptance_persists() {
    let dir = tempfile::tempdir().unwrap();

    giacenza(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("not accepted"));

    giacenza(dir.path())
        .args(["disclaimer", "--accept"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Agreement recorded."));

    giacenza(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Disclaimer:  accepted"));
}

#[test]
fn init_saves_language() {
    let dir = tempfile::tempdir().unwrap();

    giacenza(dir.path())
        .args(["init", "--language", "it"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(dir.path().join(".config/giacenza/settings.json")).unwrap();
    assert!(saved.contains("\"language\": \"IT\""));
}
