//! End-to-end CLI tests: prepare -> train -> best -> predict -> batch.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fmt::Write as _;
use std::path::Path;
use tempfile::TempDir;

const FIELDS: [&str; 18] = [
    "LIMIT_BAL", "SEX", "EDUCATION", "MARRIAGE", "AGE", "PAY_0", "PAY_2", "PAY_3", "PAY_4",
    "PAY_5", "PAY_6", "BILL_AMT6", "PAY_AMT1", "PAY_AMT2", "PAY_AMT3", "PAY_AMT4", "PAY_AMT5",
    "PAY_AMT6",
];

fn riskline(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("riskline").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn applicant_row(limit: u32, age: u32, pay: i32) -> String {
    let mut row = format!("{limit},1,2,1,{age}");
    for _ in 0..6 {
        write!(row, ",{pay}").unwrap();
    }
    write!(row, ",{}", limit / 10).unwrap();
    for month in 0..6 {
        write!(row, ",{}", 500 + month * 100).unwrap();
    }
    row
}

/// Training CSV with an extra non-schema column, the way raw exports come.
fn write_training_csv(dir: &Path) {
    let mut csv = String::from("ID,");
    csv.push_str(&FIELDS.join(","));
    csv.push_str(",default.payment.next.month\n");
    for i in 0..20u32 {
        writeln!(csv, "{},{},0", i, applicant_row(200_000 + i * 1_000, 30 + i, 0)).unwrap();
        writeln!(csv, "{},{},1", 100 + i, applicant_row(20_000 + i * 500, 30 + i, 5)).unwrap();
    }
    std::fs::write(dir.join("credit.csv"), csv).unwrap();
}

fn applicant_json(pay: i32) -> String {
    let mut json = String::from("{");
    write!(
        json,
        r#""LIMIT_BAL": 30000, "SEX": 2, "EDUCATION": 1, "MARRIAGE": 2, "AGE": 45"#
    )
    .unwrap();
    for field in ["PAY_0", "PAY_2", "PAY_3", "PAY_4", "PAY_5", "PAY_6"] {
        write!(json, r#", "{field}": {pay}"#).unwrap();
    }
    write!(json, r#", "BILL_AMT6": 3000"#).unwrap();
    for field in ["PAY_AMT1", "PAY_AMT2", "PAY_AMT3", "PAY_AMT4", "PAY_AMT5", "PAY_AMT6"] {
        write!(json, r#", "{field}": 800"#).unwrap();
    }
    json.push('}');
    json
}

fn prepare_and_train(dir: &Path) {
    write_training_csv(dir);
    riskline(dir)
        .args(["prepare", "--data", "credit.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prepared:"));
    riskline(dir)
        .args(["train", "--family", "logistic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accuracy"));
}

#[test]
fn test_full_workflow() {
    let temp = TempDir::new().unwrap();
    prepare_and_train(temp.path());

    riskline(temp.path())
        .args(["train", "--family", "gradient-boosting", "--n-estimators", "10"])
        .assert()
        .success();

    riskline(temp.path())
        .args(["best"])
        .assert()
        .success()
        .stdout(predicate::str::contains("best:"));

    std::fs::write(temp.path().join("applicant.json"), applicant_json(6)).unwrap();
    riskline(temp.path())
        .args(["predict", "--input", "applicant.json", "--history", "history.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default probability"));
    assert!(temp.path().join("history.csv").exists());

    // Batch-score the training file itself (extra columns are ignored).
    riskline(temp.path())
        .args(["batch", "--input", "credit.csv", "--output", "scored.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("40 applicants scored"));
    let scored = std::fs::read_to_string(temp.path().join("scored.csv")).unwrap();
    assert_eq!(scored.lines().count(), 41);
}

#[test]
fn test_best_without_experiment_fails() {
    let temp = TempDir::new().unwrap();
    riskline(temp.path())
        .args(["best"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("experiment not found"));
}

#[test]
fn test_predict_rejects_incomplete_record() {
    let temp = TempDir::new().unwrap();
    prepare_and_train(temp.path());

    let mut incomplete = applicant_json(0);
    incomplete = incomplete.replace(r#", "PAY_AMT6": 800"#, "");
    std::fs::write(temp.path().join("applicant.json"), incomplete).unwrap();

    riskline(temp.path())
        .args(["predict", "--input", "applicant.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing field: PAY_AMT6"));
}

#[test]
fn test_train_rejects_unknown_family() {
    let temp = TempDir::new().unwrap();
    prepare_and_train(temp.path());

    riskline(temp.path())
        .args(["train", "--family", "svm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown model family"));
}

#[test]
fn test_config_file_changes_experiment_name() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("riskline.toml"), "experiment = 'scoring_v2'\n").unwrap();
    prepare_and_train(temp.path());

    assert!(temp.path().join("runs/scoring_v2").is_dir());
}
