use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;

fn sample() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/data.csv")
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("paygap").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("paygap"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn render_writes_both_charts() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("paygap").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(sample())
        .args(["--year", "2020", "--line-colors", "country", "--end-labels", "--sort", "desc"])
        .arg("--out-dir")
        .arg(dir.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("bar.svg"));

    let bar = std::fs::read_to_string(dir.path().join("bar.svg")).unwrap();
    assert!(bar.contains("Estonia"));
    let line = std::fs::read_to_string(dir.path().join("line.svg")).unwrap();
    assert!(line.contains("Luxembourg"));
}

#[test]
fn png_needs_a_font() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("paygap").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(sample())
        .args(["--format", "png"])
        .arg("--out-dir")
        .arg(dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("font"));
}

#[test]
fn stats_for_a_year() {
    let mut cmd = Command::cargo_bin("paygap").unwrap();
    cmd.arg("stats").arg("--data").arg(sample()).args(["--year", "2021"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("count=8"))
        .stdout(predicate::str::contains("min=-0.2"))
        .stdout(predicate::str::contains("max=20.5"));
}

#[test]
fn stats_for_a_missing_year_prints_na() {
    let mut cmd = Command::cargo_bin("paygap").unwrap();
    cmd.arg("stats").arg("--data").arg(sample()).args(["--year", "1990"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("count=0"))
        .stdout(predicate::str::contains("median=NA"));
}

#[test]
fn bad_input_fails_before_drawing() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("bad.csv");
    std::fs::write(&csv, "geo,country,value\nFR,France,1\n").unwrap();
    let out = dir.path().join("charts");
    let mut cmd = Command::cargo_bin("paygap").unwrap();
    cmd.arg("render").arg("--data").arg(&csv).arg("--out-dir").arg(&out);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("year"));
    assert!(!out.exists());
}
