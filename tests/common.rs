#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn taj() -> Command {
    cargo_bin_cmd!("tajournal")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tajournal.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run a command against `db_path` and require success.
pub fn ok(db_path: &str, args: &[&str]) {
    taj().arg("--db").arg(db_path).args(args).assert().success();
}

pub fn init_db(db_path: &str) {
    ok(db_path, &["--test", "init"]);
}

/// Initialized DB with one active profile and no entries.
pub fn init_db_with_profile(db_path: &str) {
    init_db(db_path);
    ok(
        db_path,
        &[
            "profile",
            "add",
            "--name",
            "Milind Kulkarni",
            "--designation",
            "Sr. TIA",
            "--pay-level",
            "7",
            "--basic-pay",
            "44900",
            "--pf-number",
            "PF-1234",
            "--headquarters",
            "PUNE",
            "--branch",
            "TFC/OPTG",
            "--division",
            "PUNE",
        ],
    );
}

/// Add `n` entries on consecutive days of March 2025, each claiming `rate`.
pub fn add_march_entries(db_path: &str, n: u32, rate: &str) {
    for day in 1..=n {
        let date = format!("2025-03-{:02}", day);
        let train = format!("{}", 11000 + day);
        ok(
            db_path,
            &[
                "add", &date, "--train", &train, "--dep", "06:40", "--arr", "10:15", "--from",
                "PUNE", "--to", "DD", "--kms", "76", "--rate", rate,
            ],
        );
    }
}
