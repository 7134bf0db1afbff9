mod common;

use common::{add_march_entries, init_db_with_profile, ok, setup_test_db, taj, temp_out};
use predicates::str::contains;
use serde_json::Value;
use std::fs;

fn json_plan(db_path: &str) -> Value {
    let out = taj()
        .args(["--db", db_path, "print", "2025-03", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&out).expect("valid JSON plan")
}

fn filled(page: &Value) -> usize {
    page["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .filter(|r| r["kind"] == "filled")
        .count()
}

#[test]
fn test_print_without_profile_fails() {
    let db_path = setup_test_db("print_no_profile");
    ok(&db_path, &["--test", "init"]);

    taj()
        .args(["--db", &db_path, "print", "2025-03", "--format", "text"])
        .assert()
        .failure()
        .stderr(contains("Precondition failed"));
}

#[test]
fn test_print_unopened_month_fails() {
    let db_path = setup_test_db("print_unopened");
    init_db_with_profile(&db_path);

    taj()
        .args(["--db", &db_path, "print", "2025-03", "--format", "json"])
        .assert()
        .failure()
        .stderr(contains("Precondition failed"));
}

#[test]
fn test_empty_month_prints_one_blank_page() {
    let db_path = setup_test_db("print_empty");
    init_db_with_profile(&db_path);
    ok(&db_path, &["open", "2025-03"]);

    taj()
        .args(["--db", &db_path, "print", "2025-03", "--format", "text"])
        .assert()
        .success()
        .stdout(contains("=== Page 1 of 1 ==="))
        .stdout(contains("0.00"))
        .stdout(contains("Milind Kulkarni"));

    let plan = json_plan(&db_path);
    let pages = plan["pages"].as_array().expect("pages");
    assert_eq!(pages.len(), 1);
    assert_eq!(filled(&pages[0]), 0);
    assert_eq!(pages[0]["grandTotal"], "0.00");
}

#[test]
fn test_fourteen_entries_spill_onto_second_page() {
    let db_path = setup_test_db("print_fourteen");
    init_db_with_profile(&db_path);
    add_march_entries(&db_path, 14, "100");

    let plan = json_plan(&db_path);
    let pages = plan["pages"].as_array().expect("pages");
    assert_eq!(pages.len(), 2);
    assert_eq!(filled(&pages[0]), 13);
    assert_eq!(filled(&pages[1]), 1);
    assert_eq!(pages[0]["showTotalsRow"], false);
    assert_eq!(pages[0]["grandTotal"], Value::Null);
    assert_eq!(pages[1]["showCertificationFooter"], true);
    assert_eq!(pages[1]["grandTotal"], "1400.00");
    assert_eq!(pages[1]["rows"][0]["entry"]["trainNo"], "11014");
}

#[test]
fn test_exactly_thirteen_entries_fit_one_page() {
    let db_path = setup_test_db("print_thirteen");
    init_db_with_profile(&db_path);
    add_march_entries(&db_path, 13, "50");

    let plan = json_plan(&db_path);
    let pages = plan["pages"].as_array().expect("pages");
    assert_eq!(pages.len(), 1);
    assert_eq!(filled(&pages[0]), 13);
    assert_eq!(pages[0]["grandTotal"], "650.00");
}

#[test]
fn test_pdf_is_written_to_file() {
    let db_path = setup_test_db("print_pdf");
    let out = temp_out("print_pdf", "pdf");
    init_db_with_profile(&db_path);
    add_march_entries(&db_path, 14, "625");

    taj()
        .args(["--db", &db_path, "print", "2025-03", "--file", &out])
        .assert()
        .success()
        .stdout(contains("2 page(s) written"));

    let bytes = fs::read(&out).expect("pdf written");
    assert!(bytes.starts_with(b"%PDF"));
    let text = String::from_utf8_lossy(&bytes);
    let pages = text.matches("/Type /Page").count() - text.matches("/Type /Pages").count();
    assert_eq!(pages, 2);
}

#[test]
fn test_pdf_needs_an_absolute_file() {
    let db_path = setup_test_db("print_pdf_file");
    init_db_with_profile(&db_path);
    ok(&db_path, &["open", "2025-03"]);

    taj()
        .args(["--db", &db_path, "print", "2025-03"])
        .assert()
        .failure()
        .stderr(contains("--file"));

    taj()
        .args(["--db", &db_path, "print", "2025-03", "--file", "journal.pdf"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_existing_file_needs_force() {
    let db_path = setup_test_db("print_force");
    let out = temp_out("print_force", "json");
    init_db_with_profile(&db_path);
    ok(&db_path, &["open", "2025-03"]);
    fs::write(&out, "keep me").expect("seed file");

    taj()
        .args(["--db", &db_path, "print", "2025-03", "--format", "json", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    ok(
        &db_path,
        &["print", "2025-03", "--format", "json", "--file", &out, "--force"],
    );
    let v: Value = serde_json::from_str(&fs::read_to_string(&out).expect("read")).expect("json");
    assert_eq!(v["pages"].as_array().expect("pages").len(), 1);
}
