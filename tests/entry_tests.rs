mod common;

use common::{add_march_entries, init_db_with_profile, ok, setup_test_db, taj};
use predicates::str::{contains, is_match};

#[test]
fn test_open_reports_empty_month() {
    let db_path = setup_test_db("open_empty");
    init_db_with_profile(&db_path);

    taj()
        .args(["--db", &db_path, "open", "2025-03"])
        .assert()
        .success()
        .stdout(contains("March 2025 opened"))
        .stdout(contains("0 entries"));
}

#[test]
fn test_list_is_in_journal_order_with_total() {
    let db_path = setup_test_db("list_order");
    init_db_with_profile(&db_path);

    ok(&db_path, &["add", "2025-03-12", "--train", "12127", "--dep", "09:00", "--rate", "500"]);
    ok(&db_path, &["add", "2025-03-03", "--train", "11007", "--dep", "18:30", "--rate", "625"]);
    ok(&db_path, &["add", "2025-03-03", "--train", "11301", "--rate", "125.5"]);

    taj()
        .args(["--db", &db_path, "list", "2025-03"])
        .assert()
        .success()
        .stdout(is_match(r"(?s)11301.*11007.*12127").unwrap())
        .stdout(contains("1250.50"));
}

#[test]
fn test_list_shows_rates_as_typed() {
    let db_path = setup_test_db("list_raw_rate");
    init_db_with_profile(&db_path);

    ok(&db_path, &["add", "2025-03-05", "--train", "12127", "--rate", "625/-"]);
    ok(&db_path, &["add", "2025-03-06", "--train", "12128", "--rate", "abc"]);

    taj()
        .args(["--db", &db_path, "list", "2025-03"])
        .assert()
        .success()
        .stdout(is_match(r"12127 .*625/-").unwrap())
        .stdout(is_match(r"12128 .*abc").unwrap())
        .stdout(contains("Total (2 entries)"))
        .stdout(contains("625.00"));
}

#[test]
fn test_add_uses_configured_defaults() {
    let db_path = setup_test_db("add_defaults");
    init_db_with_profile(&db_path);

    ok(&db_path, &["add", "2025-03-04", "--from", "PUNE", "--to", "LNL"]);

    taj()
        .args(["--db", &db_path, "list", "2025-03"])
        .assert()
        .success()
        .stdout(contains("PUNE → LNL"))
        .stdout(contains("100%"))
        .stdout(contains("625.00"));
}

#[test]
fn test_add_rejects_bad_input() {
    let db_path = setup_test_db("add_bad_input");
    init_db_with_profile(&db_path);

    taj()
        .args(["--db", &db_path, "add", "2025-03-04", "--dep", "25:99"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));

    taj()
        .args(["--db", &db_path, "add", "2025-03-04", "--dn", "50%"])
        .assert()
        .failure()
        .stderr(contains("Invalid day/night percentage"));

    taj()
        .args(["--db", &db_path, "add", "04-03-2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    // nothing was stored, so the month was never opened
    taj()
        .args(["--db", &db_path, "list", "2025-03"])
        .assert()
        .success()
        .stdout(contains("has not been opened"));
}

#[test]
fn test_edit_changes_only_given_fields() {
    let db_path = setup_test_db("edit_fields");
    init_db_with_profile(&db_path);
    add_march_entries(&db_path, 1, "625");

    ok(&db_path, &["add", "2025-03-01", "--edit", "1", "--kms", "192", "--arr", ""]);

    taj()
        .args(["--db", &db_path, "list", "2025-03"])
        .assert()
        .success()
        .stdout(contains("11001"))
        .stdout(contains("192"))
        .stdout(contains("--:--"));

    taj()
        .args(["--db", &db_path, "add", "2025-03-01", "--edit", "99", "--kms", "1"])
        .assert()
        .failure()
        .stderr(contains("Entry not found: 99"));
}

#[test]
fn test_del_and_dup() {
    let db_path = setup_test_db("del_dup");
    init_db_with_profile(&db_path);
    add_march_entries(&db_path, 2, "300");

    taj()
        .args(["--db", &db_path, "dup", "2025-03"])
        .assert()
        .success()
        .stdout(contains("Entry #3 added as a copy (02-03-2025"));

    ok(&db_path, &["del", "1"]);

    taj()
        .args(["--db", &db_path, "del", "1"])
        .assert()
        .failure()
        .stderr(contains("Entry not found: 1"));

    taj()
        .args(["--db", &db_path, "list", "2025-03"])
        .assert()
        .success()
        .stdout(contains("600.00"));

    taj()
        .args(["--db", &db_path, "dup", "2025-04"])
        .assert()
        .failure()
        .stderr(contains("No entries recorded for 2025-04"));
}
