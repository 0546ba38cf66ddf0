use assert_cmd::Command;
use predicates::prelude::*;

fn rasid() -> Command {
    Command::cargo_bin("rasid").unwrap()
}

#[test]
fn text_receipt_becomes_expense_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cafe.txt");
    std::fs::write(&path, "ABC CAFE\nGSTIN: 123\n15/08/2024\nItem 100\nGrand Total: Rs. 450.00\n").unwrap();

    rasid()
        .arg(&path)
        .env("RUST_LOG", "off")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"vendor\": \"ABC CAFE\""))
        .stdout(predicate::str::contains("\"amount\": \"450.00\""))
        .stdout(predicate::str::contains("\"category\": \"Food\""))
        .stdout(predicate::str::contains("\"date\": \"2024-08-15\""))
        .stdout(predicate::str::contains("\"description\": \"Receipt: ABC CAFE\""));
}

#[test]
fn parsed_flag_prints_amount_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.txt");
    std::fs::write(&path, "SHOP\nNet Payable\nRs 320.50\n").unwrap();

    rasid()
        .arg("--parsed")
        .arg(&path)
        .env("RUST_LOG", "off")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount_source\": \"total-next-line\""));
}

#[test]
fn unreadable_file_still_succeeds_with_defaults() {
    rasid()
        .args(["--parsed", "/nonexistent/receipt.pdf"])
        .env("RUST_LOG", "off")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount_source\": \"error\""))
        .stdout(predicate::str::contains("\"reason\": \"acquisition_failed\""));
}

#[test]
fn override_fills_missing_amount() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.dat");
    std::fs::write(&path, "Corner Kirana\nThanks\n").unwrap();

    rasid()
        .args(["--text", "--amount", "75"])
        .arg(&path)
        .env("RUST_LOG", "off")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": \"75.00\""))
        .stdout(predicate::str::contains("\"category\": \"Grocery\""));
}

#[test]
fn bad_override_fails() {
    rasid()
        .args(["--amount", "lots", "x.txt"])
        .env("RUST_LOG", "off")
        .assert()
        .failure();
}
