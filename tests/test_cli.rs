use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("purchase-ledger-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

fn ledger(file: &PathBuf) -> Command {
    let mut command = Command::cargo_bin("purchase-ledger").unwrap();
    command.env_remove("PURCHASE_LEDGER_FILE").arg("--file").arg(file);
    command
}

fn stdout(command: &mut Command) -> String {
    let assert = command.assert().success();
    String::from_utf8(assert.get_output().to_owned().stdout).unwrap()
}

#[test]
fn empty_dashboard() {
    let file = scratch_path("empty.csv");
    let output = stdout(&mut ledger(&file));

    assert!(output.contains("Total Spending: 0"));
    assert!(output.contains("The log is currently empty."));
    assert!(!file.exists());
}

#[test]
fn add_normalizes_and_persists() {
    let file = scratch_path("add.csv");
    let output = stdout(ledger(&file).args(&[
        "add", "--vendor", " Acme Inc ", "--item", "office chair", "--qty", "2", "--price", "150.0",
    ]));

    assert!(output.starts_with("Added: Office Chair\n"));
    assert!(output.contains("Total Spending: 300"));
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "Vendor,Item,Qty,Price,Amount\nAcme Inc,Office Chair,2,150.0,300.0\n",
    );
}

/// A purchase without a vendor is rejected and the file is never created
#[test]
fn add_without_vendor_fails() {
    let file = scratch_path("invalid.csv");
    let assert = ledger(&file)
        .args(&["add", "--vendor", "   ", "--item", "desk", "--price", "10"])
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().to_owned().stderr).unwrap();

    assert!(stderr.contains("Please fill in Vendor and Item"));
    assert!(!file.exists());
}

#[test]
fn delete_shifts_rows() {
    let file = scratch_path("delete.csv");
    for (vendor, item, price) in [("A", "first", "100"), ("B", "second", "50"), ("A", "third", "25")] {
        ledger(&file)
            .args(&["add", "--vendor", vendor, "--item", item, "--price", price])
            .assert()
            .success();
    }

    let output = stdout(ledger(&file).args(&["delete", "1"]));
    assert!(output.starts_with("Deleted: Row 1: Second from B\n"));

    let rows = stdout(ledger(&file).arg("rows"));
    assert_eq!(rows, "Row 0: First from A\nRow 1: Third from A\n");

    ledger(&file).args(&["delete", "2"]).assert().failure();
}

#[test]
fn export_writes_same_format() {
    let file = scratch_path("export.csv");
    let export = scratch_path("purchases_export.csv");
    ledger(&file)
        .args(&["add", "--vendor", "Paper Co", "--item", "printer paper", "--qty", "10", "--price", "4.25"])
        .assert()
        .success();

    ledger(&file).arg("export").arg("--output").arg(&export).assert().success();
    assert_eq!(fs::read_to_string(&export).unwrap(), fs::read_to_string(&file).unwrap());

    let output = stdout(ledger(&file).args(&["export", "--output", "-"]));
    assert_eq!(output, "Vendor,Item,Qty,Price,Amount\nPaper Co,Printer Paper,10,4.25,42.50\n");
}

#[test]
fn cent_prices_total_exactly() {
    let file = scratch_path("cents.csv");
    for price in ["19.99", "0.1", "9.95", "1234.56"] {
        ledger(&file)
            .args(&["add", "--vendor", "A", "--item", "x", "--qty", "3", "--price", price])
            .assert()
            .success();
    }

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "Vendor,Item,Qty,Price,Amount\n\
         A,X,3,19.99,59.97\n\
         A,X,3,0.1,0.3\n\
         A,X,3,9.95,29.85\n\
         A,X,3,1234.56,3703.68\n",
    );
    let output = stdout(&mut ledger(&file));
    assert!(output.contains("Total Spending: 3,794\n"));
}

#[test]
fn malformed_file_is_fatal() {
    let file = scratch_path("malformed.csv");
    fs::write(&file, "Vendor,Item\nAcme,Desk\n").unwrap();

    let assert = ledger(&file).assert().failure();
    let stderr = String::from_utf8(assert.get_output().to_owned().stderr).unwrap();

    assert!(stderr.contains("missing the `Qty` column"));
}
