use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn finbot(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finbot").unwrap();
    cmd.env("FINBOT_DATA_DIR", data_dir.path())
        .env_remove("FINBOT_TOKEN")
        .env_remove("TELEGRAM_TOKEN")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn chat_config_flow_then_summary() {
    let data_dir = TempDir::new().unwrap();

    finbot(&data_dir)
        .args(["chat", "--user", "42"])
        .write_stdin("/config\n1000\nfood 200\nrent 500\ndone\nexpense 50 food\nexpense 9.99 taxi\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("💵 Please enter your monthly income:"))
        .stdout(predicate::str::contains("Added budget: food - $200.00."))
        .stdout(predicate::str::contains("✅ Budget configuration saved."))
        .stdout(predicate::str::contains("✅ Expense of $9.99 logged under taxi."));

    finbot(&data_dir)
        .args(["summary", "--user", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Income: $1000.00"))
        .stdout(predicate::str::contains("Total Expenses: $59.99"))
        .stdout(predicate::str::contains("food: $50.00/$200.00"))
        .stdout(predicate::str::contains("rent: $0.00/$500.00 [░░░░░░░░░░]"))
        .stdout(predicate::str::contains("taxi: $9.99"));

    let stored = std::fs::read_to_string(data_dir.path().join("ledgers/user_42.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(value["income"], 1000);
    assert_eq!(value["budgets"]["food"], 200);
    assert_eq!(value["expenses"][1]["amount"], 9.99);
}

#[test]
fn send_shorthand_accumulates() {
    let data_dir = TempDir::new().unwrap();

    finbot(&data_dir)
        .args(["send", "--user", "7", "income", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✅ Income of $500.00 logged under unspecified.",
        ));

    finbot(&data_dir)
        .args(["send", "--user", "7", "income 250"])
        .assert()
        .success();

    finbot(&data_dir)
        .args(["summary", "--user", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Income: $750.00"))
        .stdout(predicate::str::contains("No budgets set."));
}

#[test]
fn send_rejects_malformed_entry() {
    let data_dir = TempDir::new().unwrap();

    finbot(&data_dir)
        .args(["send", "--user", "7", "expense", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("❌ Please use the format"));

    assert!(!data_dir.path().join("ledgers/user_7.json").exists());
}

#[test]
fn reset_in_chat() {
    let data_dir = TempDir::new().unwrap();

    finbot(&data_dir)
        .args(["chat", "--user", "3"])
        .write_stdin("income 100\n/reset\nYES\n/summary\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ All your data has been reset."))
        .stdout(predicate::str::contains("Total Income: $0.00"));
}

#[test]
fn users_lists_stored_ledgers() {
    let data_dir = TempDir::new().unwrap();

    finbot(&data_dir)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("No ledgers stored."));

    for user in ["12", "5"] {
        finbot(&data_dir)
            .args(["send", "--user", user, "expense 3 coffee"])
            .assert()
            .success();
    }

    let output = finbot(&data_dir).arg("users").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let five = stdout.find("     5").unwrap();
    let twelve = stdout.find("    12").unwrap();
    assert!(five < twelve);
}

#[test]
fn export_csv_to_stdout() {
    let data_dir = TempDir::new().unwrap();

    finbot(&data_dir)
        .args(["chat", "--user", "1"])
        .write_stdin("/config\n800\nfood 100\ndone\nexpense 12.5 food\nexpense 4 snacks\n")
        .assert()
        .success();

    finbot(&data_dir)
        .args(["export", "--user", "1", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("category,amount,budget\n"))
        .stdout(predicate::str::contains("food,12.50,100.00\n"))
        .stdout(predicate::str::contains("snacks,4.00,\n"));
}

#[test]
fn export_json_to_file() {
    let data_dir = TempDir::new().unwrap();
    let output = data_dir.path().join("export.json");

    finbot(&data_dir)
        .args(["send", "--user", "1", "income 10"])
        .assert()
        .success();

    finbot(&data_dir)
        .args(["export", "--user", "1", "--format", "json", "--pretty", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledger exported to:"));

    let text = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["user"], 1);
    assert_eq!(value["ledger"]["income"], 10);
}

#[test]
fn history_shows_audit_entries() {
    let data_dir = TempDir::new().unwrap();

    finbot(&data_dir)
        .args(["send", "--user", "9", "expense 5 food"])
        .assert()
        .success();

    finbot(&data_dir)
        .args(["history", "--user", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"));
}

#[test]
fn delete_removes_ledger() {
    let data_dir = TempDir::new().unwrap();

    finbot(&data_dir)
        .args(["send", "--user", "4", "income 1"])
        .assert()
        .success();

    finbot(&data_dir)
        .args(["delete", "--user", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted ledger for user 4."));

    assert!(!data_dir.path().join("ledgers/user_4.json").exists());
}

#[test]
fn config_redacts_token() {
    let data_dir = TempDir::new().unwrap();

    finbot(&data_dir)
        .arg("config")
        .env("FINBOT_TOKEN", "123456:secret-abcd")
        .assert()
        .success()
        .stdout(predicate::str::contains("****abcd"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn init_writes_settings() {
    let data_dir = TempDir::new().unwrap();

    finbot(&data_dir).arg("init").assert().success();

    let text = std::fs::read_to_string(data_dir.path().join("config.json")).unwrap();
    assert!(text.contains("\"default_category\": \"unspecified\""));
}
