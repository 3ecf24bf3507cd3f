use std::path::{Path, PathBuf};

use assert_cmd::Command;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures/schedule")
        .join(name)
}

#[test]
fn renders_human_summary_for_fixed_date() {
    let assert = Command::cargo_bin("schedule_report")
        .unwrap()
        .arg(fixture("items.json"))
        .arg("--today")
        .arg("2024-06-10")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("Items checked: 3"), "output was:\n{stdout}");
    assert!(stdout.contains("overdue:       1"), "output was:\n{stdout}");
    assert!(stdout.contains("due_today:     1"), "output was:\n{stdout}");
    assert!(stdout.contains("upcoming:      1"), "output was:\n{stdout}");
    assert!(
        stdout.contains("#2 Morning run [habit] due 2024-06-10 (+0 d, streak 5)"),
        "output was:\n{stdout}"
    );
}

#[test]
fn emits_machine_readable_json() {
    let assert = Command::cargo_bin("schedule_report")
        .unwrap()
        .arg(fixture("items.json"))
        .arg("--today")
        .arg("2024-06-10")
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["today"], "2024-06-10");
    assert_eq!(report["total_items"], 3);
    assert_eq!(report["counts_by_dueness"]["overdue"], 1);
    assert_eq!(report["records"][0]["id"], 1);
    assert_eq!(report["records"][0]["dueness"], "overdue");
}

#[test]
fn rejects_items_that_violate_model_invariants() {
    let assert = Command::cargo_bin("schedule_report")
        .unwrap()
        .arg(fixture("bad_items.json"))
        .arg("--today")
        .arg("2024-06-10")
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(
        stderr.contains("invalid recurring item 9"),
        "stderr was:\n{stderr}"
    );
}
