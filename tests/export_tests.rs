use predicates::str::contains;
use std::fs;

mod common;
use common::Sandbox;

/// Monday +30m, Tuesday missing (credited), Saturday pure overtime.
fn sandbox_with_week() -> Sandbox {
    let sb = Sandbox::new();
    sb.init();
    sb.amend("2025-03-03", "09:00", "18:00", true);
    sb.amend("2025-03-08", "10:00", "14:00", true);
    sb
}

#[test]
fn test_export_csv_range() {
    let sb = sandbox_with_week();
    let out = sb.file("march.csv");

    sb.cmd("2025-03-10 08:00")
        .args(["export", "--format", "csv", "--file", &out, "--range", "2025-03-03:2025-03-09"])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some(
            "date,weekday,status,stamps,first_arrival,last_departure,total_hours,expected_hours,balance_hours,source,estimate"
        )
    );
    assert!(content.contains("2025-03-03,Mo,Home,09:00-18:00,09:00,18:00,8.5,8.0,0.5,recorded,false"));
    assert!(content.contains("2025-03-04,Tu,,,,,8.0,8.0,0.0,synthesized,false"));
    assert!(content.contains("2025-03-08,Sa,Home,10:00-14:00,10:00,14:00,4.0,0.0,4.0,recorded,false"));
    // Sunday has nothing expected and nothing recorded
    assert!(!content.contains("2025-03-09"));
    assert_eq!(content.lines().count(), 1 + 6);
}

#[test]
fn test_export_json() {
    let sb = sandbox_with_week();
    let out = sb.file("march.json");

    sb.cmd("2025-03-10 08:00")
        .args(["export", "--format", "json", "--file", &out, "--range", "2025-03"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array of days");

    let monday = rows
        .iter()
        .find(|r| r["date"] == "2025-03-03")
        .expect("monday exported");
    assert_eq!(monday["balance_hours"], 0.5);
    assert_eq!(monday["source"], "recorded");

    // 2025-03-10 is today: pending days are not exported
    assert!(rows.iter().all(|r| r["date"] != "2025-03-10"));
}

#[test]
fn test_export_xlsx() {
    let sb = sandbox_with_week();
    let out = sb.file("ledger.xlsx");

    sb.cmd("2025-03-10 08:00")
        .args(["export", "--format", "xlsx", "--file", &out, "--range", "2025"])
        .assert()
        .success();

    let meta = fs::metadata(&out).expect("xlsx written");
    assert!(meta.len() > 0);
}

#[test]
fn test_export_requires_absolute_path() {
    let sb = sandbox_with_week();

    sb.cmd("2025-03-10 08:00")
        .args(["export", "--format", "csv", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("ExportError"))
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_invalid_range() {
    let sb = sandbox_with_week();
    let out = sb.file("bad.csv");

    sb.cmd("2025-03-10 08:00")
        .args(["export", "--file", &out, "--range", "2025-03-10:2025-03-01"])
        .assert()
        .failure()
        .stderr(contains("InputError"));
    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_overwrite_with_force() {
    let sb = sandbox_with_week();
    let out = sb.file("again.csv");
    fs::write(&out, "old").unwrap();

    sb.cmd("2025-03-10 08:00")
        .args(["export", "--file", &out, "--range", "2025-03-03", "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("2025-03-03"));
    assert!(!content.starts_with("old"));
}
