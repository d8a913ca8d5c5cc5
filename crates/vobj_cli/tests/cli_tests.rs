use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

#[allow(deprecated)]
fn vobj() -> Command {
    Command::cargo_bin("vobj").expect("Failed to find vobj binary")
}

// ============================================================================
// info command tests
// ============================================================================

#[test]
fn test_info_long_form() {
    vobj()
        .arg("info")
        .arg(fixture_path("person.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema loaded: Person (3 fields)"))
        .stdout(predicate::str::contains("Someone we know"))
        .stdout(predicate::str::contains(
            "Person[name: String,\n       age: Nat,\n       married: Bool (def. false)]",
        ));
}

#[test]
fn test_info_short_form() {
    vobj()
        .arg("info")
        .arg(fixture_path("person.yml"))
        .arg("--short")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Person[name: String, age: Nat, married: Bool (false)]",
        ));
}

#[test]
fn test_info_toml_schema_with_constraints() {
    vobj()
        .arg("info")
        .arg(fixture_path("employee.toml"))
        .arg("--short")
        .assert()
        .success()
        .stdout(predicate::str::contains("Employee (5 fields)"))
        .stdout(predicate::str::contains("age: InRange[18..70, Int]"))
        .stdout(predicate::str::contains("(engineer)"))
        .stdout(predicate::str::contains("notes: String or null"));
}

#[test]
fn test_info_invalid_default() {
    vobj()
        .arg("info")
        .arg(fixture_path("invalid_schema.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid schema: Broken"));
}

#[test]
fn test_info_unknown_type() {
    vobj()
        .arg("info")
        .arg(fixture_path("unknown_type.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decimal"));
}

#[test]
fn test_info_missing_file() {
    vobj()
        .arg("info")
        .arg("nonexistent.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse schema file"));
}

#[test]
fn test_info_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let schema = temp_dir.path().join("person.txt");
    fs::write(&schema, "name: Person\nfields: []\n").unwrap();

    vobj()
        .arg("info")
        .arg(schema.to_str().unwrap())
        .assert()
        .failure();
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_valid_records() {
    vobj()
        .arg("check")
        .arg(fixture_path("person.yml"))
        .arg(fixture_path("valid_people.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("CHECK REPORT: Person"))
        .stdout(predicate::str::contains("All records valid"))
        .stdout(predicate::str::contains("Records checked: 2"));
}

#[test]
fn test_check_invalid_records() {
    vobj()
        .arg("check")
        .arg(fixture_path("person.yml"))
        .arg(fixture_path("invalid_people.json"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid records found"))
        .stdout(predicate::str::contains("record 1"))
        .stdout(predicate::str::contains("Value for field 'age' fails its contract"))
        .stdout(predicate::str::contains("Missing required field: age"))
        .stdout(predicate::str::contains("Invalid field(s): nickname"))
        .stdout(predicate::str::contains("Invalid:         3"));
}

#[test]
fn test_check_strict_stops_at_first_failure() {
    vobj()
        .arg("check")
        .arg(fixture_path("person.yml"))
        .arg(fixture_path("invalid_people.json"))
        .arg("--strict")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Records checked: 2"))
        .stdout(predicate::str::contains("Missing required field").not());
}

#[test]
fn test_check_yaml_records_against_toml_schema() {
    vobj()
        .arg("check")
        .arg(fixture_path("employee.toml"))
        .arg(fixture_path("employees.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All records valid"));
}

#[test]
fn test_check_json_output() {
    let output = vobj()
        .arg("check")
        .arg(fixture_path("person.yml"))
        .arg(fixture_path("invalid_people.json"))
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["record_type"], "Person");
    assert_eq!(report["passed"], false);
    assert_eq!(report["summary"]["checked"], 4);
    assert_eq!(report["summary"]["valid"], 1);
    assert_eq!(report["failures"][0]["record"], 1);
    assert_eq!(report["failures"][1]["error"], "Missing required field: age");
}

#[test]
fn test_check_single_object_document() {
    let temp_dir = TempDir::new().unwrap();
    let records = temp_dir.path().join("one.json");
    fs::write(&records, r#"{ "name": "Solo", "age": 7, "married": false }"#).unwrap();

    vobj()
        .arg("check")
        .arg(fixture_path("person.yml"))
        .arg(records.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Records checked: 1"));
}

#[test]
fn test_check_non_object_entry() {
    let temp_dir = TempDir::new().unwrap();
    let records = temp_dir.path().join("bad.json");
    fs::write(&records, "[1, 2]").unwrap();

    vobj()
        .arg("check")
        .arg(fixture_path("person.yml"))
        .arg(records.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse records file"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    vobj()
        .arg("--verbose")
        .arg("check")
        .arg(fixture_path("person.yml"))
        .arg(fixture_path("valid_people.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}
