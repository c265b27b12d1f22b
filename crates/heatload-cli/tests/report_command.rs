//! End-to-end tests for the report command

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const SNAPSHOT: &str = r#"{
    "entities": [
        {"id": "r1", "kind": "room", "name": "Office 1", "floor_area": 24.36},
        {"id": "s1", "kind": "local_shade"},
        {"id": "r2", "kind": "room", "name": "Atrium", "floor_area": 52.3}
    ]
}"#;

const RESULTS: &str = r#"{
    "rooms": {
        "r1": {
            "z": {
                "Heating set point": [19.0, 21.0],
                "Heating plant sensible load": [80.0, 123.456]
            }
        },
        "r2": {
            "z": {
                "Heating set point": [21.0],
                "Heating plant sensible load": [1834.2]
            }
        }
    }
}"#;

fn heatload_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_heatload"))
}

fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    let model = dir.join("model.json");
    let results = dir.join("winter.json");
    std::fs::write(&model, SNAPSHOT).unwrap();
    std::fs::write(&results, RESULTS).unwrap();
    (model, results)
}

#[test]
fn writes_a_workbook_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (model, results) = write_fixtures(dir.path());
    let output = dir.path().join("Heating Loads.xlsx");

    let status = Command::new(heatload_binary())
        .arg(&model)
        .arg("--results")
        .arg(&results)
        .arg("--output")
        .arg(&output)
        .arg("--no-open")
        .status()
        .expect("failed to execute heatload");

    assert!(status.success());
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn missing_snapshot_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("Heating Loads.xlsx");

    let status = Command::new(heatload_binary())
        .arg(dir.path().join("missing.json"))
        .arg("--output")
        .arg(&output)
        .arg("--no-open")
        .status()
        .expect("failed to execute heatload");

    assert!(!status.success());
    assert!(!output.exists());
}

#[test]
fn missing_series_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let (model, _) = write_fixtures(dir.path());
    let results = dir.path().join("partial.json");
    std::fs::write(
        &results,
        r#"{"rooms": {"r1": {"z": {"Heating set point": [21.0]}}}}"#,
    )
    .unwrap();
    let output = dir.path().join("Heating Loads.xlsx");

    let status = Command::new(heatload_binary())
        .arg(&model)
        .arg("--results")
        .arg(&results)
        .arg("--output")
        .arg(&output)
        .arg("--no-open")
        .status()
        .expect("failed to execute heatload");

    assert!(!status.success());
    assert!(!output.exists());
}

#[test]
fn picker_cancellation_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let (model, _results) = write_fixtures(dir.path());
    let output = dir.path().join("Heating Loads.xlsx");

    // No --results and stdin closed: the picker reads a cancellation
    let status = Command::new(heatload_binary())
        .arg(&model)
        .arg("--output")
        .arg(&output)
        .arg("--no-open")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("failed to execute heatload");

    assert!(!status.success());
    assert!(!output.exists());
}
