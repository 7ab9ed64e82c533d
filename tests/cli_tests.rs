//! Integration tests for the tripsmith binary

use std::process::Command;

fn tripsmith() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tripsmith"));
    command.env("RUST_LOG", "off");
    command
}

/// The demo binary plans offline and prints the response as JSON
#[test]
fn test_plan_prints_output_json() {
    let output = tripsmith()
        .args(["4", "day", "trip", "to", "Lisbon"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let body: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert!(body["itinerary"].as_str().unwrap().contains("Lisbon"));
    assert_eq!(body["trip_details"]["duration_days"], 4);
}

/// Running without any request text is rejected
#[test]
fn test_missing_text_is_rejected() {
    let output = tripsmith().output().expect("Failed to execute command");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Input text cannot be empty"));
}
