//! CLI tests for the schema-bridge binary.

mod helpers;

use helpers::{assert_cli_success, execute_schema_bridge, write_catalog};
use serde_json::json;

const CATALOG: &str = r#"
version: 1
tables:
  - name: User
    columns:
      - name: id
        type: big_integer
        nullable: false
      - name: name
        type:
          type: string
          length: 64
        nullable: false
      - name: born
        type: date
      - name: wakes
        type: time
      - name: avatar
        type: large_binary
  - name: Place
    columns:
      - name: id
        type: integer
      - name: area
        type:
          type: other
          kind: Geometry
"#;

#[test]
fn test_synthesize_proto() {
    let catalog = write_catalog(CATALOG);
    let output = execute_schema_bridge(
        catalog.path(),
        &["synthesize", "--table", "User", "--exclude", "avatar", "--collection"],
        None,
    );
    assert_cli_success(&output, "synthesize");

    let proto = String::from_utf8_lossy(&output.stdout);
    assert!(proto.starts_with("syntax = \"proto2\";"));
    assert!(proto.contains("message DateMessage {"));
    assert!(proto.contains("message TimeMessage {"));
    assert!(proto.contains("  required int64 id = 1;"));
    assert!(proto.contains("  required string name = 2;"));
    assert!(proto.contains("  optional DateMessage born = 3;"));
    assert!(proto.contains("  optional TimeMessage wakes = 4;"));
    assert!(!proto.contains("avatar"));
    assert!(proto.contains("  repeated UserMessage items = 1;"));
    assert!(proto.contains("  optional string nextPageToken = 2;"));
}

#[test]
fn test_compose_tables() {
    let catalog = write_catalog(CATALOG);
    let output = execute_schema_bridge(
        catalog.path(),
        &[
            "compose",
            "--table",
            "User",
            "--table",
            "Place",
            "--converter",
            "Geometry=bytes",
        ],
        None,
    );
    assert_cli_success(&output, "compose");

    let proto = String::from_utf8_lossy(&output.stdout);
    assert!(proto.contains("message ComposedUserMessagePlaceMessage {"));
    assert!(proto.contains("  optional bytes avatar = 5;"));
    assert!(proto.contains("  optional bytes area = 6;"));
}

#[test]
fn test_to_message_and_back() {
    let catalog = write_catalog(CATALOG);
    let record = json!({
        "id": 7,
        "name": "Ada",
        "born": "1815-12-10",
        "wakes": "06:30:00+02:00",
        "avatar": "AQI="
    });

    let output = execute_schema_bridge(
        catalog.path(),
        &["to-message", "--table", "User"],
        Some(&record.to_string()),
    );
    assert_cli_success(&output, "to-message");
    let message: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        message,
        json!({
            "id": 7,
            "name": "Ada",
            "born": {"year": 1815, "month": 12, "day": 10},
            "wakes": {
                "hour": 6,
                "minute": 30,
                "second": 0,
                "microsecond": 0,
                "time_zone_offset": 120
            },
            "avatar": "AQI="
        })
    );

    let output = execute_schema_bridge(
        catalog.path(),
        &["to-entity", "--table", "User"],
        Some(&message.to_string()),
    );
    assert_cli_success(&output, "to-entity");
    let back: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_only_filter() {
    let catalog = write_catalog(CATALOG);
    let output = execute_schema_bridge(
        catalog.path(),
        &["to-message", "--table", "User", "--only", "id,born"],
        Some(r#"{"id": 1, "name": "x", "born": "2000-01-01"}"#),
    );
    assert_cli_success(&output, "to-message --only");
    let message: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        message,
        json!({"id": 1, "born": {"year": 2000, "month": 1, "day": 1}})
    );
}

#[test]
fn test_errors_exit_nonzero() {
    let catalog = write_catalog(CATALOG);

    let output = execute_schema_bridge(catalog.path(), &["synthesize", "--table", "Nope"], None);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown table 'Nope'"));

    let output = execute_schema_bridge(
        catalog.path(),
        &["synthesize", "--table", "User", "--converter", "Text=decimal"],
        None,
    );
    assert!(!output.status.success());
}
