// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bulk configuration import: float workaround and rollback protocol.

use crate::prelude::*;
use nco_converge::config::{config_imported, ImportSpec};
use nco_converge::ConvergeError;
use similar_asserts::assert_eq as assert_same;

const SNAPSHOT: &str = r#"{"system":{"loglevel":3},"apps":{"files":{}}}"#;

#[test]
fn old_servers_split_floats_out_of_the_bulk_payload() {
    let runner = FakeRunner::new()
        .ok("check", "")
        .ok("config:list", SNAPSHOT)
        .ok("--version", "Nextcloud 24.0.2\n")
        .ok("config:import", "")
        .ok("config:system:set", "")
        .ok("check", "");
    let desired = ImportSpec::new(json!({
        "system": {"loglevel": 2, "redis": {"timeout": 1.5}}
    }));
    let result = config_imported(&client(&runner), &desired, false).unwrap();
    assert_eq!(result.outcome, Outcome::Changed);

    let import = runner
        .calls()
        .into_iter()
        .find(|call| call.line.contains("config:import"))
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(import.stdin.as_deref().unwrap()).unwrap();
    assert_same!(body, json!({"system": {"loglevel": 2, "redis": {}}}));

    let sets = runner.lines_matching("config:system:set");
    assert_eq!(sets.len(), 1);
    assert!(sets[0].contains("--value 1.5 --type double"));
    assert!(sets[0].ends_with("-- redis timeout"));
}

#[test]
fn fixed_servers_import_floats_in_bulk() {
    let runner = FakeRunner::new()
        .ok("check", "")
        .ok("config:list", SNAPSHOT)
        .ok("--version", "Nextcloud 24.0.3\n")
        .ok("config:import", "")
        .ok("check", "");
    let desired = ImportSpec::new(json!({"system": {"redis": {"timeout": 1.5}}}));
    config_imported(&client(&runner), &desired, false).unwrap();

    let import = runner
        .calls()
        .into_iter()
        .find(|call| call.line.contains("config:import"))
        .unwrap();
    assert!(import.stdin.as_deref().unwrap().contains("1.5"));
    assert!(runner.lines_matching("config:system:set").is_empty());
}

#[test]
fn rollback_restores_the_snapshot_and_deletes_added_system_keys() {
    let runner = FakeRunner::new()
        .ok("check", "")
        .ok("config:list", SNAPSHOT)
        .ok("--version", "Nextcloud 24.0.3\n")
        .ok("config:import", "")
        .fail("check", 2, "trusted domains broken\n", "")
        .ok("config:system:delete", "");
    let desired = ImportSpec::new(json!({
        "system": {"loglevel": 2, "overwritehost": "cloud.example.org"},
        "apps": {"files": {"quota": "1G"}}
    }));
    let err = config_imported(&client(&runner), &desired, false).unwrap_err();
    let ConvergeError::ImportReverted { retained, .. } = err else {
        panic!("expected ImportReverted, got: {err:?}");
    };
    assert_eq!(retained, vec!["apps.files.quota"]);

    // Two imports ran: apply, then snapshot restore with the old values.
    let bodies: Vec<String> = runner
        .calls()
        .into_iter()
        .filter(|call| call.line.contains("config:import"))
        .map(|call| call.stdin.unwrap_or_default())
        .collect();
    assert_eq!(bodies.len(), 2);
    assert!(bodies[1].contains("\"loglevel\":3"));

    // Only the key the import added gets deleted; changed keys were
    // restored by the snapshot import.
    let deletes = runner.lines_matching("config:system:delete");
    assert_eq!(deletes.len(), 1);
    assert!(deletes[0].ends_with("-- overwritehost"));
}

#[test]
fn rollback_deletes_a_dotted_system_key_as_one_argument() {
    let runner = FakeRunner::new()
        .ok("check", "")
        .ok("config:list", SNAPSHOT)
        .ok("--version", "Nextcloud 24.0.3\n")
        .ok("config:import", "")
        .fail("check", 2, "proxy misconfigured\n", "")
        .ok("config:system:delete", "");
    let desired = ImportSpec::new(json!({
        "system": {"overwrite.cli.url": "https://cloud.example.org"}
    }));
    let err = config_imported(&client(&runner), &desired, false).unwrap_err();
    assert!(matches!(err, ConvergeError::ImportReverted { .. }));

    // The key name contains dots but is not a nested path.
    let deletes = runner.lines_matching("config:system:delete");
    assert_eq!(deletes.len(), 1);
    assert!(deletes[0].ends_with("-- overwrite.cli.url"));
}

#[test]
fn dirty_precheck_blocks_the_import_entirely() {
    let runner = FakeRunner::new().fail("check", 2, "php module missing\n", "");
    let desired = ImportSpec::new(json!({"system": {"loglevel": 2}}));
    let err = config_imported(&client(&runner), &desired, false).unwrap_err();
    assert!(matches!(err, ConvergeError::UnsafeToImport { .. }));
    assert!(mutating_lines(&runner).is_empty());
}

#[test]
fn import_dry_run_diffs_without_touching_the_server() {
    let runner = FakeRunner::new().ok("check", "").ok("config:list", SNAPSHOT);
    let desired = ImportSpec::new(json!({
        "system": {"loglevel": 2, "overwritehost": "cloud.example.org"}
    }));
    let result = config_imported(&client(&runner), &desired, true).unwrap();
    assert_eq!(result.outcome, Outcome::WouldChange);
    assert_eq!(result.changes.added, vec!["system.overwritehost"]);
    assert!(result.changes.changed.contains_key("system.loglevel"));
    assert!(mutating_lines(&runner).is_empty());
}

#[test]
fn import_file_path_goes_through_positionally() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("desired.json");
    std::fs::write(&path, r#"{"system":{}}"#).unwrap();

    let runner = FakeRunner::new().ok("config:import", "");
    client(&runner).config_import_file(&path).unwrap();
    assert!(runner.lines()[0].ends_with(&format!("-- {}", path.display())));
}
