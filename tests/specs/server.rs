// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Install and update convergence through the full stack.

use crate::prelude::*;
use nco_converge::server::{installed, uptodate, UptodateSpec};
use nco_occ::ops::server::{DatabaseConfig, DbKind, InstallSpec};

#[test]
fn fresh_install_renders_secrets_as_env_indirection() {
    let runner = FakeRunner::new()
        .fail("status", 1, "", "")
        .ok("maintenance:install", "Nextcloud was successfully installed\n");
    let mut database = DatabaseConfig::new(DbKind::Pgsql);
    database.pass = Some(SecretSource::lookup("nc:db"));
    let desired = InstallSpec::new(database, SecretSource::lookup("nc:admin"));
    let secrets = StaticSecrets::new().with("nc:db", "dbpw").with("nc:admin", "adminpw");

    let result = installed(&client(&runner), &desired, &secrets, false).unwrap();
    assert_eq!(result.outcome, Outcome::Changed);

    let install = runner
        .calls()
        .into_iter()
        .find(|call| call.line.contains("maintenance:install"))
        .unwrap();
    assert!(install.line.contains("--database pgsql"));
    assert!(install.line.contains(r#"--database-pass "$NC_DB_PASS""#));
    assert!(install.line.contains(r#"--admin-pass "$NC_ADMIN_PASS""#));
    assert!(!install.line.contains("dbpw"));
    assert!(!install.line.contains("adminpw"));
    assert_eq!(install.env.get("NC_DB_PASS").map(String::as_str), Some("dbpw"));
    assert_eq!(install.env.get("NC_ADMIN_PASS").map(String::as_str), Some("adminpw"));
}

#[test]
fn installed_state_converges_to_match() {
    let runner = FakeRunner::new()
        .ok("status", r#"{"installed":true,"version":"24.0.1.1","versionstring":"24.0.1"}"#);
    let desired =
        InstallSpec::new(DatabaseConfig::sqlite(), SecretSource::literal("pw"));
    let result = installed(&client(&runner), &desired, &StaticSecrets::new(), false).unwrap();
    assert_eq!(result.outcome, Outcome::Matches);
    assert!(mutating_lines(&runner).is_empty());
}

#[test]
fn pending_update_above_the_bound_still_matches() {
    let runner = FakeRunner::new()
        .ok("update:check", "Nextcloud 25.0.1 is available.\n1 update available\n");
    let desired = UptodateSpec { max_version: Some("24.0".to_string()), no_backup: false };
    let result = uptodate(&client(&runner), &desired, false).unwrap();
    assert_eq!(result.outcome, Outcome::Matches);
    assert!(mutating_lines(&runner).is_empty());
}

#[test]
fn update_within_the_bound_runs_the_updater() {
    let runner = FakeRunner::new()
        .ok("update:check", "Nextcloud 24.0.2 is available.\n1 update available\n")
        .ok("--version", "Nextcloud 24.0.1\n")
        .ok("updater.phar", "Update successful\n");
    let desired = UptodateSpec { max_version: Some("24".to_string()), no_backup: true };
    let result = uptodate(&client(&runner), &desired, false).unwrap();
    assert_eq!(result.outcome, Outcome::Changed);

    let mutations = mutating_lines(&runner);
    assert_eq!(mutations.len(), 1);
    assert_eq!(
        mutations[0],
        "php --define apc.enable_cli=1 ./updater/updater.phar --no-interaction --no-backup"
    );
}

#[test]
fn update_report_mismatch_fails_loudly_instead_of_underreporting() {
    let runner = FakeRunner::new()
        .ok("update:check", "Nextcloud 24.0.2 is available.\n3 updates available\n");
    let err = uptodate(&client(&runner), &UptodateSpec::default(), false).unwrap_err();
    assert!(matches!(
        err,
        nco_converge::ConvergeError::Occ(nco_core::OccError::Interpretation { .. })
    ));
}
