// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User and group convergence through the full stack.

use crate::prelude::*;
use nco_converge::account::{group_absent, group_present, user_absent, user_present};
use nco_occ::UserAdd;

#[test]
fn existing_user_is_left_alone() {
    let runner = FakeRunner::new().ok("user:info", r#"{"user_id":"carol","enabled":true}"#);
    let desired = UserAdd::new("carol", SecretSource::literal("pw"));
    let result = user_present(&client(&runner), &desired, &StaticSecrets::new(), false).unwrap();
    assert_eq!(result.outcome, Outcome::Matches);
    assert!(mutating_lines(&runner).is_empty());
}

#[test]
fn user_creation_carries_groups_and_secret_env() {
    let runner = FakeRunner::new()
        .fail("user:info", 1, "user not found\n", "")
        .ok("user:add", "");
    let mut desired = UserAdd::new("carol", SecretSource::lookup("users:carol"));
    desired.groups = vec!["staff".to_string()];
    let secrets = StaticSecrets::new().with("users:carol", "s3cret");
    let result = user_present(&client(&runner), &desired, &secrets, false).unwrap();
    assert_eq!(result.outcome, Outcome::Changed);

    let mutations = mutating_lines(&runner);
    assert_eq!(mutations.len(), 1);
    assert!(mutations[0].contains("user:add --password-from-env"));
    assert!(mutations[0].contains("--group staff"));
    assert!(!mutations[0].contains("s3cret"));
    let add = runner
        .calls()
        .into_iter()
        .find(|call| call.line.contains("user:add"))
        .unwrap();
    assert_eq!(add.env.get("OC_PASS").map(String::as_str), Some("s3cret"));
}

#[test]
fn user_removal_is_idempotent() {
    let runner = FakeRunner::new()
        .ok("user:info", r#"{"user_id":"carol","enabled":true}"#)
        .ok("user:delete", "")
        .fail("user:info", 1, "user not found\n", "");
    let first = user_absent(&client(&runner), "carol", false).unwrap();
    let second = user_absent(&client(&runner), "carol", false).unwrap();
    assert_eq!(first.outcome, Outcome::Changed);
    assert_eq!(second.outcome, Outcome::Matches);
    assert_eq!(runner.lines_matching("user:delete").len(), 1);
}

#[test]
fn group_creation_follows_the_sentinel_probe() {
    let runner = FakeRunner::new()
        .fail("group:removeuser", 1, "group not found\n", "")
        .ok("group:add", "");
    let result = group_present(&client(&runner), "staff", None, false).unwrap();
    assert_eq!(result.outcome, Outcome::Changed);
    let mutations = mutating_lines(&runner);
    assert_eq!(mutations.len(), 1);
    assert!(mutations[0].contains("group:add"));
}

#[test]
fn group_dry_run_probes_but_never_mutates() {
    let runner = FakeRunner::new().fail("group:removeuser", 1, "group not found\n", "");
    let result = group_absent(&client(&runner), "ghost", true).unwrap();
    assert_eq!(result.outcome, Outcome::Matches);
    assert!(mutating_lines(&runner).is_empty());
}
