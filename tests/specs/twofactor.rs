// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-factor enforcement convergence, including the off/on cycle.

use crate::prelude::*;
use nco_converge::twofactor::{twofactor_enforced, TwofactorPolicy};

#[test]
fn replacing_the_group_list_cycles_off_then_on() {
    let runner = FakeRunner::new()
        .ok(
            "twofactorauth:enforce",
            "Two-factor authentication is enforced for members of the group(s) admin, staff\n",
        )
        .ok("--off", "")
        .ok("--on", "");
    let desired = TwofactorPolicy {
        enforced: true,
        only: vec!["admin".to_string(), "ops".to_string()],
        exclude: Vec::new(),
    };
    let result = twofactor_enforced(&client(&runner), &desired, false).unwrap();
    assert_eq!(result.outcome, Outcome::Changed);

    let mutations = mutating_lines(&runner);
    assert_eq!(mutations.len(), 2);
    assert!(mutations[0].contains("--off"));
    assert!(mutations[1].contains("--on"));
    assert!(mutations[1].contains("--group admin --group ops"));

    // The report shows the real membership change, not the cycle.
    assert_eq!(result.changes.added, vec!["ops"]);
    assert_eq!(result.changes.removed, vec!["staff"]);
}

#[test]
fn group_order_does_not_defeat_idempotence() {
    let runner = FakeRunner::new().ok(
        "twofactorauth:enforce",
        "Two-factor authentication is enforced for members of the group(s) staff, admin\n",
    );
    let desired = TwofactorPolicy {
        enforced: true,
        only: vec!["admin".to_string(), "staff".to_string()],
        exclude: Vec::new(),
    };
    let result = twofactor_enforced(&client(&runner), &desired, false).unwrap();
    assert_eq!(result.outcome, Outcome::Matches);
    assert!(mutating_lines(&runner).is_empty());
}

#[test]
fn turning_enforcement_on_from_scratch_is_one_call() {
    let runner = FakeRunner::new()
        .ok("twofactorauth:enforce", "Two-factor authentication is not enforced\n")
        .ok("--on", "");
    let result =
        twofactor_enforced(&client(&runner), &TwofactorPolicy::enforced_for_all(), false).unwrap();
    assert_eq!(result.outcome, Outcome::Changed);
    assert_eq!(mutating_lines(&runner).len(), 1);
}

#[test]
fn exclusion_policy_wins_and_renders_exclude_parameters() {
    let runner = FakeRunner::new()
        .ok("twofactorauth:enforce", "Two-factor authentication is not enforced\n")
        .ok("--on", "");
    let desired = TwofactorPolicy {
        enforced: true,
        only: vec!["admin".to_string()],
        exclude: vec!["bots".to_string(), "guests".to_string()],
    };
    twofactor_enforced(&client(&runner), &desired, false).unwrap();
    let mutations = mutating_lines(&runner);
    assert!(mutations[0].contains("--exclude bots --exclude guests"));
    assert!(!mutations[0].contains("--group admin"));
}
