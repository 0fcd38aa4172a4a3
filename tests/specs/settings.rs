// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! System-setting convergence: match, dry run, apply, idempotence.

use crate::prelude::*;
use nco_converge::config::{system_setting, system_setting_absent, SystemSetting};

#[test]
fn matching_state_executes_zero_mutations() {
    let runner = FakeRunner::new().ok("config:system:get", "2\n");
    let result =
        system_setting(&client(&runner), &SystemSetting::new("loglevel", json!(2)), false).unwrap();
    assert_eq!(result.outcome, Outcome::Matches);
    assert!(mutating_lines(&runner).is_empty());
}

#[test]
fn dry_run_reports_the_exact_change_and_mutates_nothing() {
    let runner = FakeRunner::new().ok("config:system:get", "3\n");
    let result =
        system_setting(&client(&runner), &SystemSetting::new("loglevel", json!(2)), true).unwrap();
    assert_eq!(result.outcome, Outcome::WouldChange);
    let delta = &result.changes.changed["loglevel"];
    assert_eq!(delta.old, Some(json!(3)));
    assert_eq!(delta.new, json!(2));
    assert!(mutating_lines(&runner).is_empty());
}

#[test]
fn apply_executes_exactly_the_reported_mutation() {
    let runner = FakeRunner::new()
        .ok("config:system:get", "3\n")
        .ok("config:system:set", "");
    let result =
        system_setting(&client(&runner), &SystemSetting::new("loglevel", json!(2)), false).unwrap();
    assert_eq!(result.outcome, Outcome::Changed);

    let mutations = mutating_lines(&runner);
    assert_eq!(mutations.len(), 1);
    assert!(mutations[0].contains("config:system:set"));
    assert!(mutations[0].contains("--value 2 --type integer"));
    assert!(mutations[0].ends_with("-- loglevel"));
}

#[test]
fn second_run_after_apply_reports_match() {
    // First run sees the old value and sets; the second sees the new one.
    let runner = FakeRunner::new()
        .ok("config:system:get", "3\n")
        .ok("config:system:set", "")
        .ok("config:system:get", "2\n");
    let desired = SystemSetting::new("loglevel", json!(2));
    let first = system_setting(&client(&runner), &desired, false).unwrap();
    let second = system_setting(&client(&runner), &desired, false).unwrap();
    assert_eq!(first.outcome, Outcome::Changed);
    assert_eq!(second.outcome, Outcome::Matches);
}

#[test]
fn nested_keys_travel_as_separated_segments() {
    let runner = FakeRunner::new()
        .fail("config:system:get", 1, "", "")
        .ok("config:system:set", "");
    let desired = SystemSetting::new("redis:timeout", json!(1.5));
    system_setting(&client(&runner), &desired, false).unwrap();
    let sets = runner.lines_matching("config:system:set");
    assert!(sets[0].contains("--type double"));
    assert!(sets[0].ends_with("-- redis timeout"));
}

#[test]
fn absence_convergence_is_idempotent() {
    let runner = FakeRunner::new()
        .ok("config:system:get", "\"old\"\n")
        .ok("config:system:delete", "")
        .fail("config:system:get", 1, "", "");
    let first = system_setting_absent(&client(&runner), "stale", ":", false).unwrap();
    let second = system_setting_absent(&client(&runner), "stale", ":", false).unwrap();
    assert_eq!(first.outcome, Outcome::Changed);
    assert_eq!(second.outcome, Outcome::Matches);
    assert_eq!(runner.lines_matching("config:system:delete").len(), 1);
}
