// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Existence probes: sentinel semantics and paginated search bounds.

use crate::prelude::*;
use nco_core::OccError;
use nco_occ::ops::group::SENTINEL_USER;
use serde_json::{Map, Value};

fn page(names: &[&str]) -> String {
    let listing: Map<String, Value> =
        names.iter().map(|name| (name.to_string(), json!(name))).collect();
    Value::Object(listing).to_string()
}

fn full_page(prefix: &str, size: usize) -> String {
    let names: Vec<String> = (0..size).map(|i| format!("{prefix}{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    page(&refs)
}

#[test]
fn sentinel_probe_never_runs_anything_but_the_removal() {
    let runner = FakeRunner::new().fail("group:removeuser", 1, "user not found\n", "");
    assert!(client(&runner).group_exists("staff").unwrap());
    let lines = runner.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(&format!("-- staff {SENTINEL_USER}")));
}

#[test]
fn sentinel_collision_is_an_invariant_violation_not_a_result() {
    let runner = FakeRunner::new().ok("group:removeuser", "");
    let err = client(&runner).group_exists("staff").unwrap_err();
    assert!(matches!(err, OccError::SentinelCollision { .. }));
}

#[test]
fn paginated_probe_walks_consecutive_windows() {
    let runner = FakeRunner::new()
        .ok("--offset 0", full_page("a", 500))
        .ok("--offset 500", full_page("b", 500))
        .ok("--offset 1000", page(&["zulu", "needle"]));
    let probe = client(&runner).user_exists_listed("needle", 500, 5).unwrap();
    assert!(probe.is_present());

    let lines = runner.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("--limit 500 --offset 0"));
    assert!(lines[1].contains("--limit 500 --offset 500"));
    assert!(lines[2].contains("--limit 500 --offset 1000"));
}

#[test]
fn bound_of_three_reaches_offset_1000_then_gives_up() {
    let runner = FakeRunner::new()
        .ok("--offset 0", full_page("a", 500))
        .ok("--offset 500", full_page("b", 500))
        .ok("--offset 1000", full_page("c", 500));
    let probe = client(&runner).user_exists_listed("needle", 500, 3).unwrap();
    assert!(probe.is_inconclusive());
    assert_eq!(runner.call_count(), 3);
}

#[test]
fn bound_of_two_stops_before_offset_1000() {
    let runner = FakeRunner::new()
        .ok("--offset 0", full_page("a", 500))
        .ok("--offset 500", full_page("b", 500));
    let probe = client(&runner).user_exists_listed("needle", 500, 2).unwrap();
    assert!(probe.is_inconclusive());
    assert_eq!(runner.call_count(), 2);
}

#[test]
fn short_page_is_proof_of_absence() {
    let runner = FakeRunner::new()
        .ok("--offset 0", full_page("a", 500))
        .ok("--offset 500", page(&["last"]));
    let probe = client(&runner).user_exists_listed("needle", 500, 10).unwrap();
    assert!(probe.is_absent());
    assert_eq!(runner.call_count(), 2);
}

#[test]
fn empty_page_is_also_proof_of_absence() {
    let runner = FakeRunner::new().ok("user:list", "{}");
    let probe = client(&runner).user_exists_listed("needle", 500, 10).unwrap();
    assert!(probe.is_absent());
}

#[test]
fn zero_page_size_is_rejected_up_front() {
    let runner = FakeRunner::new();
    let err = client(&runner).user_exists_listed("needle", 0, 10).unwrap_err();
    assert!(matches!(err, OccError::Invocation(_)));
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn probe_values_serialize_snake_case() {
    assert_eq!(serde_json::to_value(Probe::Inconclusive).unwrap(), json!("inconclusive"));
}
