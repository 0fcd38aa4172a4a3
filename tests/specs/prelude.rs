// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared imports and helpers for the behavior tests.

pub use nco_converge::outcome::Outcome;
pub use nco_core::{Probe, SecretSource, Settings, StaticSecrets};
pub use nco_occ::{FakeRunner, OccClient};
pub use serde_json::json;

/// A client over the given scripted runner, default settings.
pub fn client(runner: &FakeRunner) -> OccClient<FakeRunner> {
    OccClient::new(Settings::default(), runner.clone())
}

/// Lines that mutate state, as opposed to reads and probes.
pub fn mutating_lines(runner: &FakeRunner) -> Vec<String> {
    const READS: &[&str] = &[
        "status",
        "check",
        "--version",
        "config:list",
        "config:system:get",
        "config:app:get",
        "app:list",
        "user:info",
        "user:list",
        "group:list",
        "group:removeuser",
        // The flag-free form is the status read; --on/--off mutate.
        "twofactorauth:enforce --no-interaction",
        "update:check",
    ];
    runner
        .lines()
        .into_iter()
        .filter(|line| !READS.iter().any(|read| line.contains(read)))
        .collect()
}
