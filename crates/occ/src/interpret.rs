// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extractors for subcommands without structured output.
//!
//! A handful of occ subcommands only speak prose. These helpers pull data
//! out of the known shapes: line-anchored `key: value` pairs, enumerations
//! terminated by a blank line, marker phrases, and the `update:check`
//! report. Anything that fails to match is an interpretation error, never
//! a guess.

use nco_core::OccError;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Parse line-anchored `key: value` pairs. Lines without a colon are
/// skipped; keys and values are trimmed.
pub fn kv_lines(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Collect non-empty lines until the first blank line.
pub fn enumerated_until_blank(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Marker-phrase check, trimmed.
pub fn contains_marker(text: &str, marker: &str) -> bool {
    text.contains(marker)
}

#[allow(clippy::expect_used)]
static SERVER_UPDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Nextcloud ([\d.]+) is available")
        .expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static APP_UPDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Update for (\S+) to version ([\d.]+) is available\.$")
        .expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static UPDATE_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\d+) updates? available")
        .expect("constant regex pattern is valid")
});

/// Available updates, per `update:check`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// New server version, when one is available.
    pub server: Option<String>,
    /// App name to new version.
    pub apps: BTreeMap<String, String>,
}

impl UpdateReport {
    pub fn any(&self) -> bool {
        self.server.is_some() || !self.apps.is_empty()
    }

    fn entries(&self) -> usize {
        usize::from(self.server.is_some()) + self.apps.len()
    }
}

/// Parse `update:check` output.
///
/// The trailing `N update(s) available` line is cross-checked against the
/// entries actually matched; a mismatch means occ grew an update kind this
/// parser does not know, which must fail loudly rather than under-report.
pub fn parse_update_check(stdout: &str) -> Result<UpdateReport, OccError> {
    if contains_marker(stdout, "Everything up to date") {
        return Ok(UpdateReport::default());
    }

    let mut report = UpdateReport::default();
    if let Some(captures) = SERVER_UPDATE.captures(stdout) {
        report.server = Some(captures[1].to_string());
    }
    for captures in APP_UPDATE.captures_iter(stdout) {
        report.apps.insert(captures[1].to_string(), captures[2].to_string());
    }

    let counted: usize = UPDATE_COUNT
        .captures(stdout)
        .and_then(|captures| captures[1].parse().ok())
        .ok_or_else(|| OccError::interpretation("update:check count line", stdout))?;
    if counted != report.entries() {
        return Err(OccError::interpretation(
            format!(
                "update:check reports {counted} updates but {} were recognized",
                report.entries()
            ),
            stdout,
        ));
    }
    Ok(report)
}

#[allow(clippy::expect_used)]
static APP_NEW_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\S+) new version available: ([\d.]+)")
        .expect("constant regex pattern is valid")
});

/// Parse `app:update --showonly` output into app name to new version.
pub fn parse_app_updates(stdout: &str) -> BTreeMap<String, String> {
    APP_NEW_VERSION
        .captures_iter(stdout)
        .map(|captures| (captures[1].to_string(), captures[2].to_string()))
        .collect()
}

#[cfg(test)]
#[path = "interpret_tests.rs"]
mod tests;
