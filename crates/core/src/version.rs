// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Nextcloud version parsing and comparison.

use crate::OccError;
use semver::Version;

/// First release where `config:import` accepts float values again
/// (nextcloud/server#32468). Below this, doubles must be split out of the
/// bulk import and set individually.
pub const FLOAT_IMPORT_FIX: Version = Version::new(24, 0, 3);

/// Parse a Nextcloud version string.
///
/// `status` may report a four-segment internal version; the fourth segment
/// is a build counter and is dropped. Fewer than three segments are
/// zero-padded.
pub fn parse_version(raw: &str) -> Result<Version, OccError> {
    let trimmed = raw.trim();
    let mut segments = trimmed.split('.');
    let mut numbers = [0u64; 3];
    for slot in &mut numbers {
        let Some(segment) = segments.next() else { break };
        *slot = segment
            .parse()
            .map_err(|_| OccError::interpretation("version string", trimmed))?;
    }
    Ok(Version::new(numbers[0], numbers[1], numbers[2]))
}

/// Pad a partial upper version bound so point releases stay allowed.
///
/// A bound of `24` means "any 24.x.y", so it becomes `24.999.999`;
/// `24.0` becomes `24.0.999`. Full three-segment bounds pass through.
pub fn pad_max_version(raw: &str) -> String {
    match raw.matches('.').count() {
        0 => format!("{raw}.999.999"),
        1 => format!("{raw}.999"),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
