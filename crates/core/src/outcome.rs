// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Captured results of subprocess invocations.

use crate::OccError;
use serde::{Deserialize, Serialize};

/// What the runner hands back: exit code and captured streams, untouched.
#[derive(Debug, Clone, Default)]
pub struct RawOutput {
    /// Raw exit code.
    pub code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl RawOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Outcome of one `occ` invocation after classification.
#[derive(Debug, Clone, Default)]
pub struct ExecOutcome {
    /// Raw exit code.
    pub code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Parsed structured payload. Present only when the exit code was zero,
    /// structured output was requested, and parsing succeeded.
    pub parsed: Option<serde_json::Value>,
}

impl ExecOutcome {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Trimmed stdout.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// The parsed payload, or an interpretation error naming `context`.
    ///
    /// Calling this on an outcome without structured output indicates a
    /// wrong assumption about the subcommand, which is a hard failure.
    pub fn require_parsed(&self, context: &str) -> Result<&serde_json::Value, OccError> {
        self.parsed
            .as_ref()
            .ok_or_else(|| OccError::interpretation(context, self.stdout.clone()))
    }
}

impl From<RawOutput> for ExecOutcome {
    fn from(raw: RawOutput) -> Self {
        Self { code: raw.code, stdout: raw.stdout, stderr: raw.stderr, parsed: None }
    }
}

/// Three-valued existence probe result.
///
/// Probes that page through capped listings cannot always decide; they
/// report [`Probe::Inconclusive`] instead of guessing, and callers raise
/// the iteration bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Probe {
    Present,
    Absent,
    /// The search bound was exhausted without a definitive answer.
    Inconclusive,
}

impl Probe {
    pub fn is_present(self) -> bool {
        matches!(self, Probe::Present)
    }

    pub fn is_absent(self) -> bool {
        matches!(self, Probe::Absent)
    }

    pub fn is_inconclusive(self) -> bool {
        matches!(self, Probe::Inconclusive)
    }
}

crate::simple_display! {
    Probe {
        Present => "present",
        Absent => "absent",
        Inconclusive => "inconclusive",
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
