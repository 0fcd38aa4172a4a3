// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What a convergence run decided and did.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The three possible results of a convergence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Current state already matches; nothing was executed.
    Matches,
    /// Dry run: differences exist, nothing was executed.
    WouldChange,
    /// Differences existed and were applied.
    Changed,
}

nco_core::simple_display! {
    Outcome {
        Matches => "matches",
        WouldChange => "would change",
        Changed => "changed",
    }
}

/// One value change, keyed by setting path in [`Changes::changed`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta {
    /// Previous value; `None` for keys that did not exist.
    pub old: Option<Value>,
    /// Desired value.
    pub new: Value,
}

/// What differs between current and desired state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Changes {
    /// Things the desired state adds.
    pub added: Vec<String>,
    /// Things the desired state removes.
    pub removed: Vec<String>,
    /// Value changes by path.
    pub changed: BTreeMap<String, Delta>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub fn adding(name: impl Into<String>) -> Self {
        Self { added: vec![name.into()], ..Self::default() }
    }

    pub fn removing(name: impl Into<String>) -> Self {
        Self { removed: vec![name.into()], ..Self::default() }
    }

    pub fn updating(path: impl Into<String>, old: Option<Value>, new: Value) -> Self {
        let mut changed = BTreeMap::new();
        changed.insert(path.into(), Delta { old, new });
        Self { changed, ..Self::default() }
    }
}

/// The full result of a convergence run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Convergence {
    pub outcome: Outcome,
    pub changes: Changes,
    /// Human-readable summary of what happened (or would happen).
    pub comment: String,
}

impl Convergence {
    pub fn matches(comment: impl Into<String>) -> Self {
        Self { outcome: Outcome::Matches, changes: Changes::default(), comment: comment.into() }
    }

    pub fn would_change(changes: Changes, comment: impl Into<String>) -> Self {
        Self { outcome: Outcome::WouldChange, changes, comment: comment.into() }
    }

    pub fn changed(changes: Changes, comment: impl Into<String>) -> Self {
        Self { outcome: Outcome::Changed, changes, comment: comment.into() }
    }

    /// Whether the run left the installation untouched.
    pub fn is_noop(&self) -> bool {
        matches!(self.outcome, Outcome::Matches | Outcome::WouldChange)
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
