// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desired-side recursive diff of JSON config trees.
//!
//! Only the desired tree drives the walk: keys present in the current
//! tree but absent from the desired one are left alone, because an import
//! never removes settings. Paths are joined with a caller-chosen
//! separator so key names containing the separator can be avoided.

use crate::outcome::{Changes, Delta};
use serde_json::Value;
use std::collections::BTreeMap;

/// Differences the desired tree would introduce.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeDiff {
    /// Paths the current tree lacks entirely.
    pub added: Vec<String>,
    /// Paths whose value differs, with both sides.
    pub changed: BTreeMap<String, Delta>,
}

impl TreeDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty()
    }

    /// Paths under `scope` (first path segment), with the scope stripped.
    pub fn added_under<'a>(&'a self, scope: &str, separator: &str) -> Vec<&'a str> {
        let prefix = format!("{scope}{separator}");
        self.added
            .iter()
            .filter_map(|path| path.strip_prefix(prefix.as_str()))
            .collect()
    }
}

impl From<TreeDiff> for Changes {
    fn from(diff: TreeDiff) -> Self {
        Changes { added: diff.added, removed: Vec::new(), changed: diff.changed }
    }
}

/// Compare `desired` against `current`.
pub fn diff_trees(current: &Value, desired: &Value, separator: &str) -> TreeDiff {
    let mut diff = TreeDiff::default();
    walk(current, desired, String::new(), separator, &mut diff);
    diff
}

fn walk(current: &Value, desired: &Value, path: String, separator: &str, diff: &mut TreeDiff) {
    let Value::Object(desired_map) = desired else {
        if current != desired {
            diff.changed.insert(
                path,
                Delta { old: Some(current.clone()), new: desired.clone() },
            );
        }
        return;
    };

    for (key, desired_child) in desired_map {
        let child_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{path}{separator}{key}")
        };
        match current.get(key) {
            None => diff.added.push(child_path),
            Some(current_child) => {
                if desired_child.is_object() && !current_child.is_object() {
                    // Scalar replaced by a subtree: record as one change.
                    diff.changed.insert(
                        child_path,
                        Delta { old: Some(current_child.clone()), new: desired_child.clone() },
                    );
                } else {
                    walk(current_child, desired_child, child_path, separator, diff);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
