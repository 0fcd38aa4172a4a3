// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Convergence of two-factor enforcement.
//!
//! occ cannot edit the group list of an active policy in place; changing
//! it means switching enforcement off and back on with the new list. The
//! reported changes are the real group diff, not the off/on cycle.

use crate::error::ConvergeError;
use crate::outcome::{Changes, Convergence};
use nco_occ::{Enforcement, OccClient, OccRunner};
use std::collections::BTreeSet;

/// Desired two-factor enforcement policy.
#[derive(Debug, Clone, Default)]
pub struct TwofactorPolicy {
    pub enforced: bool,
    /// Enforce only for these groups.
    pub only: Vec<String>,
    /// Enforce for everyone except these groups. Wins over `only`.
    pub exclude: Vec<String>,
}

impl TwofactorPolicy {
    pub fn enforced_for_all() -> Self {
        Self { enforced: true, ..Self::default() }
    }

    fn target(&self) -> Enforcement {
        if !self.enforced {
            Enforcement::Disabled
        } else if !self.exclude.is_empty() {
            Enforcement::ExceptGroups(self.exclude.clone())
        } else if !self.only.is_empty() {
            Enforcement::OnlyGroups(self.only.clone())
        } else {
            Enforcement::All
        }
    }
}

/// Group lists compare as sets; occ reports them in its own order.
fn same_policy(current: &Enforcement, target: &Enforcement) -> bool {
    match (current, target) {
        (Enforcement::OnlyGroups(a), Enforcement::OnlyGroups(b))
        | (Enforcement::ExceptGroups(a), Enforcement::ExceptGroups(b)) => {
            a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
        }
        _ => current == target,
    }
}

fn group_diff(current: &Enforcement, target: &Enforcement) -> Changes {
    let current_groups: BTreeSet<&String> = current.groups().iter().collect();
    let target_groups: BTreeSet<&String> = target.groups().iter().collect();
    Changes {
        added: target_groups.difference(&current_groups).map(|g| (*g).clone()).collect(),
        removed: current_groups.difference(&target_groups).map(|g| (*g).clone()).collect(),
        changed: Default::default(),
    }
}

fn describe(policy: &Enforcement) -> String {
    match policy {
        Enforcement::Disabled => "disabled".to_string(),
        Enforcement::All => "enforced for all users".to_string(),
        Enforcement::OnlyGroups(groups) => {
            format!("enforced for group(s) {}", groups.join(", "))
        }
        Enforcement::ExceptGroups(groups) => {
            format!("enforced except for group(s) {}", groups.join(", "))
        }
    }
}

/// Ensure the enforcement policy matches `desired`.
pub fn twofactor_enforced<R: OccRunner>(
    client: &OccClient<R>,
    desired: &TwofactorPolicy,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    let current = client.twofactor_enforce_status()?;
    let target = desired.target();

    if same_policy(&current, &target) {
        return Ok(Convergence::matches(format!(
            "Two-factor enforcement is already {}.",
            describe(&target)
        )));
    }

    let mut changes = group_diff(&current, &target);
    if changes.is_empty() {
        // Shape change without a group diff (off -> all, only -> except).
        changes = Changes::updating(
            "enforcement",
            Some(serde_json::Value::String(describe(&current))),
            serde_json::Value::String(describe(&target)),
        );
    }

    if dry_run {
        return Ok(Convergence::would_change(
            changes,
            format!("Two-factor enforcement would have been {}.", describe(&target)),
        ));
    }

    // An active group-scoped policy cannot change its list in place.
    if current.is_enforced() && target.is_enforced() {
        client.twofactor_enforce(false, &[], &[])?;
        tracing::debug!("cycled two-factor enforcement off to replace the group list");
    }
    client.twofactor_enforce(desired.enforced, &desired.only, &desired.exclude)?;

    Ok(Convergence::changed(
        changes,
        format!("Two-factor enforcement is now {}.", describe(&target)),
    ))
}

#[cfg(test)]
#[path = "twofactor_tests.rs"]
mod tests;
