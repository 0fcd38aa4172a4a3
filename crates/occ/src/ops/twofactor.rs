// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-factor authentication enforcement.
//!
//! occ can enforce 2FA globally, for listed groups only, or for everyone
//! except listed groups. The group list cannot be edited in place; the
//! convergence layer cycles enforcement off and on to change it.

use crate::client::OccClient;
use crate::runner::OccRunner;
use nco_core::{CommandSpec, OccError};

/// Current enforcement policy, as `twofactorauth:enforce` reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enforcement {
    Disabled,
    /// Enforced for every account.
    All,
    /// Enforced only for members of these groups.
    OnlyGroups(Vec<String>),
    /// Enforced for everyone except members of these groups.
    ExceptGroups(Vec<String>),
}

impl Enforcement {
    pub fn is_enforced(&self) -> bool {
        !matches!(self, Enforcement::Disabled)
    }

    /// The groups the policy is scoped to, when it is group-scoped.
    pub fn groups(&self) -> &[String] {
        match self {
            Enforcement::OnlyGroups(groups) | Enforcement::ExceptGroups(groups) => groups,
            _ => &[],
        }
    }
}

impl<R: OccRunner> OccClient<R> {
    /// Read the current enforcement policy.
    pub fn twofactor_enforce_status(&self) -> Result<Enforcement, OccError> {
        let outcome = self.occ(&CommandSpec::new("twofactorauth:enforce").json(false))?;
        parse_enforcement(outcome.stdout_trimmed())
            .ok_or_else(|| OccError::interpretation("twofactorauth:enforce status", outcome.stdout.clone()))
    }

    /// Set the enforcement policy in one call.
    ///
    /// `exclude` wins over `only` when both are given, mirroring occ's own
    /// precedence. Changing the group list of an already group-scoped
    /// policy needs a disable first; see the convergence layer.
    pub fn twofactor_enforce(
        &self,
        enabled: bool,
        only: &[String],
        exclude: &[String],
    ) -> Result<String, OccError> {
        let mut spec = CommandSpec::new("twofactorauth:enforce")
            .json(false)
            .flag(if enabled { "on" } else { "off" });
        if enabled {
            if !exclude.is_empty() {
                for group in exclude {
                    spec = spec.param("exclude", group);
                }
            } else {
                for group in only {
                    spec = spec.param("group", group);
                }
            }
        }
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }
}

fn parse_enforcement(stdout: &str) -> Option<Enforcement> {
    if let Some((_, tail)) = stdout.split_once("except members of the group(s)") {
        return Some(Enforcement::ExceptGroups(parse_groups(tail)));
    }
    if stdout.contains("is enforced for members of the group(s)") {
        let (_, tail) = stdout.split_once("group(s)")?;
        return Some(Enforcement::OnlyGroups(parse_groups(tail)));
    }
    if stdout.contains("is not enforced") {
        return Some(Enforcement::Disabled);
    }
    if stdout.contains("is enforced for all users") {
        return Some(Enforcement::All);
    }
    None
}

fn parse_groups(tail: &str) -> Vec<String> {
    tail.trim()
        .split(", ")
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "twofactor_tests.rs"]
mod tests;
