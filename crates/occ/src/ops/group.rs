// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Groups: lifecycle, membership, the sentinel existence probe.

use crate::client::OccClient;
use crate::runner::OccRunner;
use nco_core::{CommandSpec, OccError};
use serde_json::{Map, Value};

/// Sentinel member for the group existence probe. occ has no
/// `group:info`; removing a user that cannot exist from the group tells
/// the two cases apart by error message without touching real data.
pub const SENTINEL_USER: &str = "le7s_hop3_n0_0ne_cr34t3s_a_user_l1ke_thi5";

impl<R: OccRunner> OccClient<R> {
    /// `occ group:add`.
    pub fn group_add(&self, group_id: &str, display_name: Option<&str>) -> Result<String, OccError> {
        let mut spec = CommandSpec::new("group:add").json(false);
        if let Some(display_name) = display_name {
            spec = spec.param("display-name", display_name);
        }
        let outcome = self.occ(&spec.arg(group_id))?;
        Ok(outcome.stdout)
    }

    /// `occ group:delete`.
    pub fn group_delete(&self, group_id: &str) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("group:delete").json(false).arg(group_id))?;
        Ok(outcome.stdout)
    }

    /// `occ group:adduser`.
    pub fn group_adduser(&self, group_id: &str, user_id: &str) -> Result<String, OccError> {
        let spec = CommandSpec::new("group:adduser").json(false).args([group_id, user_id]);
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// `occ group:removeuser`.
    pub fn group_removeuser(&self, group_id: &str, user_id: &str) -> Result<String, OccError> {
        let spec = CommandSpec::new("group:removeuser").json(false).args([group_id, user_id]);
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// One page of `occ group:list` as group id to member listing.
    pub fn group_list(&self, limit: u64, offset: u64) -> Result<Map<String, Value>, OccError> {
        let spec = CommandSpec::new("group:list").param("limit", limit).param("offset", offset);
        let outcome = self.occ(&spec)?;
        let parsed = outcome.require_parsed("group:list")?;
        parsed
            .as_object()
            .cloned()
            .ok_or_else(|| OccError::interpretation("group:list payload", outcome.stdout.clone()))
    }

    /// Whether the group exists, via the sentinel removal probe.
    ///
    /// `group:removeuser <group> <sentinel>` fails with "group not found"
    /// when the group is absent and "user not found" when the group is
    /// there. A zero exit means the sentinel account actually existed and
    /// was a member; its removal cannot be undone from here, so that is
    /// reported as a [`OccError::SentinelCollision`].
    pub fn group_exists(&self, group_id: &str) -> Result<bool, OccError> {
        let spec = CommandSpec::new("group:removeuser")
            .json(false)
            .args([group_id, SENTINEL_USER])
            .expect_error();
        let outcome = self.occ(&spec)?;
        if outcome.success() {
            return Err(OccError::SentinelCollision {
                group: group_id.to_string(),
                sentinel: SENTINEL_USER.to_string(),
            });
        }
        let combined = format!("{}{}", outcome.stdout, outcome.stderr);
        if combined.contains("group not found") {
            Ok(false)
        } else if combined.contains("user not found") {
            Ok(true)
        } else {
            Err(OccError::interpretation(
                format!("group:removeuser existence probe for '{group_id}'"),
                combined,
            ))
        }
    }
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
