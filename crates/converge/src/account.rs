// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Convergence of user and group presence.
//!
//! The existence reads here are the definitive probes (`user:info` exit
//! code, the group sentinel removal); the paginated listing probe is for
//! callers that cannot afford per-user subprocess calls.

use crate::error::ConvergeError;
use crate::outcome::{Changes, Convergence};
use nco_core::SecretStore;
use nco_occ::{OccClient, OccRunner, UserAdd};

/// Ensure the user account exists.
pub fn user_present<R: OccRunner>(
    client: &OccClient<R>,
    desired: &UserAdd,
    secrets: &dyn SecretStore,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    if client.user_exists(&desired.user_id)? {
        return Ok(Convergence::matches(format!(
            "User '{}' already exists.",
            desired.user_id
        )));
    }

    let changes = Changes::adding(&desired.user_id);
    if dry_run {
        return Ok(Convergence::would_change(
            changes,
            format!("User '{}' would have been created.", desired.user_id),
        ));
    }
    client.user_add(desired, secrets)?;
    Ok(Convergence::changed(changes, format!("User '{}' has been created.", desired.user_id)))
}

/// Ensure the user account does not exist.
pub fn user_absent<R: OccRunner>(
    client: &OccClient<R>,
    user_id: &str,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    if !client.user_exists(user_id)? {
        return Ok(Convergence::matches(format!("User '{user_id}' is already absent.")));
    }

    let changes = Changes::removing(user_id);
    if dry_run {
        return Ok(Convergence::would_change(
            changes,
            format!("User '{user_id}' would have been deleted."),
        ));
    }
    client.user_delete(user_id)?;
    Ok(Convergence::changed(changes, format!("User '{user_id}' has been deleted.")))
}

/// Ensure the group exists.
pub fn group_present<R: OccRunner>(
    client: &OccClient<R>,
    group_id: &str,
    display_name: Option<&str>,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    if client.group_exists(group_id)? {
        return Ok(Convergence::matches(format!("Group '{group_id}' already exists.")));
    }

    let changes = Changes::adding(group_id);
    if dry_run {
        return Ok(Convergence::would_change(
            changes,
            format!("Group '{group_id}' would have been created."),
        ));
    }
    client.group_add(group_id, display_name)?;
    Ok(Convergence::changed(changes, format!("Group '{group_id}' has been created.")))
}

/// Ensure the group does not exist.
pub fn group_absent<R: OccRunner>(
    client: &OccClient<R>,
    group_id: &str,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    if !client.group_exists(group_id)? {
        return Ok(Convergence::matches(format!("Group '{group_id}' is already absent.")));
    }

    let changes = Changes::removing(group_id);
    if dry_run {
        return Ok(Convergence::would_change(
            changes,
            format!("Group '{group_id}' would have been deleted."),
        ));
    }
    client.group_delete(group_id)?;
    Ok(Convergence::changed(changes, format!("Group '{group_id}' has been deleted.")))
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;
