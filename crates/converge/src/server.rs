// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Convergence of the server itself: installed, up to date.

use crate::error::ConvergeError;
use crate::outcome::{Changes, Convergence};
use nco_core::SecretStore;
use nco_occ::{InstallSpec, OccClient, OccRunner};

/// Desired update posture.
#[derive(Debug, Clone, Default)]
pub struct UptodateSpec {
    /// Upper version bound (`"24"`, `"24.0"`, `"24.0.3"`); unrestricted
    /// when `None`.
    pub max_version: Option<String>,
    /// Skip the updater's backup step.
    pub no_backup: bool,
}

/// Ensure the installation is finished.
pub fn installed<R: OccRunner>(
    client: &OccClient<R>,
    desired: &InstallSpec,
    secrets: &dyn SecretStore,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    if client.is_installed()? {
        return Ok(Convergence::matches("Nextcloud installation is already finished."));
    }

    let changes = Changes::adding("Nextcloud");
    if dry_run {
        return Ok(Convergence::would_change(changes, "Nextcloud would have been installed."));
    }
    client.install(desired, secrets)?;
    tracing::info!("finished maintenance:install");
    Ok(Convergence::changed(changes, "Nextcloud has been installed."))
}

/// Ensure no server update within the bound is pending.
pub fn uptodate<R: OccRunner>(
    client: &OccClient<R>,
    desired: &UptodateSpec,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    let bound = desired.max_version.as_deref();
    if client.is_uptodate(bound)? {
        let comment = match bound {
            Some(bound) => format!("Nextcloud is up to date (within version bound {bound})."),
            None => "Nextcloud is up to date.".to_string(),
        };
        return Ok(Convergence::matches(comment));
    }

    let report = client.update_check()?;
    let target = report.server.ok_or_else(|| {
        nco_core::OccError::interpretation(
            "update:check reported pending state without a server version",
            String::new(),
        )
    })?;
    let current = client.version()?;
    let changes = Changes::updating(
        "version",
        Some(serde_json::Value::String(current)),
        serde_json::Value::String(target.clone()),
    );

    if dry_run {
        return Ok(Convergence::would_change(
            changes,
            format!("Nextcloud would have been updated to {target}."),
        ));
    }
    client.upgrade(desired.no_backup)?;
    tracing::info!(%target, "updater finished");
    Ok(Convergence::changed(changes, format!("Nextcloud has been updated to {target}.")))
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
