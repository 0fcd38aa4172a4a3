// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Convergence of configuration: single system settings and bulk imports.

use crate::diff::diff_trees;
use crate::error::ConvergeError;
use crate::outcome::{Changes, Convergence};
use nco_core::ValueType;
use nco_occ::ops::config::SAFE_SEPARATOR;
use nco_occ::{OccClient, OccRunner};
use serde_json::Value;

/// One desired system setting.
#[derive(Debug, Clone)]
pub struct SystemSetting {
    /// Key path, segments joined by `separator`.
    pub name: String,
    pub value: Value,
    /// Explicit type tag; autodetected from the value when `None`.
    pub vtype: Option<ValueType>,
    pub separator: String,
}

impl SystemSetting {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self { name: name.into(), value, vtype: None, separator: ":".to_string() }
    }
}

/// Ensure a system setting holds the desired value.
pub fn system_setting<R: OccRunner>(
    client: &OccClient<R>,
    desired: &SystemSetting,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    let current = client.config_system_get(&desired.name, &desired.separator)?;
    if current.as_ref() == Some(&desired.value) {
        return Ok(Convergence::matches(format!(
            "System setting '{}' is already set.",
            desired.name
        )));
    }

    let changes = Changes::updating(desired.name.clone(), current, desired.value.clone());
    if dry_run {
        return Ok(Convergence::would_change(
            changes,
            format!("System setting '{}' would have been set.", desired.name),
        ));
    }

    let vtype = desired.vtype.unwrap_or_else(|| ValueType::of(&desired.value));
    client.config_system_set(&desired.name, &desired.value, vtype, false, &desired.separator)?;
    Ok(Convergence::changed(
        changes,
        format!("System setting '{}' has been set.", desired.name),
    ))
}

/// Ensure a system setting is absent.
pub fn system_setting_absent<R: OccRunner>(
    client: &OccClient<R>,
    name: &str,
    separator: &str,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    if client.config_system_get(name, separator)?.is_none() {
        return Ok(Convergence::matches(format!("System setting '{name}' is already absent.")));
    }

    let changes = Changes::removing(name);
    if dry_run {
        return Ok(Convergence::would_change(
            changes,
            format!("System setting '{name}' would have been deleted."),
        ));
    }
    client.config_system_delete(name, false, separator)?;
    Ok(Convergence::changed(changes, format!("System setting '{name}' has been deleted.")))
}

/// A desired bulk configuration import.
#[derive(Debug, Clone)]
pub struct ImportSpec {
    /// Tree in `config:list` shape: `system` and `apps` scopes.
    pub config: Value,
    /// Skip the consistency checks and the rollback protocol.
    pub force: bool,
    /// On rollback, also delete app-scope keys the import added. occ
    /// deletes app defaults along with overrides, so this defaults off.
    pub revert_app_scope: bool,
}

impl ImportSpec {
    pub fn new(config: Value) -> Self {
        Self { config, force: false, revert_app_scope: false }
    }
}

/// Ensure the configuration tree is imported, with rollback on breakage.
///
/// Protocol (unless `force`): verify `occ check` is clean, snapshot the
/// full private config, import, re-run the check. When the check fails
/// afterwards, the snapshot is re-imported and system-scope keys the
/// import added are deleted; the run then fails with
/// [`ConvergeError::ImportReverted`].
pub fn config_imported<R: OccRunner>(
    client: &OccClient<R>,
    desired: &ImportSpec,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    if !desired.force {
        let problems = client.check()?;
        if !problems.is_empty() {
            return Err(ConvergeError::UnsafeToImport { problems: problems.join("\n") });
        }
    }

    let snapshot = client.config_list("all", true)?;
    let diff = diff_trees(&snapshot, &desired.config, ".");
    if diff.is_empty() {
        return Ok(Convergence::matches("Configuration is already imported."));
    }

    let changes: Changes = diff.clone().into();
    if dry_run {
        return Ok(Convergence::would_change(changes, "Configuration would have been updated."));
    }

    client.config_import_tree(&desired.config)?;
    if desired.force {
        return Ok(Convergence::changed(changes, "Configuration has been updated (unchecked)."));
    }

    let problems = client.check()?;
    if problems.is_empty() {
        return Ok(Convergence::changed(changes, "Configuration has been updated."));
    }

    tracing::warn!(
        problems = problems.len(),
        "imported configuration failed the consistency check; reverting"
    );
    let problems = problems.join("\n");
    match revert(client, &snapshot, &desired.config, desired.revert_app_scope) {
        Ok(retained) => Err(ConvergeError::ImportReverted { problems, retained }),
        Err(source) => Err(ConvergeError::RevertFailed { problems, source }),
    }
}

/// Restore the snapshot and delete what the import added. Returns the
/// app-scope paths left in place.
fn revert<R: OccRunner>(
    client: &OccClient<R>,
    snapshot: &Value,
    desired: &Value,
    revert_app_scope: bool,
) -> Result<Vec<String>, nco_core::OccError> {
    client.config_import_tree(snapshot)?;

    // Re-importing restores changed values but cannot drop added keys.
    // The deletion keys come from a separator-safe diff: key names
    // containing dots (overwrite.cli.url) must survive as one segment.
    let diff = diff_trees(snapshot, desired, SAFE_SEPARATOR);
    for key in diff.added_under("system", SAFE_SEPARATOR) {
        client.config_system_delete(key, false, SAFE_SEPARATOR)?;
    }

    let mut retained = Vec::new();
    for path in diff.added_under("apps", SAFE_SEPARATOR) {
        match path.split_once(SAFE_SEPARATOR) {
            Some((app, key)) if revert_app_scope && !key.contains(SAFE_SEPARATOR) => {
                client.config_app_delete(app, key, false)?;
            }
            _ => retained.push(format!("apps.{}", path.replace(SAFE_SEPARATOR, "."))),
        }
    }
    Ok(retained)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
