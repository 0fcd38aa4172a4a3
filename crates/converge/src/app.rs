// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Convergence of app presence.

use crate::error::ConvergeError;
use crate::outcome::{Changes, Convergence};
use nco_occ::{OccClient, OccRunner};

/// A desired app installation.
#[derive(Debug, Clone)]
pub struct AppPresent {
    pub app: String,
    /// Install even when the server version is not marked compatible.
    pub force: bool,
    /// Install without enabling.
    pub keep_disabled: bool,
    pub allow_unstable: bool,
}

impl AppPresent {
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into(), force: false, keep_disabled: false, allow_unstable: false }
    }
}

/// Ensure the app is installed (enabled or disabled).
pub fn app_installed<R: OccRunner>(
    client: &OccClient<R>,
    desired: &AppPresent,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    let presence = client.app_status(&desired.app)?;
    if presence.is_installed() {
        return Ok(Convergence::matches(format!(
            "App '{}' is already installed ({presence}).",
            desired.app
        )));
    }

    let changes = Changes::adding(&desired.app);
    if dry_run {
        return Ok(Convergence::would_change(
            changes,
            format!("App '{}' would have been installed.", desired.app),
        ));
    }
    client.app_install(&desired.app, desired.force, desired.keep_disabled, desired.allow_unstable)?;
    Ok(Convergence::changed(changes, format!("App '{}' has been installed.", desired.app)))
}

/// Ensure the app is not installed.
pub fn app_absent<R: OccRunner>(
    client: &OccClient<R>,
    app: &str,
    keep_data: bool,
    dry_run: bool,
) -> Result<Convergence, ConvergeError> {
    if !client.app_status(app)?.is_installed() {
        return Ok(Convergence::matches(format!("App '{app}' is already absent.")));
    }

    let changes = Changes::removing(app);
    if dry_run {
        return Ok(Convergence::would_change(
            changes,
            format!("App '{app}' would have been removed."),
        ));
    }
    client.app_remove(app, keep_data)?;
    Ok(Convergence::changed(changes, format!("App '{app}' has been removed.")))
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
