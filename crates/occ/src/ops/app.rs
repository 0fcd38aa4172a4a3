// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! App management: list, enable, disable, install, remove, update.

use crate::client::OccClient;
use crate::interpret;
use crate::runner::OccRunner;
use nco_core::{CommandSpec, OccError};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Parsed `occ app:list` payload. Values are the app versions occ reports
/// (enabled apps carry a version string, disabled apps may carry `true`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppList {
    #[serde(default)]
    pub enabled: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub disabled: BTreeMap<String, serde_json::Value>,
}

/// Where an app stands on this installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPresence {
    Enabled,
    Disabled,
    Absent,
}

impl AppPresence {
    /// Installed in either state.
    pub fn is_installed(self) -> bool {
        !matches!(self, AppPresence::Absent)
    }
}

nco_core::simple_display! {
    AppPresence {
        Enabled => "enabled",
        Disabled => "disabled",
        Absent => "absent",
    }
}

impl<R: OccRunner> OccClient<R> {
    /// `occ app:list`, parsed.
    pub fn app_list(&self) -> Result<AppList, OccError> {
        let outcome = self.occ(&CommandSpec::new("app:list"))?;
        let parsed = outcome.require_parsed("app:list")?;
        serde_json::from_value(parsed.clone()).map_err(|err| {
            OccError::interpretation(format!("app:list payload: {err}"), outcome.stdout.clone())
        })
    }

    /// Whether `app` is enabled, disabled or not installed at all.
    pub fn app_status(&self, app: &str) -> Result<AppPresence, OccError> {
        let list = self.app_list()?;
        if list.enabled.contains_key(app) {
            Ok(AppPresence::Enabled)
        } else if list.disabled.contains_key(app) {
            Ok(AppPresence::Disabled)
        } else {
            Ok(AppPresence::Absent)
        }
    }

    /// `occ app:enable`, optionally limited to groups.
    pub fn app_enable(&self, app: &str, groups: &[String], force: bool) -> Result<String, OccError> {
        let mut spec = CommandSpec::new("app:enable").json(false).flag_if(force, "force");
        for group in groups {
            spec = spec.param("groups", group);
        }
        let outcome = self.occ(&spec.arg(app))?;
        Ok(outcome.stdout)
    }

    /// `occ app:disable`.
    pub fn app_disable(&self, app: &str) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("app:disable").json(false).arg(app))?;
        Ok(outcome.stdout)
    }

    /// `occ app:install` from the app store.
    pub fn app_install(
        &self,
        app: &str,
        force: bool,
        keep_disabled: bool,
        allow_unstable: bool,
    ) -> Result<String, OccError> {
        let spec = CommandSpec::new("app:install")
            .json(false)
            .flag_if(force, "force")
            .flag_if(keep_disabled, "keep-disabled")
            .flag_if(allow_unstable, "allow-unstable")
            .arg(app);
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// `occ app:remove`. `keep_data` leaves the app's user data behind.
    pub fn app_remove(&self, app: &str, keep_data: bool) -> Result<String, OccError> {
        let spec = CommandSpec::new("app:remove")
            .json(false)
            .flag_if(keep_data, "keep-data")
            .arg(app);
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// `occ app:update` for one app, or all when `app` is `None`.
    pub fn app_update(&self, app: Option<&str>, allow_unstable: bool) -> Result<String, OccError> {
        let mut spec = CommandSpec::new("app:update")
            .json(false)
            .flag_if(allow_unstable, "allow-unstable");
        spec = match app {
            Some(app) => spec.arg(app),
            None => spec.flag("all"),
        };
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// Pending app updates without applying them
    /// (`app:update --all --showonly`).
    pub fn app_update_list(
        &self,
        allow_unstable: bool,
    ) -> Result<BTreeMap<String, String>, OccError> {
        let spec = CommandSpec::new("app:update")
            .json(false)
            .flag("all")
            .flag("showonly")
            .flag_if(allow_unstable, "allow-unstable");
        let outcome = self.occ(&spec)?;
        Ok(interpret::parse_app_updates(&outcome.stdout))
    }

    /// `occ app:getpath`: filesystem path of an installed app.
    pub fn app_getpath(&self, app: &str) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("app:getpath").json(false).arg(app))?;
        Ok(outcome.stdout_trimmed().to_string())
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
