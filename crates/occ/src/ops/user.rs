// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User accounts: lifecycle, existence probes, passwords, settings.
//!
//! Passwords reach occ through single-use environment variables. The
//! variable name is whatever the individual subcommand reads: `OC_PASS`
//! for `user:add` and `user:resetpassword`, `NC_PASS` for
//! `user:add-app-password`.

use crate::client::OccClient;
use crate::runner::OccRunner;
use nco_core::{CommandSpec, OccError, Probe, SecretSource, SecretStore};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static USER_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_@.-]+$").expect("constant regex pattern is valid")
});

/// A user account to create.
#[derive(Debug, Clone)]
pub struct UserAdd {
    pub user_id: String,
    pub password: SecretSource,
    pub display_name: Option<String>,
    pub groups: Vec<String>,
}

impl UserAdd {
    pub fn new(user_id: impl Into<String>, password: SecretSource) -> Self {
        Self { user_id: user_id.into(), password, display_name: None, groups: Vec::new() }
    }
}

impl<R: OccRunner> OccClient<R> {
    /// `occ user:add`. The user id charset is validated up front; occ's
    /// own rejection arrives as a subprocess failure with a vaguer message.
    pub fn user_add(
        &self,
        desired: &UserAdd,
        secrets: &dyn SecretStore,
    ) -> Result<String, OccError> {
        if !USER_ID.is_match(&desired.user_id) {
            return Err(OccError::invocation(format!(
                "user id '{}' contains characters outside [A-Za-z0-9_@.-]",
                desired.user_id
            )));
        }

        let mut spec = CommandSpec::new("user:add")
            .json(false)
            .flag("password-from-env")
            .env("OC_PASS", desired.password.resolve(secrets)?);
        if let Some(display_name) = &desired.display_name {
            spec = spec.param("display-name", display_name);
        }
        for group in &desired.groups {
            spec = spec.param("group", group);
        }
        let outcome = self.occ(&spec.arg(&desired.user_id))?;
        Ok(outcome.stdout)
    }

    /// `occ user:delete`.
    pub fn user_delete(&self, user_id: &str) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("user:delete").json(false).arg(user_id))?;
        Ok(outcome.stdout)
    }

    /// `occ user:enable`.
    pub fn user_enable(&self, user_id: &str) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("user:enable").json(false).arg(user_id))?;
        Ok(outcome.stdout)
    }

    /// `occ user:disable`.
    pub fn user_disable(&self, user_id: &str) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("user:disable").json(false).arg(user_id))?;
        Ok(outcome.stdout)
    }

    /// Whether the account exists, via `user:info`'s exit code.
    pub fn user_exists(&self, user_id: &str) -> Result<bool, OccError> {
        let spec = CommandSpec::new("user:info").arg(user_id).expect_error();
        let outcome = self.occ(&spec)?;
        if outcome.success() {
            return Ok(true);
        }
        if outcome.stdout.contains("user not found") || outcome.stderr.contains("user not found") {
            return Ok(false);
        }
        Err(OccError::interpretation(
            format!("user:info existence probe for '{user_id}'"),
            format!("{}{}", outcome.stdout, outcome.stderr),
        ))
    }

    /// `occ user:info`, parsed.
    pub fn user_info(&self, user_id: &str) -> Result<Value, OccError> {
        let outcome = self.occ(&CommandSpec::new("user:info").arg(user_id))?;
        Ok(outcome.require_parsed("user:info")?.clone())
    }

    /// Whether the account is enabled.
    pub fn user_enabled(&self, user_id: &str) -> Result<bool, OccError> {
        let info = self.user_info(user_id)?;
        info.get("enabled").and_then(Value::as_bool).ok_or_else(|| {
            OccError::interpretation(format!("user:info enabled field for '{user_id}'"), info.to_string())
        })
    }

    /// One page of `occ user:list` as user id to display name.
    ///
    /// occ takes `--limit 0` literally and returns zero rows; that is
    /// preserved here, callers wanting pagination go through
    /// [`Self::user_exists_listed`].
    pub fn user_list(&self, limit: u64, offset: u64) -> Result<Map<String, Value>, OccError> {
        let spec = CommandSpec::new("user:list").param("limit", limit).param("offset", offset);
        let outcome = self.occ(&spec)?;
        let parsed = outcome.require_parsed("user:list")?;
        parsed
            .as_object()
            .cloned()
            .ok_or_else(|| OccError::interpretation("user:list payload", outcome.stdout.clone()))
    }

    /// Existence probe through the paginated listing.
    ///
    /// Pages of `limit` rows are scanned until the user turns up, a short
    /// page proves the end of the listing, or `max_iterations` pages have
    /// been fetched. The bound makes huge instances answer
    /// [`Probe::Inconclusive`] instead of hammering occ indefinitely.
    pub fn user_exists_listed(
        &self,
        user_id: &str,
        limit: u64,
        max_iterations: u64,
    ) -> Result<Probe, OccError> {
        if limit == 0 {
            return Err(OccError::invocation(
                "a page size of 0 would return zero rows per page",
            ));
        }
        for page in 0..max_iterations {
            let listing = self.user_list(limit, page * limit)?;
            if listing.contains_key(user_id) {
                return Ok(Probe::Present);
            }
            if (listing.len() as u64) < limit {
                return Ok(Probe::Absent);
            }
        }
        Ok(Probe::Inconclusive)
    }

    /// `occ user:resetpassword` with the password from `OC_PASS`.
    pub fn user_resetpassword(
        &self,
        user_id: &str,
        password: &SecretSource,
        secrets: &dyn SecretStore,
    ) -> Result<String, OccError> {
        let spec = CommandSpec::new("user:resetpassword")
            .json(false)
            .flag("password-from-env")
            .env("OC_PASS", password.resolve(secrets)?)
            .arg(user_id);
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// `occ user:add-app-password`: returns the generated app password.
    ///
    /// occ prints a banner line first and the token on the second line.
    /// This subcommand reads `NC_PASS`, not `OC_PASS`.
    pub fn user_add_app_password(
        &self,
        user_id: &str,
        password: &SecretSource,
        secrets: &dyn SecretStore,
    ) -> Result<String, OccError> {
        let spec = CommandSpec::new("user:add-app-password")
            .json(false)
            .quiet()
            .flag("password-from-env")
            .env("NC_PASS", password.resolve(secrets)?)
            .arg(user_id);
        let outcome = self.occ(&spec)?;
        outcome
            .stdout
            .lines()
            .nth(1)
            .map(|line| line.trim().to_string())
            .ok_or_else(|| {
                OccError::interpretation("user:add-app-password token line", outcome.stdout.clone())
            })
    }

    /// A per-user setting, or the whole app/user listing when `key` or
    /// `app` is omitted. Single values come back as plain text, listings
    /// as structured output. Unset keys are `None`.
    pub fn user_setting_get(
        &self,
        user_id: &str,
        app: Option<&str>,
        key: Option<&str>,
    ) -> Result<Option<Value>, OccError> {
        let mut spec = CommandSpec::new("user:setting").json(key.is_none()).expect_error();
        spec = spec.arg(user_id);
        if let Some(app) = app {
            spec = spec.arg(app);
        }
        if let Some(key) = key {
            spec = spec.arg(key);
        }
        let outcome = self.occ(&spec)?;
        if !outcome.success() {
            return Ok(None);
        }
        match &outcome.parsed {
            Some(parsed) => Ok(Some(parsed.clone())),
            None => Ok(Some(Value::String(outcome.stdout_trimmed().to_string()))),
        }
    }

    /// `occ user:setting <uid> <app> <key> <value>`.
    pub fn user_setting_set(
        &self,
        user_id: &str,
        app: &str,
        key: &str,
        value: &str,
        update_only: bool,
    ) -> Result<String, OccError> {
        let spec = CommandSpec::new("user:setting")
            .json(false)
            .flag_if(update_only, "update-only")
            .args([user_id, app, key, value]);
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// `occ user:setting --delete`.
    pub fn user_setting_delete(
        &self,
        user_id: &str,
        app: &str,
        key: &str,
        error_if_not_exists: bool,
    ) -> Result<String, OccError> {
        let spec = CommandSpec::new("user:setting")
            .json(false)
            .flag("delete")
            .flag_if(error_if_not_exists, "error-if-not-exists")
            .args([user_id, app, key]);
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
