// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server lifecycle: status, install, integrity check, upgrade.

use crate::client::OccClient;
use crate::interpret::{self, UpdateReport};
use crate::runner::OccRunner;
use nco_core::{
    pad_max_version, parse_version, CommandSpec, OccError, SecretSource, SecretStore, Settings,
};
use semver::Version;
use serde::Deserialize;
use std::path::PathBuf;

/// Parsed `occ status` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerStatus {
    pub installed: bool,
    /// Internal four-segment version (`24.0.1.1`).
    pub version: String,
    /// Public version string (`24.0.1`).
    pub versionstring: String,
    #[serde(default)]
    pub edition: String,
    #[serde(default)]
    pub maintenance: bool,
    #[serde(default, rename = "needsDbUpgrade")]
    pub needs_db_upgrade: bool,
}

/// Which database backend `maintenance:install` targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Sqlite,
    Mysql,
    Pgsql,
    Oci,
}

nco_core::simple_display! {
    DbKind {
        Sqlite => "sqlite",
        Mysql => "mysql",
        Pgsql => "pgsql",
        Oci => "oci",
    }
}

/// Database connection settings for a fresh install.
///
/// `name`, `host` and `user` fall back to occ's own conventions
/// (`nextcloud`, `localhost`, `nextcloud`). A password is mandatory for
/// every backend except SQLite.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub kind: DbKind,
    pub name: Option<String>,
    pub host: Option<String>,
    pub user: Option<String>,
    pub pass: Option<SecretSource>,
    /// Oracle only.
    pub table_space: Option<String>,
}

impl DatabaseConfig {
    pub fn sqlite() -> Self {
        Self::new(DbKind::Sqlite)
    }

    pub fn new(kind: DbKind) -> Self {
        Self { kind, name: None, host: None, user: None, pass: None, table_space: None }
    }
}

/// Everything `maintenance:install` needs.
#[derive(Debug, Clone)]
pub struct InstallSpec {
    pub database: DatabaseConfig,
    /// Admin account name; occ defaults to `admin`.
    pub admin_user: Option<String>,
    pub admin_pass: SecretSource,
    pub admin_email: Option<String>,
    /// Data directory; defaults to `<webroot>/data`.
    pub datadir: Option<PathBuf>,
}

impl InstallSpec {
    pub fn new(database: DatabaseConfig, admin_pass: SecretSource) -> Self {
        Self { database, admin_user: None, admin_pass, admin_email: None, datadir: None }
    }
}

impl<R: OccRunner> OccClient<R> {
    /// `occ status`, parsed.
    pub fn status(&self) -> Result<ServerStatus, OccError> {
        let outcome = self.occ(&CommandSpec::new("status"))?;
        let parsed = outcome.require_parsed("status")?;
        serde_json::from_value(parsed.clone())
            .map_err(|err| OccError::interpretation(format!("status payload: {err}"), outcome.stdout.clone()))
    }

    /// Whether the installation is finished. A failing `occ status` means
    /// not installed; only pre-flight and interpretation errors propagate.
    pub fn is_installed(&self) -> Result<bool, OccError> {
        match self.status() {
            Ok(status) => Ok(status.installed),
            Err(OccError::Execution { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// `occ check`: the list of environment problems, empty when clean.
    pub fn check(&self) -> Result<Vec<String>, OccError> {
        let outcome = self.occ(&CommandSpec::new("check").json(false).no_raise())?;
        if outcome.success() {
            return Ok(Vec::new());
        }
        let mut problems = interpret::enumerated_until_blank(&outcome.stdout);
        if problems.is_empty() {
            problems = interpret::enumerated_until_blank(&outcome.stderr);
        }
        Ok(problems)
    }

    /// The public server version, from `occ --version`.
    pub fn version(&self) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("--version").json(false))?;
        // "Nextcloud 24.0.1"
        outcome
            .stdout_trimmed()
            .split_whitespace()
            .nth(1)
            .map(str::to_string)
            .ok_or_else(|| OccError::interpretation("--version output", outcome.stdout.clone()))
    }

    /// The public server version, parsed for comparison.
    pub fn current_version(&self) -> Result<Version, OccError> {
        parse_version(&self.version()?)
    }

    /// Run `maintenance:install`. Refuses when already installed.
    ///
    /// Passwords travel through single-use environment variables
    /// (`NC_DB_PASS`, `NC_ADMIN_PASS`); the rendered line only carries the
    /// quoted variable references.
    pub fn install(
        &self,
        desired: &InstallSpec,
        secrets: &dyn SecretStore,
    ) -> Result<String, OccError> {
        if self.is_installed()? {
            return Err(OccError::invocation(
                "Nextcloud is already installed; refusing to run maintenance:install",
            ));
        }

        let db = &desired.database;
        let mut spec = CommandSpec::new("maintenance:install")
            .json(false)
            .quiet()
            .param("database", db.kind);

        if db.kind != DbKind::Sqlite {
            spec = spec
                .param("database-name", db.name.as_deref().unwrap_or("nextcloud"))
                .param("database-host", db.host.as_deref().unwrap_or("localhost"))
                .param("database-user", db.user.as_deref().unwrap_or("nextcloud"));
            let pass = db.pass.as_ref().ok_or_else(|| {
                OccError::invocation(format!("a database password is required for {}", db.kind))
            })?;
            spec = spec
                .param("database-pass", r#""$NC_DB_PASS""#)
                .env("NC_DB_PASS", pass.resolve(secrets)?);
        }
        if db.kind == DbKind::Oci {
            if let Some(table_space) = &db.table_space {
                spec = spec.param("database-table-space", table_space);
            }
        }

        if let Some(admin_user) = &desired.admin_user {
            spec = spec.param("admin-user", admin_user);
        }
        spec = spec
            .param("admin-pass", r#""$NC_ADMIN_PASS""#)
            .env("NC_ADMIN_PASS", desired.admin_pass.resolve(secrets)?);
        if let Some(admin_email) = &desired.admin_email {
            spec = spec.param("admin-email", admin_email);
        }
        let datadir = desired
            .datadir
            .clone()
            .unwrap_or_else(|| self.settings().default_datadir());
        spec = spec.param("data-dir", datadir.display());

        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// `occ upgrade`: migrate an already-updated code tree.
    pub fn finish_upgrade(&self) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("upgrade").json(false))?;
        Ok(outcome.stdout)
    }

    /// Run the bundled updater, then leave `occ upgrade` to the caller's
    /// next convergence run. Not an occ subcommand; the updater is its own
    /// phar next to the code tree.
    pub fn upgrade(&self, no_backup: bool) -> Result<String, OccError> {
        let updater = self.settings().updater();
        if !self.runner().path_exists(&updater) {
            return Err(OccError::invocation(format!(
                "could not find the updater at '{}'",
                updater.display()
            )));
        }

        let line = updater_line(self.settings(), no_backup);
        let raw = self.run_line(line)?;
        if !raw.success() {
            return Err(OccError::Execution {
                command: "updater.phar".to_string(),
                code: raw.code,
                stdout: raw.stdout,
                stderr: raw.stderr,
            });
        }
        Ok(raw.stdout)
    }

    /// `occ update:check`, parsed and cross-validated.
    pub fn update_check(&self) -> Result<UpdateReport, OccError> {
        let outcome = self.occ(&CommandSpec::new("update:check").json(false))?;
        interpret::parse_update_check(&outcome.stdout)
    }

    /// Whether no update applies, optionally capped at `max_version`.
    ///
    /// A partial bound like `24` is padded so point releases below it
    /// still count as pending; an available version above the bound makes
    /// the server up to date by definition.
    pub fn is_uptodate(&self, max_version: Option<&str>) -> Result<bool, OccError> {
        let report = self.update_check()?;
        let Some(available) = &report.server else {
            return Ok(true);
        };
        match max_version {
            None => Ok(false),
            Some(bound) => {
                let bound = parse_version(&pad_max_version(bound))?;
                Ok(parse_version(available)? > bound)
            }
        }
    }
}

/// The rendered updater line (relative to the webroot, like `./occ`).
fn updater_line(settings: &Settings, no_backup: bool) -> String {
    let mut tokens: Vec<&str> = vec!["php"];
    if settings.ensure_apc {
        tokens.push("--define");
        tokens.push("apc.enable_cli=1");
    }
    tokens.push("./updater/updater.phar");
    tokens.push("--no-interaction");
    if no_backup {
        tokens.push("--no-backup");
    }
    tokens.join(" ")
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
