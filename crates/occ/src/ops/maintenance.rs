// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maintenance and database housekeeping subcommands.

use crate::client::OccClient;
use crate::interpret;
use crate::runner::OccRunner;
use nco_core::{CommandSpec, OccError};

impl<R: OccRunner> OccClient<R> {
    /// Switch maintenance mode on or off.
    pub fn maintenance_mode(&self, enabled: bool) -> Result<String, OccError> {
        let spec = CommandSpec::new("maintenance:mode")
            .json(false)
            .flag(if enabled { "on" } else { "off" });
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// Whether maintenance mode is currently on.
    pub fn is_maintenance(&self) -> Result<bool, OccError> {
        let outcome = self.occ(&CommandSpec::new("maintenance:mode").json(false))?;
        Ok(interpret::contains_marker(&outcome.stdout, "is currently enabled"))
    }

    /// `occ maintenance:repair`.
    pub fn maintenance_repair(&self, include_expensive: bool) -> Result<String, OccError> {
        let spec = CommandSpec::new("maintenance:repair")
            .json(false)
            .flag_if(include_expensive, "include-expensive");
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// `occ maintenance:data-fingerprint`: tell clients the data changed
    /// under them (after a backup restore).
    pub fn maintenance_data_fingerprint(&self) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("maintenance:data-fingerprint").json(false))?;
        Ok(outcome.stdout)
    }

    /// `occ maintenance:update:htaccess`.
    pub fn maintenance_update_htaccess(&self) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("maintenance:update:htaccess").json(false))?;
        Ok(outcome.stdout)
    }

    /// `occ maintenance:mimetype:update-db`.
    pub fn maintenance_mimetype_update_db(
        &self,
        repair_filecache: bool,
    ) -> Result<String, OccError> {
        let spec = CommandSpec::new("maintenance:mimetype:update-db")
            .json(false)
            .flag_if(repair_filecache, "repair-filecache");
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// `occ maintenance:mimetype:update-js`.
    pub fn maintenance_mimetype_update_js(&self) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("maintenance:mimetype:update-js").json(false))?;
        Ok(outcome.stdout)
    }

    /// `occ db:add-missing-indices`.
    pub fn db_add_missing_indices(&self) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("db:add-missing-indices").json(false))?;
        Ok(outcome.stdout)
    }

    /// `occ db:add-missing-columns`.
    pub fn db_add_missing_columns(&self) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("db:add-missing-columns").json(false))?;
        Ok(outcome.stdout)
    }

    /// `occ db:add-missing-primary-keys`.
    pub fn db_add_missing_primary_keys(&self) -> Result<String, OccError> {
        let outcome = self.occ(&CommandSpec::new("db:add-missing-primary-keys").json(false))?;
        Ok(outcome.stdout)
    }
}

#[cfg(test)]
#[path = "maintenance_tests.rs"]
mod tests;
