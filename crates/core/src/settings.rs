// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installation settings.
//!
//! One immutable value per managed installation, passed into the client at
//! construction time. There is deliberately no process-wide default state;
//! callers that need different targets build different settings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where and how to reach one Nextcloud installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory of the Nextcloud installation.
    pub webroot: PathBuf,
    /// Account that owns the webroot and runs `occ` (`www-data`, `apache`).
    pub webuser: String,
    /// Run `php` with `--define apc.enable_cli=1`.
    ///
    /// APCu is disabled on the CLI by default, which breaks occ on
    /// installations that enable it for the web. Setting this when APCu is
    /// not configured is harmless, so it defaults to true.
    pub ensure_apc: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webroot: PathBuf::from("/var/www/nextcloud"),
            webuser: "www-data".to_string(),
            ensure_apc: true,
        }
    }
}

impl Settings {
    /// Settings for an installation at `webroot` run by `webuser`.
    pub fn new(webroot: impl Into<PathBuf>, webuser: impl Into<String>) -> Self {
        Self { webroot: webroot.into(), webuser: webuser.into(), ..Self::default() }
    }

    /// Toggle the APCu CLI compatibility flag.
    pub fn ensure_apc(mut self, ensure: bool) -> Self {
        self.ensure_apc = ensure;
        self
    }

    /// Path of the `occ` entry point.
    pub fn entry_point(&self) -> PathBuf {
        self.webroot.join("occ")
    }

    /// Path of the bundled updater.
    pub fn updater(&self) -> PathBuf {
        self.webroot.join("updater").join("updater.phar")
    }

    /// Default data directory when none is configured explicitly.
    pub fn default_datadir(&self) -> PathBuf {
        self.webroot.join("data")
    }

    /// The webroot as a borrowed path.
    pub fn webroot(&self) -> &Path {
        &self.webroot
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
