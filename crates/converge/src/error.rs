// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Convergence failures, including the import rollback protocol.

use nco_core::OccError;
use thiserror::Error;

/// Errors raised while converging state.
#[derive(Debug, Error)]
pub enum ConvergeError {
    /// The underlying occ call failed.
    #[error(transparent)]
    Occ(#[from] OccError),

    /// The pre-import consistency check already reports problems; an
    /// import on top of a broken configuration cannot be rolled back
    /// meaningfully.
    #[error(
        "occ reports problems in the current configuration; refusing to \
         import without force:\n{problems}"
    )]
    UnsafeToImport {
        /// The problems `occ check` listed, one per line.
        problems: String,
    },

    /// The import applied but broke the configuration, and the previous
    /// snapshot was restored.
    #[error(
        "the imported configuration failed the consistency check and was \
         reverted.{retained_note}\ncheck reported:\n{problems}",
        retained_note = retained_note(retained)
    )]
    ImportReverted {
        /// The problems `occ check` listed after the import.
        problems: String,
        /// App-scope keys the import added that the revert left in place.
        retained: Vec<String>,
    },

    /// The import broke the configuration and restoring the snapshot
    /// failed as well. The installation needs manual attention.
    #[error(
        "the imported configuration failed the consistency check and \
         reverting it failed too; manual repair needed.\ncheck reported:\n{problems}"
    )]
    RevertFailed {
        /// The problems `occ check` listed after the import.
        problems: String,
        /// What went wrong during the revert.
        #[source]
        source: OccError,
    },
}

fn retained_note(retained: &[String]) -> String {
    if retained.is_empty() {
        String::new()
    } else {
        format!(" Added app-scope settings were retained: {}.", retained.join(", "))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
