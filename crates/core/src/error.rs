// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared by the invoker and the convergence engine.
//!
//! Categories follow the failure surface of the external tool:
//! invocation errors are caught before any subprocess runs, execution
//! errors are nonzero exits, interpretation errors mean occ's output no
//! longer matches our assumptions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, running or interpreting `occ` commands.
#[derive(Debug, Error)]
pub enum OccError {
    /// Malformed call detected before any subprocess ran.
    #[error("invalid invocation: {0}")]
    Invocation(String),

    /// A named secret could not be resolved.
    #[error("secret '{0}' could not be looked up")]
    MissingSecret(String),

    /// The management entry point is missing from the webroot.
    #[error("'occ' does not exist. Is Nextcloud installed in '{}'?", webroot.display())]
    EntryPointMissing {
        /// The installation root that was probed.
        webroot: PathBuf,
    },

    /// The external tool exited nonzero when failure was not declared expected.
    #[error("failed running occ {command}.\nstderr: {stderr}\nstdout: {stdout}")]
    Execution {
        /// The occ subcommand that was invoked.
        command: String,
        /// Raw exit code.
        code: i32,
        /// Captured standard output, verbatim.
        stdout: String,
        /// Captured standard error, verbatim.
        stderr: String,
    },

    /// occ's output no longer matches the assumptions baked into this crate.
    #[error("failed interpreting occ output ({context}). Output was:\n{output}")]
    Interpretation {
        /// What was being parsed when the mismatch surfaced.
        context: String,
        /// The offending output, verbatim.
        output: String,
    },

    /// The sentinel member used by the group existence probe removed real
    /// data. This is an invariant violation, not a recoverable condition.
    #[error(
        "did someone actually create a user named '{sentinel}' and add it to \
         group '{group}'? It has been removed from that group now"
    )]
    SentinelCollision {
        /// The group that was probed.
        group: String,
        /// The sentinel user id that collided.
        sentinel: String,
    },

    /// Spawning or talking to the subprocess failed at the OS level.
    #[error("subprocess error: {0}")]
    Io(#[from] std::io::Error),
}

impl OccError {
    /// Shorthand for an invocation error.
    pub fn invocation(msg: impl Into<String>) -> Self {
        OccError::Invocation(msg.into())
    }

    /// Shorthand for an interpretation error.
    pub fn interpretation(context: impl Into<String>, output: impl Into<String>) -> Self {
        OccError::Interpretation { context: context.into(), output: output.into() }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
