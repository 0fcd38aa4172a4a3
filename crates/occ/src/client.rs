// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The occ invoker.
//!
//! One [`OccClient`] per managed installation. Every call follows the same
//! path: pre-flight the entry point, render the command line, log it (unless
//! quiet), run it, classify the exit, parse structured output. Failure to
//! parse requested JSON is a hard error; occ changing its output format
//! is not something to paper over.

use crate::runner::{Invocation, OccRunner, SystemRunner};
use nco_core::{CommandSpec, ExecOutcome, OccError, RawOutput, Settings};

/// Client for one Nextcloud installation.
#[derive(Debug, Clone)]
pub struct OccClient<R = SystemRunner> {
    settings: Settings,
    runner: R,
}

impl OccClient<SystemRunner> {
    /// A client executing through the system `sudo`/`sh` path.
    pub fn system(settings: Settings) -> Self {
        Self::new(settings, SystemRunner)
    }
}

impl<R: OccRunner> OccClient<R> {
    pub fn new(settings: Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run one occ invocation described by `spec`.
    pub fn occ(&self, spec: &CommandSpec) -> Result<ExecOutcome, OccError> {
        if !self.runner.path_exists(&self.settings.entry_point()) {
            return Err(OccError::EntryPointMissing { webroot: self.settings.webroot.clone() });
        }

        let line = spec.render(&self.settings);
        if spec.quiet {
            tracing::trace!(subcommand = %spec.subcommand, "running occ (line suppressed)");
        } else {
            tracing::debug!(command = %line, "running occ");
        }

        let mut invocation = Invocation::new(line, &self.settings);
        invocation.env = spec.env.clone();
        invocation.stdin = spec.stdin.clone();
        invocation.quiet = spec.quiet;

        let raw = self.runner.run(&invocation)?;
        self.classify(spec, raw)
    }

    /// Run a raw shell line inside the webroot, outside the occ rendering
    /// path. Used for the bundled updater.
    pub(crate) fn run_line(&self, line: String) -> Result<RawOutput, OccError> {
        tracing::debug!(command = %line, "running");
        let invocation = Invocation::new(line, &self.settings);
        self.runner.run(&invocation)
    }

    fn classify(&self, spec: &CommandSpec, raw: RawOutput) -> Result<ExecOutcome, OccError> {
        if !raw.success() {
            if spec.expect_error {
                tracing::debug!(
                    subcommand = %spec.subcommand,
                    code = raw.code,
                    "occ exited nonzero (expected)"
                );
            } else if !spec.quiet {
                tracing::warn!(
                    subcommand = %spec.subcommand,
                    code = raw.code,
                    stderr = %raw.stderr.trim(),
                    "occ exited nonzero"
                );
            }
            if spec.raise_error {
                return Err(OccError::Execution {
                    command: spec.subcommand.clone(),
                    code: raw.code,
                    stdout: raw.stdout,
                    stderr: raw.stderr,
                });
            }
        }

        let mut outcome = ExecOutcome::from(raw);
        if outcome.success() && spec.json {
            let parsed = serde_json::from_str(outcome.stdout_trimmed()).map_err(|err| {
                OccError::interpretation(
                    format!("{} structured output: {err}", spec.subcommand),
                    outcome.stdout.clone(),
                )
            })?;
            outcome.parsed = Some(parsed);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
