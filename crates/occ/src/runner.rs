// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution behind a trait.
//!
//! The client never spawns processes itself; it hands a fully rendered
//! [`Invocation`] to an [`OccRunner`]. [`SystemRunner`] executes it through
//! `sudo` as the webserver user. [`FakeRunner`] (tests, `test-support`)
//! replays scripted output and records every invocation.

use indexmap::IndexMap;
use nco_core::{OccError, RawOutput, Settings};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// One rendered command, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The full shell line (`php ... ./occ ...`).
    pub line: String,
    /// Working directory; the webroot, since the line references `./occ`.
    pub cwd: PathBuf,
    /// Account to run as.
    pub run_as: String,
    /// Environment overlay merged over the ambient environment.
    pub env: IndexMap<String, String>,
    /// Literal stdin payload.
    pub stdin: Option<String>,
    /// Suppress logging for this invocation.
    pub quiet: bool,
}

impl Invocation {
    /// An invocation of `line` inside `settings`'s webroot.
    pub fn new(line: impl Into<String>, settings: &Settings) -> Self {
        Self {
            line: line.into(),
            cwd: settings.webroot.clone(),
            run_as: settings.webuser.clone(),
            env: IndexMap::new(),
            stdin: None,
            quiet: false,
        }
    }
}

/// Executes invocations and answers pre-flight filesystem probes.
pub trait OccRunner {
    /// Run the invocation to completion and capture its output.
    fn run(&self, invocation: &Invocation) -> Result<RawOutput, OccError>;

    /// Pre-flight probe for the entry point and the updater. Fakes short
    /// this out so tests never touch the filesystem.
    fn path_exists(&self, path: &Path) -> bool;
}

/// Runs invocations through `sudo -u <webuser> -- sh -c '<line>'`.
///
/// occ refuses to run as root and must run as the account owning the
/// webroot, so every call goes through sudo regardless of the calling
/// process's own identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl OccRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<RawOutput, OccError> {
        let mut command = Command::new("sudo");
        command
            .arg("-u")
            .arg(&invocation.run_as)
            .arg("--")
            .arg("sh")
            .arg("-c")
            .arg(&invocation.line)
            .current_dir(&invocation.cwd)
            .envs(&invocation.env)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if invocation.stdin.is_some() { Stdio::piped() } else { Stdio::null() });

        let mut child = command.spawn()?;
        if let Some(payload) = &invocation.stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(payload.as_bytes())?;
            }
        }
        let output = child.wait_with_output()?;

        Ok(RawOutput {
            // Killed by signal; no exit code to report.
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRunner;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{Invocation, OccRunner};
    use nco_core::{OccError, RawOutput};
    use std::path::Path;
    use std::sync::{Arc, Mutex, MutexGuard};

    struct Script {
        needle: String,
        output: RawOutput,
        consumed: bool,
    }

    #[derive(Default)]
    struct State {
        scripts: Vec<Script>,
        calls: Vec<Invocation>,
        paths_missing: bool,
    }

    /// Scripted runner for tests.
    ///
    /// Responses are registered against a substring of the rendered line.
    /// Each invocation consumes the first unconsumed matching script; when
    /// all matching scripts are spent, the last one is replayed. That lets
    /// a test script the same subcommand with different outcomes in
    /// sequence (a clean `check` before an import, a failing one after)
    /// while idempotent reads stay scriptable once.
    #[derive(Clone, Default)]
    pub struct FakeRunner {
        state: Arc<Mutex<State>>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self::default()
        }

        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        /// Script a response for lines containing `needle`.
        pub fn on(self, needle: impl Into<String>, output: RawOutput) -> Self {
            self.lock().scripts.push(Script {
                needle: needle.into(),
                output,
                consumed: false,
            });
            self
        }

        /// Script a zero-exit response with the given stdout.
        pub fn ok(self, needle: impl Into<String>, stdout: impl Into<String>) -> Self {
            self.on(needle, RawOutput { code: 0, stdout: stdout.into(), stderr: String::new() })
        }

        /// Script a nonzero exit.
        pub fn fail(
            self,
            needle: impl Into<String>,
            code: i32,
            stdout: impl Into<String>,
            stderr: impl Into<String>,
        ) -> Self {
            self.on(
                needle,
                RawOutput { code, stdout: stdout.into(), stderr: stderr.into() },
            )
        }

        /// Every invocation seen so far, in order.
        pub fn calls(&self) -> Vec<Invocation> {
            self.lock().calls.clone()
        }

        /// The rendered lines of every invocation seen so far.
        pub fn lines(&self) -> Vec<String> {
            self.lock().calls.iter().map(|call| call.line.clone()).collect()
        }

        pub fn call_count(&self) -> usize {
            self.lock().calls.len()
        }

        /// Lines that match `needle`.
        pub fn lines_matching(&self, needle: &str) -> Vec<String> {
            self.lines().into_iter().filter(|line| line.contains(needle)).collect()
        }

        /// Make every pre-flight path probe fail, simulating an
        /// uninstalled webroot.
        pub fn without_paths(self) -> Self {
            self.lock().paths_missing = true;
            self
        }
    }

    impl OccRunner for FakeRunner {
        fn run(&self, invocation: &Invocation) -> Result<RawOutput, OccError> {
            let mut state = self.lock();
            state.calls.push(invocation.clone());

            let matching: Vec<usize> = state
                .scripts
                .iter()
                .enumerate()
                .filter(|(_, script)| invocation.line.contains(&script.needle))
                .map(|(index, _)| index)
                .collect();
            let chosen = matching
                .iter()
                .copied()
                .find(|&index| !state.scripts[index].consumed)
                .or_else(|| matching.last().copied());

            match chosen {
                Some(index) => {
                    state.scripts[index].consumed = true;
                    Ok(state.scripts[index].output.clone())
                }
                None => Ok(RawOutput {
                    code: 127,
                    stdout: String::new(),
                    stderr: format!("FakeRunner: no scripted response for: {}", invocation.line),
                }),
            }
        }

        fn path_exists(&self, _path: &Path) -> bool {
            !self.lock().paths_missing
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
