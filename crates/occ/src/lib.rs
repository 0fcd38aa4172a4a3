// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nco-occ: the `occ` invoker and typed operations on top of it.
//!
//! [`OccClient`] renders [`nco_core::CommandSpec`]s, runs them through an
//! [`OccRunner`], classifies exits, and parses structured output. The
//! `ops` modules add one method per occ subcommand family: server
//! lifecycle, apps, config, users, groups, maintenance and two-factor
//! enforcement.
//!
//! Enable the `test-support` feature to get [`FakeRunner`], a scripted
//! runner that records invocations instead of spawning processes.

pub mod client;
pub mod interpret;
pub mod ops;
pub mod runner;

pub use client::OccClient;
pub use ops::app::{AppList, AppPresence};
pub use ops::server::{DatabaseConfig, DbKind, InstallSpec, ServerStatus};
pub use ops::twofactor::Enforcement;
pub use ops::user::UserAdd;
pub use runner::{Invocation, OccRunner, SystemRunner};

#[cfg(any(test, feature = "test-support"))]
pub use runner::FakeRunner;
