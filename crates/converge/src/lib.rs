// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nco-converge: idempotent state convergence on top of the occ client.
//!
//! Every function here follows the same contract: read the current state,
//! compare it with the desired state, and either report a match, report
//! what an apply would change (dry run), or apply and report what changed.
//! A convergence function run twice in a row always reports a match the
//! second time.

pub mod account;
pub mod app;
pub mod config;
pub mod diff;
pub mod error;
pub mod outcome;
pub mod server;
pub mod twofactor;

pub use error::ConvergeError;
pub use outcome::{Changes, Convergence, Delta, Outcome};
