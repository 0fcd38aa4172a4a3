// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nco-core: shared data model for administering Nextcloud through `occ`.
//!
//! Everything in here is free of process execution: command descriptions,
//! captured outcomes, installation settings, value typing, secret sources
//! and the error taxonomy shared by the invoker and convergence crates.

pub mod macros;

pub mod error;
pub mod outcome;
pub mod secret;
pub mod settings;
pub mod spec;
pub mod value;
pub mod version;

pub use error::OccError;
pub use outcome::{ExecOutcome, Probe, RawOutput};
pub use secret::{SecretSource, SecretStore, StaticSecrets};
pub use settings::Settings;
pub use spec::CommandSpec;
pub use value::{render_scalar, ValueType};
pub use version::{pad_max_version, parse_version, FLOAT_IMPORT_FIX};
