// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed operations, one module per occ subcommand family.
//!
//! Each module extends [`crate::OccClient`] with methods that build the
//! right [`nco_core::CommandSpec`], run it, and interpret the result.
//! Mutations return occ's stdout; reads return typed values.

pub mod app;
pub mod config;
pub mod group;
pub mod maintenance;
pub mod server;
pub mod twofactor;
pub mod user;
