// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secret material and its lookup.
//!
//! Secrets reach occ through single-use environment variables, never
//! through the argv or the logs. A [`SecretSource`] is either the value
//! itself or the name of a key in an external [`SecretStore`]; a missing
//! key is always a hard failure, never a silent default.

use crate::OccError;
use std::collections::HashMap;
use std::fmt;

/// External key-value lookup for secret material.
pub trait SecretStore {
    /// Look up a named secret. `None` means the key is unset.
    fn get(&self, name: &str) -> Option<String>;
}

/// Where a secret comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// The secret itself, supplied inline.
    Literal(String),
    /// The name of a key to resolve through the store.
    Lookup(String),
}

impl SecretSource {
    pub fn literal(value: impl Into<String>) -> Self {
        SecretSource::Literal(value.into())
    }

    pub fn lookup(name: impl Into<String>) -> Self {
        SecretSource::Lookup(name.into())
    }

    /// Resolve to the secret value.
    pub fn resolve(&self, store: &dyn SecretStore) -> Result<String, OccError> {
        match self {
            SecretSource::Literal(value) => Ok(value.clone()),
            SecretSource::Lookup(name) => {
                store.get(name).ok_or_else(|| OccError::MissingSecret(name.clone()))
            }
        }
    }
}

// Literal secrets must not leak through Debug output.
impl fmt::Debug for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::Literal(_) => f.write_str("SecretSource::Literal(<redacted>)"),
            SecretSource::Lookup(name) => write!(f, "SecretSource::Lookup({name:?})"),
        }
    }
}

/// In-memory store for tests and embedding callers.
#[derive(Debug, Clone, Default)]
pub struct StaticSecrets {
    entries: HashMap<String, String>,
}

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }
}

impl SecretStore for StaticSecrets {
    fn get(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }
}

#[cfg(test)]
#[path = "secret_tests.rs"]
mod tests;
