// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Value typing for system settings.
//!
//! occ requires an explicit `--type` for non-string system settings; it
//! cannot infer types from JSON round-tripping in all cases (notably
//! floating point values in bulk import).

use crate::OccError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The value types accepted by `config:system:set --type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Integer,
    Double,
    Boolean,
}

crate::simple_display! {
    ValueType {
        String => "string",
        Integer => "integer",
        Double => "double",
        Boolean => "boolean",
    }
}

impl ValueType {
    /// Autodetect the type tag for a JSON scalar.
    pub fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(_) => ValueType::Boolean,
            serde_json::Value::Number(n) if n.is_f64() => ValueType::Double,
            serde_json::Value::Number(_) => ValueType::Integer,
            _ => ValueType::String,
        }
    }
}

impl FromStr for ValueType {
    type Err = OccError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(ValueType::String),
            "integer" => Ok(ValueType::Integer),
            "double" => Ok(ValueType::Double),
            "boolean" => Ok(ValueType::Boolean),
            other => Err(OccError::invocation(format!("value type '{other}' is invalid"))),
        }
    }
}

/// Render a JSON scalar the way occ expects it as a `--value` argument.
///
/// Strings render bare (occ does its own typing via `--type`); everything
/// else uses the JSON textual form.
pub fn render_scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
