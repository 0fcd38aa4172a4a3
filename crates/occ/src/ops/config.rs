// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration: system and app scopes, listing, bulk import.
//!
//! Nested system keys address their path as segments joined by a caller
//! chosen separator, so keys containing the default `:` stay reachable.
//! `config:import` takes the whole tree on stdin; on servers older than
//! 24.0.3 float values are split out and set individually afterwards
//! because the bulk importer rejected them (nextcloud/server#32468).

use crate::client::OccClient;
use crate::runner::OccRunner;
use nco_core::{render_scalar, CommandSpec, OccError, ValueType, FLOAT_IMPORT_FIX};
use serde_json::Value;

/// Separator used internally where key names must survive verbatim.
pub const SAFE_SEPARATOR: &str = "|||";

impl<R: OccRunner> OccClient<R> {
    /// `occ config:list <scope>`. Scope is `system`, `all`, or an app id.
    /// `private` includes sensitive values, which a faithful diff needs.
    pub fn config_list(&self, scope: &str, private: bool) -> Result<Value, OccError> {
        let spec = CommandSpec::new("config:list").flag_if(private, "private").arg(scope);
        let outcome = self.occ(&spec)?;
        Ok(outcome.require_parsed("config:list")?.clone())
    }

    /// A system value, or `None` when the key is unset.
    pub fn config_system_get(
        &self,
        name: &str,
        separator: &str,
    ) -> Result<Option<Value>, OccError> {
        let spec = CommandSpec::new("config:system:get")
            .args(split_key(name, separator))
            .expect_error();
        let outcome = self.occ(&spec)?;
        if outcome.success() {
            Ok(Some(outcome.require_parsed("config:system:get")?.clone()))
        } else {
            Ok(None)
        }
    }

    /// `occ config:system:set`.
    pub fn config_system_set(
        &self,
        name: &str,
        value: &Value,
        vtype: ValueType,
        update_only: bool,
        separator: &str,
    ) -> Result<String, OccError> {
        let spec = CommandSpec::new("config:system:set")
            .json(false)
            .flag_if(update_only, "update-only")
            .param("value", render_scalar(value))
            .param("type", vtype)
            .args(split_key(name, separator));
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// `occ config:system:delete`.
    pub fn config_system_delete(
        &self,
        name: &str,
        error_if_not_exists: bool,
        separator: &str,
    ) -> Result<String, OccError> {
        let spec = CommandSpec::new("config:system:delete")
            .json(false)
            .flag_if(error_if_not_exists, "error-if-not-exists")
            .args(split_key(name, separator));
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// An app value, or `None` when the key is unset.
    pub fn config_app_get(&self, app: &str, name: &str) -> Result<Option<Value>, OccError> {
        let spec = CommandSpec::new("config:app:get").arg(app).arg(name).expect_error();
        let outcome = self.occ(&spec)?;
        if outcome.success() {
            Ok(Some(outcome.require_parsed("config:app:get")?.clone()))
        } else {
            Ok(None)
        }
    }

    /// `occ config:app:set`. Booleans are stored as occ's `yes`/`no`
    /// convention; everything else is rendered as its scalar text.
    pub fn config_app_set(
        &self,
        app: &str,
        name: &str,
        value: &Value,
        update_only: bool,
    ) -> Result<String, OccError> {
        let rendered = match value {
            Value::Bool(true) => "yes".to_string(),
            Value::Bool(false) => "no".to_string(),
            other => render_scalar(other),
        };
        let spec = CommandSpec::new("config:app:set")
            .json(false)
            .flag_if(update_only, "update-only")
            .param("value", rendered)
            .arg(app)
            .arg(name);
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// `occ config:app:delete`.
    pub fn config_app_delete(
        &self,
        app: &str,
        name: &str,
        error_if_not_exists: bool,
    ) -> Result<String, OccError> {
        let spec = CommandSpec::new("config:app:delete")
            .json(false)
            .flag_if(error_if_not_exists, "error-if-not-exists")
            .arg(app)
            .arg(name);
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// Import a config file readable by the webserver user.
    pub fn config_import_file(&self, path: &std::path::Path) -> Result<String, OccError> {
        let spec = CommandSpec::new("config:import").json(false).arg(path.display().to_string());
        let outcome = self.occ(&spec)?;
        Ok(outcome.stdout)
    }

    /// Import a config tree over stdin.
    ///
    /// Below [`FLOAT_IMPORT_FIX`], float leaves are removed from the bulk
    /// payload and applied individually after the import, so the rest of
    /// the tree lands even on affected servers. App-scope floats can only
    /// be set one level deep; deeper ones are rejected up front.
    pub fn config_import_tree(&self, tree: &Value) -> Result<String, OccError> {
        let mut payload = tree.clone();
        let mut doubles = Vec::new();
        if self.current_version()? < FLOAT_IMPORT_FIX {
            doubles = extract_doubles(&mut payload);
            // Every extracted float must be settable afterwards, or the
            // whole call refuses before anything is imported.
            for (path, _) in &doubles {
                match path.first().map(String::as_str) {
                    Some("system") => {}
                    Some("apps") if path.len() == 3 => {}
                    Some("apps") => {
                        return Err(OccError::invocation(format!(
                            "cannot set the app-scope float '{}' individually; \
                             floats under 'apps' must be exactly one level deep \
                             on servers older than {FLOAT_IMPORT_FIX}",
                            path.join("/")
                        )));
                    }
                    _ => {
                        return Err(OccError::invocation(format!(
                            "float '{}' sits outside the system and apps scopes",
                            path.join("/")
                        )));
                    }
                }
            }
        }

        let body = serde_json::to_string(&payload)
            .map_err(|err| OccError::invocation(format!("unserializable config tree: {err}")))?;
        let spec = CommandSpec::new("config:import").json(false).stdin(body);
        let outcome = self.occ(&spec)?;

        for (path, value) in &doubles {
            let value = Value::from(*value);
            if path.first().map(String::as_str) == Some("system") {
                let key = path[1..].join(SAFE_SEPARATOR);
                self.config_system_set(&key, &value, ValueType::Double, false, SAFE_SEPARATOR)?;
            } else {
                self.config_app_set(&path[1], &path[2], &value, false)?;
            }
        }
        Ok(outcome.stdout)
    }
}

fn split_key(name: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return vec![name.to_string()];
    }
    name.split(separator).map(str::to_string).collect()
}

/// Remove every float leaf from `tree`, returning their paths and values.
/// Floats inside arrays stay put; the importer bug only bit object values.
fn extract_doubles(tree: &mut Value) -> Vec<(Vec<String>, f64)> {
    let mut found = Vec::new();
    walk_doubles(tree, &mut Vec::new(), &mut found);
    found
}

fn walk_doubles(node: &mut Value, path: &mut Vec<String>, found: &mut Vec<(Vec<String>, f64)>) {
    let Value::Object(map) = node else { return };
    let float_keys: Vec<String> = map
        .iter()
        .filter(|(_, value)| value.as_f64().is_some() && !value.is_i64() && !value.is_u64())
        .map(|(key, _)| key.clone())
        .collect();
    for key in float_keys {
        if let Some(Value::Number(number)) = map.remove(&key) {
            if let Some(float) = number.as_f64() {
                let mut leaf = path.clone();
                leaf.push(key);
                found.push((leaf, float));
            }
        }
    }
    for (key, child) in map.iter_mut() {
        path.push(key.clone());
        walk_doubles(child, path, found);
        path.pop();
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
