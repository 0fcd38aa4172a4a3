// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured description of one `occ` invocation and its rendering.
//!
//! A [`CommandSpec`] is built per call and rendered into the exact command
//! line the runner executes:
//!
//! ```text
//! php [--define apc.enable_cli=1] ./occ <subcommand> [--flag]* [--param value]* -- [arg]*
//! ```
//!
//! Parameter order is preserved and duplicates are legal; repeated
//! parameters like `--group` carry list semantics on the occ side.

use crate::Settings;
use indexmap::IndexMap;

/// One fully described `occ` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    /// The occ sub-command (`status`, `config:system:set`, ...).
    pub subcommand: String,
    /// Positional arguments, placed after the `--` separator.
    pub arguments: Vec<String>,
    /// Ordered `(name, value)` parameter pairs. Duplicates preserved.
    pub parameters: Vec<(String, String)>,
    /// Flags, stored unnormalized; `render` prefixes `--` unless the flag
    /// is already hyphen-prefixed (`-vvv` passes through).
    pub flags: Vec<String>,
    /// Environment overlay merged over the ambient environment at run time.
    /// Used to hand secrets to occ without them appearing in the argv.
    pub env: IndexMap<String, String>,
    /// Literal stdin payload.
    pub stdin: Option<String>,
    /// Request structured output (`--output json`) and parse stdout.
    pub json: bool,
    /// Treat a nonzero exit as an error.
    pub raise_error: bool,
    /// A nonzero exit is expected (existence-probe idiom); implies
    /// `raise_error = false` and downgrades failure logging.
    pub expect_error: bool,
    /// Suppress command logging entirely (secret-adjacent invocations).
    pub quiet: bool,
}

impl CommandSpec {
    /// A spec for `subcommand` with structured output requested and
    /// error raising enabled.
    pub fn new(subcommand: impl Into<String>) -> Self {
        Self {
            subcommand: subcommand.into(),
            json: true,
            raise_error: true,
            ..Self::default()
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    /// Append several positional arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a `--name value` parameter. May be repeated.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.push((name.into(), value.to_string()));
        self
    }

    /// Append a flag.
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Append a flag only when `condition` holds.
    pub fn flag_if(self, condition: bool, flag: impl Into<String>) -> Self {
        if condition {
            self.flag(flag)
        } else {
            self
        }
    }

    /// Set an environment variable for this invocation only.
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Provide a stdin payload.
    pub fn stdin(mut self, payload: impl Into<String>) -> Self {
        self.stdin = Some(payload.into());
        self
    }

    /// Toggle the structured-output request.
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Declare a nonzero exit expected. Disables error raising and
    /// downgrades failure logging to debug.
    pub fn expect_error(mut self) -> Self {
        self.expect_error = true;
        self.raise_error = false;
        self
    }

    /// Disable error raising without marking failure expected.
    pub fn no_raise(mut self) -> Self {
        self.raise_error = false;
        self
    }

    /// Suppress command logging (used around secret material).
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Render the full command line for this spec.
    ///
    /// `--no-interaction` is always appended, and `--output json` is
    /// injected when structured output is requested so callers never pass
    /// it themselves.
    pub fn render(&self, settings: &Settings) -> String {
        let mut tokens: Vec<String> = vec!["php".to_string()];

        if settings.ensure_apc {
            tokens.push("--define".to_string());
            tokens.push("apc.enable_cli=1".to_string());
        }

        tokens.push("./occ".to_string());
        tokens.push(self.subcommand.clone());

        for flag in &self.flags {
            tokens.push(normalize_flag(flag));
        }
        tokens.push("--no-interaction".to_string());

        for (name, value) in &self.parameters {
            tokens.push(format!("--{name}"));
            tokens.push(quote_value(value));
        }
        if self.json {
            tokens.push("--output".to_string());
            tokens.push("json".to_string());
        }

        tokens.push("--".to_string());
        tokens.extend(self.arguments.iter().cloned());

        tokens.join(" ")
    }
}

/// Canonicalize a flag to its double-dash form. Already hyphen-prefixed
/// flags (single-dash verbosity like `-vvv`) pass through unchanged.
fn normalize_flag(flag: &str) -> String {
    if flag.starts_with('-') {
        flag.to_string()
    } else {
        format!("--{flag}")
    }
}

/// Quote a parameter value for the rendered line.
///
/// Values already quoted by the caller pass through verbatim: that is the
/// convention for env-var indirection like `"$NC_DB_PASS"`, which must
/// reach the shell with its double quotes intact. Bare words and numbers
/// stay unquoted; anything containing whitespace or shell metacharacters
/// is single-quoted.
fn quote_value(value: &str) -> String {
    if value.starts_with('"') || value.starts_with('\'') {
        return value.to_string();
    }
    if value.is_empty() {
        return "''".to_string();
    }
    if value.chars().any(needs_quoting) {
        return format!("'{}'", value.replace('\'', r"'\''"));
    }
    value.to_string()
}

fn needs_quoting(c: char) -> bool {
    c.is_whitespace() || "\"'\\$`&|;<>()[]{}*?!#~".contains(c)
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
