// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command rendering, observed at the runner boundary.

use crate::prelude::*;
use nco_core::CommandSpec;

fn render(spec: &CommandSpec) -> String {
    spec.render(&Settings::default())
}

#[test]
fn canonical_set_invocation_renders_in_occ_order() {
    let spec = CommandSpec::new("config:system:set")
        .json(false)
        .flag("update-only")
        .param("value", "hello world")
        .param("type", "string")
        .args(["redis", "timeout"]);
    assert_eq!(
        render(&spec),
        "php --define apc.enable_cli=1 ./occ config:system:set --update-only \
         --no-interaction --value 'hello world' --type string -- redis timeout"
    );
}

#[test]
fn structured_output_is_injected_not_passed() {
    let spec = CommandSpec::new("status");
    let line = render(&spec);
    assert!(line.ends_with("status --no-interaction --output json --"));
}

#[test]
fn apc_define_can_be_disabled_per_installation() {
    let spec = CommandSpec::new("status");
    let line = spec.render(&Settings::default().ensure_apc(false));
    assert!(line.starts_with("php ./occ status"));
}

#[yare::parameterized(
    bare_word    = { "simple", "--value simple" },
    number       = { "42", "--value 42" },
    whitespace   = { "hello world", "--value 'hello world'" },
    shell_meta   = { "a;b", "--value 'a;b'" },
    single_quote = { "it's", r"--value 'it'\''s'" },
    pre_quoted   = { r#""$NC_DB_PASS""#, r#"--value "$NC_DB_PASS""# },
)]
fn value_quoting(value: &str, expected: &str) {
    let spec = CommandSpec::new("config:system:set").json(false).param("value", value);
    assert!(render(&spec).contains(expected), "line: {}", render(&spec));
}

#[test]
fn single_dash_flags_pass_through_unnormalized() {
    let spec = CommandSpec::new("upgrade").json(false).flag("-vvv");
    assert!(render(&spec).contains("upgrade -vvv --no-interaction"));
}

#[test]
fn repeated_parameters_keep_their_order() {
    let spec = CommandSpec::new("app:enable")
        .json(false)
        .param("groups", "staff")
        .param("groups", "admin")
        .arg("calendar");
    let line = render(&spec);
    let staff = line.find("--groups staff").unwrap();
    let admin = line.find("--groups admin").unwrap();
    assert!(staff < admin);
}

#[test]
fn environment_overlay_never_reaches_the_argv() {
    let runner = FakeRunner::new().ok("user:add", "");
    let spec = CommandSpec::new("user:add")
        .json(false)
        .env("OC_PASS", "hunter2")
        .arg("carol");
    client(&runner).occ(&spec).unwrap();
    let call = &runner.calls()[0];
    assert!(!call.line.contains("hunter2"));
    assert_eq!(call.env.get("OC_PASS").map(String::as_str), Some("hunter2"));
}
