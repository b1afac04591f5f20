// Copyright (c) 2025 Jetgen
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn jetgen() -> Command {
    Command::cargo_bin("jetgen").unwrap()
}

fn write_config(dir: &std::path::Path) -> String {
    let path = dir.join("app.toml");
    fs::write(
        &path,
        r#"
[package]
app-type = "plain"
main-class = "com.example.Main"
output-name = "App"

[toolchain]
target-os = "linux"
"#,
    )
    .unwrap();

    path.to_string_lossy().into_owned()
}

#[test]
fn no_arguments_prints_help() {
    jetgen()
        .assert()
        .success()
        .stdout(predicate::str::contains("Jetgen"));
}

#[test]
fn unknown_action_prints_help() {
    jetgen()
        .arg("frobnicate")
        .assert()
        .success()
        .stdout(predicate::str::contains("jetgen prj my.toml"));
}

#[test]
fn prj_without_config_fails() {
    jetgen()
        .arg("prj")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No toml file provided"));
}

#[test]
fn prj_writes_project_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path());

    jetgen()
        .args(["prj", config_path.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project file written to"));

    let content = fs::read_to_string(dir.path().join(".jetgen/build/App.prj")).unwrap();
    assert!(content.starts_with("-main=com.example.Main\n"));
}

#[test]
fn args_prints_plain_command_line() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path());

    jetgen()
        .args(["args", config_path.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("-main=com.example.Main"))
        .stdout(predicate::str::contains("\n-jetvmprop="))
        .stdout(predicate::str::contains("%-jetvmprop").not());
}
