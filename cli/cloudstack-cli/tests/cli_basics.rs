// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Basic CLI tests - help, version, argument errors

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use predicates::prelude::*;
use tempfile::TempDir;

use common::cloudstack_cmd;

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    cloudstack_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cloudstack"));
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    cloudstack_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("profile"))
        .stdout(predicate::str::contains("api"))
        .stdout(predicate::str::contains("vm"))
        .stdout(predicate::str::contains("job"));
}

#[test]
fn test_api_help() {
    let dir = TempDir::new().unwrap();
    cloudstack_cmd(dir.path())
        .args(["api", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KEY=VALUE"))
        .stdout(predicate::str::contains("--wait"));
}

#[test]
fn test_unknown_command_fails() {
    let dir = TempDir::new().unwrap();
    cloudstack_cmd(dir.path())
        .arg("frobnicate")
        .assert()
        .failure();
}

#[test]
fn test_missing_profile_is_reported() {
    let dir = TempDir::new().unwrap();
    cloudstack_cmd(dir.path())
        .args(["api", "listZones"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No profile configured"));
}

#[test]
fn test_malformed_parameter_is_reported() {
    let dir = TempDir::new().unwrap();
    cloudstack_cmd(dir.path())
        .args([
            "--url",
            "http://127.0.0.1:9/client/api",
            "--api-key",
            "key",
            "--secret-key",
            "secret",
            "api",
            "listZones",
            "nonsense",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn test_deploy_requires_a_zone() {
    let dir = TempDir::new().unwrap();
    cloudstack_cmd(dir.path())
        .args([
            "vm",
            "deploy",
            "--service-offering",
            "so-1",
            "--template",
            "tpl-1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--zone"));
}
