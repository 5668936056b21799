// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Test helpers for cloudstack-cli integration tests

// Allow unused code - not every test file uses every helper
// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(dead_code, deprecated, clippy::expect_used)]

use std::path::Path;

use assert_cmd::Command;

/// Environment variables that would leak the developer's setup into tests
const CLOUDSTACK_ENV: &[&str] = &[
    "CLOUDSTACK_PROFILE",
    "CLOUDSTACK_URL",
    "CLOUDSTACK_API_KEY",
    "CLOUDSTACK_SECRET_KEY",
    "RUST_LOG",
];

/// A `cloudstack` command isolated in `config_dir`
pub fn cloudstack_cmd(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cloudstack").expect("Failed to find cloudstack binary");
    for var in CLOUDSTACK_ENV {
        cmd.env_remove(var);
    }
    cmd.env("CLOUDSTACK_CONFIG_DIR", config_dir);
    cmd
}

/// Run a command that must succeed and return its stdout
pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run cloudstack");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "Command should succeed.\nstdout: {}\nstderr: {}",
        stdout,
        stderr
    );
    stdout
}
