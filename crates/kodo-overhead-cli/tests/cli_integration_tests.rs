// Dweve Kodo Overhead - Benchmark overhead reporting
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI integration tests for plot-overhead.
//!
//! These runs either fail before rendering or never reach the datastore, so
//! they need neither fonts nor network access.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn plot_cmd() -> Command {
    Command::cargo_bin("plot-overhead").expect("Failed to find plot-overhead binary")
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    plot_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plot coding overhead of Kodo benchmarks"))
        .stdout(predicate::str::contains("--jsonfile"))
        .stdout(predicate::str::contains("--dense-subdir"));
}

#[test]
fn test_version_output() {
    plot_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("plot-overhead"));
}

// ===== Argument Validation Tests =====

#[test]
fn test_unsupported_format_rejected() {
    plot_cmd()
        .args(["--jsonfile", "bench.json", "--format", "eps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("eps"));
}

#[test]
fn test_unknown_window_rejected() {
    plot_cmd()
        .args(["--window", "fortnight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fortnight"));
}

// ===== Input Error Tests =====

#[test]
fn test_missing_jsonfile_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    plot_cmd()
        .arg("--jsonfile")
        .arg(&missing)
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: I/O error"))
        .stderr(predicate::str::contains("missing.json"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_malformed_jsonfile_fails() {
    let dir = tempfile::tempdir().unwrap();
    let bench = dir.path().join("bench.json");
    fs::write(&bench, "{\"testcase\": ").unwrap();

    plot_cmd()
        .arg("--jsonfile")
        .arg(&bench)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid benchmark data"));
}

#[test]
fn test_zero_coded_baseline_fails() {
    let dir = tempfile::tempdir().unwrap();
    let bench = dir.path().join("bench.json");
    let records = serde_json::json!([
        {"testcase": "FullRLNC", "benchmark": "decoder", "symbol_size": 100,
         "symbols": 16, "used": [4, 6], "coded": [0, 0]}
    ]);
    fs::write(&bench, records.to_string()).unwrap();

    plot_cmd()
        .arg("--jsonfile")
        .arg(&bench)
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("zero mean 'coded' baseline"))
        .stderr(predicate::str::contains("FullRLNC/decoder"));

    assert!(!dir.path().join("out").exists());
}
