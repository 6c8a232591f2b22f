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

//! End-to-end pipeline tests: benchmark file to combined document.
//!
//! Rendering goes through a stub renderer so the tests need no fonts.

use kodo_overhead::config::{DatabaseConfig, DateWindow, ImageFormat, ReportConfig, SourceOptions};
use kodo_overhead::document::PAGE_MARKER;
use kodo_overhead::{load_records, GroupPlot, OverheadReport, PlotClass, PlotRenderer, ReportError};
use std::fs;
use std::path::{Path, PathBuf};

struct StubRenderer;

impl PlotRenderer for StubRenderer {
    fn save_image(&self, plot: &GroupPlot, path: &Path, _format: ImageFormat) -> kodo_overhead::Result<()> {
        fs::write(path, &plot.title).map_err(|e| ReportError::io(path, e))
    }

    fn render_svg(&self, plot: &GroupPlot) -> kodo_overhead::Result<String> {
        Ok(format!("<svg data-ticks=\"{:?}\"></svg>", plot.x_ticks()))
    }
}

fn write_bench_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("overhead.json");
    fs::write(&path, content).unwrap();
    path
}

const RECORDS: &str = r#"[
  {"testcase": "SparseFullRLNC", "benchmark": "decoder", "symbol_size": 1600, "symbols": 16,
   "density": 0.5, "used": [11, 13], "coded": [10, 10]},
  {"testcase": "SparseFullRLNC", "benchmark": "decoder", "symbol_size": 1600, "symbols": 64,
   "density": 0.5, "used": [15], "coded": [10]},
  {"testcase": "SparseFullRLNC", "benchmark": "decoder", "symbol_size": 1600, "symbols": 32,
   "density": 0.25, "used": [12], "coded": [10]},
  {"testcase": "FullRLNC", "benchmark": "decoder", "symbol_size": 1600, "symbols": 16,
   "used": [10, 12], "coded": [5, 5]},
  {"testcase": "FullRLNC", "benchmark": "decoder", "symbol_size": 100, "symbols": 16,
   "used": [6], "coded": [5]}
]"#;

#[test]
fn test_local_file_report() {
    let dir = tempfile::tempdir().unwrap();
    let bench = write_bench_file(dir.path(), RECORDS);
    let out = dir.path().join("figures_local");

    let options = SourceOptions {
        jsonfile: Some(bench),
    };
    let mut table = load_records(&options, DatabaseConfig::default(), DateWindow::LastDay).unwrap();
    assert!(table.records().iter().all(|r| r.buildername == "local"));

    let config = ReportConfig::for_source(&options)
        .with_output_root(&out)
        .with_dense_subdir("dense")
        .with_format(ImageFormat::Svg);
    let summary = OverheadReport::new(config).run(&mut table, &StubRenderer).unwrap();

    // One sparse group (local, 1600), two dense groups (local, 100) and (local, 1600).
    assert_eq!(summary.pages, 3);
    assert_eq!(summary.groups_of(PlotClass::Sparse).count(), 1);
    assert_eq!(summary.groups_of(PlotClass::Dense).count(), 2);

    let sparse = summary.groups_of(PlotClass::Sparse).next().unwrap();
    assert_eq!(sparse.x_ticks, vec![16, 32, 64]);
    assert_eq!(
        sparse.series,
        vec!["(decoder, 0.25)".to_string(), "(decoder, 0.5)".to_string()]
    );

    assert!(out.join("sparse/local.svg").exists());
    assert!(out.join("dense/local.svg").exists());

    let html = fs::read_to_string(out.join("all.html")).unwrap();
    assert_eq!(html.matches(PAGE_MARKER).count(), 3);
    assert!(html.contains("data-ticks=\"[16, 32, 64]\""));

    let dense_overhead: Vec<f64> = table
        .records()
        .iter()
        .filter(|r| r.testcase == "FullRLNC" && r.symbol_size == 1600)
        .map(|r| r.overhead.unwrap())
        .collect();
    assert_eq!(dense_overhead.len(), 1);
    assert!((dense_overhead[0] - 1.2).abs() < 1e-12);
}

#[test]
fn test_zero_coded_baseline_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let bench = write_bench_file(
        dir.path(),
        r#"[{"testcase": "FullRLNC", "benchmark": "decoder", "symbol_size": 100,
             "symbols": 16, "used": [1, 2], "coded": [0, 0]},
            {"testcase": "FullRLNC", "benchmark": "encoder", "symbol_size": 100,
             "symbols": 16, "used": [3], "coded": [0]}]"#,
    );
    let options = SourceOptions {
        jsonfile: Some(bench),
    };
    let mut table = load_records(&options, DatabaseConfig::default(), DateWindow::LastDay).unwrap();

    let out = dir.path().join("out");
    let err = OverheadReport::new(ReportConfig::new(&out))
        .run(&mut table, &StubRenderer)
        .unwrap_err();

    assert!(matches!(err, ReportError::DegenerateBaseline { row: 0, .. }));
    assert!(!out.exists());
}

#[test]
fn test_column_layout_file() {
    let dir = tempfile::tempdir().unwrap();
    let bench = write_bench_file(
        dir.path(),
        r#"{
          "testcase": {"0": "FullRLNC", "1": "FullRLNC"},
          "benchmark": {"0": "decoder", "1": "decoder"},
          "symbol_size": {"0": 100, "1": 100},
          "symbols": {"0": 32, "1": 16},
          "used": {"0": [3], "1": [2]},
          "coded": {"0": [2], "1": [1]}
        }"#,
    );
    let options = SourceOptions {
        jsonfile: Some(bench),
    };
    let mut table = load_records(&options, DatabaseConfig::default(), DateWindow::LastDay).unwrap();
    let summary = OverheadReport::new(ReportConfig::new(dir.path().join("out")))
        .run(&mut table, &StubRenderer)
        .unwrap();

    assert_eq!(summary.pages, 1);
    assert_eq!(summary.groups[0].x_ticks, vec![16, 32]);
}
