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

//! Command-line arguments and the report run they drive.

use clap::Parser;
use kodo_overhead::config::{DatabaseConfig, DateWindow, ImageFormat, ReportConfig, SourceOptions};
use kodo_overhead::{load_records, OverheadReport, PlottersRenderer, Result};
use std::path::PathBuf;

/// Plot coding overhead of Kodo benchmarks
///
/// Loads benchmark results from a local benchmark file or, when none is
/// given, from yesterday's nightly runs in the shared datastore. Writes one
/// plot per builder and symbol size plus a combined document with every plot.
///
/// # Examples
///
/// ```bash
/// # Plot a local benchmark run
/// plot-overhead --jsonfile overhead.json --format svg
///
/// # Plot last night's results into a separate dense directory
/// plot-overhead --dense-subdir dense
/// ```
#[derive(Parser, Debug)]
#[command(name = "plot-overhead")]
#[command(author, version, about = "Plot coding overhead of Kodo benchmarks", long_about = None)]
pub struct Cli {
    /// The .json file generated by the benchmark; if none is provided, plots
    /// are based on data from the database
    #[arg(long, value_name = "FILE", default_value = "")]
    pub jsonfile: String,

    /// Image format of the per-group plots (svg, png, jpg, bmp)
    #[arg(short, long, default_value = "png", value_parser = parse_format)]
    pub format: ImageFormat,

    /// Output directory (defaults to figures_local or figures_database)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Subdirectory receiving dense-class plots
    #[arg(long, value_name = "NAME")]
    pub dense_subdir: Option<String>,

    /// Datastore time window (last-day, since-yesterday)
    #[arg(long, default_value = "last-day")]
    pub window: DateWindow,

    /// Also write a JSON summary of the run to this path
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,

    /// Plot width in pixels
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = 768)]
    pub height: u32,
}

fn parse_format(value: &str) -> std::result::Result<ImageFormat, String> {
    ImageFormat::from_extension(value).map_err(|e| e.to_string())
}

impl Cli {
    /// Report configuration derived from the arguments.
    pub fn report_config(&self, options: &SourceOptions) -> ReportConfig {
        let mut config = ReportConfig::for_source(options)
            .with_format(self.format)
            .with_plot_size(self.width, self.height);
        if let Some(dir) = &self.output_dir {
            config = config.with_output_root(dir);
        }
        if let Some(subdir) = &self.dense_subdir {
            config = config.with_dense_subdir(subdir);
        }
        if let Some(path) = &self.summary {
            config = config.with_summary_path(path);
        }
        config
    }

    /// Loads the records and writes the report.
    pub fn execute(self) -> Result<()> {
        let options = SourceOptions::from_jsonfile_arg(&self.jsonfile);
        let mut table = load_records(&options, DatabaseConfig::default(), self.window)?;

        let config = self.report_config(&options);
        let renderer = PlottersRenderer::new(config.plot_size);
        let summary = OverheadReport::new(config).run(&mut table, &renderer)?;

        println!(
            "Plotted {} groups from {} records into {}",
            summary.pages,
            summary.records,
            summary.combined_document.display()
        );
        Ok(())
    }
}
