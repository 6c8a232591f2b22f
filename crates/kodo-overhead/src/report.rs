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

//! Overhead Report Generator.
//!
//! Drives one run: compute the overhead column, then for each class and
//! each `(buildername, symbol_size)` group render one plot, save it as an
//! image, and append it as a page of the combined document.

use crate::config::ReportConfig;
use crate::document::CombinedDocument;
use crate::error::{ReportError, Result};
use crate::grouping::{class_rows, group_rows, PlotClass};
use crate::metric::compute_overhead;
use crate::record::RecordTable;
use crate::render::{GroupPlot, PlotRenderer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Title of the combined document.
pub const DOCUMENT_TITLE: &str = "Kodo coding overhead";

/// What was produced for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Class of the group.
    pub class: PlotClass,
    /// Builder of the group.
    pub buildername: String,
    /// Symbol size of the group.
    pub symbol_size: u64,
    /// Records in the group.
    pub rows: usize,
    /// X-axis ticks of the plot.
    pub x_ticks: Vec<u64>,
    /// Legend labels of the plot.
    pub series: Vec<String>,
    /// Image written for the group.
    pub image: PathBuf,
}

/// Outcome of one report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    /// Records in the input table.
    pub records: usize,
    /// One entry per rendered group, in generation order.
    pub groups: Vec<GroupSummary>,
    /// Path of the combined document.
    pub combined_document: PathBuf,
    /// Pages in the combined document.
    pub pages: usize,
}

impl ReportSummary {
    /// Groups of one class.
    pub fn groups_of(&self, class: PlotClass) -> impl Iterator<Item = &GroupSummary> {
        self.groups.iter().filter(move |g| g.class == class)
    }
}

/// Generates the overhead report for a record table.
///
/// # Example
///
/// ```no_run
/// use kodo_overhead::config::{ReportConfig, SourceOptions};
/// use kodo_overhead::render::PlottersRenderer;
/// use kodo_overhead::report::OverheadReport;
/// use kodo_overhead::source::JsonFileSource;
///
/// let options = SourceOptions::from_jsonfile_arg("overhead.json");
/// let mut table = JsonFileSource::new().get_data(&options)?.unwrap_or_default();
/// let report = OverheadReport::new(ReportConfig::for_source(&options));
/// let summary = report.run(&mut table, &PlottersRenderer::default())?;
/// println!("{} pages", summary.pages);
/// # Ok::<(), kodo_overhead::ReportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OverheadReport {
    config: ReportConfig,
}

impl OverheadReport {
    /// Creates a generator with `config`.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Computes the overhead column of `table`, then renders the report.
    ///
    /// Nothing is written when the overhead computation fails.
    pub fn run<R: PlotRenderer>(&self, table: &mut RecordTable, renderer: &R) -> Result<ReportSummary> {
        compute_overhead(table)?;
        self.render(table, renderer)
    }

    /// Renders a table whose overhead column is already filled.
    pub fn render<R: PlotRenderer>(&self, table: &RecordTable, renderer: &R) -> Result<ReportSummary> {
        let config = &self.config;
        let root = config.output_root();
        fs::create_dir_all(root).map_err(|e| ReportError::io(root, e))?;

        let mut document = CombinedDocument::create(&config.combined_path(), DOCUMENT_TITLE)?;
        let mut groups = Vec::new();

        for class in PlotClass::ALL {
            let class_dir = config.class_dir(class);
            fs::create_dir_all(&class_dir).map_err(|e| ReportError::io(&class_dir, e))?;

            let rows = class_rows(table.records(), class);
            let class_groups = group_rows(class, &rows);
            info!(class = %class, records = rows.len(), groups = class_groups.len(), "plotting class");

            for group in &class_groups {
                let plot = GroupPlot::from_group(group)?;
                let image = config.image_path(class, &group.key.buildername);

                renderer.save_image(&plot, &image, config.format)?;
                let svg = renderer.render_svg(&plot)?;
                document.add_page(&plot.title, &svg)?;
                info!(image = %image.display(), "wrote plot");

                groups.push(GroupSummary {
                    class,
                    buildername: plot.key.buildername.clone(),
                    symbol_size: plot.key.symbol_size,
                    rows: plot.rows,
                    x_ticks: plot.x_ticks().to_vec(),
                    series: plot.series_labels(),
                    image,
                });
            }
        }

        let pages = document.page_count();
        let combined_document = document.close()?;
        info!(path = %combined_document.display(), pages, "wrote combined document");

        let summary = ReportSummary {
            generated_at: chrono::Utc::now().to_rfc3339(),
            records: table.len(),
            groups,
            combined_document,
            pages,
        };

        if let Some(path) = &config.summary_path {
            export_summary(&summary, path)?;
        }
        Ok(summary)
    }
}

/// Writes `summary` to `path` as pretty-printed JSON.
pub fn export_summary(summary: &ReportSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(|e| ReportError::json(path, e))?;
    fs::write(path, json).map_err(|e| ReportError::io(path, e))?;
    info!(path = %path.display(), "wrote run summary");
    Ok(())
}
