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

//! Kodo Overhead Reports
//!
//! Turns Kodo coding-overhead benchmark results into comparison plots.
//!
//! ## Pipeline
//!
//! 1. **Resolve** the record source: a local benchmark file when one is
//!    given, otherwise the shared nightly datastore ([`source`]).
//! 2. **Score** every record with its relative overhead,
//!    `(mean(used) - mean(coded)) / mean(coded)` ([`metric`]).
//! 3. **Group** records into the sparse and dense classes, then by
//!    `(buildername, symbol_size)` ([`grouping`]).
//! 4. **Plot** each group to an image and to one page of the combined
//!    document ([`render`], [`document`], [`report`]).
//!
//! ## Usage
//!
//! ```bash
//! plot-overhead --jsonfile overhead.json --format svg
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod grouping;
pub mod metric;
pub mod record;
pub mod render;
pub mod report;
pub mod source;

pub use config::{DatabaseConfig, DateWindow, ImageFormat, ReportConfig, SourceOptions};
pub use error::{ReportError, Result};
pub use grouping::{PlotClass, SPARSE_TESTCASE};
pub use record::{BenchmarkRecord, Density, RecordTable};
pub use render::{GroupPlot, PlotRenderer, PlottersRenderer};
pub use report::{OverheadReport, ReportSummary};
pub use source::{load_records, DataSource};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
