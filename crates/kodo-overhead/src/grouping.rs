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

//! Partitioning, grouping and pivoting of scored records.
//!
//! Records split into two disjoint classes on their testcase. Each class is
//! grouped by `(buildername, symbol_size)` and every group is pivoted into a
//! matrix indexed by `symbols`, one column per plotted series.

use crate::error::{ReportError, Result};
use crate::record::{BenchmarkRecord, Density};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Testcase that forms the sparse class.
pub const SPARSE_TESTCASE: &str = "SparseFullRLNC";

/// Series detail used for sparse rows that carry no density.
pub const UNKNOWN_DENSITY: &str = "unknown";

/// A record with its position in the source table.
pub type Row<'a> = (usize, &'a BenchmarkRecord);

/// The two testcase classes, plotted with different series axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotClass {
    /// `SparseFullRLNC` rows, one series per `(benchmark, density)`.
    Sparse,
    /// Every other testcase, one series per `(benchmark, testcase)`.
    Dense,
}

impl PlotClass {
    /// Classes in processing order.
    pub const ALL: [PlotClass; 2] = [PlotClass::Sparse, PlotClass::Dense];

    /// Class of a record, decided by its testcase alone.
    pub fn of(record: &BenchmarkRecord) -> Self {
        if record.testcase == SPARSE_TESTCASE {
            PlotClass::Sparse
        } else {
            PlotClass::Dense
        }
    }

    /// Lowercase class name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotClass::Sparse => "sparse",
            PlotClass::Dense => "dense",
        }
    }

    /// Series column of a record within this class.
    pub fn series_key(&self, record: &BenchmarkRecord) -> SeriesKey {
        let detail = match self {
            PlotClass::Sparse => match &record.density {
                Some(Density::Number(value)) => SeriesDetail::Number(*value),
                Some(Density::Label(label)) => SeriesDetail::Label(label.clone()),
                None => SeriesDetail::Label(UNKNOWN_DENSITY.to_string()),
            },
            PlotClass::Dense => SeriesDetail::Label(record.testcase.clone()),
        };
        SeriesKey {
            benchmark: record.benchmark.clone(),
            detail,
        }
    }
}

impl fmt::Display for PlotClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows of `records` belonging to `class`, in table order.
pub fn class_rows(records: &[BenchmarkRecord], class: PlotClass) -> Vec<Row<'_>> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| PlotClass::of(record) == class)
        .collect()
}

/// Splits `records` into `(sparse, dense)` rows.
pub fn partition(records: &[BenchmarkRecord]) -> (Vec<Row<'_>>, Vec<Row<'_>>) {
    records
        .iter()
        .enumerate()
        .partition(|(_, record)| PlotClass::of(record) == PlotClass::Sparse)
}

/// Partition key of a group within its class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    /// Environment that produced the rows.
    pub buildername: String,
    /// Shared symbol size.
    pub symbol_size: u64,
}

/// Rows of one class sharing a [`GroupKey`].
#[derive(Debug, Clone)]
pub struct Group<'a> {
    /// Class the rows belong to.
    pub class: PlotClass,
    /// Shared key.
    pub key: GroupKey,
    /// Member rows, in table order.
    pub rows: Vec<Row<'a>>,
}

/// Groups the rows of one class by `(buildername, symbol_size)`.
///
/// Only non-empty groups are produced. Groups come out sorted by key.
pub fn group_rows<'a>(class: PlotClass, rows: &[Row<'a>]) -> Vec<Group<'a>> {
    let mut groups: BTreeMap<GroupKey, Vec<Row<'a>>> = BTreeMap::new();
    for &(index, record) in rows {
        let key = GroupKey {
            buildername: record.buildername.clone(),
            symbol_size: record.symbol_size,
        };
        groups.entry(key).or_default().push((index, record));
    }

    groups
        .into_iter()
        .map(|(key, rows)| Group { class, key, rows })
        .collect()
}

/// Second component of a series key.
///
/// Numbers order numerically and before labels, so densities `2` and `10`
/// plot in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesDetail {
    /// Numeric density.
    Number(f64),
    /// Density label or testcase name.
    Label(String),
}

impl Ord for SeriesDetail {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SeriesDetail::Number(a), SeriesDetail::Number(b)) => a.total_cmp(b),
            (SeriesDetail::Number(_), SeriesDetail::Label(_)) => Ordering::Less,
            (SeriesDetail::Label(_), SeriesDetail::Number(_)) => Ordering::Greater,
            (SeriesDetail::Label(a), SeriesDetail::Label(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for SeriesDetail {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SeriesDetail {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SeriesDetail {}

impl fmt::Display for SeriesDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesDetail::Number(value) => write!(f, "{}", value),
            SeriesDetail::Label(label) => f.write_str(label),
        }
    }
}

/// Column of a pivot table: one plotted series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesKey {
    /// Benchmark name.
    pub benchmark: String,
    /// Density (sparse) or testcase (dense).
    pub detail: SeriesDetail,
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.benchmark, self.detail)
    }
}

/// Overhead values of a group, indexed by `symbols` with one column per series.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    index: Vec<u64>,
    columns: Vec<SeriesKey>,
    // row-major, index.len() x columns.len()
    cells: Vec<Option<f64>>,
}

impl PivotTable {
    /// Pivots a group on its overhead values.
    ///
    /// Rows sharing a `(symbols, series)` cell are averaged. Cells without
    /// rows stay empty.
    ///
    /// # Errors
    ///
    /// [`ReportError::MissingColumn`] if a row has no computed overhead.
    pub fn from_group(group: &Group<'_>) -> Result<Self> {
        let mut sums: BTreeMap<(u64, SeriesKey), (f64, usize)> = BTreeMap::new();
        for &(index, record) in &group.rows {
            let overhead = record.overhead.ok_or_else(|| ReportError::MissingColumn {
                row: index,
                column: "overhead".to_string(),
            })?;
            let cell = sums
                .entry((record.symbols, group.class.series_key(record)))
                .or_insert((0.0, 0));
            cell.0 += overhead;
            cell.1 += 1;
        }

        let mut index: Vec<u64> = sums.keys().map(|(symbols, _)| *symbols).collect();
        index.dedup();
        let mut columns: Vec<SeriesKey> = sums.keys().map(|(_, key)| key.clone()).collect();
        columns.sort();
        columns.dedup();

        let mut cells = vec![None; index.len() * columns.len()];
        for ((symbols, key), (sum, count)) in sums {
            // Both lookups succeed: index and columns were built from these keys.
            if let (Ok(row), Ok(col)) = (index.binary_search(&symbols), columns.binary_search(&key)) {
                cells[row * columns.len() + col] = Some(sum / count as f64);
            }
        }

        Ok(Self {
            index,
            columns,
            cells,
        })
    }

    /// Sorted distinct `symbols` values, used as x-axis ticks.
    pub fn index(&self) -> &[u64] {
        &self.index
    }

    /// Series keys in sorted order.
    pub fn columns(&self) -> &[SeriesKey] {
        &self.columns
    }

    /// Value at `(row, col)`, if that cell has data.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.index.len() || col >= self.columns.len() {
            return None;
        }
        self.cells[row * self.columns.len() + col]
    }

    /// Points of one series as `(symbols, overhead)`, skipping empty cells.
    pub fn series(&self, col: usize) -> Vec<(u64, f64)> {
        self.index
            .iter()
            .enumerate()
            .filter_map(|(row, &symbols)| self.value(row, col).map(|v| (symbols, v)))
            .collect()
    }
}
