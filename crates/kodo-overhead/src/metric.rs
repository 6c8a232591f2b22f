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

//! The overhead metric.
//!
//! For every record, `overhead = (mean(used) - mean(coded)) / mean(coded)`.
//! A coded baseline that is empty or averages to zero makes the ratio
//! undefined, and the computation fails instead of producing `inf`/`NaN`.

use crate::error::{ReportError, Result};
use crate::record::{BenchmarkRecord, RecordTable};

/// Arithmetic mean of a sample series, `None` when it is empty.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Overhead of a single record at position `row`.
///
/// # Errors
///
/// - [`ReportError::EmptySamples`] if `used` or `coded` has no samples
/// - [`ReportError::DegenerateBaseline`] if `coded` averages to zero
pub fn record_overhead(row: usize, record: &BenchmarkRecord) -> Result<f64> {
    let used = mean(&record.used).ok_or_else(|| ReportError::EmptySamples {
        row,
        benchmark: record.benchmark.clone(),
        column: "used",
    })?;
    let coded = mean(&record.coded).ok_or_else(|| ReportError::EmptySamples {
        row,
        benchmark: record.benchmark.clone(),
        column: "coded",
    })?;

    if coded == 0.0 || !coded.is_finite() {
        return Err(ReportError::DegenerateBaseline {
            row,
            testcase: record.testcase.clone(),
            benchmark: record.benchmark.clone(),
        });
    }

    Ok((used - coded) / coded)
}

/// Fills the `overhead` column of every record.
///
/// The table is only updated when every row succeeds, so a failed call
/// leaves it untouched.
pub fn compute_overhead(table: &mut RecordTable) -> Result<()> {
    let values = table
        .records()
        .iter()
        .enumerate()
        .map(|(row, record)| record_overhead(row, record))
        .collect::<Result<Vec<f64>>>()?;

    for (record, value) in table.records_mut().iter_mut().zip(values) {
        record.overhead = Some(value);
    }
    Ok(())
}
