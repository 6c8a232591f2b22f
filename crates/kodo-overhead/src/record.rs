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

//! Benchmark records and the flat table they are loaded into.
//!
//! A record is one trial of one benchmark: a testcase, its symbol
//! configuration, and two sample series (`used` and `coded`) measured for
//! the same trial. The derived `overhead` column starts out empty and is
//! filled in by [`crate::metric::compute_overhead`].

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Builder name assigned to records loaded from a local benchmark file.
pub const LOCAL_BUILDER: &str = "local";

/// Density parameter of a sparse testcase.
///
/// Benchmarks report it either as a number (`0.5`) or as a label, so both
/// are kept as they were written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Density {
    /// Numeric density.
    Number(f64),
    /// Categorical density label.
    Label(String),
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Density::Number(value) => write!(f, "{}", value),
            Density::Label(label) => f.write_str(label),
        }
    }
}

/// One row of benchmark output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Testcase label, e.g. `FullRLNC` or `SparseFullRLNC`.
    pub testcase: String,
    /// Measurement series the row belongs to.
    pub benchmark: String,
    /// Symbol size in bytes.
    pub symbol_size: u64,
    /// Number of symbols in the generation.
    pub symbols: u64,
    /// Density of the coding vectors (sparse testcases only).
    #[serde(default)]
    pub density: Option<Density>,
    /// Environment that produced the row.
    #[serde(default)]
    pub buildername: String,
    /// Samples actually consumed.
    #[serde(deserialize_with = "deserialize_samples")]
    pub used: Vec<f64>,
    /// Baseline samples.
    #[serde(deserialize_with = "deserialize_samples")]
    pub coded: Vec<f64>,
    /// Relative overhead of `used` over `coded`, once computed.
    #[serde(default, skip_deserializing)]
    pub overhead: Option<f64>,
}

/// Accepts either a sample array or a single sample.
fn deserialize_samples<'de, D>(deserializer: D) -> std::result::Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Samples {
        Many(Vec<f64>),
        One(f64),
    }

    Ok(match Samples::deserialize(deserializer)? {
        Samples::Many(samples) => samples,
        Samples::One(sample) => vec![sample],
    })
}

/// The normalized table every data source produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    records: Vec<BenchmarkRecord>,
}

impl RecordTable {
    /// Creates a table from already decoded records.
    pub fn new(records: Vec<BenchmarkRecord>) -> Self {
        Self { records }
    }

    /// Parses benchmark JSON text.
    ///
    /// Two layouts are understood: an array of record objects, and the
    /// column-oriented layout `{"column": {"0": value, "1": value}}`.
    pub fn from_json_str(text: &str) -> std::result::Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(value)
    }

    /// Decodes an already parsed JSON value. See [`RecordTable::from_json_str`].
    pub fn from_json_value(value: Value) -> std::result::Result<Self, serde_json::Error> {
        let rows = match value {
            Value::Array(rows) => rows,
            Value::Object(columns) => columns_to_rows(columns)?,
            other => {
                return Err(serde_json::Error::custom(format!(
                    "expected an array of records or an object of columns, found {}",
                    json_kind(&other)
                )))
            }
        };

        let records = rows
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<BenchmarkRecord>, _>>()?;
        Ok(Self::new(records))
    }

    /// All records in load order.
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Mutable access for in-place column updates.
    pub fn records_mut(&mut self) -> &mut [BenchmarkRecord] {
        &mut self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Overwrites the `buildername` column on every record.
    pub fn set_buildername(&mut self, name: &str) {
        for record in &mut self.records {
            record.buildername = name.to_string();
        }
    }
}

/// Row index of the column layout; numeric indices sort before textual ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum RowIndex {
    Position(u64),
    Name(String),
}

impl From<String> for RowIndex {
    fn from(index: String) -> Self {
        match index.parse::<u64>() {
            Ok(position) => RowIndex::Position(position),
            Err(_) => RowIndex::Name(index),
        }
    }
}

/// Transposes `{column: {index: value}}` into row objects ordered by index.
fn columns_to_rows(columns: Map<String, Value>) -> std::result::Result<Vec<Value>, serde_json::Error> {
    let mut rows: BTreeMap<RowIndex, Map<String, Value>> = BTreeMap::new();

    for (column, cells) in columns {
        let Value::Object(cells) = cells else {
            return Err(serde_json::Error::custom(format!(
                "column '{}' is not an object of row values",
                column
            )));
        };
        for (index, cell) in cells {
            let row = rows.entry(RowIndex::from(index)).or_default();
            if !cell.is_null() {
                row.insert(column.clone(), cell);
            }
        }
    }

    Ok(rows.into_values().map(Value::Object).collect())
}


fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_array() {
        let json = r#"[
            {"testcase": "FullRLNC", "benchmark": "decoder", "symbol_size": 1600,
             "symbols": 16, "used": [10, 12], "coded": [5, 5], "branch": "master"}
        ]"#;
        let table = RecordTable::from_json_str(json).unwrap();
        assert_eq!(table.len(), 1);

        let record = &table.records()[0];
        assert_eq!(record.testcase, "FullRLNC");
        assert_eq!(record.symbols, 16);
        assert_eq!(record.used, vec![10.0, 12.0]);
        assert_eq!(record.density, None);
        assert_eq!(record.overhead, None);
    }

    #[test]
    fn test_parse_column_layout() {
        let json = r#"{
            "testcase": {"0": "SparseFullRLNC", "1": "SparseFullRLNC", "10": "FullRLNC"},
            "benchmark": {"0": "decoder", "1": "decoder", "10": "encoder"},
            "symbol_size": {"0": 100, "1": 100, "10": 100},
            "symbols": {"0": 16, "1": 32, "10": 64},
            "density": {"0": 0.5, "1": 0.25, "10": null},
            "used": {"0": [3], "1": [4], "10": [5]},
            "coded": {"0": [1], "1": [2], "10": [4]}
        }"#;
        let table = RecordTable::from_json_str(json).unwrap();
        let symbols: Vec<u64> = table.records().iter().map(|r| r.symbols).collect();
        assert_eq!(symbols, vec![16, 32, 64]);
        assert_eq!(table.records()[1].density, Some(Density::Number(0.25)));
        assert_eq!(table.records()[2].density, None);
    }

    #[test]
    fn test_column_layout_orders_numeric_then_named_indices() {
        let json = r#"{
            "testcase": {"x": "C", "2": "B", "1": "A"},
            "benchmark": {"x": "b", "2": "b", "1": "b"},
            "symbol_size": {"x": 1, "2": 1, "1": 1},
            "symbols": {"x": 99, "2": 20, "1": 10},
            "used": {"x": [1], "2": [1], "1": [1]},
            "coded": {"x": [1], "2": [1], "1": [1]}
        }"#;
        let table = RecordTable::from_json_str(json).unwrap();
        let symbols: Vec<u64> = table.records().iter().map(|r| r.symbols).collect();
        assert_eq!(symbols, vec![10, 20, 99]);
    }

    #[test]
    fn test_large_column_layout() {
        let rows = 5000u64;
        let column = |value: &dyn Fn(u64) -> Value| -> Value {
            Value::Object((0..rows).rev().map(|i| (i.to_string(), value(i))).collect())
        };
        let mut columns = Map::new();
        columns.insert("testcase".into(), column(&|_| Value::from("FullRLNC")));
        columns.insert("benchmark".into(), column(&|_| Value::from("decoder")));
        columns.insert("symbol_size".into(), column(&|_| Value::from(100)));
        columns.insert("symbols".into(), column(&|i| Value::from(i)));
        columns.insert("used".into(), column(&|_| Value::from(vec![2.0])));
        columns.insert("coded".into(), column(&|_| Value::from(vec![1.0])));

        let table = RecordTable::from_json_str(&Value::Object(columns).to_string()).unwrap();
        assert_eq!(table.len(), rows as usize);
        assert!(table
            .records()
            .iter()
            .enumerate()
            .all(|(i, r)| r.symbols == i as u64));
    }

    #[test]
    fn test_scalar_samples_accepted() {
        let json = r#"[{"testcase": "FullRLNC", "benchmark": "b", "symbol_size": 1,
                        "symbols": 2, "used": 7.5, "coded": [3]}]"#;
        let table = RecordTable::from_json_str(json).unwrap();
        assert_eq!(table.records()[0].used, vec![7.5]);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let json = r#"[{"testcase": "FullRLNC", "symbol_size": 1, "symbols": 2,
                        "used": [1], "coded": [1]}]"#;
        let err = RecordTable::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("benchmark"));
    }

    #[test]
    fn test_scalar_document_rejected() {
        let err = RecordTable::from_json_str("42").unwrap_err();
        assert!(err.to_string().contains("a number"));
    }

    #[test]
    fn test_density_labels() {
        assert_eq!(Density::Number(0.5).to_string(), "0.5");
        assert_eq!(Density::Number(1.0).to_string(), "1");
        assert_eq!(Density::Label("high".to_string()).to_string(), "high");
    }

    #[test]
    fn test_set_buildername() {
        let json = r#"[{"testcase": "FullRLNC", "benchmark": "b", "symbol_size": 1,
                        "symbols": 2, "used": [1], "coded": [1], "buildername": "linux"}]"#;
        let mut table = RecordTable::from_json_str(json).unwrap();
        table.set_buildername(LOCAL_BUILDER);
        assert_eq!(table.records()[0].buildername, "local");
    }
}
