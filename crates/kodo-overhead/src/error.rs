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

//! Structured error types for overhead reporting.
//!
//! Every failure aborts the run. The variants carry enough context (file,
//! row, group) for an operator to find the offending input without a
//! debugger.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for overhead reporting operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while loading records or producing a report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// Reading or writing a file failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file or directory involved
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The benchmark file is not valid JSON or does not have the record layout.
    #[error("Invalid benchmark data in '{path}': {message}")]
    Json {
        /// The file being parsed
        path: PathBuf,
        /// The parser message
        message: String,
    },

    /// A record has no value for a derived column that must be computed first.
    #[error("Record {row} has no computed value for column '{column}'")]
    MissingColumn {
        /// Zero-based row index
        row: usize,
        /// Column name
        column: String,
    },

    /// A measurement series has no samples.
    #[error("Record {row} ({benchmark}) has no '{column}' samples")]
    EmptySamples {
        /// Zero-based row index
        row: usize,
        /// Benchmark name of the row
        benchmark: String,
        /// `used` or `coded`
        column: &'static str,
    },

    /// The coded baseline averages to zero, so the overhead ratio is undefined.
    #[error("Record {row} ({testcase}/{benchmark}) has a zero mean 'coded' baseline")]
    DegenerateBaseline {
        /// Zero-based row index
        row: usize,
        /// Testcase of the row
        testcase: String,
        /// Benchmark name of the row
        benchmark: String,
    },

    /// The datastore could not be reached or rejected the query.
    #[error("Database error: {0}")]
    Database(String),

    /// The requested image format has no rendering backend.
    #[error("Unsupported image format '{0}' (expected svg, png, jpg or bmp)")]
    UnsupportedFormat(String),

    /// The plotting backend failed to draw a group.
    #[error("Failed to render '{title}': {message}")]
    Render {
        /// Title of the plot being drawn
        title: String,
        /// Backend message
        message: String,
    },
}

impl ReportError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, err: io::Error) -> Self {
        ReportError::Io {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Wraps a JSON parse failure with the file it came from.
    pub fn json(path: impl AsRef<Path>, err: impl std::fmt::Display) -> Self {
        ReportError::Json {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Wraps a plotting backend failure.
    pub fn render(title: &str, err: impl std::fmt::Display) -> Self {
        ReportError::Render {
            title: title.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<mongodb::error::Error> for ReportError {
    fn from(err: mongodb::error::Error) -> Self {
        ReportError::Database(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for ReportError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        ReportError::Database(format!("malformed document: {}", err))
    }
}
