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

//! Local benchmark file strategy.

use crate::config::SourceOptions;
use crate::error::{ReportError, Result};
use crate::record::{RecordTable, LOCAL_BUILDER};
use std::fs;
use tracing::info;

/// Reads records from the JSON file named by `--jsonfile`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileSource;

impl JsonFileSource {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }

    /// Loads the configured file, or returns `Ok(None)` when no file was given.
    ///
    /// Every loaded record is attributed to the `local` builder.
    ///
    /// # Errors
    ///
    /// [`ReportError::Io`] if the file cannot be read and
    /// [`ReportError::Json`] if it does not hold benchmark records.
    pub fn get_data(&self, options: &SourceOptions) -> Result<Option<RecordTable>> {
        let Some(path) = options.jsonfile.as_deref() else {
            return Ok(None);
        };

        let text = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        let mut table = RecordTable::from_json_str(&text).map_err(|e| ReportError::json(path, e))?;
        table.set_buildername(LOCAL_BUILDER);

        info!(path = %path.display(), records = table.len(), "loaded benchmark file");
        Ok(Some(table))
    }
}
