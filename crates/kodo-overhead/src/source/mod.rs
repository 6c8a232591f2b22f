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

//! Data Source Resolver.
//!
//! Benchmark records come either from a local benchmark file or from the
//! shared datastore. Both strategies expose the same `get_data` contract
//! and return `Ok(None)` when they have nothing to offer.
//!
//! # Selection
//!
//! A non-empty `jsonfile` option selects the local file exclusively; the
//! datastore is only consulted when no file was given.

pub mod json_file;
pub mod mongo;

pub use json_file::JsonFileSource;
pub use mongo::{MongoQuerySource, QueryFilter, DEFAULT_BRANCH, DEFAULT_SCHEDULER};

use crate::config::{DatabaseConfig, DateWindow, SourceOptions};
use crate::error::Result;
use crate::record::RecordTable;

/// The two interchangeable record sources.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Local benchmark file.
    JsonFile(JsonFileSource),
    /// Shared datastore.
    Mongo(MongoQuerySource),
}

impl DataSource {
    /// Picks the source for `options`.
    ///
    /// The datastore strategy is only constructed when no local file is
    /// configured. Nothing touches the network until [`DataSource::get_data`].
    pub fn resolve(options: &SourceOptions, database: DatabaseConfig, window: DateWindow) -> Self {
        if options.has_jsonfile() {
            DataSource::JsonFile(JsonFileSource::new())
        } else {
            DataSource::Mongo(MongoQuerySource::new(database, window))
        }
    }

    /// Human readable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            DataSource::JsonFile(_) => "local file",
            DataSource::Mongo(_) => "datastore",
        }
    }

    /// Fetches the records of the selected strategy.
    pub fn get_data(&self, options: &SourceOptions) -> Result<Option<RecordTable>> {
        match self {
            DataSource::JsonFile(source) => source.get_data(options),
            DataSource::Mongo(source) => source.get_data(options),
        }
    }
}

/// Resolves the source for `options` and loads its records.
///
/// A strategy that has no data yields an empty table.
pub fn load_records(
    options: &SourceOptions,
    database: DatabaseConfig,
    window: DateWindow,
) -> Result<RecordTable> {
    let source = DataSource::resolve(options, database, window);
    tracing::info!(source = source.name(), "resolved record source");
    Ok(source.get_data(options)?.unwrap_or_default())
}
