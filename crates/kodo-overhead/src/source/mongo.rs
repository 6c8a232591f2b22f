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

//! Shared datastore strategy.
//!
//! Records of the nightly benchmark runs live in a MongoDB collection. The
//! default filter selects the `master` branch, the nightly scheduler and a
//! window starting at yesterday's midnight (UTC). The window is computed
//! when the source is constructed, never cached across runs.

use crate::config::{DatabaseConfig, DateWindow, SourceOptions};
use crate::error::Result;
use crate::record::{BenchmarkRecord, RecordTable};
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use mongodb::bson::{self, doc, Document};
use mongodb::sync::Client;
use tracing::{debug, info};

/// Branch whose results are reported.
pub const DEFAULT_BRANCH: &str = "master";
/// Scheduler that produces the nightly results.
pub const DEFAULT_SCHEDULER: &str = "kodo-nightly-benchmark";

/// Selection of nightly benchmark documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    /// Exact branch match.
    pub branch: String,
    /// Exact scheduler match.
    pub scheduler: String,
    /// Inclusive lower bound on `utc_date`.
    pub from: DateTime<Utc>,
    /// Exclusive upper bound on `utc_date`, if any.
    pub until: Option<DateTime<Utc>>,
}

impl QueryFilter {
    /// Nightly filter relative to the current time.
    pub fn nightly(window: DateWindow) -> Self {
        Self::nightly_at(Utc::now(), window)
    }

    /// Nightly filter relative to `now`.
    pub fn nightly_at(now: DateTime<Utc>, window: DateWindow) -> Self {
        let today = Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN));
        let yesterday = today - Duration::days(1);

        Self {
            branch: DEFAULT_BRANCH.to_string(),
            scheduler: DEFAULT_SCHEDULER.to_string(),
            from: yesterday,
            until: match window {
                DateWindow::LastDay => Some(today),
                DateWindow::SinceYesterday => None,
            },
        }
    }

    /// The BSON filter document sent to the server.
    pub fn to_document(&self) -> Document {
        let mut range = doc! { "$gte": bson::DateTime::from_millis(self.from.timestamp_millis()) };
        if let Some(until) = self.until {
            range.insert("$lt", bson::DateTime::from_millis(until.timestamp_millis()));
        }

        doc! {
            "branch": self.branch.as_str(),
            "scheduler": self.scheduler.as_str(),
            "utc_date": range,
        }
    }
}

/// Queries benchmark records from the shared datastore.
#[derive(Debug, Clone)]
pub struct MongoQuerySource {
    config: DatabaseConfig,
    filter: Document,
}

impl MongoQuerySource {
    /// Source using the nightly filter over `window`.
    pub fn new(config: DatabaseConfig, window: DateWindow) -> Self {
        Self::with_filter(config, QueryFilter::nightly(window).to_document())
    }

    /// Source using an explicit filter document.
    pub fn with_filter(config: DatabaseConfig, filter: Document) -> Self {
        Self { config, filter }
    }

    /// Filter applied to the collection.
    pub fn filter(&self) -> &Document {
        &self.filter
    }

    /// Runs the query and materializes every matching document.
    ///
    /// The connection lives only for the duration of this call.
    ///
    /// # Errors
    ///
    /// [`crate::ReportError::Database`] if the server is unreachable, rejects
    /// the credentials, or returns a document that is not a benchmark record.
    pub fn get_data(&self, _options: &SourceOptions) -> Result<Option<RecordTable>> {
        info!(
            address = %self.config.address,
            collection = %self.config.collection,
            "querying benchmark datastore"
        );
        debug!(filter = %self.filter, "query filter");

        let client = Client::with_uri_str(self.config.uri())?;
        let collection = client
            .database(&self.config.database)
            .collection::<Document>(&self.config.collection);

        let mut records = Vec::new();
        for document in collection.find(self.filter.clone(), None)? {
            records.push(bson::from_document::<BenchmarkRecord>(document?)?);
        }

        info!(records = records.len(), "fetched benchmark records");
        Ok(Some(RecordTable::new(records)))
    }
}
