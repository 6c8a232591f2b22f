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

//! Combined multi-page document.
//!
//! Every rendered group becomes one page of a single HTML document: a
//! `<section class="page">` holding the plot as inline SVG. Pages keep the
//! transparent plot background and print one per sheet. The file is opened
//! once, appended to as groups are rendered, and finished by
//! [`CombinedDocument::close`].

use crate::error::{ReportError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Marker opening each page; one per rendered group.
pub const PAGE_MARKER: &str = "<section class=\"page\">";

const STYLE: &str = "\
body { margin: 0; background: transparent; font-family: sans-serif; }
section.page { break-after: page; page-break-after: always; padding: 1em; }
section.page h2 { font-size: 1.1em; margin: 0 0 0.5em 0; }
section.page svg { max-width: 100%; height: auto; }
";

/// Writer for the combined document of one run.
#[derive(Debug)]
pub struct CombinedDocument {
    path: PathBuf,
    writer: BufWriter<File>,
    pages: usize,
}

impl CombinedDocument {
    /// Creates the document at `path` and writes its header.
    pub fn create(path: &Path, title: &str) -> Result<Self> {
        let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
        let mut doc = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            pages: 0,
        };

        let mut header = String::new();
        header.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        header.push_str(&format!("<title>{}</title>\n", escape(title)));
        header.push_str("<style>\n");
        header.push_str(STYLE);
        header.push_str("</style>\n</head>\n<body>\n");
        doc.write(&header)?;
        Ok(doc)
    }

    /// Appends one page holding `svg` under `heading`.
    pub fn add_page(&mut self, heading: &str, svg: &str) -> Result<()> {
        let mut page = String::new();
        page.push_str(PAGE_MARKER);
        page.push('\n');
        page.push_str(&format!("<h2>{}</h2>\n", escape(heading)));
        page.push_str(svg.trim());
        page.push_str("\n</section>\n");

        self.write(&page)?;
        self.pages += 1;
        Ok(())
    }

    /// Pages written so far.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the footer, flushes, and releases the file.
    pub fn close(mut self) -> Result<PathBuf> {
        self.write("</body>\n</html>\n")?;
        self.writer
            .flush()
            .map_err(|e| ReportError::io(&self.path, e))?;
        Ok(self.path)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|e| ReportError::io(&self.path, e))
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
