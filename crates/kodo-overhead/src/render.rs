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

//! Plot rendering.
//!
//! A [`GroupPlot`] is everything needed to draw one group: title, axis
//! labels and the pivoted overhead values. [`PlotRenderer`] turns it into a
//! standalone image and into an SVG page for the combined document.
//! [`PlottersRenderer`] is the `plotters` implementation.

use crate::config::ImageFormat;
use crate::error::{ReportError, Result};
use crate::grouping::{Group, GroupKey, PivotTable, PlotClass};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

/// Label of the value axis.
pub const Y_LABEL: &str = "Overhead [%]";
/// Label of the symbols axis.
pub const X_LABEL: &str = "Symbols";

const TITLE_FONT_SIZE: u32 = 24;
const LABEL_FONT_SIZE: u32 = 16;

const SPARSE_PALETTE: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

const DENSE_PALETTE: &[RGBColor] = &[
    RGBColor(0, 63, 92),
    RGBColor(88, 80, 141),
    RGBColor(188, 80, 144),
    RGBColor(255, 99, 97),
    RGBColor(255, 166, 0),
    RGBColor(0, 128, 128),
];

/// One group, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPlot {
    /// Class of the group.
    pub class: PlotClass,
    /// Group key.
    pub key: GroupKey,
    /// Number of records in the group.
    pub rows: usize,
    /// Plot title.
    pub title: String,
    /// Value axis label.
    pub y_label: String,
    /// Overhead matrix.
    pub pivot: PivotTable,
}

impl GroupPlot {
    /// Pivots a group and attaches its labels.
    pub fn from_group(group: &Group<'_>) -> Result<Self> {
        Ok(Self {
            class: group.class,
            key: group.key.clone(),
            rows: group.rows.len(),
            title: format!(
                "{} (symbol size {})",
                group.key.buildername, group.key.symbol_size
            ),
            y_label: Y_LABEL.to_string(),
            pivot: PivotTable::from_group(group)?,
        })
    }

    /// The x-axis ticks: the distinct `symbols` of the group, ascending.
    pub fn x_ticks(&self) -> &[u64] {
        self.pivot.index()
    }

    /// Legend labels, one per series.
    pub fn series_labels(&self) -> Vec<String> {
        self.pivot.columns().iter().map(|key| key.to_string()).collect()
    }

    /// Points of series `col` that can sit on a log axis.
    ///
    /// Non-positive overheads have no logarithm and are masked.
    pub fn log_points(&self, col: usize) -> Vec<(f64, f64)> {
        let series = self.pivot.series(col);
        let total = series.len();
        let points: Vec<(f64, f64)> = series
            .into_iter()
            .filter(|(_, value)| *value > 0.0)
            .map(|(symbols, value)| (symbols as f64, value))
            .collect();

        if points.len() < total {
            debug!(
                title = %self.title,
                series = col,
                masked = total - points.len(),
                "masked non-positive overhead on log axis"
            );
        }
        points
    }
}

/// Draws group plots.
pub trait PlotRenderer {
    /// Writes `plot` to `path` as a standalone image.
    fn save_image(&self, plot: &GroupPlot, path: &Path, format: ImageFormat) -> Result<()>;

    /// Renders `plot` as an SVG document with a transparent background.
    fn render_svg(&self, plot: &GroupPlot) -> Result<String>;
}

/// [`PlotRenderer`] backed by `plotters`.
#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    size: (u32, u32),
}

impl PlottersRenderer {
    /// Renderer producing plots of `size` pixels.
    pub fn new(size: (u32, u32)) -> Self {
        Self { size }
    }
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self::new((1024, 768))
    }
}

impl PlotRenderer for PlottersRenderer {
    fn save_image(&self, plot: &GroupPlot, path: &Path, format: ImageFormat) -> Result<()> {
        if format.is_bitmap() {
            let root = BitMapBackend::new(path, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(|e| ReportError::render(&plot.title, e))?;
            draw_plot(&root, plot)?;
            root.present().map_err(|e| ReportError::render(&plot.title, e))
        } else {
            let root = SVGBackend::new(path, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(|e| ReportError::render(&plot.title, e))?;
            draw_plot(&root, plot)?;
            root.present().map_err(|e| ReportError::render(&plot.title, e))
        }
    }

    fn render_svg(&self, plot: &GroupPlot) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            draw_plot(&root, plot)?;
            root.present().map_err(|e| ReportError::render(&plot.title, e))?;
        }
        Ok(svg)
    }
}

fn palette(class: PlotClass) -> &'static [RGBColor] {
    match class {
        PlotClass::Sparse => SPARSE_PALETTE,
        PlotClass::Dense => DENSE_PALETTE,
    }
}

fn draw_plot<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, plot: &GroupPlot) -> Result<()> {
    let err = |e: DrawingAreaErrorKind<DB::ErrorType>| ReportError::render(&plot.title, e);

    let ticks: Vec<f64> = plot.x_ticks().iter().map(|&s| s as f64).collect();
    let (x_lo, x_hi) = x_bounds(&ticks);
    let (y_lo, y_hi) = y_bounds(plot);

    let mut chart = ChartBuilder::on(root)
        .caption(&plot.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(SymbolsAxis::new(x_lo..x_hi, ticks), (y_lo..y_hi).log_scale())
        .map_err(err)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(plot.y_label.as_str())
        .label_style(("sans-serif", LABEL_FONT_SIZE))
        .x_label_formatter(&|x| format!("{}", x.round() as u64))
        .y_label_formatter(&|y| format_log_tick(*y))
        .draw()
        .map_err(err)?;

    let colors = palette(plot.class);
    for (col, label) in plot.series_labels().into_iter().enumerate() {
        let color = colors[col % colors.len()];
        let points = plot.log_points(col);

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(err)?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        match plot.class {
            PlotClass::Sparse => chart
                .draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))
                .map_err(err)?,
            PlotClass::Dense => chart
                .draw_series(points.iter().map(|&p| TriangleMarker::new(p, 4, color.filled())))
                .map_err(err)?,
        };
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", LABEL_FONT_SIZE))
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(err)?;

    Ok(())
}

/// Linear symbols axis whose key points are exactly the plotted symbols.
#[derive(Clone)]
struct SymbolsAxis {
    coord: RangedCoordf64,
    ticks: Vec<f64>,
}

impl SymbolsAxis {
    fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        Self {
            coord: range.into(),
            ticks,
        }
    }
}

impl Ranged for SymbolsAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.coord.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.coord.range()
    }
}

/// Symbols axis bounds; a single tick gets some room on both sides.
fn x_bounds(ticks: &[f64]) -> (f64, f64) {
    match (ticks.first(), ticks.last()) {
        (Some(&lo), Some(&hi)) if hi > lo => (lo, hi),
        (Some(&only), _) => (only - 1.0, only + 1.0),
        _ => (0.0, 1.0),
    }
}

/// Log axis bounds padded by a factor of two around the positive values.
fn y_bounds(plot: &GroupPlot) -> (f64, f64) {
    let values: Vec<f64> = (0..plot.pivot.columns().len())
        .flat_map(|col| plot.pivot.series(col))
        .map(|(_, value)| value)
        .filter(|value| *value > 0.0)
        .collect();

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(0.0_f64, f64::max);
    if values.is_empty() {
        (1e-3, 1.0)
    } else {
        (lo / 2.0, hi * 2.0)
    }
}

fn format_log_tick(value: f64) -> String {
    if value >= 1.0 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.4}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
