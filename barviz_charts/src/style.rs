// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cosmetic configuration for the grouped bar chart.
//!
//! Every color, font and pixel constant the renderer uses lives in [`ChartStyle`], so callers
//! restyle a chart by passing a different value instead of editing draw code.

extern crate alloc;

use alloc::string::String;

use kurbo::Point;
use peniko::color::palette::css;
use peniko::{Brush, Color};

/// A paint + width pair for stroked paths (rules, cell borders, reference lines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in surface coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Light grey used for rules and cell borders.
pub const RULE_GREY: Color = Color::from_rgb8(0xdd, 0xdd, 0xdd);
/// Green used for reference lines.
pub const TARGET_GREEN: Color = Color::from_rgb8(0x86, 0xbc, 0x24);

/// Explicit style for [`crate::GroupedBarChartSpec`].
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    /// Plot background fill.
    pub background: Brush,
    /// Rules: value ticks, cell borders, cell separators, the right border.
    pub rule: StrokeStyle,
    /// Font family for all text (CSS list).
    pub font_family: Option<String>,
    /// Fill for axis and legend text.
    pub label_fill: Brush,
    /// Axis label font size.
    pub label_font_size: f64,
    /// Fixed bar width; `None` uses the full group sub-band.
    pub bar_width: Option<f64>,
    /// Bar corner radius.
    pub bar_corner_radius: f64,
    /// How far the background and header sit above the top of the value range.
    pub header_gap: f64,
    /// Height of category and header cells.
    pub cell_height: f64,
    /// Fill of category and header cells.
    pub cell_fill: Brush,
    /// Length of value axis tick rules.
    pub value_tick_size: f64,
    /// Gap between a value tick rule and its label.
    pub value_tick_padding: f64,
    /// Reference line stroke.
    pub reference_line: StrokeStyle,
    /// Dash length increment per reference line; line `i` uses `[i * step, i * step]`.
    pub reference_dash_step: f64,
    /// Center of the first legend dot.
    pub legend_origin: Point,
    /// Vertical distance between legend rows.
    pub legend_row_gap: f64,
    /// Legend dot radius.
    pub legend_dot_radius: f64,
    /// Distance from a swatch to its label.
    pub legend_label_dx: f64,
    /// Length of reference line swatches.
    pub legend_swatch_length: f64,
    /// Gap between the group column's widest label and the reference column.
    pub legend_column_gap: f64,
    /// Legend label font size.
    pub legend_font_size: f64,
    /// Whether legend labels are upper-cased.
    pub legend_uppercase: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: Brush::Solid(css::WHITE),
            rule: StrokeStyle::solid(RULE_GREY, 2.0),
            font_family: Some(String::from("Roboto, sans-serif")),
            label_fill: Brush::Solid(css::BLACK),
            label_font_size: 12.0,
            bar_width: Some(25.0),
            bar_corner_radius: 2.0,
            header_gap: 10.0,
            cell_height: 39.0,
            cell_fill: Brush::Solid(css::WHITE),
            value_tick_size: 6.0,
            value_tick_padding: 3.0,
            reference_line: StrokeStyle::solid(TARGET_GREEN, 2.0),
            reference_dash_step: 2.0,
            legend_origin: Point::new(275.0, 400.0),
            legend_row_gap: 25.0,
            legend_dot_radius: 5.0,
            legend_label_dx: 10.0,
            legend_swatch_length: 20.0,
            legend_column_gap: 70.0,
            legend_font_size: 9.0,
            legend_uppercase: true,
        }
    }
}
