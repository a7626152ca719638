// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped bar charts for `barviz_core`.
//!
//! This crate turns a slice of records into the marks of one grouped bar chart:
//! - **Scales** map categories, groups and values into screen coordinates.
//! - **Guides** (value axis, category cells, header cells, legend) and reference lines are
//!   built by generating `barviz_core::Mark`s.
//! - [`GroupedBarChartSpec::render`] ties them together, appending one named layer per
//!   concern to a `barviz_core::Surface`.
//!
//! Text shaping is out of scope; text marks store unshaped strings, and legend layout uses a
//! pluggable [`TextMeasurer`].

#![no_std]

extern crate alloc;

mod axis;
mod bar_mark;
mod data;
mod domain;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod grouped_bar_chart;
#[cfg(test)]
mod grouped_bar_tests;
mod labels;
mod layout;
mod legend;
mod measure;
mod rect_mark;
mod rule_mark;
mod scale;
mod style;
mod text_mark;
mod z_order;

pub use axis::{
    AxisLabelStyle, CellAxisSpec, HeaderAxisSpec, HeaderGroup, TickFormatter, ValueAxisSpec,
    cell_bounds, header_span,
};
pub use bar_mark::{BarRow, GroupedBarMarkSpec};
pub use data::{ChartAccessors, DataPoint, LabelFn, ReferenceTarget, ValueFn};
pub use domain::Domain;
pub use error::{ConfigurationError, DomainAxis};
pub use format::{format_tick_with_step, precision_for_step};
pub use grouped_bar_chart::{
    BACKGROUND_ID, BAR_ID_BASE, BORDER_ID, CATEGORY_AXIS_ID_BASE, GROUP_LEGEND_ID_BASE,
    GroupedBarChart, GroupedBarChartSpec, HEADER_ID_BASE, REFERENCE_ID_BASE,
    REFERENCE_LEGEND_ID_BASE, TitleFn, VALUE_AXIS_ID_BASE, ValueFormatter, default_colors,
    layers, parse_palette,
};
pub use labels::LabelTable;
pub use layout::{Margins, PlotFrame};
pub use legend::{LegendColumn, LegendItem, LegendSwatch};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use rect_mark::RectMarkSpec;
pub use rule_mark::RuleMarkSpec;
pub use scale::{ScaleBand, ScaleContinuous, ScaleLinear, ScaleLog, ScaleOrdinal, ValueScaleKind};
pub use style::{ChartStyle, RULE_GREY, StrokeStyle, TARGET_GREEN};
pub use text_mark::TextMarkSpec;
pub use z_order::*;
