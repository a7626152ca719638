// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-order conventions for chart layers.
//!
//! Every layer the grouped bar chart appends to a [`barviz_core::Surface`] carries one of these
//! `z_index` values. Equal values paint in insertion order.

/// Plot background fill.
pub const PLOT_BACKGROUND: i32 = -100;

/// Bars.
pub const SERIES_FILL: i32 = 0;
/// Reference lines drawn over bars.
pub const SERIES_STROKE: i32 = 10;

/// Axes (rules, cell boxes and their labels) and the plot border.
pub const AXES: i32 = 30;

/// Legend swatches and labels.
pub const LEGEND: i32 = 60;
