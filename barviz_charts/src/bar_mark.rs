// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped bar mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use barviz_core::{Mark, MarkId};
use kurbo::Rect;

use crate::rect_mark::RectMarkSpec;
use crate::scale::{ScaleBand, ScaleContinuous, ScaleOrdinal};

/// One resolved bar: which category band and group sub-band it sits in, and its value.
#[derive(Clone, Debug, PartialEq)]
pub struct BarRow {
    /// Source row index (drives the mark id).
    pub row: usize,
    /// Position in the category domain.
    pub category: usize,
    /// Position in the group domain.
    pub group: usize,
    /// Bar value.
    pub value: f64,
    /// Tooltip text.
    pub title: Option<String>,
}

/// Vertical bars nested in two band scales.
///
/// This generates one rect per [`BarRow`]. Bars are horizontally centered in their group's
/// sub-band and grow from the value scale's image of `baseline`.
#[derive(Clone, Debug)]
pub struct GroupedBarMarkSpec {
    /// Stable-id base; bar for row `r` uses `id_base + r`.
    pub id_base: u64,
    /// Outer band scale (categories).
    pub band: ScaleBand,
    /// Inner band scale (groups) over `[0, band.band_width()]`.
    pub sub_band: ScaleBand,
    /// Value scale.
    pub y_scale: ScaleContinuous,
    /// Baseline in data units.
    pub baseline: f64,
    /// Fixed bar width; `None` fills the sub-band.
    pub bar_width: Option<f64>,
    /// Corner radius.
    pub corner_radius: f64,
}

impl GroupedBarMarkSpec {
    /// Creates a spec with `baseline = 0`, full-width bars and square corners.
    pub fn new(id_base: u64, band: ScaleBand, sub_band: ScaleBand, y_scale: ScaleContinuous) -> Self {
        Self {
            id_base,
            band,
            sub_band,
            y_scale,
            baseline: 0.0,
            bar_width: None,
            corner_radius: 0.0,
        }
    }

    /// Sets a fixed bar width.
    pub fn with_bar_width(mut self, width: Option<f64>) -> Self {
        self.bar_width = width;
        self
    }

    /// Sets the corner radius.
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Returns the bar rectangle for a row.
    pub fn bar_rect(&self, row: &BarRow) -> Rect {
        let sub_bw = self.sub_band.band_width();
        let w = self.bar_width.unwrap_or(sub_bw);
        let x = self.band.x(row.category) + self.sub_band.x(row.group) + (sub_bw - w) * 0.5;
        let y0 = self.y_scale.map(self.baseline);
        let y1 = self.y_scale.map(row.value);
        Rect::new(x, y1.min(y0), x + w, y1.max(y0))
    }

    /// Generates marks for `rows`, filled from `color` by group position.
    pub fn marks(&self, rows: &[BarRow], color: &ScaleOrdinal) -> Vec<Mark> {
        rows.iter()
            .map(|row| {
                let mut spec = RectMarkSpec::new(
                    MarkId::for_row(self.id_base, row.row),
                    self.bar_rect(row),
                )
                .with_fill(color.at(row.group).clone())
                .with_corner_radius(self.corner_radius);
                if let Some(title) = &row.title {
                    spec = spec.with_title(title.clone());
                }
                spec.mark()
            })
            .collect()
    }
}
