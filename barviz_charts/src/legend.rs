// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! A legend column is a vertical list of swatches with text labels. The grouped bar chart
//! draws two columns side by side: one dot per group, and one dashed line per reference
//! target.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use barviz_core::{CircleMark, Mark, MarkId, MarkPayload, TextAnchor, TextBaseline};
use kurbo::Point;
use peniko::Brush;

use crate::measure::TextMeasurer;
use crate::rule_mark::RuleMarkSpec;
use crate::style::StrokeStyle;
use crate::text_mark::TextMarkSpec;

/// What is drawn to the left of a legend label.
#[derive(Clone, Debug, PartialEq)]
pub enum LegendSwatch {
    /// A filled circle (group colors).
    Dot(Brush),
    /// A short, optionally dashed line (reference targets).
    Rule {
        /// Line stroke.
        stroke: StrokeStyle,
        /// Dash length; `0` is solid.
        dash: f64,
    },
}

/// A legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch.
    pub swatch: LegendSwatch,
}

impl LegendItem {
    /// A dot swatch with a label.
    pub fn dot(label: impl Into<String>, fill: impl Into<Brush>) -> Self {
        Self {
            label: label.into(),
            swatch: LegendSwatch::Dot(fill.into()),
        }
    }

    /// A line swatch with a label.
    pub fn rule(label: impl Into<String>, stroke: StrokeStyle, dash: f64) -> Self {
        Self {
            label: label.into(),
            swatch: LegendSwatch::Rule { stroke, dash },
        }
    }
}

/// A vertical list of swatches with text labels.
#[derive(Clone, Debug)]
pub struct LegendColumn {
    /// Stable-id base; swatch `i` uses `id_base + i`, label `i` uses `id_base + 1000 + i`.
    pub id_base: u64,
    /// Swatch anchor of the first row: the dot center, or the left end of a line.
    pub origin: Point,
    /// Vertical distance between rows.
    pub row_gap: f64,
    /// Dot radius.
    pub dot_radius: f64,
    /// Line swatch length.
    pub swatch_length: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label font family.
    pub font_family: Option<String>,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendColumn {
    /// Creates an empty column at `origin` with default metrics.
    pub fn new(id_base: u64, origin: Point) -> Self {
        Self {
            id_base,
            origin,
            row_gap: 25.0,
            dot_radius: 5.0,
            swatch_length: 20.0,
            label_dx: 10.0,
            font_size: 9.0,
            font_family: None,
            text_fill: Brush::default(),
            items: Vec::new(),
        }
    }

    /// Sets the items.
    pub fn with_items(mut self, items: impl IntoIterator<Item = LegendItem>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    fn label_x(&self, item: &LegendItem) -> f64 {
        match item.swatch {
            LegendSwatch::Dot(_) => self.origin.x + self.label_dx,
            LegendSwatch::Rule { .. } => self.origin.x + self.swatch_length + self.label_dx,
        }
    }

    /// Generates swatch and label marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.items.len() * 2);
        for (i, item) in self.items.iter().enumerate() {
            let y = self.origin.y + i as f64 * self.row_gap;
            let swatch_id = MarkId::from_raw(self.id_base + i as u64);
            match &item.swatch {
                LegendSwatch::Dot(fill) => out.push(Mark::new(
                    swatch_id,
                    MarkPayload::Circle(CircleMark {
                        center: Point::new(self.origin.x, y),
                        radius: self.dot_radius,
                        fill: fill.clone(),
                    }),
                )),
                LegendSwatch::Rule { stroke, dash } => out.push(
                    RuleMarkSpec::horizontal(
                        swatch_id,
                        y,
                        self.origin.x,
                        self.origin.x + self.swatch_length,
                    )
                    .with_stroke_style(stroke)
                    .with_dash(*dash)
                    .mark(),
                ),
            }

            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    Point::new(self.label_x(item), y),
                    item.label.clone(),
                )
                .with_font_size(self.font_size)
                .with_font_family(self.font_family.clone())
                .with_fill(self.text_fill.clone())
                .with_anchor(TextAnchor::Start)
                .with_baseline(TextBaseline::Middle)
                .mark(),
            );
        }
        out
    }

    /// Width from the column origin to the right edge of its widest label.
    pub fn width(&self, measurer: &dyn TextMeasurer) -> f64 {
        self.items
            .iter()
            .map(|item| {
                let (w, _) = measurer.measure(&item.label, self.font_size);
                self.label_x(item) - self.origin.x + w
            })
            .fold(0.0, f64::max)
    }
}
