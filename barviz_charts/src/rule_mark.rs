// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule mark generation.
//!
//! A "rule" is a straight line segment: value ticks, cell separators, the plot border, and
//! reference lines are all rules.

use barviz_core::{Mark, MarkId, MarkPayload, PathMark};
use kurbo::BezPath;
use peniko::{Brush, Color};
use smallvec::SmallVec;

use crate::style::StrokeStyle;

/// A rule mark spec (a stroked line segment).
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Start point x in surface coordinates.
    pub x0: f64,
    /// Start point y in surface coordinates.
    pub y0: f64,
    /// End point x in surface coordinates.
    pub x1: f64,
    /// End point y in surface coordinates.
    pub y1: f64,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width in surface coordinates.
    pub stroke_width: f64,
    /// Dash pattern; empty is solid.
    pub dash: SmallVec<[f64; 2]>,
}

impl RuleMarkSpec {
    /// Creates a new rule between two points.
    pub fn new(id: MarkId, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            id,
            x0,
            y0,
            x1,
            y1,
            stroke: Brush::default(),
            stroke_width: 1.0,
            dash: SmallVec::new(),
        }
    }

    /// Creates a horizontal rule.
    pub fn horizontal(id: MarkId, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(id, x0, y, x1, y)
    }

    /// Creates a vertical rule.
    pub fn vertical(id: MarkId, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(id, x, y0, x, y1)
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Sets stroke paint and width from a style.
    pub fn with_stroke_style(self, style: &StrokeStyle) -> Self {
        self.with_stroke(style.brush.clone(), style.stroke_width)
    }

    /// Sets an even dash pattern (`len` on, `len` off). `len <= 0` means solid.
    pub fn with_dash(mut self, len: f64) -> Self {
        self.dash.clear();
        if len > 0.0 {
            self.dash.push(len);
            self.dash.push(len);
        }
        self
    }

    /// Generates the rule mark.
    pub fn mark(&self) -> Mark {
        let mut p = BezPath::new();
        p.move_to((self.x0, self.y0));
        p.line_to((self.x1, self.y1));
        Mark::new(
            self.id,
            MarkPayload::Path(PathMark {
                path: p,
                fill: Brush::Solid(Color::TRANSPARENT),
                stroke: self.stroke.clone(),
                stroke_width: self.stroke_width,
                dash: self.dash.clone(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn zero_dash_is_solid() {
        let rule = RuleMarkSpec::horizontal(MarkId::from_raw(1), 5.0, 0.0, 10.0).with_dash(0.0);
        assert!(rule.dash.is_empty());
        let rule = rule.with_dash(4.0);
        assert_eq!(rule.dash.as_slice(), &[4.0, 4.0]);
    }
}
