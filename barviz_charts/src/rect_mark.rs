// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle mark generation.

extern crate alloc;

use alloc::string::String;

use barviz_core::{Mark, MarkId, MarkPayload, RectMark};
use kurbo::Rect;
use peniko::Brush;

use crate::style::StrokeStyle;

/// A rectangle mark spec.
#[derive(Clone, Debug)]
pub struct RectMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Rectangle geometry in surface coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Optional border stroke.
    pub stroke: Option<StrokeStyle>,
    /// Corner radius.
    pub corner_radius: f64,
    /// Optional tooltip.
    pub title: Option<String>,
}

impl RectMarkSpec {
    /// Creates a new rectangle mark spec.
    pub fn new(id: MarkId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            fill: Brush::default(),
            stroke: None,
            corner_radius: 0.0,
            title: None,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the border stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the corner radius.
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    /// Sets the tooltip text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mut rect = RectMark::new(self.rect);
        rect.fill = self.fill.clone();
        if let Some(stroke) = &self.stroke {
            rect.stroke = stroke.brush.clone();
            rect.stroke_width = stroke.stroke_width;
        }
        rect.corner_radius = self.corner_radius;
        rect.title = self.title.clone();
        Mark::new(self.id, MarkPayload::Rect(rect))
    }
}
