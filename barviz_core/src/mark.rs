// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark primitives.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Circle, Point, Rect, Shape};
use peniko::{Brush, Color};
use smallvec::SmallVec;

/// Stable identity for a mark.
///
/// Chart builders derive ids from a per-guide base plus a deterministic offset, so the same
/// input always produces the same ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id for a data row under a given base.
    pub const fn for_row(base: u64, row: usize) -> Self {
        Self(base.wrapping_add(row as u64))
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor position.
    #[default]
    Start,
    /// Text is centered on the anchor position.
    Middle,
    /// Text ends at the anchor position.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor position is the vertical middle of the text.
    #[default]
    Middle,
    /// The anchor position is the alphabetic baseline.
    Alphabetic,
    /// The anchor position is the top (hanging baseline).
    Hanging,
    /// The anchor position is the ideographic baseline.
    Ideographic,
}

/// A filled (and optionally stroked) rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Geometry in surface coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
    /// Corner radius.
    pub corner_radius: f64,
    /// Optional hover tooltip text.
    pub title: Option<String>,
}

impl RectMark {
    /// Creates an unstroked rectangle with a default fill.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            fill: Brush::default(),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
            corner_radius: 0.0,
            title: None,
        }
    }
}

/// A stroked path, typically a straight rule.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Path geometry in surface coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
    /// Alternating dash/gap lengths. Empty means solid.
    pub dash: SmallVec<[f64; 2]>,
}

/// A filled circle.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleMark {
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
}

/// An unshaped text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Optional CSS font family list.
    pub font_family: Option<String>,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// The drawable content of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A rectangle.
    Rect(RectMark),
    /// A path.
    Path(PathMark),
    /// A circle.
    Circle(CircleMark),
    /// A text run.
    Text(TextMark),
}

impl MarkPayload {
    /// Returns geometric bounds, or `None` for text (which needs a measurer).
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Circle(c) => Some(Circle::new(c.center, c.radius).bounding_box()),
            Self::Text(_) => None,
        }
    }
}

/// A positioned primitive with a stable id.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Drawable content.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark from an id and payload.
    pub fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self { id, payload }
    }

    /// Returns the rect payload, if this is a rect mark.
    pub fn as_rect(&self) -> Option<&RectMark> {
        match &self.payload {
            MarkPayload::Rect(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the path payload, if this is a path mark.
    pub fn as_path(&self) -> Option<&PathMark> {
        match &self.payload {
            MarkPayload::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the circle payload, if this is a circle mark.
    pub fn as_circle(&self) -> Option<&CircleMark> {
        match &self.payload {
            MarkPayload::Circle(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a text mark.
    pub fn as_text(&self) -> Option<&TextMark> {
        match &self.payload {
            MarkPayload::Text(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn row_ids_offset_from_base() {
        assert_eq!(MarkId::for_row(100, 3), MarkId::from_raw(103));
    }

    #[test]
    fn text_has_no_geometric_bounds() {
        let text = MarkPayload::Text(TextMark {
            pos: Point::new(1.0, 2.0),
            text: String::from("x"),
            font_size: 10.0,
            font_family: None,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: Brush::default(),
        });
        assert!(text.bounds().is_none());

        let rect = MarkPayload::Rect(RectMark::new(Rect::new(0.0, 1.0, 2.0, 3.0)));
        assert_eq!(rect.bounds(), Some(Rect::new(0.0, 1.0, 2.0, 3.0)));
    }
}
