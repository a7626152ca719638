// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outer size, margins, and the resolved plot frame.
//!
//! The grouped bar chart uses fixed margins rather than measured guide extents: guides are
//! drawn into the margins around the plot rectangle.

use kurbo::Rect;

use crate::error::ConfigurationError;

/// Per-side margins in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Space above the plot (header axis).
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot (category cells and legend).
    pub bottom: f64,
    /// Space left of the plot (value axis).
    pub left: f64,
}

impl Margins {
    /// Creates margins in CSS order (top, right, bottom, left).
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(50.0, 20.0, 150.0, 50.0)
    }
}

/// The result of resolving size, margins and optional range overrides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotFrame {
    /// Outer bounds (`0, 0, width, height`).
    pub view: Rect,
    /// Horizontal pixel range for categories.
    pub x_range: (f64, f64),
    /// Vertical pixel range for values (bottom first by default, so larger values sit higher).
    pub y_range: (f64, f64),
}

impl PlotFrame {
    /// Resolves the frame, failing if the size is missing or leaves no room to draw.
    pub fn resolve(
        width: Option<f64>,
        height: Option<f64>,
        margins: Margins,
        x_range: Option<(f64, f64)>,
        y_range: Option<(f64, f64)>,
    ) -> Result<Self, ConfigurationError> {
        let width = width.ok_or(ConfigurationError::MissingWidth)?;
        let height = height.ok_or(ConfigurationError::MissingHeight)?;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigurationError::InvalidSize { width, height });
        }

        // Margins that overlap leave a reversed default range: nothing to draw in.
        let default_x = (margins.left, width - margins.right);
        let default_y = (height - margins.bottom, margins.top);
        if (x_range.is_none() && default_x.1 < default_x.0)
            || (y_range.is_none() && default_y.0 < default_y.1)
        {
            return Err(ConfigurationError::EmptyPlotArea);
        }

        // Explicit ranges may run in either direction.
        let x_range = x_range.unwrap_or(default_x);
        let y_range = y_range.unwrap_or(default_y);
        let usable = |(a, b): (f64, f64)| a.is_finite() && b.is_finite() && a != b;
        if !usable(x_range) || !usable(y_range) {
            return Err(ConfigurationError::EmptyPlotArea);
        }

        Ok(Self {
            view: Rect::new(0.0, 0.0, width, height),
            x_range,
            y_range,
        })
    }

    /// Returns the plot rectangle spanned by the two ranges.
    pub fn plot(&self) -> Rect {
        Rect::new(
            self.x_range.0.min(self.x_range.1),
            self.y_range.0.min(self.y_range.1),
            self.x_range.0.max(self.x_range.1),
            self.y_range.0.max(self.y_range.1),
        )
    }
}
