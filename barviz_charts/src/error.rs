// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render configuration errors.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

/// Which domain a [`ConfigurationError::EmptyDomain`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomainAxis {
    /// Category (x) labels.
    Category,
    /// Group (z) labels.
    Group,
}

impl core::fmt::Display for DomainAxis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Category => "category",
            Self::Group => "group",
        })
    }
}

/// A render could not resolve its geometry, domains or paints.
///
/// Rendering is fail-fast: any of these aborts the render before the surface is touched.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    /// No outer width was configured.
    #[error("chart width is not set")]
    MissingWidth,
    /// No outer height was configured.
    #[error("chart height is not set")]
    MissingHeight,
    /// Width or height is not a positive finite number.
    #[error("invalid chart size {width}x{height}")]
    InvalidSize {
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },
    /// Margins (or explicit ranges) leave no room to draw.
    #[error("margins leave an empty plot area")]
    EmptyPlotArea,
    /// A categorical domain is empty and none could be derived from the data.
    #[error("{0} domain is empty")]
    EmptyDomain(DomainAxis),
    /// The value domain is not usable by the configured value scale.
    #[error("invalid value domain [{min}, {max}]")]
    InvalidValueDomain {
        /// Domain lower bound.
        min: f64,
        /// Domain upper bound.
        max: f64,
    },
    /// The color palette has no entries.
    #[error("color palette is empty")]
    EmptyPalette,
    /// A palette entry could not be parsed as a CSS color.
    #[error("invalid color {0:?}")]
    InvalidColor(String),
    /// Header groups span more cells than there are categories.
    #[error("header groups span {spans} cells but there are only {categories} categories")]
    HeaderSpanOverflow {
        /// Sum of header spans.
        spans: usize,
        /// Number of categories.
        categories: usize,
    },
    /// The host has no drawing surface to render into.
    #[error("no drawing surface is attached")]
    MissingSurface,
}
