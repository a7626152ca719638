// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing surface for `barviz`.
//!
//! This crate is the retained output of a chart render:
//! - **Marks** are positioned primitives (rects, paths, circles, text) with a stable [`MarkId`].
//! - **Groups** collect marks into named layers with a render-order hint, like SVG `<g>` elements.
//! - A [`Surface`] owns the groups of one chart and can be serialized to SVG.
//!
//! Chart logic (scales, axes, legends) lives in `barviz_charts`; this crate only stores and
//! emits what those builders produce.

#![no_std]

extern crate alloc;

mod mark;
mod surface;
mod svg;

pub use mark::{
    CircleMark, Mark, MarkId, MarkPayload, PathMark, RectMark, TextAnchor, TextBaseline, TextMark,
};
pub use surface::{MarkGroup, Surface};
