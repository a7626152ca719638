// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! The grouped bar chart has three guides:
//! - a left [`ValueAxisSpec`] with short tick rules and prefixed labels (no domain line),
//! - a bottom [`CellAxisSpec`] that boxes each category label in a bordered cell and draws a
//!   separator from each cell's left edge up through the plot,
//! - a top [`HeaderAxisSpec`] whose cells span several consecutive categories.
//!
//! Cell geometry is shared: category `i` owns `[center(i) - step/2, center(i) + step/2]`.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use barviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::{Point, Rect};
use peniko::Brush;

use crate::format::format_tick_with_step;
use crate::rect_mark::RectMarkSpec;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBand, ScaleContinuous};
use crate::style::StrokeStyle;
use crate::text_mark::TextMarkSpec;

/// Formats a tick value given the tick step.
pub type TickFormatter = Arc<dyn Fn(f64, f64) -> String>;

/// Shared text styling for axis labels.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabelStyle {
    /// Label fill.
    pub fill: Brush,
    /// Label font size.
    pub font_size: f64,
    /// Label font family.
    pub font_family: Option<String>,
}

impl Default for AxisLabelStyle {
    fn default() -> Self {
        Self {
            fill: Brush::default(),
            font_size: 12.0,
            font_family: None,
        }
    }
}

impl AxisLabelStyle {
    fn text(&self, id: MarkId, pos: Point, text: impl Into<String>) -> TextMarkSpec {
        TextMarkSpec::new(id, pos, text)
            .with_font_size(self.font_size)
            .with_font_family(self.font_family.clone())
            .with_fill(self.fill.clone())
    }
}

/// Horizontal extent `(left, right)` of the cell owned by category `index`.
pub fn cell_bounds(band: &ScaleBand, index: usize) -> (f64, f64) {
    let c = band.center(index);
    let half = band.step() * 0.5;
    (c - half, c + half)
}

fn tick_step(ticks: &[f64]) -> f64 {
    if ticks.len() >= 2 {
        (ticks[1] - ticks[0]).abs()
    } else {
        1.0
    }
}

/// A left value axis: tick rules, prefixed labels and an optional title, with no domain line.
#[derive(Clone)]
pub struct ValueAxisSpec {
    /// Stable-id base; ticks use `+1+i`, labels `+1000+i`, the title `+9000`.
    pub id_base: u64,
    /// Explicit tick values; `None` asks the scale for nice ticks.
    pub tick_values: Option<Vec<f64>>,
    /// Approximate tick count when ticks are not explicit.
    pub tick_count: usize,
    /// Tick rule length, extending left from the axis position.
    pub tick_size: f64,
    /// Gap between tick rule and label.
    pub tick_padding: f64,
    /// Text prepended to every tick label.
    pub label_prefix: String,
    /// Optional tick label formatter (value, step).
    pub tick_formatter: Option<TickFormatter>,
    /// Tick rule stroke.
    pub rule: StrokeStyle,
    /// Tick label styling.
    pub labels: AxisLabelStyle,
    /// Optional axis title.
    pub title: Option<String>,
    /// Title position (start-anchored).
    pub title_pos: Point,
}

impl core::fmt::Debug for ValueAxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValueAxisSpec")
            .field("id_base", &self.id_base)
            .field("tick_values", &self.tick_values)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("label_prefix", &self.label_prefix)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .field("rule", &self.rule)
            .field("labels", &self.labels)
            .field("title", &self.title)
            .field("title_pos", &self.title_pos)
            .finish()
    }
}

impl ValueAxisSpec {
    /// Creates a value axis with nice ticks and no prefix.
    pub fn new(id_base: u64) -> Self {
        Self {
            id_base,
            tick_values: None,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            label_prefix: String::new(),
            tick_formatter: None,
            rule: StrokeStyle::default(),
            labels: AxisLabelStyle::default(),
            title: None,
            title_pos: Point::ZERO,
        }
    }

    /// Uses explicit tick values.
    pub fn with_tick_values(mut self, ticks: impl IntoIterator<Item = f64>) -> Self {
        self.tick_values = Some(ticks.into_iter().collect());
        self
    }

    /// Sets the label prefix.
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    /// Sets a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Sets the axis title and its position.
    pub fn with_title(mut self, title: impl Into<String>, pos: Point) -> Self {
        self.title = Some(title.into());
        self.title_pos = pos;
        self
    }

    /// Resolves tick values, dropping any that fall outside the scale's range.
    pub fn ticks(&self, scale: &ScaleContinuous) -> Vec<f64> {
        let raw = match &self.tick_values {
            Some(t) => t.clone(),
            None => scale.ticks(self.tick_count),
        };
        let (r0, r1) = scale.range();
        let (lo, hi) = (r0.min(r1) - 1e-9, r0.max(r1) + 1e-9);
        raw.into_iter()
            .filter(|v| {
                let y = scale.map(*v);
                y.is_finite() && y >= lo && y <= hi
            })
            .collect()
    }

    /// Formats a tick label, including the prefix.
    pub fn format(&self, v: f64, step: f64) -> String {
        let mut out = self.label_prefix.clone();
        match &self.tick_formatter {
            Some(f) => out.push_str(&f(v, step)),
            None => out.push_str(&format_tick_with_step(v, step)),
        }
        out
    }

    /// Generates tick rules and labels for an axis drawn at horizontal position `x`.
    pub fn marks(&self, scale: &ScaleContinuous, x: f64) -> Vec<Mark> {
        let ticks = self.ticks(scale);
        let step = tick_step(&ticks);
        let mut out = Vec::with_capacity(ticks.len() * 2 + 1);

        for (i, v) in ticks.iter().enumerate() {
            let y = scale.map(*v);
            out.push(
                RuleMarkSpec::horizontal(
                    MarkId::from_raw(self.id_base + 1 + i as u64),
                    y,
                    x - self.tick_size,
                    x,
                )
                .with_stroke_style(&self.rule)
                .mark(),
            );
            out.push(
                self.labels
                    .text(
                        MarkId::from_raw(self.id_base + 1000 + i as u64),
                        Point::new(x - self.tick_size - self.tick_padding, y),
                        self.format(*v, step),
                    )
                    .with_anchor(TextAnchor::End)
                    .with_baseline(TextBaseline::Middle)
                    .mark(),
            );
        }

        if let Some(title) = &self.title {
            out.push(
                self.labels
                    .text(
                        MarkId::from_raw(self.id_base + 9000),
                        self.title_pos,
                        title.clone(),
                    )
                    .with_anchor(TextAnchor::Start)
                    .with_baseline(TextBaseline::Hanging)
                    .mark(),
            );
        }
        out
    }
}

/// A bottom category axis drawn as a row of bordered cells.
#[derive(Clone, Debug)]
pub struct CellAxisSpec {
    /// Stable-id base; the domain rule uses `+0`, cells `+1+i`, labels `+1000+i`,
    /// separators `+2000+i`.
    pub id_base: u64,
    /// Category labels, one per band.
    pub labels: Vec<String>,
    /// Cell height.
    pub cell_height: f64,
    /// Cell fill.
    pub cell_fill: Brush,
    /// Cell border, domain line and separator stroke.
    pub rule: StrokeStyle,
    /// Label styling.
    pub label_style: AxisLabelStyle,
}

impl CellAxisSpec {
    /// Creates a cell axis for the given labels.
    pub fn new(id_base: u64, labels: Vec<String>) -> Self {
        Self {
            id_base,
            labels,
            cell_height: 39.0,
            cell_fill: Brush::default(),
            rule: StrokeStyle::default(),
            label_style: AxisLabelStyle::default(),
        }
    }

    /// Generates marks for an axis whose cells hang below `y`. Separators run from `y` up to
    /// `separator_top`.
    pub fn marks(&self, band: &ScaleBand, y: f64, separator_top: f64) -> Vec<Mark> {
        let (r0, r1) = band.range();
        let mut out = Vec::with_capacity(1 + self.labels.len() * 3);
        out.push(
            RuleMarkSpec::horizontal(MarkId::from_raw(self.id_base), y, r0.min(r1), r0.max(r1))
                .with_stroke_style(&self.rule)
                .mark(),
        );

        for (i, label) in self.labels.iter().enumerate().take(band.count()) {
            let (left, right) = cell_bounds(band, i);
            let i = i as u64;
            out.push(
                RectMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1 + i),
                    Rect::new(left, y, right, y + self.cell_height),
                )
                .with_fill(self.cell_fill.clone())
                .with_stroke(self.rule.clone())
                .mark(),
            );
            out.push(
                RuleMarkSpec::vertical(MarkId::from_raw(self.id_base + 2000 + i), left, y, separator_top)
                    .with_stroke_style(&self.rule)
                    .mark(),
            );
            out.push(
                self.label_style
                    .text(
                        MarkId::from_raw(self.id_base + 1000 + i),
                        Point::new((left + right) * 0.5, y + self.cell_height * 0.5),
                        label.clone(),
                    )
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Middle)
                    .mark(),
            );
        }
        out
    }
}

/// A header cell spanning `span` consecutive categories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderGroup {
    /// Header text.
    pub label: String,
    /// Number of category cells covered.
    pub span: usize,
}

impl HeaderGroup {
    /// Creates a header group.
    pub fn new(label: impl Into<String>, span: usize) -> Self {
        Self {
            label: label.into(),
            span,
        }
    }
}

/// Total number of category cells covered by `groups`.
pub fn header_span(groups: &[HeaderGroup]) -> usize {
    groups.iter().map(|g| g.span).sum()
}

/// A top axis of cells that each span several categories.
#[derive(Clone, Debug)]
pub struct HeaderAxisSpec {
    /// Stable-id base; cells use `+1+i`, labels `+1000+i`.
    pub id_base: u64,
    /// Header groups, left to right.
    pub groups: Vec<HeaderGroup>,
    /// Cell height.
    pub cell_height: f64,
    /// Cell fill.
    pub cell_fill: Brush,
    /// Cell border stroke.
    pub rule: StrokeStyle,
    /// Label styling.
    pub label_style: AxisLabelStyle,
}

impl HeaderAxisSpec {
    /// Creates a header axis.
    pub fn new(id_base: u64, groups: Vec<HeaderGroup>) -> Self {
        Self {
            id_base,
            groups,
            cell_height: 39.0,
            cell_fill: Brush::default(),
            rule: StrokeStyle::default(),
            label_style: AxisLabelStyle::default(),
        }
    }

    /// Generates header cells whose bottom edge sits at `bottom`.
    ///
    /// Groups that would run past the last category are clipped; zero-width groups are
    /// skipped.
    pub fn marks(&self, band: &ScaleBand, bottom: f64) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.groups.len() * 2);
        let mut first = 0_usize;
        for (i, group) in self.groups.iter().enumerate() {
            let last = (first + group.span).min(band.count());
            if last <= first {
                first += group.span;
                continue;
            }
            let (a0, a1) = cell_bounds(band, first);
            let (b0, b1) = cell_bounds(band, last - 1);
            // Reversed ranges lay the last category out on the left.
            let (left, right) = (a0.min(b0), a1.max(b1));
            let top = bottom - self.cell_height;
            let i = i as u64;

            out.push(
                RectMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1 + i),
                    Rect::new(left, top, right, bottom),
                )
                .with_fill(self.cell_fill.clone())
                .with_stroke(self.rule.clone())
                .mark(),
            );
            out.push(
                self.label_style
                    .text(
                        MarkId::from_raw(self.id_base + 1000 + i),
                        Point::new((left + right) * 0.5, top + self.cell_height * 0.5),
                        group.label.clone(),
                    )
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Middle)
                    .mark(),
            );
            first += group.span;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;
    use crate::scale::ValueScaleKind;

    fn value_scale() -> ScaleContinuous {
        ValueScaleKind::Linear.instantiate((0.0, 5.0), (326.0, 50.0))
    }

    #[test]
    fn explicit_ticks_outside_the_range_are_dropped() {
        let axis = ValueAxisSpec::new(0)
            .with_tick_values([1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .with_label_prefix("NIVÅ ");
        assert_eq!(axis.ticks(&value_scale()), [1.0, 2.0, 3.0, 4.0, 5.0]);

        let marks = axis.marks(&value_scale(), 50.0);
        assert_eq!(marks.len(), 10);
        let label = marks[1].as_text().expect("label");
        assert_eq!(label.text, "NIVÅ 1");
        assert_eq!(label.anchor, TextAnchor::End);
        assert_eq!(label.pos.x, 50.0 - 6.0 - 3.0);
    }

    #[test]
    fn value_axis_has_no_domain_line() {
        let marks = ValueAxisSpec::new(0).marks(&value_scale(), 50.0);
        // Every rule is a short tick, never the full plot height.
        for m in &marks {
            if m.as_path().is_some() {
                let bounds = m.payload.bounds().expect("rule bounds");
                assert!(bounds.width() <= 6.0 + 1e-9);
                assert!(bounds.height() < 1e-9);
            }
        }
    }

    #[test]
    fn custom_formatter_keeps_prefix() {
        let axis = ValueAxisSpec::new(0)
            .with_tick_values([2.0])
            .with_label_prefix("L")
            .with_tick_formatter(|v, _| (v as i64).to_string());
        assert_eq!(axis.format(2.0, 1.0), "L2");
    }

    #[test]
    fn cells_tile_the_band_and_separators_reach_up() {
        let band = ScaleBand::new((0.0, 100.0), 4).with_padding_inner(0.1);
        let axis = CellAxisSpec::new(0, ["a", "b", "c", "d"].map(String::from).to_vec());
        let marks = axis.marks(&band, 80.0, 10.0);
        assert_eq!(marks.len(), 1 + 4 * 3);

        let c0 = marks[1].as_rect().expect("cell").rect;
        let c1 = marks[4].as_rect().expect("cell").rect;
        assert!((c0.x1 - c1.x0).abs() < 1e-9);
        assert!((c0.width() - band.step()).abs() < 1e-9);
        assert_eq!(c0.y0, 80.0);
        assert_eq!(c0.height(), 39.0);

        let sep = marks[2].payload.bounds().expect("separator");
        assert!((sep.x0 - c0.x0).abs() < 1e-9);
        assert_eq!((sep.y0, sep.y1), (10.0, 80.0));
    }

    #[test]
    fn header_cells_span_consecutive_categories() {
        let band = ScaleBand::new((0.0, 70.0), 7).with_padding_inner(0.1);
        let axis = HeaderAxisSpec::new(
            0,
            std::vec![
                HeaderGroup::new("X", 2),
                HeaderGroup::new("Y", 2),
                HeaderGroup::new("Z", 3),
            ],
        );
        let marks = axis.marks(&band, 40.0);
        assert_eq!(marks.len(), 6);

        let x = marks[0].as_rect().expect("cell").rect;
        let z = marks[4].as_rect().expect("cell").rect;
        assert!((x.width() - 2.0 * band.step()).abs() < 1e-9);
        assert!((z.width() - 3.0 * band.step()).abs() < 1e-9);
        assert!((z.x1 - cell_bounds(&band, 6).1).abs() < 1e-9);
        assert_eq!(x.y1, 40.0);
        assert_eq!(header_span(&axis.groups), 7);
    }
}
