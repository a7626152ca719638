// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped bar chart renderer.
//!
//! [`GroupedBarChartSpec`] maps a slice of records to:
//! - a category band scale (outer) and a group band scale nested inside each category band,
//! - a continuous value scale over an inverted vertical range,
//! - an ordinal color scale over the group domain,
//!
//! and appends one named [`MarkGroup`] per layer to a [`Surface`]. Every render clears the
//! surface first, so rendering the same spec twice leaves the same content.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use barviz_core::{Mark, MarkGroup, MarkId, Surface};
use kurbo::{Point, Rect};
use peniko::color::{Srgb, parse_color};
use peniko::{Brush, Color};

use crate::axis::{
    AxisLabelStyle, CellAxisSpec, HeaderAxisSpec, HeaderGroup, ValueAxisSpec, header_span,
};
use crate::bar_mark::{BarRow, GroupedBarMarkSpec};
use crate::data::{ChartAccessors, DataPoint, ReferenceTarget};
use crate::domain::Domain;
use crate::error::{ConfigurationError, DomainAxis};
use crate::format::format_tick_with_step;
use crate::labels::LabelTable;
use crate::layout::{Margins, PlotFrame};
use crate::legend::{LegendColumn, LegendItem};
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::rect_mark::RectMarkSpec;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBand, ScaleContinuous, ScaleOrdinal, ValueScaleKind};
use crate::style::ChartStyle;
use crate::z_order;

/// Layer (group) names appended to the surface, in append order.
pub mod layers {
    /// Plot background.
    pub const BACKGROUND: &str = "background";
    /// Bars.
    pub const BARS: &str = "bars";
    /// Reference lines.
    pub const REFERENCE_LINES: &str = "reference-lines";
    /// Left value axis.
    pub const VALUE_AXIS: &str = "y-axis";
    /// Bottom category cells.
    pub const CATEGORY_AXIS: &str = "x-axis";
    /// Top header cells.
    pub const HEADER: &str = "header";
    /// Right border rule.
    pub const BORDER: &str = "right-border";
    /// Legend.
    pub const LEGEND: &str = "legend";
}

/// Mark id of the background rect.
pub const BACKGROUND_ID: u64 = 0x1_0000;
/// Id base for value axis marks.
pub const VALUE_AXIS_ID_BASE: u64 = 0x2_0000;
/// Id base for category axis marks.
pub const CATEGORY_AXIS_ID_BASE: u64 = 0x3_0000;
/// Id base for header marks.
pub const HEADER_ID_BASE: u64 = 0x4_0000;
/// Id base for reference lines; target `i` uses `+i`.
pub const REFERENCE_ID_BASE: u64 = 0x5_0000;
/// Mark id of the right border rule.
pub const BORDER_ID: u64 = 0x6_0000;
/// Id base for the group legend column.
pub const GROUP_LEGEND_ID_BASE: u64 = 0x7_0000;
/// Id base for the reference legend column.
pub const REFERENCE_LEGEND_ID_BASE: u64 = 0x8_0000;
/// Id base for bars; the bar for source row `r` uses `+r`.
pub const BAR_ID_BASE: u64 = 0x10_0000;

/// Formats a value given a tick step.
pub type ValueFormatter = Arc<dyn Fn(f64, f64) -> String>;
/// Builds a bar tooltip from the record, its row index and the full dataset.
pub type TitleFn<T> = Arc<dyn Fn(&T, usize, &[T]) -> String>;

/// The default palette: dark, mid and light blue.
pub fn default_colors() -> Vec<Brush> {
    vec![
        Brush::Solid(Color::from_rgb8(0x2e, 0x7c, 0xf6)),
        Brush::Solid(Color::from_rgb8(0x82, 0xb0, 0xfa)),
        Brush::Solid(Color::from_rgb8(0xc0, 0xd8, 0xfc)),
    ]
}

/// Parses CSS color strings into a palette.
pub fn parse_palette(colors: &[&str]) -> Result<Vec<Brush>, ConfigurationError> {
    colors
        .iter()
        .map(|c| {
            parse_color(c)
                .map(|dc| Brush::Solid(dc.to_alpha_color::<Srgb>()))
                .map_err(|_| ConfigurationError::InvalidColor((*c).to_string()))
        })
        .collect()
}

/// A grouped bar chart specification.
///
/// `T` is the record type; [`ChartAccessors`] extract category (x), value (y) and group (z)
/// from each record.
pub struct GroupedBarChartSpec<T = DataPoint> {
    /// Field accessors.
    pub accessors: ChartAccessors<T>,
    /// Tooltip builder; `None` uses `"{category}\n{group}\n{value}"`.
    pub title: Option<TitleFn<T>>,
    /// Outer margins.
    pub margins: Margins,
    /// Outer width (required).
    pub width: Option<f64>,
    /// Outer height (required).
    pub height: Option<f64>,
    /// Explicit category domain.
    pub x_domain: Option<Vec<String>>,
    /// Explicit group domain.
    pub z_domain: Option<Vec<String>>,
    /// Explicit value domain.
    pub y_domain: Option<(f64, f64)>,
    /// Horizontal range override.
    pub x_range: Option<(f64, f64)>,
    /// Vertical range override (bottom first).
    pub y_range: Option<(f64, f64)>,
    /// Inner padding between category bands.
    pub x_padding: f64,
    /// Inner and outer padding between bars within a category.
    pub z_padding: f64,
    /// Value scale type.
    pub y_type: ValueScaleKind,
    /// Explicit value ticks.
    pub y_ticks: Option<Vec<f64>>,
    /// Value tick label prefix.
    pub y_tick_prefix: String,
    /// Value formatter for tick labels and default tooltips.
    pub y_format: Option<ValueFormatter>,
    /// Optional value axis label, drawn at the top-left.
    pub y_label: Option<String>,
    /// Group palette.
    pub colors: Vec<Brush>,
    /// Header cells above the plot.
    pub header: Vec<HeaderGroup>,
    /// Legend label translations for group keys.
    pub labels: LabelTable,
    /// Cosmetic constants.
    pub style: ChartStyle,
}

impl<T> Clone for GroupedBarChartSpec<T> {
    fn clone(&self) -> Self {
        Self {
            accessors: self.accessors.clone(),
            title: self.title.clone(),
            margins: self.margins,
            width: self.width,
            height: self.height,
            x_domain: self.x_domain.clone(),
            z_domain: self.z_domain.clone(),
            y_domain: self.y_domain,
            x_range: self.x_range,
            y_range: self.y_range,
            x_padding: self.x_padding,
            z_padding: self.z_padding,
            y_type: self.y_type,
            y_ticks: self.y_ticks.clone(),
            y_tick_prefix: self.y_tick_prefix.clone(),
            y_format: self.y_format.clone(),
            y_label: self.y_label.clone(),
            colors: self.colors.clone(),
            header: self.header.clone(),
            labels: self.labels.clone(),
            style: self.style.clone(),
        }
    }
}

impl<T> core::fmt::Debug for GroupedBarChartSpec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GroupedBarChartSpec")
            .field("title", &self.title.is_some())
            .field("margins", &self.margins)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("x_domain", &self.x_domain)
            .field("z_domain", &self.z_domain)
            .field("y_domain", &self.y_domain)
            .field("x_range", &self.x_range)
            .field("y_range", &self.y_range)
            .field("x_padding", &self.x_padding)
            .field("z_padding", &self.z_padding)
            .field("y_type", &self.y_type)
            .field("y_ticks", &self.y_ticks)
            .field("y_tick_prefix", &self.y_tick_prefix)
            .field("y_format", &self.y_format.is_some())
            .field("y_label", &self.y_label)
            .field("colors", &self.colors.len())
            .field("header", &self.header)
            .field("labels", &self.labels)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl Default for GroupedBarChartSpec<f64> {
    fn default() -> Self {
        Self::new(ChartAccessors::default())
    }
}

impl GroupedBarChartSpec<DataPoint> {
    /// A spec reading the fields of [`DataPoint`].
    pub fn for_data_points() -> Self {
        Self::new(DataPoint::accessors())
    }
}

/// The resolved state of one render.
#[derive(Clone, Debug)]
pub struct GroupedBarChart {
    /// Category domain, in band order.
    pub x_domain: Domain,
    /// Group domain, in sub-band order.
    pub z_domain: Domain,
    /// Value domain.
    pub y_domain: (f64, f64),
    /// Category band scale.
    pub x_scale: ScaleBand,
    /// Group band scale inside one category band.
    pub xz_scale: ScaleBand,
    /// Value scale.
    pub y_scale: ScaleContinuous,
    /// Group color scale.
    pub color: ScaleOrdinal,
    /// Plot rectangle.
    pub plot: Rect,
    /// Source row indices that produced a bar, in input order.
    pub rendered: Vec<usize>,
}

impl<T> GroupedBarChartSpec<T> {
    /// Creates a spec with default configuration.
    pub fn new(accessors: ChartAccessors<T>) -> Self {
        Self {
            accessors,
            title: None,
            margins: Margins::default(),
            width: None,
            height: None,
            x_domain: None,
            z_domain: None,
            y_domain: None,
            x_range: None,
            y_range: None,
            x_padding: 0.1,
            z_padding: 0.05,
            y_type: ValueScaleKind::Linear,
            y_ticks: None,
            y_tick_prefix: String::new(),
            y_format: None,
            y_label: None,
            colors: default_colors(),
            header: Vec::new(),
            labels: LabelTable::new(),
            style: ChartStyle::default(),
        }
    }

    /// Sets the outer size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets a custom tooltip builder.
    pub fn with_title(mut self, f: impl Fn(&T, usize, &[T]) -> String + 'static) -> Self {
        self.title = Some(Arc::new(f));
        self
    }

    /// Sets an explicit category domain.
    pub fn with_x_domain<S: Into<String>>(mut self, domain: impl IntoIterator<Item = S>) -> Self {
        self.x_domain = Some(domain.into_iter().map(Into::into).collect());
        self
    }

    /// Sets an explicit group domain.
    pub fn with_z_domain<S: Into<String>>(mut self, domain: impl IntoIterator<Item = S>) -> Self {
        self.z_domain = Some(domain.into_iter().map(Into::into).collect());
        self
    }

    /// Sets an explicit value domain.
    pub fn with_y_domain(mut self, min: f64, max: f64) -> Self {
        self.y_domain = Some((min, max));
        self
    }

    /// Overrides the horizontal range.
    pub fn with_x_range(mut self, x0: f64, x1: f64) -> Self {
        self.x_range = Some((x0, x1));
        self
    }

    /// Overrides the vertical range (bottom first).
    pub fn with_y_range(mut self, y0: f64, y1: f64) -> Self {
        self.y_range = Some((y0, y1));
        self
    }

    /// Sets the inner padding between categories.
    pub fn with_x_padding(mut self, padding: f64) -> Self {
        self.x_padding = padding;
        self
    }

    /// Sets the padding between bars in a category.
    pub fn with_z_padding(mut self, padding: f64) -> Self {
        self.z_padding = padding;
        self
    }

    /// Sets the value scale type.
    pub fn with_y_type(mut self, kind: ValueScaleKind) -> Self {
        self.y_type = kind;
        self
    }

    /// Uses explicit value ticks.
    pub fn with_y_ticks(mut self, ticks: impl IntoIterator<Item = f64>) -> Self {
        self.y_ticks = Some(ticks.into_iter().collect());
        self
    }

    /// Sets the value tick label prefix.
    pub fn with_y_tick_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.y_tick_prefix = prefix.into();
        self
    }

    /// Sets the value formatter (value, step).
    pub fn with_y_format(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.y_format = Some(Arc::new(f));
        self
    }

    /// Sets the value axis label.
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    /// Sets the group palette.
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Brush>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    /// Sets the header cells.
    pub fn with_header(mut self, header: impl IntoIterator<Item = HeaderGroup>) -> Self {
        self.header = header.into_iter().collect();
        self
    }

    /// Sets the legend label table.
    pub fn with_labels(mut self, labels: LabelTable) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the style.
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Renders into `surface` using [`HeuristicTextMeasurer`] for legend layout.
    pub fn render(
        &self,
        data: &[T],
        targets: &[ReferenceTarget],
        surface: &mut Surface,
    ) -> Result<GroupedBarChart, ConfigurationError> {
        self.render_with_measurer(data, targets, surface, &HeuristicTextMeasurer)
    }

    /// Renders into a fresh surface sized to the chart.
    pub fn render_to_surface(
        &self,
        data: &[T],
        targets: &[ReferenceTarget],
    ) -> Result<(Surface, GroupedBarChart), ConfigurationError> {
        let mut surface = Surface::new(0.0, 0.0);
        let chart = self.render(data, targets, &mut surface)?;
        Ok((surface, chart))
    }

    /// Renders into `surface`.
    ///
    /// All configuration is validated before the surface is touched; on error the surface
    /// keeps its previous content.
    pub fn render_with_measurer(
        &self,
        data: &[T],
        targets: &[ReferenceTarget],
        surface: &mut Surface,
        measurer: &dyn TextMeasurer,
    ) -> Result<GroupedBarChart, ConfigurationError> {
        let frame = PlotFrame::resolve(
            self.width,
            self.height,
            self.margins,
            self.x_range,
            self.y_range,
        )?;
        let plot = frame.plot();

        let xs: Vec<String> = data
            .iter()
            .enumerate()
            .map(|(i, d)| (self.accessors.x)(d, i))
            .collect();
        let ys: Vec<f64> = data
            .iter()
            .enumerate()
            .map(|(i, d)| (self.accessors.y)(d, i))
            .collect();
        let zs: Vec<String> = data
            .iter()
            .enumerate()
            .map(|(i, d)| (self.accessors.z)(d, i))
            .collect();

        let x_domain = match &self.x_domain {
            Some(d) => Domain::from_values(d.iter().cloned()),
            None => Domain::from_values(xs.iter().cloned()),
        };
        let z_domain = match &self.z_domain {
            Some(d) => Domain::from_values(d.iter().cloned()),
            None => Domain::from_values(zs.iter().cloned()),
        };
        if x_domain.is_empty() {
            return Err(ConfigurationError::EmptyDomain(DomainAxis::Category));
        }
        if z_domain.is_empty() {
            return Err(ConfigurationError::EmptyDomain(DomainAxis::Group));
        }

        let y_domain = match self.y_domain {
            Some(d) => d,
            None => (
                0.0,
                ys.iter()
                    .copied()
                    .filter(|v| v.is_finite())
                    .fold(f64::NAN, f64::max),
            ),
        };
        let (min, max) = y_domain;
        let positive = min > 0.0 && max > 0.0;
        if !(min.is_finite() && max.is_finite())
            || (self.y_type == ValueScaleKind::Log && !positive)
        {
            return Err(ConfigurationError::InvalidValueDomain { min, max });
        }

        let color = ScaleOrdinal::new(z_domain.clone(), self.colors.clone())
            .ok_or(ConfigurationError::EmptyPalette)?;

        let spans = header_span(&self.header);
        if spans > x_domain.len() {
            return Err(ConfigurationError::HeaderSpanOverflow {
                spans,
                categories: x_domain.len(),
            });
        }

        let x_scale =
            ScaleBand::new(frame.x_range, x_domain.len()).with_padding_inner(self.x_padding);
        let xz_scale = ScaleBand::new((0.0, x_scale.band_width()), z_domain.len())
            .with_padding(self.z_padding, self.z_padding);
        let y_scale = self.y_type.instantiate(y_domain, frame.y_range);

        let title_step = y_scale.tick_step(100);
        let format_value = |v: f64| match &self.y_format {
            Some(f) => f(v, title_step),
            None => format_tick_with_step(v, title_step),
        };

        let mut rows = Vec::new();
        for (i, (x, z)) in xs.iter().zip(&zs).enumerate() {
            let (Some(category), Some(group)) = (x_domain.index_of(x), z_domain.index_of(z))
            else {
                continue;
            };
            // A bar needs a height; rows without a finite value are dropped like
            // out-of-domain rows.
            if !ys[i].is_finite() {
                log::debug!("grouped bar chart: skipping row {i} ({x}, {z}) with value {}", ys[i]);
                continue;
            }
            let title = match &self.title {
                Some(f) => f(&data[i], i, data),
                None => alloc::format!("{x}\n{z}\n{}", format_value(ys[i])),
            };
            rows.push(BarRow {
                row: i,
                category,
                group,
                value: ys[i],
                title: Some(title),
            });
        }
        log::debug!(
            "grouped bar chart: {} of {} records in domain ({} categories, {} groups)",
            rows.len(),
            data.len(),
            x_domain.len(),
            z_domain.len()
        );

        // Validation is done; from here on the surface is rewritten.
        surface.clear();
        surface.set_view(frame.view);

        let style = &self.style;
        let background_top = plot.y0 - style.header_gap;
        let labels = AxisLabelStyle {
            fill: style.label_fill.clone(),
            font_size: style.label_font_size,
            font_family: style.font_family.clone(),
        };

        surface.append(
            MarkGroup::new(layers::BACKGROUND, z_order::PLOT_BACKGROUND).with_marks([
                RectMarkSpec::new(
                    MarkId::from_raw(BACKGROUND_ID),
                    Rect::new(plot.x0, background_top, plot.x1, plot.y1),
                )
                .with_fill(style.background.clone())
                .mark(),
            ]),
        );

        let bars = GroupedBarMarkSpec::new(BAR_ID_BASE, x_scale, xz_scale, y_scale)
            .with_bar_width(style.bar_width)
            .with_corner_radius(style.bar_corner_radius);
        surface.append(
            MarkGroup::new(layers::BARS, z_order::SERIES_FILL).with_marks(bars.marks(&rows, &color)),
        );

        surface.append(
            MarkGroup::new(layers::REFERENCE_LINES, z_order::SERIES_STROKE).with_marks(
                targets.iter().enumerate().map(|(i, t)| {
                    RuleMarkSpec::horizontal(
                        MarkId::from_raw(REFERENCE_ID_BASE + i as u64),
                        y_scale.map(t.value),
                        plot.x0,
                        plot.x1,
                    )
                    .with_stroke_style(&style.reference_line)
                    .with_dash(i as f64 * style.reference_dash_step)
                    .mark()
                }),
            ),
        );

        let mut value_axis = ValueAxisSpec::new(VALUE_AXIS_ID_BASE);
        value_axis.tick_values = self.y_ticks.clone();
        value_axis.tick_size = style.value_tick_size;
        value_axis.tick_padding = style.value_tick_padding;
        value_axis.label_prefix = self.y_tick_prefix.clone();
        value_axis.tick_formatter = self.y_format.clone();
        value_axis.rule = style.rule.clone();
        value_axis.labels = labels.clone();
        if let Some(label) = &self.y_label {
            value_axis = value_axis.with_title(
                label.clone(),
                Point::new(frame.view.x0, frame.view.y0 + style.header_gap),
            );
        }
        surface.append(
            MarkGroup::new(layers::VALUE_AXIS, z_order::AXES)
                .with_marks(value_axis.marks(&y_scale, plot.x0)),
        );

        let mut category_axis =
            CellAxisSpec::new(CATEGORY_AXIS_ID_BASE, x_domain.iter().map(String::from).collect());
        category_axis.cell_height = style.cell_height;
        category_axis.cell_fill = style.cell_fill.clone();
        category_axis.rule = style.rule.clone();
        category_axis.label_style = labels.clone();
        surface.append(
            MarkGroup::new(layers::CATEGORY_AXIS, z_order::AXES)
                .with_marks(category_axis.marks(&x_scale, plot.y1, background_top)),
        );

        let mut header = HeaderAxisSpec::new(HEADER_ID_BASE, self.header.clone());
        header.cell_height = style.cell_height;
        header.cell_fill = style.cell_fill.clone();
        header.rule = style.rule.clone();
        header.label_style = labels;
        surface.append(
            MarkGroup::new(layers::HEADER, z_order::AXES)
                .with_marks(header.marks(&x_scale, background_top)),
        );

        surface.append(
            MarkGroup::new(layers::BORDER, z_order::AXES).with_marks([RuleMarkSpec::vertical(
                MarkId::from_raw(BORDER_ID),
                plot.x1,
                frame.view.y0,
                plot.y1,
            )
            .with_stroke_style(&style.rule)
            .mark()]),
        );

        surface.append(
            MarkGroup::new(layers::LEGEND, z_order::LEGEND)
                .with_marks(self.legend_marks(&color, targets, measurer)),
        );

        Ok(GroupedBarChart {
            x_domain,
            z_domain,
            y_domain,
            x_scale,
            xz_scale,
            y_scale,
            color,
            plot,
            rendered: rows.iter().map(|r| r.row).collect(),
        })
    }

    fn legend_text(&self, text: &str) -> String {
        if self.style.legend_uppercase {
            text.to_uppercase()
        } else {
            String::from(text)
        }
    }

    fn legend_column(&self, id_base: u64, origin: Point, items: Vec<LegendItem>) -> LegendColumn {
        let style = &self.style;
        let mut column = LegendColumn::new(id_base, origin).with_items(items);
        column.row_gap = style.legend_row_gap;
        column.dot_radius = style.legend_dot_radius;
        column.swatch_length = style.legend_swatch_length;
        column.label_dx = style.legend_label_dx;
        column.font_size = style.legend_font_size;
        column.font_family = style.font_family.clone();
        column.text_fill = style.label_fill.clone();
        column
    }

    fn legend_marks(
        &self,
        color: &ScaleOrdinal,
        targets: &[ReferenceTarget],
        measurer: &dyn TextMeasurer,
    ) -> Vec<Mark> {
        let style = &self.style;
        let groups = self.legend_column(
            GROUP_LEGEND_ID_BASE,
            style.legend_origin,
            color
                .domain()
                .iter()
                .enumerate()
                .map(|(i, key)| {
                    LegendItem::dot(self.legend_text(self.labels.label(key)), color.at(i).clone())
                })
                .collect(),
        );

        let second_x = style.legend_origin.x + groups.width(measurer) + style.legend_column_gap;
        let references = self.legend_column(
            REFERENCE_LEGEND_ID_BASE,
            Point::new(second_x, style.legend_origin.y),
            targets
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    LegendItem::rule(
                        self.legend_text(&t.name),
                        style.reference_line.clone(),
                        i as f64 * style.reference_dash_step,
                    )
                })
                .collect(),
        );

        let mut out = groups.marks();
        out.extend(references.marks());
        out
    }
}
