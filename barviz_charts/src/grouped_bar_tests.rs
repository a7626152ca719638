// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use barviz_core::{Mark, MarkId, Surface};
use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;

use crate::{
    BAR_ID_BASE, ChartStyle, ConfigurationError, DataPoint, DomainAxis, GroupedBarChartSpec,
    HeaderGroup, LabelTable, ReferenceTarget, ValueScaleKind, default_colors, layers,
    parse_palette,
};

fn dp(category: &str, value: f64, group: &str) -> DataPoint {
    DataPoint::new(category, value, group)
}

fn spec() -> GroupedBarChartSpec {
    GroupedBarChartSpec::for_data_points().with_size(800.0, 476.0)
}

fn ab_data() -> Vec<DataPoint> {
    vec![
        dp("A", 1.0, "g1"),
        dp("A", 3.0, "g2"),
        dp("B", 2.0, "g1"),
        dp("B", 2.0, "g2"),
    ]
}

fn bars(surface: &Surface) -> &[Mark] {
    &surface.group(layers::BARS).expect("bars layer").marks
}

fn assert_rect_close(a: Rect, b: Rect) {
    let eps = 1e-9;
    assert!((a.x0 - b.x0).abs() <= eps, "x0 {a:?} != {b:?}");
    assert!((a.y0 - b.y0).abs() <= eps, "y0 {a:?} != {b:?}");
    assert!((a.x1 - b.x1).abs() <= eps, "x1 {a:?} != {b:?}");
    assert!((a.y1 - b.y1).abs() <= eps, "y1 {a:?} != {b:?}");
}

#[test]
fn one_bar_per_in_domain_record() {
    let data = vec![
        dp("A", 1.0, "g1"),
        dp("B", 2.0, "g1"),
        dp("C", 3.0, "g1"),
        dp("A", 4.0, "g2"),
    ];
    let mut surface = Surface::new(0.0, 0.0);
    let chart = spec()
        .with_x_domain(["A", "B"])
        .with_z_domain(["g1"])
        .render(&data, &[], &mut surface)
        .expect("render");

    assert_eq!(chart.rendered, [0, 1]);
    assert_eq!(bars(&surface).len(), 2);
    assert!(surface.mark(MarkId::for_row(BAR_ID_BASE, 2)).is_none());
    assert!(surface.mark(MarkId::for_row(BAR_ID_BASE, 3)).is_none());
}

#[test]
fn default_value_domain_spans_zero_to_max_of_all_records() {
    let data = vec![dp("A", 1.0, "g1"), dp("A", 5.0, "g1"), dp("B", 3.0, "g1")];
    let chart = spec()
        .render_to_surface(&data, &[])
        .expect("render")
        .1;
    assert_eq!(chart.y_domain, (0.0, 5.0));

    // Filtered-out records still contribute to the derived value domain.
    let chart = spec()
        .with_x_domain(["B"])
        .render_to_surface(&data, &[])
        .expect("render")
        .1;
    assert_eq!(chart.y_domain, (0.0, 5.0));
}

#[test]
fn non_finite_values_are_ignored_for_the_value_domain() {
    let data = vec![dp("A", f64::NAN, "g1"), dp("B", 2.0, "g1")];
    let chart = spec().render_to_surface(&data, &[]).expect("render").1;
    assert_eq!(chart.y_domain, (0.0, 2.0));
}

#[test]
fn rows_without_a_finite_value_draw_no_bar() {
    let data = vec![
        dp("A", f64::NAN, "g1"),
        dp("B", 2.0, "g1"),
        dp("C", f64::INFINITY, "g1"),
    ];
    let (surface, chart) = spec().render_to_surface(&data, &[]).expect("render");
    assert_eq!(chart.rendered, [1]);
    assert_eq!(bars(&surface).len(), 1);
    // The category still gets its cell.
    let xs: Vec<&str> = chart.x_domain.iter().collect();
    assert_eq!(xs, ["A", "B", "C"]);
    assert!(!surface.to_svg_string().contains("NaN"));
}

#[test]
fn reversed_ranges_are_honoured() {
    let (surface, chart) = spec()
        .with_x_range(780.0, 50.0)
        .with_y_range(50.0, 326.0)
        .render_to_surface(&ab_data(), &[])
        .expect("reversed ranges render");
    assert_eq!(chart.plot, Rect::new(50.0, 50.0, 780.0, 326.0));

    // First category sits on the right.
    let rect = |row| {
        surface
            .mark(MarkId::for_row(BAR_ID_BASE, row))
            .and_then(Mark::as_rect)
            .map(|r| r.rect)
            .expect("bar")
    };
    assert!(rect(0).x0 > rect(2).x0);
    // Values grow downwards from the top edge.
    assert!((rect(0).y0 - 50.0).abs() < 1e-9);
    assert!(rect(1).height() > rect(0).height());
}

#[test]
fn default_tooltip_precision_follows_hundred_tick_step() {
    let data = vec![dp("A", 3.0, "g1"), dp("B", 7.2, "g1")];
    let surface = spec().render_to_surface(&data, &[]).expect("render").0;
    let title = surface
        .mark(MarkId::for_row(BAR_ID_BASE, 0))
        .and_then(Mark::as_rect)
        .and_then(|r| r.title.clone());
    assert_eq!(title.as_deref(), Some("A\ng1\n3.0"));
}

#[test]
fn derived_domains_keep_first_seen_order() {
    let data = vec![
        dp("B", 1.0, "g2"),
        dp("A", 1.0, "g1"),
        dp("B", 1.0, "g1"),
        dp("C", 1.0, "g2"),
    ];
    let chart = spec().render_to_surface(&data, &[]).expect("render").1;
    let xs: Vec<&str> = chart.x_domain.iter().collect();
    let zs: Vec<&str> = chart.z_domain.iter().collect();
    assert_eq!(xs, ["B", "A", "C"]);
    assert_eq!(zs, ["g2", "g1"]);
}

#[test]
fn explicit_domains_are_deduplicated_in_supplied_order() {
    let chart = spec()
        .with_x_domain(["B", "A", "B"])
        .render_to_surface(&ab_data(), &[])
        .expect("render")
        .1;
    let xs: Vec<&str> = chart.x_domain.iter().collect();
    assert_eq!(xs, ["B", "A"]);
    // B's bars sit in the first band.
    let b_row = chart.x_scale.x(0);
    assert!(b_row < chart.x_scale.x(1));
}

#[test]
fn rendering_is_deterministic_and_does_not_accumulate() {
    let targets = [ReferenceTarget::new("goal", 4.0)];
    let spec = spec();

    let mut a = Surface::new(0.0, 0.0);
    let mut b = Surface::new(0.0, 0.0);
    spec.render(&ab_data(), &targets, &mut a).expect("render a");
    spec.render(&ab_data(), &targets, &mut b).expect("render b");
    assert_eq!(a, b);
    assert_eq!(a.to_svg_string(), b.to_svg_string());

    let count = a.mark_count();
    spec.render(&ab_data(), &targets, &mut a).expect("re-render");
    assert_eq!(a.mark_count(), count);
    assert_eq!(a, b);
    assert_eq!(bars(&a).len(), 4);
}

#[test]
fn nth_group_gets_nth_palette_color_cyclically() {
    let data: Vec<DataPoint> = ["g1", "g2", "g3", "g4", "g5"]
        .iter()
        .map(|g| dp("A", 1.0, g))
        .collect();
    let palette = parse_palette(&["#ff0000", "#00ff00"]).expect("valid colors");
    let mut surface = Surface::new(0.0, 0.0);
    let chart = spec()
        .with_colors(palette.clone())
        .render(&data, &[], &mut surface)
        .expect("render");

    for (i, mark) in bars(&surface).iter().enumerate() {
        let rect = mark.as_rect().expect("bar");
        assert_eq!(rect.fill, palette[i % 2], "bar {i}");
        assert_eq!(chart.color.at(i), &palette[i % 2]);
    }
}

#[test]
fn grouped_scenario_places_bars_and_goal_line() {
    let data = ab_data();
    let targets = [ReferenceTarget::new("goal", 4.0)];
    let style = ChartStyle {
        legend_uppercase: false,
        ..ChartStyle::default()
    };
    let mut surface = Surface::new(0.0, 0.0);
    let chart = spec()
        .with_style(style)
        .render(&data, &targets, &mut surface)
        .expect("render");

    // Two bands of two sub-bands each.
    assert_eq!(chart.x_scale.count(), 2);
    assert_eq!(chart.xz_scale.count(), 2);
    assert_eq!(bars(&surface).len(), 4);

    // The tallest bar is (A, g2), second in A's band.
    let tallest = bars(&surface)
        .iter()
        .filter_map(|m| m.as_rect().map(|r| (m.id, r.rect)))
        .min_by(|a, b| a.1.y0.total_cmp(&b.1.y0))
        .expect("bars");
    assert_eq!(tallest.0, MarkId::for_row(BAR_ID_BASE, 1));
    let a_band = chart.x_scale.x(0);
    let g1_center = a_band + chart.xz_scale.center(0);
    let g2_center = a_band + chart.xz_scale.center(1);
    assert!((tallest.1.center().x - g2_center).abs() < 1e-9);
    assert!(g1_center < g2_center);

    // Dark blue for g1, mid blue for g2.
    let colors = default_colors();
    let fill = |row| {
        surface
            .mark(MarkId::for_row(BAR_ID_BASE, row))
            .and_then(Mark::as_rect)
            .map(|r| r.fill.clone())
    };
    assert_eq!(fill(0), Some(colors[0].clone()));
    assert_eq!(fill(1), Some(colors[1].clone()));

    // Tooltip uses two decimals over a [0, 3] domain.
    let title = surface
        .mark(MarkId::for_row(BAR_ID_BASE, 1))
        .and_then(Mark::as_rect)
        .and_then(|r| r.title.clone());
    assert_eq!(title.as_deref(), Some("A\ng2\n3.00"));

    // One reference line at y_scale(4), spanning the plot, solid.
    let lines = &surface.group(layers::REFERENCE_LINES).expect("lines").marks;
    assert_eq!(lines.len(), 1);
    let line = lines[0].as_path().expect("rule");
    assert!(line.dash.is_empty());
    let bounds = lines[0].payload.bounds().expect("bounds");
    assert!((bounds.y0 - chart.y_scale.map(4.0)).abs() < 1e-9);
    assert_eq!((bounds.x0, bounds.x1), (chart.plot.x0, chart.plot.x1));

    // Exactly one legend label reads "goal".
    let legend = &surface.group(layers::LEGEND).expect("legend").marks;
    let goal_labels = legend
        .iter()
        .filter_map(Mark::as_text)
        .filter(|t| t.text == "goal")
        .count();
    assert_eq!(goal_labels, 1);
}

#[test]
fn legend_uppercases_translated_labels_by_default() {
    let data = vec![dp("A", 1.0, "vår19"), dp("A", 2.0, "okänd")];
    let labels = LabelTable::new().with("vår19", "Vår 19");
    let mut surface = Surface::new(0.0, 0.0);
    spec()
        .with_labels(labels)
        .render(&data, &[ReferenceTarget::new("mål åk1", 3.0)], &mut surface)
        .expect("render");

    let texts: Vec<String> = surface
        .group(layers::LEGEND)
        .expect("legend")
        .marks
        .iter()
        .filter_map(Mark::as_text)
        .map(|t| t.text.clone())
        .collect();
    assert_eq!(texts, ["VÅR 19", "OKÄND", "MÅL ÅK1"]);
}

#[test]
fn reference_lines_get_growing_dashes() {
    let targets = [
        ReferenceTarget::new("a", 1.0),
        ReferenceTarget::new("b", 2.0),
        ReferenceTarget::new("c", 3.0),
    ];
    let mut surface = Surface::new(0.0, 0.0);
    spec()
        .render(&ab_data(), &targets, &mut surface)
        .expect("render");
    let dashes: Vec<Vec<f64>> = surface
        .group(layers::REFERENCE_LINES)
        .expect("lines")
        .marks
        .iter()
        .filter_map(Mark::as_path)
        .map(|p| p.dash.to_vec())
        .collect();
    assert_eq!(dashes, [vec![], vec![2.0, 2.0], vec![4.0, 4.0]]);
}

#[test]
fn layers_append_in_paint_order() {
    let mut surface = Surface::new(0.0, 0.0);
    spec()
        .with_header([HeaderGroup::new("H", 2)])
        .render(&ab_data(), &[], &mut surface)
        .expect("render");
    let names: Vec<&str> = surface.groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(
        names,
        [
            layers::BACKGROUND,
            layers::BARS,
            layers::REFERENCE_LINES,
            layers::VALUE_AXIS,
            layers::CATEGORY_AXIS,
            layers::HEADER,
            layers::BORDER,
            layers::LEGEND,
        ]
    );
    assert_eq!(surface.view(), Rect::new(0.0, 0.0, 800.0, 476.0));

    let background = surface.group(layers::BACKGROUND).expect("background").marks[0]
        .as_rect()
        .expect("rect")
        .rect;
    assert_rect_close(background, Rect::new(50.0, 40.0, 780.0, 326.0));
}

#[test]
fn fixed_width_bars_are_centered_with_rounded_corners() {
    let mut surface = Surface::new(0.0, 0.0);
    let chart = spec()
        .render(&ab_data(), &[], &mut surface)
        .expect("render");
    let bar = bars(&surface)[2].as_rect().expect("bar");
    assert!((bar.rect.width() - 25.0).abs() < 1e-9);
    assert_eq!(bar.corner_radius, 2.0);

    let center = chart.x_scale.x(1) + chart.xz_scale.center(0);
    assert!((bar.rect.center().x - center).abs() < 1e-9);
    assert!((bar.rect.y1 - chart.y_scale.map(0.0)).abs() < 1e-9);
}

#[test]
fn value_axis_uses_prefix_and_explicit_ticks() {
    let mut surface = Surface::new(0.0, 0.0);
    spec()
        .with_y_domain(0.0, 6.0)
        .with_y_ticks([1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .with_y_tick_prefix("NIVÅ ")
        .with_y_label("Nivå")
        .render(&ab_data(), &[], &mut surface)
        .expect("render");
    let texts: Vec<&str> = surface
        .group(layers::VALUE_AXIS)
        .expect("axis")
        .marks
        .iter()
        .filter_map(Mark::as_text)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        texts,
        ["NIVÅ 1", "NIVÅ 2", "NIVÅ 3", "NIVÅ 4", "NIVÅ 5", "NIVÅ 6", "Nivå"]
    );
}

#[test]
fn log_value_scale_renders_positive_domains() {
    let data = vec![dp("A", 10.0, "g1"), dp("B", 100.0, "g1")];
    let chart = spec()
        .with_y_type(ValueScaleKind::Log)
        .with_y_domain(1.0, 100.0)
        .render_to_surface(&data, &[])
        .expect("render")
        .1;
    let (r0, r1) = chart.y_scale.range();
    assert!((chart.y_scale.map(10.0) - (r0 + r1) * 0.5).abs() < 1e-9);
}

#[test]
fn configuration_errors_leave_the_surface_untouched() {
    let mut surface = Surface::new(0.0, 0.0);
    spec()
        .render(&ab_data(), &[], &mut surface)
        .expect("render");
    let before = surface.clone();

    let cases: Vec<(GroupedBarChartSpec, ConfigurationError)> = vec![
        (
            GroupedBarChartSpec::for_data_points(),
            ConfigurationError::MissingWidth,
        ),
        (
            spec().with_x_domain(Vec::<String>::new()),
            ConfigurationError::EmptyDomain(DomainAxis::Category),
        ),
        (
            spec().with_z_domain(Vec::<String>::new()),
            ConfigurationError::EmptyDomain(DomainAxis::Group),
        ),
        (
            spec().with_colors(Vec::<Brush>::new()),
            ConfigurationError::EmptyPalette,
        ),
        (
            spec().with_header([HeaderGroup::new("H", 3)]),
            ConfigurationError::HeaderSpanOverflow {
                spans: 3,
                categories: 2,
            },
        ),
        (
            spec().with_y_type(ValueScaleKind::Log),
            ConfigurationError::InvalidValueDomain { min: 0.0, max: 3.0 },
        ),
    ];
    for (spec, expected) in cases {
        let got = spec.render(&ab_data(), &[], &mut surface);
        assert_eq!(got.err(), Some(expected));
        assert_eq!(surface, before);
    }
}

#[test]
fn empty_data_without_domains_is_an_error() {
    let got = spec().render_to_surface(&[], &[]);
    assert_eq!(
        got.err(),
        Some(ConfigurationError::EmptyDomain(DomainAxis::Category))
    );

    // Explicit domains but nothing to size the value axis.
    let got = spec()
        .with_x_domain(["A"])
        .with_z_domain(["g1"])
        .render_to_surface(&[], &[]);
    assert!(matches!(
        got.err(),
        Some(ConfigurationError::InvalidValueDomain { .. })
    ));
}

#[test]
fn bad_palette_entries_are_reported() {
    assert_eq!(
        parse_palette(&["#2E7CF6", "not-a-color"]).err(),
        Some(ConfigurationError::InvalidColor(String::from("not-a-color")))
    );
    let ok = parse_palette(&["#2E7CF6", "rgb(130, 176, 250)"]).expect("valid");
    let rgba = |b: &Brush| match b {
        Brush::Solid(c) => c.to_rgba8(),
        _ => panic!("palette entries are solid"),
    };
    assert_eq!(rgba(&ok[0]), rgba(&default_colors()[0]));
    assert_eq!(rgba(&ok[1]), rgba(&default_colors()[1]));
}

#[test]
fn numbers_render_with_index_categories() {
    let data = [3.0, 1.0, 2.0];
    let mut surface = Surface::new(0.0, 0.0);
    let chart = GroupedBarChartSpec::<f64>::default()
        .with_size(400.0, 300.0)
        .with_colors([Brush::Solid(css::TOMATO)])
        .render(&data, &[], &mut surface)
        .expect("render");
    let xs: Vec<&str> = chart.x_domain.iter().collect();
    assert_eq!(xs, ["0", "1", "2"]);
    assert_eq!(chart.z_domain.len(), 1);
    assert_eq!(bars(&surface).len(), 3);
}
