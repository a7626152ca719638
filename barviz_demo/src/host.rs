// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart host: derives domains and fixed configuration from the reading-level dataset and
//! mounts the chart onto an attached surface exactly once.

use std::path::{Path, PathBuf};

use barviz_charts::{
    ChartAccessors, ConfigurationError, Domain, GroupedBarChart, GroupedBarChartSpec,
    HeaderGroup, LabelTable, ReferenceTarget, header_span, parse_palette,
};
use barviz_core::Surface;
use thiserror::Error;

use crate::data::Record;

/// Errors surfaced by the host and the CLI.
#[derive(Debug, Error)]
pub(crate) enum HostError {
    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The dataset is not valid JSON of the expected shape.
    #[error("invalid dataset: {0}")]
    Json(#[from] serde_json::Error),
    /// The chart could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigurationError),
}

/// Knobs exposed on the command line.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HostConfig {
    /// Outer chart width.
    pub(crate) width: f64,
    /// Outer chart height.
    pub(crate) height: f64,
    /// Number of categories kept after ranking.
    pub(crate) top_n: usize,
    /// Term palette, lightest first.
    pub(crate) colors: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 476.0,
            top_n: 7,
            colors: ["#C0D8FC", "#82B0FA", "#2E7CF6"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Distinct terms in first-seen order.
pub(crate) fn distinct_terms(data: &[Record]) -> Vec<String> {
    Domain::from_values(data.iter().map(|d| d.termin.as_str()))
        .iter()
        .map(String::from)
        .collect()
}

/// Categories ranked by descending total level, truncated to `top_n`.
///
/// Ties keep first-seen order. Non-finite levels do not count towards a total.
pub(crate) fn rank_categories(data: &[Record], top_n: usize) -> Vec<String> {
    let names = Domain::from_values(data.iter().map(|d| d.name.as_str()));
    let mut totals = vec![0.0_f64; names.len()];
    for d in data.iter().filter(|d| d.niva.is_finite()) {
        if let Some(i) = names.index_of(&d.name) {
            totals[i] += d.niva;
        }
    }

    let mut order: Vec<usize> = (0..names.len()).collect();
    order.sort_by(|&a, &b| totals[b].total_cmp(&totals[a]));
    order
        .into_iter()
        .take(top_n)
        .filter_map(|i| names.get(i).map(String::from))
        .collect()
}

/// The three grade-level goals drawn as reference lines.
pub(crate) fn reference_targets() -> Vec<ReferenceTarget> {
    vec![
        ReferenceTarget::new("mål åk1", 3.0),
        ReferenceTarget::new("mål åk2", 4.0),
        ReferenceTarget::new("mål åk3", 5.0),
    ]
}

/// Display names for term keys.
pub(crate) fn term_labels() -> LabelTable {
    LabelTable::new()
        .with("vår19", "Vår 19")
        .with("höst19", "Höst 19")
        .with("vinter19", "Vinter 19/20")
}

/// Skill areas above the category cells.
pub(crate) fn header_groups() -> Vec<HeaderGroup> {
    vec![
        HeaderGroup::new("AVKODNING", 2),
        HeaderGroup::new("SPRÅKFÖRSTÅELSE", 2),
        HeaderGroup::new("LÄSFÖRSTÅELSE", 3),
    ]
}

/// Owns the dataset and an optional surface, and renders onto it on demand.
#[derive(Debug)]
pub(crate) struct ChartHost {
    data: Vec<Record>,
    config: HostConfig,
    surface: Option<Surface>,
    mounted: bool,
}

impl ChartHost {
    /// Creates a host with no surface attached.
    pub(crate) fn new(data: Vec<Record>, config: HostConfig) -> Self {
        Self {
            data,
            config,
            surface: None,
            mounted: false,
        }
    }

    /// Attaches the surface that [`mount`](Self::mount) and [`render`](Self::render) draw on.
    pub(crate) fn attach(&mut self, surface: Surface) {
        self.surface = Some(surface);
    }

    /// Builds the chart spec for the current dataset.
    pub(crate) fn spec(&self) -> Result<GroupedBarChartSpec<Record>, HostError> {
        let colors: Vec<&str> = self.config.colors.iter().map(String::as_str).collect();
        let x_domain = rank_categories(&self.data, self.config.top_n);
        log::debug!("top {} categories: {x_domain:?}", self.config.top_n);

        let header = header_groups();
        // The header only fits when every header cell has a category below it.
        let header = if header_span(&header) <= x_domain.len() {
            header
        } else {
            log::warn!(
                "only {} categories; header needs {}, dropping it",
                x_domain.len(),
                header_span(&header)
            );
            Vec::new()
        };

        Ok(GroupedBarChartSpec::new(ChartAccessors::new(
            |d: &Record, _| d.name.clone(),
            |d: &Record, _| d.niva,
            |d: &Record, _| d.termin.clone(),
        ))
        .with_size(self.config.width, self.config.height)
        .with_x_domain(x_domain)
        .with_z_domain(distinct_terms(&self.data))
        .with_colors(parse_palette(&colors)?)
        .with_y_ticks([1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .with_y_tick_prefix("NIVÅ ")
        .with_header(header)
        .with_labels(term_labels()))
    }

    /// Renders once; later calls return the already mounted surface untouched.
    pub(crate) fn mount(&mut self) -> Result<&Surface, HostError> {
        if !self.mounted {
            self.render()?;
            self.mounted = true;
        }
        Ok(self
            .surface
            .as_ref()
            .ok_or(ConfigurationError::MissingSurface)?)
    }

    /// Clears the attached surface and draws the chart again.
    pub(crate) fn render(&mut self) -> Result<GroupedBarChart, HostError> {
        let spec = self.spec()?;
        let surface = self
            .surface
            .as_mut()
            .ok_or(ConfigurationError::MissingSurface)?;
        let chart = spec.render(&self.data, &reference_targets(), surface)?;
        log::info!(
            "rendered {} bars over {} categories and {} terms",
            chart.rendered.len(),
            chart.x_domain.len(),
            chart.z_domain.len()
        );
        Ok(chart)
    }

    /// Returns the attached surface.
    pub(crate) fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }
}

/// Serializes `surface` to an SVG file.
pub(crate) fn write_svg(surface: &Surface, path: &Path) -> Result<(), HostError> {
    std::fs::write(path, surface.to_svg_string()).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })
}
