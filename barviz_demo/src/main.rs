// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the reading-level grouped bar chart to an SVG file.

mod data;
mod host;

use std::path::PathBuf;
use std::process::ExitCode;

use barviz_core::Surface;
use clap::{Parser, ValueEnum};

use crate::host::{ChartHost, HostConfig, HostError};

#[derive(Debug, Parser)]
#[command(name = "barviz_demo")]
#[command(about = "Render student reading levels per term as a grouped bar chart (SVG)")]
struct Cli {
    /// Dataset JSON: an array of `{ "name", "niva", "termin" }` records.
    /// Defaults to the bundled dataset.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Output SVG path
    #[arg(long, default_value = "reading_levels.svg")]
    out: PathBuf,
    /// Number of categories to keep after ranking by total level
    #[arg(long, default_value_t = 7)]
    top: usize,
    /// Outer chart width
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    /// Outer chart height
    #[arg(long, default_value_t = 476.0)]
    height: f64,
    /// Log verbosity level
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn run(cli: &Cli) -> Result<(), HostError> {
    let records = match &cli.data {
        Some(path) => data::load_dataset(path)?,
        None => data::embedded_dataset()?,
    };

    let config = HostConfig {
        width: cli.width,
        height: cli.height,
        top_n: cli.top,
        ..HostConfig::default()
    };
    let mut host = ChartHost::new(records, config);
    host.attach(Surface::new(cli.width, cli.height));
    let surface = host.mount()?;
    host::write_svg(surface, &cli.out)?;
    log::info!("wrote {}", cli.out.display());

    if let Some(surface) = host.surface() {
        log::debug!("{} marks on the surface", surface.mark_count());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
