// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading-level records and dataset loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::host::HostError;

/// The dataset bundled with the binary.
const EMBEDDED: &str = include_str!("../data/reading_levels.json");

/// One student-group observation: a reading skill, its level, and the term it was measured in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Record {
    /// Skill (category).
    pub(crate) name: String,
    /// Reading level.
    pub(crate) niva: f64,
    /// Term key, e.g. `vår19`.
    pub(crate) termin: String,
}

/// Parses a dataset from JSON text.
pub(crate) fn parse_dataset(json: &str) -> Result<Vec<Record>, HostError> {
    Ok(serde_json::from_str(json)?)
}

/// Returns the bundled dataset.
pub(crate) fn embedded_dataset() -> Result<Vec<Record>, HostError> {
    parse_dataset(EMBEDDED)
}

/// Reads a dataset from a JSON file.
pub(crate) fn load_dataset(path: &Path) -> Result<Vec<Record>, HostError> {
    let json = std::fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_dataset(&json)?;
    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
