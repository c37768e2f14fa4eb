// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zones file serialization and deserialization.
//!
//! This module handles exporting and importing zones files in JSON and
//! YAML formats. Both use the snake_case schema the motion detector reads.

use crate::models::document::DocumentFile;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// On-disk format of a zones file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => bail!("Unsupported file extension: {:?}", extension),
        }
    }
}

/// Render a zones file as pretty-printed JSON.
pub fn to_json_string(data: &DocumentFile) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize zones as JSON")
}

/// Parse a zones file from JSON text.
pub fn from_json_str(json: &str) -> Result<DocumentFile> {
    serde_json::from_str(json).context("Failed to parse zones JSON")
}

/// Export zones to JSON format.
pub fn export_json(data: &DocumentFile, path: &Path) -> Result<()> {
    let json = to_json_string(data)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Export zones to YAML format.
pub fn export_yaml(data: &DocumentFile, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data).context("Failed to serialize zones as YAML")?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Import zones from JSON format.
pub fn import_json(path: &Path) -> Result<DocumentFile> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    from_json_str(&json)
}

/// Import zones from YAML format.
pub fn import_yaml(path: &Path) -> Result<DocumentFile> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let data = serde_yaml::from_str(&yaml).context("Failed to parse zones YAML")?;
    Ok(data)
}

/// Export in the format implied by the path's extension.
pub fn export(data: &DocumentFile, path: &Path) -> Result<()> {
    match Format::from_path(path)? {
        Format::Json => export_json(data, path),
        Format::Yaml => export_yaml(data, path),
    }
}

/// Import in the format implied by the path's extension.
pub fn import(path: &Path) -> Result<DocumentFile> {
    match Format::from_path(path)? {
        Format::Json => import_json(path),
        Format::Yaml => import_yaml(path),
    }
}
