// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Reference image loading.
//!
//! This module decodes the image the zones are drawn over into RGBA pixels
//! suitable for display in egui, and resolves the image a zones file
//! refers to.

use crate::util::geometry::ImageSize;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// A decoded RGBA image.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }
}

/// Decode an image file into RGBA pixels.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// Read only the dimensions of an image file.
pub fn image_size(path: &Path) -> Result<ImageSize> {
    let (width, height) = image::image_dimensions(path)
        .with_context(|| format!("Failed to read dimensions of {}", path.display()))?;
    Ok(ImageSize::new(width, height))
}

/// Resolve the image source named in a zones file to a local path.
///
/// Relative sources are tried against the zones file's directory first,
/// then the working directory. URLs and data URIs cannot be opened locally.
pub fn resolve_source(source: &str, zones_file: Option<&Path>) -> Result<PathBuf> {
    if source.is_empty() {
        bail!("Zones file does not name an image");
    }
    if source.starts_with("data:") || source.contains("://") {
        bail!("Image '{}' is not a local file", source);
    }

    let path = PathBuf::from(source);
    if path.is_relative() {
        if let Some(dir) = zones_file.and_then(Path::parent) {
            let candidate = dir.join(&path);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }
    if path.exists() {
        return Ok(path);
    }
    bail!("Referenced image not found: {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_sources_rejected() {
        assert!(resolve_source("http://cam/frame.jpg", None).is_err());
        assert!(resolve_source("data:image/png;base64,AAAA", None).is_err());
        assert!(resolve_source("", None).is_err());
    }

    #[test]
    fn test_relative_to_zones_file() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("frame.png");
        std::fs::write(&image, b"not really a png").unwrap();
        let zones = dir.path().join("zones.json");

        let resolved = resolve_source("frame.png", Some(&zones)).unwrap();
        assert_eq!(resolved, image);
        assert!(resolve_source("missing.png", Some(&zones)).is_err());
    }

    #[test]
    fn test_load_and_measure_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        image::RgbaImage::new(8, 6).save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.size(), ImageSize::new(8, 6));
        assert_eq!(loaded.pixels.len(), 8 * 6 * 4);
        assert_eq!(image_size(&path).unwrap(), ImageSize::new(8, 6));
    }
}
