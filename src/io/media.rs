// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background image loading.
//!
//! This module handles loading background image files and converting
//! them to RGBA pixel data suitable for display in egui.

use anyhow::{Context, Result};
use std::path::Path;

/// File extensions accepted by the background file picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

/// Decoded image data ready for texture upload.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixel data, row-major.
    pub pixels: Vec<u8>,
}

/// Load and decode an image file to RGBA8.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?;
    let rgba = img.to_rgba8();
    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
