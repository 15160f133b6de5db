// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text label data structures.
//!
//! This module defines the core data structure for a styled text label
//! placed on a background, plus the helpers that map its style fields
//! onto egui's font and color types.

use serde::{Deserialize, Serialize};

/// Font families offered by the toolbar selector.
///
/// egui renders everything with its own bundled fonts; `Courier New`
/// maps to the monospace family, the rest to proportional. The family
/// name itself is kept in the data model.
pub const FONT_FAMILIES: &[&str] = &[
    "Arial",
    "Verdana",
    "Georgia",
    "Times New Roman",
    "Courier New",
];

/// A single styled text label with a baseline origin in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub text: String,
    pub font: String,
    /// Fill color as a `#rrggbb` hex string.
    pub color: String,
    /// Font size in pixels.
    pub size: u32,
    pub x: f32,
    pub y: f32,
}

impl TextAnnotation {
    /// Create a new label at the given baseline origin.
    pub fn new(text: String, font: String, color: String, size: u32, x: f32, y: f32) -> Self {
        Self {
            text,
            font,
            color,
            size,
            x,
            y,
        }
    }

    /// The egui font used to lay out and draw this label.
    pub fn font_id(&self) -> egui::FontId {
        let family = if self.font == "Courier New" {
            egui::FontFamily::Monospace
        } else {
            egui::FontFamily::Proportional
        };
        egui::FontId::new(self.size as f32, family)
    }

    /// The fill color, falling back to black on a malformed hex string.
    pub fn color32(&self) -> egui::Color32 {
        match parse_hex_color(&self.color) {
            Some([r, g, b]) => egui::Color32::from_rgb(r, g, b),
            None => egui::Color32::BLACK,
        }
    }
}

/// Parse a `#rrggbb` string into RGB components.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Format RGB components as a `#rrggbb` string.
pub fn format_hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}
