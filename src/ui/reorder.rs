// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background reorder dialog.
//!
//! This module provides the reorder window listing every background
//! with move up/down controls and a live preview thumbnail (the
//! background's image plus its own labels scaled to the thumbnail).

use crate::models::annotation::TextAnnotation;
use crate::models::deck::{Deck, MoveDirection};
use std::collections::HashMap;

const THUMBNAIL_SIZE: egui::Vec2 = egui::Vec2 { x: 96.0, y: 54.0 };

/// Result of reorder dialog interaction.
pub enum ReorderAction {
    None,
    /// Swap the background at the index with its cyclic neighbor.
    Move(usize, MoveDirection),
    /// Close the dialog and jump to the first background.
    Done,
}

/// Display the reorder window. `canvas_size` is the main canvas size
/// used to scale label positions into the thumbnails.
pub fn show(
    ctx: &egui::Context,
    open: &mut bool,
    deck: &Deck,
    textures: &HashMap<String, egui::TextureHandle>,
    canvas_size: egui::Vec2,
) -> ReorderAction {
    let mut action = ReorderAction::None;

    egui::Window::new("Reorder Backgrounds")
        .open(open)
        .resizable(false)
        .show(ctx, |ui| {
            for (i, id) in deck.ids().iter().enumerate() {
                ui.horizontal(|ui| {
                    show_thumbnail(ui, textures.get(id), deck.annotations(id), canvas_size);

                    if ui.button("▲").clicked() {
                        action = ReorderAction::Move(i, MoveDirection::Up);
                    }
                    if ui.button("▼").clicked() {
                        action = ReorderAction::Move(i, MoveDirection::Down);
                    }

                    let name = id.rsplit('/').next().unwrap_or(id);
                    if i == deck.active_index() {
                        ui.label(egui::RichText::new(name).strong());
                    } else {
                        ui.label(name);
                    }
                });
            }

            ui.separator();
            if ui.button("Done").clicked() {
                action = ReorderAction::Done;
            }
        });

    action
}

/// Paint one background preview: the image stretched to the thumbnail
/// plus its labels scaled down from canvas coordinates.
fn show_thumbnail(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    annotations: &[TextAnnotation],
    canvas_size: egui::Vec2,
) {
    let (response, painter) = ui.allocate_painter(THUMBNAIL_SIZE, egui::Sense::hover());
    let rect = response.rect;

    let Some(texture) = texture else {
        painter.rect_filled(rect, 2.0, egui::Color32::from_gray(60));
        ui.put(rect, egui::Spinner::new().size(16.0));
        return;
    };

    painter.image(
        texture.id(),
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    let scale_x = rect.width() / canvas_size.x.max(1.0);
    let scale_y = rect.height() / canvas_size.y.max(1.0);
    for label in annotations {
        let size = (label.size as f32 * scale_y).max(1.0);
        let font_id = egui::FontId::new(size, label.font_id().family);
        let baseline = rect.min + egui::vec2(label.x * scale_x, label.y * scale_y);
        painter.text(
            baseline,
            egui::Align2::LEFT_BOTTOM,
            &label.text,
            font_id,
            label.color32(),
        );
    }
}
