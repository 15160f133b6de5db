// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for background display and label manipulation.
//!
//! This module renders the active background stretched to the canvas,
//! draws each label at its clamped baseline origin, decorates the
//! selection with a dashed rectangle, and translates pointer gestures
//! into canvas actions for the application to apply.

use crate::models::annotation::TextAnnotation;
use crate::models::hit;
use crate::util::geometry;

/// Result of canvas interaction. Positions are in canvas coordinates.
pub enum CanvasAction {
    None,
    /// Press and release without movement.
    Clicked {
        hit: Option<usize>,
    },
    /// A drag gesture began on the given point.
    DragStarted {
        pos: egui::Pos2,
        hit: Option<usize>,
    },
    /// The pointer moved while dragging.
    Dragged {
        pos: egui::Pos2,
    },
    /// The drag gesture ended.
    DragEnded,
}

/// Everything the status strip needs to describe the active background.
pub struct StatusLine<'a> {
    pub background: Option<&'a str>,
    pub position: usize,
    pub count: usize,
    pub error: Option<&'a str>,
}

/// Display the canvas area and handle pointer interactions.
///
/// Clamped label positions are written back to `annotations`, so the
/// stored coordinates always match what is on screen after the pass.
/// Returns the interaction result and the canvas size in points.
pub fn show(
    ui: &mut egui::Ui,
    annotations: &mut [TextAnnotation],
    selected: Option<usize>,
    texture: Option<&egui::TextureHandle>,
    has_backgrounds: bool,
    status: &StatusLine<'_>,
) -> (CanvasAction, egui::Vec2) {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size() - egui::vec2(0.0, 24.0);
    let mut canvas_size = available_size;

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        if !has_backgrounds {
            ui.set_min_size(available_size);
            show_welcome(ui);
            return;
        }

        let Some(texture) = texture else {
            // The active background's image has not finished decoding;
            // nothing may be drawn against a stale or missing image.
            ui.set_min_size(available_size);
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.spinner();
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new("Loading background...")
                            .size(16.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                });
            });
            return;
        };

        let (response, painter) =
            ui.allocate_painter(available_size, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;
        canvas_size = canvas_rect.size();

        // Background image stretched to the canvas dimensions.
        painter.image(
            texture.id(),
            canvas_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        // Labels in list order, later entries on top.
        for (i, label) in annotations.iter_mut().enumerate() {
            let galley =
                painter.layout_no_wrap(label.text.clone(), label.font_id(), label.color32());
            let width = galley.size().x;
            let size = label.size as f32;

            let (x, y) = geometry::clamp_baseline(
                label.x,
                label.y,
                width,
                size,
                canvas_rect.width(),
                canvas_rect.height(),
            );
            label.x = x;
            label.y = y;

            let top_left = canvas_rect.min + egui::vec2(x, y - size);
            painter.galley(top_left, galley, label.color32());

            if selected == Some(i) {
                let box_rect = egui::Rect::from_min_size(
                    top_left - egui::vec2(2.0, 0.0),
                    egui::vec2(width + 4.0, size + 4.0),
                );
                draw_dashed_rect(&painter, box_rect);
            }
        }

        // Pointer gestures, using the same galley measurement as the
        // draw pass so hit boxes match the rendered text.
        let measure = |label: &TextAnnotation| {
            ui.fonts(|fonts| {
                fonts
                    .layout_no_wrap(label.text.clone(), label.font_id(), egui::Color32::WHITE)
                    .size()
                    .x
            })
        };

        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let p = pos - canvas_rect.min;
                let hit = hit::hit_test(annotations, p.x, p.y, measure);
                action = CanvasAction::DragStarted {
                    pos: p.to_pos2(),
                    hit,
                };
            }
        } else if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let p = pos - canvas_rect.min;
                action = CanvasAction::Dragged { pos: p.to_pos2() };
            }
        } else if response.drag_stopped_by(egui::PointerButton::Primary) {
            action = CanvasAction::DragEnded;
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let p = pos - canvas_rect.min;
                let hit = hit::hit_test(annotations, p.x, p.y, measure);
                action = CanvasAction::Clicked { hit };
            }
        }
    });

    // Status strip below the canvas.
    ui.separator();
    ui.horizontal(|ui| {
        match status.background {
            Some(name) => {
                ui.label(format!(
                    "Background {} of {}: {}",
                    status.position + 1,
                    status.count,
                    name
                ));
            }
            None => {
                ui.label("No backgrounds open");
            }
        }
        if let Some(error) = status.error {
            ui.separator();
            ui.colored_label(egui::Color32::LIGHT_RED, error);
        }
    });

    (action, canvas_size)
}

/// Dashed black rectangle around the selected label's measured box.
fn draw_dashed_rect(painter: &egui::Painter, rect: egui::Rect) {
    let stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    for i in 0..corners.len() {
        let segment = [corners[i], corners[(i + 1) % corners.len()]];
        painter.extend(egui::Shape::dashed_line(&segment, stroke, 5.0, 5.0));
    }
}

/// Welcome message when no backgrounds are loaded.
fn show_welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("Inscribe")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Text overlays for rotating backgrounds")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Open background images to begin placing labels")
                    .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → Open Backgrounds...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}
