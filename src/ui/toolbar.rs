// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with label style inputs and command buttons.
//!
//! This module provides the style controls (text, font family, color,
//! size), the add/undo/redo buttons, and the background navigation
//! controls.

use crate::app::StyleInputs;
use crate::models::annotation::FONT_FAMILIES;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    /// Add a label built from the current inputs.
    AddLabel,
    Undo,
    Redo,
    PrevBackground,
    NextBackground,
    OpenReorder,
    /// A style control (font, color, size) changed.
    StyleChanged,
    /// The text field changed.
    TextEdited,
}

/// Display the toolbar and report what the user did.
pub fn show(
    ui: &mut egui::Ui,
    inputs: &mut StyleInputs,
    can_undo: bool,
    can_redo: bool,
    has_backgrounds: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let text_edit = ui.add(
            egui::TextEdit::singleline(&mut inputs.text)
                .hint_text("Label text")
                .desired_width(160.0),
        );
        if text_edit.changed() {
            action = ToolbarAction::TextEdited;
        }

        egui::ComboBox::from_id_source("font_family")
            .selected_text(inputs.font.clone())
            .show_ui(ui, |ui| {
                for family in FONT_FAMILIES {
                    if ui
                        .selectable_value(&mut inputs.font, family.to_string(), *family)
                        .changed()
                    {
                        action = ToolbarAction::StyleChanged;
                    }
                }
            });

        if ui.color_edit_button_srgb(&mut inputs.color).changed() {
            action = ToolbarAction::StyleChanged;
        }

        if ui
            .add(egui::DragValue::new(&mut inputs.size).range(8..=96).suffix(" px"))
            .changed()
        {
            action = ToolbarAction::StyleChanged;
        }

        if ui
            .add_enabled(has_backgrounds, egui::Button::new("Add Label"))
            .clicked()
        {
            action = ToolbarAction::AddLabel;
        }

        ui.separator();

        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            action = ToolbarAction::Undo;
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            action = ToolbarAction::Redo;
        }

        ui.separator();

        if ui
            .add_enabled(has_backgrounds, egui::Button::new("◀ Prev"))
            .clicked()
        {
            action = ToolbarAction::PrevBackground;
        }
        if ui
            .add_enabled(has_backgrounds, egui::Button::new("Next ▶"))
            .clicked()
        {
            action = ToolbarAction::NextBackground;
        }

        if ui
            .add_enabled(has_backgrounds, egui::Button::new("Reorder..."))
            .clicked()
        {
            action = ToolbarAction::OpenReorder;
        }
    });

    action
}
