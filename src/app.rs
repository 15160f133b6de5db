// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, owning the background deck, the per-background
//! histories, and the interaction state machine, and coordinating
//! between the UI components and the data model.

use crate::io::media::{self, LoadedImage};
use crate::models::annotation::{self, TextAnnotation};
use crate::models::deck::{BackgroundId, Deck};
use crate::models::history::{HistoryMap, Snapshot};
use crate::ui::{canvas, reorder, toolbar};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Current values of the style controls.
pub struct StyleInputs {
    pub text: String,
    pub font: String,
    pub color: [u8; 3],
    pub size: u32,
}

impl Default for StyleInputs {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: "Arial".to_string(),
            color: [0, 0, 0],
            size: 20,
        }
    }
}

/// Interaction state machine over the active background's labels.
///
/// At most one label is referenced at a time; the state resets to Idle
/// whenever the active background changes or history is restored,
/// since the index refers into the active list.
enum Interaction {
    Idle,
    /// A label is selected; style controls apply to it.
    Selected { index: usize },
    /// The pointer is down on a label. Carries the grab offset from the
    /// baseline origin and the pre-drag state for the history commit at
    /// pointer-up.
    Dragging {
        index: usize,
        grab: egui::Vec2,
        undo_state: Option<Snapshot>,
        moved: bool,
    },
    /// A label is selected and the text field live-edits it.
    Editing { index: usize },
}

impl Interaction {
    fn selected_index(&self) -> Option<usize> {
        match self {
            Interaction::Idle => None,
            Interaction::Selected { index }
            | Interaction::Dragging { index, .. }
            | Interaction::Editing { index } => Some(*index),
        }
    }
}

/// Result of one background image load, tagged with its identity.
type LoadResult = (BackgroundId, Result<LoadedImage, String>);

/// Main application state.
pub struct InscribeApp {
    /// Background sequence and per-background label lists
    deck: Deck,

    /// Per-background undo/redo histories
    histories: HistoryMap,

    /// Selection / drag / edit state for the active background
    interaction: Interaction,

    /// Current style control values
    inputs: StyleInputs,

    /// Uploaded textures, keyed by background identity
    textures: HashMap<BackgroundId, egui::TextureHandle>,

    /// Backgrounds with a load in flight
    pending_loads: HashSet<BackgroundId>,

    /// Backgrounds whose load failed (not retried)
    failed_loads: HashSet<BackgroundId>,

    /// Sender cloned into each loader thread
    load_tx: Sender<LoadResult>,

    /// Receiver drained at the top of each frame
    load_rx: Receiver<LoadResult>,

    /// Whether the reorder dialog is open
    reorder_open: bool,

    /// Canvas size from the last frame, for random label placement
    canvas_size: egui::Vec2,

    /// Load failure message for the status strip
    status: Option<String>,
}

impl Default for InscribeApp {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InscribeApp {
    /// Create the application with an initial set of background paths.
    pub fn new(backgrounds: Vec<String>) -> Self {
        let (load_tx, load_rx) = channel();
        let mut deck = Deck::new();
        for id in backgrounds {
            if !deck.add_background(id.clone()) {
                log::warn!("Skipping duplicate background: {}", id);
            }
        }
        Self {
            deck,
            histories: HistoryMap::new(),
            interaction: Interaction::Idle,
            inputs: StyleInputs::default(),
            textures: HashMap::new(),
            pending_loads: HashSet::new(),
            failed_loads: HashSet::new(),
            load_tx,
            load_rx,
            reorder_open: false,
            canvas_size: egui::vec2(800.0, 500.0),
            status: None,
        }
    }

    /// Kick off an asynchronous decode for a background, once.
    fn request_load(&mut self, id: BackgroundId) {
        if self.textures.contains_key(&id)
            || self.pending_loads.contains(&id)
            || self.failed_loads.contains(&id)
        {
            return;
        }
        self.pending_loads.insert(id.clone());

        let sender = self.load_tx.clone();
        std::thread::spawn(move || {
            let result = media::load_image(std::path::Path::new(&id)).map_err(|e| e.to_string());
            let _ = sender.send((id, result));
        });
    }

    /// Drain finished loads and upload their textures.
    fn drain_loads(&mut self, ctx: &egui::Context) {
        while let Ok((id, result)) = self.load_rx.try_recv() {
            self.pending_loads.remove(&id);
            match result {
                Ok(loaded) => {
                    let size = [loaded.width as usize, loaded.height as usize];
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                    let texture =
                        ctx.load_texture(id.as_str(), color_image, egui::TextureOptions::LINEAR);
                    self.textures.insert(id.clone(), texture);
                    log::info!("Loaded background: {}", id);
                }
                Err(e) => {
                    self.failed_loads.insert(id.clone());
                    self.status = Some(format!("Failed to load {}: {}", id, e));
                    log::error!("Failed to load background {}: {}", id, e);
                }
            }
        }
    }

    /// Open a native picker and append the chosen backgrounds.
    fn open_backgrounds(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", media::IMAGE_EXTENSIONS)
            .pick_files()
        {
            for path in paths {
                let id = path.to_string_lossy().to_string();
                if self.deck.add_background(id.clone()) {
                    log::info!("Added background: {}", id);
                } else {
                    log::warn!("Skipping duplicate background: {}", id);
                }
            }
        }
    }

    /// Append a label built from the current inputs at a random position.
    fn add_label(&mut self) {
        let Some(id) = self.deck.active_id().cloned() else {
            return;
        };

        // Snapshot first so the add is undoable.
        self.histories.snapshot(&id, self.deck.annotations(&id));

        let mut rng = rand::thread_rng();
        let x = rng.gen_range(0.0..(self.canvas_size.x - 100.0).max(1.0));
        let y = rng.gen_range(0.0..(self.canvas_size.y - 50.0).max(1.0));

        let label = TextAnnotation::new(
            self.inputs.text.clone(),
            self.inputs.font.clone(),
            annotation::format_hex_color(self.inputs.color),
            self.inputs.size,
            x,
            y,
        );
        self.deck.add_annotation(&id, label);
        self.inputs.text.clear();
        log::info!(
            "Added label to {}, total: {}",
            id,
            self.deck.annotations(&id).len()
        );
    }

    /// Undo the last committed change on the active background.
    fn undo_active(&mut self) {
        let Some(id) = self.deck.active_id().cloned() else {
            return;
        };
        let current = self.deck.annotations(&id).to_vec();
        if let Some(restored) = self.histories.undo(&id, &current) {
            self.deck.set_annotations(&id, restored);
            self.interaction = Interaction::Idle;
            log::info!("Undo on {}", id);
        }
    }

    /// Redo the last undone change on the active background.
    fn redo_active(&mut self) {
        let Some(id) = self.deck.active_id().cloned() else {
            return;
        };
        let current = self.deck.annotations(&id).to_vec();
        if let Some(restored) = self.histories.redo(&id, &current) {
            self.deck.set_annotations(&id, restored);
            self.interaction = Interaction::Idle;
            log::info!("Redo on {}", id);
        }
    }

    /// Apply the style controls to the selected label (not snapshotted).
    fn apply_style_to_selection(&mut self) {
        let Some(index) = self.interaction.selected_index() else {
            return;
        };
        let font = self.inputs.font.clone();
        let color = annotation::format_hex_color(self.inputs.color);
        let size = self.inputs.size;
        if let Some(labels) = self.deck.active_annotations_mut() {
            if let Some(label) = labels.get_mut(index) {
                label.font = font;
                label.color = color;
                label.size = size;
            }
        }
    }

    /// Live-update the selected label's text (not snapshotted).
    fn apply_text_to_selection(&mut self) {
        let Some(index) = self.interaction.selected_index() else {
            return;
        };
        let text = self.inputs.text.clone();
        if let Some(labels) = self.deck.active_annotations_mut() {
            if let Some(label) = labels.get_mut(index) {
                label.text = text;
            }
        }
        // Typing into a selected label means it is being edited.
        if let Interaction::Selected { index } = self.interaction {
            self.interaction = Interaction::Editing { index };
        }
    }

    /// Copy a label's current text and style into the controls.
    fn populate_inputs(&mut self, index: usize) {
        let Some(id) = self.deck.active_id() else {
            return;
        };
        if let Some(label) = self.deck.annotations(id).get(index) {
            self.inputs.text = label.text.clone();
            self.inputs.font = label.font.clone();
            if let Some(rgb) = annotation::parse_hex_color(&label.color) {
                self.inputs.color = rgb;
            }
            self.inputs.size = label.size;
        }
    }

    /// Switch the active background; selection does not survive a switch.
    fn switch_background(&mut self, forward: bool) {
        if forward {
            self.deck.next();
        } else {
            self.deck.previous();
        }
        self.interaction = Interaction::Idle;
        self.status = None;
        if let Some(id) = self.deck.active_id() {
            log::info!("Switched to background: {}", id);
        }
    }

    fn handle_canvas_action(&mut self, action: canvas::CanvasAction) {
        match action {
            canvas::CanvasAction::Clicked { hit } => match hit {
                Some(index) => {
                    self.populate_inputs(index);
                    self.interaction = Interaction::Editing { index };
                    log::info!("Selected label {}", index);
                }
                None => {
                    self.interaction = Interaction::Idle;
                }
            },
            canvas::CanvasAction::DragStarted { pos, hit } => match hit {
                Some(index) => {
                    self.populate_inputs(index);
                    let undo_state = self
                        .deck
                        .active_id()
                        .map(|id| self.deck.annotations(id))
                        .and_then(Snapshot::capture);
                    let grab = self
                        .deck
                        .active_annotations()
                        .get(index)
                        .map(|label| pos - egui::pos2(label.x, label.y))
                        .unwrap_or_default();
                    self.interaction = Interaction::Dragging {
                        index,
                        grab,
                        undo_state,
                        moved: false,
                    };
                }
                None => {
                    self.interaction = Interaction::Idle;
                }
            },
            canvas::CanvasAction::Dragged { pos } => {
                if let Interaction::Dragging {
                    index, grab, moved, ..
                } = &mut self.interaction
                {
                    let index = *index;
                    let target = pos - *grab;
                    *moved = true;
                    if let Some(labels) = self.deck.active_annotations_mut() {
                        if let Some(label) = labels.get_mut(index) {
                            label.x = target.x;
                            label.y = target.y;
                        }
                    }
                }
            }
            canvas::CanvasAction::DragEnded => {
                if let Interaction::Dragging {
                    index,
                    undo_state,
                    moved,
                    ..
                } = std::mem::replace(&mut self.interaction, Interaction::Idle)
                {
                    // Commit the pre-drag state, but only if the label
                    // actually moved; a stationary press is not a change.
                    if moved {
                        if let (Some(id), Some(snapshot)) =
                            (self.deck.active_id().cloned(), undo_state)
                        {
                            self.histories.push(&id, snapshot);
                            log::info!("Moved label {} on {}", index, id);
                        }
                    }
                    self.interaction = Interaction::Selected { index };
                }
            }
            canvas::CanvasAction::None => {}
        }
    }

    fn handle_toolbar_action(&mut self, action: toolbar::ToolbarAction) {
        match action {
            toolbar::ToolbarAction::AddLabel => self.add_label(),
            toolbar::ToolbarAction::Undo => self.undo_active(),
            toolbar::ToolbarAction::Redo => self.redo_active(),
            toolbar::ToolbarAction::PrevBackground => self.switch_background(false),
            toolbar::ToolbarAction::NextBackground => self.switch_background(true),
            toolbar::ToolbarAction::OpenReorder => self.reorder_open = true,
            toolbar::ToolbarAction::StyleChanged => self.apply_style_to_selection(),
            toolbar::ToolbarAction::TextEdited => self.apply_text_to_selection(),
            toolbar::ToolbarAction::None => {}
        }
    }
}

impl eframe::App for InscribeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_loads(ctx);

        // The active background must be decoded before it can be drawn;
        // the reorder dialog additionally previews every background.
        if let Some(id) = self.deck.active_id().cloned() {
            self.request_load(id);
        }
        if self.reorder_open {
            let ids: Vec<BackgroundId> = self.deck.ids().to_vec();
            for id in ids {
                self.request_load(id);
            }
        }

        // Keep repainting while decodes are in flight (spinner).
        if !self.pending_loads.is_empty() {
            ctx.request_repaint();
        }

        // Keyboard events
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.interaction = Interaction::Idle;
        }

        if !ctx.wants_keyboard_input() {
            // Undo (Ctrl+Z)
            if ctx.input(|i| {
                i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift
            }) {
                self.undo_active();
            }

            // Redo (Ctrl+Shift+Z or Ctrl+Y)
            if ctx.input(|i| {
                (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                    || (i.modifiers.command && i.key_pressed(egui::Key::Y))
            }) {
                self.redo_active();
            }
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Backgrounds...").clicked() {
                        self.open_backgrounds();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let active_id = self.deck.active_id().cloned();
                    let can_undo = active_id
                        .as_deref()
                        .is_some_and(|id| self.histories.can_undo(id));
                    if ui
                        .add_enabled(can_undo, egui::Button::new("Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        self.undo_active();
                        ui.close_menu();
                    }

                    let can_redo = active_id
                        .as_deref()
                        .is_some_and(|id| self.histories.can_redo(id));
                    if ui
                        .add_enabled(can_redo, egui::Button::new("Redo (Ctrl+Shift+Z)"))
                        .clicked()
                    {
                        self.redo_active();
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                let active_id = self.deck.active_id().cloned();
                let can_undo = active_id
                    .as_deref()
                    .is_some_and(|id| self.histories.can_undo(id));
                let can_redo = active_id
                    .as_deref()
                    .is_some_and(|id| self.histories.can_redo(id));
                toolbar::show(
                    ui,
                    &mut self.inputs,
                    can_undo,
                    can_redo,
                    !self.deck.is_empty(),
                )
            })
            .inner;
        self.handle_toolbar_action(toolbar_action);

        // Reorder dialog
        if self.reorder_open {
            let mut open = true;
            let reorder_action = reorder::show(
                ctx,
                &mut open,
                &self.deck,
                &self.textures,
                self.canvas_size,
            );
            self.reorder_open = open;
            match reorder_action {
                reorder::ReorderAction::Move(index, direction) => {
                    self.deck.reorder(index, direction);
                    log::info!("Reordered background at {} ({:?})", index, direction);
                }
                reorder::ReorderAction::Done => {
                    self.deck.commit_order();
                    self.interaction = Interaction::Idle;
                    self.reorder_open = false;
                    log::info!("Committed background order");
                }
                reorder::ReorderAction::None => {}
            }
        }

        // Main canvas (center)
        let (canvas_action, canvas_size) = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let active_id = self.deck.active_id().cloned();
                let has_backgrounds = !self.deck.is_empty();
                let selected = self.interaction.selected_index();
                let texture = active_id.as_deref().and_then(|id| self.textures.get(id));
                let status = canvas::StatusLine {
                    background: active_id.as_deref(),
                    position: self.deck.active_index(),
                    count: self.deck.len(),
                    error: self.status.as_deref(),
                };

                let mut empty = Vec::new();
                let annotations = self.deck.active_annotations_mut().unwrap_or(&mut empty);
                canvas::show(ui, annotations, selected, texture, has_backgrounds, &status)
            })
            .inner;
        self.canvas_size = canvas_size;
        self.handle_canvas_action(canvas_action);
    }
}
