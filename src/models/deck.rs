// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background deck state management.
//!
//! This module manages the ordered sequence of background images, the
//! active position within it, and the per-background label lists. Label
//! lists are keyed by background identity (the image path), never by
//! position, so reordering the sequence permutes positions only and the
//! keyed state survives untouched.

use super::annotation::TextAnnotation;
use std::collections::HashMap;

/// Stable identity of a background image (its path as given).
pub type BackgroundId = String;

/// Direction for an adjacent reorder swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// The ordered backgrounds, the active position, and each background's labels.
#[derive(Debug, Default)]
pub struct Deck {
    sequence: Vec<BackgroundId>,
    active: usize,
    annotations: HashMap<BackgroundId, Vec<TextAnnotation>>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a background to the end of the sequence.
    ///
    /// Returns false (and changes nothing) if the id is already present,
    /// keeping the id -> label-list association one-to-one.
    pub fn add_background(&mut self, id: BackgroundId) -> bool {
        if self.annotations.contains_key(&id) {
            return false;
        }
        self.annotations.insert(id.clone(), Vec::new());
        self.sequence.push(id);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn ids(&self) -> &[BackgroundId] {
        &self.sequence
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Identity of the active background, if any backgrounds are open.
    pub fn active_id(&self) -> Option<&BackgroundId> {
        self.sequence.get(self.active)
    }

    /// Advance the active position cyclically.
    pub fn next(&mut self) {
        if !self.sequence.is_empty() {
            self.active = (self.active + 1) % self.sequence.len();
        }
    }

    /// Retreat the active position cyclically.
    pub fn previous(&mut self) {
        if !self.sequence.is_empty() {
            let n = self.sequence.len();
            self.active = (self.active + n - 1) % n;
        }
    }

    /// Labels of the given background, empty for an unknown id.
    pub fn annotations(&self, id: &str) -> &[TextAnnotation] {
        self.annotations.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Labels of the active background, empty when no backgrounds are open.
    pub fn active_annotations(&self) -> &[TextAnnotation] {
        match self.active_id() {
            Some(id) => self.annotations(id),
            None => &[],
        }
    }

    pub fn active_annotations_mut(&mut self) -> Option<&mut Vec<TextAnnotation>> {
        let id = self.sequence.get(self.active)?.clone();
        self.annotations.get_mut(&id)
    }

    /// Append a label to the given background's list.
    pub fn add_annotation(&mut self, id: &str, annotation: TextAnnotation) {
        if let Some(list) = self.annotations.get_mut(id) {
            list.push(annotation);
        }
    }

    /// Replace the given background's label list (undo/redo restore).
    pub fn set_annotations(&mut self, id: &str, list: Vec<TextAnnotation>) {
        if let Some(slot) = self.annotations.get_mut(id) {
            *slot = list;
        }
    }

    /// Swap the background at `index` with its cyclic neighbor.
    ///
    /// `Up` swaps with the predecessor (position 0 wraps to the last
    /// position), `Down` with the successor. If the active position is
    /// one of the pair, the active index follows the identity it was
    /// pointing at.
    pub fn reorder(&mut self, index: usize, direction: MoveDirection) {
        let n = self.sequence.len();
        if n < 2 || index >= n {
            return;
        }
        let other = match direction {
            MoveDirection::Up => (index + n - 1) % n,
            MoveDirection::Down => (index + 1) % n,
        };
        self.sequence.swap(index, other);
        if self.active == index {
            self.active = other;
        } else if self.active == other {
            self.active = index;
        }
    }

    /// Make the first position active (after the reorder dialog closes).
    pub fn commit_order(&mut self) {
        self.active = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> TextAnnotation {
        TextAnnotation::new(
            text.to_string(),
            "Arial".to_string(),
            "#000000".to_string(),
            20,
            10.0,
            30.0,
        )
    }

    fn deck_with(ids: &[&str]) -> Deck {
        let mut deck = Deck::new();
        for id in ids {
            assert!(deck.add_background(id.to_string()));
        }
        deck
    }

    #[test]
    fn test_add_background_rejects_duplicates() {
        let mut deck = deck_with(&["1.jpeg", "2.jpg"]);
        assert!(!deck.add_background("1.jpeg".to_string()));
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_annotations_are_per_background() {
        let mut deck = deck_with(&["a.png", "b.png"]);
        deck.add_annotation("a.png", label("on a"));

        assert_eq!(deck.annotations("a.png").len(), 1);
        assert_eq!(deck.annotations("b.png").len(), 0);

        // Switching does not leak labels across backgrounds.
        deck.next();
        assert_eq!(deck.active_id().unwrap(), "b.png");
        assert!(deck.active_annotations().is_empty());

        deck.previous();
        assert_eq!(deck.active_id().unwrap(), "a.png");
        assert_eq!(deck.active_annotations()[0].text, "on a");
    }

    #[test]
    fn test_annotation_order_matches_insertion() {
        let mut deck = deck_with(&["a.png"]);
        for text in ["first", "second", "third"] {
            deck.add_annotation("a.png", label(text));
        }
        let texts: Vec<&str> = deck
            .annotations("a.png")
            .iter()
            .map(|a| a.text.as_str())
            .collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn test_navigation_is_cyclic() {
        let mut deck = deck_with(&["1.jpeg", "2.jpg", "3.jpg"]);
        assert_eq!(deck.active_index(), 0);

        deck.previous();
        assert_eq!(deck.active_id().unwrap(), "3.jpg");

        deck.next();
        deck.next();
        deck.next();
        deck.next();
        assert_eq!(deck.active_id().unwrap(), "1.jpeg");
    }

    #[test]
    fn test_navigation_on_empty_deck_is_noop() {
        let mut deck = Deck::new();
        deck.next();
        deck.previous();
        assert!(deck.active_id().is_none());
        assert!(deck.active_annotations().is_empty());
    }

    #[test]
    fn test_reorder_swaps_positions_not_content() {
        let mut deck = deck_with(&["1.jpeg", "2.jpg", "3.jpg"]);
        deck.add_annotation("2.jpg", label("on two"));

        deck.reorder(1, MoveDirection::Up);
        assert_eq!(deck.ids(), ["2.jpg", "1.jpeg", "3.jpg"]);

        // Keyed state is untouched by the swap.
        assert_eq!(deck.annotations("2.jpg")[0].text, "on two");
        assert!(deck.annotations("1.jpeg").is_empty());
    }

    #[test]
    fn test_reorder_follows_active_identity() {
        let mut deck = deck_with(&["1.jpeg", "2.jpg", "3.jpg"]);
        deck.next(); // active = "2.jpg"

        deck.reorder(1, MoveDirection::Up);
        assert_eq!(deck.active_index(), 0);
        assert_eq!(deck.active_id().unwrap(), "2.jpg");

        // Swapping the pair that contains the active position from the
        // other side translates the pointer too.
        deck.reorder(1, MoveDirection::Up);
        assert_eq!(deck.active_index(), 1);
        assert_eq!(deck.active_id().unwrap(), "2.jpg");
    }

    #[test]
    fn test_reorder_wraps_at_sequence_edges() {
        let mut deck = deck_with(&["1.jpeg", "2.jpg", "3.jpg"]);

        deck.reorder(0, MoveDirection::Up);
        assert_eq!(deck.ids(), ["3.jpg", "2.jpg", "1.jpeg"]);

        deck.reorder(2, MoveDirection::Down);
        assert_eq!(deck.ids(), ["1.jpeg", "2.jpg", "3.jpg"]);
    }

    #[test]
    fn test_labels_and_history_survive_background_rotation() {
        use crate::models::history::HistoryMap;

        let mut deck = deck_with(&["p1.jpg", "p2.jpg", "p3.jpg"]);
        let mut histories = HistoryMap::new();

        // Add "Hi" to the first background, snapshotting first.
        let id = deck.active_id().unwrap().clone();
        histories.snapshot(&id, deck.annotations(&id));
        deck.add_annotation(&id, label("Hi"));
        assert_eq!(deck.active_annotations().len(), 1);

        // The second background is untouched.
        deck.next();
        assert!(deck.active_annotations().is_empty());

        // Coming back, the label is still there.
        deck.previous();
        assert_eq!(deck.active_annotations()[0].text, "Hi");

        // Undo empties the first background's list, redo brings it back.
        let current = deck.annotations(&id).to_vec();
        let restored = histories.undo(&id, &current).unwrap();
        assert!(restored.is_empty());
        deck.set_annotations(&id, restored);

        let current = deck.annotations(&id).to_vec();
        let restored = histories.redo(&id, &current).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].text, "Hi");
        deck.set_annotations(&id, restored);
    }

    #[test]
    fn test_commit_order_activates_first_position() {
        let mut deck = deck_with(&["1.jpeg", "2.jpg", "3.jpg"]);
        deck.next();
        deck.next();
        deck.commit_order();
        assert_eq!(deck.active_id().unwrap(), "1.jpeg");
    }
}
