// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-background undo/redo history.
//!
//! Each background keeps its own pair of undo/redo stacks. A stack
//! entry is a serialized copy of a label list taken immediately before
//! a change, so undo restores the state prior to the last committed
//! mutation. Restored lists are deserialized into fresh values and
//! never alias the live labels.

use super::annotation::TextAnnotation;
use super::deck::BackgroundId;
use std::collections::HashMap;

/// A serialized copy of a label list captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    /// Serialize the given list.
    ///
    /// Returns None if serialization fails, which the caller treats as
    /// "nothing to record" (the failure is logged here).
    pub fn capture(list: &[TextAnnotation]) -> Option<Self> {
        match serde_json::to_string(list) {
            Ok(json) => Some(Self(json)),
            Err(e) => {
                log::error!("Failed to serialize label snapshot: {}", e);
                None
            }
        }
    }

    /// Deserialize back into an independent label list.
    pub fn restore(&self) -> Vec<TextAnnotation> {
        match serde_json::from_str(&self.0) {
            Ok(list) => list,
            Err(e) => {
                log::error!("Failed to restore label snapshot: {}", e);
                Vec::new()
            }
        }
    }
}

/// Undo/redo stacks for a single background.
#[derive(Debug, Default)]
pub struct History {
    /// Undo stack (states before past changes)
    undo_stack: Vec<Snapshot>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<Snapshot>,
}

/// Keep the last 50 states per background.
const MAX_HISTORY_SIZE: usize = 50;

impl History {
    /// Record a pre-change snapshot and invalidate the redo stack.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        // Limit history size
        if self.undo_stack.len() > MAX_HISTORY_SIZE {
            self.undo_stack.remove(0);
        }
        // Clear redo stack when new action is performed
        self.redo_stack.clear();
    }

    /// Undo: restore the previous state. No-op (None) on an empty stack.
    pub fn undo(&mut self, current: &[TextAnnotation]) -> Option<Vec<TextAnnotation>> {
        if self.undo_stack.is_empty() {
            return None;
        }
        let now = Snapshot::capture(current)?;
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(now);
        Some(previous.restore())
    }

    /// Redo: restore the next state. No-op (None) on an empty stack.
    pub fn redo(&mut self, current: &[TextAnnotation]) -> Option<Vec<TextAnnotation>> {
        if self.redo_stack.is_empty() {
            return None;
        }
        let now = Snapshot::capture(current)?;
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(now);
        Some(next.restore())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[cfg(test)]
    fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }
}

/// Histories for every background, keyed by identity.
#[derive(Debug, Default)]
pub struct HistoryMap {
    histories: HashMap<BackgroundId, History>,
}

impl HistoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the given background's current list as a pre-change state.
    pub fn snapshot(&mut self, id: &str, current: &[TextAnnotation]) {
        if let Some(snapshot) = Snapshot::capture(current) {
            self.entry(id).push(snapshot);
        }
    }

    /// Record an already-captured snapshot (drag commits capture at
    /// pointer-down and push at pointer-up).
    pub fn push(&mut self, id: &str, snapshot: Snapshot) {
        self.entry(id).push(snapshot);
    }

    pub fn undo(&mut self, id: &str, current: &[TextAnnotation]) -> Option<Vec<TextAnnotation>> {
        self.entry(id).undo(current)
    }

    pub fn redo(&mut self, id: &str, current: &[TextAnnotation]) -> Option<Vec<TextAnnotation>> {
        self.entry(id).redo(current)
    }

    pub fn can_undo(&self, id: &str) -> bool {
        self.histories.get(id).is_some_and(History::can_undo)
    }

    pub fn can_redo(&self, id: &str) -> bool {
        self.histories.get(id).is_some_and(History::can_redo)
    }

    fn entry(&mut self, id: &str) -> &mut History {
        self.histories.entry(id.to_string()).or_default()
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

    #[test]
    fn test_undo_restores_pre_change_state() {
        let mut history = History::default();
        let before: Vec<TextAnnotation> = Vec::new();
        let after = vec![label("Hi")];

        history.push(Snapshot::capture(&before).unwrap());
        let restored = history.undo(&after).unwrap();
        assert_eq!(restored, before);
    }

    #[test]
    fn test_redo_restores_undone_state() {
        let mut history = History::default();
        let before: Vec<TextAnnotation> = Vec::new();
        let after = vec![label("Hi")];

        history.push(Snapshot::capture(&before).unwrap());
        let undone = history.undo(&after).unwrap();
        let redone = history.redo(&undone).unwrap();
        assert_eq!(redone, after);
    }

    #[test]
    fn test_new_snapshot_clears_redo() {
        let mut history = History::default();
        let state_a = vec![label("a")];
        let state_b = vec![label("b")];

        history.push(Snapshot::capture(&state_a).unwrap());
        history.undo(&state_b).unwrap();
        assert!(history.can_redo());

        // A fresh mutation makes redo unavailable.
        history.push(Snapshot::capture(&state_a).unwrap());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_on_empty_stack_is_noop() {
        let mut history = History::default();
        assert!(history.undo(&[label("x")]).is_none());
        assert!(history.redo(&[label("x")]).is_none());
        // The no-op undo must not have disturbed the stacks.
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::default();
        for i in 0..(MAX_HISTORY_SIZE + 25) {
            history.push(Snapshot::capture(&[label(&i.to_string())]).unwrap());
        }
        assert_eq!(history.undo_len(), MAX_HISTORY_SIZE);

        // The oldest entries were evicted, so the deepest undo lands on
        // the first state still retained.
        let mut current = vec![label("current")];
        let mut last = None;
        while history.can_undo() {
            current = history.undo(&current).unwrap();
            last = Some(current.clone());
        }
        assert_eq!(last.unwrap()[0].text, "25");
    }

    #[test]
    fn test_restored_lists_are_independent() {
        let mut history = History::default();
        let before = vec![label("original")];
        history.push(Snapshot::capture(&before).unwrap());

        let mut restored = history.undo(&[]).unwrap();
        restored[0].text = "mutated".to_string();
        assert_eq!(before[0].text, "original");
    }

    #[test]
    fn test_histories_are_independent_per_background() {
        let mut map = HistoryMap::new();
        map.snapshot("a.png", &[]);

        assert!(map.can_undo("a.png"));
        assert!(!map.can_undo("b.png"));
        assert!(map.undo("b.png", &[label("x")]).is_none());

        let restored = map.undo("a.png", &[label("on a")]).unwrap();
        assert!(restored.is_empty());
        assert!(map.can_redo("a.png"));
        assert!(!map.can_redo("b.png"));
    }
}
