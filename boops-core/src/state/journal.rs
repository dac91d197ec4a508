use std::collections::VecDeque;

/// One committed batch: paired before/after records for the same cells, same order.
#[derive(Debug, Clone)]
struct JournalEntry<T> {
    old: Vec<T>,
    new: Vec<T>,
}

/// Linear undo/redo history of grouped changes.
///
/// Pushing a new batch discards anything that could have been redone.
/// When the history is full the oldest batch is dropped.
#[derive(Debug, Clone)]
pub struct Journal<T> {
    undo_stack: VecDeque<JournalEntry<T>>,
    redo_stack: VecDeque<JournalEntry<T>>,
    max_depth: usize,
}

impl<T: Clone> Journal<T> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Commit a batch. `old` and `new` must describe the same cells in the same order.
    pub fn push(&mut self, old: Vec<T>, new: Vec<T>) {
        debug_assert_eq!(old.len(), new.len(), "journal batch halves differ in length");
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(JournalEntry { old, new });
        self.redo_stack.clear();
    }

    /// Step back one batch. Returns the "old" records last-written-first,
    /// so replaying them in order restores cells written twice correctly.
    /// Empty when there is nothing to undo.
    pub fn undo(&mut self) -> Vec<T> {
        let Some(entry) = self.undo_stack.pop_back() else {
            return Vec::new();
        };
        let replay = entry.old.iter().rev().cloned().collect();
        self.redo_stack.push_back(entry);
        replay
    }

    /// Step forward one batch. Returns the "new" records in their original order.
    /// Empty when there is nothing to redo.
    pub fn redo(&mut self) -> Vec<T> {
        let Some(entry) = self.redo_stack.pop_back() else {
            return Vec::new();
        };
        let replay = entry.new.clone();
        self.undo_stack.push_back(entry);
        replay
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
