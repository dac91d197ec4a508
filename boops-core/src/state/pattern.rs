use boops_types::{Pad, PadMessage, Shape, NR_SLOTS, NR_STEPS};

use super::journal::Journal;

/// Edits made since the last commit.
#[derive(Debug, Clone, Default)]
struct Changes {
    old: Vec<PadMessage>,
    new: Vec<PadMessage>,
}

impl Changes {
    fn is_empty(&self) -> bool {
        self.new.is_empty()
    }

    fn clear(&mut self) {
        self.old.clear();
        self.new.clear();
    }
}

/// Authoritative grid for one page: pads, per-row shapes, staged changes
/// and their undo journal.
///
/// Row and step arguments are clamped into the grid rather than rejected.
/// Pad writes are staged until [`Pattern::store`] commits them as one undo
/// step. Shapes are stored alongside but are not journaled.
#[derive(Debug, Clone)]
pub struct Pattern {
    pads: [[Pad; NR_STEPS]; NR_SLOTS],
    shapes: [Shape; NR_SLOTS],
    changes: Changes,
    journal: Journal<PadMessage>,
    batch_open: bool,
}

impl Pattern {
    pub fn new(undo_depth: usize) -> Self {
        Self {
            pads: [[Pad::default(); NR_STEPS]; NR_SLOTS],
            shapes: std::array::from_fn(|_| Shape::new()),
            changes: Changes::default(),
            journal: Journal::new(undo_depth),
            batch_open: false,
        }
    }

    /// Reset pads and shapes to defaults and forget all history.
    pub fn clear(&mut self) {
        self.pads = [[Pad::default(); NR_STEPS]; NR_SLOTS];
        for shape in self.shapes.iter_mut() {
            shape.clear();
        }
        self.changes.clear();
        self.journal.clear();
        self.batch_open = false;
    }

    pub fn get_pad(&self, row: usize, step: usize) -> Pad {
        let (row, step) = clamp_cell(row, step);
        self.pads[row][step]
    }

    /// Stage a pad write. The previous value is recorded for undo.
    pub fn set_pad(&mut self, row: usize, step: usize, pad: Pad) {
        let (row, step) = clamp_cell(row, step);
        let old = self.pads[row][step];
        self.changes.old.push(PadMessage::new(row, step, old));
        self.changes.new.push(PadMessage::new(row, step, pad));
        self.pads[row][step] = pad;
    }

    pub fn row(&self, row: usize) -> &[Pad; NR_STEPS] {
        &self.pads[row.min(NR_SLOTS - 1)]
    }

    pub fn pads(&self) -> &[[Pad; NR_STEPS]; NR_SLOTS] {
        &self.pads
    }

    pub fn get_shape(&self, row: usize) -> &Shape {
        &self.shapes[row.min(NR_SLOTS - 1)]
    }

    /// Replace a row's shape. Not recorded in the journal.
    pub fn set_shape(&mut self, row: usize, shape: Shape) {
        self.shapes[row.min(NR_SLOTS - 1)] = shape;
    }

    /// Commit staged writes as one undo step. Returns false if nothing was staged.
    /// Closes an open batch either way.
    pub fn store(&mut self) -> bool {
        self.batch_open = false;
        if self.changes.is_empty() {
            return false;
        }
        let old = std::mem::take(&mut self.changes.old);
        let new = std::mem::take(&mut self.changes.new);
        log::debug!("pattern: committing batch of {} pad writes", new.len());
        self.journal.push(old, new);
        true
    }

    /// Revert the last committed batch (committing staged writes first).
    /// Returns the replayed records for forwarding downstream.
    pub fn undo(&mut self) -> Vec<PadMessage> {
        self.store();
        let replay = self.journal.undo();
        self.replay(&replay);
        log::debug!("pattern: undo replayed {} records", replay.len());
        replay
    }

    /// Re-apply the last undone batch (committing staged writes first, which
    /// discards the redo history).
    pub fn redo(&mut self) -> Vec<PadMessage> {
        self.store();
        let replay = self.journal.redo();
        self.replay(&replay);
        log::debug!("pattern: redo replayed {} records", replay.len());
        replay
    }

    fn replay(&mut self, messages: &[PadMessage]) {
        for msg in messages {
            let (row, step) = clamp_cell(msg.row, msg.step);
            self.pads[row][step] = msg.pad;
        }
    }

    /// Start grouping subsequent writes into one undo step.
    pub fn begin_batch(&mut self) {
        self.batch_open = true;
    }

    /// Close the open batch and commit it. Returns true if a batch was committed.
    pub fn commit_batch(&mut self) -> bool {
        self.store()
    }

    pub fn is_batch_open(&self) -> bool {
        self.batch_open
    }

    /// Staged writes waiting for a commit.
    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.journal.can_undo() || self.is_dirty()
    }

    pub fn can_redo(&self) -> bool {
        self.journal.can_redo()
    }

    pub fn journal(&self) -> &Journal<PadMessage> {
        &self.journal
    }
}

fn clamp_cell(row: usize, step: usize) -> (usize, usize) {
    (row.min(NR_SLOTS - 1), step.min(NR_STEPS - 1))
}
