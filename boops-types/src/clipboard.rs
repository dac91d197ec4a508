//! Clipboard types for pattern cut/copy/paste.

use serde::{Deserialize, Serialize};

use crate::{limit_index, Pad, Shape, NR_SLOTS, NR_STEPS};

/// What a press on the pattern grid does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    /// Toggle pads with the brush.
    #[default]
    Draw,
    /// Take the pressed pad as the new brush.
    Pick,
    Cut,
    Copy,
    XFlip,
    YFlip,
    Paste,
}

impl EditMode {
    /// Modes that select a rectangle by press, drag and release.
    pub fn is_rectangle(&self) -> bool {
        matches!(self, EditMode::Cut | EditMode::Copy | EditMode::XFlip | EditMode::YFlip)
    }
}

/// Rectangle anchored at a press point and extended by dragging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub origin: (usize, usize),   // (row, step)
    pub extends: (isize, isize),  // signed (rows, steps) from origin
}

impl Selection {
    pub fn at(row: usize, step: usize) -> Self {
        Self {
            origin: (row.min(NR_SLOTS - 1), step.min(NR_STEPS - 1)),
            extends: (0, 0),
        }
    }

    /// Extend towards `(row, step)`, whichever direction the drag goes.
    pub fn extend_to(&mut self, row: isize, step: isize) {
        let row = limit_index(row, NR_SLOTS) as isize;
        let step = limit_index(step, NR_STEPS) as isize;
        self.extends = (row - self.origin.0 as isize, step - self.origin.1 as isize);
    }

    /// Inclusive `(row_min, row_max, step_min, step_max)` inside the grid.
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        let r0 = self.origin.0 as isize;
        let s0 = self.origin.1 as isize;
        let r1 = r0 + self.extends.0;
        let s1 = s0 + self.extends.1;
        (
            limit_index(r0.min(r1), NR_SLOTS),
            limit_index(r0.max(r1), NR_SLOTS),
            limit_index(s0.min(s1), NR_STEPS),
            limit_index(s0.max(s1), NR_STEPS),
        )
    }

    pub fn rows(&self) -> usize {
        let (r0, r1, _, _) = self.bounds();
        r1 - r0 + 1
    }

    pub fn steps(&self) -> usize {
        let (_, _, s0, s1) = self.bounds();
        s1 - s0 + 1
    }

    /// Whether the rectangle spans whole rows.
    pub fn is_full_width(&self) -> bool {
        let (_, _, s0, s1) = self.bounds();
        s0 == 0 && s1 == NR_STEPS - 1
    }
}

/// Transient selection buffer. Reset on each cut/copy/flip gesture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clipboard {
    pub selection: Selection,
    /// A press started the current selection and has not been released.
    pub pressed: bool,
    /// Selection finalized (button released).
    pub ready: bool,
    /// Copied pads, `data[row][step]` relative to the selection corner.
    pub data: Vec<Vec<Pad>>,
    /// Copied row shapes; only filled for full-width selections.
    pub shapes: Vec<Shape>,
}

impl Clipboard {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Anchor a new selection at a press point.
    pub fn begin(&mut self, row: usize, step: usize) {
        self.selection = Selection::at(row, step);
        self.pressed = true;
        self.ready = false;
    }

    /// Close the pressed selection. False if no press started one.
    pub fn release(&mut self) -> bool {
        if !self.pressed {
            return false;
        }
        self.pressed = false;
        self.ready = true;
        true
    }

    /// Forget any pending gesture; the next edit needs a fresh press.
    pub fn disarm(&mut self) {
        self.pressed = false;
        self.ready = false;
    }
}
