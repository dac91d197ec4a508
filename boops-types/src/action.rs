//! Edit commands accepted by the core, and what it reports back.

use serde::{Deserialize, Serialize};

use crate::{EditMode, EffectKind, Pad, PadField, Shape, Slot, SlotParam};

/// Top-level command from the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Pattern(PatternAction),
    Slot(SlotAction),
    Clipboard(ClipboardAction),
    Page(PageAction),
    SetEditMode(EditMode),
    Undo,
    Redo,
    /// Clear every pad and shape on the current page (undoable).
    Reset,
}

/// Cell-level edits on the current page. Coordinates are clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatternAction {
    SetPad { row: isize, step: isize, pad: Pad },
    ClickPad { row: isize, step: isize },
    ScrollPad { row: isize, step: isize, field: PadField, notches: i32 },
    SetShape { row: isize, shape: Shape },
    SetBrush(Pad),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotAction {
    Insert { slot: usize, effect: EffectKind },
    Delete(usize),
    Swap(usize, usize),
    Move { source: usize, target: usize },
    SetParam { slot: usize, param: SlotParam, value: f32 },
}

/// Pointer gesture on the grid while a clipboard edit mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipboardAction {
    Press { row: isize, step: isize },
    Drag { row: isize, step: isize },
    Release,
    Paste { row: isize, step: isize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageAction {
    Select(usize),
    Insert(usize),
    Delete(usize),
    Swap(usize, usize),
}

/// Value to forward to the DSP side after a local change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outbound {
    /// Whole-row snapshot of one page.
    SlotPads { page: usize, slot: usize, pads: Vec<Pad> },
    Pad { page: usize, slot: usize, step: usize, pad: Pad },
    Shape { page: usize, slot: usize, shape: Shape },
    SlotParams { slot: usize, params: Slot },
    Pages { count: usize, current: usize },
}

/// Result of a dispatch: notifications for the host layer and a redraw hint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchResult {
    pub outbound: Vec<Outbound>,
    pub redraw: bool,
}

impl DispatchResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_redraw() -> Self {
        Self { redraw: true, ..Self::default() }
    }

    pub fn push(&mut self, msg: Outbound) {
        self.outbound.push(msg);
        self.redraw = true;
    }

    pub fn merge(&mut self, other: DispatchResult) {
        self.redraw |= other.redraw;
        self.outbound.extend(other.outbound);
    }

    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty() && !self.redraw
    }
}
