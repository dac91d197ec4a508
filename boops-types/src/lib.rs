//! # boops-types
//!
//! Shared data definitions for the B.Oops pattern editor.
//! Plain values only: pads, shapes, effect slots, clipboard and the
//! action/notification vocabulary exchanged with `boops-core`.

pub mod action;
mod clipboard;
mod effect;
mod pad;
mod shape;

pub use action::*;
pub use clipboard::{Clipboard, EditMode, Selection};
pub use effect::{EffectKind, Slot, SlotParam};
pub use pad::{Pad, PadField, PadMessage};
pub use shape::{Node, NodeType, Point, Shape};

/// Effect slots in the chain (pattern rows).
pub const NR_SLOTS: usize = 12;
/// Steps per pattern row.
pub const NR_STEPS: usize = 32;
/// Maximum number of pattern pages.
pub const NR_PAGES: usize = 16;
/// Node capacity of a single shape.
pub const SHAPE_MAXNODES: usize = 64;
/// Effect-specific option parameters per slot.
pub const NR_OPTIONS: usize = 12;

/// Clamp a possibly out-of-range index into `0..len`.
///
/// Requests from pointer callbacks may land outside the grid; they are
/// resolved to the nearest valid cell instead of being rejected.
pub fn limit_index(index: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    if index < 0 {
        0
    } else {
        (index as usize).min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_index_clamps_both_ends() {
        assert_eq!(limit_index(-1, NR_SLOTS), 0);
        assert_eq!(limit_index(9999, NR_STEPS), NR_STEPS - 1);
        assert_eq!(limit_index(3, NR_STEPS), 3);
    }
}
