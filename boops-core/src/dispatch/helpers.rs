use std::ops::RangeInclusive;

use boops_types::{DispatchResult, Outbound, PadMessage};

use crate::state::AppState;

/// Forward pads replayed by undo/redo.
pub(super) fn replayed(page: usize, replay: &[PadMessage]) -> DispatchResult {
    let mut result = DispatchResult::none();
    for msg in replay {
        result.push(Outbound::Pad {
            page,
            slot: msg.row,
            step: msg.step,
            pad: msg.pad,
        });
    }
    result
}

/// Whole-row pad snapshot of one page.
pub(super) fn row_snapshot(state: &AppState, page: usize, slot: usize) -> Outbound {
    Outbound::SlotPads {
        page,
        slot,
        pads: state.pages[page].row(slot).to_vec(),
    }
}

/// Notify rows of one page.
pub(super) fn notify_rows(result: &mut DispatchResult, state: &AppState, page: usize, rows: RangeInclusive<usize>) {
    for slot in rows {
        result.push(row_snapshot(state, page, slot));
    }
}

/// Notify everything a slot owns, on every page: pads, shape and parameters.
pub(super) fn notify_slots(result: &mut DispatchResult, state: &AppState, slots: RangeInclusive<usize>) {
    for slot in slots {
        result.push(Outbound::SlotParams {
            slot,
            params: state.slots[slot].clone(),
        });
        for page in 0..state.pages.len() {
            result.push(row_snapshot(state, page, slot));
            result.push(Outbound::Shape {
                page,
                slot,
                shape: state.pages[page].get_shape(slot).clone(),
            });
        }
    }
}
