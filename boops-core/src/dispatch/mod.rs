mod clipboard;
mod helpers;
mod page;
mod pattern;
mod slots;

pub use clipboard::{copy_selection, cut_selection, paste, xflip, yflip};
pub use slots::{delete_slot, insert_slot, move_slot, swap_slots};

use boops_types::{Action, ClipboardAction, DispatchResult, EditMode, PatternAction};

use crate::state::AppState;

/// Apply one UI command to `state`.
///
/// Wheel edits on pads keep their batch open so a scroll gesture becomes a
/// single undo step; every other command first closes open batches.
pub fn dispatch_action(action: &Action, state: &mut AppState) -> DispatchResult {
    if !matches!(action, Action::Pattern(PatternAction::ScrollPad { .. })) {
        state.close_batches();
    }

    match action {
        Action::Pattern(a) => pattern::dispatch_pattern(a, state),
        Action::Slot(a) => slots::dispatch_slot(a, state),
        Action::Clipboard(a) => dispatch_clipboard_gesture(a, state),
        Action::Page(a) => page::dispatch_page(a, state),
        Action::SetEditMode(mode) => {
            state.edit_mode = *mode;
            state.clipboard.disarm();
            DispatchResult::with_redraw()
        }
        Action::Undo => {
            let page = state.current_page;
            let replay = state.pattern_mut().undo();
            helpers::replayed(page, &replay)
        }
        Action::Redo => {
            let page = state.current_page;
            let replay = state.pattern_mut().redo();
            helpers::replayed(page, &replay)
        }
        Action::Reset => pattern::reset_page(state),
    }
}

/// Grid pointer gestures are interpreted by the active edit mode.
fn dispatch_clipboard_gesture(action: &ClipboardAction, state: &mut AppState) -> DispatchResult {
    match (state.edit_mode, *action) {
        (EditMode::Draw | EditMode::Pick, ClipboardAction::Press { row, step }) => {
            pattern::dispatch_pattern(&PatternAction::ClickPad { row, step }, state)
        }
        (EditMode::Paste, ClipboardAction::Press { row, step }) | (_, ClipboardAction::Paste { row, step }) => {
            paste(state, row, step)
        }
        (mode, a) if mode.is_rectangle() => clipboard::rectangle_gesture(&a, state),
        _ => DispatchResult::none(),
    }
}
