use boops_types::{DispatchResult, Outbound, PageAction, NR_SLOTS};

use crate::state::{AppState, Pattern};

use super::helpers::notify_rows;

pub(super) fn dispatch_page(action: &PageAction, state: &mut AppState) -> DispatchResult {
    match *action {
        PageAction::Select(page) => {
            if page >= state.pages.len() || page == state.current_page {
                return DispatchResult::none();
            }
            state.current_page = page;
            pages_changed(state)
        }
        PageAction::Insert(at) => insert_page(state, at),
        PageAction::Delete(at) => delete_page(state, at),
        PageAction::Swap(a, b) => {
            let len = state.pages.len();
            if a == b || a >= len || b >= len {
                return DispatchResult::none();
            }
            state.pages.swap(a, b);
            if state.current_page == a {
                state.current_page = b;
            } else if state.current_page == b {
                state.current_page = a;
            }
            let mut result = pages_changed(state);
            notify_page(&mut result, state, a);
            notify_page(&mut result, state, b);
            result
        }
    }
}

fn pages_changed(state: &AppState) -> DispatchResult {
    let mut result = DispatchResult::none();
    result.push(Outbound::Pages {
        count: state.pages.len(),
        current: state.current_page,
    });
    result
}

fn notify_page(result: &mut DispatchResult, state: &AppState, page: usize) {
    notify_rows(result, state, page, 0..=NR_SLOTS - 1);
    for slot in 0..NR_SLOTS {
        let shape = state.pages[page].get_shape(slot).clone();
        result.push(Outbound::Shape { page, slot, shape });
    }
}

/// Insert an empty page at `at` and make it current.
fn insert_page(state: &mut AppState, at: usize) -> DispatchResult {
    let len = state.pages.len();
    if len >= state.variant.max_pages() || at > len {
        log::debug!("page insert at {} ignored ({} of {} pages)", at, len, state.variant.max_pages());
        return DispatchResult::none();
    }
    state.pages.insert(at, Pattern::new(state.undo_depth));
    state.current_page = at;
    let mut result = pages_changed(state);
    for page in at..state.pages.len() {
        notify_page(&mut result, state, page);
    }
    result
}

/// Remove page `at`. The last remaining page is never removed.
fn delete_page(state: &mut AppState, at: usize) -> DispatchResult {
    let len = state.pages.len();
    if len <= 1 || at >= len {
        return DispatchResult::none();
    }
    state.pages.remove(at);
    if state.current_page > at {
        state.current_page -= 1;
    }
    state.current_page = state.current_page.min(state.pages.len() - 1);
    let mut result = pages_changed(state);
    for page in at..state.pages.len() {
        notify_page(&mut result, state, page);
    }
    result
}
