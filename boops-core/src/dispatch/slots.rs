//! Effect-slot reordering.
//!
//! A slot owns its parameter values plus one pattern row and one shape on
//! every page. All of these move together. Pad writes go through the page
//! journals (one commit per page per operation); shapes and parameters
//! are not journaled.

use boops_types::{DispatchResult, EffectKind, Outbound, Pad, Shape, Slot, SlotAction, NR_SLOTS, NR_STEPS};

use crate::state::AppState;

use super::helpers::notify_slots;

pub(super) fn dispatch_slot(action: &SlotAction, state: &mut AppState) -> DispatchResult {
    match action {
        SlotAction::Insert { slot, effect } => insert_slot(state, *slot, *effect),
        SlotAction::Delete(slot) => delete_slot(state, *slot),
        SlotAction::Swap(a, b) => swap_slots(state, *a, *b),
        SlotAction::Move { source, target } => move_slot(state, *source, *target),
        SlotAction::SetParam { slot, param, value } => {
            if *slot >= state.slots_size() {
                return DispatchResult::none();
            }
            state.slots[*slot].set_param(*param, *value);
            let mut result = DispatchResult::none();
            result.push(Outbound::SlotParams {
                slot: *slot,
                params: state.slots[*slot].clone(),
            });
            result
        }
    }
}

/// Everything a slot owns, lifted out of the state.
struct SlotBuffer {
    params: Slot,
    rows: Vec<([Pad; NR_STEPS], Shape)>, // per page
}

fn take_slot(state: &AppState, slot: usize) -> SlotBuffer {
    SlotBuffer {
        params: state.slots[slot].clone(),
        rows: state
            .pages
            .iter()
            .map(|page| (*page.row(slot), page.get_shape(slot).clone()))
            .collect(),
    }
}

fn put_slot(state: &mut AppState, slot: usize, buffer: SlotBuffer) {
    state.slots[slot] = buffer.params;
    for (page, (pads, shape)) in state.pages.iter_mut().zip(buffer.rows) {
        for (step, pad) in pads.iter().enumerate() {
            if page.get_pad(slot, step) != *pad {
                page.set_pad(slot, step, *pad);
            }
        }
        page.set_shape(slot, shape);
    }
}

/// Copy pads (every page), shape and parameters from one slot to another.
fn copy_slot(state: &mut AppState, from: usize, to: usize) {
    let buffer = take_slot(state, from);
    put_slot(state, to, buffer);
}

/// Reset a slot to a fresh `effect` with empty rows on every page.
fn clear_slot(state: &mut AppState, slot: usize, effect: EffectKind) {
    let pages = state.pages.len();
    put_slot(
        state,
        slot,
        SlotBuffer {
            params: Slot::new(effect),
            rows: vec![([Pad::default(); NR_STEPS], Shape::new()); pages],
        },
    );
}

fn finish(state: &mut AppState, first: usize, last: usize) -> DispatchResult {
    state.store_all();
    let mut result = DispatchResult::none();
    notify_slots(&mut result, state, first..=last);
    result
}

/// Insert a new `effect` slot at `slot`, shifting later slots down.
/// No-op if `slot` is past the end of the chain or the chain is full.
pub fn insert_slot(state: &mut AppState, slot: usize, effect: EffectKind) -> DispatchResult {
    let size = state.slots_size();
    if slot > size || size >= NR_SLOTS || effect == EffectKind::None {
        log::trace!("insert_slot({}) ignored, chain size {}", slot, size);
        return DispatchResult::none();
    }
    for i in (slot + 1..=size).rev() {
        copy_slot(state, i - 1, i);
    }
    clear_slot(state, slot, effect);
    log::debug!("inserted {} at slot {}", effect.name(), slot);
    finish(state, slot, size)
}

/// Remove `slot`, closing the gap. No-op if `slot` is not in use.
pub fn delete_slot(state: &mut AppState, slot: usize) -> DispatchResult {
    let size = state.slots_size();
    if slot >= size {
        log::trace!("delete_slot({}) ignored, chain size {}", slot, size);
        return DispatchResult::none();
    }
    for i in slot..size - 1 {
        copy_slot(state, i + 1, i);
    }
    clear_slot(state, size - 1, EffectKind::None);
    log::debug!("deleted slot {}", slot);
    finish(state, slot, size - 1)
}

/// Exchange two used slots in place.
pub fn swap_slots(state: &mut AppState, a: usize, b: usize) -> DispatchResult {
    let size = state.slots_size();
    if a == b || a >= size || b >= size {
        return DispatchResult::none();
    }
    let buffer_a = take_slot(state, a);
    let buffer_b = take_slot(state, b);
    put_slot(state, a, buffer_b);
    put_slot(state, b, buffer_a);
    log::debug!("swapped slots {} and {}", a, b);
    finish(state, a.min(b), a.max(b))
}

/// Move `source` to `target`, shifting the slots in between by one.
pub fn move_slot(state: &mut AppState, source: usize, target: usize) -> DispatchResult {
    let size = state.slots_size();
    if source == target || source >= size || target >= size {
        return DispatchResult::none();
    }
    if source.abs_diff(target) == 1 {
        return swap_slots(state, source, target);
    }

    let buffer = take_slot(state, source);
    if source < target {
        for i in source..target {
            copy_slot(state, i + 1, i);
        }
    } else {
        for i in (target + 1..=source).rev() {
            copy_slot(state, i - 1, i);
        }
    }
    put_slot(state, target, buffer);
    log::debug!("moved slot {} to {}", source, target);
    finish(state, source.min(target), source.max(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boops_types::{Node, PageAction, SlotParam};

    const CHAIN: [EffectKind; 5] = [
        EffectKind::Amp,
        EffectKind::Delay,
        EffectKind::Crush,
        EffectKind::Reverb,
        EffectKind::Chop,
    ];

    /// Five slots on two pages, each row marked with its slot index.
    fn setup() -> AppState {
        let mut state = AppState::new();
        crate::dispatch::dispatch_action(&boops_types::Action::Page(PageAction::Insert(1)), &mut state);
        assert_eq!(state.pages.len(), 2);
        for (i, effect) in CHAIN.iter().enumerate() {
            insert_slot(&mut state, i, *effect);
            for page in 0..2 {
                let mark = Pad::new(1.0, 1.0, (i * 10 + page) as f32 / 100.0);
                state.pages[page].set_pad(i, i, mark);
                state.pages[page].set_shape(i, Shape::from_nodes([Node::point(i as f64, page as f64)]));
                state.pages[page].store();
            }
        }
        state
    }

    fn mark(state: &AppState, page: usize, slot: usize) -> Pad {
        state.pages[page].get_pad(slot, slot)
    }

    #[test]
    fn insert_shifts_rows_down_on_every_page() {
        let mut state = setup();
        insert_slot(&mut state, 1, EffectKind::Flanger);
        assert_eq!(state.slots_size(), 6);
        assert_eq!(state.slots[1].effect, EffectKind::Flanger);
        assert_eq!(state.slots[2].effect, EffectKind::Delay);
        for page in 0..2 {
            assert!(state.pages[page].row(1).iter().all(|p| *p == Pad::default()));
            assert!(state.pages[page].get_shape(1).is_empty());
            // old slot 1 marker now lives in row 2, still at step 1
            assert_eq!(state.pages[page].get_pad(2, 1), Pad::new(1.0, 1.0, (10 + page) as f32 / 100.0));
        }
        assert_eq!(mark(&setup(), 0, 0), state.pages[0].get_pad(0, 0));
    }

    #[test]
    fn insert_rejects_gap_and_full_chain() {
        let mut state = setup();
        assert!(insert_slot(&mut state, 7, EffectKind::Amp).is_empty());
        assert!(insert_slot(&mut state, 0, EffectKind::None).is_empty());
        for i in 5..NR_SLOTS {
            insert_slot(&mut state, i, EffectKind::Noise);
        }
        assert_eq!(state.slots_size(), NR_SLOTS);
        assert!(insert_slot(&mut state, 0, EffectKind::Amp).is_empty());
    }

    #[test]
    fn delete_closes_gap() {
        let mut state = setup();
        delete_slot(&mut state, 1);
        assert_eq!(state.slots_size(), 4);
        assert_eq!(state.slots[1].effect, EffectKind::Crush);
        assert!(state.slots[4].is_empty());
        for page in 0..2 {
            assert_eq!(state.pages[page].get_pad(1, 2), Pad::new(1.0, 1.0, (20 + page) as f32 / 100.0));
            assert!(state.pages[page].row(4).iter().all(|p| *p == Pad::default()));
        }
        assert!(delete_slot(&mut state, 4).is_empty());
    }

    #[test]
    fn swap_exchanges_everything() {
        let mut state = setup();
        state.slots[0].set_param(SlotParam::Mix, 0.25);
        swap_slots(&mut state, 0, 3);
        assert_eq!(state.slots[3].effect, EffectKind::Amp);
        assert_eq!(state.slots[3].mix, 0.25);
        assert_eq!(state.slots[0].effect, EffectKind::Reverb);
        for page in 0..2 {
            assert_eq!(state.pages[page].get_pad(3, 0), Pad::new(1.0, 1.0, page as f32 / 100.0));
            assert_eq!(state.pages[page].get_pad(0, 3), Pad::new(1.0, 1.0, (30 + page) as f32 / 100.0));
            assert_eq!(state.pages[page].get_shape(0).nodes()[0].point.x, 3.0);
        }
    }

    #[test]
    fn swap_is_one_undo_step_per_page() {
        let mut state = setup();
        let before: Vec<_> = state.pages.iter().map(|p| p.journal().undo_len()).collect();
        swap_slots(&mut state, 1, 2);
        for (page, len) in state.pages.iter().zip(before) {
            assert_eq!(page.journal().undo_len(), len + 1);
        }
    }

    #[test]
    fn move_across_several_slots_keeps_others_intact() {
        for (source, target) in [(0, 4), (4, 0), (1, 3), (3, 1), (0, 2), (2, 4)] {
            let mut state = setup();
            let original = setup();
            move_slot(&mut state, source, target);

            // resulting order, as the list operation would produce it
            let mut order: Vec<usize> = (0..5).collect();
            let moved = order.remove(source);
            order.insert(target, moved);

            for (new_index, old_index) in order.iter().enumerate() {
                assert_eq!(state.slots[new_index], original.slots[*old_index], "move {}->{}", source, target);
                for page in 0..2 {
                    assert_eq!(
                        state.pages[page].row(new_index),
                        original.pages[page].row(*old_index),
                        "move {}->{} page {}",
                        source,
                        target,
                        page
                    );
                    assert_eq!(
                        state.pages[page].get_shape(new_index),
                        original.pages[page].get_shape(*old_index)
                    );
                }
            }
            for page in 0..2 {
                for row in 5..NR_SLOTS {
                    assert_eq!(state.pages[page].row(row), original.pages[page].row(row));
                }
            }
        }
    }

    #[test]
    fn neighbour_move_is_a_swap() {
        let mut state = setup();
        move_slot(&mut state, 2, 3);
        assert_eq!(state.slots[2].effect, EffectKind::Reverb);
        assert_eq!(state.slots[3].effect, EffectKind::Crush);
    }

    #[test]
    fn invalid_moves_are_ignored() {
        let mut state = setup();
        assert!(move_slot(&mut state, 2, 2).is_empty());
        assert!(move_slot(&mut state, 0, 9).is_empty());
        assert!(swap_slots(&mut state, 7, 1).is_empty());
    }

    #[test]
    fn notifications_cover_every_page() {
        let mut state = setup();
        let result = move_slot(&mut state, 0, 2);
        let rows = result
            .outbound
            .iter()
            .filter(|m| matches!(m, Outbound::SlotPads { .. }))
            .count();
        assert_eq!(rows, 3 * 2);
        let params = result
            .outbound
            .iter()
            .filter(|m| matches!(m, Outbound::SlotParams { .. }))
            .count();
        assert_eq!(params, 3);
    }

    #[test]
    fn undo_after_move_restores_pads() {
        let mut state = setup();
        let original = setup();
        move_slot(&mut state, 0, 4);
        state.pages[0].undo();
        assert_eq!(state.pages[0].pads(), original.pages[0].pads());
    }

    #[test]
    fn set_param_only_on_used_slots() {
        let mut state = setup();
        let action = SlotAction::SetParam { slot: 1, param: SlotParam::Pan, value: 0.5 };
        dispatch_slot(&action, &mut state);
        assert_eq!(state.slots[1].pan, 0.5);
        let action = SlotAction::SetParam { slot: 8, param: SlotParam::Pan, value: 0.5 };
        assert!(dispatch_slot(&action, &mut state).is_empty());
    }
}
