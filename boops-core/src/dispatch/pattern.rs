use boops_types::{
    limit_index, DispatchResult, EditMode, Outbound, Pad, PadField, PatternAction, Shape, NR_SLOTS, NR_STEPS,
};

use crate::state::AppState;

use super::helpers::notify_rows;

pub(super) fn dispatch_pattern(action: &PatternAction, state: &mut AppState) -> DispatchResult {
    match action {
        PatternAction::SetPad { row, step, pad } => {
            let (row, step) = cell(*row, *step);
            let pad = sanitize(*pad);
            state.pattern_mut().set_pad(row, step, pad);
            state.pattern_mut().store();
            pad_changed(state, row, step)
        }
        PatternAction::ClickPad { row, step } => {
            let (row, step) = cell(*row, *step);
            click_pad(state, row, step)
        }
        PatternAction::ScrollPad { row, step, field, notches } => {
            let (row, step) = cell(*row, *step);
            scroll_pad(state, row, step, *field, *notches)
        }
        PatternAction::SetShape { row, shape } => {
            let row = limit_index(*row, NR_SLOTS);
            let page = state.current_page;
            state.pattern_mut().set_shape(row, shape.clone());
            let mut result = DispatchResult::none();
            result.push(Outbound::Shape { page, slot: row, shape: shape.clone() });
            result
        }
        PatternAction::SetBrush(pad) => {
            let pad = sanitize(*pad);
            state.brush = pad.with_run_length(pad.run_length().max(1));
            DispatchResult::with_redraw()
        }
    }
}

fn cell(row: isize, step: isize) -> (usize, usize) {
    (limit_index(row, NR_SLOTS), limit_index(step, NR_STEPS))
}

fn sanitize(pad: Pad) -> Pad {
    let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
    Pad::new(
        finite(pad.gate).clamp(0.0, 1.0),
        finite(pad.size).clamp(0.0, NR_STEPS as f32),
        finite(pad.mix).clamp(0.0, 1.0),
    )
}

fn pad_changed(state: &AppState, row: usize, step: usize) -> DispatchResult {
    let mut result = DispatchResult::none();
    result.push(Outbound::Pad {
        page: state.current_page,
        slot: row,
        step,
        pad: state.pattern().get_pad(row, step),
    });
    result
}

fn click_pad(state: &mut AppState, row: usize, step: usize) -> DispatchResult {
    let current = state.pattern().get_pad(row, step);
    match state.edit_mode {
        EditMode::Pick => {
            if !current.is_anchor() {
                return DispatchResult::none();
            }
            state.brush = current;
            DispatchResult::with_redraw()
        }
        EditMode::Draw => {
            let pad = if current.is_anchor() {
                Pad::default()
            } else {
                let len = state.brush.run_length().max(1).min(NR_STEPS - step);
                state.brush.with_run_length(len)
            };
            state.pattern_mut().set_pad(row, step, pad);
            state.pattern_mut().store();
            pad_changed(state, row, step)
        }
        _ => DispatchResult::none(),
    }
}

fn scroll_pad(state: &mut AppState, row: usize, step: usize, field: PadField, notches: i32) -> DispatchResult {
    let pad = state.pattern().get_pad(row, step);
    if !pad.is_anchor() || notches == 0 {
        return DispatchResult::none();
    }
    let delta = notches as f32 * state.wheel_step;
    let updated = match field {
        PadField::Gate => Pad { gate: (pad.gate + delta).clamp(0.0, 1.0), ..pad },
        PadField::Mix => Pad { mix: (pad.mix + delta).clamp(0.0, 1.0), ..pad },
        PadField::Size => {
            let max = (NR_STEPS - step) as i64;
            let len = (pad.run_length() as i64 + notches as i64).clamp(1, max);
            pad.with_run_length(len as usize)
        }
    };
    if updated == pad {
        return DispatchResult::none();
    }

    let pattern = state.pattern_mut();
    if !pattern.is_batch_open() {
        pattern.begin_batch();
    }
    pattern.set_pad(row, step, updated);
    pad_changed(state, row, step)
}

/// Clear the current page's pads (one undo step) and shapes.
pub(super) fn reset_page(state: &mut AppState) -> DispatchResult {
    let page = state.current_page;
    let mut result = DispatchResult::none();
    let pattern = state.pattern_mut();
    for row in 0..NR_SLOTS {
        for step in 0..NR_STEPS {
            if pattern.get_pad(row, step) != Pad::default() {
                pattern.set_pad(row, step, Pad::default());
            }
        }
    }
    pattern.store();

    for row in 0..NR_SLOTS {
        if !pattern.get_shape(row).is_empty() {
            pattern.set_shape(row, Shape::new());
            result.push(Outbound::Shape { page, slot: row, shape: Shape::new() });
        }
    }
    notify_rows(&mut result, state, page, 0..=NR_SLOTS - 1);
    log::debug!("reset page {}", page);
    result
}
