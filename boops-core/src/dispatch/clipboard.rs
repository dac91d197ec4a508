//! Rectangle edits on the current page: cut, copy, paste and flips.
//!
//! Runs (pads with `size > 1`) never cross the selection border after an
//! edit. A run starting inside the rectangle is cut off at its right edge;
//! a run starting left of the rectangle and reaching into it is shortened
//! to end just before it. Hidden continuation cells inside the rectangle
//! are written as empty pads.

use boops_types::{limit_index, ClipboardAction, DispatchResult, EditMode, Outbound, Pad, NR_SLOTS, NR_STEPS};

use crate::state::{AppState, Pattern};

use super::helpers::notify_rows;

pub(super) fn rectangle_gesture(action: &ClipboardAction, state: &mut AppState) -> DispatchResult {
    match *action {
        ClipboardAction::Press { row, step } => {
            state
                .clipboard
                .begin(limit_index(row, NR_SLOTS), limit_index(step, NR_STEPS));
            DispatchResult::with_redraw()
        }
        ClipboardAction::Drag { row, step } => {
            if !state.clipboard.pressed {
                return DispatchResult::none();
            }
            state.clipboard.selection.extend_to(row, step);
            DispatchResult::with_redraw()
        }
        ClipboardAction::Release => {
            if !state.clipboard.release() {
                log::trace!("release without press ignored");
                return DispatchResult::none();
            }
            match state.edit_mode {
                EditMode::Cut => cut_selection(state),
                EditMode::Copy => copy_selection(state),
                EditMode::XFlip => xflip(state),
                EditMode::YFlip => yflip(state),
                _ => DispatchResult::none(),
            }
        }
        ClipboardAction::Paste { .. } => DispatchResult::none(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Run {
    start: usize,
    len: usize,
    pad: Pad,
}

/// Visible runs of a row, left to right. Cells covered by an earlier run
/// are hidden even if they hold an anchor themselves.
fn runs(row: &[Pad; NR_STEPS]) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut step = 0;
    while step < NR_STEPS {
        let pad = row[step];
        if pad.is_anchor() {
            let len = pad.run_length().min(NR_STEPS - step);
            runs.push(Run { start: step, len, pad });
            step += len;
        } else {
            step += 1;
        }
    }
    runs
}

/// Cells `s0..=s1` of a row with runs cut off at `s1` and continuations emptied.
fn segment(pattern: &Pattern, row: usize, s0: usize, s1: usize) -> Vec<Pad> {
    let mut seg = vec![Pad::default(); s1 - s0 + 1];
    for run in runs(pattern.row(row)) {
        if (s0..=s1).contains(&run.start) {
            let len = run.len.min(s1 - run.start + 1);
            seg[run.start - s0] = run.pad.with_run_length(len);
        }
    }
    seg
}

/// Shorten a run anchored left of `s0` that reaches into it.
fn truncate_bleed_in(pattern: &mut Pattern, row: usize, s0: usize) {
    if let Some(run) = runs(pattern.row(row))
        .into_iter()
        .find(|run| run.start < s0 && run.start + run.len > s0)
    {
        pattern.set_pad(row, run.start, run.pad.with_run_length(s0 - run.start));
    }
}

fn write_segment(pattern: &mut Pattern, row: usize, s0: usize, seg: &[Pad]) {
    for (i, pad) in seg.iter().enumerate() {
        let step = s0 + i;
        if step >= NR_STEPS {
            break;
        }
        if pattern.get_pad(row, step) != *pad {
            pattern.set_pad(row, step, *pad);
        }
    }
}

/// Mirror a segment end to end, re-anchoring each run at its mirrored start.
fn mirror(seg: &[Pad]) -> Vec<Pad> {
    let n = seg.len();
    let mut out = vec![Pad::default(); n];
    for (i, pad) in seg.iter().enumerate() {
        if pad.is_anchor() {
            let len = pad.run_length().min(n - i);
            out[n - i - len] = pad.with_run_length(len);
        }
    }
    out
}

fn finish(state: &mut AppState, r0: usize, r1: usize) -> DispatchResult {
    let page = state.current_page;
    state.pattern_mut().store();
    let mut result = DispatchResult::none();
    notify_rows(&mut result, state, page, r0..=r1);
    result
}

/// Copy the selection into the clipboard. Shapes are taken only for full-width selections.
pub fn copy_selection(state: &mut AppState) -> DispatchResult {
    let selection = state.clipboard.selection;
    let (r0, r1, s0, s1) = selection.bounds();
    let pattern = &state.pages[state.current_page];
    let data = (r0..=r1).map(|row| segment(pattern, row, s0, s1)).collect();
    let shapes = if selection.is_full_width() {
        (r0..=r1).map(|row| pattern.get_shape(row).clone()).collect()
    } else {
        Vec::new()
    };
    state.clipboard.data = data;
    state.clipboard.shapes = shapes;
    state.clipboard.ready = true;
    log::debug!("copied {}x{} cells", r1 - r0 + 1, s1 - s0 + 1);
    DispatchResult::with_redraw()
}

/// Copy the selection, then empty it.
pub fn cut_selection(state: &mut AppState) -> DispatchResult {
    copy_selection(state);
    let selection = state.clipboard.selection;
    let (r0, r1, s0, s1) = selection.bounds();
    let page = state.current_page;
    let empty = vec![Pad::default(); s1 - s0 + 1];
    let mut result = DispatchResult::none();
    {
        let pattern = state.pattern_mut();
        for row in r0..=r1 {
            truncate_bleed_in(pattern, row, s0);
            write_segment(pattern, row, s0, &empty);
            if selection.is_full_width() && !pattern.get_shape(row).is_empty() {
                pattern.set_shape(row, Default::default());
                result.push(Outbound::Shape { page, slot: row, shape: Default::default() });
            }
        }
    }
    result.merge(finish(state, r0, r1));
    result
}

/// Mirror the selection left to right.
pub fn xflip(state: &mut AppState) -> DispatchResult {
    let (r0, r1, s0, s1) = state.clipboard.selection.bounds();
    let pattern = state.pattern_mut();
    for row in r0..=r1 {
        truncate_bleed_in(pattern, row, s0);
        let flipped = mirror(&segment(pattern, row, s0, s1));
        write_segment(pattern, row, s0, &flipped);
    }
    finish(state, r0, r1)
}

/// Mirror the selection top to bottom. Full-width selections swap shapes too.
pub fn yflip(state: &mut AppState) -> DispatchResult {
    let selection = state.clipboard.selection;
    let (r0, r1, s0, s1) = selection.bounds();
    let page = state.current_page;
    let mut result = DispatchResult::none();
    {
        let pattern = state.pattern_mut();
        for row in r0..=r1 {
            truncate_bleed_in(pattern, row, s0);
        }
        let segments: Vec<Vec<Pad>> = (r0..=r1).map(|row| segment(pattern, row, s0, s1)).collect();
        for (k, seg) in segments.iter().enumerate() {
            write_segment(pattern, r1 - k, s0, seg);
        }

        if selection.is_full_width() {
            let shapes: Vec<_> = (r0..=r1).map(|row| pattern.get_shape(row).clone()).collect();
            for (k, shape) in shapes.into_iter().enumerate() {
                let row = r1 - k;
                result.push(Outbound::Shape { page, slot: row, shape: shape.clone() });
                pattern.set_shape(row, shape);
            }
        }
    }
    result.merge(finish(state, r0, r1));
    result
}

/// Paste the clipboard with its top-left corner at `(row, step)`.
/// Parts falling off the grid are dropped and runs are cut at the row end.
pub fn paste(state: &mut AppState, row: isize, step: isize) -> DispatchResult {
    if state.clipboard.is_empty() {
        return DispatchResult::none();
    }
    let r = limit_index(row, NR_SLOTS);
    let s = limit_index(step, NR_STEPS);
    let data = state.clipboard.data.clone();
    let shapes = if s == 0 { state.clipboard.shapes.clone() } else { Vec::new() };
    let page = state.current_page;

    let rows = data.len().min(NR_SLOTS - r);
    let mut result = DispatchResult::none();
    {
        let pattern = state.pattern_mut();
        for (dr, cells) in data.iter().take(rows).enumerate() {
            let target = r + dr;
            truncate_bleed_in(pattern, target, s);
            let clipped: Vec<Pad> = cells
                .iter()
                .take(NR_STEPS - s)
                .enumerate()
                .map(|(ds, pad)| {
                    if pad.is_anchor() {
                        pad.with_run_length(pad.run_length().min(NR_STEPS - s - ds))
                    } else {
                        *pad
                    }
                })
                .collect();
            write_segment(pattern, target, s, &clipped);
            if let Some(shape) = shapes.get(dr) {
                pattern.set_shape(target, shape.clone());
                result.push(Outbound::Shape { page, slot: target, shape: shape.clone() });
            }
        }
    }
    log::debug!("pasted {} rows at ({}, {})", rows, r, s);
    result.merge(finish(state, r, r + rows - 1));
    result
}
