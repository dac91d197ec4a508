//! Step-level pattern values.

use serde::{Deserialize, Serialize};

/// One step's effect trigger.
///
/// `size` is the run length in steps. A pad with `size > 1` covers the
/// following `size - 1` steps of its row; those cells are hidden
/// continuations and are not drawn or triggered on their own. The
/// default pad (all zero) means "no pad".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub gate: f32, // 0.0-1.0 probability
    pub size: f32, // run length in steps
    pub mix: f32,  // 0.0-1.0
}

impl Pad {
    pub fn new(gate: f32, size: f32, mix: f32) -> Self {
        Self { gate, size, mix }
    }

    /// Whether this pad starts a run.
    pub fn is_anchor(&self) -> bool {
        self.size >= 1.0
    }

    /// Run length in whole steps (0 for an empty cell).
    pub fn run_length(&self) -> usize {
        if self.size.is_finite() && self.size >= 1.0 {
            self.size.floor() as usize
        } else {
            0
        }
    }

    /// Same pad with a different run length.
    pub fn with_run_length(self, steps: usize) -> Self {
        Self { size: steps as f32, ..self }
    }
}

/// Which pad value a wheel edit adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadField {
    Gate,
    Size,
    Mix,
}

/// A pad value at one cell, recorded before or after a change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PadMessage {
    pub row: usize,
    pub step: usize,
    pub pad: Pad,
}

impl PadMessage {
    pub fn new(row: usize, step: usize, pad: Pad) -> Self {
        Self { row, step, pad }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pad_is_empty() {
        let pad = Pad::default();
        assert!(!pad.is_anchor());
        assert_eq!(pad.run_length(), 0);
    }

    #[test]
    fn run_length_floors_fractional_sizes() {
        assert_eq!(Pad::new(1.0, 2.7, 1.0).run_length(), 2);
        assert_eq!(Pad::new(1.0, 0.5, 1.0).run_length(), 0);
        assert_eq!(Pad::new(1.0, f32::NAN, 1.0).run_length(), 0);
    }

    #[test]
    fn with_run_length_keeps_gate_and_mix() {
        let pad = Pad::new(0.5, 4.0, 0.25).with_run_length(1);
        assert_eq!(pad, Pad::new(0.5, 1.0, 0.25));
    }
}
