pub mod journal;
pub mod pattern;
pub mod persistence;

pub use journal::Journal;
pub use pattern::Pattern;

use boops_types::{Clipboard, EditMode, Pad, Slot, NR_PAGES, NR_SLOTS};

use crate::config::Config;

/// Which plugin flavour this editor serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Multi-page sequencer with shapes.
    #[default]
    BOops,
    /// Single page.
    BNoname01,
}

impl Variant {
    pub fn uri(&self) -> &'static str {
        match self {
            Variant::BOops => "https://www.jahnichen.de/plugins/lv2/BOops",
            Variant::BNoname01 => "https://www.jahnichen.de/plugins/lv2/BNoname01",
        }
    }

    pub fn max_pages(&self) -> usize {
        match self {
            Variant::BOops => NR_PAGES,
            Variant::BNoname01 => 1,
        }
    }
}

/// Everything the pattern editor owns. Passed explicitly to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub variant: Variant,
    pub pages: Vec<Pattern>,
    pub current_page: usize,
    pub slots: [Slot; NR_SLOTS],
    pub clipboard: Clipboard,
    pub edit_mode: EditMode,
    /// Pad written by a draw click.
    pub brush: Pad,
    pub undo_depth: usize,
    /// Gate/mix change per wheel notch.
    pub wheel_step: f32,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Variant::BOops, 1, Pad::new(1.0, 1.0, 1.0), 100, 0.01)
    }

    pub fn new_with_config(config: &Config) -> Self {
        Self::with_settings(
            config.variant(),
            config.initial_pages(),
            config.brush(),
            config.undo_depth(),
            config.wheel_step(),
        )
    }

    fn with_settings(variant: Variant, pages: usize, brush: Pad, undo_depth: usize, wheel_step: f32) -> Self {
        let pages = pages.clamp(1, variant.max_pages());
        Self {
            variant,
            pages: (0..pages).map(|_| Pattern::new(undo_depth)).collect(),
            current_page: 0,
            slots: std::array::from_fn(|_| Slot::default()),
            clipboard: Clipboard::default(),
            edit_mode: EditMode::default(),
            brush,
            undo_depth,
            wheel_step,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pages[self.current_page]
    }

    pub fn pattern_mut(&mut self) -> &mut Pattern {
        &mut self.pages[self.current_page]
    }

    /// Number of used slots: those before the first empty one.
    pub fn slots_size(&self) -> usize {
        self.slots
            .iter()
            .position(|slot| slot.is_empty())
            .unwrap_or(NR_SLOTS)
    }

    /// Commit any open wheel batch on every page.
    pub fn close_batches(&mut self) {
        for page in self.pages.iter_mut() {
            if page.is_batch_open() {
                page.commit_batch();
            }
        }
    }

    /// Commit staged writes on every page.
    pub fn store_all(&mut self) {
        for page in self.pages.iter_mut() {
            page.store();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
