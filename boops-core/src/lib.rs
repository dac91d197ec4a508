//! # boops-core
//!
//! Pattern editor model for a step-sequenced effect plugin: per-page pad
//! grids with undo, effect slots, clipboard edits, pages and the text
//! pattern file. Independent of any UI framework or audio host.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use boops_core::config::Config;
//! use boops_core::dispatch::dispatch_action;
//! use boops_core::state::AppState;
//! use boops_types::{Action, PatternAction, Pad};
//!
//! let config = Config::load();
//! let mut state = AppState::new_with_config(&config);
//!
//! let action = Action::Pattern(PatternAction::SetPad { row: 0, step: 0, pad: Pad::new(1.0, 2.0, 1.0) });
//! let result = dispatch_action(&action, &mut state);
//! for message in result.outbound {
//!     // forward to the host
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`state`]: `AppState`, the per-page `Pattern` with its undo journal,
//!   and the pattern file reader/writer
//! - [`dispatch`]: `dispatch_action()` and the slot/clipboard operations
//! - [`config`]: TOML configuration (embedded defaults + user overrides)

pub mod config;
pub mod dispatch;
pub mod state;

pub use boops_types;
