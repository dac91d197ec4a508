use std::path::PathBuf;

use boops_types::{Pad, NR_PAGES, NR_STEPS};
use serde::Deserialize;

use crate::state::Variant;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    runtime: RuntimeConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    variant: Option<String>,
    pages: Option<usize>,
    brush_gate: Option<f32>,
    brush_size: Option<f32>,
    brush_mix: Option<f32>,
}

#[derive(Deserialize, Default)]
struct RuntimeConfig {
    undo_depth: Option<usize>,
    wheel_step: Option<f32>,
}

pub struct Config {
    defaults: DefaultsConfig,
    runtime: RuntimeConfig,
}

impl Config {
    /// Embedded defaults, overridden by the user's config file if present.
    pub fn load() -> Self {
        let mut config = Self::embedded();
        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => {
                        if let Err(e) = config.merge_str(&contents) {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    }
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }
        config
    }

    /// Embedded defaults overridden by `user` (TOML text).
    pub fn from_toml_str(user: &str) -> Result<Self, toml::de::Error> {
        let mut config = Self::embedded();
        config.merge_str(user)?;
        Ok(config)
    }

    fn embedded() -> Self {
        let base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");
        Config {
            defaults: base.defaults,
            runtime: base.runtime,
        }
    }

    fn merge_str(&mut self, contents: &str) -> Result<(), toml::de::Error> {
        let user: ConfigFile = toml::from_str(contents)?;
        merge_defaults(&mut self.defaults, user.defaults);
        merge_runtime(&mut self.runtime, user.runtime);
        Ok(())
    }

    pub fn variant(&self) -> Variant {
        self.defaults
            .variant
            .as_deref()
            .and_then(parse_variant)
            .unwrap_or_default()
    }

    /// Pages in a fresh session (clamped to what the variant supports).
    pub fn initial_pages(&self) -> usize {
        self.defaults
            .pages
            .unwrap_or(1)
            .clamp(1, self.variant().max_pages().min(NR_PAGES))
    }

    /// Initial draw brush.
    pub fn brush(&self) -> Pad {
        let gate = finite_or(self.defaults.brush_gate, 1.0).clamp(0.0, 1.0);
        let size = finite_or(self.defaults.brush_size, 1.0).clamp(1.0, NR_STEPS as f32);
        let mix = finite_or(self.defaults.brush_mix, 1.0).clamp(0.0, 1.0);
        Pad::new(gate, size.floor(), mix)
    }

    /// Journal capacity per page (clamped to 1..10000).
    pub fn undo_depth(&self) -> usize {
        self.runtime.undo_depth.unwrap_or(100).clamp(1, 10_000)
    }

    /// Gate/mix change per wheel notch (clamped to 0.001..0.5).
    pub fn wheel_step(&self) -> f32 {
        finite_or(self.runtime.wheel_step, 0.01).clamp(0.001, 0.5)
    }
}

/// TOML accepts `nan` and `inf`; those fall back like a missing key.
fn finite_or(value: Option<f32>, default: f32) -> f32 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("boops").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.variant.is_some() {
        base.variant = user.variant;
    }
    if user.pages.is_some() {
        base.pages = user.pages;
    }
    if user.brush_gate.is_some() {
        base.brush_gate = user.brush_gate;
    }
    if user.brush_size.is_some() {
        base.brush_size = user.brush_size;
    }
    if user.brush_mix.is_some() {
        base.brush_mix = user.brush_mix;
    }
}

fn merge_runtime(base: &mut RuntimeConfig, user: RuntimeConfig) {
    if user.undo_depth.is_some() {
        base.undo_depth = user.undo_depth;
    }
    if user.wheel_step.is_some() {
        base.wheel_step = user.wheel_step;
    }
}

fn parse_variant(s: &str) -> Option<Variant> {
    match s.to_lowercase().as_str() {
        "boops" | "b.oops" => Some(Variant::BOops),
        "bnoname01" | "b.noname01" => Some(Variant::BNoname01),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_config() {
        let config = Config::embedded();
        assert_eq!(config.variant(), Variant::BOops);
        assert_eq!(config.initial_pages(), 1);
        assert_eq!(config.brush(), Pad::new(1.0, 1.0, 1.0));
        assert_eq!(config.undo_depth(), 100);
        assert!((config.wheel_step() - 0.01).abs() < f32::EPSILON);
    }

    #[test]
    fn user_values_override_embedded() {
        let config = Config::from_toml_str(
            r#"
            [defaults]
            pages = 4
            brush_mix = 0.5

            [runtime]
            undo_depth = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_pages(), 4);
        assert_eq!(config.brush(), Pad::new(1.0, 1.0, 0.5));
        assert_eq!(config.undo_depth(), 7);
        // untouched keys keep the embedded value
        assert_eq!(config.variant(), Variant::BOops);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml_str(
            r#"
            [defaults]
            variant = "BNoname01"
            pages = 9
            brush_size = 500.0

            [runtime]
            undo_depth = 0
            wheel_step = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_pages(), 1);
        assert_eq!(config.brush().size, NR_STEPS as f32);
        assert_eq!(config.undo_depth(), 1);
        assert!((config.wheel_step() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn non_finite_values_fall_back_to_defaults() {
        let config = Config::from_toml_str(
            r#"
            [defaults]
            brush_gate = nan
            brush_size = inf
            brush_mix = -inf

            [runtime]
            wheel_step = nan
            "#,
        )
        .unwrap();
        assert_eq!(config.brush(), Pad::new(1.0, 1.0, 1.0));
        assert!((config.wheel_step() - 0.01).abs() < f32::EPSILON);
    }

    #[test]
    fn malformed_user_config_is_an_error() {
        assert!(Config::from_toml_str("[defaults\npages = ").is_err());
    }

    #[test]
    fn test_parse_variant() {
        assert_eq!(parse_variant("BOops"), Some(Variant::BOops));
        assert_eq!(parse_variant("b.noname01"), Some(Variant::BNoname01));
        assert_eq!(parse_variant("other"), None);
    }
}
