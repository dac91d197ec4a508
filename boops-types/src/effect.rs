use serde::{Deserialize, Serialize};

use crate::NR_OPTIONS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    #[default]
    None,
    Amp,
    Balance,
    Width,
    Delay,
    Reverse,
    Chop,
    Jumble,
    TapeStop,
    TapeStart,
    TapeSpeed,
    Scratch,
    WowFlutter,
    Noise,
    Crackles,
    Stutter,
    Flanger,
    Filter,
    Crush,
    Decimate,
    Distortion,
    Tremolo,
    Wah,
    Reverb,
    GalacticReverb,
    Infinity,
    Wobble,
    PitchShift,
    RingMod,
    Chorus,
    Phaser,
    Eq,
    Oops,
    Surprise,
}

impl EffectKind {
    pub const ALL: [EffectKind; 34] = [
        EffectKind::None,
        EffectKind::Amp,
        EffectKind::Balance,
        EffectKind::Width,
        EffectKind::Delay,
        EffectKind::Reverse,
        EffectKind::Chop,
        EffectKind::Jumble,
        EffectKind::TapeStop,
        EffectKind::TapeStart,
        EffectKind::TapeSpeed,
        EffectKind::Scratch,
        EffectKind::WowFlutter,
        EffectKind::Noise,
        EffectKind::Crackles,
        EffectKind::Stutter,
        EffectKind::Flanger,
        EffectKind::Filter,
        EffectKind::Crush,
        EffectKind::Decimate,
        EffectKind::Distortion,
        EffectKind::Tremolo,
        EffectKind::Wah,
        EffectKind::Reverb,
        EffectKind::GalacticReverb,
        EffectKind::Infinity,
        EffectKind::Wobble,
        EffectKind::PitchShift,
        EffectKind::RingMod,
        EffectKind::Chorus,
        EffectKind::Phaser,
        EffectKind::Eq,
        EffectKind::Oops,
        EffectKind::Surprise,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::None => "None",
            EffectKind::Amp => "Amp",
            EffectKind::Balance => "Balance",
            EffectKind::Width => "Width",
            EffectKind::Delay => "Delay",
            EffectKind::Reverse => "Reverse",
            EffectKind::Chop => "Chop",
            EffectKind::Jumble => "Jumble",
            EffectKind::TapeStop => "Tape stop",
            EffectKind::TapeStart => "Tape start",
            EffectKind::TapeSpeed => "Tape speed",
            EffectKind::Scratch => "Scratch",
            EffectKind::WowFlutter => "Wow & flutter",
            EffectKind::Noise => "Noise",
            EffectKind::Crackles => "Crackles",
            EffectKind::Stutter => "Stutter",
            EffectKind::Flanger => "Flanger",
            EffectKind::Filter => "Filter",
            EffectKind::Crush => "Crush",
            EffectKind::Decimate => "Decimate",
            EffectKind::Distortion => "Distortion",
            EffectKind::Tremolo => "Tremolo",
            EffectKind::Wah => "Wah",
            EffectKind::Reverb => "Reverb",
            EffectKind::GalacticReverb => "Galactic reverb",
            EffectKind::Infinity => "Infinity",
            EffectKind::Wobble => "Wobble",
            EffectKind::PitchShift => "Pitch shift",
            EffectKind::RingMod => "Ring mod",
            EffectKind::Chorus => "Chorus",
            EffectKind::Phaser => "Phaser",
            EffectKind::Eq => "EQ",
            EffectKind::Oops => "Oops",
            EffectKind::Surprise => "Surprise",
        }
    }

    /// Fresh option vector for a newly inserted slot of this effect.
    /// Values are normalized to 0.0-1.0; unused options stay 0.
    pub fn default_options(&self) -> [f32; NR_OPTIONS] {
        let head: &[f32] = match self {
            EffectKind::None | EffectKind::Reverse | EffectKind::Oops => &[],
            EffectKind::Amp => &[0.5],
            EffectKind::Balance => &[0.5],
            EffectKind::Width => &[0.5],
            EffectKind::Delay => &[0.1, 0.5, 0.0],
            EffectKind::Chop => &[0.0, 0.5, 0.5, 0.5, 0.0],
            EffectKind::Jumble => &[0.5, 0.0],
            EffectKind::TapeStop | EffectKind::TapeStart => &[0.5],
            EffectKind::TapeSpeed => &[0.5],
            EffectKind::Scratch => &[0.5, 0.25, 0.5],
            EffectKind::WowFlutter => &[0.2, 0.2, 0.2, 0.2],
            EffectKind::Noise => &[0.5, 0.0],
            EffectKind::Crackles => &[0.5, 0.5, 0.5, 0.3, 0.25],
            EffectKind::Stutter => &[0.25, 0.5],
            EffectKind::Flanger => &[0.25, 0.5, 0.5, 0.5],
            EffectKind::Filter => &[0.0, 1.0, 0.5, 0.0],
            EffectKind::Crush => &[0.5, 0.5],
            EffectKind::Decimate => &[0.5],
            EffectKind::Distortion => &[0.0, 0.5, 0.5],
            EffectKind::Tremolo => &[0.5, 0.5, 0.0],
            EffectKind::Wah => &[0.5, 0.25, 0.5, 0.5, 0.5],
            EffectKind::Reverb => &[0.5, 0.5, 0.5],
            EffectKind::GalacticReverb => &[0.5, 0.5, 0.5],
            EffectKind::Infinity => &[0.5],
            EffectKind::Wobble => &[0.25, 0.5, 0.5],
            EffectKind::PitchShift => &[0.5, 0.5],
            EffectKind::RingMod => &[0.25, 0.5, 0.0],
            EffectKind::Chorus => &[0.25, 0.5, 0.5, 0.5, 0.5],
            EffectKind::Phaser => &[0.25, 0.75, 0.5, 0.5, 0.5, 0.5],
            EffectKind::Eq => &[0.5, 0.5, 0.5, 0.5, 0.5, 0.5],
            EffectKind::Surprise => &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        };
        let mut options = [0.0; NR_OPTIONS];
        for (dst, src) in options.iter_mut().zip(head) {
            *dst = *src;
        }
        options
    }
}

/// Addressable per-slot parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotParam {
    Play,
    Attack,
    Decay,
    Release,
    Pan,
    Mix,
    Option(usize),
}

/// Parameter values of one effect slot (shared by all pages).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub effect: EffectKind,
    pub play: bool,
    pub attack: f32,  // seconds, 0.0-1.0
    pub decay: f32,   // seconds, 0.0-1.0
    pub release: f32, // seconds, 0.0-1.0
    pub pan: f32,     // -1.0-1.0
    pub mix: f32,     // 0.0-1.0
    pub options: [f32; NR_OPTIONS],
}

impl Default for Slot {
    fn default() -> Self {
        Self::new(EffectKind::None)
    }
}

impl Slot {
    pub fn new(effect: EffectKind) -> Self {
        Self {
            effect,
            play: true,
            attack: 0.2,
            decay: 0.2,
            release: 0.2,
            pan: 0.0,
            mix: 1.0,
            options: effect.default_options(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.effect == EffectKind::None
    }

    pub fn param(&self, param: SlotParam) -> f32 {
        match param {
            SlotParam::Play => {
                if self.play {
                    1.0
                } else {
                    0.0
                }
            }
            SlotParam::Attack => self.attack,
            SlotParam::Decay => self.decay,
            SlotParam::Release => self.release,
            SlotParam::Pan => self.pan,
            SlotParam::Mix => self.mix,
            SlotParam::Option(i) => self.options.get(i).copied().unwrap_or(0.0),
        }
    }

    /// Set a parameter, clamping into its range. Unknown option indices are ignored.
    pub fn set_param(&mut self, param: SlotParam, value: f32) {
        if !value.is_finite() {
            return;
        }
        match param {
            SlotParam::Play => self.play = value >= 0.5,
            SlotParam::Attack => self.attack = value.clamp(0.0, 1.0),
            SlotParam::Decay => self.decay = value.clamp(0.0, 1.0),
            SlotParam::Release => self.release = value.clamp(0.0, 1.0),
            SlotParam::Pan => self.pan = value.clamp(-1.0, 1.0),
            SlotParam::Mix => self.mix = value.clamp(0.0, 1.0),
            SlotParam::Option(i) => {
                if let Some(opt) = self.options.get_mut(i) {
                    *opt = value.clamp(0.0, 1.0);
                }
            }
        }
    }
}
