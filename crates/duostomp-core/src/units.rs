//! Catalogue of the effect units the control core drives.
//!
//! The audio graph itself is an external collaborator. This module only
//! names its parameter-bearing units and describes their parameters, so the
//! dispatcher can address `(UnitId, param_index)` pairs the same way for real
//! hardware and for the in-memory rack used by the simulator.
//!
//! ```text
//!  in ─┬──────────────────────────────► Slot1Mixer[0] (bypass)
//!      ├─► waveshaper ─► Amp ─────────► Slot1Mixer[1]
//!      └─► Granular ──────────────────► Slot1Mixer[2]
//!
//!  Slot1Mixer ─┬──────────────────────► Slot2Mixer[0] (bypass)
//!              ├─► Reverb ────────────► Slot2Mixer[1]
//!              └─► LfoFilter (◄─ Lfo) ► Slot2Mixer[2]
//!
//!  Slot2Mixer ─► LowPass ─► HighPass ─► out
//! ```

use crate::param_info::{ParamDescriptor, ParamUnit};

/// Parameter indices of the slot output mixers.
pub mod mixer {
    /// Dry/bypass input.
    pub const BYPASS: usize = 0;
    /// First effect input.
    pub const CHANNEL_A: usize = 1;
    /// Second effect input.
    pub const CHANNEL_B: usize = 2;
}

/// Parameter indices of the state-variable filters.
pub mod filter {
    /// Cutoff / centre frequency in Hz.
    pub const FREQUENCY: usize = 0;
    /// Resonance (Q).
    pub const RESONANCE: usize = 1;
    /// Octave range of the frequency control input (LFO filter only).
    pub const OCTAVES: usize = 2;
}

/// Parameter indices of the granular pitch shifter.
pub mod granular {
    /// Playback speed multiplier.
    pub const SPEED: usize = 0;
    /// Grain length in milliseconds.
    pub const GRAIN_MS: usize = 1;
}

/// Parameter indices of the reverb.
pub mod reverb {
    /// Room size, 0.0-1.0.
    pub const ROOM_SIZE: usize = 0;
    /// High-frequency damping, 0.0-1.0.
    pub const DAMPING: usize = 1;
}

/// Parameter indices of the modulation LFO.
pub mod lfo {
    /// Oscillator frequency in Hz.
    pub const FREQUENCY: usize = 0;
    /// Oscillator amplitude, 0.0-1.0.
    pub const AMPLITUDE: usize = 1;
}

/// Parameter indices of the post-waveshaper amplifier.
pub mod amp {
    /// Linear gain.
    pub const GAIN: usize = 0;
}

/// Largest parameter count of any unit.
pub const MAX_UNIT_PARAMS: usize = 3;

static MIXER_PARAMS: [ParamDescriptor; 3] = [
    ParamDescriptor::channel_gain("Bypass", "Dry"),
    ParamDescriptor::channel_gain("Channel A", "ChA"),
    ParamDescriptor::channel_gain("Channel B", "ChB"),
];

static LOW_PASS_PARAMS: [ParamDescriptor; 2] = [
    ParamDescriptor::frequency("Cutoff", "Cutoff", 10.0, 18000.0, 7000.0),
    ParamDescriptor::resonance(),
];

static HIGH_PASS_PARAMS: [ParamDescriptor; 2] = [
    ParamDescriptor::frequency("Cutoff", "Cutoff", 10.0, 18000.0, 10.25),
    ParamDescriptor::resonance(),
];

static LFO_FILTER_PARAMS: [ParamDescriptor; 3] = [
    ParamDescriptor::frequency("Centre", "Centre", 10.0, 18000.0, 640.0),
    ParamDescriptor::resonance(),
    ParamDescriptor::new("Depth", "Depth", ParamUnit::Octaves, 0.0, 7.0, 1.0),
];

static GRANULAR_PARAMS: [ParamDescriptor; 2] = [
    ParamDescriptor::new("Speed", "Speed", ParamUnit::Multiplier, 0.125, 8.0, 1.0),
    ParamDescriptor::new("Grain", "Grain", ParamUnit::Milliseconds, 1.0, 290.0, 290.0),
];

static REVERB_PARAMS: [ParamDescriptor; 2] = [
    ParamDescriptor::new("Room Size", "Size", ParamUnit::None, 0.0, 1.0, 0.5),
    ParamDescriptor::new("Damping", "Damp", ParamUnit::None, 0.0, 1.0, 0.5),
];

static LFO_PARAMS: [ParamDescriptor; 2] = [
    ParamDescriptor::frequency("Rate", "Rate", 0.0, 20.0, 0.1),
    ParamDescriptor::new("Amplitude", "Amp", ParamUnit::Gain, 0.0, 1.0, 0.0),
];

static AMP_PARAMS: [ParamDescriptor; 1] = [ParamDescriptor::new(
    "Gain",
    "Gain",
    ParamUnit::Gain,
    0.0,
    4.0,
    1.0,
)];

/// Parameter-bearing effect units in the pedal's audio graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitId {
    /// Output mixer of slot 1 (bypass, shaped, pitch-shifted).
    Slot1Mixer,
    /// Output mixer of slot 2 (bypass, reverb, LFO filter).
    Slot2Mixer,
    /// Amplifier after the waveshaper.
    Amp,
    /// Granular pitch shifter shared by both pitch variants.
    Granular,
    /// Reverb of the ambience variant.
    Reverb,
    /// Sine LFO modulating the LFO filter.
    Lfo,
    /// State-variable filter swept by the LFO.
    LfoFilter,
    /// Output low-pass filter.
    LowPass,
    /// Output high-pass filter.
    HighPass,
}

impl UnitId {
    /// Every unit, in storage order.
    pub const ALL: [UnitId; 9] = [
        UnitId::Slot1Mixer,
        UnitId::Slot2Mixer,
        UnitId::Amp,
        UnitId::Granular,
        UnitId::Reverb,
        UnitId::Lfo,
        UnitId::LfoFilter,
        UnitId::LowPass,
        UnitId::HighPass,
    ];

    /// Number of units.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense storage index (position in [`ALL`](Self::ALL)).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            UnitId::Slot1Mixer => 0,
            UnitId::Slot2Mixer => 1,
            UnitId::Amp => 2,
            UnitId::Granular => 3,
            UnitId::Reverb => 4,
            UnitId::Lfo => 5,
            UnitId::LfoFilter => 6,
            UnitId::LowPass => 7,
            UnitId::HighPass => 8,
        }
    }

    /// Stable lowercase name for logs and telemetry.
    pub const fn name(self) -> &'static str {
        match self {
            UnitId::Slot1Mixer => "slot1_mixer",
            UnitId::Slot2Mixer => "slot2_mixer",
            UnitId::Amp => "amp",
            UnitId::Granular => "granular",
            UnitId::Reverb => "reverb",
            UnitId::Lfo => "lfo",
            UnitId::LfoFilter => "lfo_filter",
            UnitId::LowPass => "low_pass",
            UnitId::HighPass => "high_pass",
        }
    }

    /// Parameter descriptors of this unit, indexed by parameter index.
    pub fn params(self) -> &'static [ParamDescriptor] {
        match self {
            UnitId::Slot1Mixer | UnitId::Slot2Mixer => &MIXER_PARAMS,
            UnitId::Amp => &AMP_PARAMS,
            UnitId::Granular => &GRANULAR_PARAMS,
            UnitId::Reverb => &REVERB_PARAMS,
            UnitId::Lfo => &LFO_PARAMS,
            UnitId::LfoFilter => &LFO_FILTER_PARAMS,
            UnitId::LowPass => &LOW_PASS_PARAMS,
            UnitId::HighPass => &HIGH_PASS_PARAMS,
        }
    }
}
