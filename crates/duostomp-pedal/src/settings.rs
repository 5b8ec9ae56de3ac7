//! Tuning constants of the control core.
//!
//! Every constant the firmware hard-codes lives here, grouped by concern.
//! [`Settings::default`] reproduces the stock pedal. With the `serde`
//! feature, every group deserializes with missing keys falling back to the
//! defaults, so a config file only needs to list what it changes.

use duostomp_core::{DEFAULT_DEVIATIONS, DEFAULT_SHAPE_LEVEL, DeviationTable, RawRange, ValueRange};

/// Control sampling and pacing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlSettings {
    /// Full-scale analog reading.
    pub adc_max: u16,
    /// Dead-zone threshold in raw counts.
    pub sensitivity: u16,
    /// Waiting main-loop iterations between control ticks.
    pub control_check: u32,
    /// Delay of each waiting iteration in milliseconds.
    pub loop_delay_ms: u32,
    /// Debounce interval in milliseconds.
    pub debounce_ms: u32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            adc_max: 1023,
            sensitivity: 20,
            control_check: 15,
            loop_delay_ms: 20,
            debounce_ms: 5,
        }
    }
}

/// Output filter pair driven by slot 1's knobs in filter mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterSettings {
    /// Low-pass cutoff range in Hz.
    pub low_pass: ValueRange,
    /// High-pass cutoff range in Hz.
    pub high_pass: ValueRange,
    /// Resonance of both filters at boot.
    pub resonance: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            low_pass: ValueRange::new(10.25, 7000.0),
            high_pass: ValueRange::new(10.25, 7000.0),
            resonance: 0.7,
        }
    }
}

/// LFO-swept filter of slot 2's modulation variant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModulationSettings {
    /// Sweep depth range in octaves (knob A).
    pub depth: ValueRange,
    /// LFO rate range in Hz (knob B).
    pub rate: ValueRange,
    /// LFO amplitude at boot.
    pub lfo_amplitude: f32,
    /// LFO rate at boot in Hz.
    pub lfo_rate: f32,
    /// Filter centre frequency in Hz.
    pub filter_cutoff: f32,
    /// Filter resonance.
    pub filter_resonance: f32,
    /// Sweep depth at boot in octaves.
    pub initial_depth: f32,
}

impl Default for ModulationSettings {
    fn default() -> Self {
        Self {
            depth: ValueRange::new(0.01, 5.0),
            rate: ValueRange::new(0.01, 5.0),
            lfo_amplitude: 0.9,
            lfo_rate: 0.1,
            filter_cutoff: 640.0,
            filter_resonance: 0.7,
            initial_depth: 5.0,
        }
    }
}

/// Granular pitch shifter of slot 1's pitch variants.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PitchSettings {
    /// Grain length in milliseconds.
    pub grain_ms: f32,
    /// Speed multipliers selectable with knob B.
    pub deviations: [f32; 4],
}

impl Default for PitchSettings {
    fn default() -> Self {
        Self {
            grain_ms: 290.0,
            deviations: DEFAULT_DEVIATIONS,
        }
    }
}

/// Waveshaper of slot 1's shaped variant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriveSettings {
    /// Plateau level of the square transfer curve.
    pub shape_level: f32,
    /// Gain of the amplifier after the waveshaper.
    pub makeup_gain: f32,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            shape_level: DEFAULT_SHAPE_LEVEL,
            makeup_gain: 0.3,
        }
    }
}

/// Reverb of slot 2's ambience variant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AmbienceSettings {
    /// High-frequency damping.
    pub damping: f32,
}

impl Default for AmbienceSettings {
    fn default() -> Self {
        Self { damping: 1.0 }
    }
}

/// All tuning constants.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Control sampling and pacing.
    pub controls: ControlSettings,
    /// Output filter pair.
    pub filters: FilterSettings,
    /// LFO filter.
    pub modulation: ModulationSettings,
    /// Granular pitch shifter.
    pub pitch: PitchSettings,
    /// Waveshaper.
    pub drive: DriveSettings,
    /// Reverb.
    pub ambience: AmbienceSettings,
}

impl Settings {
    /// Raw domain of the knobs.
    #[inline]
    pub fn raw_range(&self) -> RawRange {
        RawRange::new(0, self.controls.adc_max)
    }

    /// Quantizer for the pitch knob.
    #[inline]
    pub fn deviation_table(&self) -> DeviationTable {
        DeviationTable::new(self.pitch.deviations)
    }

    /// Control tick period in milliseconds.
    #[inline]
    pub fn tick_period_ms(&self) -> u32 {
        self.controls
            .control_check
            .saturating_mul(self.controls.loop_delay_ms)
    }
}
