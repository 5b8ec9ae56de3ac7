//! Settings validation.
//!
//! Checks every tuning constant against the structural rules of the control
//! core (ordered ranges, positive frequencies, a dead zone narrower than the
//! knob travel) and against the parameter descriptors of the effect unit it
//! ends up in. All problems are collected, so one pass reports everything.
//!
//! # Example
//!
//! ```rust
//! use duostomp_config::validate_settings;
//! use duostomp_pedal::Settings;
//!
//! validate_settings(&Settings::default()).expect("stock settings are valid");
//!
//! let mut settings = Settings::default();
//! settings.controls.sensitivity = 2000;
//! assert!(validate_settings(&settings).is_err());
//! ```

use duostomp_core::units::{amp, filter, granular, lfo, reverb};
use duostomp_core::{UnitId, ValueRange};
use duostomp_pedal::Settings;
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Dotted path of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Range whose bounds are not strictly increasing.
    #[error("range '{param}' must have min < max, got [{min}, {max}]")]
    InvalidRange {
        /// Dotted path of the range.
        param: String,
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },

    /// Value that must be strictly positive.
    #[error("parameter '{param}' must be positive, got {value}")]
    NotPositive {
        /// Dotted path of the parameter.
        param: String,
        /// The offending value.
        value: f32,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Collects errors while walking the settings tree.
#[derive(Default)]
struct Checker {
    errors: Vec<ValidationError>,
}

impl Checker {
    fn within(&mut self, param: &str, value: f32, min: f32, max: f32) {
        if value.is_nan() || value < min || value > max {
            self.errors.push(ValidationError::OutOfRange {
                param: param.to_string(),
                value,
                min,
                max,
            });
        }
    }

    /// Checks `value` against a unit parameter's descriptor.
    fn unit_param(&mut self, param: &str, value: f32, unit: UnitId, index: usize) {
        if let Some(desc) = unit.params().get(index) {
            self.within(param, value, desc.min, desc.max);
        }
    }

    fn positive(&mut self, param: &str, value: f32) {
        if value.is_nan() || value <= 0.0 {
            self.errors.push(ValidationError::NotPositive {
                param: param.to_string(),
                value,
            });
        }
    }

    /// Checks a knob range is ordered and both ends fit the unit parameter.
    fn unit_range(&mut self, param: &str, range: ValueRange, unit: UnitId, index: usize) {
        if range.min.is_nan() || range.max.is_nan() || range.min >= range.max {
            self.errors.push(ValidationError::InvalidRange {
                param: param.to_string(),
                min: range.min,
                max: range.max,
            });
        }
        self.unit_param(&format!("{param}.min"), range.min, unit, index);
        self.unit_param(&format!("{param}.max"), range.max, unit, index);
    }

    fn finish(mut self) -> ValidationResult<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(ValidationError::Multiple(self.errors)),
        }
    }
}

/// Validates every tuning constant.
pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    let mut check = Checker::default();

    let c = &settings.controls;
    if c.adc_max == 0 {
        check.within("controls.adc_max", 0.0, 1.0, f32::from(u16::MAX));
    }
    // The dead zone must leave some knob travel
    if c.sensitivity >= c.adc_max {
        check.errors.push(ValidationError::OutOfRange {
            param: "controls.sensitivity".to_string(),
            value: f32::from(c.sensitivity),
            min: 0.0,
            max: f32::from(c.adc_max.saturating_sub(1)),
        });
    }

    let f = &settings.filters;
    check.unit_range("filters.low_pass", f.low_pass, UnitId::LowPass, filter::FREQUENCY);
    check.positive("filters.low_pass.min", f.low_pass.min);
    check.unit_range("filters.high_pass", f.high_pass, UnitId::HighPass, filter::FREQUENCY);
    check.positive("filters.high_pass.min", f.high_pass.min);
    check.unit_param("filters.resonance", f.resonance, UnitId::LowPass, filter::RESONANCE);

    let m = &settings.modulation;
    check.unit_range("modulation.depth", m.depth, UnitId::LfoFilter, filter::OCTAVES);
    check.unit_range("modulation.rate", m.rate, UnitId::Lfo, lfo::FREQUENCY);
    check.positive("modulation.rate.min", m.rate.min);
    check.unit_param("modulation.lfo_amplitude", m.lfo_amplitude, UnitId::Lfo, lfo::AMPLITUDE);
    check.unit_param("modulation.lfo_rate", m.lfo_rate, UnitId::Lfo, lfo::FREQUENCY);
    check.unit_param(
        "modulation.filter_cutoff",
        m.filter_cutoff,
        UnitId::LfoFilter,
        filter::FREQUENCY,
    );
    check.unit_param(
        "modulation.filter_resonance",
        m.filter_resonance,
        UnitId::LfoFilter,
        filter::RESONANCE,
    );
    check.unit_param(
        "modulation.initial_depth",
        m.initial_depth,
        UnitId::LfoFilter,
        filter::OCTAVES,
    );

    let p = &settings.pitch;
    check.unit_param("pitch.grain_ms", p.grain_ms, UnitId::Granular, granular::GRAIN_MS);
    for (i, &ratio) in p.deviations.iter().enumerate() {
        let name = format!("pitch.deviations[{i}]");
        if ratio > 0.0 {
            // Both directions land on the same speed parameter
            check.unit_param(&name, ratio, UnitId::Granular, granular::SPEED);
            check.unit_param(&name, 1.0 / ratio, UnitId::Granular, granular::SPEED);
        } else {
            check.positive(&name, ratio);
        }
    }

    let d = &settings.drive;
    check.within("drive.shape_level", d.shape_level, 0.0, 1.0);
    check.unit_param("drive.makeup_gain", d.makeup_gain, UnitId::Amp, amp::GAIN);

    check.unit_param(
        "ambience.damping",
        settings.ambience.damping,
        UnitId::Reverb,
        reverb::DAMPING,
    );

    check.finish()
}
