//! Parameter contract between the control core and the effect units.
//!
//! Effect units (filters, granular pitch shifter, reverb, LFO, mixers) are
//! external DSP collaborators. The control core only ever talks to them
//! through [`ParameterInfo`]: index-based parameter access plus a
//! [`ParamDescriptor`] per parameter for display and clamping.
//!
//! # Example
//!
//! ```rust
//! use duostomp_core::{ParameterInfo, ParamDescriptor, ParamUnit};
//!
//! struct Cutoff {
//!     hz: f32,
//! }
//!
//! impl ParameterInfo for Cutoff {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::new("Frequency", "Freq", ParamUnit::Hertz, 10.25, 7000.0, 7000.0)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.hz,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.hz = desc.clamp(value);
//!         }
//!     }
//! }
//! ```

/// Trait for effect units that expose indexed parameters.
///
/// Setters are applied to the unit's next processing block. They must be
/// non-blocking and callable from the control context at any time; the
/// audio library is responsible for its own thread safety.
///
/// # Parameter Indexing
///
/// Parameters are accessed by zero-based index. The index must be stable for
/// the lifetime of the unit. Use [`param_count`](Self::param_count) to
/// determine valid indices.
pub trait ParameterInfo {
    /// Returns the number of parameters this unit exposes.
    ///
    /// Valid parameter indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at the given index.
    ///
    /// Returns `None` if `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at the given index.
    ///
    /// Returns `0.0` if `index >= param_count()`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at the given index.
    ///
    /// Implementations should clamp the value to the range in the
    /// descriptor. Out-of-bounds indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

}

/// Describes a single parameter's metadata for display and validation.
///
/// # Short Name
///
/// The `short_name` field should be 8 characters or less so it fits the
/// pedal's 16x2 character display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Cutoff", "Room Size").
    pub name: &'static str,

    /// Short name for the character display, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Value the unit holds before the control core writes to it.
    pub default: f32,
}

impl ParamDescriptor {
    /// Creates a descriptor.
    pub const fn new(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
        }
    }

    /// Mixer channel gain (0.0-1.0, default 0.0).
    pub const fn channel_gain(name: &'static str, short_name: &'static str) -> Self {
        Self::new(name, short_name, ParamUnit::Gain, 0.0, 1.0, 0.0)
    }

    /// Filter frequency in Hz with a custom range.
    pub const fn frequency(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::new(name, short_name, ParamUnit::Hertz, min, max, default)
    }

    /// Filter resonance (Q), 0.7-5.0.
    pub const fn resonance() -> Self {
        Self::new("Resonance", "Res", ParamUnit::None, 0.7, 5.0, 0.7)
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use duostomp_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::channel_gain("Bypass", "Dry");
    /// assert_eq!(desc.clamp(0.5), 0.5);
    /// assert_eq!(desc.clamp(-1.0), 0.0);
    /// assert_eq!(desc.clamp(2.0), 1.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Linear gain (0.0-1.0) - mixer channels and amplifiers.
    Gain,

    /// Hertz (Hz) - filter cutoffs and LFO rate.
    Hertz,

    /// Octaves - modulation depth of a filter's frequency control input.
    Octaves,

    /// Milliseconds (ms) - grain length.
    Milliseconds,

    /// Playback speed multiplier (x).
    Multiplier,

    /// No unit - dimensionless parameters (room size, damping, Q).
    None,
}
