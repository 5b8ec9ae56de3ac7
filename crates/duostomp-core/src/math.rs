//! Value mapping utilities for control readings.
//!
//! Converts raw analog readings into effect parameter values. All functions
//! are allocation-free and suitable for `no_std`.
//!
//! # Mapping
//!
//! - [`map_range`] - Linear remap of a raw reading onto `[low, high]`
//! - [`LinearMap`] - A stored raw domain plus output range
//! - [`normalize_reading`] - Raw reading to `[0.0, 1.0]`
//!
//! # Utilities
//!
//! - [`lerp`] - Linear interpolation, exact at both endpoints

/// Linear interpolation between two values.
///
/// Uses the two-product form `a * (1 - t) + b * t`, which returns `a`
/// exactly at `t = 0.0` and `b` exactly at `t = 1.0`.
///
/// # Arguments
/// * `a` - Start value (at t=0)
/// * `b` - End value (at t=1)
/// * `t` - Interpolation factor (0.0 to 1.0)
///
/// # Example
/// ```rust
/// use duostomp_core::math::lerp;
///
/// assert_eq!(lerp(0.01, 5.0, 1.0), 5.0);
/// assert_eq!(lerp(0.01, 5.0, 0.0), 0.01);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Inclusive domain of raw integer readings, e.g. `0..=1023` for a 10-bit ADC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawRange {
    /// Lowest reading the source produces.
    pub min: u16,
    /// Highest reading the source produces.
    pub max: u16,
}

impl RawRange {
    /// 10-bit ADC domain (`0..=1023`).
    pub const ADC_10BIT: Self = Self { min: 0, max: 1023 };

    /// Creates a raw domain.
    #[inline]
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// Width of the domain (`max - min`).
    #[inline]
    pub const fn span(&self) -> u16 {
        self.max.saturating_sub(self.min)
    }
}

impl Default for RawRange {
    fn default() -> Self {
        Self::ADC_10BIT
    }
}

/// Inclusive floating-point output range of a mapped parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRange {
    /// Value produced at the bottom of the raw domain.
    pub min: f32,
    /// Value produced at the top of the raw domain.
    pub max: f32,
}

impl ValueRange {
    /// Creates an output range.
    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Normalizes a raw reading to `[0.0, 1.0]` within `raw`.
///
/// Readings outside the domain are clamped. A zero-width domain yields `0.0`.
#[inline]
pub fn normalize_reading(value: u16, raw: RawRange) -> f32 {
    let span = raw.span();
    if span == 0 {
        return 0.0;
    }
    let clamped = value.clamp(raw.min, raw.max);
    f32::from(clamped - raw.min) / f32::from(span)
}

/// Linearly remaps a raw reading onto `[low, high]`.
///
/// Computes `low + (value - raw.min) * (high - low) / (raw.max - raw.min)`.
/// `map_range(raw.min, ..)` returns `low` and `map_range(raw.max, ..)`
/// returns `high` exactly.
///
/// # Example
/// ```rust
/// use duostomp_core::math::{map_range, RawRange};
///
/// let adc = RawRange::ADC_10BIT;
/// assert_eq!(map_range(0, adc, 10.25, 7000.0), 10.25);
/// assert_eq!(map_range(1023, adc, 10.25, 7000.0), 7000.0);
/// ```
#[inline]
pub fn map_range(value: u16, raw: RawRange, low: f32, high: f32) -> f32 {
    lerp(low, high, normalize_reading(value, raw))
}

/// A raw domain bound to an output range.
///
/// The dispatcher keeps one of these per mapped parameter so the mapping
/// constants live in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMap {
    /// Raw input domain.
    pub raw: RawRange,
    /// Output range.
    pub out: ValueRange,
}

impl LinearMap {
    /// Creates a mapping from `raw` onto `out`.
    #[inline]
    pub const fn new(raw: RawRange, out: ValueRange) -> Self {
        Self { raw, out }
    }

    /// Maps a raw reading onto the output range.
    #[inline]
    pub fn apply(&self, value: u16) -> f32 {
        map_range(value, self.raw, self.out.min, self.out.max)
    }
}
