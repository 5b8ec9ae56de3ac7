//! Discrete speed multipliers for the granular pitch shifter.
//!
//! The pitch variants do not sweep continuously: the knob is split into
//! `N` equal buckets and each bucket selects one fixed multiplier. The
//! bucket index is
//!
//! ```text
//! floor((reading / full_scale) * (N - ε))
//! ```
//!
//! so a reading at full scale still lands in the last bucket.

use crate::math::{RawRange, normalize_reading};

/// Keeps a full-scale reading inside the last bucket.
const BUCKET_EPSILON: f32 = 1e-3;

/// Default multipliers: fifth, octave, octave plus fifth, two octaves.
pub const DEFAULT_DEVIATIONS: [f32; DEVIATION_COUNT] = [1.5, 2.0, 3.0, 4.0];

/// Number of entries in the deviation table.
pub const DEVIATION_COUNT: usize = 4;

/// Maps a quantized knob bucket to a playback-speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationTable {
    ratios: [f32; DEVIATION_COUNT],
}

impl DeviationTable {
    /// Creates a table from explicit multipliers.
    pub const fn new(ratios: [f32; DEVIATION_COUNT]) -> Self {
        Self { ratios }
    }

    /// Number of buckets.
    #[inline]
    pub const fn len(&self) -> usize {
        DEVIATION_COUNT
    }

    /// Always `false`; the table has a fixed, non-zero size.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Bucket index selected by a raw reading.
    ///
    /// # Example
    ///
    /// ```rust
    /// use duostomp_core::{DeviationTable, math::RawRange};
    ///
    /// let table = DeviationTable::default();
    /// let adc = RawRange::ADC_10BIT;
    /// assert_eq!(table.bucket(0, adc), 0);
    /// assert_eq!(table.bucket(300, adc), 1);
    /// assert_eq!(table.bucket(1023, adc), 3);
    /// ```
    #[inline]
    pub fn bucket(&self, reading: u16, raw: RawRange) -> usize {
        let scaled = normalize_reading(reading, raw) * (DEVIATION_COUNT as f32 - BUCKET_EPSILON);
        (libm::floorf(scaled) as usize).min(DEVIATION_COUNT - 1)
    }

    /// Multiplier stored at `bucket`, clamped to the last entry.
    #[inline]
    pub fn ratio(&self, bucket: usize) -> f32 {
        self.ratios[bucket.min(DEVIATION_COUNT - 1)]
    }

    /// Multiplier selected by a raw reading.
    #[inline]
    pub fn lookup(&self, reading: u16, raw: RawRange) -> f32 {
        self.ratio(self.bucket(reading, raw))
    }

    /// All multipliers in bucket order.
    pub fn ratios(&self) -> &[f32; DEVIATION_COUNT] {
        &self.ratios
    }
}

impl Default for DeviationTable {
    fn default() -> Self {
        Self::new(DEFAULT_DEVIATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        let table = DeviationTable::default();
        let adc = RawRange::ADC_10BIT;
        assert_eq!(table.bucket(0, adc), 0);
        assert_eq!(table.bucket(255, adc), 0);
        assert_eq!(table.bucket(257, adc), 1);
        assert_eq!(table.bucket(512, adc), 2);
        assert_eq!(table.bucket(768, adc), 3);
        assert_eq!(table.bucket(1023, adc), 3);
    }

    #[test]
    fn test_lookup() {
        let table = DeviationTable::default();
        let adc = RawRange::ADC_10BIT;
        assert_eq!(table.lookup(0, adc), 1.5);
        assert_eq!(table.lookup(300, adc), 2.0);
        assert_eq!(table.lookup(1023, adc), 4.0);
    }

    #[test]
    fn test_ratio_clamps_index() {
        let table = DeviationTable::new([1.0, 2.0, 3.0, 8.0]);
        assert_eq!(table.ratio(99), 8.0);
        assert_eq!(table.len(), 4);
        assert!(!table.is_empty());
    }
}
