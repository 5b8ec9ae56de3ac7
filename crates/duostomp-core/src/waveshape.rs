//! Transfer curve for the shaped (square-wave) slot 1 variant.
//!
//! The waveshaper maps each input sample through a lookup table spanning
//! `[-1.0, 1.0]`. A square template sends every negative input to
//! `-level` and every positive input to `+level`, with a single zero sample
//! at the centre of the table.

/// Number of transfer-function samples (odd, so the curve has a centre point).
pub const WAVESHAPE_LENGTH: usize = 65;

/// Plateau level of the default template.
pub const DEFAULT_SHAPE_LEVEL: f32 = 0.95;

/// Immutable waveshaper transfer curve, computed once at boot.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveshapeCurve {
    points: [f32; WAVESHAPE_LENGTH],
}

impl WaveshapeCurve {
    /// Builds the symmetric square template.
    ///
    /// # Example
    ///
    /// ```rust
    /// use duostomp_core::{WaveshapeCurve, WAVESHAPE_LENGTH};
    ///
    /// let curve = WaveshapeCurve::square(0.95);
    /// assert_eq!(curve.points()[0], -0.95);
    /// assert_eq!(curve.points()[WAVESHAPE_LENGTH / 2], 0.0);
    /// assert_eq!(curve.points()[WAVESHAPE_LENGTH - 1], 0.95);
    /// ```
    pub fn square(level: f32) -> Self {
        let mut points = [0.0; WAVESHAPE_LENGTH];
        let half = (WAVESHAPE_LENGTH - 1) / 2;
        for i in 0..half {
            points[i] = -level;
            points[WAVESHAPE_LENGTH - 1 - i] = level;
        }
        points[half] = 0.0;
        Self { points }
    }

    /// Transfer-function samples, from input -1.0 to +1.0.
    #[inline]
    pub fn points(&self) -> &[f32; WAVESHAPE_LENGTH] {
        &self.points
    }
}

impl Default for WaveshapeCurve {
    fn default() -> Self {
        Self::square(DEFAULT_SHAPE_LEVEL)
    }
}
