//! Crossfade gain vectors for the slot output mixers.
//!
//! Each slot feeds a three-input mixer: channel 0 carries the dry/bypass
//! signal, channels 1 and 2 carry the slot's two effect paths. A
//! [`MixGains`] value is the full set of channel levels for one mixer.
//!
//! | Constructor | Bypass | A | B |
//! |-------------|--------|---|---|
//! | [`MixGains::DRY`] | 1.0 | 0.0 | 0.0 |
//! | [`MixGains::crossfade_a`] | `1 - wet` | `wet` | 0.0 |
//! | [`MixGains::crossfade_b`] | `1 - wet` | 0.0 | `wet` |
//! | [`MixGains::EXCLUSIVE_B`] | 0.0 | 0.0 | 1.0 |

use crate::units::mixer;

/// Number of mixer inputs a slot uses.
pub const MIXER_CHANNELS: usize = 3;

/// Effect input of a slot mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectChannel {
    /// Mixer input 1.
    A,
    /// Mixer input 2.
    B,
}

impl EffectChannel {
    /// Mixer parameter index of this input.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            EffectChannel::A => mixer::CHANNEL_A,
            EffectChannel::B => mixer::CHANNEL_B,
        }
    }
}

/// Ordered channel gains of one slot mixer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixGains([f32; MIXER_CHANNELS]);

impl MixGains {
    /// Pure bypass: dry at unity, both effect inputs muted.
    pub const DRY: Self = Self([1.0, 0.0, 0.0]);

    /// Channel B fully replaces the dry signal.
    pub const EXCLUSIVE_B: Self = Self([0.0, 0.0, 1.0]);

    /// Dry/wet blend between bypass and one effect input.
    ///
    /// `wet` is clamped to `[0.0, 1.0]`; bypass receives `1 - wet`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use duostomp_core::{EffectChannel, MixGains};
    ///
    /// let gains = MixGains::crossfade(EffectChannel::B, 0.25);
    /// assert_eq!(gains.as_array(), [0.75, 0.0, 0.25]);
    /// ```
    #[inline]
    pub fn crossfade(channel: EffectChannel, wet: f32) -> Self {
        let wet = wet.clamp(0.0, 1.0);
        let mut gains = [1.0 - wet, 0.0, 0.0];
        gains[channel.index()] = wet;
        Self(gains)
    }

    /// Dry/wet blend between bypass and channel A.
    #[inline]
    pub fn crossfade_a(wet: f32) -> Self {
        Self::crossfade(EffectChannel::A, wet)
    }

    /// Dry/wet blend between bypass and channel B.
    #[inline]
    pub fn crossfade_b(wet: f32) -> Self {
        Self::crossfade(EffectChannel::B, wet)
    }

    /// Gain of the dry/bypass input.
    #[inline]
    pub fn bypass(&self) -> f32 {
        self.0[mixer::BYPASS]
    }

    /// Gain of an effect input.
    #[inline]
    pub fn channel(&self, channel: EffectChannel) -> f32 {
        self.0[channel.index()]
    }

    /// All channel gains in mixer-input order.
    #[inline]
    pub fn as_array(&self) -> [f32; MIXER_CHANNELS] {
        self.0
    }

    /// Returns `true` if this is the bypass vector.
    #[inline]
    pub fn is_dry(&self) -> bool {
        *self == Self::DRY
    }
}

impl Default for MixGains {
    fn default() -> Self {
        Self::DRY
    }
}
