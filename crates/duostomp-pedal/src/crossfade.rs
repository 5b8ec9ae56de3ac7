//! Mixer crossfade controller.
//!
//! Derives each slot mixer's gain vector from slot state and the held wet
//! level. An inactive slot is always pure bypass, whatever it held before.
//!
//! | Slot state | Bypass | A | B |
//! |------------|--------|---|---|
//! | inactive | 1 | 0 | 0 |
//! | 1 / Shaped | 1 - wet1 | wet1 | 0 |
//! | 1 / PitchDown, PitchUp | 1 - wet1 | 0 | wet1 |
//! | 2 / Ambience | 1 - wet2 | wet2 | 0 |
//! | 2 / Modulation | 0 | 0 | 1 |

use duostomp_core::{EffectChannel, MixGains};

use crate::slot::{Slot1State, Slot1Variant, Slot2State, Slot2Variant};

/// Gain vector for slot 1's mixer.
pub fn slot1_gains(state: &Slot1State, wet1: f32) -> MixGains {
    if !state.slot.active {
        return MixGains::DRY;
    }
    match state.slot.variant {
        Slot1Variant::Shaped => MixGains::crossfade(EffectChannel::A, wet1),
        Slot1Variant::PitchDown | Slot1Variant::PitchUp => {
            MixGains::crossfade(EffectChannel::B, wet1)
        }
    }
}

/// Gain vector for slot 2's mixer.
pub fn slot2_gains(state: &Slot2State, wet2: f32) -> MixGains {
    if !state.active {
        return MixGains::DRY;
    }
    match state.variant {
        Slot2Variant::Ambience => MixGains::crossfade(EffectChannel::A, wet2),
        Slot2Variant::Modulation => MixGains::EXCLUSIVE_B,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::KnobTarget;

    #[test]
    fn test_inactive_is_dry() {
        let s1 = Slot1State::new(false);
        assert_eq!(slot1_gains(&s1, 0.3), MixGains::DRY);
        let s2 = Slot2State::new(false);
        assert_eq!(slot2_gains(&s2, 0.3), MixGains::DRY);
    }

    #[test]
    fn test_slot1_channels() {
        let mut s = Slot1State::new(true);
        assert_eq!(slot1_gains(&s, 0.25).as_array(), [0.75, 0.25, 0.0]);
        s.slot.variant = Slot1Variant::PitchDown;
        assert_eq!(slot1_gains(&s, 0.25).as_array(), [0.75, 0.0, 0.25]);
        s.slot.variant = Slot1Variant::PitchUp;
        assert_eq!(slot1_gains(&s, 1.0).as_array(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_filter_mode_does_not_change_vector() {
        let mut s = Slot1State::new(true);
        s.knob_target = KnobTarget::Filters;
        assert_eq!(slot1_gains(&s, 0.5).as_array(), [0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_slot2_channels() {
        let mut s = Slot2State::new(true);
        assert_eq!(slot2_gains(&s, 0.5).as_array(), [0.5, 0.5, 0.0]);
        s.variant = Slot2Variant::Modulation;
        assert_eq!(slot2_gains(&s, 0.5), MixGains::EXCLUSIVE_B);
    }
}
