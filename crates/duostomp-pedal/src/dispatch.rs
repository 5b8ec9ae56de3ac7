//! Parameter dispatcher.
//!
//! Turns an accepted knob change into effect-unit writes, for the knobs the
//! current mode and variant own. Units outside the selected path are never
//! written.
//!
//! | Mode | Knob A | Knob B |
//! |------|--------|--------|
//! | slot 1, filters | low-pass cutoff | high-pass cutoff |
//! | slot 1, Shaped | (mix only) | none |
//! | slot 1, PitchDown | (mix only) | speed = deviation |
//! | slot 1, PitchUp | (mix only) | speed = 1 / deviation |
//! | slot 2, Ambience | (mix only) | room size in `[0, 1]` |
//! | slot 2, Modulation | sweep depth | LFO rate |

use duostomp_core::units::{filter, granular, lfo, reverb};
use duostomp_core::{DeviationTable, LinearMap, RawRange, UnitId, ValueRange};

use crate::rack::EffectRack;
use crate::settings::Settings;
use crate::slot::{KnobTarget, Slot1State, Slot1Variant, Slot2State, Slot2Variant};

/// Last value written for each knob-driven parameter.
///
/// `None` until the dispatcher first writes the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DispatchedValues {
    /// Low-pass cutoff in Hz.
    pub low_pass: Option<f32>,
    /// High-pass cutoff in Hz.
    pub high_pass: Option<f32>,
    /// Granular speed multiplier.
    pub speed: Option<f32>,
    /// Reverb room size.
    pub room_size: Option<f32>,
    /// LFO filter sweep depth in octaves.
    pub depth: Option<f32>,
    /// LFO rate in Hz.
    pub rate: Option<f32>,
}

/// Mapping constants for every knob-driven parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatcher {
    raw: RawRange,
    low_pass: LinearMap,
    high_pass: LinearMap,
    room_size: LinearMap,
    depth: LinearMap,
    rate: LinearMap,
    deviations: DeviationTable,
}

impl Dispatcher {
    /// Builds the mappings from settings over the raw knob domain `raw`.
    ///
    /// `raw` is the domain the input source actually reports, which the
    /// pedal takes from [`PlatformController::analog_range`].
    ///
    /// [`PlatformController::analog_range`]: duostomp_platform::PlatformController::analog_range
    pub fn new(settings: &Settings, raw: RawRange) -> Self {
        Self {
            raw,
            low_pass: LinearMap::new(raw, settings.filters.low_pass),
            high_pass: LinearMap::new(raw, settings.filters.high_pass),
            room_size: LinearMap::new(raw, ValueRange::new(0.0, 1.0)),
            depth: LinearMap::new(raw, settings.modulation.depth),
            rate: LinearMap::new(raw, settings.modulation.rate),
            deviations: settings.deviation_table(),
        }
    }

    /// Raw knob domain.
    #[inline]
    pub fn raw_range(&self) -> RawRange {
        self.raw
    }

    /// Speed multiplier for a pitch variant at knob B reading `b`.
    ///
    /// Returns `None` for variants without a speed parameter.
    pub fn speed(&self, variant: Slot1Variant, b: u16) -> Option<f32> {
        let ratio = self.deviations.lookup(b, self.raw);
        match variant {
            Slot1Variant::Shaped => None,
            Slot1Variant::PitchDown => Some(ratio),
            Slot1Variant::PitchUp => Some(1.0 / ratio),
        }
    }

    /// Reverb room size at knob B reading `b`.
    #[inline]
    pub fn room_size(&self, b: u16) -> f32 {
        self.room_size.apply(b)
    }

    /// Applies slot 1's knobs `(a, b)` to the units its mode owns.
    pub fn dispatch_slot1<R: EffectRack + ?Sized>(
        &self,
        state: &Slot1State,
        (a, b): (u16, u16),
        rack: &mut R,
        out: &mut DispatchedValues,
    ) {
        match state.knob_target {
            KnobTarget::Filters => {
                let low = self.low_pass.apply(a);
                let high = self.high_pass.apply(b);
                rack.set(UnitId::LowPass, filter::FREQUENCY, low);
                rack.set(UnitId::HighPass, filter::FREQUENCY, high);
                out.low_pass = Some(low);
                out.high_pass = Some(high);

                #[cfg(feature = "tracing")]
                tracing::debug!("dispatch: low-pass {low:.1} Hz, high-pass {high:.1} Hz");
            }
            KnobTarget::Effect => {
                if let Some(speed) = self.speed(state.slot.variant, b) {
                    rack.set(UnitId::Granular, granular::SPEED, speed);
                    out.speed = Some(speed);

                    #[cfg(feature = "tracing")]
                    tracing::debug!("dispatch: granular speed {speed}");
                }
            }
        }
    }

    /// Applies slot 2's knobs `(a, b)` to the units its variant owns.
    pub fn dispatch_slot2<R: EffectRack + ?Sized>(
        &self,
        state: &Slot2State,
        (a, b): (u16, u16),
        rack: &mut R,
        out: &mut DispatchedValues,
    ) {
        match state.variant {
            Slot2Variant::Ambience => {
                let room = self.room_size(b);
                rack.set(UnitId::Reverb, reverb::ROOM_SIZE, room);
                out.room_size = Some(room);

                #[cfg(feature = "tracing")]
                tracing::debug!("dispatch: room size {room:.3}");
            }
            Slot2Variant::Modulation => {
                let depth = self.depth.apply(a);
                let rate = self.rate.apply(b);
                rack.set(UnitId::LfoFilter, filter::OCTAVES, depth);
                rack.set(UnitId::Lfo, lfo::FREQUENCY, rate);
                out.depth = Some(depth);
                out.rate = Some(rate);

                #[cfg(feature = "tracing")]
                tracing::debug!("dispatch: depth {depth:.2} oct, rate {rate:.2} Hz");
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        let settings = Settings::default();
        Self::new(&settings, settings.raw_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rack::BankRack;

    #[test]
    fn test_pitch_direction() {
        let d = Dispatcher::default();
        // 300 / 1023 lands in bucket 1 (ratio 2.0)
        assert_eq!(d.speed(Slot1Variant::PitchDown, 300), Some(2.0));
        assert_eq!(d.speed(Slot1Variant::PitchUp, 300), Some(0.5));
        assert_eq!(d.speed(Slot1Variant::Shaped, 300), None);
    }

    #[test]
    fn test_maps_over_given_raw_range() {
        let d = Dispatcher::new(&Settings::default(), RawRange::new(0, 4095));
        assert_eq!(d.raw_range(), RawRange::new(0, 4095));
        assert_eq!(d.room_size(4095), 1.0);
        assert!((d.room_size(1023) - 1023.0 / 4095.0).abs() < 1e-6);
        // A quarter of 12-bit travel is still the first bucket
        assert_eq!(d.speed(Slot1Variant::PitchDown, 1023), Some(1.5));
        assert_eq!(d.speed(Slot1Variant::PitchDown, 4095), Some(4.0));
    }

    #[test]
    fn test_filter_mode_writes_both_filters() {
        let d = Dispatcher::default();
        let mut rack = BankRack::new();
        let mut out = DispatchedValues::default();
        let mut state = Slot1State::new(false);
        state.knob_target = KnobTarget::Filters;

        d.dispatch_slot1(&state, (0, 1023), &mut rack, &mut out);
        assert_eq!(rack.get(UnitId::LowPass, filter::FREQUENCY), 10.25);
        assert_eq!(rack.get(UnitId::HighPass, filter::FREQUENCY), 7000.0);
        assert_eq!(out.low_pass, Some(10.25));
        assert_eq!(out.high_pass, Some(7000.0));
        assert_eq!(rack.bank(UnitId::Granular).writes(), 0);
    }

    #[test]
    fn test_shaped_writes_nothing() {
        let d = Dispatcher::default();
        let mut rack = BankRack::new();
        let mut out = DispatchedValues::default();
        let state = Slot1State::new(true);

        d.dispatch_slot1(&state, (512, 512), &mut rack, &mut out);
        assert_eq!(rack.total_writes(), 0);
        assert_eq!(out, DispatchedValues::default());
    }

    #[test]
    fn test_pitch_writes_only_granular() {
        let d = Dispatcher::default();
        let mut rack = BankRack::new();
        let mut out = DispatchedValues::default();
        let mut state = Slot1State::new(true);
        state.slot.variant = Slot1Variant::PitchUp;

        d.dispatch_slot1(&state, (0, 1023), &mut rack, &mut out);
        assert_eq!(rack.get(UnitId::Granular, granular::SPEED), 0.25);
        assert_eq!(rack.total_writes(), 1);
    }

    #[test]
    fn test_ambience_room_size() {
        let d = Dispatcher::default();
        let mut rack = BankRack::new();
        let mut out = DispatchedValues::default();
        let state = Slot2State::new(true);

        d.dispatch_slot2(&state, (0, 1023), &mut rack, &mut out);
        assert_eq!(rack.get(UnitId::Reverb, reverb::ROOM_SIZE), 1.0);
        assert_eq!(out.room_size, Some(1.0));
        assert_eq!(rack.total_writes(), 1);
    }

    #[test]
    fn test_modulation_depth_and_rate() {
        let d = Dispatcher::default();
        let mut rack = BankRack::new();
        let mut out = DispatchedValues::default();
        let mut state = Slot2State::new(true);
        state.variant = Slot2Variant::Modulation;

        d.dispatch_slot2(&state, (0, 1023), &mut rack, &mut out);
        assert_eq!(rack.get(UnitId::LfoFilter, filter::OCTAVES), 0.01);
        assert_eq!(rack.get(UnitId::Lfo, lfo::FREQUENCY), 5.0);
        assert_eq!(out.depth, Some(0.01));
        assert_eq!(out.rate, Some(5.0));
        assert_eq!(rack.bank(UnitId::Reverb).writes(), 0);
    }
}
