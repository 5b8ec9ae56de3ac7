//! Control tick orchestration.
//!
//! [`Pedal`] owns the input source, the effect rack and the [`PedalState`]
//! aggregate, and runs the control tick:
//!
//! 1. Debounced inputs update.
//! 2. Slot state machines consume the edges.
//! 3. Mixer gains are recomputed; changed vectors are written.
//! 4. Knobs are sampled through their dead zones; accepted changes are
//!    dispatched to the selected effect units.
//! 5. The display frame and the telemetry snapshot are emitted.
//!
//! Nothing in the tick blocks or fails. A control with no data this tick is
//! skipped and picked up again on the next one.

use duostomp_core::units::{amp, filter, granular, lfo, reverb};
use duostomp_core::{MixGains, UnitId, WaveshapeCurve, normalize_reading};
use duostomp_platform::{DebouncedEdge, KnobPair, PlatformController};

use crate::cadence::{CadenceStep, ControlCadence};
use crate::controls::{
    CYCLE_1B, CYCLE_1F, CYCLE_2B, CYCLE_2F, ENGAGED_LEVEL, KNOB_1A, KNOB_1B, KNOB_2A, KNOB_2B,
    STOMP_1, STOMP_2,
};
use crate::crossfade::{slot1_gains, slot2_gains};
use crate::dispatch::{DispatchedValues, Dispatcher};
use crate::display::{DisplayFrame, DisplaySink};
use crate::rack::{EffectRack, PeakTap};
use crate::settings::Settings;
use crate::slot::{Slot1Edges, Slot1State, Slot2Edges, Slot2State, Slot2Variant};
use crate::telemetry::{TelemetrySink, TickSnapshot};

/// Every piece of mutable control state, owned by the tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PedalState {
    /// Slot 1 activation, variant and knob target.
    pub slot1: Slot1State,
    /// Slot 2 activation and variant.
    pub slot2: Slot2State,
    /// Dead-zone baselines of knobs 1A and 1B.
    pub knobs1: KnobPair,
    /// Dead-zone baselines of knobs 2A and 2B.
    pub knobs2: KnobPair,
    /// Held wet level of slot 1.
    pub wet1: f32,
    /// Held wet level of slot 2.
    pub wet2: f32,
    /// Gains last written to slot 1's mixer.
    pub gains1: MixGains,
    /// Gains last written to slot 2's mixer.
    pub gains2: MixGains,
    /// Latest raw readings of knobs 1A, 1B, 2A, 2B.
    pub readings: [Option<u16>; 4],
    /// Last values written for knob-driven parameters.
    pub mapped: DispatchedValues,
    /// Control ticks run since boot.
    pub ticks: u32,
}

impl PedalState {
    fn new(slot1_active: bool, slot2_active: bool, sensitivity: u16) -> Self {
        let slot1 = Slot1State::new(slot1_active);
        let slot2 = Slot2State::new(slot2_active);
        Self {
            slot1,
            slot2,
            knobs1: KnobPair::new(sensitivity),
            knobs2: KnobPair::new(sensitivity),
            wet1: 1.0,
            wet2: 1.0,
            gains1: slot1_gains(&slot1, 1.0),
            gains2: slot2_gains(&slot2, 1.0),
            readings: [None; 4],
            mapped: DispatchedValues::default(),
            ticks: 0,
        }
    }
}

/// The six debounced digital inputs.
#[derive(Debug, Clone)]
struct Inputs {
    cycle_1f: DebouncedEdge,
    cycle_1b: DebouncedEdge,
    cycle_2f: DebouncedEdge,
    cycle_2b: DebouncedEdge,
    stomp_1: DebouncedEdge,
    stomp_2: DebouncedEdge,
}

impl Inputs {
    fn new<P: PlatformController + ?Sized>(platform: &mut P, debounce_ms: u32) -> Self {
        Self {
            cycle_1f: DebouncedEdge::from_platform(CYCLE_1F, debounce_ms, platform),
            cycle_1b: DebouncedEdge::from_platform(CYCLE_1B, debounce_ms, platform),
            cycle_2f: DebouncedEdge::from_platform(CYCLE_2F, debounce_ms, platform),
            cycle_2b: DebouncedEdge::from_platform(CYCLE_2B, debounce_ms, platform),
            stomp_1: DebouncedEdge::from_platform(STOMP_1, debounce_ms, platform),
            stomp_2: DebouncedEdge::from_platform(STOMP_2, debounce_ms, platform),
        }
    }

    fn update<P: PlatformController + ?Sized>(&mut self, platform: &mut P) {
        self.cycle_1f.update(platform);
        self.cycle_1b.update(platform);
        self.cycle_2f.update(platform);
        self.cycle_2b.update(platform);
        self.stomp_1.update(platform);
        self.stomp_2.update(platform);
    }

    fn slot1_edges(&self) -> Slot1Edges {
        Slot1Edges {
            cycle: self.cycle_1f.falling_edge(),
            toggle_target: self.cycle_1b.falling_edge(),
            stomp: self.stomp_1.edge(),
        }
    }

    fn slot2_edges(&self) -> Slot2Edges {
        Slot2Edges {
            forward: self.cycle_2f.falling_edge(),
            backward: self.cycle_2b.falling_edge(),
            stomp: self.stomp_2.edge(),
        }
    }
}

/// The pedal's control core bound to an input source and an effect rack.
///
/// # Example
///
/// ```rust
/// use duostomp_pedal::{BankRack, Pedal, Settings, SimPlatform, Variant, controls};
///
/// let mut sim = SimPlatform::new();
/// sim.set_stomp(controls::STOMP_2, true);
/// let mut pedal = Pedal::boot(sim, BankRack::new(), Settings::default());
/// assert!(pedal.state().slot2.active);
///
/// pedal.platform_mut().advance(300);
/// pedal.platform_mut().press(controls::CYCLE_2F);
/// pedal.tick(&mut (), &mut ());
/// assert_eq!(pedal.state().slot2.variant.index(), 1);
/// ```
#[derive(Debug)]
pub struct Pedal<P, R> {
    platform: P,
    rack: R,
    settings: Settings,
    dispatcher: Dispatcher,
    cadence: ControlCadence,
    inputs: Inputs,
    state: PedalState,
}

impl<P: PlatformController, R: EffectRack> Pedal<P, R> {
    /// Configures every effect unit and derives the initial slot state.
    ///
    /// Slot activity comes from the stomp switch levels at boot, not from
    /// edges. Both mixers are written unconditionally.
    pub fn boot(mut platform: P, mut rack: R, settings: Settings) -> Self {
        platform.poll();
        let raw = platform.analog_range();
        #[cfg(feature = "tracing")]
        if raw != settings.raw_range() {
            tracing::warn!(
                "input reports analog range {}..={}, settings say 0..={}; mapping over the input's range",
                raw.min,
                raw.max,
                settings.controls.adc_max
            );
        }
        let dispatcher = Dispatcher::new(&settings, raw);
        let mut mapped = DispatchedValues::default();

        let m = &settings.modulation;
        rack.set(UnitId::Lfo, lfo::AMPLITUDE, m.lfo_amplitude);
        rack.set(UnitId::Lfo, lfo::FREQUENCY, m.lfo_rate);
        rack.set(UnitId::LfoFilter, filter::FREQUENCY, m.filter_cutoff);
        rack.set(UnitId::LfoFilter, filter::RESONANCE, m.filter_resonance);
        rack.set(UnitId::LfoFilter, filter::OCTAVES, m.initial_depth);
        mapped.rate = Some(m.lfo_rate);
        mapped.depth = Some(m.initial_depth);

        let f = &settings.filters;
        rack.set(UnitId::LowPass, filter::FREQUENCY, f.low_pass.max);
        rack.set(UnitId::LowPass, filter::RESONANCE, f.resonance);
        rack.set(UnitId::HighPass, filter::FREQUENCY, f.high_pass.min);
        rack.set(UnitId::HighPass, filter::RESONANCE, f.resonance);
        mapped.low_pass = Some(f.low_pass.max);
        mapped.high_pass = Some(f.high_pass.min);

        rack.load_waveshape(&WaveshapeCurve::square(settings.drive.shape_level));
        rack.set(UnitId::Amp, amp::GAIN, settings.drive.makeup_gain);

        rack.set(UnitId::Granular, granular::GRAIN_MS, settings.pitch.grain_ms);

        let room = dispatcher.room_size(platform.read_analog(KNOB_2B).unwrap_or(0));
        rack.set(UnitId::Reverb, reverb::ROOM_SIZE, room);
        rack.set(UnitId::Reverb, reverb::DAMPING, settings.ambience.damping);
        mapped.room_size = Some(room);

        let inputs = Inputs::new(&mut platform, settings.controls.debounce_ms);
        let mut state = PedalState::new(
            inputs.stomp_1.level() == ENGAGED_LEVEL,
            inputs.stomp_2.level() == ENGAGED_LEVEL,
            settings.controls.sensitivity,
        );
        state.mapped = mapped;
        write_mixer(&mut rack, UnitId::Slot1Mixer, state.gains1);
        write_mixer(&mut rack, UnitId::Slot2Mixer, state.gains2);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "boot: slot1 active={}, slot2 active={}",
            state.slot1.slot.active,
            state.slot2.active
        );

        Self {
            platform,
            rack,
            settings,
            dispatcher,
            cadence: ControlCadence::new(
                settings.controls.control_check,
                settings.controls.loop_delay_ms,
            ),
            inputs,
            state,
        }
    }

    /// Runs one main-loop iteration: either a control tick or a wait.
    ///
    /// Returns what the cadence decided; on [`CadenceStep::Wait`] the caller
    /// sleeps for the given time before calling again.
    pub fn step<D, T>(&mut self, display: &mut D, telemetry: &mut T) -> CadenceStep
    where
        D: DisplaySink + ?Sized,
        T: TelemetrySink + ?Sized,
    {
        let step = self.cadence.step();
        if step == CadenceStep::Tick {
            self.tick(display, telemetry);
        }
        step
    }

    /// Runs one control tick.
    pub fn tick<D, T>(&mut self, display: &mut D, telemetry: &mut T)
    where
        D: DisplaySink + ?Sized,
        T: TelemetrySink + ?Sized,
    {
        self.state.ticks = self.state.ticks.wrapping_add(1);
        self.platform.poll();

        self.inputs.update(&mut self.platform);
        self.state.slot1.apply(self.inputs.slot1_edges());
        self.state.slot2.apply(self.inputs.slot2_edges());

        self.update_mixers();
        self.update_slot1_params();
        self.update_slot2_params();

        display.show(&DisplayFrame::render(&self.state.slot1, &self.state.slot2));
        let snapshot = self.snapshot();
        telemetry.record(&snapshot);
    }

    fn update_mixers(&mut self) {
        let raw = self.dispatcher.raw_range();
        let state = &mut self.state;

        if state.slot1.slot.active && !state.slot1.targets_filters() {
            if let Some(a) = self.platform.read_analog(KNOB_1A) {
                state.wet1 = normalize_reading(a, raw);
            }
        }
        if state.slot2.active && state.slot2.variant == Slot2Variant::Ambience {
            if let Some(a) = self.platform.read_analog(KNOB_2A) {
                state.wet2 = normalize_reading(a, raw);
            }
        }

        let gains1 = slot1_gains(&state.slot1, state.wet1);
        if gains1 != state.gains1 {
            write_mixer(&mut self.rack, UnitId::Slot1Mixer, gains1);
            state.gains1 = gains1;
        }
        let gains2 = slot2_gains(&state.slot2, state.wet2);
        if gains2 != state.gains2 {
            write_mixer(&mut self.rack, UnitId::Slot2Mixer, gains2);
            state.gains2 = gains2;
        }
    }

    fn update_slot1_params(&mut self) {
        let state = &mut self.state;
        // The output filters follow both slots, so filter mode samples even when bypassed.
        if !(state.slot1.slot.active || state.slot1.targets_filters()) {
            return;
        }
        let a = self.platform.read_analog(KNOB_1A);
        let b = self.platform.read_analog(KNOB_1B);
        record_readings(&mut state.readings[0..2], a, b);

        if state.knobs1.sample(a, b) {
            #[cfg(feature = "tracing")]
            tracing::trace!("slot1 knobs: {:?}", state.knobs1.readings());

            let values = (
                a.unwrap_or(state.knobs1.a.last_seen()),
                b.unwrap_or(state.knobs1.b.last_seen()),
            );
            self.dispatcher
                .dispatch_slot1(&state.slot1, values, &mut self.rack, &mut state.mapped);
        }
    }

    fn update_slot2_params(&mut self) {
        let state = &mut self.state;
        if !state.slot2.active {
            return;
        }
        let a = self.platform.read_analog(KNOB_2A);
        let b = self.platform.read_analog(KNOB_2B);
        record_readings(&mut state.readings[2..4], a, b);

        if state.knobs2.sample(a, b) {
            #[cfg(feature = "tracing")]
            tracing::trace!("slot2 knobs: {:?}", state.knobs2.readings());

            let values = (
                a.unwrap_or(state.knobs2.a.last_seen()),
                b.unwrap_or(state.knobs2.b.last_seen()),
            );
            self.dispatcher
                .dispatch_slot2(&state.slot2, values, &mut self.rack, &mut state.mapped);
        }
    }

    /// Builds the telemetry snapshot, draining fresh peak readings.
    fn snapshot(&mut self) -> TickSnapshot {
        let rack = &mut self.rack;
        let state = &self.state;
        TickSnapshot {
            tick: state.ticks,
            now_ms: self.platform.now_ms(),
            slot1_active: state.slot1.slot.active,
            slot1_variant: state.slot1.slot.variant,
            knob_target: state.slot1.knob_target,
            slot2_active: state.slot2.active,
            slot2_variant: state.slot2.variant,
            knobs: state.readings,
            wet1: state.wet1,
            wet2: state.wet2,
            mapped: state.mapped,
            peaks: PeakTap::ALL.map(|tap| rack.peak(tap)),
        }
    }

    /// Current control state.
    pub fn state(&self) -> &PedalState {
        &self.state
    }

    /// Settings the pedal was booted with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The effect rack.
    pub fn rack(&self) -> &R {
        &self.rack
    }

    /// Mutable access to the effect rack.
    pub fn rack_mut(&mut self) -> &mut R {
        &mut self.rack
    }

    /// The input source.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutable access to the input source.
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Tears the pedal down into its input source and rack.
    pub fn into_parts(self) -> (P, R) {
        (self.platform, self.rack)
    }
}

fn record_readings(slots: &mut [Option<u16>], a: Option<u16>, b: Option<u16>) {
    for (slot, reading) in slots.iter_mut().zip([a, b]) {
        if reading.is_some() {
            *slot = reading;
        }
    }
}

fn write_mixer<R: EffectRack + ?Sized>(rack: &mut R, unit: UnitId, gains: MixGains) {
    #[cfg(feature = "tracing")]
    tracing::trace!("{}: gains {:?}", unit.name(), gains.as_array());

    for (channel, gain) in gains.as_array().into_iter().enumerate() {
        rack.set(unit, channel, gain);
    }
}
