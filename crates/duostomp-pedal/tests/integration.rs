//! Scenario tests for the control tick, driven through the scripted input
//! source and the in-memory rack.

use duostomp_core::{RawRange, UnitId};
use duostomp_core::units::{granular, mixer, reverb};
use duostomp_pedal::controls::{CYCLE_1F, CYCLE_2F, KNOB_1A, KNOB_1B, KNOB_2B, STOMP_1, STOMP_2};
use duostomp_pedal::{
    BankRack, DisplayFrame, DisplaySink, EffectRack, Pedal, Settings, SimPlatform, Slot1Variant,
    Slot2Edges, Slot2State, Slot2Variant, TelemetrySink, TickSnapshot,
};
use duostomp_platform::ControlId;

type TestPedal = Pedal<SimPlatform, BankRack>;

const TICK_MS: u32 = 300;

fn boot(setup: impl FnOnce(&mut SimPlatform)) -> TestPedal {
    let mut sim = SimPlatform::new();
    setup(&mut sim);
    Pedal::boot(sim, BankRack::new(), Settings::default())
}

fn tick(pedal: &mut TestPedal) {
    pedal.platform_mut().advance(TICK_MS);
    pedal.tick(&mut (), &mut ());
}

/// Press on one tick, release on the next.
fn click(pedal: &mut TestPedal, button: ControlId) {
    pedal.platform_mut().press(button);
    tick(pedal);
    pedal.platform_mut().release(button);
    tick(pedal);
}

fn mixer_gains(pedal: &TestPedal, unit: UnitId) -> [f32; 3] {
    let rack = pedal.rack();
    [
        rack.get(unit, mixer::BYPASS),
        rack.get(unit, mixer::CHANNEL_A),
        rack.get(unit, mixer::CHANNEL_B),
    ]
}

#[test]
fn stomp_engages_shaped_with_live_mix() {
    let mut pedal = boot(|sim| sim.set_knob(KNOB_1A, 768));
    assert!(!pedal.state().slot1.slot.active);
    assert_eq!(mixer_gains(&pedal, UnitId::Slot1Mixer), [1.0, 0.0, 0.0]);

    pedal.platform_mut().set_stomp(STOMP_1, true);
    tick(&mut pedal);

    let state = pedal.state();
    assert!(state.slot1.slot.active);
    assert_eq!(state.slot1.slot.variant, Slot1Variant::Shaped);
    let wet = 768.0 / 1023.0;
    let gains = mixer_gains(&pedal, UnitId::Slot1Mixer);
    assert!((gains[0] - (1.0 - wet)).abs() < 1e-6);
    assert!((gains[1] - wet).abs() < 1e-6);
    assert_eq!(gains[2], 0.0);
}

#[test]
fn stomp_release_forces_bypass() {
    let mut pedal = boot(|sim| {
        sim.set_stomp(STOMP_2, true);
        sim.set_knob(duostomp_pedal::controls::KNOB_2A, 400);
    });
    tick(&mut pedal);
    assert_ne!(mixer_gains(&pedal, UnitId::Slot2Mixer), [1.0, 0.0, 0.0]);

    pedal.platform_mut().set_stomp(STOMP_2, false);
    tick(&mut pedal);
    assert!(!pedal.state().slot2.active);
    assert_eq!(mixer_gains(&pedal, UnitId::Slot2Mixer), [1.0, 0.0, 0.0]);
}

#[test]
fn slot2_two_forward_edges_wrap() {
    let mut slot = Slot2State::new(true);
    for _ in 0..2 {
        slot.apply(Slot2Edges {
            forward: true,
            ..Default::default()
        });
    }
    assert_eq!(slot.variant, Slot2Variant::Ambience);

    let mut pedal = boot(|sim| sim.set_stomp(STOMP_2, true));
    click(&mut pedal, CYCLE_2F);
    assert_eq!(pedal.state().slot2.variant, Slot2Variant::Modulation);
    assert_eq!(mixer_gains(&pedal, UnitId::Slot2Mixer), [0.0, 0.0, 1.0]);
    click(&mut pedal, CYCLE_2F);
    assert_eq!(pedal.state().slot2.variant, Slot2Variant::Ambience);
}

#[test]
fn knob_drift_inside_dead_zone_is_ignored() {
    let mut pedal = boot(|sim| {
        sim.set_stomp(STOMP_2, true);
        sim.set_knob(KNOB_2B, 500);
    });
    tick(&mut pedal);
    assert_eq!(pedal.state().knobs2.b.last_seen(), 500);
    pedal.rack_mut().clear_writes();

    for raw in [505, 510, 515, 520] {
        pedal.platform_mut().set_knob(KNOB_2B, raw);
        tick(&mut pedal);
    }
    assert_eq!(pedal.rack().bank(UnitId::Reverb).writes(), 0);
    assert_eq!(pedal.state().knobs2.b.last_seen(), 500);

    pedal.platform_mut().set_knob(KNOB_2B, 521);
    tick(&mut pedal);
    pedal.platform_mut().set_knob(KNOB_2B, 525);
    tick(&mut pedal);

    assert_eq!(pedal.rack().bank(UnitId::Reverb).writes(), 1);
    assert_eq!(pedal.state().knobs2.b.last_seen(), 521);
    let room = pedal.rack().get(UnitId::Reverb, reverb::ROOM_SIZE);
    assert!((room - 521.0 / 1023.0).abs() < 1e-6);
}

#[test]
fn pitch_direction_follows_variant() {
    let mut pedal = boot(|sim| sim.set_stomp(STOMP_1, true));

    // Shaped -> PitchDown, knob B in bucket 1
    pedal.platform_mut().set_knob(KNOB_1B, 300);
    click(&mut pedal, CYCLE_1F);
    assert_eq!(pedal.state().slot1.slot.variant, Slot1Variant::PitchDown);
    assert_eq!(pedal.rack().get(UnitId::Granular, granular::SPEED), 2.0);
    assert_eq!(mixer_gains(&pedal, UnitId::Slot1Mixer)[2], 0.0);

    // PitchDown -> PitchUp, nudge knob B past the dead zone inside bucket 1
    click(&mut pedal, CYCLE_1F);
    assert_eq!(pedal.state().slot1.slot.variant, Slot1Variant::PitchUp);
    pedal.platform_mut().set_knob(KNOB_1B, 330);
    tick(&mut pedal);
    assert_eq!(pedal.rack().get(UnitId::Granular, granular::SPEED), 0.5);
    assert_eq!(pedal.state().mapped.speed, Some(0.5));
}

#[test]
fn cycle_without_knob_change_keeps_speed() {
    let mut pedal = boot(|sim| {
        sim.set_stomp(STOMP_1, true);
        sim.set_knob(KNOB_1B, 1023);
    });
    click(&mut pedal, CYCLE_1F);
    assert_eq!(pedal.rack().get(UnitId::Granular, granular::SPEED), 4.0);

    let writes = pedal.rack().bank(UnitId::Granular).writes();
    click(&mut pedal, CYCLE_1F);
    assert_eq!(pedal.rack().bank(UnitId::Granular).writes(), writes);
}

#[test]
fn bounce_inside_debounce_window_is_one_press() {
    let mut pedal = boot(|sim| sim.set_stomp(STOMP_2, true));
    pedal.platform_mut().press(CYCLE_2F);
    tick(&mut pedal);
    // Contact bounce: release seen 2 ms after the accepted press
    pedal.platform_mut().release(CYCLE_2F);
    pedal.platform_mut().advance(2);
    pedal.tick(&mut (), &mut ());
    pedal.platform_mut().press(CYCLE_2F);
    pedal.platform_mut().advance(1);
    pedal.tick(&mut (), &mut ());

    assert_eq!(pedal.state().slot2.variant, Slot2Variant::Modulation);
}

#[derive(Default)]
struct Recorder {
    frames: Vec<String>,
    snapshots: Vec<TickSnapshot>,
}

impl DisplaySink for Recorder {
    fn show(&mut self, frame: &DisplayFrame) {
        self.frames.push(frame.to_string());
    }
}

impl TelemetrySink for Recorder {
    fn record(&mut self, snapshot: &TickSnapshot) {
        self.snapshots.push(*snapshot);
    }
}

#[test]
fn every_tick_emits_frame_and_snapshot() {
    let mut pedal = boot(|sim| sim.set_stomp(STOMP_1, true));
    let mut display = Recorder::default();
    let mut telemetry = Recorder::default();

    for _ in 0..3 * 16 {
        pedal.platform_mut().advance(20);
        pedal.step(&mut display, &mut telemetry);
    }

    assert_eq!(display.frames.len(), 3);
    assert_eq!(telemetry.snapshots.len(), 3);
    assert_eq!(display.frames[0], "Revrb  ||##  Sqr\nMix Sze||Mix    ");
    let last = telemetry.snapshots[2];
    assert_eq!(last.tick, 3);
    assert!(last.slot1_active);
    assert!(!last.slot2_active);
}

#[test]
fn missing_readings_keep_state() {
    let mut pedal = boot(|sim| {
        sim.set_stomp(STOMP_2, true);
        sim.set_knob(KNOB_2B, 700);
    });
    tick(&mut pedal);
    let before = pedal.state().clone();

    pedal.platform_mut().disconnect(KNOB_2B);
    pedal.platform_mut().disconnect(STOMP_2);
    tick(&mut pedal);

    let after = pedal.state();
    assert_eq!(after.slot2, before.slot2);
    assert_eq!(after.knobs2, before.knobs2);
    assert_eq!(after.readings[3], Some(700));
}

#[test]
fn knobs_map_over_the_input_sources_range() {
    // 12-bit input with stock settings (adc_max = 1023)
    let mut sim = SimPlatform::with_range(RawRange::new(0, 4095));
    sim.set_stomp(STOMP_1, true);
    sim.set_knob(KNOB_1A, 2048);
    sim.set_knob(KNOB_2B, 2048);
    let mut pedal = Pedal::boot(sim, BankRack::new(), Settings::default());

    let half = 2048.0 / 4095.0;
    assert!((pedal.rack().get(UnitId::Reverb, reverb::ROOM_SIZE) - half).abs() < 1e-6);

    tick(&mut pedal);
    let wet = pedal.state().wet1;
    assert!((wet - half).abs() < 1e-6, "wet1 = {wet}");
    let gains = mixer_gains(&pedal, UnitId::Slot1Mixer);
    assert!((gains[1] - half).abs() < 1e-6);
}
