//! Property-based tests for duostomp-platform input conditioning.
//!
//! Tests dead-zone idempotence, baseline invariants and debounce lockout
//! using proptest for randomized input generation.

use duostomp_platform::{ControlId, DebouncedEdge, KnobChannel, KnobPair};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Offering the same reading twice never reports a second change.
    #[test]
    fn dead_zone_idempotent(
        baseline in 0u16..=1023,
        threshold in 0u16..100,
        reading in 0u16..=1023,
    ) {
        let mut knob = KnobChannel::with_baseline(baseline, threshold);
        knob.accept(Some(reading));
        prop_assert!(!knob.accept(Some(reading)));
    }

    /// A change is reported iff the reading leaves the dead zone, and the
    /// baseline only ever holds accepted readings.
    #[test]
    fn dead_zone_acceptance_law(
        baseline in 0u16..=1023,
        threshold in 0u16..100,
        readings in prop::collection::vec(0u16..=1023, 1..64),
    ) {
        let mut knob = KnobChannel::with_baseline(baseline, threshold);
        for raw in readings {
            let before = knob.last_seen();
            let changed = knob.accept(Some(raw));
            prop_assert_eq!(changed, raw.abs_diff(before) > threshold);
            prop_assert_eq!(knob.last_seen(), if changed { raw } else { before });
        }
    }

    /// A pair reports a change iff at least one of its channels does.
    #[test]
    fn pair_is_or_of_channels(
        a in prop::option::of(0u16..=1023),
        b in prop::option::of(0u16..=1023),
        start in (0u16..=1023, 0u16..=1023),
    ) {
        let mut pair = KnobPair {
            a: KnobChannel::with_baseline(start.0, 20),
            b: KnobChannel::with_baseline(start.1, 20),
        };
        let mut a_alone = pair.a;
        let mut b_alone = pair.b;
        let expected = a_alone.accept(a) | b_alone.accept(b);
        prop_assert_eq!(pair.sample(a, b), expected);
        prop_assert_eq!(pair.a, a_alone);
        prop_assert_eq!(pair.b, b_alone);
    }

    /// Accepted changes are never closer together than the interval.
    #[test]
    fn debounce_respects_lockout(
        interval in 1u32..50,
        samples in prop::collection::vec((any::<bool>(), 0u32..20), 1..200),
    ) {
        let mut input = DebouncedEdge::new(ControlId::hardware(0), interval, true, 0);
        let mut now = 0u32;
        let mut last_accept: Option<u32> = None;
        for (level, step) in samples {
            now += step;
            let before = input.level();
            if input.update_level(Some(level), now) {
                prop_assert_ne!(before, input.level());
                prop_assert!(input.falling_edge() != input.rising_edge());
                if let Some(prev) = last_accept {
                    prop_assert!(now - prev >= interval);
                }
                last_accept = Some(now);
            } else {
                prop_assert_eq!(before, input.level());
                prop_assert!(input.edge().is_none());
            }
        }
    }
}

/// Baseline 500, threshold 20: drift to 515 is ignored, and crossing past
/// 520 yields exactly one change.
#[test]
fn knob_drift_then_turn() {
    let mut knob = KnobChannel::with_baseline(500, 20);
    let mut changes = 0;
    for raw in [503, 509, 515, 512, 515] {
        if knob.accept(Some(raw)) {
            changes += 1;
        }
    }
    assert_eq!(changes, 0);

    for raw in [540, 541, 539, 542] {
        if knob.accept(Some(raw)) {
            changes += 1;
        }
    }
    assert_eq!(changes, 1);
    assert_eq!(knob.last_seen(), 540);
}
