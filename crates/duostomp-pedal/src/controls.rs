//! Physical control layout of the pedal.
//!
//! Four momentary cycle buttons (pull-up, pressed = low), two latching stomp
//! switches (engaged = high) and four knobs, two per slot. Knob A of a slot
//! is its mix knob, knob B its parameter knob.

use duostomp_platform::{ControlId, ControlType};

/// Slot 1 forward-cycle button.
pub const CYCLE_1F: ControlId = ControlId::hardware(0);
/// Slot 1 knob-target toggle button.
pub const CYCLE_1B: ControlId = ControlId::hardware(1);
/// Slot 2 forward-cycle button.
pub const CYCLE_2F: ControlId = ControlId::hardware(2);
/// Slot 2 backward-cycle button.
pub const CYCLE_2B: ControlId = ControlId::hardware(3);
/// Slot 1 stomp switch.
pub const STOMP_1: ControlId = ControlId::hardware(4);
/// Slot 2 stomp switch.
pub const STOMP_2: ControlId = ControlId::hardware(5);
/// Slot 1 mix knob.
pub const KNOB_1A: ControlId = ControlId::hardware(6);
/// Slot 1 parameter knob.
pub const KNOB_1B: ControlId = ControlId::hardware(7);
/// Slot 2 mix knob.
pub const KNOB_2A: ControlId = ControlId::hardware(8);
/// Slot 2 parameter knob.
pub const KNOB_2B: ControlId = ControlId::hardware(9);

/// Number of physical controls.
pub const CONTROL_COUNT: usize = 10;

/// Level a stomp switch reads when its slot is engaged.
pub const ENGAGED_LEVEL: bool = true;

/// Level a cycle button reads when nobody presses it.
pub const RELEASED_LEVEL: bool = true;

/// One entry of the control layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSpec {
    /// Control identifier.
    pub id: ControlId,
    /// Physical control type.
    pub kind: ControlType,
    /// Short kebab-case name used by scenario files and logs.
    pub name: &'static str,
}

/// Every control, ordered by index.
#[rustfmt::skip]
pub const CONTROLS: [ControlSpec; CONTROL_COUNT] = [
    ControlSpec { id: CYCLE_1F, kind: ControlType::Button, name: "cycle-1f" },
    ControlSpec { id: CYCLE_1B, kind: ControlType::Button, name: "cycle-1b" },
    ControlSpec { id: CYCLE_2F, kind: ControlType::Button, name: "cycle-2f" },
    ControlSpec { id: CYCLE_2B, kind: ControlType::Button, name: "cycle-2b" },
    ControlSpec { id: STOMP_1, kind: ControlType::Footswitch, name: "stomp-1" },
    ControlSpec { id: STOMP_2, kind: ControlType::Footswitch, name: "stomp-2" },
    ControlSpec { id: KNOB_1A, kind: ControlType::Knob, name: "1a" },
    ControlSpec { id: KNOB_1B, kind: ControlType::Knob, name: "1b" },
    ControlSpec { id: KNOB_2A, kind: ControlType::Knob, name: "2a" },
    ControlSpec { id: KNOB_2B, kind: ControlType::Knob, name: "2b" },
];

/// Looks up a control by its layout name.
pub fn find_control(name: &str) -> Option<ControlSpec> {
    CONTROLS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
        .copied()
}

/// Idle level of a digital control: released for buttons, bypassed for stomps.
pub const fn idle_level(kind: ControlType) -> bool {
    match kind {
        ControlType::Footswitch => !ENGAGED_LEVEL,
        ControlType::Button | ControlType::Knob => RELEASED_LEVEL,
    }
}
