//! Scripted input source for hosts and tests.
//!
//! [`SimPlatform`] holds one level per digital control, one reading per knob
//! and a virtual millisecond clock. Nothing moves unless the caller moves it,
//! which makes control ticks fully reproducible.

use duostomp_platform::{ControlId, ControlType, PlatformController, RawRange};

use crate::controls::{CONTROL_COUNT, CONTROLS, ENGAGED_LEVEL, RELEASED_LEVEL, idle_level};

/// In-memory [`PlatformController`] with a virtual clock.
#[derive(Debug, Clone)]
pub struct SimPlatform {
    digital: [Option<bool>; CONTROL_COUNT],
    analog: [Option<u16>; CONTROL_COUNT],
    now_ms: u32,
    range: RawRange,
}

impl SimPlatform {
    /// Buttons released, stomps bypassed, knobs at 0, clock at 0.
    pub fn new() -> Self {
        Self::with_range(RawRange::ADC_10BIT)
    }

    /// Like [`new`](Self::new) with a custom analog domain.
    pub fn with_range(range: RawRange) -> Self {
        let mut digital = [None; CONTROL_COUNT];
        let mut analog = [None; CONTROL_COUNT];
        for (i, spec) in CONTROLS.iter().enumerate() {
            match spec.kind {
                ControlType::Knob => analog[i] = Some(range.min),
                ControlType::Button | ControlType::Footswitch => {
                    digital[i] = Some(idle_level(spec.kind));
                }
            }
        }
        Self {
            digital,
            analog,
            now_ms: 0,
            range,
        }
    }

    /// Drives a digital input to `level`. Unknown controls are ignored.
    pub fn set_level(&mut self, id: ControlId, level: bool) {
        if let Some(slot) = self.digital.get_mut(usize::from(id.index())) {
            *slot = Some(level);
        }
    }

    /// Holds a cycle button down.
    pub fn press(&mut self, id: ControlId) {
        self.set_level(id, !RELEASED_LEVEL);
    }

    /// Lets a cycle button go.
    pub fn release(&mut self, id: ControlId) {
        self.set_level(id, RELEASED_LEVEL);
    }

    /// Throws a stomp switch.
    pub fn set_stomp(&mut self, id: ControlId, engaged: bool) {
        self.set_level(id, if engaged { ENGAGED_LEVEL } else { !ENGAGED_LEVEL });
    }

    /// Turns a knob. The reading is clamped to the analog domain.
    pub fn set_knob(&mut self, id: ControlId, value: u16) {
        let value = value.clamp(self.range.min, self.range.max);
        if let Some(slot) = self.analog.get_mut(usize::from(id.index())) {
            *slot = Some(value);
        }
    }

    /// Makes a control report "no data" until it is set again.
    pub fn disconnect(&mut self, id: ControlId) {
        let i = usize::from(id.index());
        if let Some(slot) = self.digital.get_mut(i) {
            *slot = None;
        }
        if let Some(slot) = self.analog.get_mut(i) {
            *slot = None;
        }
    }

    /// Moves the virtual clock forward. The clock stops at `u32::MAX`
    /// instead of wrapping.
    pub fn advance(&mut self, ms: u32) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    /// Sets the virtual clock.
    pub fn set_now(&mut self, now_ms: u32) {
        self.now_ms = now_ms;
    }
}

impl Default for SimPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformController for SimPlatform {
    fn read_digital(&mut self, id: ControlId) -> Option<bool> {
        self.digital.get(usize::from(id.index())).copied().flatten()
    }

    fn read_analog(&mut self, id: ControlId) -> Option<u16> {
        self.analog.get(usize::from(id.index())).copied().flatten()
    }

    fn now_ms(&self) -> u32 {
        self.now_ms
    }

    fn analog_range(&self) -> RawRange {
        self.range
    }
}
