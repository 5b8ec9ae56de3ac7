//! Control tick pacing.
//!
//! Human input is deliberately undersampled so the audio graph keeps the CPU.
//! The main loop calls [`ControlCadence::step`] once per iteration: the first
//! `control_check` calls ask the loop to wait `loop_delay_ms`, the next one
//! asks it to run a control tick immediately, and the count starts over.
//!
//! ```text
//! step:  W W W ... W T W W W ... W T
//!        └ control_check ┘
//! ```

/// What the main loop should do this iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceStep {
    /// Run one control tick now.
    Tick,
    /// Sleep for the given number of milliseconds.
    Wait(u32),
}

/// Counted-delay scheduler for control ticks.
#[derive(Debug, Clone)]
pub struct ControlCadence {
    control_check: u32,
    delay_ms: u32,
    counter: u32,
}

impl ControlCadence {
    /// Creates a cadence of `control_check` waits of `delay_ms` per tick.
    pub fn new(control_check: u32, delay_ms: u32) -> Self {
        Self {
            control_check,
            delay_ms,
            counter: 0,
        }
    }

    /// Advances one main-loop iteration.
    pub fn step(&mut self) -> CadenceStep {
        if self.counter < self.control_check {
            self.counter += 1;
            CadenceStep::Wait(self.delay_ms)
        } else {
            self.counter = 0;
            CadenceStep::Tick
        }
    }
}
