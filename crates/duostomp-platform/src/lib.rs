//! Duostomp Platform - input source abstraction for the pedal's control layer
//!
//! This crate sits between the raw hardware (GPIO, ADC) and the pedal's
//! state machine. It defines how controls are identified and read, and it
//! turns raw readings into the two kinds of events the control layer acts
//! on: stable digital edges and intentional knob movements.
//!
//! # Core Abstractions
//!
//! - [`ControlId`] - Identifier of a physical control
//! - [`ControlType`] - Knob, momentary button or latching footswitch
//! - [`PlatformController`] - Trait for the digital/analog input source
//! - [`DebouncedEdge`] - Stable falling/rising edge detector for one digital input
//! - [`KnobChannel`] / [`KnobPair`] - Dead-zone change detection for analog inputs
//!
//! # Readings That Are Not Available
//!
//! Every read returns an `Option`. `None` means "no data this tick": the
//! debouncer keeps its stable level, a knob keeps its baseline, and the
//! control tick carries on without retrying.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! duostomp-platform = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod dead_zone;
pub mod debounce;

pub use dead_zone::{DEFAULT_SENSITIVITY, KnobChannel, KnobPair};
pub use debounce::{DebouncedEdge, Edge};

// Re-export the raw reading domain for convenience
pub use duostomp_core::RawRange;

/// Identifier of a physical control.
///
/// The index is platform-defined: firmware maps it to a pin, the simulator
/// to an entry in its level table.
///
/// # Example
///
/// ```rust
/// use duostomp_platform::ControlId;
///
/// let stomp = ControlId::hardware(4);
/// assert_eq!(stomp.index(), 4);
/// assert_eq!(stomp, ControlId::from_raw(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u16);

impl ControlId {
    /// Creates a ControlId from a raw 16-bit value.
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Creates a hardware control ID.
    #[inline]
    pub const fn hardware(index: u8) -> Self {
        Self(index as u16)
    }

    /// Returns the raw 16-bit value.
    #[inline]
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// Returns the control index.
    #[inline]
    pub const fn index(&self) -> u8 {
        (self.0 & 0x00FF) as u8
    }
}

/// Physical control type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlType {
    /// Potentiometer read through the ADC.
    Knob,
    /// Momentary push button wired to a pull-up (pressed = low).
    Button,
    /// Latching stomp switch (engaged = high).
    Footswitch,
}

/// Trait for the platform's input source.
///
/// Implement this for the target: GPIO/ADC on the pedal, a scripted level
/// table on the host. All reads are synchronous and return immediately.
///
/// # Thread Safety
///
/// This trait does not require thread safety. The control tick is the only
/// caller.
///
/// # Example
///
/// ```rust
/// use duostomp_platform::{ControlId, PlatformController};
///
/// struct Bench {
///     levels: [bool; 2],
///     knob: u16,
///     now: u32,
/// }
///
/// impl PlatformController for Bench {
///     fn read_digital(&mut self, id: ControlId) -> Option<bool> {
///         self.levels.get(id.index() as usize).copied()
///     }
///
///     fn read_analog(&mut self, id: ControlId) -> Option<u16> {
///         (id.index() == 2).then_some(self.knob)
///     }
///
///     fn now_ms(&self) -> u32 {
///         self.now
///     }
/// }
/// ```
pub trait PlatformController {
    /// Reads the level of a digital input (`true` = high).
    ///
    /// Returns `None` if the control is unknown or has no data this tick.
    fn read_digital(&mut self, id: ControlId) -> Option<bool>;

    /// Reads an analog input as a raw integer within [`analog_range`](Self::analog_range).
    ///
    /// Returns `None` if the control is unknown or has no data this tick.
    fn read_analog(&mut self, id: ControlId) -> Option<u16>;

    /// Milliseconds since boot. Wraps at `u32::MAX`.
    fn now_ms(&self) -> u32;

    /// Raw domain of [`read_analog`](Self::read_analog).
    ///
    /// Default is a 10-bit ADC.
    fn analog_range(&self) -> RawRange {
        RawRange::ADC_10BIT
    }

    /// Updates the input state by reading from hardware.
    ///
    /// Called once at the start of each control tick. Default implementation
    /// does nothing (for sources that read on demand).
    fn poll(&mut self) {}
}
