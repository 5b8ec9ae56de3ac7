//! Duostomp Pedal - control core of a dual-slot effect pedal
//!
//! Turns button, stomp switch and knob input into slot selection state,
//! crossfade mixer gains and effect parameter updates. The audio graph is an
//! external collaborator reached through [`EffectRack`].
//!
//! # Signal Chain
//!
//! ```text
//! in ─► [ slot 1: Sqr | PchDn | PchUp ] ─► [ slot 2: Revrb | LFO ] ─► LPF ─► HPF ─► out
//! ```
//!
//! # Core Abstractions
//!
//! ## State
//!
//! - [`Slot1State`] / [`Slot2State`] - Activation, variant and knob target per slot
//! - [`PedalState`] - Every piece of mutable control state, owned by the tick
//! - [`Settings`] - Tuning constants with stock-pedal defaults
//!
//! ## Tick
//!
//! - [`Pedal`] - Boot-time setup and the control tick
//! - [`ControlCadence`] - Counted-delay pacing of control ticks
//! - [`Dispatcher`] - Knob-to-parameter mapping
//! - [`slot1_gains`] / [`slot2_gains`] - Mixer crossfade vectors
//!
//! ## Collaborators
//!
//! - [`EffectRack`] / [`BankRack`] - Audio graph parameter contract and an in-memory rack
//! - [`DisplaySink`] / [`DisplayFrame`] - 16x2 character display
//! - [`TelemetrySink`] / [`TickSnapshot`] - Optional per-tick diagnostics
//! - [`SimPlatform`] - Scripted input source with a virtual clock
//!
//! # Features
//!
//! - `std` (default): standard library support
//! - `tracing`: debug logs of state transitions and parameter writes
//! - `serde`: (de)serialization of [`Settings`]

#![cfg_attr(not(feature = "std"), no_std)]

pub mod cadence;
pub mod controls;
pub mod crossfade;
pub mod dispatch;
pub mod display;
pub mod pedal;
pub mod rack;
pub mod settings;
pub mod sim;
pub mod slot;
pub mod telemetry;

pub use cadence::{CadenceStep, ControlCadence};
pub use crossfade::{slot1_gains, slot2_gains};
pub use dispatch::{DispatchedValues, Dispatcher};
pub use display::{DISPLAY_COLS, DISPLAY_ROWS, DisplayFrame, DisplaySink, GLYPH_ACTIVE};
pub use pedal::{Pedal, PedalState};
pub use rack::{BankRack, EffectRack, PeakTap};
pub use settings::{
    AmbienceSettings, ControlSettings, DriveSettings, FilterSettings, ModulationSettings,
    PitchSettings, Settings,
};
pub use sim::SimPlatform;
pub use slot::{
    EffectSlot, KnobTarget, Slot1Edges, Slot1State, Slot1Variant, Slot2Edges, Slot2State,
    Slot2Variant, Variant,
};
pub use telemetry::{TelemetrySink, TickSnapshot};
