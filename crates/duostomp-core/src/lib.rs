//! Duostomp Core - value mapping and effect-unit contract for a dual-slot pedal
//!
//! This crate holds the allocation-free building blocks the pedal's control
//! layer uses to turn raw control readings into effect parameters.
//!
//! # Core Abstractions
//!
//! ## Effect Unit Contract
//!
//! - [`ParameterInfo`] - Index-based parameter access implemented by every effect unit
//! - [`ParamDescriptor`] / [`ParamUnit`] - Parameter metadata for clamping and display
//! - [`UnitId`] - The parameter-bearing units of the pedal's audio graph
//! - [`ParamBank`] - Parameter store for units whose DSP lives elsewhere
//!
//! ## Value Mapping
//!
//! - [`LinearMap`] / [`map_range`] - Linear remap of raw readings, exact at the endpoints
//! - [`DeviationTable`] - Quantizer from knob bucket to pitch-shift speed multiplier
//!
//! ## Mixing and Shaping
//!
//! - [`MixGains`] - Bypass / effect channel gains for a slot mixer
//! - [`WaveshapeCurve`] - Square transfer curve handed to the waveshaper at boot
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! duostomp-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod deviation;
pub mod math;
pub mod mix;
pub mod param_bank;
pub mod param_info;
pub mod units;
pub mod waveshape;

// Re-export main types at crate root
pub use deviation::{DEFAULT_DEVIATIONS, DEVIATION_COUNT, DeviationTable};
pub use math::{LinearMap, RawRange, ValueRange, map_range, normalize_reading};
pub use mix::{EffectChannel, MIXER_CHANNELS, MixGains};
pub use param_bank::ParamBank;
pub use param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
pub use units::{MAX_UNIT_PARAMS, UnitId};
pub use waveshape::{DEFAULT_SHAPE_LEVEL, WAVESHAPE_LENGTH, WaveshapeCurve};
