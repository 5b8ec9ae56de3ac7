//! Configuration files for the duostomp pedal.
//!
//! The control core takes every tuning constant from a
//! [`duostomp_pedal::Settings`] value. This crate stores those values as
//! TOML and checks them before they reach the pedal.
//!
//! # Features
//!
//! - **Config files**: Load and save named [`PedalConfig`]s, with missing keys
//!   falling back to the stock values
//! - **Validation**: Reject ranges that are inverted or fall outside the
//!   parameter range of the effect unit they drive
//!
//! # Example
//!
//! ```rust,no_run
//! use duostomp_config::PedalConfig;
//!
//! let config = PedalConfig::load_validated("dark-room.toml").unwrap();
//! println!("{}: sensitivity {}", config.name, config.settings.controls.sensitivity);
//!
//! let mut tweaked = config.clone();
//! tweaked.settings.controls.sensitivity = 12;
//! tweaked.save("configs/tweaked.toml").unwrap();
//! ```

mod config;
mod error;

/// Settings validation.
pub mod validation;

pub use config::PedalConfig;
pub use error::ConfigError;
pub use validation::{ValidationError, ValidationResult, validate_settings};

/// Re-export of the settings types a config carries.
pub use duostomp_pedal::Settings;
