//! Scenario file format for the simulator.
//!
//! A scenario sets the stomp and knob positions the pedal boots with, then
//! lists timed actions against the virtual clock.
//!
//! ```toml
//! name = "demo"
//! duration_ms = 6000
//!
//! [boot]
//! stomp_2 = true
//! knobs = { 1a = 700, 2b = 400 }
//!
//! [[events]]
//! at_ms = 600
//! action = { press = "cycle-2f" }
//!
//! [[events]]
//! at_ms = 1500
//! action = { stomp = { slot = 1, engaged = true } }
//!
//! [[events]]
//! at_ms = 2400
//! action = { knob = { knob = "1b", value = 900 } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use duostomp_pedal::SimPlatform;
use duostomp_pedal::controls::{STOMP_1, STOMP_2, find_control};
use duostomp_platform::{ControlId, ControlType};
use serde::Deserialize;

/// How long a `press` holds the button down unless the scenario says otherwise.
pub const DEFAULT_HOLD_MS: u32 = 500;

/// Time simulated after the last event when no duration is given.
pub const DEFAULT_TAIL_MS: u32 = 1000;

/// Longest run the simulator accepts: one day of virtual time.
pub const MAX_DURATION_MS: u32 = 24 * 60 * 60 * 1000;

/// Parsed scenario file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Total simulated time.
    #[serde(default)]
    pub duration_ms: Option<u32>,
    /// How long each `press` keeps its button down.
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u32,
    /// Control positions at power-up.
    #[serde(default)]
    pub boot: BootLevels,
    /// Timed actions.
    #[serde(default)]
    pub events: Vec<Event>,
}

fn default_hold_ms() -> u32 {
    DEFAULT_HOLD_MS
}

/// Control positions at power-up.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootLevels {
    /// Slot 1 stomp engaged.
    #[serde(default)]
    pub stomp_1: bool,
    /// Slot 2 stomp engaged.
    #[serde(default)]
    pub stomp_2: bool,
    /// Knob readings by knob name (`1a`, `1b`, `2a`, `2b`).
    #[serde(default)]
    pub knobs: BTreeMap<String, u16>,
}

/// One timed action.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Event {
    /// Virtual time of the action.
    pub at_ms: u32,
    /// What happens.
    pub action: Action,
}

/// Action a scenario event performs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Press and later release a cycle button.
    Press(String),
    /// Engage or bypass a slot's stomp switch.
    Stomp {
        /// Slot number, 1 or 2.
        slot: u8,
        /// New switch position.
        engaged: bool,
    },
    /// Move a knob.
    Knob {
        /// Knob name.
        knob: String,
        /// Raw reading.
        value: u16,
    },
}

/// A concrete change to the simulated controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlChange {
    /// Button goes down.
    Press(ControlId),
    /// Button comes back up.
    Release(ControlId),
    /// Stomp switch thrown.
    Stomp(ControlId, bool),
    /// Knob moved.
    Knob(ControlId, u16),
}

impl ControlChange {
    /// Applies the change to the simulated controls.
    pub fn apply(self, sim: &mut SimPlatform) {
        match self {
            ControlChange::Press(id) => sim.press(id),
            ControlChange::Release(id) => sim.release(id),
            ControlChange::Stomp(id, engaged) => sim.set_stomp(id, engaged),
            ControlChange::Knob(id, value) => sim.set_knob(id, value),
        }
    }
}

/// A scenario resolved to control identifiers and sorted by time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Display name.
    pub name: String,
    /// Changes applied before boot.
    pub boot: Vec<ControlChange>,
    /// Timed changes, in time order.
    pub steps: Vec<(u32, ControlChange)>,
    /// Virtual time at which the simulation stops.
    pub end_ms: u32,
}

impl Scenario {
    /// Parses a scenario from TOML.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Loads a scenario file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario '{}'", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("failed to parse scenario '{}'", path.display()))
    }

    /// Resolves control names and expands presses into press/release pairs.
    pub fn resolve(&self) -> anyhow::Result<Script> {
        let mut boot = vec![
            ControlChange::Stomp(STOMP_1, self.boot.stomp_1),
            ControlChange::Stomp(STOMP_2, self.boot.stomp_2),
        ];
        for (name, &value) in &self.boot.knobs {
            boot.push(ControlChange::Knob(control(name, ControlType::Knob)?, value));
        }

        let mut steps = Vec::with_capacity(self.events.len() + 1);
        for event in &self.events {
            let at = event.at_ms;
            match &event.action {
                Action::Press(name) => {
                    let id = control(name, ControlType::Button)?;
                    steps.push((at, ControlChange::Press(id)));
                    steps.push((at.saturating_add(self.hold_ms), ControlChange::Release(id)));
                }
                Action::Stomp { slot, engaged } => {
                    let id = match slot {
                        1 => STOMP_1,
                        2 => STOMP_2,
                        other => bail!("event at {at} ms: no slot {other}, expected 1 or 2"),
                    };
                    steps.push((at, ControlChange::Stomp(id, *engaged)));
                }
                Action::Knob { knob, value } => {
                    let id = control(knob, ControlType::Knob)?;
                    steps.push((at, ControlChange::Knob(id, *value)));
                }
            }
        }
        // Stable, so same-time events keep file order
        steps.sort_by_key(|&(at, _)| at);

        let last = steps.last().map_or(0, |&(at, _)| at);
        let end_ms = self
            .duration_ms
            .unwrap_or_else(|| last.saturating_add(DEFAULT_TAIL_MS));
        if end_ms > MAX_DURATION_MS {
            bail!("scenario runs for {end_ms} ms, the limit is {MAX_DURATION_MS} ms");
        }

        Ok(Script {
            name: self.name.clone().unwrap_or_else(|| "unnamed".to_string()),
            boot,
            steps,
            end_ms,
        })
    }
}

/// Looks up a control by name and checks its kind.
fn control(name: &str, kind: ControlType) -> anyhow::Result<ControlId> {
    let Some(spec) = find_control(name) else {
        bail!("unknown control '{name}'");
    };
    if spec.kind != kind {
        bail!("control '{name}' is a {:?}, expected a {kind:?}", spec.kind);
    }
    Ok(spec.id)
}
