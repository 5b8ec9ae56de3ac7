//! Debounced edge detection for one digital input.
//!
//! [`DebouncedEdge`] samples a pin on every [`update`](DebouncedEdge::update)
//! and accepts a level change only when at least `interval_ms` have passed
//! since the previously accepted change. Contact bounce inside that window is
//! ignored. After an accepted change, exactly one of
//! [`falling_edge`](DebouncedEdge::falling_edge) /
//! [`rising_edge`](DebouncedEdge::rising_edge) reports `true` until the next
//! update.
//!
//! ```text
//! raw     ‾‾‾|_|‾|___________|‾|_|‾‾‾‾‾
//! stable  ‾‾‾|_______________|‾‾‾‾‾‾‾‾‾
//! edges      ^ falling       ^ rising
//! ```

use crate::{ControlId, PlatformController};

/// Direction of an accepted level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// High to low (button pressed, footswitch released).
    Falling,
    /// Low to high (button released, footswitch engaged).
    Rising,
}

/// Debounced view of one digital input.
#[derive(Debug, Clone)]
pub struct DebouncedEdge {
    id: ControlId,
    interval_ms: u32,
    stable: bool,
    last_change_ms: u32,
    edge: Option<Edge>,
}

impl DebouncedEdge {
    /// Creates a debouncer whose stable level starts at `initial_level`.
    ///
    /// `now_ms` starts the lockout window, so a change in the first
    /// `interval_ms` after construction is held back like any other bounce.
    pub fn new(id: ControlId, interval_ms: u32, initial_level: bool, now_ms: u32) -> Self {
        Self {
            id,
            interval_ms,
            stable: initial_level,
            last_change_ms: now_ms,
            edge: None,
        }
    }

    /// Creates a debouncer seeded from the input's current level.
    ///
    /// An input that reports no data starts high (idle level of a pull-up).
    pub fn from_platform<P: PlatformController + ?Sized>(
        id: ControlId,
        interval_ms: u32,
        platform: &mut P,
    ) -> Self {
        let level = platform.read_digital(id).unwrap_or(true);
        Self::new(id, interval_ms, level, platform.now_ms())
    }

    /// The input this debouncer samples.
    #[inline]
    pub fn id(&self) -> ControlId {
        self.id
    }

    /// Samples the input and updates the edge flags.
    ///
    /// Returns `true` if a level change was accepted.
    pub fn update<P: PlatformController + ?Sized>(&mut self, platform: &mut P) -> bool {
        let level = platform.read_digital(self.id);
        self.update_level(level, platform.now_ms())
    }

    /// Feeds one raw sample taken at `now_ms`.
    ///
    /// `None` (no data) clears the edge flags and leaves the stable level alone.
    pub fn update_level(&mut self, level: Option<bool>, now_ms: u32) -> bool {
        self.edge = None;
        let Some(level) = level else {
            return false;
        };
        if level == self.stable || now_ms.wrapping_sub(self.last_change_ms) < self.interval_ms {
            return false;
        }
        self.stable = level;
        self.last_change_ms = now_ms;
        self.edge = Some(if level { Edge::Rising } else { Edge::Falling });

        #[cfg(feature = "tracing")]
        tracing::trace!(control = self.id.raw(), edge = ?self.edge, "debounce: level accepted");

        true
    }

    /// Edge accepted by the last update, if any.
    #[inline]
    pub fn edge(&self) -> Option<Edge> {
        self.edge
    }

    /// `true` for the one update after a stable high-to-low change.
    #[inline]
    pub fn falling_edge(&self) -> bool {
        self.edge == Some(Edge::Falling)
    }

    /// `true` for the one update after a stable low-to-high change.
    #[inline]
    pub fn rising_edge(&self) -> bool {
        self.edge == Some(Edge::Rising)
    }

    /// Current debounced level (`true` = high).
    #[inline]
    pub fn level(&self) -> bool {
        self.stable
    }
}
