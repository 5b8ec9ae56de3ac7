//! Effect slot state machines.
//!
//! Two slots sit in series. Each has an activation flag driven by its stomp
//! switch and a selected variant driven by its cycle buttons. Variant sets are
//! closed enums, so an out-of-range selection cannot be represented.
//!
//! | Slot | Variants | Buttons |
//! |------|----------|---------|
//! | 1 | Shaped, PitchDown, PitchUp | forward cycle, knob-target toggle |
//! | 2 | Ambience, Modulation | forward cycle, backward cycle |
//!
//! Transitions are applied once per control tick, in the order
//! cycle/toggle edges first, stomp edges second.

use duostomp_platform::Edge;

/// A closed, cyclic set of effect variants for one slot.
pub trait Variant: Copy + Eq + core::fmt::Debug + 'static {
    /// Every variant in cycle order. The first entry is the boot variant.
    const ALL: &'static [Self];

    /// Position in [`ALL`](Self::ALL).
    fn index(self) -> usize;

    /// Five-character display name.
    fn label(self) -> &'static str;

    /// Seven-character label describing what the slot's knobs A and B do.
    fn knob_label(self) -> &'static str;

    /// Stable lowercase name for logs, telemetry and scenario files.
    fn name(self) -> &'static str;

    /// Next variant, wrapping after the last.
    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous variant, wrapping before the first.
    fn prev(self) -> Self {
        let n = Self::ALL.len();
        Self::ALL[(self.index() + n - 1) % n]
    }
}

/// Slot 1 effect variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Slot1Variant {
    /// Square-wave waveshaper, mixed on channel A.
    #[default]
    Shaped,
    /// Granular pitch shift using the deviation ratio directly.
    PitchDown,
    /// Granular pitch shift using the reciprocal of the deviation ratio.
    PitchUp,
}

impl Variant for Slot1Variant {
    const ALL: &'static [Self] = &[Self::Shaped, Self::PitchDown, Self::PitchUp];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            Self::Shaped => "Sqr",
            Self::PitchDown => "PchDn",
            Self::PitchUp => "PchUp",
        }
    }

    fn knob_label(self) -> &'static str {
        match self {
            Self::Shaped => "Mix    ",
            Self::PitchDown | Self::PitchUp => "Mix Pch",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Shaped => "shaped",
            Self::PitchDown => "pitch-down",
            Self::PitchUp => "pitch-up",
        }
    }
}

impl Slot1Variant {
    /// `true` for the two variants sharing the granular path.
    #[inline]
    pub fn is_pitch(self) -> bool {
        matches!(self, Self::PitchDown | Self::PitchUp)
    }
}

/// Slot 2 effect variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Slot2Variant {
    /// Reverb, crossfaded against bypass on channel A.
    #[default]
    Ambience,
    /// LFO-swept filter, fully replacing bypass on channel B.
    Modulation,
}

impl Variant for Slot2Variant {
    const ALL: &'static [Self] = &[Self::Ambience, Self::Modulation];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            Self::Ambience => "Revrb",
            Self::Modulation => "LFO",
        }
    }

    fn knob_label(self) -> &'static str {
        match self {
            Self::Ambience => "Mix Sze",
            Self::Modulation => "Rng Spd",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Ambience => "ambience",
            Self::Modulation => "modulation",
        }
    }
}

/// Activation flag and selected variant of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSlot<V: Variant> {
    /// Whether the slot's effect path is mixed in at all.
    pub active: bool,
    /// Selected variant.
    pub variant: V,
}

impl<V: Variant> EffectSlot<V> {
    /// Creates a slot on the boot variant.
    pub fn new(active: bool) -> Self {
        Self {
            active,
            variant: V::ALL[0],
        }
    }

    /// Advances to the next variant.
    pub fn cycle_forward(&mut self) {
        self.variant = self.variant.next();
    }

    /// Steps back to the previous variant.
    pub fn cycle_backward(&mut self) {
        self.variant = self.variant.prev();
    }

    /// Applies a debounced stomp edge: falling bypasses, rising engages.
    ///
    /// Returns `true` if the activation flag changed.
    pub fn apply_stomp(&mut self, edge: Option<Edge>) -> bool {
        let active = match edge {
            Some(Edge::Falling) => false,
            Some(Edge::Rising) => true,
            None => return false,
        };
        let changed = self.active != active;
        self.active = active;
        changed
    }
}

impl<V: Variant> Default for EffectSlot<V> {
    fn default() -> Self {
        Self::new(false)
    }
}

/// What slot 1's knobs drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KnobTarget {
    /// Knob A sets the mix, knob B the variant's parameter.
    #[default]
    Effect,
    /// Knob A sets the low-pass cutoff, knob B the high-pass cutoff.
    Filters,
}

impl KnobTarget {
    /// The other target.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Self::Effect => Self::Filters,
            Self::Filters => Self::Effect,
        }
    }

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Effect => "effect",
            Self::Filters => "filters",
        }
    }
}

/// Debounced edges relevant to slot 1 for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot1Edges {
    /// Forward-cycle button pressed.
    pub cycle: bool,
    /// Knob-target toggle button pressed.
    pub toggle_target: bool,
    /// Stomp switch edge.
    pub stomp: Option<Edge>,
}

/// Debounced edges relevant to slot 2 for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot2Edges {
    /// Forward-cycle button pressed.
    pub forward: bool,
    /// Backward-cycle button pressed.
    pub backward: bool,
    /// Stomp switch edge.
    pub stomp: Option<Edge>,
}

/// Slot 1: the effect slot plus its knob-target mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot1State {
    /// Activation and variant.
    pub slot: EffectSlot<Slot1Variant>,
    /// What the knobs drive.
    pub knob_target: KnobTarget,
}

impl Slot1State {
    /// Creates slot 1 on the boot variant with knobs driving the effect.
    pub fn new(active: bool) -> Self {
        Self {
            slot: EffectSlot::new(active),
            knob_target: KnobTarget::Effect,
        }
    }

    /// Applies one tick's edges.
    ///
    /// A forward-cycle press shadows a toggle press in the same tick.
    pub fn apply(&mut self, edges: Slot1Edges) {
        if edges.cycle {
            self.slot.cycle_forward();

            #[cfg(feature = "tracing")]
            tracing::debug!("slot1: variant -> {}", self.slot.variant.name());
        } else if edges.toggle_target {
            self.knob_target = self.knob_target.toggled();

            #[cfg(feature = "tracing")]
            tracing::debug!("slot1: knobs -> {}", self.knob_target.name());
        }

        if self.slot.apply_stomp(edges.stomp) {
            #[cfg(feature = "tracing")]
            tracing::debug!("slot1: active = {}", self.slot.active);
        }
    }

    /// `true` when the knobs drive the output filter pair.
    #[inline]
    pub fn targets_filters(&self) -> bool {
        self.knob_target == KnobTarget::Filters
    }

    /// Knob label shown for slot 1.
    pub fn knob_label(&self) -> &'static str {
        match self.knob_target {
            KnobTarget::Effect => self.slot.variant.knob_label(),
            KnobTarget::Filters => "LPF HPF",
        }
    }
}

/// Slot 2 state.
pub type Slot2State = EffectSlot<Slot2Variant>;

impl EffectSlot<Slot2Variant> {
    /// Applies one tick's edges.
    ///
    /// A forward press shadows a backward press in the same tick.
    pub fn apply(&mut self, edges: Slot2Edges) {
        if edges.forward {
            self.cycle_forward();

            #[cfg(feature = "tracing")]
            tracing::debug!("slot2: variant -> {}", self.variant.name());
        } else if edges.backward {
            self.cycle_backward();

            #[cfg(feature = "tracing")]
            tracing::debug!("slot2: variant -> {}", self.variant.name());
        }

        if self.apply_stomp(edges.stomp) {
            #[cfg(feature = "tracing")]
            tracing::debug!("slot2: active = {}", self.active);
        }
    }
}
