//! Dead-zone change detection for analog knobs.
//!
//! ADC readings jitter by a few counts even when nobody touches the knob.
//! [`KnobChannel`] remembers the last accepted reading and reports a change
//! only when a new reading moves strictly more than `threshold` away from
//! it. The baseline moves only on acceptance, so slow drift never
//! accumulates into a change.

/// Default dead-zone threshold in raw ADC counts.
pub const DEFAULT_SENSITIVITY: u16 = 20;

/// One analog knob with a dead-zone baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnobChannel {
    last_seen: u16,
    threshold: u16,
}

impl KnobChannel {
    /// Creates a channel with baseline 0.
    pub const fn new(threshold: u16) -> Self {
        Self::with_baseline(0, threshold)
    }

    /// Creates a channel with an explicit baseline.
    pub const fn with_baseline(last_seen: u16, threshold: u16) -> Self {
        Self {
            last_seen,
            threshold,
        }
    }

    /// Offers a new reading.
    ///
    /// Returns `true` and moves the baseline iff `|reading - baseline| > threshold`.
    /// `None` (no data) is never a change.
    ///
    /// # Example
    ///
    /// ```rust
    /// use duostomp_platform::KnobChannel;
    ///
    /// let mut knob = KnobChannel::with_baseline(500, 20);
    /// assert!(!knob.accept(Some(515)));
    /// assert!(!knob.accept(Some(520)));
    /// assert!(knob.accept(Some(521)));
    /// assert_eq!(knob.last_seen(), 521);
    /// ```
    pub fn accept(&mut self, reading: Option<u16>) -> bool {
        match reading {
            Some(raw) if raw.abs_diff(self.last_seen) > self.threshold => {
                self.last_seen = raw;
                true
            }
            _ => false,
        }
    }

    /// Last accepted reading.
    #[inline]
    pub fn last_seen(&self) -> u16 {
        self.last_seen
    }

    /// Dead-zone half-width in raw counts.
    #[inline]
    pub fn threshold(&self) -> u16 {
        self.threshold
    }
}

impl Default for KnobChannel {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVITY)
    }
}

/// The two knobs of one effect slot (A = mix, B = parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KnobPair {
    /// Mix knob.
    pub a: KnobChannel,
    /// Parameter knob.
    pub b: KnobChannel,
}

impl KnobPair {
    /// Creates a pair with baselines at 0.
    pub const fn new(threshold: u16) -> Self {
        Self {
            a: KnobChannel::new(threshold),
            b: KnobChannel::new(threshold),
        }
    }

    /// Offers one reading to each knob.
    ///
    /// Both channels are evaluated every time, so both baselines stay current
    /// even when the first one already reported a change. Returns `true` if
    /// either changed.
    pub fn sample(&mut self, a: Option<u16>, b: Option<u16>) -> bool {
        let changed_a = self.a.accept(a);
        let changed_b = self.b.accept(b);
        changed_a | changed_b
    }

    /// Last accepted readings as `(a, b)`.
    #[inline]
    pub fn readings(&self) -> (u16, u16) {
        (self.a.last_seen(), self.b.last_seen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_inside_dead_zone() {
        let mut knob = KnobChannel::with_baseline(500, 20);
        for raw in 480..=520 {
            assert!(!knob.accept(Some(raw)), "raw {raw}");
        }
        assert_eq!(knob.last_seen(), 500);
    }

    #[test]
    fn test_exact_threshold_is_not_a_change() {
        let mut knob = KnobChannel::with_baseline(100, 20);
        assert!(!knob.accept(Some(120)));
        assert!(!knob.accept(Some(80)));
        assert!(knob.accept(Some(79)));
        assert_eq!(knob.last_seen(), 79);
    }

    #[test]
    fn test_baseline_moves_only_on_accept() {
        let mut knob = KnobChannel::with_baseline(500, 20);
        // Creep in steps inside the dead zone never accumulates
        for raw in [510, 515, 519, 520] {
            assert!(!knob.accept(Some(raw)));
        }
        assert!(knob.accept(Some(530)));
        assert!(!knob.accept(Some(545)));
        assert_eq!(knob.last_seen(), 530);
    }

    #[test]
    fn test_no_data() {
        let mut knob = KnobChannel::new(20);
        assert!(!knob.accept(None));
        assert_eq!(knob.last_seen(), 0);
    }

    #[test]
    fn test_zero_baseline_first_reading() {
        let mut knob = KnobChannel::default();
        assert_eq!(knob.threshold(), DEFAULT_SENSITIVITY);
        assert!(!knob.accept(Some(15)));
        assert!(knob.accept(Some(600)));
    }

    #[test]
    fn test_pair_updates_both_baselines() {
        let mut pair = KnobPair::new(20);
        assert!(pair.sample(Some(300), Some(700)));
        assert_eq!(pair.readings(), (300, 700));
    }

    #[test]
    fn test_pair_either_changes() {
        let mut pair = KnobPair::new(20);
        pair.sample(Some(300), Some(700));
        assert!(!pair.sample(Some(305), Some(695)));
        assert!(pair.sample(Some(305), Some(800)));
        assert_eq!(pair.readings(), (300, 800));
        assert!(!pair.sample(None, None));
    }
}
