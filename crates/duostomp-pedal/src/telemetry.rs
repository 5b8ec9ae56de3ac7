//! Per-tick diagnostic snapshot.
//!
//! The snapshot is write-only from the core's point of view: it is built at
//! the end of every control tick and handed to a [`TelemetrySink`], which may
//! print it, log it or drop it.

use core::fmt;

use crate::dispatch::DispatchedValues;
use crate::rack::PeakTap;
use crate::slot::{KnobTarget, Slot1Variant, Slot2Variant, Variant};

/// Full control state after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSnapshot {
    /// Tick counter since boot.
    pub tick: u32,
    /// Platform clock at the tick, in milliseconds.
    pub now_ms: u32,
    /// Slot 1 activation.
    pub slot1_active: bool,
    /// Slot 1 variant.
    pub slot1_variant: Slot1Variant,
    /// What slot 1's knobs drive.
    pub knob_target: KnobTarget,
    /// Slot 2 activation.
    pub slot2_active: bool,
    /// Slot 2 variant.
    pub slot2_variant: Slot2Variant,
    /// Latest raw readings of knobs 1A, 1B, 2A, 2B; `None` until sampled.
    pub knobs: [Option<u16>; 4],
    /// Held wet level of slot 1.
    pub wet1: f32,
    /// Held wet level of slot 2.
    pub wet2: f32,
    /// Last dispatched parameter values.
    pub mapped: DispatchedValues,
    /// Peak levels per [`PeakTap`]; `None` when the analyzer had no fresh data.
    pub peaks: [Option<f32>; PeakTap::ALL.len()],
}

impl TickSnapshot {
    /// Peak level of one tap.
    #[inline]
    pub fn peak(&self, tap: PeakTap) -> Option<f32> {
        self.peaks[tap.index()]
    }
}

struct Opt<T>(Option<T>);

impl fmt::Display for Opt<f32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.3}"),
            None => f.write_str("-"),
        }
    }
}

impl fmt::Display for Opt<u16> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("-"),
        }
    }
}

fn on_off(active: bool) -> &'static str {
    if active { "on" } else { "off" }
}

impl fmt::Display for TickSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick={} t={}ms s1={} {} knobs={} s2={} {}",
            self.tick,
            self.now_ms,
            on_off(self.slot1_active),
            self.slot1_variant.name(),
            self.knob_target.name(),
            on_off(self.slot2_active),
            self.slot2_variant.name(),
        )?;
        let [k1a, k1b, k2a, k2b] = self.knobs;
        write!(
            f,
            " raw={}|{}|{}|{} wet={:.3}|{:.3}",
            Opt(k1a),
            Opt(k1b),
            Opt(k2a),
            Opt(k2b),
            self.wet1,
            self.wet2,
        )?;
        let m = &self.mapped;
        write!(
            f,
            " lpf={} hpf={} speed={} room={} depth={} rate={}",
            Opt(m.low_pass),
            Opt(m.high_pass),
            Opt(m.speed),
            Opt(m.room_size),
            Opt(m.depth),
            Opt(m.rate),
        )?;
        f.write_str(" peak=")?;
        for (i, tap) in PeakTap::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", tap.name(), Opt(self.peak(*tap)))?;
        }
        Ok(())
    }
}

/// Receives one snapshot per control tick.
pub trait TelemetrySink {
    /// Records a snapshot.
    fn record(&mut self, snapshot: &TickSnapshot);
}

impl TelemetrySink for () {
    fn record(&mut self, _snapshot: &TickSnapshot) {}
}
