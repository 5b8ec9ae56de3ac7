//! The audio graph as seen from the control core.
//!
//! The DSP units run elsewhere (the audio library's interrupt-driven graph).
//! The control core only reaches them through [`EffectRack`]: per-unit
//! parameter setters, a one-shot waveshape upload, and optional peak taps.
//! [`BankRack`] implements the trait over [`ParamBank`]s, which is what the
//! host simulator and the tests drive.

use duostomp_core::{ParamBank, ParameterInfo, UnitId, WaveshapeCurve};

/// Peak analyzers tapped off the audio graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeakTap {
    /// Instrument input.
    Input,
    /// Granular pitch shifter output.
    Granular,
    /// Waveshaper output.
    Shaped,
}

impl PeakTap {
    /// Every tap, in storage order.
    pub const ALL: [PeakTap; 3] = [PeakTap::Input, PeakTap::Granular, PeakTap::Shaped];

    /// Dense storage index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short name for telemetry.
    pub const fn name(self) -> &'static str {
        match self {
            PeakTap::Input => "in",
            PeakTap::Granular => "gran",
            PeakTap::Shaped => "shp",
        }
    }
}

/// Parameter-setting contract of the audio graph.
///
/// Setters are non-blocking and take effect on the next audio block. Writes to
/// distinct units are order-independent.
pub trait EffectRack {
    /// Parameter access for one unit.
    fn unit(&self, unit: UnitId) -> &dyn ParameterInfo;

    /// Mutable parameter access for one unit.
    fn unit_mut(&mut self, unit: UnitId) -> &mut dyn ParameterInfo;

    /// Hands the waveshaper its transfer curve.
    fn load_waveshape(&mut self, curve: &WaveshapeCurve);

    /// Latest peak level of a tap.
    ///
    /// Returns `None` when the analyzer has no fresh data. Default
    /// implementation has no analyzers.
    fn peak(&mut self, tap: PeakTap) -> Option<f32> {
        let _ = tap;
        None
    }

    /// Writes one parameter.
    fn set(&mut self, unit: UnitId, index: usize, value: f32) {
        #[cfg(feature = "tracing")]
        tracing::trace!("rack: {}[{index}] = {value}", unit.name());

        self.unit_mut(unit).set_param(index, value);
    }

    /// Reads one parameter.
    fn get(&self, unit: UnitId, index: usize) -> f32 {
        self.unit(unit).get_param(index)
    }
}

/// In-memory rack: one [`ParamBank`] per unit.
///
/// Peaks are consumed on read, so a tap reports `None` until
/// [`set_peak`](Self::set_peak) feeds it again.
#[derive(Debug, Clone)]
pub struct BankRack {
    banks: [ParamBank; UnitId::COUNT],
    waveshape: Option<WaveshapeCurve>,
    peaks: [Option<f32>; PeakTap::ALL.len()],
}

impl BankRack {
    /// Creates a rack with every unit at its descriptor defaults.
    pub fn new() -> Self {
        Self {
            banks: UnitId::ALL.map(ParamBank::new),
            waveshape: None,
            peaks: [None; PeakTap::ALL.len()],
        }
    }

    /// Parameter bank of one unit.
    #[inline]
    pub fn bank(&self, unit: UnitId) -> &ParamBank {
        &self.banks[unit.index()]
    }

    /// Curve handed to the waveshaper, if any.
    pub fn waveshape(&self) -> Option<&WaveshapeCurve> {
        self.waveshape.as_ref()
    }

    /// Feeds a peak reading for the next [`peak`](EffectRack::peak) call.
    pub fn set_peak(&mut self, tap: PeakTap, level: Option<f32>) {
        self.peaks[tap.index()] = level;
    }

    /// Total parameter writes across all units.
    pub fn total_writes(&self) -> u32 {
        self.banks.iter().map(ParamBank::writes).sum()
    }

    /// Resets every unit's write counter.
    pub fn clear_writes(&mut self) {
        for bank in &mut self.banks {
            bank.clear_writes();
        }
    }
}

impl Default for BankRack {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectRack for BankRack {
    fn unit(&self, unit: UnitId) -> &dyn ParameterInfo {
        &self.banks[unit.index()]
    }

    fn unit_mut(&mut self, unit: UnitId) -> &mut dyn ParameterInfo {
        &mut self.banks[unit.index()]
    }

    fn load_waveshape(&mut self, curve: &WaveshapeCurve) {
        self.waveshape = Some(curve.clone());
    }

    fn peak(&mut self, tap: PeakTap) -> Option<f32> {
        self.peaks[tap.index()].take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duostomp_core::units::{mixer, reverb};

    #[test]
    fn test_banks_match_units() {
        let rack = BankRack::new();
        for unit in UnitId::ALL {
            assert_eq!(rack.bank(unit).unit(), unit);
        }
        assert_eq!(rack.total_writes(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut rack = BankRack::new();
        rack.set(UnitId::Reverb, reverb::ROOM_SIZE, 0.8);
        assert_eq!(rack.get(UnitId::Reverb, reverb::ROOM_SIZE), 0.8);
        assert_eq!(rack.bank(UnitId::Reverb).writes(), 1);

        rack.set(UnitId::Slot2Mixer, mixer::BYPASS, 2.0);
        assert_eq!(rack.get(UnitId::Slot2Mixer, mixer::BYPASS), 1.0);
        assert_eq!(rack.total_writes(), 2);

        rack.clear_writes();
        assert_eq!(rack.total_writes(), 0);
    }

    #[test]
    fn test_peaks_are_consumed() {
        let mut rack = BankRack::new();
        assert_eq!(rack.peak(PeakTap::Input), None);
        rack.set_peak(PeakTap::Input, Some(0.4));
        assert_eq!(rack.peak(PeakTap::Input), Some(0.4));
        assert_eq!(rack.peak(PeakTap::Input), None);
        assert_eq!(rack.peak(PeakTap::Shaped), None);
    }

    #[test]
    fn test_waveshape_upload() {
        let mut rack = BankRack::new();
        assert!(rack.waveshape().is_none());
        rack.load_waveshape(&WaveshapeCurve::default());
        assert_eq!(rack.waveshape(), Some(&WaveshapeCurve::default()));
    }
}
