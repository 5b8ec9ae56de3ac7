//! Fixed-size parameter store for an effect unit.
//!
//! [`ParamBank`] holds the current values of one [`UnitId`]'s parameters
//! and implements [`ParameterInfo`] over the unit's descriptor table. It is
//! the stand-in for units whose DSP runs elsewhere: the host simulator and
//! the test rack store parameter writes in banks, and firmware can use a
//! bank as the staging area it copies into the audio library.

use crate::param_info::{ParamDescriptor, ParameterInfo};
use crate::units::{MAX_UNIT_PARAMS, UnitId};

/// Current parameter values of one effect unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamBank {
    unit: UnitId,
    values: [f32; MAX_UNIT_PARAMS],
    writes: u32,
}

impl ParamBank {
    /// Creates a bank holding the descriptor defaults of `unit`.
    pub fn new(unit: UnitId) -> Self {
        let mut values = [0.0; MAX_UNIT_PARAMS];
        for (slot, desc) in values.iter_mut().zip(unit.params()) {
            *slot = desc.default;
        }
        Self {
            unit,
            values,
            writes: 0,
        }
    }

    /// The unit this bank describes.
    #[inline]
    pub fn unit(&self) -> UnitId {
        self.unit
    }

    /// Number of accepted [`set_param`](ParameterInfo::set_param) calls.
    #[inline]
    pub fn writes(&self) -> u32 {
        self.writes
    }

    /// Resets the write counter.
    pub fn clear_writes(&mut self) {
        self.writes = 0;
    }

    /// Current values, one per parameter.
    pub fn values(&self) -> &[f32] {
        &self.values[..self.unit.params().len()]
    }
}

impl ParameterInfo for ParamBank {
    fn param_count(&self) -> usize {
        self.unit.params().len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.unit.params().get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        if index < self.param_count() {
            self.values[index]
        } else {
            0.0
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if let Some(desc) = self.param_info(index) {
            self.values[index] = desc.clamp(value);
            self.writes += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{filter, mixer};

    #[test]
    fn test_new_holds_defaults() {
        let bank = ParamBank::new(UnitId::LfoFilter);
        assert_eq!(bank.param_count(), 3);
        assert_eq!(bank.get_param(filter::FREQUENCY), 640.0);
        assert_eq!(bank.values().len(), 3);
        assert_eq!(bank.writes(), 0);
    }

    #[test]
    fn test_set_param_clamps_and_counts() {
        let mut bank = ParamBank::new(UnitId::Slot1Mixer);
        bank.set_param(mixer::BYPASS, 1.5);
        assert_eq!(bank.get_param(mixer::BYPASS), 1.0);
        bank.set_param(mixer::CHANNEL_B, 0.25);
        assert_eq!(bank.get_param(mixer::CHANNEL_B), 0.25);
        assert_eq!(bank.writes(), 2);

        bank.clear_writes();
        assert_eq!(bank.writes(), 0);
    }

    #[test]
    fn test_out_of_range_index_ignored() {
        let mut bank = ParamBank::new(UnitId::Amp);
        bank.set_param(2, 3.0);
        assert_eq!(bank.writes(), 0);
        assert_eq!(bank.get_param(2), 0.0);
        assert!(bank.param_info(1).is_none());
    }
}
