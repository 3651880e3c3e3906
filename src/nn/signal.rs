use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::math::vector::Vector;
use crate::nn::unit_id::UnitId;

/// What a unit emits: a value plus the strength that gates how much of it
/// downstream units accept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(serialize_with = "crate::math::finite::scalar")]
    pub value: f64,
    #[serde(serialize_with = "crate::math::finite::scalar")]
    pub strength: f64,
}

impl Signal {
    pub fn new(value: f64, strength: f64) -> Signal {
        Signal { value, strength }
    }
}

/// One layer's simultaneous output, one signal per unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalVector {
    pub signals: BTreeMap<UnitId, Signal>,
}

impl SignalVector {
    pub fn new() -> SignalVector {
        SignalVector::default()
    }

    /// Signals for the virtual input layer: entry `i` of `input` becomes
    /// the value of unit `ids[i]`, all at the same strength.
    /// `ids` and `input` must have the same length.
    pub fn from_input(ids: &[UnitId], input: &Vector, strength: f64) -> SignalVector {
        SignalVector {
            signals: ids
                .iter()
                .zip(input.entries())
                .map(|(id, value)| (*id, Signal::new(*value, strength)))
                .collect(),
        }
    }

    pub fn insert(&mut self, id: UnitId, signal: Signal) {
        self.signals.insert(id, signal);
    }

    pub fn get(&self, id: &UnitId) -> Option<&Signal> {
        self.signals.get(id)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Values ordered as `ids`; ids without a signal read as 0.
    pub fn values_for(&self, ids: &[UnitId]) -> Vector {
        Vector::from_mapped(ids, |id| self.signals.get(id).map(|s| s.value).unwrap_or(0.0))
    }
}
