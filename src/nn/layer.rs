use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::nn::activation::SignalActivation;
use crate::nn::neuron::Neuron;
use crate::nn::signal::SignalVector;
use crate::nn::unit_id::{IdAllocator, UnitId};

/// Units that all read the same input signal vector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new(neurons: Vec<Neuron>) -> Layer {
        Layer { neurons }
    }

    /// `size` fresh units, each randomly wired into `prev`.
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        prev: &[UnitId],
        ids: &mut IdAllocator,
        sparsity_constant: f64,
        weight_std_dev: f64,
        receiver_strength: f64,
        rng: &mut R,
    ) -> Layer {
        let neurons = (0..size)
            .map(|_| {
                let id = ids.next_id();
                Neuron::random(id, prev, sparsity_constant, weight_std_dev, receiver_strength, rng)
            })
            .collect();
        Layer { neurons }
    }

    /// Fires every unit against `input`. Units do not interact, so the
    /// order of evaluation has no effect on the result.
    pub fn feed_from(&mut self, input: &SignalVector, activation: &SignalActivation) -> Result<SignalVector> {
        let mut out = SignalVector::new();
        for neuron in &mut self.neurons {
            let signal = neuron.fire(input, activation)?;
            out.insert(neuron.id, signal);
        }
        Ok(out)
    }

    pub fn ids(&self) -> Vec<UnitId> {
        self.neurons.iter().map(|n| n.id).collect()
    }

    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    pub fn connection_count(&self) -> usize {
        self.neurons.iter().map(|n| n.dendrites.size()).sum()
    }
}
