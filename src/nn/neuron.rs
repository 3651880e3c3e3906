use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::nn::activation::SignalActivation;
use crate::nn::dendrites::{DendriteSignal, Dendrites};
use crate::nn::signal::{Signal, SignalVector};
use crate::nn::unit_id::UnitId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neuron {
    pub id: UnitId,
    pub dendrites: Dendrites,
    /// Gating threshold applied to incoming signals.
    #[serde(serialize_with = "crate::math::finite::scalar")]
    pub receiver_strength: f64,
    // Cached by `fire` for the local update.
    #[serde(skip)]
    preactivation: f64,
    #[serde(skip)]
    signal: Option<Signal>,
}

impl Neuron {
    pub fn new(id: UnitId, dendrites: Dendrites, receiver_strength: f64) -> Neuron {
        Neuron {
            id,
            dendrites,
            receiver_strength,
            preactivation: 0.0,
            signal: None,
        }
    }

    pub fn random<R: Rng + ?Sized>(
        id: UnitId,
        prev: &[UnitId],
        sparsity_constant: f64,
        weight_std_dev: f64,
        receiver_strength: f64,
        rng: &mut R,
    ) -> Neuron {
        let dendrites = Dendrites::random(prev, sparsity_constant, weight_std_dev, rng);
        Neuron::new(id, dendrites, receiver_strength)
    }

    /// Computes this unit's signal from the previous layer's output.
    pub fn fire(&mut self, input: &SignalVector, activation: &SignalActivation) -> Result<Signal> {
        let z = self.dendrites.compute_axon_preactivation(input, self.receiver_strength)?;
        let signal = activation.signal(z);
        self.preactivation = z;
        self.signal = Some(signal);
        Ok(signal)
    }

    /// Per-connection credit for the most recent `fire`, scaled by the
    /// given local error term and this unit's own emitted strength.
    pub fn dendrite_signal(&self, local_error: f64) -> DendriteSignal {
        let strength = self.signal.map(|s| s.strength).unwrap_or(0.0);
        self.dendrites.compute_dendrite_signal(local_error, strength)
    }

    pub fn preactivation(&self) -> f64 {
        self.preactivation
    }

    /// The signal from the most recent `fire`, if any.
    pub fn last_signal(&self) -> Option<Signal> {
        self.signal
    }
}
