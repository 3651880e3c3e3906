use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::io::Write;
use tracing::{debug, warn};

use crate::error::{check_dims, encode_error, RangerError, Result};
use crate::json;
use crate::loss::mse::MseLoss;
use crate::math::vector::Vector;
use crate::network::spec::NetworkSpec;
use crate::nn::activation::SignalActivation;
use crate::nn::layer::Layer;
use crate::nn::signal::SignalVector;
use crate::nn::unit_id::{IdAllocator, UnitId};

/// `Initialized` until the first weight update, `Trained` afterwards.
/// Both states support `forward`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkState {
    #[default]
    Initialized,
    Trained,
}

/// Layers of sparsely connected units fed from a virtual input layer.
///
/// The network owns every unit; connections refer to units of the previous
/// layer by `UnitId`. Not internally synchronized: callers sharing one
/// network must serialize access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    /// Ids of the virtual input layer, one per input dimension.
    pub input_ids: Vec<UnitId>,
    pub layers: Vec<Layer>,
    #[serde(serialize_with = "crate::math::finite::scalar")]
    pub input_strength: f64,
    pub activation: SignalActivation,
    #[serde(default)]
    pub state: NetworkState,
}

/// Builds a network with default constants for `layer_sizes`
/// (input size first, output size last).
pub fn initialize_network<R: Rng + ?Sized>(
    layer_sizes: &[usize],
    sparsity_constant: f64,
    rng: &mut R,
) -> Result<Network> {
    Network::initialize(&NetworkSpec::new(layer_sizes.to_vec(), sparsity_constant), rng)
}

impl Network {
    /// Randomly wires a network described by `spec`. All randomness comes
    /// from `rng`, so a seeded generator reproduces the same network.
    pub fn initialize<R: Rng + ?Sized>(spec: &NetworkSpec, rng: &mut R) -> Result<Network> {
        spec.validate()?;

        let mut ids = IdAllocator::new();
        let input_ids = ids.take(spec.input_size());
        let mut prev = input_ids.clone();
        let mut layers = Vec::with_capacity(spec.layer_sizes.len() - 1);
        for &size in &spec.layer_sizes[1..] {
            let layer = Layer::random(
                size,
                &prev,
                &mut ids,
                spec.sparsity_constant,
                spec.weight_std_dev,
                spec.receiver_strength,
                rng,
            );
            prev = layer.ids();
            layers.push(layer);
        }

        let network = Network {
            input_ids,
            layers,
            input_strength: spec.input_strength,
            activation: spec.activation.clone(),
            state: NetworkState::Initialized,
        };
        debug!(
            layer_sizes = ?spec.layer_sizes,
            sparsity_constant = spec.sparsity_constant,
            connections = network.connection_count(),
            "initialized network"
        );
        Ok(network)
    }

    pub fn input_size(&self) -> usize {
        self.input_ids.len()
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map(|l| l.size()).unwrap_or(0)
    }

    pub fn state(&self) -> NetworkState {
        self.state
    }

    pub fn connection_count(&self) -> usize {
        self.layers.iter().map(|l| l.connection_count()).sum()
    }

    /// Forward pass returning the output layer's signals. Every unit caches
    /// its preactivation and signal for a following local update.
    pub fn forward_signals(&mut self, input: &Vector) -> Result<SignalVector> {
        check_dims(input.size(), self.input_size())?;
        let mut current = SignalVector::from_input(&self.input_ids, input, self.input_strength);
        for layer in &mut self.layers {
            current = layer.feed_from(&current, &self.activation)?;
        }
        Ok(current)
    }

    /// Forward pass returning the output values in unit order.
    pub fn forward(&mut self, input: &Vector) -> Result<Vector> {
        let signals = self.forward_signals(input)?;
        let output_ids = self.layers.last().map(|l| l.ids()).unwrap_or_default();
        Ok(signals.values_for(&output_ids))
    }

    /// One local learning step on a single labeled example. Returns the
    /// squared error of the output before the update.
    ///
    /// Each unit updates its own connections from signals it computed
    /// itself during the forward pass: output units use their error
    /// against `target`, hidden units use their own preactivation. Nothing
    /// is propagated backwards between layers.
    pub fn train_step(&mut self, input: &Vector, target: &Vector, learning_rate: f64) -> Result<f64> {
        check_dims(target.size(), self.output_size())?;
        let output = self.forward(input)?;
        let loss = MseLoss::loss(output.entries(), target.entries());

        let last = self.layers.len().saturating_sub(1);
        for (i, layer) in self.layers.iter_mut().enumerate() {
            for (j, neuron) in layer.neurons.iter_mut().enumerate() {
                let local_error = if i == last {
                    output.entries()[j] - target.entries()[j]
                } else {
                    neuron.preactivation()
                };
                let signal = neuron.dendrite_signal(local_error);
                neuron.dendrites.update(&signal, learning_rate)?;
            }
        }
        self.state = NetworkState::Trained;

        debug!(loss, learning_rate, "train step");
        Ok(loss)
    }

    /// Prunes a hidden unit and every connection that reads from it.
    pub fn remove_unit(&mut self, id: UnitId) -> Result<()> {
        let last = self.layers.len().saturating_sub(1);
        let position = self.layers[..last].iter().enumerate().find_map(|(i, layer)| {
            layer.neurons.iter().position(|n| n.id == id).map(|j| (i, j))
        });
        let (i, j) = match position {
            Some(p) => p,
            None if self.layers.get(last).map_or(false, |l| l.ids().contains(&id)) => {
                return Err(RangerError::InvalidTopology(format!(
                    "unit {id} is an output unit and cannot be removed"
                )));
            }
            None => return Err(RangerError::MissingConnection(id)),
        };

        self.layers[i].neurons.remove(j);
        let mut dropped = 0;
        for neuron in &mut self.layers[i + 1].neurons {
            if neuron.dendrites.remove(&id).is_some() {
                dropped += 1;
            }
        }
        warn!(unit = %id, layer = i, dropped_connections = dropped, "removed unit");
        Ok(())
    }

    /// Checks that ids are unique and every connection reads from the
    /// immediately preceding layer.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() || self.input_ids.is_empty() || self.output_size() == 0 {
            return Err(RangerError::MalformedSerializedForm(
                "network needs non-empty input and output layers".into(),
            ));
        }
        let mut seen = BTreeSet::new();
        let all_ids = self
            .input_ids
            .iter()
            .chain(self.layers.iter().flat_map(|l| l.neurons.iter().map(|n| &n.id)));
        for id in all_ids {
            if !seen.insert(*id) {
                return Err(RangerError::MalformedSerializedForm(format!("duplicate unit id {id}")));
            }
        }

        let mut prev: BTreeSet<UnitId> = self.input_ids.iter().copied().collect();
        for layer in &self.layers {
            for neuron in &layer.neurons {
                if let Some((source, _)) = neuron.dendrites.iter().find(|(s, _)| !prev.contains(*s)) {
                    return Err(RangerError::MalformedSerializedForm(format!(
                        "unit {} connects to {}, which is not in the previous layer",
                        neuron.id, source
                    )));
                }
            }
            prev = layer.ids().into_iter().collect();
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<Value> {
        json::to_json(Some(self))
    }

    /// Decodes and validates a network; `null` or a missing value is `None`.
    pub fn from_json(value: Option<&Value>) -> Result<Option<Network>> {
        let network: Option<Network> = json::from_json(value)?;
        if let Some(n) = &network {
            n.validate()?;
        }
        Ok(network)
    }

    /// Serializes the network to a pretty-printed JSON file. A network
    /// holding a non-finite weight fails with `Unencodable` before the file
    /// is touched.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self).map_err(encode_error)?;
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)?;
        network.validate()?;
        Ok(network)
    }
}
