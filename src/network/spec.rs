use serde::{Deserialize, Serialize};

use crate::error::{encode_error, RangerError, Result};
use crate::nn::activation::SignalActivation;

/// A fully serializable description of a network's topology and of the
/// constants used to wire it randomly.
///
/// `NetworkSpec` can be saved to / loaded from JSON independently of any
/// initialized weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Unit counts from the input layer to the output layer.
    pub layer_sizes: Vec<usize>,
    /// Expected number of connections per unit is roughly this constant.
    pub sparsity_constant: f64,
    /// Standard deviation of initial weights. Not scaled by fan-in.
    #[serde(default = "default_weight_std_dev")]
    pub weight_std_dev: f64,
    /// Gating threshold every unit starts with.
    #[serde(default = "default_receiver_strength")]
    pub receiver_strength: f64,
    /// Strength attached to each input signal.
    #[serde(default = "default_input_strength")]
    pub input_strength: f64,
    #[serde(default)]
    pub activation: SignalActivation,
}

fn default_weight_std_dev() -> f64 {
    1.0
}

fn default_receiver_strength() -> f64 {
    0.5
}

fn default_input_strength() -> f64 {
    1.0
}

impl NetworkSpec {
    /// A spec with the default constants for the given topology.
    pub fn new(layer_sizes: Vec<usize>, sparsity_constant: f64) -> NetworkSpec {
        NetworkSpec {
            layer_sizes,
            sparsity_constant,
            weight_std_dev: default_weight_std_dev(),
            receiver_strength: default_receiver_strength(),
            input_strength: default_input_strength(),
            activation: SignalActivation::default(),
        }
    }

    pub fn with_weight_std_dev(mut self, weight_std_dev: f64) -> NetworkSpec {
        self.weight_std_dev = weight_std_dev;
        self
    }

    pub fn with_activation(mut self, activation: SignalActivation) -> NetworkSpec {
        self.activation = activation;
        self
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes.first().copied().unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes.last().copied().unwrap_or(0)
    }

    pub fn validate(&self) -> Result<()> {
        if self.layer_sizes.len() < 2 {
            return Err(RangerError::InvalidTopology(format!(
                "need an input and an output layer, got {} layer sizes",
                self.layer_sizes.len()
            )));
        }
        if self.input_size() == 0 || self.output_size() == 0 {
            return Err(RangerError::InvalidTopology(
                "input and output layers must be non-empty".into(),
            ));
        }
        if self.sparsity_constant.is_nan() || self.sparsity_constant < 0.0 || !self.weight_std_dev.is_finite() {
            return Err(RangerError::InvalidTopology(format!(
                "sparsity constant {} / weight std-dev {} out of range",
                self.sparsity_constant, self.weight_std_dev
            )));
        }
        Ok(())
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(encode_error)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let spec: NetworkSpec =
            serde_json::from_str(r#"{"layer_sizes": [2, 5, 1], "sparsity_constant": 3.0}"#).unwrap();
        assert_eq!(spec, NetworkSpec::new(vec![2, 5, 1], 3.0));
        assert_eq!(spec.weight_std_dev, 1.0);
        assert_eq!((spec.input_size(), spec.output_size()), (2, 1));
    }

    #[test]
    fn rejects_degenerate_topologies() {
        assert!(NetworkSpec::new(vec![2], 1.0).validate().is_err());
        assert!(NetworkSpec::new(vec![0, 1], 1.0).validate().is_err());
        assert!(NetworkSpec::new(vec![2, 1], -1.0).validate().is_err());
        assert!(NetworkSpec::new(vec![2, 1], f64::NAN).validate().is_err());
        assert!(NetworkSpec::new(vec![2, 0, 1], 0.0).validate().is_ok());
    }
}
