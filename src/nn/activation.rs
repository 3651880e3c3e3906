use serde::{Deserialize, Serialize};
use std::f64::consts::E;

use crate::nn::signal::Signal;

/// Maps a unit's preactivation to the value of its outgoing signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Identity,
    Sigmoid,
    Tanh,
    ReLU,
    LeakyReLU { alpha: f64 },
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
        }
    }
}

/// Maps a unit's preactivation to the strength of its outgoing signal.
///
/// - `Constant`        : every signal carries `strength`
/// - `Saturating`      : `|z| / (1 + |z|)`, in [0, 1)
/// - `SigmoidMagnitude`: `sigmoid(|z|)`, in [0.5, 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StrengthFunction {
    Constant { strength: f64 },
    Saturating,
    SigmoidMagnitude,
}

impl StrengthFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            StrengthFunction::Constant { strength } => *strength,
            StrengthFunction::Saturating => x.abs() / (1.0 + x.abs()),
            StrengthFunction::SigmoidMagnitude => sigmoid(x.abs()),
        }
    }
}

/// The pluggable rule turning a preactivation into a `Signal`.
///
/// Value and strength are computed independently from the same
/// preactivation, so strength travels forward alongside value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalActivation {
    pub value: ActivationFunction,
    pub strength: StrengthFunction,
}

impl SignalActivation {
    pub fn new(value: ActivationFunction, strength: StrengthFunction) -> SignalActivation {
        SignalActivation { value, strength }
    }

    pub fn signal(&self, preactivation: f64) -> Signal {
        Signal::new(self.value.function(preactivation), self.strength.function(preactivation))
    }
}

impl Default for SignalActivation {
    fn default() -> Self {
        SignalActivation {
            value: ActivationFunction::Sigmoid,
            strength: StrengthFunction::Saturating,
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_functions() {
        assert_eq!(ActivationFunction::Identity.function(-3.0), -3.0);
        assert_eq!(ActivationFunction::Sigmoid.function(0.0), 0.5);
        assert_eq!(ActivationFunction::ReLU.function(-1.0), 0.0);
        assert_eq!(ActivationFunction::LeakyReLU { alpha: 0.1 }.function(-2.0), -0.2);
        assert!((ActivationFunction::Tanh.function(1.0) - 1.0_f64.tanh()).abs() < 1e-15);
    }

    #[test]
    fn strength_functions() {
        assert_eq!(StrengthFunction::Constant { strength: 0.3 }.function(99.0), 0.3);
        assert_eq!(StrengthFunction::Saturating.function(0.0), 0.0);
        assert_eq!(StrengthFunction::Saturating.function(-1.0), 0.5);
        assert_eq!(StrengthFunction::SigmoidMagnitude.function(0.0), 0.5);
        assert_eq!(
            StrengthFunction::SigmoidMagnitude.function(-2.0),
            StrengthFunction::SigmoidMagnitude.function(2.0)
        );
    }

    #[test]
    fn default_activation_of_zero_preactivation() {
        let s = SignalActivation::default().signal(0.0);
        assert_eq!(s, Signal::new(0.5, 0.0));
    }
}
