use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::math::vector::Vector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDatapoint {
    pub input: Vector,
    pub output: Vector,
}

impl LabeledDatapoint {
    pub fn new(input: Vector, output: Vector) -> LabeledDatapoint {
        LabeledDatapoint { input, output }
    }
}

/// An ordered collection of labeled examples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub datapoints: Vec<LabeledDatapoint>,
}

impl Dataset {
    pub fn new() -> Dataset {
        Dataset::default()
    }

    pub fn add(&mut self, datapoint: LabeledDatapoint) -> &mut Dataset {
        self.datapoints.push(datapoint);
        self
    }

    pub fn len(&self) -> usize {
        self.datapoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datapoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledDatapoint> {
        self.datapoints.iter()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.datapoints.shuffle(rng);
    }

    /// Splits off the last `fraction` of the examples (rounded down).
    pub fn split(mut self, fraction: f64) -> (Dataset, Dataset) {
        let held_out = ((self.len() as f64) * fraction.clamp(0.0, 1.0)).floor() as usize;
        let tail = self.datapoints.split_off(self.len() - held_out);
        (self, Dataset { datapoints: tail })
    }
}

impl FromIterator<LabeledDatapoint> for Dataset {
    fn from_iter<I: IntoIterator<Item = LabeledDatapoint>>(iter: I) -> Self {
        Dataset { datapoints: iter.into_iter().collect() }
    }
}
