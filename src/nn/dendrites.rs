use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{RangerError, Result};
use crate::math::random::sample_standard_normal;
use crate::nn::signal::SignalVector;
use crate::nn::unit_id::UnitId;

/// Per-connection credit produced by `Dendrites::compute_dendrite_signal`
/// and consumed by `Dendrites::update`.
pub type DendriteSignal = BTreeMap<UnitId, f64>;

/// Sparse weighted connections from one receiving unit to units of the
/// previous layer.
///
/// The key set is fixed once sampled: `update` only changes weights and
/// `remove` only drops keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dendrites {
    #[serde(serialize_with = "crate::math::finite::map")]
    dendrites: BTreeMap<UnitId, f64>,
}

impl Dendrites {
    pub fn new() -> Dendrites {
        Dendrites::default()
    }

    /// Includes each of `prev` independently with probability
    /// `sparsity_constant / (prev.len() + 1)`, weighted by a draw from
    /// N(0, std_dev).
    pub fn random<R: Rng + ?Sized>(
        prev: &[UnitId],
        sparsity_constant: f64,
        std_dev: f64,
        rng: &mut R,
    ) -> Dendrites {
        let mut ret = Dendrites::new();
        let proba = sparsity_constant / (prev.len() + 1) as f64;
        for id in prev {
            if rng.gen::<f64>() < proba {
                ret.add(*id, sample_standard_normal(rng) * std_dev);
            }
        }
        ret
    }

    pub fn add(&mut self, id: UnitId, weight: f64) -> &mut Dendrites {
        self.dendrites.insert(id, weight);
        self
    }

    /// Gated aggregation of the sender signals: each connected sender
    /// contributes `value * (1 - max(receiver_strength - strength, 0))`.
    ///
    /// The weight does not enter the sum; it only scales the credit
    /// computed by `compute_dendrite_signal`.
    pub fn compute_axon_preactivation(
        &self,
        signal_vector: &SignalVector,
        receiver_strength: f64,
    ) -> Result<f64> {
        let mut ret = 0.0;
        for id in self.dendrites.keys() {
            let signal = signal_vector
                .get(id)
                .ok_or(RangerError::MissingConnection(*id))?;
            ret += signal.value * (1.0 - (receiver_strength - signal.strength).max(0.0));
        }
        Ok(ret)
    }

    /// `weight * pre_axon_signal * signal_strength` for every connection.
    pub fn compute_dendrite_signal(&self, pre_axon_signal: f64, signal_strength: f64) -> DendriteSignal {
        self.dendrites
            .iter()
            .map(|(id, weight)| (*id, weight * pre_axon_signal * signal_strength))
            .collect()
    }

    /// Applies `w <- w - learning_rate * signal` for every entry of
    /// `dendrite_signal`. Every key is checked before any weight changes.
    pub fn update(&mut self, dendrite_signal: &DendriteSignal, learning_rate: f64) -> Result<()> {
        if let Some(missing) = dendrite_signal.keys().find(|id| !self.dendrites.contains_key(*id)) {
            return Err(RangerError::MissingConnection(*missing));
        }
        for (id, signal) in dendrite_signal {
            if let Some(weight) = self.dendrites.get_mut(id) {
                *weight -= learning_rate * signal;
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, id: &UnitId) -> Option<f64> {
        self.dendrites.remove(id)
    }

    pub fn size(&self) -> usize {
        self.dendrites.len()
    }

    pub fn weight(&self, id: &UnitId) -> Option<f64> {
        self.dendrites.get(id).copied()
    }

    pub fn contains(&self, id: &UnitId) -> bool {
        self.dendrites.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, &f64)> {
        self.dendrites.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_json, to_json};
    use crate::nn::signal::Signal;
    use crate::nn::unit_id::IdAllocator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn signals(entries: &[(u64, f64, f64)]) -> SignalVector {
        let mut sv = SignalVector::new();
        for (id, value, strength) in entries {
            sv.insert(UnitId(*id), Signal::new(*value, *strength));
        }
        sv
    }

    #[test]
    fn empty_previous_layer_yields_no_connections() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(Dendrites::random(&[], 5.0, 1.0, &mut rng).size(), 0);
        }
    }

    #[test]
    fn connection_count_matches_expected_density() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let prev = IdAllocator::new().take(20);
        let k = 4.0;
        let trials = 5_000;
        let total: usize = (0..trials)
            .map(|_| Dendrites::random(&prev, k, 1.0, &mut rng).size())
            .sum();
        let n = prev.len() as f64;
        let p = k / (n + 1.0);
        let expected = n * p;
        let mean = total as f64 / trials as f64;
        // Five standard errors of a Binomial(n, p) mean.
        let tolerance = 5.0 * (n * p * (1.0 - p) / trials as f64).sqrt();
        assert!((mean - expected).abs() < tolerance, "mean {mean}, expected {expected}");
    }

    #[test]
    fn keys_reference_previous_layer_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let prev = IdAllocator::new().take(10);
        let d = Dendrites::random(&prev, 9.0, 1.0, &mut rng);
        assert!(d.iter().all(|(id, _)| prev.contains(id)));
    }

    #[test]
    fn std_dev_scales_weights() {
        let prev = IdAllocator::new().take(8);
        let unit = Dendrites::random(&prev, 100.0, 1.0, &mut ChaCha8Rng::seed_from_u64(5));
        let tenth = Dendrites::random(&prev, 100.0, 0.1, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(unit.size(), tenth.size());
        for ((_, a), (_, b)) in unit.iter().zip(tenth.iter()) {
            assert!((a * 0.1 - b).abs() < 1e-12);
        }
    }

    #[test]
    fn preactivation_gates_weaker_senders() {
        let mut d = Dendrites::new();
        d.add(UnitId(0), 0.3).add(UnitId(1), -2.0).add(UnitId(2), 1.0);
        // Sender 0 meets the threshold, sender 1 is 0.25 below it, sender 2
        // is a full unit below and contributes nothing.
        let sv = signals(&[(0, 2.0, 0.9), (1, 4.0, 0.5), (2, 10.0, -0.25), (3, 100.0, 1.0)]);
        let pre = d.compute_axon_preactivation(&sv, 0.75).unwrap();
        assert!((pre - (2.0 + 4.0 * 0.75 + 0.0)).abs() < 1e-12);
    }

    #[test]
    fn gate_is_not_clamped_below_zero() {
        let mut d = Dendrites::new();
        d.add(UnitId(0), 1.0);
        let sv = signals(&[(0, 2.0, 0.0)]);
        // 1 - max(1.5 - 0, 0) = -0.5
        let pre = d.compute_axon_preactivation(&sv, 1.5).unwrap();
        assert!((pre + 1.0).abs() < 1e-12);
    }

    #[test]
    fn preactivation_requires_every_sender() {
        let mut d = Dendrites::new();
        d.add(UnitId(0), 1.0).add(UnitId(7), 1.0);
        let sv = signals(&[(0, 1.0, 1.0)]);
        assert!(matches!(
            d.compute_axon_preactivation(&sv, 0.0),
            Err(RangerError::MissingConnection(UnitId(7)))
        ));
    }

    #[test]
    fn dendrite_signal_is_weight_times_inputs() {
        let mut d = Dendrites::new();
        d.add(UnitId(1), 2.0).add(UnitId(4), -0.5);
        let ds = d.compute_dendrite_signal(3.0, 0.5);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds[&UnitId(1)], 3.0);
        assert_eq!(ds[&UnitId(4)], -0.75);
    }

    #[test]
    fn update_moves_weights_against_signal() {
        let mut d = Dendrites::new();
        d.add(UnitId(1), 2.0).add(UnitId(2), 1.0);
        let mut ds = DendriteSignal::new();
        ds.insert(UnitId(1), 4.0);
        d.update(&ds, 0.25).unwrap();
        assert_eq!(d.weight(&UnitId(1)), Some(1.0));
        assert_eq!(d.weight(&UnitId(2)), Some(1.0));
    }

    #[test]
    fn update_with_zero_rate_is_identity() {
        let prev = IdAllocator::new().take(12);
        let mut d = Dendrites::random(&prev, 6.0, 1.0, &mut ChaCha8Rng::seed_from_u64(11));
        let before = d.clone();
        let ds = d.compute_dendrite_signal(1.7, 0.4);
        d.update(&ds, 0.0).unwrap();
        assert_eq!(d, before);
    }

    #[test]
    fn update_rejects_unknown_key_without_mutating() {
        let mut d = Dendrites::new();
        d.add(UnitId(1), 2.0);
        let before = d.clone();
        let mut ds = DendriteSignal::new();
        ds.insert(UnitId(1), 1.0);
        ds.insert(UnitId(9), 1.0);
        assert!(matches!(
            d.update(&ds, 1.0),
            Err(RangerError::MissingConnection(UnitId(9)))
        ));
        assert_eq!(d, before);
        assert_eq!(d.size(), 1);
    }

    #[test]
    fn remove_drops_connection() {
        let mut d = Dendrites::new();
        d.add(UnitId(1), 2.0).add(UnitId(2), 3.0);
        assert_eq!(d.remove(&UnitId(1)), Some(2.0));
        assert_eq!(d.remove(&UnitId(1)), None);
        assert_eq!(d.size(), 1);
        assert!(!d.contains(&UnitId(1)));
    }

    #[test]
    fn serializes_as_string_keyed_object() {
        let mut d = Dendrites::new();
        d.add(UnitId(3), 0.25).add(UnitId(12), -1.5);
        let json = to_json(Some(&d)).unwrap();
        assert_eq!(json, serde_json::json!({"3": 0.25, "12": -1.5}));
        let back: Option<Dendrites> = from_json(Some(&json)).unwrap();
        assert_eq!(back, Some(d));

        let bad_key = serde_json::json!({"not-a-unit": 1.0});
        assert!(from_json::<Dendrites>(Some(&bad_key)).is_err());
    }

    #[test]
    fn non_finite_weight_refuses_to_encode() {
        let mut d = Dendrites::new();
        d.add(UnitId(0), 1.0).add(UnitId(1), f64::NAN);
        assert!(matches!(to_json(Some(&d)), Err(RangerError::Unencodable(_))));
        d.add(UnitId(1), f64::INFINITY);
        assert!(matches!(to_json(Some(&d)), Err(RangerError::Unencodable(_))));
    }
}
