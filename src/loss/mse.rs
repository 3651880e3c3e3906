pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// Mean of `loss` over paired predictions and targets; 0 when empty.
    pub fn mean_loss(predicted: &[Vec<f64>], expected: &[Vec<f64>]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| MseLoss::loss(p, e))
            .sum::<f64>() / predicted.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mse_of_known_values() {
        assert_eq!(MseLoss::loss(&[1.0, 3.0], &[0.0, 1.0]), 2.5);
        assert_eq!(MseLoss::mean_loss(&[vec![2.0], vec![0.0]], &[vec![0.0], vec![0.0]]), 2.0);
        assert_eq!(MseLoss::mean_loss(&[], &[]), 0.0);
    }
}
