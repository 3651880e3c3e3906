use rand::Rng;

use crate::data::dataset::{Dataset, LabeledDatapoint};
use crate::error::{check_dims, Result};
use crate::math::random::sample_standard_normal;
use crate::math::vector::Vector;
use crate::plot::window::Window;

const CORNER_EPS: f64 = 0.01;
const FALLOFF: i32 = 5;

/// A smoothed XOR over the unit square: near (1, 0) and (0, 1) the target
/// approaches 1, near (0, 0) and (1, 1) it approaches 0.
pub struct XorDataset;

impl XorDataset {
    /// `num_examples` points with input and output noise of 0.2.
    pub fn default_dataset<R: Rng + ?Sized>(num_examples: usize, rng: &mut R) -> Dataset {
        XorDataset::generate(num_examples, 0.2, 0.2, rng)
    }

    pub fn generate<R: Rng + ?Sized>(
        num_examples: usize,
        input_noise: f64,
        output_noise: f64,
        rng: &mut R,
    ) -> Dataset {
        (0..num_examples)
            .map(|_| XorDataset::generate_labeled_datapoint(input_noise, output_noise, rng))
            .collect()
    }

    /// Draws an input uniformly from [0, 1)², labels it with
    /// `optimal_value`, then jitters the recorded input and label by
    /// Gaussian noise with the given standard deviations.
    pub fn generate_labeled_datapoint<R: Rng + ?Sized>(
        input_noise: f64,
        output_noise: f64,
        rng: &mut R,
    ) -> LabeledDatapoint {
        let mut point = [rng.gen::<f64>(), rng.gen::<f64>()];
        let mut y = blend(point);

        if input_noise > 0.0 {
            for x in point.iter_mut() {
                *x += sample_standard_normal(rng) * input_noise;
            }
        }
        if output_noise > 0.0 {
            y += sample_standard_normal(rng) * output_noise;
        }
        LabeledDatapoint::new(Vector::new(point.to_vec()), Vector::new(vec![y]))
    }

    /// Inverse-distance blend of the four corner labels, each corner
    /// weighted by `1 / (d + 0.01)^5`. Fails with `DimensionMismatch`
    /// unless `input` is 2-dimensional.
    pub fn optimal_value(input: &Vector) -> Result<f64> {
        check_dims(input.size(), 2)?;
        let e = input.entries();
        Ok(blend([e[0], e[1]]))
    }

    pub fn window() -> Window {
        Window::new(-0.2, 1.2, -0.2, 1.2)
    }
}

fn blend(point: [f64; 2]) -> f64 {
    let corners = [([0.0, 0.0], 0.0), ([1.0, 0.0], 1.0), ([0.0, 1.0], 1.0), ([1.0, 1.0], 0.0)];
    let mut weighted = 0.0;
    let mut total = 0.0;
    for (corner, label) in corners {
        let d = (point[0] - corner[0]).hypot(point[1] - corner[1]);
        let w = 1.0 / (d + CORNER_EPS).powi(FALLOFF);
        weighted += label * w;
        total += w;
    }
    weighted / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn corners_approach_xor() {
        let v = |a: f64, b: f64| XorDataset::optimal_value(&Vector::new(vec![a, b])).unwrap();
        assert!(v(0.0, 0.0) < 0.01);
        assert!(v(1.0, 0.0) > 0.99);
        assert!(v(0.0, 1.0) > 0.99);
        assert!(v(1.0, 1.0) < 0.01);
        assert!(v(0.02, 0.01) < 0.1);
        assert!(v(0.97, 0.03) > 0.9);
        assert!((v(0.5, 0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn noiseless_points_are_labeled_exactly() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let ds = XorDataset::generate(50, 0.0, 0.0, &mut rng);
        assert_eq!(ds.len(), 50);
        for p in ds.iter() {
            assert_eq!(p.input.size(), 2);
            assert!(p.input.entries().iter().all(|x| (0.0..1.0).contains(x)));
            assert_eq!(p.output.to_scalar().unwrap(), XorDataset::optimal_value(&p.input).unwrap());
        }
    }

    #[test]
    fn oracle_rejects_non_planar_input() {
        for bad in [Vector::zeros(0), Vector::ones(1), Vector::ones(3)] {
            assert!(matches!(
                XorDataset::optimal_value(&bad),
                Err(crate::error::RangerError::DimensionMismatch { right: 2, .. })
            ));
        }
    }

    #[test]
    fn window_covers_unit_square_with_margin() {
        let w = XorDataset::window();
        assert_eq!((w.x_min, w.x_max, w.y_min, w.y_max), (-0.2, 1.2, -0.2, 1.2));
    }
}
