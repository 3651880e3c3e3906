use serde::{Deserialize, Serialize};

use crate::error::{check_limit, Result};
use crate::math::matrix::Matrix;
use crate::math::vector::Vector;
use crate::network::network::Network;
use crate::plot::window::Window;

/// Largest accepted grid resolution; a plot holds `resolution²` samples.
pub const MAX_RESOLUTION: usize = 1_000;

/// A function of two inputs sampled on a regular grid.
///
/// `values.data[row][col]` holds f(x_ticks[col], y_ticks[row]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuralFunctionPlot {
    pub window: Window,
    pub resolution: usize,
    pub values: Matrix,
}

impl NeuralFunctionPlot {
    /// Samples the first output of `network` over `window`. The network
    /// must take 2 inputs and produce 1 output. A `resolution` above
    /// `MAX_RESOLUTION` fails with `LimitExceeded`.
    pub fn plot(network: &mut Network, window: Window, resolution: usize) -> Result<NeuralFunctionPlot> {
        let values = sample_grid(&window, resolution, |x| network.forward(x)?.to_scalar())?;
        Ok(NeuralFunctionPlot { window, resolution, values })
    }

    /// Samples a known target function, e.g. a dataset's oracle.
    pub fn desired<F>(f: F, window: Window, resolution: usize) -> Result<NeuralFunctionPlot>
    where
        F: Fn(&Vector) -> Result<f64>,
    {
        let values = sample_grid(&window, resolution, f)?;
        Ok(NeuralFunctionPlot { window, resolution, values })
    }

    /// Smallest and largest sampled value, if any.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values
            .data
            .iter()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

fn sample_grid<F>(window: &Window, resolution: usize, mut f: F) -> Result<Matrix>
where
    F: FnMut(&Vector) -> Result<f64>,
{
    check_limit("resolution", resolution, MAX_RESOLUTION)?;
    let xs = window.x_ticks(resolution);
    let mut values = Matrix::zeros(resolution, resolution);
    for (row, y) in window.y_ticks(resolution).into_iter().enumerate() {
        for (col, x) in xs.iter().enumerate() {
            values.data[row][col] = f(&Vector::new(vec![*x, y]))?;
        }
    }
    Ok(values)
}
