use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::Rng;
use tracing::info;

use crate::data::dataset::Dataset;
use crate::error::Result;
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs, one `train_step` per
/// example, and returns the mean training loss of the **last completed
/// epoch** (0 if no epoch ran).
///
/// Examples are visited in a fresh order every epoch, drawn from `rng`.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    train: &Dataset,
    validation: Option<&Dataset>,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<f64> {
    let mut last_train_loss = 0.0;
    let mut order = train.clone();

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();

        order.shuffle(rng);
        let mut total = 0.0;
        for point in order.iter() {
            total += network.train_step(&point.input, &point.output, config.learning_rate)?;
        }
        let train_loss = if order.is_empty() { 0.0 } else { total / order.len() as f64 };
        last_train_loss = train_loss;

        let val_loss = match validation {
            Some(v) => Some(evaluate(network, v)?),
            None => None,
        };

        let elapsed_ms = t_start.elapsed().as_millis() as u64;
        info!(epoch, total_epochs = config.epochs, train_loss, ?val_loss, elapsed_ms, "epoch complete");

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            val_loss,
            elapsed_ms,
        };

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(last_train_loss)
}

/// Mean squared error of `network` over `dataset` without updating it.
pub fn evaluate(network: &mut Network, dataset: &Dataset) -> Result<f64> {
    let mut predicted = Vec::with_capacity(dataset.len());
    let mut expected = Vec::with_capacity(dataset.len());
    for point in dataset.iter() {
        predicted.push(network.forward(&point.input)?.entries().to_vec());
        expected.push(point.output.entries().to_vec());
    }
    Ok(MseLoss::mean_loss(&predicted, &expected))
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}
