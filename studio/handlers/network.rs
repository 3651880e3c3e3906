use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use serde_json::json;
use tiny_http::Request;
use tracing::info;

use ranger_nn::{train_loop, Network, NetworkSpec, TrainConfig, XorDataset};

use crate::routes::{bad_request, core_error, not_found, ok, poisoned, JsonResponse};
use crate::state::SharedState;
use crate::util::json_body::read_json;
use crate::util::limits;

// ---------------------------------------------------------------------------
// POST /newNeuralNetwork
// ---------------------------------------------------------------------------

/// Either `hiddenLayerSize` (2 inputs, one hidden layer, 1 output) or the
/// full `layerSizes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNetworkRequest {
    pub hidden_layer_size: Option<usize>,
    pub layer_sizes: Option<Vec<usize>>,
    pub sparsity_constant: Option<f64>,
    pub weight_std_dev: Option<f64>,
    pub seed: Option<u64>,
}

pub fn handle_new(request: &mut Request, state: SharedState) -> JsonResponse {
    let req: NewNetworkRequest = match read_json(request) {
        Ok(r) => r,
        Err(msg) => return bad_request(msg),
    };
    let layer_sizes = match (req.layer_sizes, req.hidden_layer_size) {
        (Some(sizes), _) => sizes,
        (None, Some(hidden)) => vec![2, hidden, 1],
        (None, None) => return bad_request("expected hiddenLayerSize or layerSizes"),
    };
    if let Err(msg) = limits::check_layer_sizes(&layer_sizes) {
        return bad_request(msg);
    }

    let mut st = match state.lock() {
        Ok(st) => st,
        Err(_) => return poisoned(),
    };
    let mut spec = NetworkSpec::new(
        layer_sizes,
        req.sparsity_constant.unwrap_or(st.defaults.sparsity_constant),
    );
    if let Some(std_dev) = req.weight_std_dev {
        spec = spec.with_weight_std_dev(std_dev);
    }

    let mut rng = seeded(req.seed);
    let network = match Network::initialize(&spec, &mut rng) {
        Ok(n) => n,
        Err(e) => return core_error(&e),
    };
    let body = match network.to_json() {
        Ok(v) => v,
        Err(e) => return core_error(&e),
    };
    let id = st.repository.insert(network);
    info!(id, layer_sizes = ?spec.layer_sizes, stored = st.repository.len(), "created network");

    ok(json!({ "id": id, "neuralNetwork": body }))
}

// ---------------------------------------------------------------------------
// POST /train
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRequest {
    pub id: u64,
    pub epochs: Option<usize>,
    pub learning_rate: Option<f64>,
    pub num_examples: Option<usize>,
    pub seed: Option<u64>,
}

/// Trains a stored network on a freshly generated XOR dataset.
pub fn handle_train(request: &mut Request, state: SharedState) -> JsonResponse {
    let req: TrainRequest = match read_json(request) {
        Ok(r) => r,
        Err(msg) => return bad_request(msg),
    };
    let checked = limits::check("epochs", req.epochs, limits::MAX_EPOCHS)
        .and_then(|_| limits::check("numExamples", req.num_examples, limits::MAX_EXAMPLES));
    if let Err(msg) = checked {
        return bad_request(msg);
    }

    let mut st = match state.lock() {
        Ok(st) => st,
        Err(_) => return poisoned(),
    };
    let defaults = st.defaults.clone();
    let network = match st.repository.get_mut(req.id) {
        Some(n) => n,
        None => return not_found(),
    };

    let mut rng = seeded(req.seed);
    let data = XorDataset::default_dataset(req.num_examples.unwrap_or(defaults.num_examples), &mut rng);
    let config = TrainConfig::new(
        req.epochs.unwrap_or(defaults.epochs),
        req.learning_rate.unwrap_or(defaults.learning_rate),
    );

    let loss = match train_loop(network, &data, None, &config, &mut rng) {
        Ok(l) => l,
        Err(e) => return core_error(&e),
    };
    let body = match network.to_json() {
        Ok(v) => v,
        Err(e) => return core_error(&e),
    };
    info!(id = req.id, loss, "trained network");

    ok(json!({ "id": req.id, "loss": loss, "neuralNetwork": body }))
}

fn seeded(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
