use serde::Deserialize;
use serde_json::{json, Value};
use tiny_http::Request;

use ranger_nn::{json as core_json, Network, NeuralFunctionPlot, XorDataset};

use crate::routes::{bad_request, core_error, not_found, ok, poisoned, JsonResponse};
use crate::state::SharedState;
use crate::util::json_body::read_json;
use crate::util::limits;

// ---------------------------------------------------------------------------
// POST /neuralFunctionPlot
// ---------------------------------------------------------------------------

/// Plots a stored network (`id`) or one sent inline (`neuralNetwork`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotRequest {
    pub id: Option<u64>,
    pub neural_network: Option<Value>,
    pub resolution: Option<usize>,
}

pub fn handle_neural_function_plot(request: &mut Request, state: SharedState) -> JsonResponse {
    let req: PlotRequest = match read_json(request) {
        Ok(r) => r,
        Err(msg) => return bad_request(msg),
    };
    if let Err(msg) = limits::check_resolution(req.resolution) {
        return bad_request(msg);
    }

    let mut st = match state.lock() {
        Ok(st) => st,
        Err(_) => return poisoned(),
    };
    let resolution = req.resolution.unwrap_or(st.defaults.plot_resolution);

    let result = match (req.id, Network::from_json(req.neural_network.as_ref())) {
        (Some(id), _) => match st.repository.get_mut(id) {
            Some(network) => NeuralFunctionPlot::plot(network, XorDataset::window(), resolution),
            None => return not_found(),
        },
        (None, Ok(Some(mut network))) => {
            drop(st);
            NeuralFunctionPlot::plot(&mut network, XorDataset::window(), resolution)
        }
        (None, Ok(None)) => return bad_request("expected id or neuralNetwork"),
        (None, Err(e)) => return core_error(&e),
    };

    match result.and_then(|plot| core_json::to_json(Some(&plot))) {
        Ok(plot) => ok(json!({ "plot": plot })),
        Err(e) => core_error(&e),
    }
}

// ---------------------------------------------------------------------------
// POST /desiredPlot
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredPlotRequest {
    pub dataset_type: String,
    pub resolution: Option<usize>,
}

pub fn handle_desired_plot(request: &mut Request, state: SharedState) -> JsonResponse {
    let req: DesiredPlotRequest = match read_json(request) {
        Ok(r) => r,
        Err(msg) => return bad_request(msg),
    };
    if let Err(msg) = limits::check_resolution(req.resolution) {
        return bad_request(msg);
    }
    let resolution = match state.lock() {
        Ok(st) => req.resolution.unwrap_or(st.defaults.plot_resolution),
        Err(_) => return poisoned(),
    };

    let plot = match req.dataset_type.to_ascii_lowercase().as_str() {
        "xor" => NeuralFunctionPlot::desired(XorDataset::optimal_value, XorDataset::window(), resolution),
        other => return bad_request(format!("unknown dataset type {other:?}")),
    };

    match plot.and_then(|p| core_json::to_json(Some(&p))) {
        Ok(plot) => ok(json!({ "plot": plot })),
        Err(e) => core_error(&e),
    }
}
