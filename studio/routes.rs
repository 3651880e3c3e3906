use std::io::Cursor;
use serde_json::{json, Value};
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::{debug, error};

use ranger_nn::RangerError;

use crate::state::SharedState;
use crate::handlers;

pub type JsonResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn json_header() -> Header {
    Header::from_bytes(b"Content-Type", b"application/json").expect("static header is valid ASCII")
}

pub fn json_response(status: u16, body: Value) -> JsonResponse {
    let bytes = body.to_string().into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        vec![json_header()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn ok(body: Value) -> JsonResponse {
    json_response(200, body)
}

pub fn bad_request(message: impl Into<String>) -> JsonResponse {
    json_response(400, json!({ "error": message.into() }))
}

pub fn not_found() -> JsonResponse {
    json_response(404, json!({ "error": "not found" }))
}

/// Core failures are caused by the request; IO failures are ours.
pub fn core_error(err: &RangerError) -> JsonResponse {
    match err {
        RangerError::Io(_) => {
            error!(error = %err, "internal error");
            json_response(500, json!({ "error": err.to_string() }))
        }
        _ => bad_request(err.to_string()),
    }
}

pub fn poisoned() -> JsonResponse {
    error!("studio state mutex poisoned");
    json_response(500, json!({ "error": "internal state unavailable" }))
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// Handlers receive a `&mut Request` so that the dispatcher retains
/// ownership and can call `request.respond(response)` at the end.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or("").to_owned();
    debug!(?method, %path, "request");

    let response = match (method, path.as_str()) {
        (Method::Post, "/newNeuralNetwork")   => handlers::network::handle_new(&mut request, state),
        (Method::Post, "/train")              => handlers::network::handle_train(&mut request, state),
        (Method::Post, "/neuralFunctionPlot") => handlers::plot::handle_neural_function_plot(&mut request, state),
        (Method::Post, "/desiredPlot")        => handlers::plot::handle_desired_plot(&mut request, state),
        _ => not_found(),
    };

    if let Err(e) = request.respond(response) {
        error!(error = %e, "failed to write response");
    }
}
