/// ranger-nn Studio
///
/// A small JSON API for creating, training, and plotting networks.
/// Served by a synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin studio --release
/// Bind address: `RANGER_STUDIO_ADDR` (default 127.0.0.1:7878).
///
/// Routes (all POST, JSON bodies):
///   /newNeuralNetwork  : create and store a randomly wired network
///   /train             : train a stored network on generated XOR data
///   /neuralFunctionPlot: sample a network over the dataset window
///   /desiredPlot       : sample the dataset's target function

mod state;
mod routes;
mod handlers;
mod util;

use std::sync::{Arc, Mutex};
use tiny_http::Server;
use tracing::{error, info};

use state::{StudioDefaults, StudioState};

const DEFAULT_ADDR: &str = "127.0.0.1:7878";

fn main() {
    // Structured JSON lines, one object per event.
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .init();

    let addr = std::env::var("RANGER_STUDIO_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_owned());
    let server = match Server::http(&addr) {
        Ok(s) => s,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind HTTP server");
            std::process::exit(1);
        }
    };

    let shared_state = Arc::new(Mutex::new(StudioState::new(StudioDefaults::default())));
    info!(%addr, "ranger-nn studio listening");

    // One thread per request; the state mutex serializes access to the
    // stored networks.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
