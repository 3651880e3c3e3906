use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use ranger_nn::Network;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Values used when a request leaves a field out.
#[derive(Debug, Clone)]
pub struct StudioDefaults {
    pub sparsity_constant: f64,
    pub learning_rate: f64,
    pub epochs: usize,
    pub num_examples: usize,
    pub plot_resolution: usize,
}

impl Default for StudioDefaults {
    fn default() -> Self {
        StudioDefaults {
            sparsity_constant: 3.0,
            learning_rate: 0.01,
            epochs: 5,
            num_examples: 1_000,
            plot_resolution: 25,
        }
    }
}

// ---------------------------------------------------------------------------
// Network repository
// ---------------------------------------------------------------------------

/// Owns every network created through the API, keyed by session id.
#[derive(Debug, Default)]
pub struct NetworkRepository {
    networks: BTreeMap<u64, Network>,
    next_id: u64,
}

impl NetworkRepository {
    pub fn insert(&mut self, network: Network) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.networks.insert(id, network);
        id
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Network> {
        self.networks.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

pub struct StudioState {
    pub repository: NetworkRepository,
    pub defaults: StudioDefaults,
}

impl StudioState {
    pub fn new(defaults: StudioDefaults) -> Self {
        StudioState {
            repository: NetworkRepository::default(),
            defaults,
        }
    }
}

/// Shared state type, an `Arc<Mutex<StudioState>>` passed to every handler.
/// The mutex also serializes all access to each stored network.
pub type SharedState = Arc<Mutex<StudioState>>;
