pub mod network;
pub mod spec;

pub use network::{initialize_network, Network, NetworkState};
pub use spec::NetworkSpec;
