pub mod error;
pub mod json;
pub mod math;
pub mod nn;
pub mod network;
pub mod loss;
pub mod train;
pub mod data;
pub mod plot;

// Convenience re-exports
pub use error::{RangerError, Result};
pub use math::matrix::Matrix;
pub use math::vector::Vector;
pub use nn::activation::{ActivationFunction, SignalActivation, StrengthFunction};
pub use nn::dendrites::{DendriteSignal, Dendrites};
pub use nn::signal::{Signal, SignalVector};
pub use nn::unit_id::UnitId;
pub use network::network::{initialize_network, Network, NetworkState};
pub use network::spec::NetworkSpec;
pub use loss::mse::MseLoss;
pub use train::{evaluate, train_loop, EpochStats, TrainConfig};
pub use data::{Dataset, LabeledDatapoint, XorDataset};
pub use plot::{NeuralFunctionPlot, Window, MAX_RESOLUTION};
