pub mod activation;
pub mod dendrites;
pub mod layer;
pub mod neuron;
pub mod signal;
pub mod unit_id;

pub use activation::{ActivationFunction, SignalActivation, StrengthFunction};
pub use dendrites::{DendriteSignal, Dendrites};
pub use layer::Layer;
pub use neuron::Neuron;
pub use signal::{Signal, SignalVector};
pub use unit_id::{IdAllocator, UnitId};
