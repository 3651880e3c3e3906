pub mod neural_function_plot;
pub mod window;

pub use neural_function_plot::{NeuralFunctionPlot, MAX_RESOLUTION};
pub use window::Window;
