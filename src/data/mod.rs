pub mod dataset;
pub mod xor;

pub use dataset::{Dataset, LabeledDatapoint};
pub use xor::XorDataset;
