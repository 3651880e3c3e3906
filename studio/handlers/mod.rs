pub mod network;
pub mod plot;
