//! Upper bounds on request fields. Handlers check these before taking the
//! state lock, so an oversized request fails fast and never runs while
//! holding it.

use ranger_nn::MAX_RESOLUTION;

pub const MAX_EPOCHS: usize = 1_000;
pub const MAX_EXAMPLES: usize = 10_000;
pub const MAX_LAYERS: usize = 8;
pub const MAX_LAYER_SIZE: usize = 1_024;

/// An absent field is always within bounds; its default is.
pub fn check(field: &str, value: Option<usize>, max: usize) -> Result<(), String> {
    match value {
        Some(v) if v > max => Err(format!("{field} of {v} exceeds the limit of {max}")),
        _ => Ok(()),
    }
}

pub fn check_resolution(resolution: Option<usize>) -> Result<(), String> {
    check("resolution", resolution, MAX_RESOLUTION)
}

pub fn check_layer_sizes(layer_sizes: &[usize]) -> Result<(), String> {
    check("layerSizes length", Some(layer_sizes.len()), MAX_LAYERS)?;
    for &size in layer_sizes {
        check("layer size", Some(size), MAX_LAYER_SIZE)?;
    }
    Ok(())
}
