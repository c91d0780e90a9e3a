//! Level generation: validates the config, resolves the seed, runs the selected layout
//! algorithm on one PRNG stream, then assigns terrain variants.

mod bsp;
mod cellular;
mod city;
mod grid;
mod noise;
mod rooms;
mod seed;
mod variants;

use tracing::{debug, info};

use crate::config::{Algorithm, GenerationConfig};
use crate::error::ConfigError;
use crate::map::GridMap;
use crate::rng::Rng;

pub use grid::flood_fill;
pub use seed::runtime_seed;
pub use variants::VARIANT_COUNT;

/// Builds a complete level for `config`.
///
/// The config is validated before any randomness is drawn. When it carries no seed, one is
/// taken from [`runtime_seed`]; either way the seed used ends up in [`GridMap::seed`].
pub fn generate(config: &GenerationConfig) -> Result<GridMap, ConfigError> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(runtime_seed);
    let map = generate_seeded(config, seed);
    info!(
        algorithm = config.algorithm.name(),
        width = map.width,
        height = map.height,
        seed,
        regions = map.regions.len(),
        "level generated"
    );
    Ok(map)
}

fn generate_seeded(config: &GenerationConfig, seed: u64) -> GridMap {
    let mut rng = Rng::new(seed);
    let mut map = run_layout(config.algorithm, config, &mut rng);
    map.seed = seed;
    variants::apply(&mut map, seed);
    debug!(fingerprint = map.fingerprint(), "terrain variants assigned");
    map
}

fn run_layout(algorithm: Algorithm, config: &GenerationConfig, rng: &mut Rng) -> GridMap {
    match algorithm {
        Algorithm::Rooms => rooms::generate(config, rng),
        Algorithm::Bsp => bsp::generate(config, rng),
        Algorithm::Cellular => cellular::generate(config, rng),
        Algorithm::City => city::generate(config, rng),
    }
}
