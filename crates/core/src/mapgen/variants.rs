//! Cosmetic terrain variants over walkable cells, driven by a coherent noise field.

use crate::map::GridMap;

use super::noise::ValueNoise;
use super::seed::variant_seed;

pub const VARIANT_COUNT: u8 = 3;

/// Lattice cells per map cell; lower values give broader patches.
const NOISE_FREQUENCY: f64 = 0.12;

/// Rewrites `variant` on every walkable cell from the noise field seeded off `seed`.
///
/// Tile kinds are untouched and blocking cells keep variant 0, so running the pass twice
/// with the same seed leaves the map unchanged.
pub(super) fn apply(map: &mut GridMap, seed: u64) {
    let noise = ValueNoise::new(variant_seed(seed));
    for index in 0..map.cells.len() {
        let pos = map.pos_of(index);
        let cell = &mut map.cells[index];
        if cell.kind.blocks_movement() {
            cell.variant = 0;
            continue;
        }
        let value = noise.sample(pos.x as f64 * NOISE_FREQUENCY, pos.y as f64 * NOISE_FREQUENCY);
        cell.variant = bucket(value);
    }
}

fn bucket(value: f64) -> u8 {
    let scaled = (value * f64::from(VARIANT_COUNT)).floor();
    scaled.clamp(0.0, f64::from(VARIANT_COUNT - 1)) as u8
}
