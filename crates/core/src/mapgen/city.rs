//! City-block layout: a regular grid of district blocks between street bands, with a
//! lighting pass that shades the kerbs around blocks and brightens cells near commercial lots.

use tracing::debug;

use crate::config::{DistrictWeights, GenerationConfig};
use crate::map::{GridMap, Rect, Region, RegionKind};
use crate::rng::Rng;
use crate::types::{District, Pos, TileKind};

use super::grid::carve_rect;

pub(super) const SHADOW_BIAS: i16 = -2;
pub(super) const BRIGHT_BIAS: i16 = 3;

/// Sidewalk sub-variants with their draw probabilities; they sum to one.
const SIDEWALK_VARIANTS: [(TileKind, f64); 3] = [
    (TileKind::Sidewalk, 0.7),
    (TileKind::CrackedSidewalk, 0.2),
    (TileKind::PlanterSidewalk, 0.1),
];

pub(super) fn generate(config: &GenerationConfig, rng: &mut Rng) -> GridMap {
    let mut map = GridMap::new(config.width, config.height);
    let block_size = config.city.block_size as i32;
    let street_width = config.city.street_width as i32;
    let max_x = config.width as i32 - 2;
    let max_y = config.height as i32 - 2;

    let columns = block_starts(max_x, block_size, street_width);
    let rows = block_starts(max_y, block_size, street_width);

    for &y in &rows {
        for &x in &columns {
            let block = Rect::new(x, y, block_size, block_size);
            let district = pick_district(&config.city.districts, rng);
            carve_rect(&mut map, block, district.tile());
            scatter_concealment(&mut map, block, district, rng);
            map.regions.push(Region::new(block, RegionKind::Block(district)));
        }
    }

    // Each corridor is a sidewalk row followed by `street_width` street rows.
    for &y in &rows {
        let band_top = y + block_size;
        for band_y in band_top..(band_top + street_width + 1).min(max_y + 1) {
            for x in 1..=max_x {
                let kind =
                    if band_y == band_top { pick_sidewalk(rng) } else { TileKind::Street };
                map.set_tile(Pos { y: band_y, x }, kind);
            }
        }
    }

    for &x in &columns {
        let band_left = x + block_size;
        for band_x in band_left..(band_left + street_width + 1).min(max_x + 1) {
            for y in 1..=max_y {
                let pos = Pos { y, x: band_x };
                let kind = match map.tile_at(pos) {
                    TileKind::Street => TileKind::Crosswalk,
                    kind if kind.is_sidewalk() || kind == TileKind::Crosswalk => continue,
                    _ => TileKind::Street,
                };
                map.set_tile(pos, kind);
            }
        }
    }

    apply_lighting(&mut map);
    map.spawn = pick_spawn(&map, rng);
    debug!(
        blocks = map.regions.len(),
        columns = columns.len(),
        rows = rows.len(),
        "city blocks laid out"
    );
    map
}

/// Start coordinates of every block that fits along one axis of the interior.
///
/// Consecutive blocks are one corridor apart: `street_width` plus the sidewalk row.
fn block_starts(max: i32, block_size: i32, street_width: i32) -> Vec<i32> {
    let mut starts = Vec::new();
    let mut cursor = 1;
    while cursor + block_size - 1 <= max {
        starts.push(cursor);
        cursor += block_size + street_width + 1;
    }
    starts
}

/// Cumulative-weight draw over the normalised district frequencies.
fn pick_district(weights: &DistrictWeights, rng: &mut Rng) -> District {
    let total: f64 = District::ALL.iter().map(|&district| weights.weight(district)).sum();
    let roll = rng.next_f64() * total;
    let mut cumulative = 0.0;
    let mut fallback = District::Residential;
    for district in District::ALL {
        let weight = weights.weight(district);
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        fallback = district;
        if roll < cumulative {
            return district;
        }
    }
    fallback
}

fn pick_sidewalk(rng: &mut Rng) -> TileKind {
    let roll = rng.next_f64();
    let mut cumulative = 0.0;
    for (kind, probability) in SIDEWALK_VARIANTS {
        cumulative += probability;
        if roll < cumulative {
            return kind;
        }
    }
    TileKind::Sidewalk
}

/// Converts some of a block's interior lot cells, never its edge, into foliage.
fn scatter_concealment(map: &mut GridMap, block: Rect, district: District, rng: &mut Rng) {
    let interior = Rect::new(block.x + 1, block.y + 1, block.w - 2, block.h - 2);
    if interior.w <= 0 || interior.h <= 0 {
        return;
    }
    for pos in interior.cells() {
        if rng.chance(district.concealment_chance()) {
            map.set_tile(pos, TileKind::Foliage);
        }
    }
}

/// Shadow first, then brightness; both can land on the same cell and simply add up.
fn apply_lighting(map: &mut GridMap) {
    let blocks: Vec<Region> = map.regions.clone();

    for region in &blocks {
        for pos in region.rect.ring() {
            let kind = map.tile_at(pos);
            if (kind.is_street() || kind.is_sidewalk())
                && let Some(cell) = map.cell_mut(pos)
            {
                cell.light_bias = SHADOW_BIAS;
            }
        }
    }

    let mut bright = vec![false; map.cells.len()];
    for region in &blocks {
        let RegionKind::Block(district) = region.kind else {
            continue;
        };
        if !district.is_bright() {
            continue;
        }
        for pos in region.rect.cells() {
            if let Some(index) = map.index(pos) {
                bright[index] = true;
            }
        }
    }

    for index in 0..map.cells.len() {
        let pos = map.pos_of(index);
        let lit = pos
            .neighbors8()
            .iter()
            .any(|&neighbor| map.index(neighbor).is_some_and(|slot| bright[slot]));
        if lit {
            map.cells[index].light_bias += BRIGHT_BIAS;
        }
    }
}

fn pick_spawn(map: &GridMap, rng: &mut Rng) -> Pos {
    let streets: Vec<Pos> = map
        .positions()
        .filter(|&pos| {
            let kind = map.tile_at(pos);
            kind.is_street() || kind.is_sidewalk()
        })
        .collect();
    if let Some(&pos) = rng.pick(&streets) {
        return pos;
    }
    let open: Vec<Pos> = map.positions().filter(|&pos| !map.blocks_movement(pos)).collect();
    rng.pick(&open).copied().unwrap_or(Pos { y: 1, x: 1 })
}
