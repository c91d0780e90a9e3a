//! Cellular-automaton caves: random fill, majority-rule smoothing, then keep the largest cave.

use tracing::{debug, warn};

use crate::config::GenerationConfig;
use crate::map::{GridMap, Rect, Region, RegionKind};
use crate::rng::Rng;
use crate::types::{Pos, TileKind};

use super::grid::connected_components;

/// Wall-neighbour count at which a cell keeps its current state.
const MAJORITY_THRESHOLD: usize = 4;

pub(super) fn generate(config: &GenerationConfig, rng: &mut Rng) -> GridMap {
    let mut map = GridMap::new(config.width, config.height);
    for index in 0..map.cells.len() {
        let pos = map.pos_of(index);
        if map.is_interior(pos) && !rng.chance(config.cellular.fill_probability) {
            map.cells[index].kind = TileKind::Floor;
        }
    }

    for _ in 0..config.cellular.smoothing_steps {
        smooth(&mut map);
    }

    let components = connected_components(&map, |kind| kind == TileKind::Floor);
    let mut largest: Vec<Pos> = Vec::new();
    for component in &components {
        if component.len() > largest.len() {
            largest = component.clone();
        }
    }

    if largest.is_empty() {
        let center = Pos { y: (config.height / 2) as i32, x: (config.width / 2) as i32 };
        warn!("cellular pass left no floor; carving a single cell at the centre");
        map.set_tile(center, TileKind::Floor);
        map.spawn = center;
        map.regions = vec![Region::new(Rect::new(center.x, center.y, 1, 1), RegionKind::Cave)];
        return map;
    }

    let mut keep = vec![false; map.cells.len()];
    for &pos in &largest {
        if let Some(index) = map.index(pos) {
            keep[index] = true;
        }
    }
    for (index, cell) in map.cells.iter_mut().enumerate() {
        if cell.kind != TileKind::Wall && !keep[index] {
            cell.kind = TileKind::Wall;
        }
    }

    map.spawn = largest[rng.index(largest.len())];
    map.regions = vec![Region::new(bounding_rect(&largest), RegionKind::Cave)];
    debug!(
        components = components.len(),
        kept = largest.len(),
        steps = config.cellular.smoothing_steps,
        "cellular caves smoothed"
    );
    map
}

/// One generation of the majority rule; reads the old grid and writes a fresh one.
fn smooth(map: &mut GridMap) {
    let mut next: Vec<TileKind> = map.cells.iter().map(|cell| cell.kind).collect();
    for (index, slot) in next.iter_mut().enumerate() {
        let pos = map.pos_of(index);
        if !map.is_interior(pos) {
            continue;
        }
        let walls = pos
            .neighbors8()
            .iter()
            .filter(|&&neighbor| map.tile_at(neighbor) == TileKind::Wall)
            .count();
        if walls > MAJORITY_THRESHOLD {
            *slot = TileKind::Wall;
        } else if walls < MAJORITY_THRESHOLD {
            *slot = TileKind::Floor;
        }
    }
    for (cell, kind) in map.cells.iter_mut().zip(next) {
        cell.kind = kind;
    }
}

fn bounding_rect(cells: &[Pos]) -> Rect {
    let min_x = cells.iter().map(|pos| pos.x).min().unwrap_or(0);
    let max_x = cells.iter().map(|pos| pos.x).max().unwrap_or(0);
    let min_y = cells.iter().map(|pos| pos.y).min().unwrap_or(0);
    let max_y = cells.iter().map(|pos| pos.y).max().unwrap_or(0);
    Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}
