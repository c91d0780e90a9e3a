//! Carving and connectivity primitives shared by the room, BSP, cave and city layouts.

use std::collections::VecDeque;

use crate::map::{GridMap, Rect};
use crate::types::{Pos, TileKind};

pub(super) fn carve_rect(map: &mut GridMap, rect: Rect, kind: TileKind) {
    for pos in rect.cells() {
        if map.is_interior(pos) {
            map.set_tile(pos, kind);
        }
    }
}

/// Carves floor from `start` to `end` with one bend; the border ring is never touched.
pub(super) fn carve_l_corridor(map: &mut GridMap, start: Pos, end: Pos, horizontal_first: bool) {
    if horizontal_first {
        carve_horizontal_line(map, start.y, start.x, end.x);
        carve_vertical_line(map, end.x, start.y, end.y);
    } else {
        carve_vertical_line(map, start.x, start.y, end.y);
        carve_horizontal_line(map, end.y, start.x, end.x);
    }
}

fn carve_horizontal_line(map: &mut GridMap, y: i32, left_x: i32, right_x: i32) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        carve_corridor_cell(map, Pos { y, x });
    }
}

fn carve_vertical_line(map: &mut GridMap, x: i32, top_y: i32, bottom_y: i32) {
    for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
        carve_corridor_cell(map, Pos { y, x });
    }
}

fn carve_corridor_cell(map: &mut GridMap, pos: Pos) {
    if map.is_interior(pos) && map.tile_at(pos) == TileKind::Wall {
        map.set_tile(pos, TileKind::Floor);
    }
}

/// Every cell 4-connected to `start` through tiles accepted by `passable`, in BFS order.
///
/// Returns an empty list when `start` itself is out of bounds or impassable.
pub fn flood_fill(map: &GridMap, start: Pos, passable: impl Fn(TileKind) -> bool) -> Vec<Pos> {
    let Some(start_index) = map.index(start) else {
        return Vec::new();
    };
    if !passable(map.cells[start_index].kind) {
        return Vec::new();
    }

    let mut seen = vec![false; map.cells.len()];
    seen[start_index] = true;
    let mut reached = vec![start];
    let mut open = VecDeque::from([start]);

    while let Some(pos) = open.pop_front() {
        for next in pos.neighbors4() {
            let Some(index) = map.index(next) else {
                continue;
            };
            if seen[index] || !passable(map.cells[index].kind) {
                continue;
            }
            seen[index] = true;
            reached.push(next);
            open.push_back(next);
        }
    }

    reached
}

/// Partitions every passable cell into 4-connected components, in scan order of first cell.
pub(super) fn connected_components(
    map: &GridMap,
    passable: impl Fn(TileKind) -> bool + Copy,
) -> Vec<Vec<Pos>> {
    let mut assigned = vec![false; map.cells.len()];
    let mut components = Vec::new();
    for index in 0..map.cells.len() {
        if assigned[index] || !passable(map.cells[index].kind) {
            continue;
        }
        let component = flood_fill(map, map.pos_of(index), passable);
        for &pos in &component {
            if let Some(member) = map.index(pos) {
                assigned[member] = true;
            }
        }
        components.push(component);
    }
    components
}
