//! Field of view by symmetric recursive shadow-casting over eight octants, plus a point-to-point
//! line-of-sight check.

use crate::map::GridMap;
use crate::types::Pos;

/// Maps octant-local `(depth, column)` offsets onto absolute map coordinates.
fn transform_octant(origin: Pos, octant: u8, depth: i32, column: i32) -> Pos {
    match octant {
        0 => Pos { y: origin.y - column, x: origin.x + depth },
        1 => Pos { y: origin.y - depth, x: origin.x + column },
        2 => Pos { y: origin.y - depth, x: origin.x - column },
        3 => Pos { y: origin.y - column, x: origin.x - depth },
        4 => Pos { y: origin.y + column, x: origin.x - depth },
        5 => Pos { y: origin.y + depth, x: origin.x - column },
        6 => Pos { y: origin.y + depth, x: origin.x + column },
        7 => Pos { y: origin.y + column, x: origin.x + depth },
        _ => origin,
    }
}

/// Recomputes the `visible` flags from `origin` out to a Euclidean `radius`.
///
/// Every previously visible cell is cleared first; cells that become visible are also marked
/// explored. An out-of-bounds origin leaves the map with nothing visible.
///
/// Open cells are only lit when the origin sits inside their own shadow-cast cone, so for
/// any two open cells either both see each other or neither does.
pub fn compute_visibility(map: &mut GridMap, origin: Pos, radius: u32) {
    map.clear_visible();
    if !map.in_bounds(origin) {
        return;
    }
    map.mark_seen(origin);
    let radius = i32::try_from(radius).unwrap_or(i32::MAX);
    for octant in 0..8 {
        scan_row(map, origin, radius, octant, 1, Slope::new(0, 1), Slope::new(1, 1));
    }
}

/// Exact rational slope `rise / run`; `run` is always positive.
#[derive(Clone, Copy, Debug)]
struct Slope {
    rise: i64,
    run: i64,
}

impl Slope {
    fn new(rise: i32, run: i32) -> Self {
        Self { rise: i64::from(rise), run: i64::from(run) }
    }

    /// Slope through the leading corner of the cell at `(depth, column)`.
    fn cell_edge(depth: i32, column: i32) -> Self {
        Self::new(2 * column - 1, 2 * depth)
    }

    /// `round(depth * slope)` with halves rounded up.
    fn first_column(&self, depth: i32) -> i32 {
        let scaled = 2 * i64::from(depth) * self.rise + self.run;
        scaled.div_euclid(2 * self.run) as i32
    }

    /// `round(depth * slope)` with halves rounded down.
    fn last_column(&self, depth: i32) -> i32 {
        let scaled = self.run - 2 * i64::from(depth) * self.rise;
        -(scaled.div_euclid(2 * self.run) as i32)
    }

    fn at_or_below(&self, depth: i32, column: i32) -> bool {
        i64::from(column) * self.run >= i64::from(depth) * self.rise
    }

    fn at_or_above(&self, depth: i32, column: i32) -> bool {
        i64::from(column) * self.run <= i64::from(depth) * self.rise
    }
}

/// Scans one row of an octant between the `start` and `end` slopes, recursing into the
/// next row for every open run of cells.
fn scan_row(
    map: &mut GridMap,
    origin: Pos,
    radius: i32,
    octant: u8,
    depth: i32,
    mut start: Slope,
    end: Slope,
) {
    if depth > radius {
        return;
    }
    let radius_sq = i64::from(radius) * i64::from(radius);
    let mut previous_blocks = None;
    for column in start.first_column(depth)..=end.last_column(depth) {
        let pos = transform_octant(origin, octant, depth, column);
        let blocks = map.blocks_sight(pos);
        let distance_sq = i64::from(depth).pow(2) + i64::from(column).pow(2);
        let symmetric = start.at_or_below(depth, column) && end.at_or_above(depth, column);
        if distance_sq <= radius_sq && (blocks || symmetric) {
            map.mark_seen(pos);
        }

        match (previous_blocks, blocks) {
            (Some(true), false) => start = Slope::cell_edge(depth, column),
            (Some(false), true) => {
                let edge = Slope::cell_edge(depth, column);
                scan_row(map, origin, radius, octant, depth + 1, start, edge);
            }
            _ => {}
        }
        previous_blocks = Some(blocks);
    }
    if previous_blocks == Some(false) {
        scan_row(map, origin, radius, octant, depth + 1, start, end);
    }
}

/// Bresenham walk from `from` to `to`.
///
/// A concealing or out-of-bounds target is never in sight. Otherwise every cell strictly
/// between the endpoints must let sight through.
pub fn has_line_of_sight(map: &GridMap, from: Pos, to: Pos) -> bool {
    if !map.in_bounds(to) || map.provides_concealment(to) {
        return false;
    }

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let step_x = dx.signum();
    let step_y = dy.signum();
    let total_x = dx.abs();
    let total_y = dy.abs();

    let mut x = from.x;
    let mut y = from.y;
    let mut taken_x = 0;
    let mut taken_y = 0;

    while taken_x < total_x || taken_y < total_y {
        let lhs = (1 + 2 * taken_x) * total_y;
        let rhs = (1 + 2 * taken_y) * total_x;

        if lhs == rhs {
            x += step_x;
            y += step_y;
            taken_x += 1;
            taken_y += 1;
        } else if lhs < rhs {
            x += step_x;
            taken_x += 1;
        } else {
            y += step_y;
            taken_y += 1;
        }

        if x == to.x && y == to.y {
            break;
        }
        if map.blocks_sight(Pos { y, x }) {
            return false;
        }
    }
    true
}
