//! Room-and-corridor layout: rejection-sampled rooms chained by L-shaped corridors.

use tracing::debug;

use crate::config::GenerationConfig;
use crate::map::{GridMap, Rect, Region, RegionKind};
use crate::rng::Rng;
use crate::types::{Pos, TileKind};

use super::grid::{carve_l_corridor, carve_rect};

const SECRET_ROOM_MIN_SIZE: i32 = 2;
const SECRET_ROOM_MAX_SIZE: i32 = 3;
const SECRET_ROOM_ATTEMPTS: usize = 24;

pub(super) fn generate(config: &GenerationConfig, rng: &mut Rng) -> GridMap {
    let width = config.width as i32;
    let height = config.height as i32;
    let mut map = GridMap::new(config.width, config.height);

    let min_size = config.rooms.min_size as i32;
    let max_width = (config.rooms.max_size as i32).min(width - 2);
    let max_height = (config.rooms.max_size as i32).min(height - 2);

    let mut rooms: Vec<Rect> = Vec::new();
    for _ in 0..config.rooms.max_rooms {
        let room_width = rng.range_inclusive(min_size, max_width);
        let room_height = rng.range_inclusive(min_size, max_height);
        let x = rng.range_inclusive(1, width - room_width - 1);
        let y = rng.range_inclusive(1, height - room_height - 1);
        let candidate = Rect::new(x, y, room_width, room_height);
        if rooms.iter().any(|room| room.intersects(&candidate)) {
            continue;
        }

        carve_rect(&mut map, candidate, TileKind::Floor);
        if let Some(previous) = rooms.last() {
            carve_l_corridor(&mut map, previous.center(), candidate.center(), rng.next_bool());
        }
        rooms.push(candidate);
    }

    let doors = place_doors(&mut map, &rooms);

    map.regions = rooms.iter().map(|&rect| Region::new(rect, RegionKind::Room)).collect();
    let mut secret_rooms = 0;
    // A lone room has no corridor network for a secret room to hide behind.
    let secret_attempts = if rooms.len() < 2 { 0 } else { rooms.len() };
    for _ in 0..secret_attempts {
        if rng.chance(config.secret_room_chance) && place_secret_room(&mut map, rng) {
            secret_rooms += 1;
        }
    }

    map.spawn = rooms.first().map_or(Pos { y: 1, x: 1 }, |room| room.center());
    debug!(rooms = rooms.len(), doors, secret_rooms, "room-and-corridor layout carved");
    map
}

/// Turns corridor breaches in each room's wall ring into closed doors.
///
/// A breach qualifies when floor continues through it on one axis and solid rock flanks
/// it on the other. Corners and T-junctions can fail the test and stay open.
fn place_doors(map: &mut GridMap, rooms: &[Rect]) -> usize {
    let mut placed = 0;
    for room in rooms {
        for pos in room.ring() {
            if map.tile_at(pos) == TileKind::Floor && is_doorway(map, pos) {
                map.set_tile(pos, TileKind::ClosedDoor);
                placed += 1;
            }
        }
    }
    placed
}

fn is_doorway(map: &GridMap, pos: Pos) -> bool {
    let [north, east, south, west] = pos.neighbors4();
    let floor = |p: Pos| map.tile_at(p) == TileKind::Floor;
    let wall = |p: Pos| map.tile_at(p) == TileKind::Wall;

    (floor(west) && floor(east) && wall(north) && wall(south))
        || (floor(north) && floor(south) && wall(west) && wall(east))
}

/// Buries a small room in solid rock next to existing floor, reachable only via a secret door.
fn place_secret_room(map: &mut GridMap, rng: &mut Rng) -> bool {
    let width = map.width as i32;
    let height = map.height as i32;
    for _ in 0..SECRET_ROOM_ATTEMPTS {
        let room_width = rng.range_inclusive(SECRET_ROOM_MIN_SIZE, SECRET_ROOM_MAX_SIZE);
        let room_height = rng.range_inclusive(SECRET_ROOM_MIN_SIZE, SECRET_ROOM_MAX_SIZE);
        if room_width + 2 > width || room_height + 2 > height {
            return false;
        }
        let x = rng.range_inclusive(1, width - room_width - 1);
        let y = rng.range_inclusive(1, height - room_height - 1);
        let candidate = Rect::new(x, y, room_width, room_height);

        if !candidate.expanded(1).cells().all(|pos| map.tile_at(pos) == TileKind::Wall) {
            continue;
        }
        // Keep secret rooms from opening into each other.
        if map.regions.iter().any(|region| {
            region.kind == RegionKind::SecretRoom && region.rect.intersects(&candidate.expanded(2))
        }) {
            continue;
        }

        let door_candidates: Vec<Pos> = candidate
            .ring()
            .filter(|&pos| map.is_interior(pos) && !is_ring_corner(candidate, pos))
            .filter(|&pos| {
                pos.neighbors4().iter().filter(|&&next| !map.blocks_movement(next)).count() == 1
            })
            .collect();
        let Some(&door) = rng.pick(&door_candidates) else {
            continue;
        };

        carve_rect(map, candidate, TileKind::Floor);
        map.set_tile(door, TileKind::SecretDoor);
        map.regions.push(Region::new(candidate, RegionKind::SecretRoom));
        return true;
    }
    false
}

fn is_ring_corner(rect: Rect, pos: Pos) -> bool {
    (pos.x == rect.x - 1 || pos.x == rect.right() + 1)
        && (pos.y == rect.y - 1 || pos.y == rect.bottom() + 1)
}
