//! Shared map fixtures for the visibility and pathfinding tests.

use crate::map::{GridMap, Rect};
use crate::types::{Pos, TileKind};

/// Walled 11x11 map with a fully open 9x9 interior.
pub(super) fn open_room_fixture() -> (GridMap, Pos) {
    let mut map = GridMap::new(11, 11);
    carve(&mut map, Rect::new(1, 1, 9, 9), TileKind::Floor);
    (map, Pos::new(5, 5))
}

/// One-row corridor at y = 5 with a wall plugged in at x = 6.
pub(super) fn wall_occlusion_fixture() -> (GridMap, Pos) {
    let mut map = GridMap::new(11, 11);
    carve(&mut map, Rect::new(1, 5, 9, 1), TileKind::Floor);
    map.set_tile(Pos::new(6, 5), TileKind::Wall);
    (map, Pos::new(3, 5))
}

/// Two 3x3 rooms joined through a single closed door at (4, 2).
pub(super) fn door_between_rooms_fixture() -> (GridMap, Pos, Pos, Pos) {
    let mut map = GridMap::new(9, 5);
    carve(&mut map, Rect::new(1, 1, 3, 3), TileKind::Floor);
    carve(&mut map, Rect::new(5, 1, 3, 3), TileKind::Floor);
    let door = Pos::new(4, 2);
    map.set_tile(door, TileKind::ClosedDoor);
    (map, Pos::new(1, 2), door, Pos::new(7, 2))
}

/// A 5x5 room sealed on all sides, sitting inside a larger open field.
pub(super) fn sealed_room_fixture() -> (GridMap, Rect) {
    let mut map = GridMap::new(20, 20);
    carve(&mut map, Rect::new(1, 1, 18, 18), TileKind::Floor);
    let room = Rect::new(5, 5, 5, 5);
    carve(&mut map, room.expanded(1), TileKind::Wall);
    carve(&mut map, room, TileKind::Floor);
    (map, room)
}

fn carve(map: &mut GridMap, rect: Rect, kind: TileKind) {
    for pos in rect.cells() {
        map.set_tile(pos, kind);
    }
}
