//! A* shortest paths over the 4-connected grid with caller-supplied passability.

use std::collections::{BTreeMap, BTreeSet};

use crate::map::GridMap;
use crate::types::{Pos, TileKind};

/// Tiles anything can stand on.
pub fn walkable(kind: TileKind) -> bool {
    !kind.blocks_movement()
}

/// Walkable tiles plus closed doors, for walkers that open doors as they go.
pub fn walkable_through_doors(kind: TileKind) -> bool {
    walkable(kind) || kind == TileKind::ClosedDoor
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// Shortest path from `start` to `goal`, both inclusive, stepping only onto in-bounds cells
/// whose tile satisfies `passable`. The start cell itself is never tested.
///
/// Returns `[start]` when the endpoints coincide and an empty path when the goal cannot be
/// reached.
pub fn a_star(
    map: &GridMap,
    start: Pos,
    goal: Pos,
    passable: impl Fn(TileKind) -> bool,
) -> Vec<Pos> {
    if start == goal {
        return vec![start];
    }
    if !map.in_bounds(start) || !map.in_bounds(goal) {
        return Vec::new();
    }

    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = start.manhattan(goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0_u32);

    while let Some(current) = open_set.pop_first() {
        let pos = Pos { y: current.y, x: current.x };
        if pos == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        let Some(&current_g) = g_score.get(&pos) else {
            continue;
        };
        // Stale entry left behind by a later improvement.
        if current.f - current.h > current_g {
            continue;
        }
        for next in pos.neighbors4() {
            if !map.in_bounds(next) || !passable(map.tile_at(next)) {
                continue;
            }
            let tentative = current_g + 1;
            if tentative < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, pos);
                g_score.insert(next, tentative);
                let h = next.manhattan(goal);
                open_set.insert(OpenNode { f: tentative + h, h, y: next.y, x: next.x });
            }
        }
    }
    Vec::new()
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut pos = goal;
    let mut path = vec![pos];
    while pos != start {
        let Some(&previous) = came_from.get(&pos) else {
            return Vec::new();
        };
        pos = previous;
        path.push(pos);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::test_support::*;

    fn assert_contiguous(path: &[Pos]) {
        for step in path.windows(2) {
            assert_eq!(step[0].manhattan(step[1]), 1, "{:?} -> {:?}", step[0], step[1]);
        }
    }

    #[test]
    fn same_start_and_goal_is_a_single_step() {
        let (map, origin) = open_room_fixture();
        assert_eq!(a_star(&map, origin, origin, walkable), vec![origin]);
        let wall = Pos::new(0, 0);
        assert_eq!(a_star(&map, wall, wall, walkable), vec![wall]);
    }

    #[test]
    fn open_path_length_matches_manhattan_distance() {
        let (map, _) = open_room_fixture();
        let start = Pos::new(1, 2);
        let goal = Pos::new(8, 7);
        let path = a_star(&map, start, goal, walkable);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len() as u32, start.manhattan(goal) + 1);
        assert_contiguous(&path);
    }

    #[test]
    fn detours_around_obstacles() {
        let (mut map, _) = open_room_fixture();
        for y in 1..=7 {
            map.set_tile(Pos::new(5, y), TileKind::Wall);
        }
        let start = Pos::new(3, 3);
        let goal = Pos::new(7, 3);
        let path = a_star(&map, start, goal, walkable);
        assert_contiguous(&path);
        assert!(path.iter().all(|&pos| walkable(map.tile_at(pos))));
        // Down to row 8, across, and back up.
        assert_eq!(path.len(), 4 + 5 + 5 + 1);
    }

    #[test]
    fn unbroken_wall_makes_goal_unreachable() {
        let (map, room) = sealed_room_fixture();
        let inside = room.center();
        assert!(a_star(&map, Pos::new(1, 1), inside, walkable).is_empty());
        assert!(a_star(&map, inside, Pos::new(18, 18), walkable).is_empty());
    }

    #[test]
    fn door_rules_are_chosen_by_the_caller() {
        let (map, start, door, beyond) = door_between_rooms_fixture();
        assert!(a_star(&map, start, beyond, walkable).is_empty());

        let path = a_star(&map, start, beyond, walkable_through_doors);
        assert!(path.contains(&door));
        assert_eq!(path.len() as u32, start.manhattan(beyond) + 1);
    }

    #[test]
    fn out_of_bounds_endpoints_yield_no_path() {
        let (map, origin) = open_room_fixture();
        assert!(a_star(&map, origin, Pos::new(40, 2), |_| true).is_empty());
        assert!(a_star(&map, Pos::new(-1, 2), origin, |_| true).is_empty());
    }

    #[test]
    fn impassable_goal_is_unreachable() {
        let (map, origin) = open_room_fixture();
        assert!(a_star(&map, origin, Pos::new(0, 5), walkable).is_empty());
    }

    #[test]
    fn stock_predicates() {
        assert!(walkable(TileKind::Floor));
        assert!(walkable(TileKind::Foliage));
        assert!(walkable(TileKind::Crosswalk));
        assert!(!walkable(TileKind::ClosedDoor));
        assert!(walkable_through_doors(TileKind::ClosedDoor));
        assert!(!walkable_through_doors(TileKind::SecretDoor));
        assert!(!walkable_through_doors(TileKind::Wall));
    }
}
