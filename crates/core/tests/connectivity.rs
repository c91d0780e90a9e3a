use std::collections::HashSet;

use levelgen::{
    Algorithm, GenerationConfig, GridMap, Pos, RegionKind, a_star, compute_visibility,
    flood_fill, generate, walkable, walkable_through_doors,
};
use proptest::prelude::*;

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Rooms),
        Just(Algorithm::Bsp),
        Just(Algorithm::Cellular),
        Just(Algorithm::City),
    ]
}

/// Every non-secret anchor is reachable from spawn and the spawn cell is walkable.
fn anchors_reachable(map: &GridMap) -> Result<(), String> {
    if map.blocks_movement(map.spawn) {
        return Err(format!("spawn {:?} blocks movement", map.spawn));
    }
    let reached: HashSet<Pos> =
        flood_fill(map, map.spawn, walkable_through_doors).into_iter().collect();
    for region in map.regions.iter().filter(|region| region.is_connectivity_anchor()) {
        if !reached.contains(&region.rect.center()) {
            return Err(format!("{:?} unreachable\n{}", region.rect, map.render_ascii()));
        }
    }
    Ok(())
}

fn border_is_closed(map: &GridMap) -> bool {
    map.positions().filter(|&pos| !map.is_interior(pos)).all(|pos| map.blocks_movement(pos))
}

#[test]
fn default_configs_keep_anchors_connected_across_seeds() {
    for algorithm in Algorithm::ALL {
        for seed in 0..40 {
            let config = GenerationConfig::new(algorithm, 64, 40).with_seed(seed);
            let map = generate(&config).expect("valid config");
            if let Err(message) = anchors_reachable(&map) {
                panic!("{algorithm:?} seed={seed}: {message}");
            }
            assert!(border_is_closed(&map), "{algorithm:?} seed={seed}");
        }
    }
}

#[test]
fn caves_keep_exactly_one_floor_component() {
    for seed in 0..30 {
        let config = GenerationConfig::new(Algorithm::Cellular, 70, 45).with_seed(seed);
        let map = generate(&config).expect("valid config");
        let open_cells = map.positions().filter(|&pos| !map.blocks_movement(pos)).count();
        assert_eq!(flood_fill(&map, map.spawn, walkable).len(), open_cells, "{seed}");
        assert!(map.regions.iter().all(|region| region.kind == RegionKind::Cave));
    }
}

#[test]
fn paths_from_spawn_reach_every_anchor() {
    for algorithm in Algorithm::ALL {
        let config = GenerationConfig::new(algorithm, 56, 36).with_seed(31);
        let map = generate(&config).expect("valid config");
        for region in map.regions.iter().filter(|region| region.is_connectivity_anchor()) {
            let goal = region.rect.center();
            let path = a_star(&map, map.spawn, goal, walkable_through_doors);
            assert_eq!(path.first(), Some(&map.spawn), "{algorithm:?}");
            assert_eq!(path.last(), Some(&goal));
            assert!(path.len() as u32 > map.spawn.manhattan(goal));
        }
    }
}

#[test]
fn spawn_is_always_visible_after_fov() {
    for algorithm in Algorithm::ALL {
        let config = GenerationConfig::new(algorithm, 48, 32).with_seed(8);
        let mut map = generate(&config).expect("valid config");
        let spawn = map.spawn;
        compute_visibility(&mut map, spawn, 6);
        assert!(map.is_visible(spawn));
        assert!(map.is_explored(spawn));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]
    #[test]
    fn generated_levels_keep_anchors_connected(
        algorithm in algorithm_strategy(),
        seed in any::<u64>(),
        width in 20_usize..72,
        height in 16_usize..48,
    ) {
        let config = GenerationConfig::new(algorithm, width, height).with_seed(seed);
        let map = generate(&config).expect("valid config");
        prop_assert_eq!(map.cells.len(), width * height);
        prop_assert!(border_is_closed(&map));
        let verdict = anchors_reachable(&map);
        prop_assert!(verdict.is_ok(), "{:?} seed={}: {:?}", algorithm, seed, verdict);
    }
}
