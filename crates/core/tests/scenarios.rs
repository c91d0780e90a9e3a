use levelgen::{
    Algorithm, ConfigError, District, DistrictWeights, GenerationConfig, GridMap, RegionKind,
    TileKind, a_star, generate, walkable_through_doors,
};

#[test]
fn single_room_level_matches_its_region_exactly() {
    for seed in 0..20 {
        let mut config = GenerationConfig::new(Algorithm::Rooms, 10, 10).with_seed(seed);
        config.rooms.max_rooms = 1;
        let map = generate(&config).expect("valid config");

        assert_eq!(map.regions.len(), 1, "seed={seed}");
        let room = map.regions[0].rect;
        assert_eq!(map.regions[0].kind, RegionKind::Room);
        for pos in map.positions() {
            let expected = if room.contains(pos) { TileKind::Floor } else { TileKind::Wall };
            assert_eq!(map.tile_at(pos), expected, "seed={seed} pos={pos:?}");
        }
        assert_eq!(map.count(TileKind::Floor), room.area() as usize);
        assert_eq!(map.count(TileKind::ClosedDoor), 0);
        assert_eq!(map.spawn, room.center());
    }
}

#[test]
fn park_only_city_contains_no_other_district() {
    for seed in 0..10 {
        let mut config = GenerationConfig::new(Algorithm::City, 60, 40).with_seed(seed);
        config.city.districts = DistrictWeights::only(District::Park);
        let map = generate(&config).expect("valid config");

        for kind in TileKind::ALL {
            if let Some(district) = kind.district()
                && district != District::Park
            {
                assert_eq!(map.count(kind), 0, "seed={seed} {kind:?}");
            }
        }
        assert!(map.count(TileKind::ParkLawn) > 0);
    }
}

#[test]
fn minimal_city_still_fits_one_block() {
    let mut config = GenerationConfig::new(Algorithm::City, 6, 6).with_seed(1);
    config.city.block_size = 4;
    config.city.districts = DistrictWeights::only(District::Park);
    let map = generate(&config).expect("valid config");
    assert_eq!(map.regions.len(), 1);
    assert!(map.count(TileKind::ParkLawn) > 0);
}

#[test]
fn secret_rooms_stay_sealed_until_their_door_opens() {
    let mut config = GenerationConfig::new(Algorithm::Rooms, 80, 50).with_seed(4);
    config.secret_room_chance = 1.0;
    let mut map = generate(&config).expect("valid config");
    let secrets: Vec<_> = map
        .regions
        .iter()
        .filter(|region| region.kind == RegionKind::SecretRoom)
        .map(|region| region.rect)
        .collect();

    for room in secrets {
        let door = room
            .expanded(1)
            .cells()
            .find(|&pos| map.tile_at(pos) == TileKind::SecretDoor)
            .expect("every secret room has a secret door");
        let route = |map: &GridMap| a_star(map, map.spawn, room.center(), walkable_through_doors);
        assert!(route(&map).is_empty());
        assert!(map.open_door(door));
        assert_eq!(map.tile_at(door), TileKind::Floor);
        assert!(!route(&map).is_empty());
    }
}

#[test]
fn oversized_rooms_are_a_config_error() {
    let mut config = GenerationConfig::new(Algorithm::Rooms, 10, 10).with_seed(1);
    config.rooms.min_size = 9;
    config.rooms.max_size = 12;
    assert!(matches!(generate(&config), Err(ConfigError::DoesNotFit { .. })));
}

#[test]
fn degenerate_caves_still_produce_a_walkable_spawn() {
    let mut config = GenerationConfig::new(Algorithm::Cellular, 30, 20).with_seed(5);
    config.cellular.fill_probability = 1.0;
    let map = generate(&config).expect("valid config");
    assert!(!map.blocks_movement(map.spawn));
    assert_eq!(map.count(TileKind::Floor), 1);
}
