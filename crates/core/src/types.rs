use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal neighbours in a fixed north, east, south, west order.
    pub fn neighbors4(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
        ]
    }

    pub fn neighbors8(self) -> [Pos; 8] {
        [
            Pos { y: self.y - 1, x: self.x - 1 },
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y - 1, x: self.x + 1 },
            Pos { y: self.y, x: self.x - 1 },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x - 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y + 1, x: self.x + 1 },
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    ClosedDoor,
    SecretDoor,
    Foliage,
    Street,
    Crosswalk,
    Sidewalk,
    CrackedSidewalk,
    PlanterSidewalk,
    ResidentialLot,
    CommercialLot,
    IndustrialLot,
    ParkLawn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TileProperties {
    blocks_movement: bool,
    blocks_sight: bool,
    provides_concealment: bool,
}

const fn props(
    blocks_movement: bool,
    blocks_sight: bool,
    provides_concealment: bool,
) -> TileProperties {
    TileProperties { blocks_movement, blocks_sight, provides_concealment }
}

impl TileKind {
    pub const ALL: [TileKind; 14] = [
        TileKind::Wall,
        TileKind::Floor,
        TileKind::ClosedDoor,
        TileKind::SecretDoor,
        TileKind::Foliage,
        TileKind::Street,
        TileKind::Crosswalk,
        TileKind::Sidewalk,
        TileKind::CrackedSidewalk,
        TileKind::PlanterSidewalk,
        TileKind::ResidentialLot,
        TileKind::CommercialLot,
        TileKind::IndustrialLot,
        TileKind::ParkLawn,
    ];

    const fn properties(self) -> TileProperties {
        match self {
            TileKind::Wall | TileKind::SecretDoor | TileKind::ClosedDoor => {
                props(true, true, false)
            }
            TileKind::Foliage => props(false, false, true),
            TileKind::Floor
            | TileKind::Street
            | TileKind::Crosswalk
            | TileKind::Sidewalk
            | TileKind::CrackedSidewalk
            | TileKind::PlanterSidewalk
            | TileKind::ResidentialLot
            | TileKind::CommercialLot
            | TileKind::IndustrialLot
            | TileKind::ParkLawn => props(false, false, false),
        }
    }

    pub const fn blocks_movement(self) -> bool {
        self.properties().blocks_movement
    }

    pub const fn blocks_sight(self) -> bool {
        self.properties().blocks_sight
    }

    pub const fn provides_concealment(self) -> bool {
        self.properties().provides_concealment
    }

    pub const fn is_door(self) -> bool {
        matches!(self, TileKind::ClosedDoor | TileKind::SecretDoor)
    }

    pub const fn is_street(self) -> bool {
        matches!(self, TileKind::Street | TileKind::Crosswalk)
    }

    pub const fn is_sidewalk(self) -> bool {
        matches!(
            self,
            TileKind::Sidewalk | TileKind::CrackedSidewalk | TileKind::PlanterSidewalk
        )
    }

    pub const fn district(self) -> Option<District> {
        match self {
            TileKind::ResidentialLot => Some(District::Residential),
            TileKind::CommercialLot => Some(District::Commercial),
            TileKind::IndustrialLot => Some(District::Industrial),
            TileKind::ParkLawn => Some(District::Park),
            _ => None,
        }
    }

    /// Stable wire code used by canonical encodings.
    pub const fn code(self) -> u8 {
        match self {
            TileKind::Wall => 0,
            TileKind::Floor => 1,
            TileKind::ClosedDoor => 2,
            TileKind::SecretDoor => 3,
            TileKind::Foliage => 4,
            TileKind::Street => 5,
            TileKind::Crosswalk => 6,
            TileKind::Sidewalk => 7,
            TileKind::CrackedSidewalk => 8,
            TileKind::PlanterSidewalk => 9,
            TileKind::ResidentialLot => 10,
            TileKind::CommercialLot => 11,
            TileKind::IndustrialLot => 12,
            TileKind::ParkLawn => 13,
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::ClosedDoor => '+',
            TileKind::SecretDoor => 'S',
            TileKind::Foliage => '"',
            TileKind::Street => '=',
            TileKind::Crosswalk => ':',
            TileKind::Sidewalk => '_',
            TileKind::CrackedSidewalk => ',',
            TileKind::PlanterSidewalk => ';',
            TileKind::ResidentialLot => 'r',
            TileKind::CommercialLot => 'c',
            TileKind::IndustrialLot => 'i',
            TileKind::ParkLawn => 'p',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum District {
    Residential,
    Commercial,
    Industrial,
    Park,
}

impl District {
    pub const ALL: [District; 4] =
        [District::Residential, District::Commercial, District::Industrial, District::Park];

    pub const fn tile(self) -> TileKind {
        match self {
            District::Residential => TileKind::ResidentialLot,
            District::Commercial => TileKind::CommercialLot,
            District::Industrial => TileKind::IndustrialLot,
            District::Park => TileKind::ParkLawn,
        }
    }

    /// Chance that an interior lot cell of this district becomes foliage.
    pub const fn concealment_chance(self) -> f64 {
        match self {
            District::Residential => 0.04,
            District::Commercial => 0.0,
            District::Industrial => 0.08,
            District::Park => 0.22,
        }
    }

    /// Bright districts light up every cell around them.
    pub const fn is_bright(self) -> bool {
        matches!(self, District::Commercial)
    }

    pub const fn code(self) -> u8 {
        match self {
            District::Residential => 0,
            District::Commercial => 1,
            District::Industrial => 2,
            District::Park => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_walls_and_doors_block_movement_or_sight() {
        for tile in TileKind::ALL {
            let solid =
                matches!(tile, TileKind::Wall | TileKind::ClosedDoor | TileKind::SecretDoor);
            assert_eq!(tile.blocks_movement(), solid, "{tile:?}");
            assert_eq!(tile.blocks_sight(), solid, "{tile:?}");
        }
    }

    #[test]
    fn foliage_is_the_only_concealing_tile() {
        let concealing: Vec<_> =
            TileKind::ALL.into_iter().filter(|tile| tile.provides_concealment()).collect();
        assert_eq!(concealing, vec![TileKind::Foliage]);
    }

    #[test]
    fn tile_codes_are_unique() {
        let mut codes: Vec<u8> = TileKind::ALL.iter().map(|tile| tile.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), TileKind::ALL.len());
    }

    #[test]
    fn district_tiles_map_back_to_their_district() {
        for district in District::ALL {
            assert_eq!(district.tile().district(), Some(district));
        }
    }
}
