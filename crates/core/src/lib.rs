//! Deterministic tile-level generation with field-of-view and pathfinding queries.

pub mod config;
pub mod error;
pub mod map;
pub mod mapgen;
pub mod rng;
pub mod spatial;
pub mod types;

pub use config::{
    Algorithm, BspConfig, CellularConfig, CityConfig, DistrictWeights, GenerationConfig,
    RoomsConfig,
};
pub use error::ConfigError;
pub use map::{Cell, GridMap, Rect, Region, RegionKind};
pub use mapgen::{flood_fill, generate};
pub use rng::Rng;
pub use spatial::{a_star, compute_visibility, has_line_of_sight, walkable, walkable_through_doors};
pub use types::*;
