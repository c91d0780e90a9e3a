//! Immutable parameter bag for a generation request, plus TOML loading and validation.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::District;

/// Smallest map side any algorithm accepts: a one-cell border around a 3x3 interior.
pub const MIN_MAP_SIDE: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Rooms,
    Bsp,
    Cellular,
    City,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] =
        [Algorithm::Rooms, Algorithm::Bsp, Algorithm::Cellular, Algorithm::City];

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Rooms => "rooms",
            Algorithm::Bsp => "bsp",
            Algorithm::Cellular => "cellular",
            Algorithm::City => "city",
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == normalized)
            .ok_or_else(|| format!("unknown algorithm '{raw}' (expected rooms, bsp, cellular or city)"))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomsConfig {
    pub max_rooms: usize,
    pub min_size: usize,
    pub max_size: usize,
}

impl Default for RoomsConfig {
    fn default() -> Self {
        Self { max_rooms: 12, min_size: 4, max_size: 9 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BspConfig {
    pub max_depth: u32,
    pub min_room_size: usize,
    pub max_room_size: usize,
    /// Minimum Chebyshev distance between two concealment patches.
    pub concealment_spacing: usize,
    /// Upper bound on concealment patches as a fraction of the room count.
    pub concealment_per_room: f64,
}

impl Default for BspConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            min_room_size: 4,
            max_room_size: 10,
            concealment_spacing: 6,
            concealment_per_room: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellularConfig {
    /// Probability that an interior cell starts out as wall.
    pub fill_probability: f64,
    pub smoothing_steps: u32,
}

impl Default for CellularConfig {
    fn default() -> Self {
        Self { fill_probability: 0.45, smoothing_steps: 5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistrictWeights {
    pub residential: f64,
    pub commercial: f64,
    pub industrial: f64,
    pub park: f64,
}

impl DistrictWeights {
    pub fn only(district: District) -> Self {
        let mut weights = Self { residential: 0.0, commercial: 0.0, industrial: 0.0, park: 0.0 };
        *weights.weight_mut(district) = 1.0;
        weights
    }

    pub fn weight(&self, district: District) -> f64 {
        match district {
            District::Residential => self.residential,
            District::Commercial => self.commercial,
            District::Industrial => self.industrial,
            District::Park => self.park,
        }
    }

    fn weight_mut(&mut self, district: District) -> &mut f64 {
        match district {
            District::Residential => &mut self.residential,
            District::Commercial => &mut self.commercial,
            District::Industrial => &mut self.industrial,
            District::Park => &mut self.park,
        }
    }
}

impl Default for DistrictWeights {
    fn default() -> Self {
        Self { residential: 0.4, commercial: 0.25, industrial: 0.2, park: 0.15 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub block_size: usize,
    pub street_width: usize,
    pub districts: DistrictWeights,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self { block_size: 8, street_width: 3, districts: DistrictWeights::default() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub algorithm: Algorithm,
    pub width: usize,
    pub height: usize,
    /// `None` draws a fresh seed from the environment for each request.
    pub seed: Option<u64>,
    pub secret_room_chance: f64,
    pub rooms: RoomsConfig,
    pub bsp: BspConfig,
    pub cellular: CellularConfig,
    pub city: CityConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            width: 64,
            height: 40,
            seed: None,
            secret_room_chance: 0.25,
            rooms: RoomsConfig::default(),
            bsp: BspConfig::default(),
            cellular: CellularConfig::default(),
            city: CityConfig::default(),
        }
    }
}

impl GenerationConfig {
    pub fn new(algorithm: Algorithm, width: usize, height: usize) -> Self {
        Self { algorithm, width, height, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    /// Checks the shared bounds and the parameters of the selected algorithm.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_MAP_SIDE || self.height < MIN_MAP_SIDE {
            return Err(ConfigError::MapTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_MAP_SIDE,
            });
        }
        check_probability("secret_room_chance", self.secret_room_chance)?;

        match self.algorithm {
            Algorithm::Rooms => {
                let rooms = &self.rooms;
                check_at_least("rooms.max_rooms", rooms.max_rooms, 1)?;
                self.check_size_bounds("rooms", rooms.min_size, rooms.max_size)?;
            }
            Algorithm::Bsp => {
                let bsp = &self.bsp;
                self.check_size_bounds("bsp", bsp.min_room_size, bsp.max_room_size)?;
                check_probability("bsp.concealment_per_room", bsp.concealment_per_room)?;
            }
            Algorithm::Cellular => {
                check_probability("cellular.fill_probability", self.cellular.fill_probability)?;
            }
            Algorithm::City => {
                let city = &self.city;
                check_at_least("city.block_size", city.block_size, 1)?;
                check_at_least("city.street_width", city.street_width, 1)?;
                self.check_fits("city.block_size", city.block_size)?;
                let mut total = 0.0;
                for district in District::ALL {
                    let value = city.districts.weight(district);
                    if !value.is_finite() || value < 0.0 {
                        return Err(ConfigError::InvalidDistrictWeight { district, value });
                    }
                    total += value;
                }
                if total <= 0.0 {
                    return Err(ConfigError::NoDistrictWeight);
                }
            }
        }
        Ok(())
    }

    fn check_size_bounds(
        &self,
        field: &'static str,
        min: usize,
        max: usize,
    ) -> Result<(), ConfigError> {
        check_at_least(field, min, 1)?;
        if min > max {
            return Err(ConfigError::InvertedBounds { field, min, max });
        }
        self.check_fits(field, min)
    }

    /// A room or block of `size` plus a wall on each side must fit both axes.
    fn check_fits(&self, field: &'static str, size: usize) -> Result<(), ConfigError> {
        if size + 2 > self.width || size + 2 > self.height {
            return Err(ConfigError::DoesNotFit {
                field,
                size,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ProbabilityOutOfRange { field, value });
    }
    Ok(())
}

fn check_at_least(field: &'static str, value: usize, min: usize) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::BelowMinimum { field, value, min });
    }
    Ok(())
}
