//! Failure values reported before any generation work starts.

use std::io;
use std::path::PathBuf;

use toml::de;

use crate::types::District;

/// A generation request that cannot be satisfied, or a config file that cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("map {width}x{height} is smaller than the {min}x{min} minimum")]
    MapTooSmall { width: usize, height: usize, min: usize },

    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedBounds { field: &'static str, min: usize, max: usize },

    #[error("{field}: value {value} must be at least {min}")]
    BelowMinimum { field: &'static str, value: usize, min: usize },

    #[error("{field}: size {size} does not fit inside a {width}x{height} map")]
    DoesNotFit { field: &'static str, size: usize, width: usize, height: usize },

    #[error("{field}: probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    #[error("district {district:?}: frequency {value} must be a finite non-negative number")]
    InvalidDistrictWeight { district: District, value: f64 },

    #[error("district frequencies must contain at least one positive weight")]
    NoDistrictWeight,

    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] de::Error),
}
