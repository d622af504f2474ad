/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ConfigError, ElevatorId, ElevatorKind};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub building: BuildingConfig,
    #[serde(default)]
    pub elevators: Vec<ElevatorConfig>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct BuildingConfig {
    pub n_floors: u32,
    pub time_per_floor_ms: Option<u64>,
}

/**
 * One entry of the fleet.
 *
 * Fields left out fall back to the building: `max_floor` to `n_floors` and
 * `time_per_floor_ms` to the building value, then to the default for `kind`.
 */
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ElevatorConfig {
    pub id: ElevatorId,
    pub max_capacity: u32,
    #[serde(default = "default_start_floor")]
    pub start_floor: u32,
    #[serde(default)]
    pub start_passengers: u32,
    pub max_floor: Option<u32>,
    #[serde(default)]
    pub kind: ElevatorKind,
    pub time_per_floor_ms: Option<u64>,
    #[serde(default = "default_in_service")]
    pub in_service: bool,
}

fn default_start_floor() -> u32 {
    1
}

fn default_in_service() -> bool {
    true
}

/// Fully resolved settings for a single elevator.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevatorSpec {
    pub id: ElevatorId,
    pub kind: ElevatorKind,
    pub max_floor: u32,
    pub max_capacity: u32,
    pub start_floor: u32,
    pub start_passengers: u32,
    pub time_per_floor: Duration,
    pub in_service: bool,
}

impl ElevatorSpec {
    pub fn new(id: ElevatorId, max_floor: u32, max_capacity: u32) -> ElevatorSpec {
        ElevatorSpec {
            id,
            kind: ElevatorKind::Standard,
            max_floor,
            max_capacity,
            start_floor: 1,
            start_passengers: 0,
            time_per_floor: ElevatorKind::Standard.default_time_per_floor(),
            in_service: true,
        }
    }

    pub fn at_floor(mut self, floor: u32) -> ElevatorSpec {
        self.start_floor = floor;
        self
    }

    pub fn with_passengers(mut self, passengers: u32) -> ElevatorSpec {
        self.start_passengers = passengers;
        self
    }

    pub fn with_time_per_floor(mut self, time_per_floor: Duration) -> ElevatorSpec {
        self.time_per_floor = time_per_floor;
        self
    }

    pub fn with_kind(mut self, kind: ElevatorKind) -> ElevatorSpec {
        self.kind = kind;
        self
    }

    pub fn out_of_service(mut self) -> ElevatorSpec {
        self.in_service = false;
        self
    }
}

/***************************************/
/*             Public API              */
/***************************************/
impl Config {
    pub fn from_toml(config_str: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(config_str)?)
    }

    /// Resolves every fleet entry against the building defaults.
    pub fn elevator_specs(&self) -> Vec<ElevatorSpec> {
        self.elevators
            .iter()
            .map(|elevator| elevator.resolve(&self.building))
            .collect()
    }
}

impl ElevatorConfig {
    pub fn resolve(&self, building: &BuildingConfig) -> ElevatorSpec {
        let time_per_floor = self
            .time_per_floor_ms
            .or(building.time_per_floor_ms)
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.kind.default_time_per_floor());

        ElevatorSpec {
            id: self.id,
            kind: self.kind,
            max_floor: self.max_floor.unwrap_or(building.n_floors),
            max_capacity: self.max_capacity,
            start_floor: self.start_floor,
            start_passengers: self.start_passengers,
            time_per_floor,
            in_service: self.in_service,
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Config::from_toml(&config_str)
}
