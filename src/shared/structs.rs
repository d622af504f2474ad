/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/***************************************/
/*       Public data structures        */
/***************************************/
pub type ElevatorId = u32;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stationary,
}

impl Direction {
    /// Direction of travel from `from` to `to`. Equal floors give `Stationary`.
    pub fn between(from: u32, to: u32) -> Direction {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Stationary,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Stationary => write!(f, "Stationary"),
        }
    }
}

/**
 * Elevator variants.
 *
 * A variant only changes how long one floor of travel takes, so it is plain
 * configuration data rather than a separate type.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElevatorKind {
    #[default]
    Standard,
    Passenger,
    Glass,
    HighSpeed,
}

impl ElevatorKind {
    pub fn default_time_per_floor(&self) -> Duration {
        match self {
            ElevatorKind::Standard | ElevatorKind::Passenger => Duration::from_millis(1000),
            ElevatorKind::Glass => Duration::from_millis(1500),
            ElevatorKind::HighSpeed => Duration::from_millis(500),
        }
    }
}

impl fmt::Display for ElevatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorKind::Standard => write!(f, "standard"),
            ElevatorKind::Passenger => write!(f, "passenger"),
            ElevatorKind::Glass => write!(f, "glass"),
            ElevatorKind::HighSpeed => write!(f, "high-speed"),
        }
    }
}

/// Point-in-time copy of one elevator, used for selection and display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorStatus {
    pub id: ElevatorId,
    pub kind: ElevatorKind,
    #[serde(rename = "currentFloor")]
    pub current_floor: u32,
    #[serde(rename = "targetFloor")]
    pub target_floor: Option<u32>,
    #[serde(rename = "maxFloor")]
    pub max_floor: u32,
    pub direction: Direction,
    pub moving: bool,
    #[serde(rename = "passengerCount")]
    pub passenger_count: u32,
    /// Passengers committed to the in-flight transit, boarding on arrival.
    pub boarding: u32,
    #[serde(rename = "maxCapacity")]
    pub max_capacity: u32,
    #[serde(rename = "inService")]
    pub in_service: bool,
}

impl ElevatorStatus {
    pub fn has_space_for(&self, count: u32) -> bool {
        self.passenger_count
            .checked_add(self.boarding)
            .and_then(|occupied| occupied.checked_add(count))
            .map_or(false, |total| total <= self.max_capacity)
    }

    pub fn distance_to(&self, floor: u32) -> u32 {
        self.current_floor.abs_diff(floor)
    }
}

/// Reported once per completed transit.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Arrival {
    pub elevator_id: ElevatorId,
    pub floor: u32,
    pub boarded: u32,
    pub passenger_count: u32,
}
