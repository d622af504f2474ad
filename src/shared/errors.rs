/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ElevatorId;

/***************************************/
/*            Error types              */
/***************************************/

/// Rejections from a single elevator's state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElevatorError {
    #[error("floor {floor} is outside the valid range 1..={max_floor}")]
    InvalidFloor { floor: u32, max_floor: u32 },

    #[error("elevator {id} is already at floor {floor}")]
    AlreadyAtTarget { id: ElevatorId, floor: u32 },

    #[error("elevator {0} is moving and cannot be redirected")]
    ElevatorBusy(ElevatorId),

    #[error("elevator {id} cannot take {requested} more passengers ({current}/{capacity})")]
    CapacityExceeded {
        id: ElevatorId,
        requested: u32,
        current: u32,
        capacity: u32,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("elevator {0} is out of service")]
    OutOfService(ElevatorId),

    #[error("elevator {0} has no transit in progress")]
    NotMoving(ElevatorId),

    #[error("elevator {0} holds no reservation")]
    NotReserved(ElevatorId),

    #[error("failed to start transit worker: {0}")]
    TransitWorker(String),
}

/// Outcomes of a dispatch request other than an assigned elevator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no elevator is available")]
    NoElevatorAvailable,

    #[error("floor {0} is not served by any elevator")]
    InvalidFloor(u32),

    #[error("passenger count {0} is not valid for a request")]
    InvalidPassengerCount(u32),

    #[error("elevator {id} rejected the request: {source}")]
    Rejected {
        id: ElevatorId,
        #[source]
        source: ElevatorError,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("an elevator with id {0} is already registered")]
    DuplicateElevatorId(ElevatorId),
}

/// Reasons a single fleet entry is rejected at initialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FleetError {
    #[error("invalid configuration for elevator {id}: {reason}")]
    InvalidConfig { id: ElevatorId, reason: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
