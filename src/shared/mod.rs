pub mod errors;
pub mod macros;
pub mod structs;

pub use errors::ConfigError;
pub use errors::DispatchError;
pub use errors::ElevatorError;
pub use errors::FleetError;
pub use errors::RegistryError;
pub use structs::Arrival;
pub use structs::Direction;
pub use structs::ElevatorId;
pub use structs::ElevatorKind;
pub use structs::ElevatorStatus;
