pub mod registry;

pub use registry::ElevatorRegistry;
