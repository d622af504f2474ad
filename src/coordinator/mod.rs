pub mod coordinator;
pub mod selector;

pub use coordinator::Coordinator;
pub use coordinator::FleetReport;
