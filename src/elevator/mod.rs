pub mod elevator;
pub mod elevator_tests;
pub mod transit;
pub mod transit_tests;

pub use elevator::Elevator;
pub use elevator::SharedElevator;
pub use elevator::Transit;
