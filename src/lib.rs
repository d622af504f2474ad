//! Elevator dispatch simulator.
//!
//! A fleet of elevators lives in an [`registry::ElevatorRegistry`]. The
//! [`coordinator::Coordinator`] assigns floor requests to the best idle
//! elevator and starts its transit on a worker thread. Each elevator runs its
//! own small state machine ([`elevator::Elevator`]).

/* Modules */
pub mod config;
pub mod console;
pub mod coordinator;
pub mod elevator;
pub mod registry;
pub mod shared;
