/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::JoinHandle;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorSpec;
use crate::coordinator::selector;
use crate::elevator::{transit, Elevator, SharedElevator};
use crate::registry::ElevatorRegistry;
use crate::shared::{Arrival, DispatchError, ElevatorError, ElevatorId, ElevatorStatus, FleetError};

/***************************************/
/*       Public data structures        */
/***************************************/

/// Outcome of registering a fleet. Rejected entries do not stop the others.
#[derive(Debug, Default)]
pub struct FleetReport {
    pub registered: Vec<ElevatorId>,
    pub rejected: Vec<(ElevatorId, FleetError)>,
}

/**
 * Assigns floor requests to elevators.
 *
 * A dispatch holds the registry's coordination lock only while it selects an
 * elevator and reserves it. The transit itself runs on the elevator's own
 * worker thread after the lock is released, so any number of elevators can
 * be moving while new requests are being assigned.
 *
 * # Fields
 * - `registry`:    The fleet, shared with whoever else needs to inspect it.
 * - `arrival_tx`:  Every completed transit is reported here.
 * - `transits`:    Handles of transit workers that may still be running.
 */
pub struct Coordinator {
    registry: Arc<ElevatorRegistry>,
    arrival_tx: cbc::Sender<Arrival>,
    transits: Mutex<Vec<JoinHandle<()>>>,
}

/***************************************/
/*             Public API              */
/***************************************/
impl Coordinator {
    pub fn new(registry: Arc<ElevatorRegistry>, arrival_tx: cbc::Sender<Arrival>) -> Coordinator {
        Coordinator {
            registry,
            arrival_tx,
            transits: Mutex::new(Vec::new()),
        }
    }

    pub fn registry(&self) -> &Arc<ElevatorRegistry> {
        &self.registry
    }

    /// Validates and registers each elevator on its own.
    pub fn initialize_fleet(&self, specs: &[ElevatorSpec]) -> FleetReport {
        let mut report = FleetReport::default();

        if specs.is_empty() {
            warn!("No elevators configured");
        }

        for spec in specs {
            let registered = Elevator::new(spec)
                .and_then(|elevator| self.registry.add(elevator).map_err(FleetError::from));

            match registered {
                Ok(_) => {
                    info!(
                        "Registered {} elevator {} with capacity {} at floor {} with {} passengers",
                        spec.kind, spec.id, spec.max_capacity, spec.start_floor, spec.start_passengers
                    );
                    report.registered.push(spec.id);
                }
                Err(e) => {
                    warn!("Rejected elevator {}: {}", spec.id, e);
                    report.rejected.push((spec.id, e));
                }
            }
        }

        report
    }

    /**
     * Assigns the best available elevator to `floor` and starts moving it there.
     *
     * Returns as soon as the transit has started. The passengers board once the
     * elevator arrives, or immediately if it is already at `floor`.
     */
    pub fn dispatch(&self, floor: u32, passengers: u32) -> Result<ElevatorId, DispatchError> {
        if passengers == 0 {
            return Err(DispatchError::InvalidPassengerCount(passengers));
        }

        let (id, elevator) = {
            let _coordination = self.registry.coordinate();

            match self.registry.max_floor() {
                Some(max_floor) if floor >= 1 && floor <= max_floor => {}
                None if floor >= 1 => return Err(DispatchError::NoElevatorAvailable),
                _ => return Err(DispatchError::InvalidFloor(floor)),
            }

            let snapshot = self.registry.snapshot();
            let candidates = selector::rank(&snapshot, floor, passengers);
            match self.reserve_first(&candidates, passengers) {
                Some(reserved) => reserved,
                None => {
                    warn!(
                        "No available elevators for the request to floor {} with {} passengers",
                        floor, passengers
                    );
                    return Err(DispatchError::NoElevatorAvailable);
                }
            }
        };

        self.execute(id, &elevator, floor, passengers)
    }

    pub fn status(&self) -> Vec<ElevatorStatus> {
        self.registry.snapshot()
    }

    pub fn has_available_elevators(&self) -> bool {
        self.registry
            .all()
            .iter()
            .any(|elevator| elevator.lock().is_available())
    }

    /// Blocks until every transit started so far has arrived.
    pub fn join_transits(&self) {
        let handles: Vec<JoinHandle<()>> = self.transits.lock().drain(..).collect();
        for handle in handles {
            if handle.join().is_err() {
                error!("A transit worker panicked");
            }
        }
    }

    /***************************************/
    /*          Private functions          */
    /***************************************/

    // Must be called with the coordination lock held
    fn reserve_first(
        &self,
        candidates: &[ElevatorId],
        passengers: u32,
    ) -> Option<(ElevatorId, SharedElevator)> {
        for &id in candidates {
            let Some(elevator) = self.registry.get_by_id(id) else {
                continue;
            };

            let reserved = elevator.lock().reserve(passengers);
            match reserved {
                Ok(()) => return Some((id, elevator)),
                Err(e) => debug!("Skipping elevator {}: {}", id, e),
            }
        }
        None
    }

    fn execute(
        &self,
        id: ElevatorId,
        elevator: &SharedElevator,
        floor: u32,
        passengers: u32,
    ) -> Result<ElevatorId, DispatchError> {
        match transit::start_reserved_move(elevator, floor, &self.arrival_tx) {
            Ok(handle) => {
                info!(
                    "Elevator {} assigned to floor {} for {} passengers",
                    id, floor, passengers
                );
                let mut transits = self.transits.lock();
                transits.retain(|transit| !transit.is_finished());
                transits.push(handle);
                Ok(id)
            }
            Err(ElevatorError::AlreadyAtTarget { .. }) => {
                let mut guard = elevator.lock();
                let boarding = guard.cancel_reservation().unwrap_or(passengers);
                guard
                    .add_passengers(boarding)
                    .map_err(|source| DispatchError::Rejected { id, source })?;
                info!(
                    "Elevator {} already at floor {}, boarded {} passengers",
                    id, floor, boarding
                );
                Ok(id)
            }
            Err(source) => {
                elevator.lock().cancel_reservation();
                error!("Elevator {} could not start its transit: {}", id, source);
                Err(DispatchError::Rejected { id, source })
            }
        }
    }
}
