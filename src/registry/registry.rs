/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;
use parking_lot::{Mutex, MutexGuard, RwLock};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::{Elevator, SharedElevator};
use crate::shared::{ElevatorId, ElevatorStatus, RegistryError};

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Thread-safe owner of every elevator in the building.
 *
 * Elevators are kept in insertion order, which is the stable order snapshots
 * and selection use. The registry also owns the coordination lock that
 * dispatchers hold across selection and reservation.
 */
#[derive(Default)]
pub struct ElevatorRegistry {
    elevators: RwLock<Vec<(ElevatorId, SharedElevator)>>,
    coordination: Mutex<()>,
}

impl ElevatorRegistry {
    pub fn new() -> ElevatorRegistry {
        ElevatorRegistry::default()
    }

    pub fn add(&self, elevator: Elevator) -> Result<SharedElevator, RegistryError> {
        let id = elevator.id();
        let mut elevators = self.elevators.write();

        if elevators.iter().any(|(existing, _)| *existing == id) {
            return Err(RegistryError::DuplicateElevatorId(id));
        }

        let shared = elevator.shared();
        elevators.push((id, shared.clone()));
        debug!("Elevator {} added to registry ({} total)", id, elevators.len());
        Ok(shared)
    }

    pub fn remove(&self, id: ElevatorId) -> Option<SharedElevator> {
        let mut elevators = self.elevators.write();
        let index = elevators.iter().position(|(existing, _)| *existing == id)?;
        Some(elevators.remove(index).1)
    }

    pub fn get_by_id(&self, id: ElevatorId) -> Option<SharedElevator> {
        self.elevators
            .read()
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, elevator)| elevator.clone())
    }

    /// Copies the state of every elevator, in insertion order.
    pub fn snapshot(&self) -> Vec<ElevatorStatus> {
        self.elevators
            .read()
            .iter()
            .map(|(_, elevator)| elevator.lock().status())
            .collect()
    }

    /// Handles to every elevator, in insertion order.
    pub fn all(&self) -> Vec<SharedElevator> {
        self.elevators
            .read()
            .iter()
            .map(|(_, elevator)| elevator.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.elevators.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevators.read().is_empty()
    }

    /// Highest floor any registered elevator can reach.
    pub fn max_floor(&self) -> Option<u32> {
        self.elevators
            .read()
            .iter()
            .map(|(_, elevator)| elevator.lock().max_floor())
            .max()
    }

    /// Takes the coordination lock. Hold it only across selection and reservation.
    pub fn coordinate(&self) -> MutexGuard<'_, ()> {
        self.coordination.lock()
    }
}
