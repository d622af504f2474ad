/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorSpec;
use crate::shared::{Arrival, Direction, ElevatorError, ElevatorId, ElevatorKind, ElevatorStatus, FleetError};

/// An elevator shared between the registry, the coordinator and its transit worker.
pub type SharedElevator = Arc<Mutex<Elevator>>;

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Idle,
    // Claimed by a dispatch that has not started the transit yet
    Reserved { boarding: u32 },
    Moving {
        from: u32,
        to: u32,
        direction: Direction,
        boarding: u32,
    },
}

/***************************************/
/*       Public data structures        */
/***************************************/

/// A transit that has been committed to but not yet executed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transit {
    pub elevator_id: ElevatorId,
    pub from: u32,
    pub to: u32,
    pub direction: Direction,
    pub duration: Duration,
    pub boarding: u32,
}

/**
 * A single elevator and its movement state machine.
 *
 * The elevator is either idle at a floor or moving between two floors. A
 * dispatch may additionally hold it in a reserved state between selection and
 * the start of the transit; a reserved elevator counts as moving for every
 * other caller.
 *
 * # Fields
 * - `current_floor`:   Only ever changed by `complete_transit`.
 * - `passenger_count`: Passengers on board. Passengers committed to the
 *                      current transit are tracked on the motion and board
 *                      on arrival.
 * - `time_per_floor`:  Travel time for one floor.
 */
#[derive(Debug)]
pub struct Elevator {
    id: ElevatorId,
    kind: ElevatorKind,
    current_floor: u32,
    max_floor: u32,
    passenger_count: u32,
    max_capacity: u32,
    in_service: bool,
    time_per_floor: Duration,
    motion: Motion,
}

impl Elevator {
    pub fn new(spec: &ElevatorSpec) -> Result<Elevator, FleetError> {
        let invalid = |reason: String| FleetError::InvalidConfig { id: spec.id, reason };

        if spec.max_floor < 1 {
            return Err(invalid("max floor must be at least 1".to_string()));
        }
        if spec.max_capacity < 1 {
            return Err(invalid("max capacity must be at least 1".to_string()));
        }
        if spec.start_floor < 1 || spec.start_floor > spec.max_floor {
            return Err(invalid(format!(
                "start floor {} is outside 1..={}",
                spec.start_floor, spec.max_floor
            )));
        }
        if spec.start_passengers > spec.max_capacity {
            return Err(invalid(format!(
                "start passengers {} exceed capacity {}",
                spec.start_passengers, spec.max_capacity
            )));
        }

        Ok(Elevator {
            id: spec.id,
            kind: spec.kind,
            current_floor: spec.start_floor,
            max_floor: spec.max_floor,
            passenger_count: spec.start_passengers,
            max_capacity: spec.max_capacity,
            in_service: spec.in_service,
            time_per_floor: spec.time_per_floor,
            motion: Motion::Idle,
        })
    }

    pub fn shared(self) -> SharedElevator {
        Arc::new(Mutex::new(self))
    }

    /***************************************/
    /*             Accessors               */
    /***************************************/
    pub fn id(&self) -> ElevatorId {
        self.id
    }

    pub fn current_floor(&self) -> u32 {
        self.current_floor
    }

    pub fn max_floor(&self) -> u32 {
        self.max_floor
    }

    pub fn passenger_count(&self) -> u32 {
        self.passenger_count
    }

    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    pub fn in_service(&self) -> bool {
        self.in_service
    }

    pub fn is_moving(&self) -> bool {
        self.motion != Motion::Idle
    }

    pub fn target_floor(&self) -> Option<u32> {
        match self.motion {
            Motion::Moving { to, .. } => Some(to),
            _ => None,
        }
    }

    pub fn direction(&self) -> Direction {
        match self.motion {
            Motion::Moving { direction, .. } => direction,
            _ => Direction::Stationary,
        }
    }

    fn boarding(&self) -> u32 {
        match self.motion {
            Motion::Idle => 0,
            Motion::Reserved { boarding } | Motion::Moving { boarding, .. } => boarding,
        }
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            id: self.id,
            kind: self.kind,
            current_floor: self.current_floor,
            target_floor: self.target_floor(),
            max_floor: self.max_floor,
            direction: self.direction(),
            moving: self.is_moving(),
            passenger_count: self.passenger_count,
            boarding: self.boarding(),
            max_capacity: self.max_capacity,
            in_service: self.in_service,
        }
    }

    /***************************************/
    /*             Capacity                */
    /***************************************/
    pub fn has_space_for(&self, count: u32) -> bool {
        self.passenger_count
            .checked_add(self.boarding())
            .and_then(|occupied| occupied.checked_add(count))
            .map_or(false, |total| total <= self.max_capacity)
    }

    pub fn is_available(&self) -> bool {
        self.in_service && !self.is_moving() && self.has_space_for(1)
    }

    pub fn add_passengers(&mut self, count: u32) -> Result<(), ElevatorError> {
        if !self.has_space_for(count) {
            warn!(
                "Cannot add {} passengers to elevator {}: capacity exceeded",
                count, self.id
            );
            return Err(self.capacity_exceeded(count));
        }

        self.passenger_count += count;
        info!(
            "{} passengers added to elevator {}. Current count: {}",
            count, self.id, self.passenger_count
        );
        Ok(())
    }

    pub fn remove_passengers(&mut self, count: u32) -> Result<(), ElevatorError> {
        if count == 0 {
            return Err(ElevatorError::InvalidArgument(
                "passenger count to remove must be greater than zero".to_string(),
            ));
        }
        if count > self.passenger_count {
            return Err(ElevatorError::InvalidArgument(format!(
                "cannot remove {} passengers from elevator {} carrying {}",
                count, self.id, self.passenger_count
            )));
        }

        self.passenger_count -= count;
        info!(
            "{} passengers removed from elevator {}. Current count: {}",
            count, self.id, self.passenger_count
        );
        Ok(())
    }

    pub fn set_in_service(&mut self, in_service: bool) {
        if self.in_service != in_service {
            info!("Elevator {} in service: {}", self.id, in_service);
        }
        self.in_service = in_service;
    }

    /***************************************/
    /*           State machine             */
    /***************************************/

    /// Commits an idle elevator to a transit towards `target`.
    ///
    /// The caller is responsible for executing the returned transit; the
    /// elevator stays moving until `complete_transit` is called.
    pub fn request_move(&mut self, target: u32) -> Result<Transit, ElevatorError> {
        self.check_target(target)?;
        if self.is_moving() {
            return Err(ElevatorError::ElevatorBusy(self.id));
        }
        Ok(self.begin_transit(target, 0))
    }

    /// Claims an idle, in-service elevator for `passengers` without starting a transit.
    pub fn reserve(&mut self, passengers: u32) -> Result<(), ElevatorError> {
        if !self.in_service {
            return Err(ElevatorError::OutOfService(self.id));
        }
        if self.is_moving() {
            return Err(ElevatorError::ElevatorBusy(self.id));
        }
        if !self.has_space_for(passengers) {
            return Err(self.capacity_exceeded(passengers));
        }

        self.motion = Motion::Reserved { boarding: passengers };
        debug!("Elevator {} reserved for {} passengers", self.id, passengers);
        Ok(())
    }

    /// Turns a reservation into a transit. The reserved passengers board on arrival.
    pub fn start_reserved_move(&mut self, target: u32) -> Result<Transit, ElevatorError> {
        let boarding = match self.motion {
            Motion::Reserved { boarding } => boarding,
            _ => return Err(ElevatorError::NotReserved(self.id)),
        };
        self.check_target(target)?;
        Ok(self.begin_transit(target, boarding))
    }

    /// Drops a reservation and returns the passengers that were reserved for.
    pub fn cancel_reservation(&mut self) -> Option<u32> {
        match self.motion {
            Motion::Reserved { boarding } => {
                self.motion = Motion::Idle;
                Some(boarding)
            }
            _ => None,
        }
    }

    /// Finishes the current transit: the floor changes and reserved passengers board.
    pub fn complete_transit(&mut self) -> Result<Arrival, ElevatorError> {
        let (to, boarding) = match self.motion {
            Motion::Moving { to, boarding, .. } => (to, boarding),
            _ => return Err(ElevatorError::NotMoving(self.id)),
        };

        self.current_floor = to;
        self.motion = Motion::Idle;
        self.passenger_count += boarding;
        info!("Elevator {} has stopped at floor {}", self.id, to);

        Ok(Arrival {
            elevator_id: self.id,
            floor: to,
            boarded: boarding,
            passenger_count: self.passenger_count,
        })
    }

    /// Returns a moving elevator to idle at its origin floor, for transits that never ran.
    pub fn abandon_transit(&mut self) {
        if let Motion::Moving { from, .. } = self.motion {
            warn!("Elevator {} abandoned its transit at floor {}", self.id, from);
            self.motion = Motion::Idle;
        }
    }

    fn check_target(&self, target: u32) -> Result<(), ElevatorError> {
        if target < 1 || target > self.max_floor {
            return Err(ElevatorError::InvalidFloor {
                floor: target,
                max_floor: self.max_floor,
            });
        }
        if target == self.current_floor {
            return Err(ElevatorError::AlreadyAtTarget {
                id: self.id,
                floor: target,
            });
        }
        Ok(())
    }

    fn begin_transit(&mut self, target: u32, boarding: u32) -> Transit {
        let direction = Direction::between(self.current_floor, target);
        let floors = self.current_floor.abs_diff(target);

        self.motion = Motion::Moving {
            from: self.current_floor,
            to: target,
            direction,
            boarding,
        };

        Transit {
            elevator_id: self.id,
            from: self.current_floor,
            to: target,
            direction,
            duration: self.time_per_floor * floors,
            boarding,
        }
    }

    fn capacity_exceeded(&self, requested: u32) -> ElevatorError {
        ElevatorError::CapacityExceeded {
            id: self.id,
            requested,
            current: self.passenger_count + self.boarding(),
            capacity: self.max_capacity,
        }
    }
}
