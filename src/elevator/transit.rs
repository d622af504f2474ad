/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{error, info};
use std::thread::{self, Builder, JoinHandle};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::{SharedElevator, Transit};
use crate::shared::{Arrival, ElevatorError};

/***************************************/
/*             Public API              */
/***************************************/

/// Starts moving an idle elevator to `target` on its own worker thread.
///
/// Returns once the elevator reports moving; arrival is announced on `arrival_tx`.
pub fn request_move(
    elevator: &SharedElevator,
    target: u32,
    arrival_tx: &cbc::Sender<Arrival>,
) -> Result<JoinHandle<()>, ElevatorError> {
    let transit = elevator.lock().request_move(target)?;
    launch(elevator, transit, arrival_tx)
}

/// Starts the transit of an elevator previously claimed with `Elevator::reserve`.
pub fn start_reserved_move(
    elevator: &SharedElevator,
    target: u32,
    arrival_tx: &cbc::Sender<Arrival>,
) -> Result<JoinHandle<()>, ElevatorError> {
    let transit = elevator.lock().start_reserved_move(target)?;
    launch(elevator, transit, arrival_tx)
}

/***************************************/
/*          Private functions          */
/***************************************/
fn launch(
    elevator: &SharedElevator,
    transit: Transit,
    arrival_tx: &cbc::Sender<Arrival>,
) -> Result<JoinHandle<()>, ElevatorError> {
    info!(
        "Elevator {} moving {} from floor {} to floor {} ({} ms)",
        transit.elevator_id,
        transit.direction,
        transit.from,
        transit.to,
        transit.duration.as_millis()
    );

    let worker_elevator = elevator.clone();
    let worker_arrival_tx = arrival_tx.clone();
    let transit_thread = Builder::new().name(format!("transit_{}", transit.elevator_id));

    match transit_thread.spawn(move || run(worker_elevator, transit, worker_arrival_tx)) {
        Ok(handle) => Ok(handle),
        Err(e) => {
            elevator.lock().abandon_transit();
            Err(ElevatorError::TransitWorker(e.to_string()))
        }
    }
}

fn run(elevator: SharedElevator, transit: Transit, arrival_tx: cbc::Sender<Arrival>) {
    // The elevator lock is not held while travelling
    thread::sleep(transit.duration);

    let arrival = elevator.lock().complete_transit();
    match arrival {
        Ok(arrival) => {
            // Nobody listening is fine
            let _ = arrival_tx.send(arrival);
        }
        Err(e) => {
            error!(
                "Transit of elevator {} to floor {} could not complete: {}",
                transit.elevator_id, transit.to, e
            );
        }
    }
}
