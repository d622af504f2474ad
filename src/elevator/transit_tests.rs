/*
 * Unit tests for transit execution
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_transit_arrives
 *  - test_transit_rejects_redirect
 *  - test_reserved_transit_boards_on_arrival
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod transit_tests {
    use crate::config::ElevatorSpec;
    use crate::elevator::transit;
    use crate::elevator::{Elevator, SharedElevator};
    use crate::shared::{Arrival, Direction, ElevatorError};
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use std::time::Duration;

    fn setup_transit(floor: u32) -> (SharedElevator, Sender<Arrival>, Receiver<Arrival>) {
        let spec = ElevatorSpec::new(7, 10, 5)
            .at_floor(floor)
            .with_time_per_floor(Duration::from_millis(20));
        let (arrival_tx, arrival_rx) = unbounded::<Arrival>();

        (Elevator::new(&spec).unwrap().shared(), arrival_tx, arrival_rx)
    }

    #[test]
    fn test_transit_arrives() {
        // Arrange
        let (elevator, arrival_tx, arrival_rx) = setup_transit(1);

        // Act
        let handle = transit::request_move(&elevator, 4, &arrival_tx).unwrap();
        let started = elevator.lock().status();

        // Assert
        assert!(started.moving);
        assert_eq!(started.direction, Direction::Up);
        assert_eq!(started.current_floor, 1);

        match arrival_rx.recv_timeout(Duration::from_secs(3)) {
            Ok(arrival) => {
                assert_eq!(arrival.elevator_id, 7);
                assert_eq!(arrival.floor, 4);
            }
            Err(e) => panic!("Error receiving from arrival_rx: {:?}", e),
        }
        handle.join().unwrap();

        let arrived = elevator.lock().status();
        assert!(!arrived.moving);
        assert_eq!(arrived.current_floor, 4);
        assert_eq!(arrived.direction, Direction::Stationary);
    }

    #[test]
    fn test_transit_rejects_redirect() {
        // Purpose: Verify that a moving elevator cannot run a second transit at the same time

        // Arrange
        let (elevator, arrival_tx, arrival_rx) = setup_transit(5);
        let handle = transit::request_move(&elevator, 1, &arrival_tx).unwrap();

        // Act
        let redirect = transit::request_move(&elevator, 9, &arrival_tx);

        // Assert
        assert!(matches!(redirect, Err(ElevatorError::ElevatorBusy(7))));
        handle.join().unwrap();
        assert_eq!(arrival_rx.try_iter().count(), 1);
        assert_eq!(elevator.lock().current_floor(), 1);
    }

    #[test]
    fn test_reserved_transit_boards_on_arrival() {
        // Arrange
        let (elevator, arrival_tx, arrival_rx) = setup_transit(3);
        elevator.lock().reserve(4).unwrap();

        // Act
        let handle = transit::start_reserved_move(&elevator, 9, &arrival_tx).unwrap();
        let in_flight = elevator.lock().passenger_count();
        handle.join().unwrap();

        // Assert
        assert_eq!(in_flight, 0);
        let arrival = arrival_rx.recv_timeout(Duration::from_secs(3)).unwrap();
        assert_eq!(arrival.boarded, 4);
        assert_eq!(arrival.passenger_count, 4);
        assert_eq!(elevator.lock().passenger_count(), 4);
    }
}
