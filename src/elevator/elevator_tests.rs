/*
 * Unit tests for the elevator state machine
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_elevator_new
 *  - test_elevator_rejects_invalid_spec
 *  - test_request_move_up_and_down
 *  - test_request_move_rejections
 *  - test_complete_transit
 *  - test_add_and_remove_passengers
 *  - test_capacity_invariant
 *  - test_is_available
 *  - test_reservation_lifecycle
 *  - test_reserved_passengers_occupy_space
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod elevator_tests {
    use crate::config::ElevatorSpec;
    use crate::elevator::Elevator;
    use crate::shared::Direction::{Down, Stationary, Up};
    use crate::shared::{ElevatorError, FleetError};
    use std::time::Duration;

    fn setup_elevator(floor: u32, passengers: u32) -> Elevator {
        // Default configuration: 10 floors, capacity 5, 100 ms per floor
        let spec = ElevatorSpec::new(1, 10, 5)
            .at_floor(floor)
            .with_passengers(passengers)
            .with_time_per_floor(Duration::from_millis(100));
        Elevator::new(&spec).unwrap()
    }

    #[test]
    fn test_elevator_new() {
        // Arrange
        let elevator = setup_elevator(3, 2);

        // Act
        let status = elevator.status();

        // Assert
        assert_eq!(status.id, 1);
        assert_eq!(status.current_floor, 3);
        assert_eq!(status.passenger_count, 2);
        assert_eq!(status.max_capacity, 5);
        assert_eq!(status.max_floor, 10);
        assert_eq!(status.direction, Stationary);
        assert!(!status.moving);
        assert!(status.in_service);
        assert_eq!(status.target_floor, None);
    }

    #[test]
    fn test_elevator_rejects_invalid_spec() {
        // Arrange
        let below_ground = ElevatorSpec::new(1, 10, 5).at_floor(0);
        let above_roof = ElevatorSpec::new(2, 10, 5).at_floor(11);
        let overloaded = ElevatorSpec::new(3, 10, 5).with_passengers(6);
        let no_capacity = ElevatorSpec::new(4, 10, 0);
        let no_floors = ElevatorSpec::new(5, 0, 5);

        // Act & Assert
        for spec in [below_ground, above_roof, overloaded, no_capacity, no_floors] {
            match Elevator::new(&spec) {
                Err(FleetError::InvalidConfig { id, .. }) => assert_eq!(id, spec.id),
                other => panic!("Expected invalid config for {}, got {:?}", spec.id, other),
            }
        }
    }

    #[test]
    fn test_request_move_up_and_down() {
        // Arrange
        let mut up = setup_elevator(2, 0);
        let mut down = setup_elevator(8, 0);

        // Act
        let up_transit = up.request_move(5).unwrap();
        let down_transit = down.request_move(1).unwrap();

        // Assert
        assert_eq!(up_transit.direction, Up);
        assert_eq!(up_transit.duration, Duration::from_millis(300));
        assert_eq!(up.direction(), Up);
        assert!(up.is_moving());
        assert_eq!(up.target_floor(), Some(5));
        // The floor only changes once the transit completes
        assert_eq!(up.current_floor(), 2);

        assert_eq!(down_transit.direction, Down);
        assert_eq!(down_transit.duration, Duration::from_millis(700));
        assert_eq!(down.direction(), Down);
    }

    #[test]
    fn test_request_move_rejections() {
        // Arrange
        let mut elevator = setup_elevator(4, 0);

        // Act
        let below = elevator.request_move(0);
        let above = elevator.request_move(11);
        let same = elevator.request_move(4);
        elevator.request_move(6).unwrap();
        let busy = elevator.request_move(9);

        // Assert
        assert_eq!(below, Err(ElevatorError::InvalidFloor { floor: 0, max_floor: 10 }));
        assert_eq!(above, Err(ElevatorError::InvalidFloor { floor: 11, max_floor: 10 }));
        assert_eq!(same, Err(ElevatorError::AlreadyAtTarget { id: 1, floor: 4 }));
        assert_eq!(busy, Err(ElevatorError::ElevatorBusy(1)));
        assert_eq!(elevator.target_floor(), Some(6));
    }

    #[test]
    fn test_complete_transit() {
        // Arrange
        let mut elevator = setup_elevator(1, 1);
        elevator.request_move(3).unwrap();

        // Act
        let arrival = elevator.complete_transit().unwrap();
        let again = elevator.complete_transit();

        // Assert
        assert_eq!(arrival.floor, 3);
        assert_eq!(arrival.boarded, 0);
        assert_eq!(arrival.passenger_count, 1);
        assert_eq!(elevator.current_floor(), 3);
        assert!(!elevator.is_moving());
        assert_eq!(elevator.direction(), Stationary);
        assert_eq!(again, Err(ElevatorError::NotMoving(1)));
    }

    #[test]
    fn test_add_and_remove_passengers() {
        // Arrange
        let mut elevator = setup_elevator(1, 0);

        // Act
        elevator.add_passengers(3).unwrap();
        elevator.add_passengers(0).unwrap();
        elevator.remove_passengers(2).unwrap();

        // Assert
        assert_eq!(elevator.passenger_count(), 1);
        assert!(matches!(
            elevator.remove_passengers(0),
            Err(ElevatorError::InvalidArgument(_))
        ));
        assert!(matches!(
            elevator.remove_passengers(2),
            Err(ElevatorError::InvalidArgument(_))
        ));
        assert_eq!(elevator.passenger_count(), 1);
    }

    #[test]
    fn test_capacity_invariant() {
        // Purpose: Verify that no sequence of passenger changes breaks 0 <= count <= capacity

        // Arrange
        let mut elevator = setup_elevator(1, 0);
        let operations: [(bool, u32); 10] = [
            (true, 2),
            (true, 4),
            (true, 3),
            (false, 6),
            (false, 1),
            (true, 1),
            (true, u32::MAX),
            (false, 4),
            (false, 0),
            (true, 4),
        ];

        for (add, count) in operations {
            // Act
            let before = elevator.passenger_count();
            let result = if add {
                elevator.add_passengers(count)
            } else {
                elevator.remove_passengers(count)
            };

            // Assert
            assert!(elevator.passenger_count() <= elevator.max_capacity());
            if result.is_err() {
                assert_eq!(elevator.passenger_count(), before);
            }
        }
        assert_eq!(elevator.passenger_count(), 5);
        assert!(matches!(
            elevator.add_passengers(1),
            Err(ElevatorError::CapacityExceeded { requested: 1, current: 5, capacity: 5, .. })
        ));
    }

    #[test]
    fn test_is_available() {
        // Arrange
        let idle = setup_elevator(1, 0);
        let full = setup_elevator(1, 5);
        let mut moving = setup_elevator(1, 0);
        moving.request_move(2).unwrap();
        let mut retired = setup_elevator(1, 0);
        retired.set_in_service(false);

        // Act & Assert
        assert!(idle.is_available());
        assert!(!full.is_available());
        assert!(!moving.is_available());
        assert!(!retired.is_available());
        assert!(full.has_space_for(0));
        assert!(!full.has_space_for(1));
    }

    #[test]
    fn test_reservation_lifecycle() {
        // Arrange
        let mut elevator = setup_elevator(2, 1);

        // Act
        elevator.reserve(2).unwrap();
        let status_reserved = elevator.status();
        let second_reserve = elevator.reserve(1);
        let direct_move = elevator.request_move(5);
        let transit = elevator.start_reserved_move(5).unwrap();
        let arrival = elevator.complete_transit().unwrap();

        // Assert
        assert!(status_reserved.moving);
        assert_eq!(status_reserved.direction, Stationary);
        assert_eq!(status_reserved.boarding, 2);
        assert_eq!(second_reserve, Err(ElevatorError::ElevatorBusy(1)));
        assert_eq!(direct_move, Err(ElevatorError::ElevatorBusy(1)));
        assert_eq!(transit.boarding, 2);
        assert_eq!(arrival.boarded, 2);
        assert_eq!(arrival.passenger_count, 3);
        assert_eq!(elevator.current_floor(), 5);
        assert_eq!(elevator.start_reserved_move(6), Err(ElevatorError::NotReserved(1)));
    }

    #[test]
    fn test_reserved_passengers_occupy_space() {
        // Arrange
        let mut elevator = setup_elevator(1, 2);
        let mut retired = setup_elevator(1, 0);
        retired.set_in_service(false);

        // Act
        elevator.reserve(2).unwrap();
        let overflow = elevator.add_passengers(2);
        let fits = elevator.add_passengers(1);
        let cancelled = elevator.cancel_reservation();

        // Assert
        assert!(matches!(overflow, Err(ElevatorError::CapacityExceeded { .. })));
        assert_eq!(fits, Ok(()));
        assert_eq!(cancelled, Some(2));
        assert!(!elevator.is_moving());
        assert_eq!(elevator.cancel_reservation(), None);
        assert_eq!(retired.reserve(1), Err(ElevatorError::OutOfService(1)));
        assert!(matches!(
            setup_elevator(1, 5).reserve(1),
            Err(ElevatorError::CapacityExceeded { .. })
        ));
    }
}
