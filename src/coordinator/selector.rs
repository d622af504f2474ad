/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ElevatorId, ElevatorStatus};

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Picks the elevator that should serve a request.
 *
 * Only idle, in-service elevators that can reach `request_floor` and have room
 * for `passengers` are considered. Among those, the closest elevator wins, then
 * the one carrying fewer passengers, then the one that comes first in the
 * snapshot. Current travel direction is not taken into account.
 *
 * Returns `None` when no elevator qualifies.
 */
pub fn select_best(
    snapshot: &[ElevatorStatus],
    request_floor: u32,
    passengers: u32,
) -> Option<ElevatorId> {
    eligible(snapshot, request_floor, passengers)
        .min_by_key(|(index, status)| sort_key(*index, status, request_floor))
        .map(|(_, status)| status.id)
}

/// Every eligible elevator, best first. The head is what `select_best` returns.
pub fn rank(snapshot: &[ElevatorStatus], request_floor: u32, passengers: u32) -> Vec<ElevatorId> {
    let mut candidates: Vec<(usize, &ElevatorStatus)> =
        eligible(snapshot, request_floor, passengers).collect();
    candidates.sort_by_key(|(index, status)| sort_key(*index, status, request_floor));
    candidates.into_iter().map(|(_, status)| status.id).collect()
}

pub fn is_eligible(status: &ElevatorStatus, request_floor: u32, passengers: u32) -> bool {
    status.in_service
        && !status.moving
        && status.has_space_for(passengers)
        && request_floor >= 1
        && request_floor <= status.max_floor
}

/***************************************/
/*          Private functions          */
/***************************************/
fn eligible<'a>(
    snapshot: &'a [ElevatorStatus],
    request_floor: u32,
    passengers: u32,
) -> impl Iterator<Item = (usize, &'a ElevatorStatus)> {
    snapshot
        .iter()
        .enumerate()
        .filter(move |(_, status)| is_eligible(status, request_floor, passengers))
}

fn sort_key(index: usize, status: &ElevatorStatus, request_floor: u32) -> (u32, u32, usize) {
    (status.distance_to(request_floor), status.passenger_count, index)
}
