use carpool_core::assignment::AssignmentResult;
use carpool_core::roster::{DriverId, PassengerId, RosterState};
use carpool_core::test_helpers::{coord, new_driver, new_passenger};

/// Destination used by every scenario unless a test says otherwise.
pub fn church() -> (f64, f64) {
    (39.9238, -75.1627)
}

/// Build a roster from `(name, seats, lat, lon)` drivers and `(name, lat, lon)` passengers.
/// Ids follow list order starting at zero.
pub fn roster(drivers: &[(&str, u32, f64, f64)], passengers: &[(&str, f64, f64)]) -> RosterState {
    let (lat, lon) = church();
    let mut state = RosterState::new().with_destination(coord(lat, lon));
    for &(name, seats, lat, lon) in drivers {
        state
            .push_driver(new_driver(name, seats, lat, lon))
            .expect("fresh roster has ids to spare");
    }
    for &(name, lat, lon) in passengers {
        state
            .push_passenger(new_passenger(name, lat, lon))
            .expect("fresh roster has ids to spare");
    }
    state
}

/// Passenger names per driver, in driver order, for readable assertions.
pub fn names_by_driver(state: &RosterState, result: &AssignmentResult) -> Vec<(String, Vec<String>)> {
    result
        .assignment
        .loads()
        .iter()
        .map(|load| {
            let driver = driver_name(state, load.driver);
            let riders = load
                .passengers()
                .iter()
                .map(|id| passenger_name(state, *id))
                .collect();
            (driver, riders)
        })
        .collect()
}

pub fn unassigned_names(state: &RosterState, result: &AssignmentResult) -> Vec<String> {
    result
        .unassigned
        .iter()
        .map(|id| passenger_name(state, *id))
        .collect()
}

fn driver_name(state: &RosterState, id: DriverId) -> String {
    state.driver(id).map(|d| d.name.clone()).unwrap_or_default()
}

fn passenger_name(state: &RosterState, id: PassengerId) -> String {
    state.passenger(id).map(|p| p.name.clone()).unwrap_or_default()
}
