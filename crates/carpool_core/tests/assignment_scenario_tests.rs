mod support;

use carpool_core::assignment::{optimize, AssignmentStrategy, NearestAvailableDriver};
use carpool_core::roster::{DriverId, PassengerId};
use carpool_core::test_helpers::coord;

use support::roster::{names_by_driver, roster, unassigned_names};

fn owned(pairs: &[(&str, Vec<&str>)]) -> Vec<(String, Vec<String>)> {
    pairs
        .iter()
        .map(|(driver, riders)| {
            (
                driver.to_string(),
                riders.iter().map(|r| r.to_string()).collect(),
            )
        })
        .collect()
}

#[test]
fn each_driver_takes_its_nearest_passenger() {
    let state = roster(
        &[("A", 1, 0.0, 0.0), ("B", 1, 10.0, 10.0)],
        &[("P1", 0.0, 0.1), ("P2", 9.0, 9.0)],
    );

    let result = optimize(&state).expect("complete roster");

    assert_eq!(
        names_by_driver(&state, &result),
        owned(&[("A", vec!["P1"]), ("B", vec!["P2"])])
    );
    assert!(result.unassigned.is_empty());
}

#[test]
fn overflow_passenger_is_left_unassigned() {
    let state = roster(&[("A", 1, 0.0, 0.0)], &[("P1", 0.0, 0.0), ("P2", 0.0, 0.0)]);

    let result = optimize(&state).expect("complete roster");

    assert_eq!(names_by_driver(&state, &result), owned(&[("A", vec!["P1"])]));
    assert_eq!(unassigned_names(&state, &result), vec!["P2"]);
}

#[test]
fn no_drivers_leaves_everyone_unassigned() {
    let state = roster(&[], &[("P1", 0.0, 0.0), ("P2", 1.0, 1.0)]);

    let result = NearestAvailableDriver.assign(state.drivers(), state.passengers(), coord(0.0, 0.0));

    assert!(result.assignment.is_empty());
    assert_eq!(result.unassigned, vec![PassengerId(0), PassengerId(1)]);
}

#[test]
fn no_passengers_gives_every_driver_an_empty_sequence() {
    let state = roster(&[("A", 2, 0.0, 0.0), ("B", 1, 1.0, 1.0)], &[]);

    let result = NearestAvailableDriver.assign(state.drivers(), state.passengers(), coord(0.0, 0.0));

    assert_eq!(result.assignment.loads().len(), 2);
    assert!(result.assignment.loads().iter().all(|l| l.passengers().is_empty()));
    assert!(result.unassigned.is_empty());
}

#[test]
fn equidistant_drivers_resolve_to_list_order() {
    let passengers = [("P1", 0.0, 0.0), ("P2", 0.0, 0.0)];

    let forward = roster(&[("A", 1, 1.0, 1.0), ("B", 1, 1.0, 1.0)], &passengers);
    let result = optimize(&forward).unwrap();
    assert_eq!(
        names_by_driver(&forward, &result),
        owned(&[("A", vec!["P1"]), ("B", vec!["P2"])])
    );

    let reversed = roster(&[("B", 1, 1.0, 1.0), ("A", 1, 1.0, 1.0)], &passengers);
    let result = optimize(&reversed).unwrap();
    assert_eq!(
        names_by_driver(&reversed, &result),
        owned(&[("B", vec!["P1"]), ("A", vec!["P2"])])
    );
}

#[test]
fn greedy_choice_is_not_revisited_for_later_passengers() {
    // P1 grabs A even though giving A to P2 would shorten the total distance.
    let state = roster(
        &[("A", 1, 0.0, 0.0), ("B", 1, 0.0, 3.0)],
        &[("P1", 0.0, 1.0), ("P2", 0.0, 0.1)],
    );

    let result = optimize(&state).unwrap();

    assert_eq!(
        names_by_driver(&state, &result),
        owned(&[("A", vec!["P1"]), ("B", vec!["P2"])])
    );
}

#[test]
fn pickup_order_follows_passenger_input_order() {
    let state = roster(
        &[("A", 3, 0.0, 0.0)],
        &[("far", 0.0, 0.5), ("near", 0.0, 0.01), ("mid", 0.0, 0.2)],
    );

    let result = optimize(&state).unwrap();

    assert_eq!(
        result.assignment.passengers_of(DriverId(0)),
        Some(&[PassengerId(0), PassengerId(1), PassengerId(2)][..])
    );
}

#[test]
fn duplicate_driver_names_stay_distinct() {
    let state = roster(
        &[("Joel", 1, 0.0, 0.0), ("Joel", 1, 5.0, 5.0)],
        &[("P1", 5.0, 5.0), ("P2", 0.0, 0.0)],
    );

    let result = optimize(&state).unwrap();

    assert_eq!(result.assignment.passengers_of(DriverId(0)), Some(&[PassengerId(1)][..]));
    assert_eq!(result.assignment.passengers_of(DriverId(1)), Some(&[PassengerId(0)][..]));
}
