//! Test helpers for common roster setup.
//!
//! Shared by unit tests, integration tests and benches so every fixture builds
//! entities the same way.

use crate::roster::{Direction, Driver, DriverId, NewDriver, NewPassenger, Passenger, PassengerId};
use crate::spatial::Coordinate;

/// A coordinate from raw degrees.
///
/// # Panics
///
/// Panics if the pair is out of range; fixtures only use valid positions.
pub fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).expect("fixture coordinate should be valid")
}

/// A fully identified driver heading to the destination.
pub fn driver_at(id: u32, name: &str, seats: u32, lat: f64, lon: f64) -> Driver {
    Driver {
        id: DriverId(id),
        name: name.to_string(),
        address: format!("{name}'s place"),
        location: coord(lat, lon),
        seats,
        direction: Direction::ToChurch,
    }
}

/// A fully identified passenger.
pub fn passenger_at(id: u32, name: &str, lat: f64, lon: f64) -> Passenger {
    Passenger {
        id: PassengerId(id),
        name: name.to_string(),
        address: format!("{name}'s place"),
        location: coord(lat, lon),
        phone: None,
    }
}

/// A driver draft for [`crate::roster::RosterState::with_driver`].
pub fn new_driver(name: &str, seats: u32, lat: f64, lon: f64) -> NewDriver {
    NewDriver {
        name: name.to_string(),
        address: format!("{name}'s place"),
        location: coord(lat, lon),
        seats,
        direction: Direction::ToChurch,
    }
}

/// A passenger draft for [`crate::roster::RosterState::with_passenger`].
pub fn new_passenger(name: &str, lat: f64, lon: f64) -> NewPassenger {
    NewPassenger {
        name: name.to_string(),
        address: format!("{name}'s place"),
        location: coord(lat, lon),
        phone: None,
    }
}
