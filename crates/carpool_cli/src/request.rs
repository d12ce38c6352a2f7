//! JSON roster accepted by `carpool optimize`.

use carpool_core::roster::Direction;
use carpool_core::{RideCoordinator, RosterError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DriverEntry {
    pub name: String,
    pub address: String,
    pub seats: u32,
    #[serde(default)]
    pub direction: Direction,
}

#[derive(Debug, Deserialize)]
pub struct PassengerEntry {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RosterRequest {
    #[serde(default)]
    pub drivers: Vec<DriverEntry>,
    #[serde(default)]
    pub passengers: Vec<PassengerEntry>,
}

impl RosterRequest {
    /// Add every entry to the session in file order. Entries the session
    /// refuses are returned by name and left out of the roster.
    pub fn apply(&self, session: &mut RideCoordinator) -> Vec<(String, RosterError)> {
        let mut rejected = Vec::new();
        for driver in &self.drivers {
            if let Err(err) =
                session.add_driver(&driver.name, &driver.address, driver.seats, driver.direction)
            {
                rejected.push((driver.name.clone(), err));
            }
        }
        for passenger in &self.passengers {
            if let Err(err) =
                session.add_passenger(&passenger.name, &passenger.address, passenger.phone.clone())
            {
                rejected.push((passenger.name.clone(), err));
            }
        }
        rejected
    }
}
