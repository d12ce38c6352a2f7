use std::collections::HashMap;

use serde::Serialize;

use crate::roster::{Driver, DriverId, PassengerId};

/// Rejected insertion into an [`Assignment`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    #[error("{driver} is already carrying {seats} passenger(s)")]
    DriverFull { driver: DriverId, seats: u32 },
    #[error("{0} is not part of this assignment")]
    UnknownDriver(DriverId),
}

/// One driver's seat budget and the passengers placed with them, in pickup order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverLoad {
    pub driver: DriverId,
    pub seats: u32,
    passengers: Vec<PassengerId>,
}

impl DriverLoad {
    pub fn passengers(&self) -> &[PassengerId] {
        &self.passengers
    }

    pub fn remaining_seats(&self) -> u32 {
        self.seats.saturating_sub(self.passengers.len() as u32)
    }

    pub fn has_capacity(&self) -> bool {
        (self.passengers.len() as u64) < u64::from(self.seats)
    }
}

/// Driver → ordered passengers, with the seat limit enforced on every insertion.
///
/// Loads are kept in driver input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assignment {
    loads: Vec<DriverLoad>,
    #[serde(skip)]
    index: HashMap<DriverId, usize>,
}

impl Assignment {
    /// An empty sequence for every driver, in the order given.
    pub fn for_drivers(drivers: &[Driver]) -> Self {
        let mut assignment = Self::default();
        for driver in drivers {
            assignment.index.insert(driver.id, assignment.loads.len());
            assignment.loads.push(DriverLoad {
                driver: driver.id,
                seats: driver.seats,
                passengers: Vec::new(),
            });
        }
        assignment
    }

    /// Append `passenger` to `driver`'s sequence if a seat is left.
    pub fn assign(&mut self, driver: DriverId, passenger: PassengerId) -> Result<(), CapacityError> {
        let slot = *self
            .index
            .get(&driver)
            .ok_or(CapacityError::UnknownDriver(driver))?;
        let load = &mut self.loads[slot];
        if !load.has_capacity() {
            return Err(CapacityError::DriverFull {
                driver,
                seats: load.seats,
            });
        }
        load.passengers.push(passenger);
        Ok(())
    }

    pub fn passengers_of(&self, driver: DriverId) -> Option<&[PassengerId]> {
        self.load(driver).map(DriverLoad::passengers)
    }

    pub fn load(&self, driver: DriverId) -> Option<&DriverLoad> {
        self.index.get(&driver).map(|&slot| &self.loads[slot])
    }

    pub fn loads(&self) -> &[DriverLoad] {
        &self.loads
    }

    /// Drivers that ended up with at least one passenger.
    pub fn occupied(&self) -> impl Iterator<Item = &DriverLoad> {
        self.loads.iter().filter(|load| !load.passengers.is_empty())
    }

    pub fn assigned_count(&self) -> usize {
        self.loads.iter().map(|load| load.passengers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }
}

/// Output of one optimize run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentResult {
    pub assignment: Assignment,
    /// Passengers no driver had room for, in input order.
    pub unassigned: Vec<PassengerId>,
}

impl AssignmentResult {
    pub fn total_passengers(&self) -> usize {
        self.assignment.assigned_count() + self.unassigned.len()
    }
}
