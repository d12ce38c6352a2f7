//! Roster model: drivers, passengers and the per-run snapshot the engine consumes.
//!
//! Identity is always the numeric id handed out by [`RosterState`]; names and
//! addresses are display data only.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::spatial::Coordinate;

/// Identifier of a driver within one roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DriverId(pub u32);

/// Identifier of a passenger within one roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PassengerId(pub u32);

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "driver#{}", self.0)
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "passenger#{}", self.0)
    }
}

/// Which leg of the trip a driver is offering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "To Church", alias = "ToChurch")]
    ToChurch,
    #[serde(rename = "From Church", alias = "FromChurch")]
    FromChurch,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToChurch => f.write_str("To Church"),
            Direction::FromChurch => f.write_str("From Church"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    /// Seats offered for the whole run. Zero means the driver never takes anyone.
    pub seats: u32,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub id: PassengerId,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A driver before the roster has assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDriver {
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    pub seats: u32,
    pub direction: Direction,
}

/// A passenger before the roster has assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPassenger {
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    pub phone: Option<String>,
}

/// Snapshot of everything one optimize run needs.
///
/// Entities keep their insertion order, which is also the order the engine
/// walks them in.
/// Id bookkeeping a roster refuses to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RosterIntegrityError {
    #[error("{0} appears more than once")]
    DuplicateDriver(DriverId),
    #[error("{0} appears more than once")]
    DuplicatePassenger(PassengerId),
    #[error("no driver id left to hand out")]
    DriverIdsExhausted,
    #[error("no passenger id left to hand out")]
    PassengerIdsExhausted,
}

/// Snapshot of everything one optimize run needs.
///
/// Entities keep their insertion order, which is also the order the engine
/// walks them in. Ids are unique within a roster and never handed out twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRoster")]
pub struct RosterState {
    drivers: Vec<Driver>,
    passengers: Vec<Passenger>,
    destination: Option<Coordinate>,
    next_driver_id: u32,
    next_passenger_id: u32,
}

#[derive(Deserialize)]
struct RawRoster {
    #[serde(default)]
    drivers: Vec<Driver>,
    #[serde(default)]
    passengers: Vec<Passenger>,
    #[serde(default)]
    destination: Option<Coordinate>,
    #[serde(default)]
    next_driver_id: u32,
    #[serde(default)]
    next_passenger_id: u32,
}

impl TryFrom<RawRoster> for RosterState {
    type Error = RosterIntegrityError;

    fn try_from(raw: RawRoster) -> Result<Self, Self::Error> {
        let mut state = RosterState::from_parts(raw.drivers, raw.passengers, raw.destination)?;
        // Stored counters may be ahead of the entities after a clear.
        state.next_driver_id = state.next_driver_id.max(raw.next_driver_id);
        state.next_passenger_id = state.next_passenger_id.max(raw.next_passenger_id);
        Ok(state)
    }
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from already-identified entities.
    ///
    /// Numbering continues after the largest id given. `u32::MAX` is never a
    /// valid id, and repeated ids are rejected.
    pub fn from_parts(
        drivers: Vec<Driver>,
        passengers: Vec<Passenger>,
        destination: Option<Coordinate>,
    ) -> Result<Self, RosterIntegrityError> {
        let mut seen = HashSet::new();
        if let Some(dup) = drivers.iter().find(|d| !seen.insert(d.id)) {
            return Err(RosterIntegrityError::DuplicateDriver(dup.id));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = passengers.iter().find(|p| !seen.insert(p.id)) {
            return Err(RosterIntegrityError::DuplicatePassenger(dup.id));
        }

        let next_driver_id = match drivers.iter().map(|d| d.id.0).max() {
            Some(max) => max
                .checked_add(1)
                .ok_or(RosterIntegrityError::DriverIdsExhausted)?,
            None => 0,
        };
        let next_passenger_id = match passengers.iter().map(|p| p.id.0).max() {
            Some(max) => max
                .checked_add(1)
                .ok_or(RosterIntegrityError::PassengerIdsExhausted)?,
            None => 0,
        };

        Ok(Self {
            drivers,
            passengers,
            destination,
            next_driver_id,
            next_passenger_id,
        })
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }

    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.iter().find(|p| p.id == id)
    }

    pub fn push_driver(&mut self, driver: NewDriver) -> Result<DriverId, RosterIntegrityError> {
        let id = DriverId(self.next_driver_id);
        self.next_driver_id = id
            .0
            .checked_add(1)
            .ok_or(RosterIntegrityError::DriverIdsExhausted)?;
        self.drivers.push(Driver {
            id,
            name: driver.name,
            address: driver.address,
            location: driver.location,
            seats: driver.seats,
            direction: driver.direction,
        });
        Ok(id)
    }

    pub fn push_passenger(
        &mut self,
        passenger: NewPassenger,
    ) -> Result<PassengerId, RosterIntegrityError> {
        let id = PassengerId(self.next_passenger_id);
        self.next_passenger_id = id
            .0
            .checked_add(1)
            .ok_or(RosterIntegrityError::PassengerIdsExhausted)?;
        self.passengers.push(Passenger {
            id,
            name: passenger.name,
            address: passenger.address,
            location: passenger.location,
            phone: passenger.phone,
        });
        Ok(id)
    }

    pub fn set_destination(&mut self, destination: Option<Coordinate>) {
        self.destination = destination;
    }

    /// Drop every driver and passenger. The destination is kept.
    pub fn clear_entities(&mut self) {
        self.drivers.clear();
        self.passengers.clear();
    }

    pub fn with_destination(mut self, destination: Coordinate) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_driver(mut self, driver: NewDriver) -> Result<Self, RosterIntegrityError> {
        self.push_driver(driver)?;
        Ok(self)
    }

    pub fn with_passenger(mut self, passenger: NewPassenger) -> Result<Self, RosterIntegrityError> {
        self.push_passenger(passenger)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn here() -> Coordinate {
        Coordinate::new(39.95, -75.16).unwrap()
    }

    fn driver(id: u32) -> Driver {
        Driver {
            id: DriverId(id),
            name: format!("d{id}"),
            address: "a".into(),
            location: here(),
            seats: 1,
            direction: Direction::ToChurch,
        }
    }

    fn draft(name: &str) -> NewDriver {
        NewDriver {
            name: name.into(),
            address: "a".into(),
            location: here(),
            seats: 1,
            direction: Direction::ToChurch,
        }
    }

    fn rider(name: &str) -> NewPassenger {
        NewPassenger {
            name: name.into(),
            address: "y".into(),
            location: here(),
            phone: None,
        }
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut roster = RosterState::new();
        let a = roster.push_driver(draft("Joel")).unwrap();
        let b = roster
            .push_driver(NewDriver {
                address: "b".into(),
                direction: Direction::FromChurch,
                ..draft("Joel")
            })
            .unwrap();
        assert_eq!((a, b), (DriverId(0), DriverId(1)));
        assert_eq!(roster.driver(b).map(|d| d.address.as_str()), Some("b"));
    }

    #[test]
    fn from_parts_continues_numbering() {
        let existing = Passenger {
            id: PassengerId(7),
            name: "Nana".into(),
            address: "x".into(),
            location: here(),
            phone: None,
        };
        let mut roster = RosterState::from_parts(Vec::new(), vec![existing], None).unwrap();
        let next = roster.push_passenger(rider("Leah")).unwrap();
        assert_eq!(next, PassengerId(8));
    }

    #[test]
    fn from_parts_rejects_an_id_that_cannot_be_followed() {
        assert_eq!(
            RosterState::from_parts(vec![driver(u32::MAX)], Vec::new(), None),
            Err(RosterIntegrityError::DriverIdsExhausted)
        );
    }

    #[test]
    fn push_refuses_instead_of_wrapping_around() {
        let mut roster = RosterState::from_parts(vec![driver(u32::MAX - 1)], Vec::new(), None).unwrap();

        assert_eq!(
            roster.push_driver(draft("Will")),
            Err(RosterIntegrityError::DriverIdsExhausted)
        );
        assert_eq!(roster.drivers().len(), 1);
        assert!(roster.driver(DriverId(0)).is_none());
    }

    #[test]
    fn from_parts_rejects_repeated_ids() {
        assert_eq!(
            RosterState::from_parts(vec![driver(0), driver(0)], Vec::new(), None),
            Err(RosterIntegrityError::DuplicateDriver(DriverId(0)))
        );
    }

    #[test]
    fn deserializing_checks_ids_and_counters() {
        let two = RosterState::from_parts(vec![driver(0), driver(1)], Vec::new(), None).unwrap();
        let mut json = serde_json::to_value(&two).unwrap();
        json["drivers"][1]["id"] = serde_json::json!(0);
        assert!(serde_json::from_value::<RosterState>(json.clone()).is_err());

        json["drivers"][1]["id"] = serde_json::json!(5);
        json["next_driver_id"] = serde_json::json!(0);
        let mut restored: RosterState = serde_json::from_value(json).unwrap();
        assert_eq!(restored.push_driver(draft("Ike")), Ok(DriverId(6)));
    }

    #[test]
    fn clear_keeps_destination() {
        let mut roster = RosterState::new().with_destination(here());
        roster.push_passenger(rider("Fred")).unwrap();
        roster.clear_entities();
        assert!(roster.passengers().is_empty());
        assert_eq!(roster.destination(), Some(here()));
    }

    #[test]
    fn direction_uses_display_labels_in_json() {
        let json = serde_json::to_string(&Direction::FromChurch).unwrap();
        assert_eq!(json, "\"From Church\"");
        let parsed: Direction = serde_json::from_str("\"ToChurch\"").unwrap();
        assert_eq!(parsed, Direction::ToChurch);
    }
}
