use crate::roster::{Driver, Passenger};
use crate::spatial::Coordinate;

use super::types::AssignmentResult;

/// Places passengers into driver seats.
///
/// Implementations must be deterministic: the same driver list, passenger list
/// and destination (same order, same coordinates) always produce the same result.
///
/// # Examples
///
/// ```rust
/// use carpool_core::assignment::{AssignmentStrategy, NearestAvailableDriver};
/// use carpool_core::roster::{Direction, NewDriver, NewPassenger, RosterState};
/// use carpool_core::spatial::Coordinate;
///
/// let origin = Coordinate::new(39.95, -75.16).unwrap();
/// let roster = RosterState::new()
///     .with_driver(NewDriver {
///         name: "Will".into(),
///         address: "Overbrook".into(),
///         location: origin,
///         seats: 1,
///         direction: Direction::ToChurch,
///     })?
///     .with_passenger(NewPassenger {
///         name: "Lily".into(),
///         address: "Ridley Park".into(),
///         location: origin,
///         phone: None,
///     })?;
///
/// let result = NearestAvailableDriver.assign(roster.drivers(), roster.passengers(), origin);
/// assert!(result.unassigned.is_empty());
/// # Ok::<(), carpool_core::roster::RosterIntegrityError>(())
/// ```
pub trait AssignmentStrategy: Send + Sync {
    /// Assign every passenger to at most one driver without exceeding any
    /// driver's seats. Passengers that cannot be placed end up in `unassigned`.
    fn assign(
        &self,
        drivers: &[Driver],
        passengers: &[Passenger],
        destination: Coordinate,
    ) -> AssignmentResult;
}
