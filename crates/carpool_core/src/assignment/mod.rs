//! Capacitated passenger-to-driver assignment.
//!
//! [`optimize`] is the pure entry point: it checks that a run is possible, then
//! hands the roster to the [`NearestAvailableDriver`] strategy. Nothing is
//! remembered between calls.

pub mod nearest;
pub mod strategy;
pub mod types;

pub use nearest::NearestAvailableDriver;
pub use strategy::AssignmentStrategy;
pub use types::{Assignment, AssignmentResult, CapacityError, DriverLoad};

use crate::roster::RosterState;
use crate::spatial::Coordinate;

/// Inputs missing for an optimize run. The roster is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OptimizeError {
    #[error("destination has not been resolved")]
    MissingDestination,
    #[error("no drivers on the roster")]
    NoDrivers,
    #[error("no passengers on the roster")]
    NoPassengers,
}

/// Run the default strategy over a roster snapshot.
pub fn optimize(state: &RosterState) -> Result<AssignmentResult, OptimizeError> {
    optimize_with(&NearestAvailableDriver, state)
}

/// Run `strategy` over a roster snapshot after validating its inputs.
pub fn optimize_with(
    strategy: &dyn AssignmentStrategy,
    state: &RosterState,
) -> Result<AssignmentResult, OptimizeError> {
    run_strategy(strategy, state).map(|(_, result)| result)
}

/// Validate, then assign. Also returns the destination the run was checked against.
pub(crate) fn run_strategy(
    strategy: &dyn AssignmentStrategy,
    state: &RosterState,
) -> Result<(Coordinate, AssignmentResult), OptimizeError> {
    let destination = state.destination().ok_or(OptimizeError::MissingDestination)?;
    if state.drivers().is_empty() {
        return Err(OptimizeError::NoDrivers);
    }
    if state.passengers().is_empty() {
        return Err(OptimizeError::NoPassengers);
    }

    let result = strategy.assign(state.drivers(), state.passengers(), destination);
    log::info!(
        "assigned {} of {} passenger(s) across {} driver(s); {} unassigned",
        result.assignment.assigned_count(),
        state.passengers().len(),
        result.assignment.occupied().count(),
        result.unassigned.len()
    );
    Ok((destination, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::RosterIntegrityError;
    use crate::test_helpers::{coord, new_driver, new_passenger};

    #[test]
    fn refuses_without_destination() -> Result<(), RosterIntegrityError> {
        let state = RosterState::new()
            .with_driver(new_driver("Joel", 2, 0.0, 0.0))?
            .with_passenger(new_passenger("Zaida", 0.0, 0.0))?;
        assert_eq!(optimize(&state), Err(OptimizeError::MissingDestination));
        Ok(())
    }

    #[test]
    fn refuses_without_drivers_or_passengers() -> Result<(), RosterIntegrityError> {
        let base = RosterState::new().with_destination(coord(0.0, 0.0));
        assert_eq!(
            optimize(&base.clone().with_passenger(new_passenger("Zaida", 0.0, 0.0))?),
            Err(OptimizeError::NoDrivers)
        );
        assert_eq!(
            optimize(&base.with_driver(new_driver("Joel", 2, 0.0, 0.0))?),
            Err(OptimizeError::NoPassengers)
        );
        Ok(())
    }

    #[test]
    fn complete_roster_is_optimized() -> Result<(), RosterIntegrityError> {
        let state = RosterState::new()
            .with_destination(coord(0.0, 0.0))
            .with_driver(new_driver("Joel", 2, 0.0, 0.0))?
            .with_passenger(new_passenger("Zaida", 0.0, 0.0))?;
        let result = optimize(&state).expect("complete roster");
        assert_eq!(result.total_passengers(), 1);
        assert!(result.unassigned.is_empty());
        Ok(())
    }

    #[test]
    fn validated_run_reports_the_destination_it_checked() -> Result<(), RosterIntegrityError> {
        let state = RosterState::new()
            .with_destination(coord(1.0, 2.0))
            .with_driver(new_driver("Joel", 1, 0.0, 0.0))?
            .with_passenger(new_passenger("Zaida", 0.0, 0.0))?;

        let (destination, result) = run_strategy(&NearestAvailableDriver, &state).unwrap();

        assert_eq!(destination, coord(1.0, 2.0));
        assert_eq!(result, optimize(&state).unwrap());
        Ok(())
    }
}
