use geo::Point;

use crate::roster::{Driver, DriverId, Passenger};
use crate::spatial::{point_distance_miles, Coordinate};

use super::strategy::AssignmentStrategy;
use super::types::{Assignment, AssignmentResult};

/// Greedy nearest-driver assignment.
///
/// Passengers are visited once, in input order. Each one goes to the closest
/// driver that still has a free seat at that moment; earlier decisions are never
/// revisited, so the result is not a global optimum over the batch.
///
/// # Algorithm Behavior
///
/// 1. Skip drivers whose assigned count has reached their seats
/// 2. Pick the minimum geodesic distance from passenger to driver
/// 3. On equal distance keep the driver that comes first in the driver list
/// 4. With no free seat anywhere, the passenger is left unassigned
///
/// # Performance
///
/// O(p · d) distance evaluations. Driver positions are converted once per run.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestAvailableDriver;

struct Candidate {
    id: DriverId,
    position: Point<f64>,
}

impl AssignmentStrategy for NearestAvailableDriver {
    fn assign(
        &self,
        drivers: &[Driver],
        passengers: &[Passenger],
        _destination: Coordinate,
    ) -> AssignmentResult {
        let mut assignment = Assignment::for_drivers(drivers);
        let candidates: Vec<Candidate> = drivers
            .iter()
            .map(|driver| Candidate {
                id: driver.id,
                position: driver.location.to_point(),
            })
            .collect();
        let mut unassigned = Vec::new();

        for passenger in passengers {
            let pickup = passenger.location.to_point();
            let mut best: Option<(DriverId, f64)> = None;

            for candidate in &candidates {
                let has_seat = assignment
                    .load(candidate.id)
                    .is_some_and(|load| load.has_capacity());
                if !has_seat {
                    continue;
                }

                let distance = point_distance_miles(pickup, candidate.position);
                match best {
                    None => best = Some((candidate.id, distance)),
                    // Strict comparison keeps the earlier driver on ties.
                    Some((_, best_distance)) if distance < best_distance => {
                        best = Some((candidate.id, distance))
                    }
                    _ => {}
                }
            }

            let placed = best.and_then(|(driver, distance)| {
                match assignment.assign(driver, passenger.id) {
                    Ok(()) => {
                        log::debug!(
                            "placed {} ({}) with {} at {:.2} mi",
                            passenger.id,
                            passenger.name,
                            driver,
                            distance
                        );
                        Some(driver)
                    }
                    Err(err) => {
                        log::warn!("could not place {}: {}", passenger.id, err);
                        None
                    }
                }
            });

            if placed.is_none() {
                log::debug!("no free seat for {} ({})", passenger.id, passenger.name);
                unassigned.push(passenger.id);
            }
        }

        AssignmentResult {
            assignment,
            unassigned,
        }
    }
}
