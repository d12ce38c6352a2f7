//! Per-driver route construction off an assignment result.

use std::collections::HashMap;

use serde::Serialize;

use super::{RouteError, RouteGeometry, RouteProfile, RouteProvider};
use crate::assignment::{AssignmentResult, DriverLoad};
use crate::roster::{Driver, DriverId, Passenger, PassengerId, RosterState};
use crate::spatial::Coordinate;

/// Route request and outcome for one driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverRoute {
    pub driver: DriverId,
    /// Driver origin, pickups in assignment order, then the destination.
    pub waypoints: Vec<Coordinate>,
    #[serde(serialize_with = "serialize_outcome")]
    pub outcome: Result<RouteGeometry, RouteError>,
}

impl DriverRoute {
    pub fn geometry(&self) -> Option<&RouteGeometry> {
        self.outcome.as_ref().ok()
    }

    pub fn failure(&self) -> Option<&RouteError> {
        self.outcome.as_ref().err()
    }
}

fn serialize_outcome<S: serde::Serializer>(
    outcome: &Result<RouteGeometry, RouteError>,
    ser: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "snake_case")]
    enum Outcome<'a> {
        Geometry(&'a RouteGeometry),
        Failure(String),
    }

    match outcome {
        Ok(geometry) => Outcome::Geometry(geometry).serialize(ser),
        Err(err) => Outcome::Failure(err.to_string()).serialize(ser),
    }
}

/// Routes for every driver that picked someone up, in assignment order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoutePlan {
    pub routes: Vec<DriverRoute>,
}

impl RoutePlan {
    pub fn route_for(&self, driver: DriverId) -> Option<&DriverRoute> {
        self.routes.iter().find(|route| route.driver == driver)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &DriverRoute> {
        self.routes.iter().filter(|route| route.outcome.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &DriverRoute> {
        self.routes.iter().filter(|route| route.outcome.is_err())
    }
}

/// Waypoints in fixed order: driver, pickups as assigned, destination.
pub fn waypoints_for(
    driver: &Driver,
    passengers: &[&Passenger],
    destination: Coordinate,
) -> Vec<Coordinate> {
    let mut waypoints = Vec::with_capacity(passengers.len() + 2);
    waypoints.push(driver.location);
    waypoints.extend(passengers.iter().map(|p| p.location));
    waypoints.push(destination);
    waypoints
}

/// Request a route for each occupied driver.
///
/// A failed request is recorded on that driver's entry and the loop moves on.
pub fn build_routes(
    provider: &dyn RouteProvider,
    state: &RosterState,
    result: &AssignmentResult,
    destination: Coordinate,
) -> RoutePlan {
    let drivers: HashMap<DriverId, &Driver> = state.drivers().iter().map(|d| (d.id, d)).collect();
    let passengers: HashMap<PassengerId, &Passenger> =
        state.passengers().iter().map(|p| (p.id, p)).collect();

    let routes = result
        .assignment
        .occupied()
        .map(|load| route_one(provider, load, &drivers, &passengers, destination))
        .collect();

    RoutePlan { routes }
}

fn route_one(
    provider: &dyn RouteProvider,
    load: &DriverLoad,
    drivers: &HashMap<DriverId, &Driver>,
    passengers: &HashMap<PassengerId, &Passenger>,
    destination: Coordinate,
) -> DriverRoute {
    let resolved = resolve_stops(load, drivers, passengers);
    let (waypoints, outcome) = match resolved {
        Ok((driver, riders)) => {
            let waypoints = waypoints_for(driver, &riders, destination);
            let outcome = provider.route(&waypoints, RouteProfile::Driving);
            (waypoints, outcome)
        }
        Err(err) => (Vec::new(), Err(err)),
    };

    if let Err(err) = &outcome {
        log::warn!("no route for {}: {}", load.driver, err);
    }

    DriverRoute {
        driver: load.driver,
        waypoints,
        outcome,
    }
}

fn resolve_stops<'a>(
    load: &DriverLoad,
    drivers: &HashMap<DriverId, &'a Driver>,
    passengers: &HashMap<PassengerId, &'a Passenger>,
) -> Result<(&'a Driver, Vec<&'a Passenger>), RouteError> {
    let driver = drivers
        .get(&load.driver)
        .copied()
        .ok_or(RouteError::UnknownDriver(load.driver))?;
    let riders = load
        .passengers()
        .iter()
        .map(|id| {
            passengers
                .get(id)
                .copied()
                .ok_or(RouteError::UnknownPassenger(*id))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((driver, riders))
}
