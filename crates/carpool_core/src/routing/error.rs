use crate::roster::{DriverId, PassengerId};

/// Why a driver ended up without a route geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    #[error("a route needs at least two waypoints, got {0}")]
    TooFewWaypoints(usize),
    #[error("routing request failed: {0}")]
    Http(String),
    #[error("routing response could not be decoded: {0}")]
    Json(String),
    #[error("routing provider answered {0}")]
    Api(String),
    #[error("routing provider found no route")]
    NoRoute,
    #[error("{0} is not on the roster")]
    UnknownDriver(DriverId),
    #[error("{0} is not on the roster")]
    UnknownPassenger(PassengerId),
}
