//! Ride coordination: place passengers in drivers' free seats, then route and
//! tabulate the result.
//!
//! - [`assignment`]: greedy nearest-driver assignment under seat limits
//! - [`routing`]: per-driver waypoint sequences and pluggable route providers
//! - [`export`]: flat assignment table and CSV output
//! - [`geocoding`]: address lookup behind a trait
//! - [`session`]: the mutable roster a coordinator builds up between runs

pub mod assignment;
pub mod config;
pub mod export;
pub mod geocoding;
pub mod preset;
pub mod roster;
pub mod routing;
pub mod session;
pub mod spatial;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use assignment::{optimize, AssignmentResult, OptimizeError};
pub use session::{OptimizeOutcome, RideCoordinator, RosterError};
