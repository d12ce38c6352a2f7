//! Session-scoped coordinator: the roster users build up, plus the last optimize run.
//!
//! Adding an entity geocodes its address first; an address that cannot be
//! resolved leaves the roster untouched. Each [`RideCoordinator::optimize`]
//! replaces the previous run wholesale.

use serde::Serialize;

use crate::assignment::{
    run_strategy, AssignmentResult, AssignmentStrategy, NearestAvailableDriver, OptimizeError,
};
use crate::config::CoordinatorConfig;
use crate::export::{aggregate_rows, AssignmentRow};
use crate::geocoding::{build_geocoder, GeocodeError, Geocoder};
use crate::preset::{PresetLoadReport, PresetRoster, SkippedEntry, UNKNOWN_ADDRESS};
use crate::roster::{
    Direction, DriverId, NewDriver, NewPassenger, PassengerId, RosterIntegrityError, RosterState,
};
use crate::routing::{build_route_provider, build_routes, RouteError, RoutePlan, RouteProvider};
use crate::spatial::Coordinate;

/// Why an entity was not added to the roster.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RosterError {
    #[error("name is empty")]
    EmptyName,
    #[error("seats must be between 1 and {max}, got {seats}")]
    InvalidSeats { seats: u32, max: u32 },
    #[error("could not locate {name}: {source}")]
    Geocode { name: String, source: GeocodeError },
    #[error(transparent)]
    Roster(#[from] RosterIntegrityError),
}

/// Collaborators that could not be constructed from configuration.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("geocoder setup failed: {0}")]
    Geocoder(#[from] GeocodeError),
    #[error("route provider setup failed: {0}")]
    Router(#[from] RouteError),
}

/// Everything one optimize run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizeOutcome {
    pub destination: Coordinate,
    pub result: AssignmentResult,
    pub rows: Vec<AssignmentRow>,
    pub routes: RoutePlan,
}

pub struct RideCoordinator {
    config: CoordinatorConfig,
    geocoder: Box<dyn Geocoder>,
    router: Box<dyn RouteProvider>,
    strategy: Box<dyn AssignmentStrategy>,
    roster: RosterState,
    last_run: Option<OptimizeOutcome>,
}

impl RideCoordinator {
    pub fn new(
        config: CoordinatorConfig,
        geocoder: Box<dyn Geocoder>,
        router: Box<dyn RouteProvider>,
    ) -> Self {
        Self {
            config,
            geocoder,
            router,
            strategy: Box::new(NearestAvailableDriver),
            roster: RosterState::new(),
            last_run: None,
        }
    }

    /// Build the configured geocoder and route provider.
    pub fn from_config(config: CoordinatorConfig) -> Result<Self, SetupError> {
        let timeout = config.request_timeout();
        let geocoder = build_geocoder(&config.geocoder, config.geocode_cache_capacity, timeout)?;
        let router = build_route_provider(&config.route_provider, timeout)?;
        Ok(Self::new(config, geocoder, router))
    }

    pub fn with_strategy(mut self, strategy: Box<dyn AssignmentStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn roster(&self) -> &RosterState {
        &self.roster
    }

    pub fn last_run(&self) -> Option<&OptimizeOutcome> {
        self.last_run.as_ref()
    }

    pub fn add_driver(
        &mut self,
        name: &str,
        address: &str,
        seats: u32,
        direction: Direction,
    ) -> Result<DriverId, RosterError> {
        let name = validated_name(name)?;
        self.check_seats(seats)?;
        let location = self.locate(&name, address)?;
        Ok(self.roster.push_driver(NewDriver {
            name,
            address: address.trim().to_string(),
            location,
            seats,
            direction,
        })?)
    }

    pub fn add_passenger(
        &mut self,
        name: &str,
        address: &str,
        phone: Option<String>,
    ) -> Result<PassengerId, RosterError> {
        let name = validated_name(name)?;
        let location = self.locate(&name, address)?;
        Ok(self.roster.push_passenger(NewPassenger {
            name,
            address: address.trim().to_string(),
            location,
            phone,
        })?)
    }

    /// Look an address up without touching the roster.
    pub fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        self.geocoder.geocode(address)
    }

    /// Resolve and store the destination. A failed lookup clears it, so a stale
    /// destination is never optimized against.
    pub fn set_destination(&mut self, address: &str) -> Result<Coordinate, GeocodeError> {
        match self.geocoder.geocode(address) {
            Ok(destination) => {
                self.roster.set_destination(Some(destination));
                Ok(destination)
            }
            Err(err) => {
                log::warn!("destination '{}' not resolved: {}", address, err);
                self.roster.set_destination(None);
                Err(err)
            }
        }
    }

    /// Resolve the destination address from configuration.
    pub fn use_configured_destination(&mut self) -> Result<Coordinate, GeocodeError> {
        let address = self.config.destination_address.clone();
        self.set_destination(&address)
    }

    /// Add a pre-arranged roster. Preset drivers start at the destination address
    /// with one seat per listed passenger.
    pub fn load_preset(&mut self, preset: &PresetRoster) -> PresetLoadReport {
        let mut report = PresetLoadReport::default();
        let origin_address = self.config.destination_address.clone();
        let origin = self.geocoder.geocode(&origin_address);

        for driver in &preset.drivers {
            let seats = u32::try_from(driver.passengers.len()).unwrap_or(u32::MAX);
            let added = self.add_preset_driver(&driver.name, seats, &origin);
            match added {
                Ok(id) => report.drivers.push(id),
                Err(reason) => report.skipped.push(SkippedEntry {
                    name: driver.name.clone(),
                    reason,
                }),
            }

            for passenger in &driver.passengers {
                match self.add_passenger(&passenger.name, &passenger.address, passenger.phone.clone()) {
                    Ok(id) => report.passengers.push(id),
                    Err(reason) => report.skipped.push(SkippedEntry {
                        name: passenger.name.clone(),
                        reason,
                    }),
                }
            }
        }

        log::info!(
            "preset loaded: {} driver(s), {} passenger(s), {} skipped",
            report.drivers.len(),
            report.passengers.len(),
            report.skipped.len()
        );
        report
    }

    /// Drop all drivers, passengers and the last run. The destination is kept.
    pub fn clear(&mut self) {
        self.roster.clear_entities();
        self.last_run = None;
    }

    /// Assign, route and tabulate the current roster.
    ///
    /// On `Err` the previous run is kept as it was.
    pub fn optimize(&mut self) -> Result<&OptimizeOutcome, OptimizeError> {
        let (destination, result) = run_strategy(self.strategy.as_ref(), &self.roster)?;

        let rows = aggregate_rows(&self.roster, &result);
        let routes = build_routes(self.router.as_ref(), &self.roster, &result, destination);

        let outcome = self.last_run.insert(OptimizeOutcome {
            destination,
            result,
            rows,
            routes,
        });
        Ok(&*outcome)
    }

    fn add_preset_driver(
        &mut self,
        name: &str,
        seats: u32,
        origin: &Result<Coordinate, GeocodeError>,
    ) -> Result<DriverId, RosterError> {
        let name = validated_name(name)?;
        // Seats follow the listed passengers, so only an empty list is refused.
        if seats == 0 {
            return Err(RosterError::InvalidSeats {
                seats,
                max: self.config.max_seats,
            });
        }
        let location = origin.clone().map_err(|source| RosterError::Geocode {
            name: name.clone(),
            source,
        })?;
        Ok(self.roster.push_driver(NewDriver {
            name,
            address: UNKNOWN_ADDRESS.to_string(),
            location,
            seats,
            direction: Direction::ToChurch,
        })?)
    }

    fn check_seats(&self, seats: u32) -> Result<(), RosterError> {
        if seats == 0 || seats > self.config.max_seats {
            return Err(RosterError::InvalidSeats {
                seats,
                max: self.config.max_seats,
            });
        }
        Ok(())
    }

    fn locate(&self, name: &str, address: &str) -> Result<Coordinate, RosterError> {
        self.geocoder.geocode(address).map_err(|source| {
            log::warn!("address for {} not found: {}", name, source);
            RosterError::Geocode {
                name: name.to_string(),
                source,
            }
        })
    }
}

fn validated_name(name: &str) -> Result<String, RosterError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RosterError::EmptyName);
    }
    Ok(name.to_string())
}
