//! Pre-arranged rosters: each driver listed with the passengers they usually carry.
//!
//! Loading a preset adds every driver with exactly as many seats as listed
//! passengers, parked at the destination address, then adds the passengers. The
//! engine is still free to regroup them on the next optimize.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::roster::{DriverId, PassengerId};
use crate::session::RosterError;

/// Address shown for preset drivers whose home is unknown.
pub const UNKNOWN_ADDRESS: &str = "TBD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetPassenger {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetDriver {
    pub name: String,
    #[serde(default)]
    pub passengers: Vec<PresetPassenger>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetRoster {
    pub drivers: Vec<PresetDriver>,
}

impl PresetRoster {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn passenger_count(&self) -> usize {
        self.drivers.iter().map(|d| d.passengers.len()).sum()
    }
}

/// What a preset load did. Rejected entries are listed, not fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetLoadReport {
    pub drivers: Vec<DriverId>,
    pub passengers: Vec<PassengerId>,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub name: String,
    pub reason: RosterError,
}
