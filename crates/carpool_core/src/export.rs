//! Flat assignment table and its CSV export.
//!
//! The table is a pure projection of an [`AssignmentResult`]: one row per
//! passenger, assigned rows first (driver order, then pickup order), then the
//! unassigned passengers under the [`UNASSIGNED`] sentinel.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assignment::AssignmentResult;
use crate::roster::{DriverId, Passenger, PassengerId, RosterState};

mod csv;

pub use self::csv::{read_csv, write_csv, HEADER};

/// Driver column value for passengers nobody could take.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] ::csv::Error),
}

/// One line of the assignment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    #[serde(rename = "Driver")]
    pub driver: String,
    #[serde(rename = "Passenger")]
    pub passenger: String,
    #[serde(rename = "Passenger Address")]
    pub passenger_address: String,
}

/// Flatten an assignment into table rows.
///
/// Ids missing from `state` are rendered by their id so the row count always
/// matches the passenger count of the result.
pub fn aggregate_rows(state: &RosterState, result: &AssignmentResult) -> Vec<AssignmentRow> {
    let drivers: HashMap<DriverId, &str> = state
        .drivers()
        .iter()
        .map(|d| (d.id, d.name.as_str()))
        .collect();
    let passengers: HashMap<PassengerId, &Passenger> =
        state.passengers().iter().map(|p| (p.id, p)).collect();

    let mut rows = Vec::with_capacity(result.total_passengers());

    for load in result.assignment.loads() {
        let driver = drivers
            .get(&load.driver)
            .map(|name| name.to_string())
            .unwrap_or_else(|| load.driver.to_string());
        for id in load.passengers() {
            rows.push(row(driver.clone(), *id, &passengers));
        }
    }

    for id in &result.unassigned {
        rows.push(row(UNASSIGNED.to_string(), *id, &passengers));
    }

    rows
}

fn row(driver: String, id: PassengerId, passengers: &HashMap<PassengerId, &Passenger>) -> AssignmentRow {
    match passengers.get(&id) {
        Some(passenger) => AssignmentRow {
            driver,
            passenger: passenger.name.clone(),
            passenger_address: passenger.address.clone(),
        },
        None => AssignmentRow {
            driver,
            passenger: id.to_string(),
            passenger_address: String::new(),
        },
    }
}

/// Write `rows` as CSV to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn export_to_csv(rows: &[AssignmentRow], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(rows, file)
}
