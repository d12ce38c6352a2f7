//! Terminal output for a finished run.

use carpool_core::export::{AssignmentRow, UNASSIGNED};
use carpool_core::preset::SkippedEntry;
use carpool_core::roster::RosterState;
use carpool_core::{OptimizeOutcome, RosterError};

pub fn print_rejections(rejected: &[(String, RosterError)]) {
    for (name, err) in rejected {
        log::warn!("left out {name}: {err}");
    }
}

pub fn print_skipped(skipped: &[SkippedEntry]) {
    for entry in skipped {
        log::warn!("preset entry {} skipped: {}", entry.name, entry.reason);
    }
}

pub fn print_outcome(roster: &RosterState, outcome: &OptimizeOutcome) {
    print_table(&outcome.rows);

    let unassigned: Vec<&str> = outcome
        .rows
        .iter()
        .filter(|row| row.driver == UNASSIGNED)
        .map(|row| row.passenger.as_str())
        .collect();
    if !unassigned.is_empty() {
        println!();
        println!("No seat left for: {}", unassigned.join(", "));
    }

    if outcome.routes.routes.is_empty() {
        return;
    }
    println!();
    println!("Routes");
    for route in &outcome.routes.routes {
        let name = roster
            .driver(route.driver)
            .map(|d| d.name.as_str())
            .unwrap_or("?");
        let stops = route.waypoints.len().saturating_sub(2);
        match &route.outcome {
            Ok(geometry) => println!(
                "  {name:<20} {stops} pickup(s)  {:>7.2} mi  {:>5.0} min",
                geometry.distance_miles,
                geometry.duration_secs / 60.0
            ),
            Err(err) => println!("  {name:<20} {stops} pickup(s)  no route: {err}"),
        }
    }
}

fn print_table(rows: &[AssignmentRow]) {
    let driver_width = column_width("Driver", rows.iter().map(|r| r.driver.as_str()));
    let passenger_width = column_width("Passenger", rows.iter().map(|r| r.passenger.as_str()));

    println!(
        "{:<driver_width$}  {:<passenger_width$}  Passenger Address",
        "Driver", "Passenger"
    );
    for row in rows {
        println!(
            "{:<driver_width$}  {:<passenger_width$}  {}",
            row.driver, row.passenger, row.passenger_address
        );
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_width_counts_characters_not_bytes() {
        assert_eq!(column_width("Driver", ["José Núñez"].into_iter()), 10);
        assert_eq!(column_width("Passenger", ["Al"].into_iter()), 9);
    }
}
