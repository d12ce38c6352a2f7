//! Assignment engine benchmarks using Criterion.rs.

use carpool_core::assignment::{AssignmentStrategy, NearestAvailableDriver};
use carpool_core::roster::RosterState;
use carpool_core::test_helpers::{coord, new_driver, new_passenger};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Drivers and passengers spread over a ~20 mile square, deterministic layout.
fn grid_roster(drivers: usize, passengers: usize) -> RosterState {
    let mut state = RosterState::new().with_destination(coord(39.9238, -75.1627));
    for i in 0..drivers {
        let step = i as f64 / drivers as f64;
        state
            .push_driver(new_driver(
                &format!("d{i}"),
                (i % 4 + 1) as u32,
                39.80 + 0.3 * step,
                -75.30 + 0.3 * ((i * 7) % drivers) as f64 / drivers as f64,
            ))
            .expect("fresh roster has ids to spare");
    }
    for i in 0..passengers {
        let step = i as f64 / passengers as f64;
        state
            .push_passenger(new_passenger(
                &format!("p{i}"),
                39.80 + 0.3 * ((i * 13) % passengers) as f64 / passengers as f64,
                -75.30 + 0.3 * step,
            ))
            .expect("fresh roster has ids to spare");
    }
    state
}

fn bench_nearest_available(c: &mut Criterion) {
    let scenarios = vec![("small", 10, 30), ("medium", 50, 150), ("large", 200, 600)];

    let mut group = c.benchmark_group("nearest_available_driver");
    for (name, drivers, passengers) in scenarios {
        let state = grid_roster(drivers, passengers);
        let destination = coord(39.9238, -75.1627);
        group.bench_with_input(BenchmarkId::from_parameter(name), &state, |b, state| {
            b.iter(|| {
                black_box(NearestAvailableDriver.assign(
                    state.drivers(),
                    state.passengers(),
                    destination,
                ))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_available);
criterion_main!(benches);
