use std::error::Error;
use std::fs;
use std::path::PathBuf;

use carpool_core::config::CoordinatorConfig;
use carpool_core::export::export_to_csv;
use carpool_core::preset::PresetRoster;
use carpool_core::routing::RouteProviderKind;
use carpool_core::RideCoordinator;
use clap::{Parser, Subcommand};

mod report;
mod request;

use request::RosterRequest;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "carpool",
    about = "Assign passengers to drivers heading to a shared destination",
    long_about = "Geocodes a roster of drivers and passengers, places every passenger\n\
                  with the nearest driver that still has a free seat, and writes the\n\
                  assignment table as CSV together with a per-driver route summary."
)]
struct Cli {
    /// JSON configuration file (defaults apply to missing fields)
    #[arg(long, global = true, env = "CARPOOL_CONFIG")]
    config: Option<PathBuf>,
    /// Destination address (overrides the configured one)
    #[arg(long, global = true, env = "CARPOOL_DESTINATION")]
    destination: Option<String>,
    /// Route through this OSRM endpoint
    #[arg(long, global = true, env = "CARPOOL_OSRM_ENDPOINT", conflicts_with = "ors_api_key")]
    osrm_endpoint: Option<String>,
    /// Route through openrouteservice with this API key
    #[arg(long, global = true, env = "ORS_API_KEY")]
    ors_api_key: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a roster of drivers and passengers read from JSON
    Optimize {
        /// Roster file: {"drivers": [...], "passengers": [...]}
        #[arg(long)]
        roster: PathBuf,
        /// Output CSV path
        #[arg(long, default_value = "ride_assignments.csv")]
        out: PathBuf,
        /// Also write driver routes as JSON
        #[arg(long)]
        routes: Option<PathBuf>,
    },
    /// Load a pre-arranged roster and optimize it
    Preset {
        /// Preset file: {"drivers": [{"name": ..., "passengers": [...]}]}
        #[arg(long)]
        preset: PathBuf,
        /// Output CSV path
        #[arg(long, default_value = "ride_assignments.csv")]
        out: PathBuf,
    },
    /// Resolve a single address and print its coordinate
    Geocode { address: String },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(&cli)?;
    let mut session = RideCoordinator::from_config(config)?;

    match cli.command {
        Commands::Optimize { roster, out, routes } => {
            let request: RosterRequest = serde_json::from_str(&fs::read_to_string(&roster)?)?;
            session.use_configured_destination()?;
            let rejected = request.apply(&mut session);
            report::print_rejections(&rejected);

            let outcome = session.optimize()?.clone();
            export_to_csv(&outcome.rows, &out)?;
            report::print_outcome(session.roster(), &outcome);
            if let Some(path) = routes {
                fs::write(&path, serde_json::to_string_pretty(&outcome.routes)?)?;
                log::info!("routes written to {}", path.display());
            }
            log::info!("assignments written to {}", out.display());
        }
        Commands::Preset { preset, out } => {
            let preset = PresetRoster::from_json_file(&preset)?;
            session.use_configured_destination()?;
            let loaded = session.load_preset(&preset);
            report::print_skipped(&loaded.skipped);

            let outcome = session.optimize()?.clone();
            export_to_csv(&outcome.rows, &out)?;
            report::print_outcome(session.roster(), &outcome);
            log::info!("assignments written to {}", out.display());
        }
        Commands::Geocode { address } => {
            let coordinate = session.geocode(&address)?;
            println!("{:.6}, {:.6}", coordinate.lat(), coordinate.lon());
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<CoordinatorConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => CoordinatorConfig::from_json_file(path)?,
        None => CoordinatorConfig::default(),
    };
    if let Some(destination) = &cli.destination {
        config = config.with_destination_address(destination.clone());
    }
    if let Some(endpoint) = &cli.osrm_endpoint {
        config = config.with_route_provider(RouteProviderKind::Osrm {
            endpoint: endpoint.clone(),
        });
    }
    if let Some(api_key) = &cli.ors_api_key {
        config = config.with_route_provider(RouteProviderKind::OpenRouteService {
            api_key: api_key.clone(),
            endpoint: carpool_core::routing::default_ors_endpoint(),
        });
    }
    Ok(config)
}
