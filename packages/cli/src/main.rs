#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for zone projects.
//!
//! Replays a TOML project file through a headless map session, then lists
//! its zones or exports the PDF report. `search` resolves a place name to
//! a region ring through Nominatim.

mod project;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use zone_map_geometry::{approximate_area_sq_km, format_coordinate, sq_km_to_sq_mi};
use zone_map_provider::headless::HeadlessMap;
use zone_map_provider::nominatim::NominatimSearch;
use zone_map_provider::service;
use zone_map_session::MapSession;
use zone_map_zone_models::{Units, Zone};

use crate::project::ProjectConfig;

/// Draw, list, and report on geographic zones.
#[derive(Parser)]
#[command(name = "zone_map_cli")]
#[command(about = "Draw, list, and report on geographic zones")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the zones a project file produces.
    Zones {
        /// Path to the project TOML file.
        project: PathBuf,
    },

    /// Resolve a place name to a bounding region.
    Search {
        /// Free-text place name (e.g., "Lake Naivasha, Kenya").
        text: String,
    },

    /// Export a project's PDF report.
    Report {
        /// Path to the project TOML file.
        project: PathBuf,

        /// Directory to write the report into.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Zones { project } => cmd_zones(&project),
        Commands::Search { text } => cmd_search(&text).await,
        Commands::Report { project, out } => cmd_report(&project, &out),
    }
}

fn area_label(zone: &Zone, units: Units) -> String {
    let sq_km = approximate_area_sq_km(&zone.ring);
    match units {
        Units::Metric => format!("{sq_km:.2} km\u{b2}"),
        Units::Imperial => format!("{:.2} mi\u{b2}", sq_km_to_sq_mi(sq_km)),
    }
}

/// Prints one line per zone: id, kind, name, centroid, and area.
fn cmd_zones(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = ProjectConfig::load(path)?;
    let session = config.build_session()?;
    let registry = session.registry();

    if registry.is_empty() {
        println!("No zones.");
        return Ok(());
    }

    let selected = registry.selected_id();
    for zone in registry.zones() {
        let marker = if selected == Some(&zone.id) { '*' } else { ' ' };
        println!(
            "{marker} {:<8} {:<10} {:<30} ({}, {})  {}",
            zone.id.as_str(),
            zone.kind.as_ref(),
            zone.name,
            format_coordinate(zone.centroid.lat),
            format_coordinate(zone.centroid.lng),
            area_label(zone, config.units),
        );
    }

    Ok(())
}

/// Looks up `text` and prints the resulting region ring.
async fn cmd_search(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = service::nominatim();
    log::info!("Searching {} for '{text}'", config.name);

    let search = NominatimSearch::from_config(&config)?;
    let mut session = MapSession::for_service(HeadlessMap::new(), &config);

    let Some(zone) = session.search(&search, text).await? else {
        println!("No region found for '{text}'.");
        return Ok(());
    };

    println!("{} ({})", zone.name, zone.kind);
    for (i, point) in zone.ring.iter().enumerate() {
        println!(
            "  {}. {}, {}",
            i + 1,
            format_coordinate(point.lat),
            format_coordinate(point.lng)
        );
    }
    println!(
        "  center: {}, {}",
        format_coordinate(zone.centroid.lat),
        format_coordinate(zone.centroid.lng)
    );

    Ok(())
}

/// Replays the project and writes its PDF report into `out`.
fn cmd_report(path: &Path, out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = ProjectConfig::load(path)?;
    let session = config.build_session()?;
    let snapshot = config.snapshot(&session);

    let written = zone_map_report::write_report(&snapshot, out)?;
    println!("Report written to {}", written.display());

    Ok(())
}
