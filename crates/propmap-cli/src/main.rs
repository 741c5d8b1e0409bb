//! propmap — Command-line interface for propmap-core
//!
//! Usage examples
//! --------------
//!
//! - Look at what the analytics job wrote
//!   $ propmap inspect
//!   $ propmap inspect www/output/aggregated_data.json
//!
//! - Convert a payload to GeoJSON
//!   $ propmap features --pretty
//!   $ propmap features -i data.json --present-only
//!
//! - Coordinate coverage and bounds
//!   $ propmap stats
//!
//! - Verify the map token before serving the viewer
//!   $ propmap check-config
//!
//! `inspect` never fails: unreadable or invalid files are reported as
//! `Error: ...` and the exit code stays 0.
mod args;

use crate::args::{CliArgs, Commands};
use clap::Parser;
use propmap_core::config::{SETUP_HEADLINE, SETUP_STEPS};
use propmap_core::inspect::PayloadReport;
use propmap_core::loader::{default_payload_path, load_records, read_payload_text};
use propmap_core::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve(path: Option<String>) -> PathBuf {
    path.map(PathBuf::from).unwrap_or_else(default_payload_path)
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Inspect { path } => {
            let path = resolve(path);
            match read_payload_text(&path) {
                Ok(text) => print!("{}", PayloadReport::from_text(&text)),
                Err(e) => eprintln!("Error: {e}"),
            }
        }

        Commands::Features {
            input,
            pretty,
            present_only,
        } => {
            let path = resolve(input);
            let records = load_records(&path)?;
            log::info!("loaded {} records from {}", records.len(), path.display());
            let policy = if present_only {
                DefaultPolicy::PresentOnly
            } else {
                DefaultPolicy::Falsy
            };
            let features = project_with(&records, policy);
            let out = if pretty {
                serde_json::to_string_pretty(&features)?
            } else {
                serde_json::to_string(&features)?
            };
            println!("{out}");
        }

        Commands::Stats { input } => {
            let path = resolve(input);
            let text = read_payload_text(&path)?;
            let shape = PayloadShape::parse(&text)?;
            let kind = shape.kind();
            let records = propmap_core::normalize::normalize_shape(shape);
            let stats = project(&records).stats();

            println!("Payload statistics ({}):", path.display());
            println!("  Layout: {kind}");
            println!("  Records: {}", records.len());
            println!("  Placeable: {}", stats.placeable);
            println!("  Missing/invalid coordinates: {}", stats.unplaceable);
            match stats.bounds {
                Some(b) => {
                    let [lon, lat] = b.center();
                    println!(
                        "  Bounds: [{:.5}, {:.5}] - [{:.5}, {:.5}]",
                        b.min_lon, b.min_lat, b.max_lon, b.max_lat
                    );
                    println!("  Center: [{lon:.5}, {lat:.5}]");
                }
                None => println!("  Bounds: none"),
            }
        }

        Commands::CheckConfig { token } => match AccessToken::from_config(token.as_deref()) {
            Ok(token) => println!("Map token configured ({})", token.redacted()),
            Err(e) => {
                eprintln!("{SETUP_HEADLINE}");
                for (i, step) in SETUP_STEPS.iter().enumerate() {
                    eprintln!("  {}. {step}", i + 1);
                }
                return Err(e.into());
            }
        },
    }

    Ok(())
}
