use clap::{Parser, Subcommand};
use propmap_core::config::ACCESS_TOKEN_ENV;

/// CLI arguments for propmap-cli
#[derive(Debug, Parser)]
#[command(
    name = "propmap",
    version,
    about = "Inspect and convert the property payloads rendered by the propmap viewer"
)]
pub struct CliArgs {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print size, a text preview, the JSON layout and the first record of a payload
    Inspect {
        /// Payload file (default: output/aggregated_data.json)
        path: Option<String>,
    },

    /// Normalize a payload and print it as a GeoJSON FeatureCollection
    Features {
        /// Payload file (default: output/aggregated_data.json)
        #[arg(short = 'i', long = "input")]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Only default missing/null fields; keep 0 and "" as real values
        #[arg(long = "present-only")]
        present_only: bool,
    },

    /// Show record and coordinate statistics for a payload
    Stats {
        /// Payload file (default: output/aggregated_data.json)
        #[arg(short = 'i', long = "input")]
        input: Option<String>,
    },

    /// Check that the map access token is configured
    CheckConfig {
        /// Access token (falls back to the environment variable)
        #[arg(long, env = ACCESS_TOKEN_ENV, hide_env_values = true)]
        token: Option<String>,
    },
}
