use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use geoping_core::FailurePolicy;

/// CLI arguments for geoping
#[derive(Debug, Parser)]
#[command(
    name = "geoping",
    version,
    about = "Decode geohashed location pings and filter them by city"
)]
pub struct CliArgs {
    /// Path to a JSON settings file (policy, parallel, precision, cities)
    #[arg(short = 's', long = "settings", global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode one or more geohashes to center and error bounds
    Decode {
        /// Geohash strings (lowercase base-32)
        #[arg(required = true)]
        geohashes: Vec<String>,
    },

    /// Encode a coordinate as a geohash
    Encode {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Geohash length (default from settings, 8 otherwise)
        #[arg(short = 'p', long = "precision")]
        precision: Option<usize>,
    },

    /// Decode a file of ping records (JSON Lines or a JSON array)
    Batch {
        /// Input file (default: stdin)
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,

        /// What to do with rows that fail to decode
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,

        /// Only output pings inside this city
        #[arg(short = 'c', long = "city")]
        city: Option<String>,

        /// Decode rows in parallel
        #[arg(long)]
        parallel: bool,
    },
}

/// Command-line spelling of [`FailurePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Log and drop failing rows
    Skip,
    /// Stop at the first failing row
    Abort,
}

impl From<PolicyArg> for FailurePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Skip => Self::Skip,
            PolicyArg::Abort => Self::Abort,
        }
    }
}
