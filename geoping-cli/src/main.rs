//! geoping — Command-line interface for geoping-core
//!
//! Decodes geohashed location pings and filters them by city.
//!
//! Usage examples
//! --------------
//!
//! - Decode geohashes to center and error bounds
//!   $ geoping decode 9q5cfj59 dr5regw3
//!
//! - Encode a coordinate
//!   $ geoping encode --lat 34.0853 --lng -118.3837 --precision 8
//!
//! - Decode a JSON Lines file, skipping bad rows, keeping Los Angeles pings
//!   $ geoping batch --input pings.jsonl --city "Los Angeles"
//!
//! - Abort on the first bad row, decoding in parallel
//!   $ geoping batch --input pings.jsonl --policy abort --parallel
//!
//! Output goes to stdout as JSON Lines; logs go to stderr (`RUST_LOG`
//! controls the level, default `info`).
mod args;
mod commands;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use geoping_core::Geoping;

use crate::args::{CliArgs, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let mut settings = commands::load_settings(args.settings.as_deref())?;
    let mut out = BufWriter::new(io::stdout().lock());

    match args.command {
        Commands::Decode { geohashes } => commands::decode(&mut out, &geohashes)?,

        Commands::Encode {
            lat,
            lng,
            precision,
        } => {
            if let Some(p) = precision {
                settings.precision = p;
            }
            commands::encode(&mut out, &Geoping::with_settings(settings), lat, lng)?;
        }

        Commands::Batch {
            input,
            policy,
            city,
            parallel,
        } => {
            if let Some(policy) = policy {
                settings.policy = policy.into();
            }
            settings.parallel |= parallel;
            let core = Geoping::with_settings(settings);

            match input {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    commands::batch(&mut out, &core, BufReader::new(file), city.as_deref())?;
                }
                None => {
                    commands::batch(&mut out, &core, io::stdin().lock(), city.as_deref())?;
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}
