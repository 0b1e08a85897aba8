//! Subcommand implementations.
//!
//! Each command writes machine-readable output to `out` and logs progress
//! through `log`, so stdout stays clean JSON Lines.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geoping_core::{geohash, BatchSettings, DecodedLocation, Geoping};
use log::info;
use serde::Serialize;

#[derive(Serialize)]
struct DecodeLine<'a> {
    geohash: &'a str,
    #[serde(flatten)]
    location: DecodedLocation,
}

/// Loads settings from `path`, or the defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> Result<BatchSettings> {
    let Some(path) = path else {
        return Ok(BatchSettings::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    BatchSettings::from_json(&json)
        .with_context(|| format!("invalid settings in {}", path.display()))
}

/// Prints one JSON object per geohash. Stops at the first invalid one.
pub fn decode<W: Write>(out: &mut W, geohashes: &[String]) -> Result<()> {
    for hash in geohashes {
        let location =
            geohash::decode(hash).with_context(|| format!("failed to decode {hash:?}"))?;
        serde_json::to_writer(&mut *out, &DecodeLine { geohash: hash, location })?;
        writeln!(out)?;
    }
    Ok(())
}

/// Prints the geohash of a coordinate.
pub fn encode<W: Write>(out: &mut W, core: &Geoping, lat: f64, lng: f64) -> Result<()> {
    let hash = core
        .encode(lat, lng)
        .with_context(|| format!("failed to encode ({lat}, {lng})"))?;
    writeln!(out, "{hash}")?;
    Ok(())
}

/// Decodes records from `input`, optionally filters by city, and writes
/// the augmented rows as JSON Lines. Returns the number of rows written.
pub fn batch<R: Read, W: Write>(
    out: &mut W,
    core: &Geoping,
    input: R,
    city: Option<&str>,
) -> Result<usize> {
    // Resolve the city up front so a typo fails before any work is done.
    let city = city.map(|name| core.city(name)).transpose()?;

    let report = core.decode_reader(input).context("batch decoding failed")?;

    let pings: Vec<_> = match &city {
        Some(city) => geoping_core::ping::filter_by_city(&report.decoded, city),
        None => report.decoded.iter().collect(),
    };

    for ping in &pings {
        writeln!(out, "{}", ping.to_json()?)?;
    }

    if let Some(city) = &city {
        info!(
            "{} of {} decoded pings inside {}",
            pings.len(),
            report.decoded.len(),
            city.name
        );
    }
    if let Some(bbox) = report.bbox() {
        info!(
            "Decoded extent: lat [{}, {}], lng [{}, {}]",
            bbox.min_lat, bbox.max_lat, bbox.min_lng, bbox.max_lng
        );
    }

    Ok(pings.len())
}
