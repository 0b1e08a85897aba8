//! geoping Core Library
//!
//! Core functionality for geoping - decoding anonymized location pings.
//! This crate provides the geohash codec plus batch decoding and city
//! filtering of ping records.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod geohash;
pub mod ping;
mod settings;

pub use api::Geoping;
pub use crate::geohash::{decode, encode, DecodedLocation, GeohashError};
pub use crate::ping::{BatchError, BatchReport, City, DecodedPing, PingRecord, RowError};
pub use settings::{BatchSettings, FailurePolicy};
