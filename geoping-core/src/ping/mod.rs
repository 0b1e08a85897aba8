//! Ping batch processing.
//!
//! Takes anonymized location pings carrying a `geohash8` column and:
//! - Decodes each row into a cell center with error bounds
//! - Applies a per-row failure policy (skip or abort) to rows that fail to
//!   parse or decode
//! - Optionally decodes rows in parallel, preserving input order
//! - Filters decoded pings to a city extent
//!
//! # Example Usage
//!
//! ```
//! use geoping_core::ping::{decode_batch, filter_by_city, read_records};
//! use geoping_core::{BatchSettings, City};
//!
//! let input = r#"
//! {"geohash8":"9q5cfj59","id":"a"}
//! {"geohash8":"dr5regw3","id":"b"}
//! {"geohash8":"9q5!","id":"c"}
//! "#;
//!
//! let records = read_records(input.as_bytes()).unwrap();
//! let report = decode_batch(&records, &BatchSettings::default()).unwrap();
//! assert_eq!(report.decoded.len(), 2);
//! assert_eq!(report.skipped.len(), 1);
//!
//! let la = City::find("Los Angeles").unwrap();
//! let in_la = filter_by_city(&report.decoded, &la);
//! assert_eq!(in_la.len(), 1);
//! ```

mod batch;
mod city;
mod error;
mod types;

pub use batch::{decode_batch, decode_rows, read_records, read_rows};
pub use city::{filter_by_city, City};
pub use error::{BatchError, BatchResult, RowError};
pub use types::{BatchReport, DecodedPing, ParsedRow, PingRecord, SkippedRow};
