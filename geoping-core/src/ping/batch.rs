//! Batch ingestion and decoding of ping records.
//!
//! Rows are independent, so decoding is a plain map over the input. The
//! failure policy is applied afterwards in input order, which keeps the
//! result identical whether rows were decoded sequentially or in parallel.

use std::io::Read;

use log::{debug, info, warn};
use serde_json::Value;

use super::error::{BatchError, BatchResult, RowError};
use super::types::{BatchReport, DecodedPing, ParsedRow, PingRecord, SkippedRow};
use crate::settings::{BatchSettings, FailurePolicy};

/// Reads ping records from JSON Lines or from a single JSON array.
///
/// Blank lines are ignored. The format is chosen by the first non-whitespace
/// character: `[` means an array, anything else means one object per line.
/// Any malformed row fails the whole read; use [`read_rows`] to keep going.
///
/// # Errors
///
/// - [`BatchError::Io`] if reading fails
/// - [`BatchError::Parse`] for malformed JSON, with the offending line number
pub fn read_records<R: Read>(mut reader: R) -> BatchResult<Vec<PingRecord>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    if is_array(&text) {
        return serde_json::from_str(&text).map_err(|source| BatchError::Parse {
            line: source.line(),
            source,
        });
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            PingRecord::from_json(line).map_err(|source| BatchError::Parse { line: i + 1, source })
        })
        .collect()
}

/// Reads ping rows, keeping malformed rows as [`RowError::Malformed`].
///
/// Same input formats as [`read_records`]. A row that is not valid JSON, lacks
/// `geohash8`, or carries an unparseable `id` or `timestamp` does not stop the
/// read; [`decode_rows`] applies the failure policy to it later.
///
/// # Errors
///
/// - [`BatchError::Io`] if reading fails
/// - [`BatchError::Parse`] if a JSON array input is not valid JSON as a whole
pub fn read_rows<R: Read>(mut reader: R) -> BatchResult<Vec<ParsedRow>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    if is_array(&text) {
        let values: Vec<Value> = serde_json::from_str(&text).map_err(|source| BatchError::Parse {
            line: source.line(),
            source,
        })?;
        return Ok(values
            .into_iter()
            .enumerate()
            .map(|(i, value)| parse_value(value, format!("element {i}")))
            .collect());
    }

    Ok(text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let location = format!("line {}", i + 1);
            match serde_json::from_str::<Value>(line) {
                Ok(value) => parse_value(value, location),
                Err(err) => Err(RowError::Malformed {
                    location,
                    geohash: None,
                    message: err.to_string(),
                }),
            }
        })
        .collect())
}

fn is_array(text: &str) -> bool {
    text.trim_start().starts_with('[')
}

fn parse_value(value: Value, location: String) -> ParsedRow {
    let geohash = value
        .get("geohash8")
        .and_then(Value::as_str)
        .map(str::to_owned);
    serde_json::from_value(value).map_err(|err| RowError::Malformed {
        location,
        geohash,
        message: err.to_string(),
    })
}

/// Decodes every record and applies the configured failure policy.
///
/// # Errors
///
/// Under [`FailurePolicy::Abort`], returns [`BatchError::Row`] for the
/// lowest-indexed row that failed. Under [`FailurePolicy::Skip`] this never
/// fails; failing rows are listed in [`BatchReport::skipped`].
pub fn decode_batch(records: &[PingRecord], settings: &BatchSettings) -> BatchResult<BatchReport> {
    debug!(
        "Decoding {} records (policy={:?}, parallel={})",
        records.len(),
        settings.policy,
        settings.parallel
    );

    let results = map_rows(records, settings.parallel, |record| {
        record.decode().map_err(RowError::from)
    });
    let outcomes = records
        .iter()
        .zip(results)
        .map(|(record, result)| (Some(record.geohash8.as_str()), result));
    apply_policy(outcomes, records.len(), settings)
}

/// Decodes rows from [`read_rows`], applying the failure policy to rows that
/// failed to parse as well as rows that failed to decode.
///
/// # Errors
///
/// Same as [`decode_batch`].
pub fn decode_rows(rows: &[ParsedRow], settings: &BatchSettings) -> BatchResult<BatchReport> {
    debug!(
        "Decoding {} rows (policy={:?}, parallel={})",
        rows.len(),
        settings.policy,
        settings.parallel
    );

    let results = map_rows(rows, settings.parallel, |row| match row {
        Ok(record) => record.decode().map_err(RowError::from),
        Err(err) => Err(err.clone()),
    });
    let outcomes = rows.iter().zip(results).map(|(row, result)| {
        let geohash = match row {
            Ok(record) => Some(record.geohash8.as_str()),
            Err(err) => err.geohash(),
        };
        (geohash, result)
    });
    apply_policy(outcomes, rows.len(), settings)
}

fn apply_policy<'a, I>(outcomes: I, len: usize, settings: &BatchSettings) -> BatchResult<BatchReport>
where
    I: Iterator<Item = (Option<&'a str>, Result<DecodedPing, RowError>)>,
{
    let mut report = BatchReport {
        decoded: Vec::with_capacity(len),
        skipped: Vec::new(),
    };

    for (index, (geohash, result)) in outcomes.enumerate() {
        match result {
            Ok(ping) => report.decoded.push(ping),
            Err(source) => match settings.policy {
                FailurePolicy::Abort => {
                    return Err(BatchError::Row {
                        index,
                        geohash: geohash.map(str::to_owned),
                        source,
                    });
                }
                FailurePolicy::Skip => {
                    warn!("Skipping row {index} ({geohash:?}): {source}");
                    report.skipped.push(SkippedRow {
                        index,
                        geohash: geohash.map(str::to_owned),
                        error: source,
                    });
                }
            },
        }
    }

    info!(
        "Decoded {} of {} records ({} skipped)",
        report.decoded.len(),
        report.total(),
        report.skipped.len()
    );
    Ok(report)
}

#[cfg(feature = "parallel")]
fn map_rows<T, F>(rows: &[T], parallel: bool, f: F) -> Vec<Result<DecodedPing, RowError>>
where
    T: Sync,
    F: Fn(&T) -> Result<DecodedPing, RowError> + Sync + Send,
{
    use rayon::prelude::*;

    if parallel {
        rows.par_iter().map(f).collect()
    } else {
        rows.iter().map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn map_rows<T, F>(rows: &[T], parallel: bool, f: F) -> Vec<Result<DecodedPing, RowError>>
where
    F: Fn(&T) -> Result<DecodedPing, RowError>,
{
    if parallel {
        warn!("Parallel decoding requested but the `parallel` feature is disabled");
    }
    rows.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geohash::GeohashError;

    fn records(hashes: &[&str]) -> Vec<PingRecord> {
        hashes.iter().copied().map(PingRecord::new).collect()
    }

    #[test]
    fn read_json_lines_skips_blank_lines() {
        let input = "{\"geohash8\":\"9q5cfj59\"}\n\n   \n{\"geohash8\":\"dr5regw3\",\"id\":\"b\"}\n";
        let recs = read_records(input.as_bytes()).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].id.as_deref(), Some("b"));
    }

    #[test]
    fn read_json_array() {
        let input = r#"  [{"geohash8":"9q5cfj59"},{"geohash8":"s"}]"#;
        let recs = read_records(input.as_bytes()).unwrap();
        assert_eq!(recs, records(&["9q5cfj59", "s"]));
    }

    #[test]
    fn read_reports_malformed_line_number() {
        let input = "{\"geohash8\":\"9q5cfj59\"}\n\n{\"geohash8\":\n";
        match read_records(input.as_bytes()).unwrap_err() {
            BatchError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_reports_missing_geohash_column() {
        let input = "{\"id\":\"a\"}\n";
        assert!(matches!(
            read_records(input.as_bytes()),
            Err(BatchError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn skip_policy_collects_failures() {
        let recs = records(&["9q5cfj59", "", "9q5a", "s"]);
        let report = decode_batch(&recs, &BatchSettings::default()).unwrap();

        assert_eq!(report.decoded.len(), 2);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].index, 1);
        assert_eq!(report.skipped[0].error, RowError::Geohash(GeohashError::EmptyInput));
        assert_eq!(report.skipped[1].index, 2);
        assert_eq!(report.skipped[1].geohash.as_deref(), Some("9q5a"));
        assert_eq!(report.decoded[1].record.geohash8, "s");
    }

    #[test]
    fn abort_policy_stops_at_first_failure() {
        let recs = records(&["9q5cfj59", "9q5i", ""]);
        let settings = BatchSettings {
            policy: FailurePolicy::Abort,
            ..BatchSettings::default()
        };

        match decode_batch(&recs, &settings).unwrap_err() {
            BatchError::Row {
                index,
                geohash,
                source,
            } => {
                assert_eq!(index, 1);
                assert_eq!(geohash.as_deref(), Some("9q5i"));
                assert!(matches!(
                    source,
                    RowError::Geohash(GeohashError::InvalidCharacter { character: 'i', .. })
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn abort_policy_succeeds_on_clean_input() {
        let recs = records(&["9q5cfj59", "dr5regw3"]);
        let settings = BatchSettings {
            policy: FailurePolicy::Abort,
            ..BatchSettings::default()
        };
        let report = decode_batch(&recs, &settings).unwrap();
        assert_eq!(report.decoded.len(), 2);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn parallel_matches_sequential() {
        let recs = records(&["9q5cfj59", "o", "dr5regw3", "s", "", "u4pruydqqvj"]);
        let sequential = decode_batch(&recs, &BatchSettings::default()).unwrap();
        let parallel = decode_batch(
            &recs,
            &BatchSettings {
                parallel: true,
                ..BatchSettings::default()
            },
        )
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn empty_batch() {
        let report = decode_batch(&[], &BatchSettings::default()).unwrap();
        assert_eq!(report.total(), 0);
    }

    const MIXED_ROWS: &str = "{\"geohash8\":\"9q5cfj59\",\"id\":\"a\"}\n\
        {\"geohash8\":\"dr5regw3\",\"timestamp\":\"yesterday\"}\n\
        \n\
        {\"geohash8\":\"9q5ctr18\",\"id\":7}\n\
        not json\n\
        {\"id\":\"no-hash\"}\n\
        {\"geohash8\":\"s\"}\n";

    #[test]
    fn read_rows_keeps_malformed_rows_in_place() {
        let rows = read_rows(MIXED_ROWS.as_bytes()).unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows[0].is_ok());
        assert!(rows[5].is_ok());

        match &rows[1] {
            Err(RowError::Malformed {
                location, geohash, ..
            }) => {
                assert_eq!(location, "line 2");
                assert_eq!(geohash.as_deref(), Some("dr5regw3"));
            }
            other => panic!("unexpected row: {other:?}"),
        }
        assert_eq!(rows[2].as_ref().unwrap_err().geohash(), Some("9q5ctr18"));
        assert!(matches!(
            &rows[3],
            Err(RowError::Malformed { location, geohash: None, .. }) if location == "line 5"
        ));
        assert!(matches!(&rows[4], Err(RowError::Malformed { geohash: None, .. })));
    }

    #[test]
    fn skip_policy_keeps_rows_around_a_bad_timestamp() {
        let rows = read_rows(MIXED_ROWS.as_bytes()).unwrap();
        let report = decode_rows(&rows, &BatchSettings::default()).unwrap();

        assert_eq!(report.decoded.len(), 2);
        assert_eq!(report.decoded[0].record.id.as_deref(), Some("a"));
        assert_eq!(report.decoded[1].record.geohash8, "s");

        let indices: Vec<usize> = report.skipped.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert_eq!(report.skipped[0].geohash.as_deref(), Some("dr5regw3"));
        assert!(report
            .skipped
            .iter()
            .all(|s| matches!(s.error, RowError::Malformed { .. })));
    }

    #[test]
    fn abort_policy_stops_at_first_malformed_row() {
        let rows = read_rows(MIXED_ROWS.as_bytes()).unwrap();
        let settings = BatchSettings {
            policy: FailurePolicy::Abort,
            ..BatchSettings::default()
        };

        match decode_rows(&rows, &settings).unwrap_err() {
            BatchError::Row { index, geohash, source } => {
                assert_eq!(index, 1);
                assert_eq!(geohash.as_deref(), Some("dr5regw3"));
                assert!(source.to_string().starts_with("Malformed record (line 2)"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_rows_array_reports_element_position() {
        let input = r#"[{"geohash8":"s"},{"geohash8":"9","timestamp":"soon"}]"#;
        let rows = read_rows(input.as_bytes()).unwrap();
        assert!(rows[0].is_ok());
        assert!(matches!(
            &rows[1],
            Err(RowError::Malformed { location, .. }) if location == "element 1"
        ));

        assert!(matches!(
            read_rows("[{\"geohash8\":".as_bytes()),
            Err(BatchError::Parse { .. })
        ));
    }

    #[test]
    fn decode_rows_matches_decode_batch_on_clean_input() {
        let recs = records(&["9q5cfj59", "o", "dr5regw3"]);
        let rows: Vec<ParsedRow> = recs.iter().cloned().map(Ok).collect();
        let settings = BatchSettings {
            parallel: true,
            ..BatchSettings::default()
        };
        assert_eq!(
            decode_rows(&rows, &settings).unwrap(),
            decode_batch(&recs, &settings).unwrap()
        );
    }
}
