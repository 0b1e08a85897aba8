//! Reusable test helpers for batch integration tests.

use std::fs;
use std::path::PathBuf;

use geoping_core::geohash::encode;
use tempfile::TempDir;

/// Pings around Los Angeles, New York and one malformed row, in that order.
pub const SAMPLE_JSONL: &str = r#"{"geohash8":"9q5cfj59","id":"la-1","timestamp":"2019-06-01T08:00:00Z"}
{"geohash8":"dr5regw3","id":"ny-1","timestamp":"2019-06-01T08:05:00Z"}

{"geohash8":"9q5ctr1a","id":"bad-1"}
{"geohash8":"9q5ctr18","id":"la-2","carrier":"anon"}
"#;

/// Writes `contents` to a file inside a fresh temp directory.
///
/// The returned `TempDir` must be kept alive for the file to exist.
pub fn write_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("should write temp file");
    (dir, path)
}

/// Builds `count` JSON Lines records on a deterministic lattice of valid coordinates.
///
/// Every `bad_every`-th row (if non-zero) carries an invalid geohash.
pub fn lattice_jsonl(count: usize, bad_every: usize) -> String {
    let mut out = String::new();
    for i in 0..count {
        let geohash = if bad_every != 0 && i % bad_every == bad_every - 1 {
            format!("bad{i}")
        } else {
            #[allow(clippy::cast_precision_loss)]
            let (lat, lng) = (
                -80.0 + (i % 160) as f64,
                -170.0 + ((i * 7) % 340) as f64,
            );
            encode(lat, lng, 8).expect("lattice coordinates are valid")
        };
        out.push_str(&format!("{{\"geohash8\":\"{geohash}\",\"row\":{i}}}\n"));
    }
    out
}
