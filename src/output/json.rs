//! JSON output formatting

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::walker::{SizeRecord, WalkReport};

use super::size::format_size;

#[derive(Debug, Serialize)]
struct JsonDirectory<'a> {
    path: &'a Path,
    size_bytes: u64,
    size_human: String,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    root: &'a Path,
    total_bytes: u64,
    directories: Vec<JsonDirectory<'a>>,
    inaccessible: &'a [PathBuf],
}

/// Render the report as pretty-printed JSON. `records` are the (already
/// sorted and limited) directories to include.
pub fn to_json(report: &WalkReport, records: &[SizeRecord], decimals: usize) -> serde_json::Result<String> {
    let json = JsonReport {
        root: &report.root,
        total_bytes: report.total.bytes(),
        directories: records
            .iter()
            .map(|r| JsonDirectory {
                path: &r.path,
                size_bytes: r.size_bytes,
                size_human: format_size(r.size_bytes, decimals),
            })
            .collect(),
        inaccessible: &report.inaccessible,
    };
    serde_json::to_string_pretty(&json)
}

/// Print the report as pretty-printed JSON to stdout.
pub fn print_json(report: &WalkReport, records: &[SizeRecord], decimals: usize) -> io::Result<()> {
    let json = to_json(report, records, decimals).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::walker::{Measurement, SizeIndex};

    #[test]
    fn test_json_shape() {
        let mut index = SizeIndex::new();
        index.insert(PathBuf::from("/R/D"), 2048).unwrap();
        let report = WalkReport {
            root: PathBuf::from("/R"),
            total: Measurement::Sized(2058),
            index: index.clone(),
            inaccessible: Vec::new(),
            elapsed: Duration::ZERO,
        };

        let json = to_json(&report, &index.into_sorted(), 1).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["root"], "/R");
        assert_eq!(value["total_bytes"], 2058);
        assert_eq!(value["directories"][0]["path"], "/R/D");
        assert_eq!(value["directories"][0]["size_bytes"], 2048);
        assert_eq!(value["directories"][0]["size_human"], "2.0 KB");
        assert_eq!(value["inaccessible"], serde_json::json!([]));
    }
}
