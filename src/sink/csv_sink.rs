// src/sink/csv_sink.rs
// Spreadsheet output: "URL,Email" then one record per row.

use std::path::{Path, PathBuf};

use super::{Row, Sink, HEADER};
use crate::error::SinkError;

#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvSink { path: path.into() }
    }
}

impl Sink for CsvSink {
    fn destination(&self) -> &Path {
        &self.path
    }

    fn persist(&self, rows: &[Row]) -> Result<(), SinkError> {
        let mut writer = csv::Writer::from_path(&self.path)?;

        writer.write_record(HEADER)?;
        for row in rows {
            writer.write_record([row.url.as_str(), row.email.as_str()])?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_header_then_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emails.csv");
        let rows = vec![
            Row::new("https://example.com/", "a@b.co"),
            Row::new("https://example.com/", "a@b.co"),
            Row::new("https://example.com/team", "lead@example.com"),
        ];

        CsvSink::new(&path).persist(&rows).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let records: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();

        assert_eq!(records.len(), 1 + rows.len());
        assert_eq!(records[0], vec!["URL", "Email"]);
        assert_eq!(records[1], vec!["https://example.com/", "a@b.co"]);
        assert_eq!(records[3], vec!["https://example.com/team", "lead@example.com"]);
    }

    #[test]
    fn test_empty_crawl_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        CsvSink::new(&path).persist(&[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "URL,Email\n");
    }

    #[test]
    fn test_commas_in_url_are_quoted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quoted.csv");

        CsvSink::new(&path)
            .persist(&[Row::new("https://example.com/?a=1,2", "x@y.io")])
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"https://example.com/?a=1,2\",x@y.io"));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("emails.csv");

        assert!(CsvSink::new(path).persist(&[]).is_err());
    }
}
