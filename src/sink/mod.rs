// src/sink/mod.rs
// =============================================================================
// Where the harvested rows end up.
//
// A Sink receives every (URL, email) row once, when the crawl is over, and
// writes one file. Three formats:
// - xlsx: an Excel workbook, "URL" / "Email" in the first row (the default)
// - csv: the same table as plain text
// - json: an array of {"url", "email"} objects
//
// The path is chosen by the caller before the crawl starts (the "Save As"
// step). A known extension on that path decides the format; a bare file
// name gets the preferred format's extension appended.
// =============================================================================

mod csv_sink;
mod json_sink;
mod xlsx_sink;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SinkError;

pub use csv_sink::CsvSink;
pub use json_sink::JsonSink;
pub use xlsx_sink::XlsxSink;

/// Column titles, in order.
pub const HEADER: [&str; 2] = ["URL", "Email"];

/// One harvested email and the page it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub url: String,
    pub email: String,
}

impl Row {
    pub fn new(url: impl Into<String>, email: impl Into<String>) -> Self {
        Row {
            url: url.into(),
            email: email.into(),
        }
    }
}

pub trait Sink {
    /// The file this sink writes
    fn destination(&self) -> &Path;

    /// Writes the header and all rows, in order, replacing any existing file
    fn persist(&self, rows: &[Row]) -> Result<(), SinkError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    // Case-insensitive match on a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        [OutputFormat::Xlsx, OutputFormat::Csv, OutputFormat::Json]
            .into_iter()
            .find(|format| extension.eq_ignore_ascii_case(format.extension()))
    }
}

// Decides the file actually written and its format.
//
//   ("emails", Xlsx)       -> ("emails.xlsx", Xlsx)
//   ("emails.csv", Xlsx)   -> ("emails.csv", Csv)   the extension wins
//   ("emails.txt", Csv)    -> ("emails.txt", Csv)   unknown extension, kept
pub fn resolve_output(path: &Path, preferred: OutputFormat) -> (PathBuf, OutputFormat) {
    match path.extension() {
        None => (path.with_extension(preferred.extension()), preferred),
        Some(extension) => {
            let format = extension
                .to_str()
                .and_then(OutputFormat::from_extension)
                .unwrap_or(preferred);
            (path.to_path_buf(), format)
        }
    }
}

pub fn sink_for(path: &Path, preferred: OutputFormat) -> Box<dyn Sink + Send + Sync> {
    let (path, format) = resolve_output(path, preferred);
    match format {
        OutputFormat::Xlsx => Box::new(XlsxSink::new(path)),
        OutputFormat::Csv => Box::new(CsvSink::new(path)),
        OutputFormat::Json => Box::new(JsonSink::new(path)),
    }
}

// Lets a boxed sink be passed wherever a `&impl Sink` is expected
impl<S: Sink + ?Sized> Sink for Box<S> {
    fn destination(&self) -> &Path {
        (**self).destination()
    }

    fn persist(&self, rows: &[Row]) -> Result<(), SinkError> {
        (**self).persist(rows)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Sink trait?
//    - The crawl loop only needs "write these rows somewhere"
//    - Each format is its own struct; tests use an in-memory one
//
// 2. What is Box<dyn Sink + Send + Sync>?
//    - A trait object: the concrete type is picked at runtime (by extension)
//    - Send + Sync lets it be used inside a spawned tokio task
//
// 3. Why the `impl Sink for Box<S>` block?
//    - scrape() takes `&S where S: Sink`; with this impl a Box<dyn Sink>
//      counts as a Sink too, so no special-casing is needed
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extension_added() {
        assert_eq!(
            resolve_output(Path::new("out/emails"), OutputFormat::Xlsx),
            (PathBuf::from("out/emails.xlsx"), OutputFormat::Xlsx)
        );
        assert_eq!(
            resolve_output(Path::new("emails"), OutputFormat::Json),
            (PathBuf::from("emails.json"), OutputFormat::Json)
        );
    }

    #[test]
    fn test_known_extension_picks_format() {
        assert_eq!(
            resolve_output(Path::new("emails.xlsx"), OutputFormat::Csv),
            (PathBuf::from("emails.xlsx"), OutputFormat::Xlsx)
        );
        assert_eq!(
            resolve_output(Path::new("emails.CSV"), OutputFormat::Xlsx),
            (PathBuf::from("emails.CSV"), OutputFormat::Csv)
        );
    }

    #[test]
    fn test_unknown_extension_kept() {
        assert_eq!(
            resolve_output(Path::new("emails.txt"), OutputFormat::Csv),
            (PathBuf::from("emails.txt"), OutputFormat::Csv)
        );
    }

    #[test]
    fn test_xlsx_path_never_gets_csv_text() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("emails.xlsx");

        let sink = sink_for(&path, OutputFormat::Csv);
        sink.persist(&[Row::new("https://a.example/", "a@b.co")]).unwrap();

        // An xlsx file is a zip archive
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_sink_for_destination() {
        let sink = sink_for(Path::new("x"), OutputFormat::Json);
        assert_eq!(sink.destination(), Path::new("x.json"));
    }
}
