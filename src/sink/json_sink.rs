// src/sink/json_sink.rs
// JSON output: a pretty-printed array of rows. The keys play the part of the
// CSV header.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{Row, Sink};
use crate::error::SinkError;

#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonSink { path: path.into() }
    }
}

impl Sink for JsonSink {
    fn destination(&self) -> &Path {
        &self.path
    }

    fn persist(&self, rows: &[Row]) -> Result<(), SinkError> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, rows)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
