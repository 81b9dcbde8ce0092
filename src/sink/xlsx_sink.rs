// src/sink/xlsx_sink.rs
// =============================================================================
// Excel output: one worksheet, "URL" and "Email" in bold on the first row,
// then one row per harvested email in the order they were found.
// =============================================================================

use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

use super::{Row, Sink, HEADER};
use crate::error::SinkError;

#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        XlsxSink { path: path.into() }
    }
}

impl Sink for XlsxSink {
    fn destination(&self) -> &Path {
        &self.path
    }

    fn persist(&self, rows: &[Row]) -> Result<(), SinkError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let sheet = workbook.add_worksheet();

        for (col, title) in (0u16..).zip(HEADER) {
            sheet.write_string_with_format(0, col, title, &bold)?;
        }

        // Row 0 is the header
        for (line, row) in (1u32..).zip(rows) {
            sheet.write_string(line, 0, &row.url)?;
            sheet.write_string(line, 1, &row.email)?;
        }

        workbook.save(&self.path)?;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `(1u32..).zip(rows)` instead of enumerate()?
//    - rust_xlsxwriter wants u32 row numbers; zipping with a u32 range
//      avoids casting a usize index on every row
//
// 2. What does `?` do on write_string?
//    - Writing past Excel's row limit returns an XlsxError, which
//      SinkError::Xlsx wraps via #[from]
// -----------------------------------------------------------------------------
