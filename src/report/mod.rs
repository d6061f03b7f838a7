//! Rendering of per-file link reports as text blocks or a JSON document.

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::message::FileReport;

/// Line printed when the scanned directory holds no message files.
pub fn no_files_message(extension: &str) -> String {
    format!("No .{extension} files found in the current directory.")
}

/// Write one report as a blank line, the subject, and a 1-indexed link list.
pub fn write_text_block(out: &mut impl Write, report: &FileReport) -> Result<()> {
    writeln!(out).map_err(Error::Output)?;
    writeln!(out, "Email Subject: {}", report.subject).map_err(Error::Output)?;
    for (idx, url) in report.urls.iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, url).map_err(Error::Output)?;
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    file_count: usize,
    files: &'a [FileReport],
}

/// Write all reports as a single pretty-printed JSON document.
pub fn write_json(out: &mut impl Write, reports: &[FileReport]) -> Result<()> {
    let doc = JsonReport {
        file_count: reports.len(),
        files: reports,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out).map_err(Error::Output)
}
