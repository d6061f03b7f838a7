//! The scan pipeline: discover message files, extract their links, report.
//!
//! Files are processed one at a time, in directory listing order. The first
//! error aborts the run; reports already written stay written.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::links::{safelinks, scanner};
use crate::model::message::{FileReport, Message};
use crate::parser::eml;
use crate::report;

/// Options controlling a directory scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// File extension (without the dot) of message files.
    pub extension: String,
    /// Emit one JSON document instead of text blocks.
    pub json: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: "eml".to_string(),
            json: false,
        }
    }
}

/// Totals for a finished scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Message files found and processed.
    pub files_scanned: usize,
    /// Files that yielded at least one link.
    pub files_reported: usize,
    /// Links printed across all files.
    pub links: usize,
}

/// List the regular files in `dir` whose name ends with `.<extension>`.
///
/// The order is whatever the filesystem returns.
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{extension}");
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name();
        let matches = name.to_str().is_some_and(|n| n.ends_with(&suffix));
        if !matches {
            continue;
        }
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }
        files.push(entry.path());
    }

    debug!(dir = %dir.display(), count = files.len(), "Discovered message files");
    Ok(files)
}

/// Scan the message body for URLs and resolve Safe Links wrappers.
pub fn extract_links(message: &Message) -> Vec<String> {
    let Some(body) = message.body.as_deref() else {
        return Vec::new();
    };
    scanner::find_urls(body)
        .into_iter()
        .filter_map(safelinks::resolve)
        .collect()
}

/// Load one message file and extract its links.
pub fn process_file(path: &Path) -> Result<FileReport> {
    let message = eml::load_message(path)?;
    let urls = extract_links(&message);
    debug!(path = %path.display(), links = urls.len(), "Processed message");

    Ok(FileReport {
        path: path.to_path_buf(),
        subject: message.subject,
        urls,
    })
}

/// Scan every message file in `dir` and write the report to `out`.
pub fn run(dir: &Path, options: &ScanOptions, out: &mut impl Write) -> Result<ScanSummary> {
    let files = discover(dir, &options.extension)?;
    let mut summary = ScanSummary::default();

    if files.is_empty() && !options.json {
        writeln!(out, "{}", report::no_files_message(&options.extension))
            .map_err(Error::Output)?;
        return Ok(summary);
    }

    let mut collected = Vec::new();
    for path in &files {
        let file_report = process_file(path)?;
        summary.files_scanned += 1;
        if file_report.urls.is_empty() {
            continue;
        }
        summary.files_reported += 1;
        summary.links += file_report.urls.len();

        if options.json {
            collected.push(file_report);
        } else {
            report::write_text_block(out, &file_report)?;
        }
    }

    if options.json {
        report::write_json(out, &collected)?;
    }

    info!(
        files = summary.files_scanned,
        reported = summary.files_reported,
        links = summary.links,
        "Scan complete"
    );
    Ok(summary)
}
