// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Report export to the filesystem.
//!
//! ```text
//! <output>/
//!   ├─ report.json   pretty JSON of the report
//!   ├─ report.md     markdown table + TCO section
//!   └─ models.md     model benchmark histories
//! ```

use crate::markdown;
use mako_adapters::upstream::cost::TcoSummary;
use mako_core::{ModelRecord, TcoReport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default output directory path.
pub const OUTPUT_DIR: &str = "reports/output";

/// Report JSON file name.
pub const REPORT_JSON: &str = "report.json";

/// Report markdown file name.
pub const REPORT_MARKDOWN: &str = "report.md";

/// Model history file name.
pub const MODELS_MARKDOWN: &str = "models.md";

/// Which report files to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `report.json` only
    Json,
    /// `report.md` only
    Markdown,
    /// Both files
    #[default]
    Both,
}

impl ExportFormat {
    fn json(self) -> bool {
        matches!(self, ExportFormat::Json | ExportFormat::Both)
    }

    fn markdown(self) -> bool {
        matches!(self, ExportFormat::Markdown | ExportFormat::Both)
    }
}

/// Ensure the output directory exists.
pub fn ensure_output_dir(dir: impl AsRef<Path>) -> io::Result<()> {
    fs::create_dir_all(dir)
}

/// Write a report as pretty JSON.
pub fn write_report_json(report: &TcoReport, path: impl AsRef<Path>) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(path, json)
}

/// Read a report written by [`write_report_json`].
pub fn read_report_json(path: impl AsRef<Path>) -> io::Result<TcoReport> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write the report files selected by `format` into `dir`.
///
/// Returns the paths written.
pub fn write_report(
    dir: impl AsRef<Path>,
    report: &TcoReport,
    summary: Option<&TcoSummary>,
    format: ExportFormat,
) -> io::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    ensure_output_dir(dir)?;

    let mut written = Vec::new();
    if format.json() {
        let path = dir.join(REPORT_JSON);
        write_report_json(report, &path)?;
        written.push(path);
    }
    if format.markdown() {
        let path = dir.join(REPORT_MARKDOWN);
        fs::write(&path, markdown::generate_report(report, summary))?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "Report exported");
    Ok(written)
}

/// Write the model benchmark history into `dir`.
pub fn write_model_history(dir: impl AsRef<Path>, models: &[ModelRecord]) -> io::Result<PathBuf> {
    let dir = dir.as_ref();
    ensure_output_dir(dir)?;
    let path = dir.join(MODELS_MARKDOWN);
    fs::write(&path, markdown::generate_model_history(models))?;
    Ok(path)
}
