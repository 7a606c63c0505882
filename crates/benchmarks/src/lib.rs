// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Export of Mako benchmark reports.
//!
//! # Quick Start
//!
//! ```no_run
//! use mako_adapters::CostAdapter;
//! use mako_benchmarks::{export_all, io::ExportFormat};
//! use mako_core::{catalog::REPORT_HARDWARE, MetricsGenerator, ModelRegistry};
//!
//! let hardware: Vec<_> = REPORT_HARDWARE.iter().collect();
//! let report = MetricsGenerator::seeded(1).tco_report("org/model", &hardware);
//! let registry = ModelRegistry::seeded();
//!
//! let written = export_all(
//!     "reports/output",
//!     &report,
//!     registry.list(),
//!     ExportFormat::Both,
//!     &CostAdapter::new(),
//! )
//! .unwrap();
//! ```
//!
//! # Modules
//!
//! - [`io`] - Writing and reading export files
//! - [`markdown`] - Markdown rendering of reports and model histories

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod io;
pub mod markdown;

pub use io::ExportFormat;

use mako_adapters::CostAdapter;
use mako_core::{ModelRecord, TcoReport};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Write the report (with its TCO section) and the model histories.
///
/// A report that cannot be priced is still exported, without the TCO
/// section.
///
/// # Errors
///
/// Returns an `io::Error` if writing output files fails.
pub fn export_all(
    dir: impl AsRef<Path>,
    report: &TcoReport,
    models: &[ModelRecord],
    format: ExportFormat,
    cost: &CostAdapter,
) -> std::io::Result<Vec<PathBuf>> {
    let summary = match cost.summarize(report) {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!(error = %e, "Exporting report without TCO section");
            None
        }
    };

    let dir = dir.as_ref();
    let mut written = io::write_report(dir, report, summary.as_ref(), format)?;
    written.push(io::write_model_history(dir, models)?);
    Ok(written)
}
