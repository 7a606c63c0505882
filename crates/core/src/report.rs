// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark report entries and their ranking.
//!
//! A report lists, per selected hardware, a standard entry followed by its
//! "Mako-Optimized" twin. Hardware groups are ordered by the standard
//! entry's throughput, highest first. Exactly one entry carries
//! `is_best_performance` (highest throughput) and exactly one carries
//! `is_best_value` (highest throughput per dollar); on ties the first entry
//! in report order wins.

use crate::catalog::PricedHardware;
use crate::generator::OPTIMIZED_SUFFIX;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name shown when the model link has no final path segment.
pub const UNKNOWN_MODEL: &str = "Unknown Model";

/// One row of a benchmark report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Row id: the hardware id, with `-optimized` for optimized rows.
    pub id: String,
    /// Catalog id of the hardware.
    pub hardware_id: String,
    /// Display name of the hardware.
    pub hardware_name: String,
    /// Row label.
    pub name: String,
    /// USD per GPU hour.
    pub hourly_cost: f64,
    /// Whether this is the Mako-Optimized row.
    pub is_optimized: bool,
    /// Milliseconds.
    pub latency_ms: f64,
    /// Tokens per second.
    pub throughput: f64,
    /// Throughput divided by hourly cost.
    pub throughput_per_dollar: f64,
    /// Highest throughput in the report.
    #[serde(default)]
    pub is_best_performance: bool,
    /// Highest throughput per dollar in the report.
    #[serde(default)]
    pub is_best_value: bool,
}

impl ReportEntry {
    /// Build an unflagged entry.
    pub fn new(hardware: &PricedHardware, is_optimized: bool, latency_ms: f64, throughput: f64) -> Self {
        let (id, name) = if is_optimized {
            (
                format!("{}{}", hardware.id, OPTIMIZED_SUFFIX),
                format!("{} (Mako-Optimized)", hardware.name),
            )
        } else {
            (hardware.id.to_string(), hardware.name.to_string())
        };

        Self {
            id,
            hardware_id: hardware.id.to_string(),
            hardware_name: hardware.name.to_string(),
            name,
            hourly_cost: hardware.hourly_cost,
            is_optimized,
            latency_ms,
            throughput,
            throughput_per_dollar: throughput / hardware.hourly_cost,
            is_best_performance: false,
            is_best_value: false,
        }
    }

    /// What a deployment of this row targets.
    pub fn deploy_target(&self) -> DeployTarget {
        DeployTarget {
            entry_id: self.id.clone(),
            hardware_name: self.hardware_name.clone(),
            optimized: self.is_optimized,
        }
    }
}

/// A generated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcoReport {
    /// Model name derived from the link.
    pub model: String,
    /// Generation time.
    pub timestamp: DateTime<Utc>,
    /// Ranked entries.
    pub entries: Vec<ReportEntry>,
}

impl TcoReport {
    /// The entry flagged best performance.
    pub fn best_performance(&self) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.is_best_performance)
    }

    /// The entry flagged best value.
    pub fn best_value(&self) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.is_best_value)
    }

    /// Look up an entry by row id.
    pub fn entry(&self, id: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// `(standard, optimized)` pairs in report order.
    pub fn pairs(&self) -> impl Iterator<Item = (&ReportEntry, &ReportEntry)> {
        self.entries
            .chunks_exact(2)
            .map(|pair| (&pair[0], &pair[1]))
    }
}

/// Target of a (mock) deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployTarget {
    /// Report row id.
    pub entry_id: String,
    /// Display name of the hardware.
    pub hardware_name: String,
    /// Whether the optimized build is deployed.
    pub optimized: bool,
}

impl DeployTarget {
    /// Completion message for this target.
    pub fn completion_message(&self) -> String {
        let prefix = if self.optimized { "Mako-Optimized " } else { "" };
        format!("Model deployed on {}{}!", prefix, self.hardware_name)
    }
}

/// Last `/`-separated segment of a model link.
pub fn report_model_name(model_link: &str) -> String {
    match model_link.trim().rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_MODEL.to_string(),
    }
}

/// Group, order and flag report entries.
///
/// Entries are grouped by hardware in first-seen order; each group lists
/// its standard entry before its optimized one. Groups are stably sorted by
/// the standard entry's throughput, descending.
pub fn rank_entries(entries: Vec<ReportEntry>) -> Vec<ReportEntry> {
    let mut groups: Vec<Vec<ReportEntry>> = Vec::new();
    for entry in entries {
        match groups
            .iter_mut()
            .find(|group| group[0].hardware_id == entry.hardware_id)
        {
            Some(group) => group.push(entry),
            None => groups.push(vec![entry]),
        }
    }

    for group in &mut groups {
        group.sort_by_key(|entry| entry.is_optimized);
    }

    let standard_throughput = |group: &Vec<ReportEntry>| {
        group
            .iter()
            .find(|entry| !entry.is_optimized)
            .map(|entry| entry.throughput)
            .unwrap_or(f64::NEG_INFINITY)
    };
    groups.sort_by(|a, b| standard_throughput(b).total_cmp(&standard_throughput(a)));

    let mut ranked: Vec<ReportEntry> = groups.into_iter().flatten().collect();
    flag_best(&mut ranked);
    ranked
}

/// Index of the first maximum of `key`.
fn first_max_by(entries: &[ReportEntry], key: impl Fn(&ReportEntry) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, entry) in entries.iter().enumerate() {
        let value = key(entry);
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

/// Clear all flags, then flag the first best-performance and best-value
/// entries.
pub fn flag_best(entries: &mut [ReportEntry]) {
    for entry in entries.iter_mut() {
        entry.is_best_performance = false;
        entry.is_best_value = false;
    }
    if let Some(index) = first_max_by(entries, |e| e.throughput) {
        entries[index].is_best_performance = true;
    }
    if let Some(index) = first_max_by(entries, |e| e.throughput_per_dollar) {
        entries[index].is_best_value = true;
    }
}
