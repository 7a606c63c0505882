// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! GPU cost and TCO adapter.
//!
//! Turns report entries into cost figures: hourly and monthly GPU spend
//! and the cost of serving one million queries at the entry's throughput.
//!
//! # Example
//!
//! ```ignore
//! use mako_adapters::upstream::cost::CostAdapter;
//!
//! let adapter = CostAdapter::new();
//! let summary = adapter.summarize(&report)?;
//! println!("Cheapest: {:?}", summary.cheapest);
//! ```

use chrono::{DateTime, Utc};
use mako_core::{ReportEntry, TcoReport};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Hours in a billing month.
pub const HOURS_PER_MONTH: f64 = 730.0;

const SECONDS_PER_HOUR: f64 = 3600.0;
const QUERIES_PER_UNIT: f64 = 1_000_000.0;

/// Errors that can occur during cost operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CostAdapterError {
    /// Throughput must be positive to price a query
    #[error("Non-positive throughput for entry {0}")]
    NonPositiveThroughput(String),

    /// Report has no entries
    #[error("Report for {0} has no entries")]
    EmptyReport(String),
}

/// Result type for cost operations.
pub type Result<T> = std::result::Result<T, CostAdapterError>;

/// Cost figures for one report entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Report row id
    pub entry_id: String,
    /// Row label
    pub name: String,
    /// USD per GPU hour
    pub hourly_usd: f64,
    /// USD per month
    pub monthly_usd: f64,
    /// USD per million queries
    pub cost_per_million_queries: f64,
}

/// Optimized-vs-standard saving for one hardware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareSaving {
    /// Hardware catalog id
    pub hardware_id: String,
    /// Hardware display name
    pub hardware_name: String,
    /// Standard cost per million queries
    pub standard_per_million: f64,
    /// Optimized cost per million queries
    pub optimized_per_million: f64,
    /// Percent saved by the optimized build
    pub saving_pct: f64,
}

/// Aggregated cost view of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcoSummary {
    /// Model the report was generated for
    pub model: String,
    /// Entry with the lowest cost per million queries
    pub cheapest: CostBreakdown,
    /// Combined hourly spend, one GPU per selected hardware
    pub total_hourly_usd: f64,
    /// Combined monthly spend
    pub total_monthly_usd: f64,
    /// Per-hardware savings, in report order
    pub savings: Vec<HardwareSaving>,
    /// Breakdown of every entry, in report order
    pub breakdowns: Vec<CostBreakdown>,
    /// Summary time
    pub generated_at: DateTime<Utc>,
}

/// Adapter computing cost figures for report entries.
#[derive(Debug, Clone)]
pub struct CostAdapter {
    hours_per_month: f64,
}

impl Default for CostAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl CostAdapter {
    /// Create a new CostAdapter billing 730 hours a month.
    pub fn new() -> Self {
        Self {
            hours_per_month: HOURS_PER_MONTH,
        }
    }

    /// Create a CostAdapter with a custom billing month.
    pub fn with_hours_per_month(hours: f64) -> Self {
        Self {
            hours_per_month: hours,
        }
    }

    /// Hours in the billing month.
    pub fn hours_per_month(&self) -> f64 {
        self.hours_per_month
    }

    /// Cost of serving one million queries at `throughput` queries/sec.
    pub fn cost_per_million(hourly_usd: f64, throughput: f64) -> f64 {
        hourly_usd / (throughput * SECONDS_PER_HOUR) * QUERIES_PER_UNIT
    }

    /// Cost figures for one entry.
    pub fn breakdown(&self, entry: &ReportEntry) -> Result<CostBreakdown> {
        if entry.throughput <= 0.0 {
            return Err(CostAdapterError::NonPositiveThroughput(entry.id.clone()));
        }
        Ok(CostBreakdown {
            entry_id: entry.id.clone(),
            name: entry.name.clone(),
            hourly_usd: entry.hourly_cost,
            monthly_usd: entry.hourly_cost * self.hours_per_month,
            cost_per_million_queries: Self::cost_per_million(entry.hourly_cost, entry.throughput),
        })
    }

    /// Saving of the optimized entry over the standard one.
    pub fn saving(&self, standard: &ReportEntry, optimized: &ReportEntry) -> Result<HardwareSaving> {
        let standard_cost = self.breakdown(standard)?.cost_per_million_queries;
        let optimized_cost = self.breakdown(optimized)?.cost_per_million_queries;
        Ok(HardwareSaving {
            hardware_id: standard.hardware_id.clone(),
            hardware_name: standard.hardware_name.clone(),
            standard_per_million: standard_cost,
            optimized_per_million: optimized_cost,
            saving_pct: (standard_cost - optimized_cost) / standard_cost * 100.0,
        })
    }

    /// TCO summary of a whole report.
    pub fn summarize(&self, report: &TcoReport) -> Result<TcoSummary> {
        let breakdowns = report
            .entries
            .iter()
            .map(|entry| self.breakdown(entry))
            .collect::<Result<Vec<_>>>()?;

        let cheapest = breakdowns
            .iter()
            .min_by(|a, b| a.cost_per_million_queries.total_cmp(&b.cost_per_million_queries))
            .cloned()
            .ok_or_else(|| CostAdapterError::EmptyReport(report.model.clone()))?;

        let savings = report
            .pairs()
            .map(|(standard, optimized)| self.saving(standard, optimized))
            .collect::<Result<Vec<_>>>()?;

        let total_hourly_usd: f64 = report.pairs().map(|(standard, _)| standard.hourly_cost).sum();

        debug!(
            model = %report.model,
            cheapest = %cheapest.entry_id,
            total_hourly_usd,
            "TCO summary computed"
        );

        Ok(TcoSummary {
            model: report.model.clone(),
            cheapest,
            total_hourly_usd,
            total_monthly_usd: total_hourly_usd * self.hours_per_month,
            savings,
            breakdowns,
            generated_at: Utc::now(),
        })
    }
}
