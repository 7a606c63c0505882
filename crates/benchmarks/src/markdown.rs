// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown output for reports and model benchmark histories.
//!
//! Report values are stored at full precision; this is where they are
//! rounded: one decimal for throughput and latency, two for throughput per
//! dollar and cost.

use mako_adapters::upstream::cost::TcoSummary;
use mako_core::{ModelRecord, ReportEntry, TcoReport};
use std::fmt::{self, Write};

/// Footnote printed under every report table.
pub const OPTIMIZED_NOTE: &str = "Mako-Optimized models include specialized kernel optimizations, \
quantization, and tensor parallelism for improved performance.";

/// Marker text for an entry's best flags, empty when it has none.
pub fn markers(entry: &ReportEntry) -> String {
    let mut marks = Vec::new();
    if entry.is_best_performance {
        marks.push("**Best Performance**");
    }
    if entry.is_best_value {
        marks.push("**Best Value**");
    }
    marks.join(" ")
}

fn write_report_table(out: &mut String, report: &TcoReport) -> fmt::Result {
    writeln!(out, "| Hardware | Throughput (q/s) | Latency (ms) | Throughput/$ | Cost ($/hr) | |")?;
    writeln!(out, "|----------|-----------------:|-------------:|-------------:|------------:|-|")?;
    for entry in &report.entries {
        writeln!(
            out,
            "| {} | {:.1} | {:.1} | {:.2} | ${:.2} | {} |",
            entry.name,
            entry.throughput,
            entry.latency_ms,
            entry.throughput_per_dollar,
            entry.hourly_cost,
            markers(entry),
        )?;
    }
    Ok(())
}

fn write_tco_section(out: &mut String, summary: &TcoSummary) -> fmt::Result {
    writeln!(out, "## Total Cost of Ownership")?;
    writeln!(out)?;
    writeln!(
        out,
        "Cheapest per million queries: **{}** at ${:.2}",
        summary.cheapest.name, summary.cheapest.cost_per_million_queries
    )?;
    writeln!(
        out,
        "Selected hardware: ${:.2}/hr, ${:.2}/month",
        summary.total_hourly_usd, summary.total_monthly_usd
    )?;
    writeln!(out)?;
    writeln!(out, "| Hardware | Standard ($/M queries) | Optimized ($/M queries) | Saving |")?;
    writeln!(out, "|----------|-----------------------:|------------------------:|-------:|")?;
    for saving in &summary.savings {
        writeln!(
            out,
            "| {} | ${:.2} | ${:.2} | {:.1}% |",
            saving.hardware_name,
            saving.standard_per_million,
            saving.optimized_per_million,
            saving.saving_pct,
        )?;
    }
    Ok(())
}

fn write_report(out: &mut String, report: &TcoReport, summary: Option<&TcoSummary>) -> fmt::Result {
    writeln!(out, "# Benchmark Results for {}", report.model)?;
    writeln!(out)?;
    write_report_table(out, report)?;
    writeln!(out)?;
    writeln!(out, "> {}", OPTIMIZED_NOTE)?;
    writeln!(out)?;
    if let Some(summary) = summary {
        write_tco_section(out, summary)?;
        writeln!(out)?;
    }
    writeln!(out, "---")?;
    writeln!(
        out,
        "Report generated on {}",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn write_model_history(out: &mut String, models: &[ModelRecord]) -> fmt::Result {
    writeln!(out, "# Model Benchmark History")?;
    writeln!(out)?;
    writeln!(out, "Generated: {}", chrono::Utc::now().to_rfc3339())?;

    for model in models {
        writeln!(out)?;
        writeln!(out, "## {}", model.name)?;
        writeln!(out)?;
        writeln!(
            out,
            "{} · {} · {} · {} ({})",
            model.hardware,
            model.throughput,
            model.latency,
            model.inference_engine,
            model.optimization_target
        )?;
        writeln!(out)?;

        if model.benchmarks.is_empty() {
            writeln!(out, "No benchmarks yet.")?;
            continue;
        }
        writeln!(out, "| Date | Dataset | Hardware | Throughput (q/s) | Latency (ms) |")?;
        writeln!(out, "|------|---------|----------|-----------------:|-------------:|")?;
        for result in &model.benchmarks {
            for sample in &result.hardware {
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} |",
                    result.timestamp.format("%Y-%m-%d %H:%M"),
                    result.dataset.name,
                    sample.name,
                    sample.throughput,
                    sample.latency,
                )?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out, "Total models: {}", models.len())
}

/// Markdown for a report, with the TCO section when a summary is given.
pub fn generate_report(report: &TcoReport, summary: Option<&TcoSummary>) -> String {
    let mut output = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut output, report, summary);
    output
}

/// Markdown listing every model and its benchmark results.
pub fn generate_model_history(models: &[ModelRecord]) -> String {
    let mut output = String::new();
    let _ = write_model_history(&mut output, models);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mako_adapters::CostAdapter;
    use mako_core::report::rank_entries;
    use mako_core::{catalog, MetricsGenerator, ModelId, ModelRegistry};

    fn report() -> TcoReport {
        let entry = |id: &str, optimized: bool, latency: f64, throughput: f64| {
            ReportEntry::new(catalog::report_hardware(id).unwrap(), optimized, latency, throughput)
        };
        TcoReport {
            model: "Llama-2-7b-chat-hf".to_string(),
            timestamp: Utc::now(),
            entries: rank_entries(vec![
                entry("t4", false, 250.04, 60.0),
                entry("t4", true, 187.5, 80.0),
                entry("h100", false, 90.0, 190.0),
                entry("h100", true, 67.26, 251.26),
            ]),
        }
    }

    #[test]
    fn test_report_rows_rounded_and_marked() {
        let markdown = generate_report(&report(), None);
        assert!(markdown.starts_with("# Benchmark Results for Llama-2-7b-chat-hf"));
        assert!(markdown.contains(
            "| NVIDIA H100 (Mako-Optimized) | 251.3 | 67.3 | 45.68 | $5.50 | **Best Performance** |"
        ));
        assert!(markdown.contains("| NVIDIA T4 (Mako-Optimized) | 80.0 | 187.5 | 100.00 | $0.80 | **Best Value** |"));
        assert!(markdown.contains("| NVIDIA T4 | 60.0 | 250.0 | 75.00 | $0.80 |  |"));
        assert!(!markdown.contains("Total Cost of Ownership"));
    }

    #[test]
    fn test_report_with_tco_section() {
        let report = report();
        let summary = CostAdapter::new().summarize(&report).unwrap();
        let markdown = generate_report(&report, Some(&summary));
        assert!(markdown.contains("## Total Cost of Ownership"));
        assert!(markdown.contains("Cheapest per million queries: **NVIDIA T4 (Mako-Optimized)**"));
        assert!(markdown.contains("| NVIDIA T4 | $3.70 | $2.78 | 25.0% |"));
    }

    #[test]
    fn test_markers_for_both_flags() {
        let mut entry = report().entries[0].clone();
        entry.is_best_performance = true;
        entry.is_best_value = true;
        assert_eq!(markers(&entry), "**Best Performance** **Best Value**");
    }

    #[test]
    fn test_model_history() {
        let mut registry = ModelRegistry::seeded();
        let result = MetricsGenerator::seeded(3)
            .generate(&["a100"], "sharegpt")
            .unwrap();
        let sample = result.hardware[0].clone();
        registry.append_benchmark(ModelId(1), result);

        let markdown = generate_model_history(registry.list());
        assert!(markdown.contains("## Model A"));
        assert!(markdown.contains("NVIDIA A100 × 2 · 95 queries/sec · 45 ms · vLLM (Throughput)"));
        assert!(markdown.contains(&format!(
            "| ShareGPT | NVIDIA A100 | {} | {} |",
            sample.throughput, sample.latency
        )));
        assert_eq!(markdown.matches("No benchmarks yet.").count(), 2);
        assert!(markdown.ends_with("Total models: 3\n"));
    }
}
