// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Mock metrics generator.
//!
//! Every number the dashboard shows is made up here. Nothing is measured:
//! values come from a per-hardware base plus uniform jitter drawn from an
//! injectable [`StdRng`], so tests can seed the generator and assert exact
//! bounds.
//!
//! Three shapes of output exist:
//!
//! - [`baseline_metrics`]: deterministic metrics for a freshly added model.
//! - [`MetricsGenerator::benchmark_result`]: one throughput/latency sample
//!   per selected hardware for the benchmark dialog.
//! - [`MetricsGenerator::tco_report`]: a baseline and a "Mako-Optimized"
//!   entry per hardware for the report generator. Optimized throughput is
//!   always within `[1.3, 1.4]` of the baseline and optimized latency
//!   within `[0.7, 0.8]`.

use crate::catalog::{self, DatasetOption, HardwareOption, PricedHardware};
use crate::error::Result;
use crate::model::{
    BenchmarkResult, GpuType, HardwareSample, InferenceEngine, PerformanceSeries,
};
use crate::report::{self, ReportEntry, TcoReport};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Multiplier range applied to baseline throughput for optimized entries.
pub const OPTIMIZED_THROUGHPUT_FACTOR: Range<f64> = 1.3..1.4;

/// Multiplier range applied to baseline latency for optimized entries.
pub const OPTIMIZED_LATENCY_FACTOR: Range<f64> = 0.7..0.8;

/// Suffix marking optimized report entries.
pub const OPTIMIZED_SUFFIX: &str = "-optimized";

const MONTHLY_IMPROVEMENT: f64 = 0.05;
const MAX_THROUGHPUT_SCALE: f64 = 2.5;
const PER_GPU_SCALE: f64 = 0.8;

/// Metrics of a newly added model.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineMetrics {
    /// Six monthly throughput samples, compounding 5% per month.
    pub series: PerformanceSeries,
    /// Latency in milliseconds.
    pub latency_ms: u32,
    /// Percent improvement from the first to the last sample.
    pub improvement_pct: u32,
    /// Hardware descriptor.
    pub hardware: String,
}

/// Base `(throughput, latency)` per GPU type; anything else uses T4.
fn gpu_base(gpu: GpuType) -> (f64, f64) {
    match gpu {
        GpuType::A100 => (80.0, 40.0),
        GpuType::V100 => (60.0, 50.0),
        GpuType::T4 | GpuType::Auto => (40.0, 65.0),
    }
}

/// Deterministic metrics for a model running on `count` GPUs of `gpu`.
///
/// Scaling across GPUs has diminishing returns: `min(count * 0.8, 2.5)`.
pub fn baseline_metrics(gpu: GpuType, count: u32) -> BaselineMetrics {
    let count = count.max(1);
    let (base_throughput, base_latency) = gpu_base(gpu);
    let scale = (count as f64 * PER_GPU_SCALE).min(MAX_THROUGHPUT_SCALE);

    let mut samples = [0u32; 6];
    for (month, sample) in samples.iter_mut().enumerate() {
        let improvement = 1.0 + month as f64 * MONTHLY_IMPROVEMENT;
        *sample = (base_throughput * scale * improvement).round() as u32;
    }
    let series = PerformanceSeries(samples);
    let first = series.first() as f64;
    let improvement_pct = ((series.last() as f64 - first) / first * 100.0).round() as u32;

    let hardware = match gpu {
        GpuType::Auto => format!("Auto-selected hardware × {}", count),
        other => format!("NVIDIA {} × {}", other.token(), count),
    };

    BaselineMetrics {
        series,
        latency_ms: (base_latency / scale).round() as u32,
        improvement_pct,
        hardware,
    }
}

/// Base `(latency, throughput)` for report hardware, matched by id.
fn report_base(hardware_id: &str) -> (f64, f64) {
    if hardware_id.contains("a100") {
        (120.0, 140.0)
    } else if hardware_id.contains("h100") {
        (90.0, 190.0)
    } else if hardware_id.contains("v100") {
        (180.0, 100.0)
    } else if hardware_id.contains("l4") {
        (220.0, 80.0)
    } else {
        (250.0, 60.0)
    }
}

/// Source of fabricated performance numbers.
#[derive(Debug, Clone)]
pub struct MetricsGenerator {
    rng: StdRng,
}

impl MetricsGenerator {
    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// A generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Wrap an existing random source.
    pub fn with_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Seeded when `seed` is given, from entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_else(Self::from_entropy)
    }

    /// Pick an engine for an auto-select request.
    pub fn pick_engine(&mut self) -> InferenceEngine {
        InferenceEngine::ALL[self.rng.gen_range(0..InferenceEngine::ALL.len())]
    }

    /// One benchmark sample: throughput in `[50, 150]`, latency in `[20, 100]`.
    pub fn benchmark_sample(&mut self, hardware: &HardwareOption) -> HardwareSample {
        let throughput = (50.0 + self.rng.gen::<f64>() * 100.0).round() as u32;
        let latency = (20.0 + self.rng.gen::<f64>() * 80.0).round() as u32;
        HardwareSample {
            id: hardware.id.to_string(),
            name: hardware.name.to_string(),
            throughput,
            latency,
        }
    }

    /// A benchmark result with one sample per hardware, in the given order.
    pub fn benchmark_result(
        &mut self,
        dataset: &DatasetOption,
        hardware: &[&HardwareOption],
    ) -> BenchmarkResult {
        BenchmarkResult {
            dataset: dataset.to_ref(),
            hardware: hardware.iter().map(|hw| self.benchmark_sample(hw)).collect(),
            timestamp: Utc::now(),
        }
    }

    /// Resolve catalog ids and produce a benchmark result.
    pub fn generate(&mut self, hardware_ids: &[&str], dataset_id: &str) -> Result<BenchmarkResult> {
        let dataset = catalog::benchmark_dataset(dataset_id)?;
        let hardware = hardware_ids
            .iter()
            .map(|id| catalog::benchmark_hardware(id))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.benchmark_result(dataset, &hardware))
    }

    /// Standard and optimized report entries for one hardware.
    pub fn report_pair(&mut self, hardware: &PricedHardware) -> (ReportEntry, ReportEntry) {
        let (base_latency, base_throughput) = report_base(hardware.id);
        let latency = base_latency + self.rng.gen_range(-10.0..10.0);
        let throughput = base_throughput + self.rng.gen_range(-10.0..10.0);

        let throughput_factor = self.rng.gen_range(OPTIMIZED_THROUGHPUT_FACTOR);
        let latency_factor = self.rng.gen_range(OPTIMIZED_LATENCY_FACTOR);

        let standard = ReportEntry::new(hardware, false, latency, throughput);
        let optimized = ReportEntry::new(
            hardware,
            true,
            latency * latency_factor,
            throughput * throughput_factor,
        );
        (standard, optimized)
    }

    /// A ranked report over `hardware` for the model at `model_link`.
    pub fn tco_report(&mut self, model_link: &str, hardware: &[&PricedHardware]) -> TcoReport {
        let mut entries = Vec::with_capacity(hardware.len() * 2);
        for hw in hardware {
            let (standard, optimized) = self.report_pair(hw);
            entries.push(standard);
            entries.push(optimized);
        }

        TcoReport {
            model: report::report_model_name(model_link),
            timestamp: Utc::now(),
            entries: report::rank_entries(entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BENCHMARK_HARDWARE, REPORT_HARDWARE};
    use proptest::prelude::*;

    #[test]
    fn test_baseline_for_two_a100s() {
        let metrics = baseline_metrics(GpuType::A100, 2);
        assert_eq!(metrics.hardware, "NVIDIA A100 × 2");
        assert_eq!(metrics.series.first(), 128);
        assert_eq!(metrics.series.last(), 160);
        assert!(metrics.series.0.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(metrics.latency_ms, 25);
        assert_eq!(metrics.improvement_pct, 25);
    }

    #[test]
    fn test_baseline_scale_is_capped() {
        let four = baseline_metrics(GpuType::V100, 4);
        let eight = baseline_metrics(GpuType::V100, 8);
        assert_eq!(four, BaselineMetrics { hardware: four.hardware.clone(), ..eight.clone() });
        assert_eq!(four.series.first(), 150);
        assert_eq!(eight.hardware, "NVIDIA V100 × 8");
    }

    #[test]
    fn test_auto_uses_t4_baseline() {
        let auto = baseline_metrics(GpuType::Auto, 1);
        let t4 = baseline_metrics(GpuType::T4, 1);
        assert_eq!(auto.series, t4.series);
        assert_eq!(auto.hardware, "Auto-selected hardware × 1");
    }

    #[test]
    fn test_seeded_generators_agree() {
        let hw: Vec<_> = BENCHMARK_HARDWARE.iter().collect();
        let dataset = catalog::dataset("sharegpt").unwrap();
        let a = MetricsGenerator::seeded(42).benchmark_result(dataset, &hw);
        let b = MetricsGenerator::seeded(42).benchmark_result(dataset, &hw);
        assert_eq!(a.hardware, b.hardware);
    }

    #[test]
    fn test_generate_resolves_ids() {
        let mut generator = MetricsGenerator::seeded(1);
        let result = generator.generate(&["h100", "t4"], "custom").unwrap();
        assert_eq!(result.dataset.name, "Upload your own");
        let names: Vec<_> = result.hardware.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["NVIDIA H100", "NVIDIA T4"]);

        assert!(generator.generate(&["mi300"], "sharegpt").is_err());
        assert!(generator.generate(&["t4"], "imagenet").is_err());
    }

    #[test]
    fn test_report_has_pair_per_hardware() {
        let hw: Vec<_> = REPORT_HARDWARE.iter().collect();
        let report = MetricsGenerator::seeded(3).tco_report("meta-llama/Llama-2-7b", &hw);
        assert_eq!(report.model, "Llama-2-7b");
        assert_eq!(report.entries.len(), 14);
        assert_eq!(report.entries.iter().filter(|e| e.is_optimized).count(), 7);
    }

    proptest! {
        #[test]
        fn prop_benchmark_samples_in_range(seed in any::<u64>()) {
            let mut generator = MetricsGenerator::seeded(seed);
            for hw in BENCHMARK_HARDWARE {
                let sample = generator.benchmark_sample(hw);
                prop_assert!((50..=150).contains(&sample.throughput));
                prop_assert!((20..=100).contains(&sample.latency));
            }
        }

        #[test]
        fn prop_optimized_within_factor_bounds(seed in any::<u64>()) {
            let mut generator = MetricsGenerator::seeded(seed);
            for hw in REPORT_HARDWARE {
                let (standard, optimized) = generator.report_pair(hw);
                prop_assert!(optimized.throughput >= standard.throughput * 1.3);
                prop_assert!(optimized.throughput <= standard.throughput * 1.4);
                prop_assert!(optimized.latency_ms >= standard.latency_ms * 0.7);
                prop_assert!(optimized.latency_ms <= standard.latency_ms * 0.8);
            }
        }
    }
}
