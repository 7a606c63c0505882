// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Model and benchmark record types.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequential model identifier, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub u32);

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serving engine a model is optimized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InferenceEngine {
    /// vLLM.
    #[serde(rename = "vLLM")]
    Vllm,
    /// SGLang.
    #[serde(rename = "SGLang")]
    SgLang,
    /// NVIDIA TensorRT-LLM.
    #[serde(rename = "TRT-LLM")]
    TrtLlm,
    /// Hugging Face Text Generation Inference.
    #[serde(rename = "TGI")]
    Tgi,
}

impl InferenceEngine {
    /// All engines, in catalog order.
    pub const ALL: [InferenceEngine; 4] = [
        InferenceEngine::Vllm,
        InferenceEngine::SgLang,
        InferenceEngine::TrtLlm,
        InferenceEngine::Tgi,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            InferenceEngine::Vllm => "vLLM",
            InferenceEngine::SgLang => "SGLang",
            InferenceEngine::TrtLlm => "TRT-LLM",
            InferenceEngine::Tgi => "TGI",
        }
    }

    /// One-line description shown next to the engine.
    pub fn description(&self) -> &'static str {
        match self {
            InferenceEngine::Vllm => "High throughput serving",
            InferenceEngine::SgLang => "Optimized for structured generation",
            InferenceEngine::TrtLlm => "NVIDIA TensorRT optimized",
            InferenceEngine::Tgi => "Text Generation Inference",
        }
    }
}

impl fmt::Display for InferenceEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InferenceEngine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "vllm" => Ok(Self::Vllm),
            "sglang" => Ok(Self::SgLang),
            "trt-llm" | "trtllm" => Ok(Self::TrtLlm),
            "tgi" => Ok(Self::Tgi),
            _ => Err(Error::unknown_option("inference engine", s)),
        }
    }
}

/// Engine selection on the new-model form; `Auto` is resolved on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineChoice {
    /// Let the dashboard pick.
    #[default]
    Auto,
    /// A specific engine.
    Engine(InferenceEngine),
}

impl EngineChoice {
    /// Display name, "Auto-select" for [`EngineChoice::Auto`].
    pub fn name(&self) -> &'static str {
        match self {
            EngineChoice::Auto => "Auto-select",
            EngineChoice::Engine(engine) => engine.name(),
        }
    }
}

impl FromStr for EngineChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            s.parse().map(Self::Engine)
        }
    }
}

/// Metric an optimization run claims to favor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OptimizationTarget {
    /// Maximize queries per second.
    #[default]
    Throughput,
    /// Minimize response time.
    Latency,
    /// Tuned for one workload dataset.
    Dataset,
}

impl fmt::Display for OptimizationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OptimizationTarget::Throughput => "Throughput",
            OptimizationTarget::Latency => "Latency",
            OptimizationTarget::Dataset => "Dataset",
        })
    }
}

impl FromStr for OptimizationTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "throughput" => Ok(Self::Throughput),
            "latency" => Ok(Self::Latency),
            "dataset" => Ok(Self::Dataset),
            _ => Err(Error::unknown_option("optimization target", s)),
        }
    }
}

/// Whether optimization is general purpose or tied to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMode {
    /// General optimization toward the chosen target.
    #[default]
    General,
    /// Dataset-specific optimization.
    Dataset,
}

/// Hardware selection preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HardwareGoal {
    /// Best possible speed and throughput.
    #[default]
    Performance,
    /// Best performance per dollar.
    CostEfficiency,
}

impl HardwareGoal {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            HardwareGoal::Performance => "Maximize Performance",
            HardwareGoal::CostEfficiency => "Maximize Performance per Dollar",
        }
    }
}

impl FromStr for HardwareGoal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "performance" => Ok(Self::Performance),
            "cost-efficiency" | "costefficiency" => Ok(Self::CostEfficiency),
            _ => Err(Error::unknown_option("hardware goal", s)),
        }
    }
}

/// GPU type on the new-model form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GpuType {
    /// Auto-select optimal hardware.
    #[default]
    #[serde(rename = "auto")]
    Auto,
    /// NVIDIA A100.
    A100,
    /// NVIDIA V100.
    V100,
    /// NVIDIA T4.
    T4,
}

impl GpuType {
    /// Types offered for manual selection.
    pub const MANUAL: [GpuType; 3] = [GpuType::A100, GpuType::V100, GpuType::T4];

    /// Short token used in descriptors ("A100").
    pub fn token(&self) -> &'static str {
        match self {
            GpuType::Auto => "auto",
            GpuType::A100 => "A100",
            GpuType::V100 => "V100",
            GpuType::T4 => "T4",
        }
    }

    /// Selector label.
    pub fn label(&self) -> &'static str {
        match self {
            GpuType::Auto => "Auto-select optimal hardware",
            GpuType::A100 => "NVIDIA A100",
            GpuType::V100 => "NVIDIA V100",
            GpuType::T4 => "NVIDIA T4",
        }
    }
}

impl FromStr for GpuType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "a100" => Ok(Self::A100),
            "v100" => Ok(Self::V100),
            "t4" => Ok(Self::T4),
            _ => Err(Error::unknown_option("GPU type", s)),
        }
    }
}

/// Owned dataset name/description pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    /// Display name.
    pub name: String,
    /// Token shape of the workload.
    pub description: String,
}

/// One hardware measurement inside a benchmark result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareSample {
    /// Catalog id of the hardware.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Queries per second.
    pub throughput: u32,
    /// Milliseconds.
    pub latency: u32,
}

/// Result of one benchmark run, appended to a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Dataset the run used.
    pub dataset: DatasetRef,
    /// Samples in hardware selection order.
    pub hardware: Vec<HardwareSample>,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

/// Month labels for [`PerformanceSeries`].
pub const SERIES_LABELS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

/// Six monthly throughput samples (queries/sec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSeries(pub [u32; 6]);

impl PerformanceSeries {
    /// First sample.
    pub fn first(&self) -> u32 {
        self.0[0]
    }

    /// Last sample.
    pub fn last(&self) -> u32 {
        self.0[5]
    }

    /// `(label, value)` pairs.
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        SERIES_LABELS.iter().copied().zip(self.0.iter().copied())
    }
}

/// Everything a new record needs except its id, name and benchmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDraft {
    /// Hugging Face link or repository name, absent for seeded models.
    pub model_link: Option<String>,
    /// Formatted throughput ("95 queries/sec").
    pub throughput: String,
    /// Formatted latency ("45 ms").
    pub latency: String,
    /// Hardware descriptor ("NVIDIA A100 × 2").
    pub hardware: String,
    /// Formatted improvement ("+46.2%").
    pub improvement: String,
    /// Serving engine.
    pub inference_engine: InferenceEngine,
    /// Optimization target.
    pub optimization_target: OptimizationTarget,
    /// Dataset, present when the target is [`OptimizationTarget::Dataset`].
    pub optimization_dataset: Option<DatasetRef>,
    /// Hardware selection preference.
    pub hardware_goal: HardwareGoal,
    /// Monthly throughput samples.
    pub performance: PerformanceSeries,
}

/// A model as shown in the sidebar and main panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Unique id.
    pub id: ModelId,
    /// Display name, renamed in place.
    pub name: String,
    /// Model link the record was created from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_link: Option<String>,
    /// Formatted throughput.
    pub throughput: String,
    /// Formatted latency.
    pub latency: String,
    /// Hardware descriptor.
    pub hardware: String,
    /// Formatted improvement.
    pub improvement: String,
    /// Serving engine.
    pub inference_engine: InferenceEngine,
    /// Optimization target.
    pub optimization_target: OptimizationTarget,
    /// Dataset for dataset-specific optimization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization_dataset: Option<DatasetRef>,
    /// Hardware selection preference.
    pub hardware_goal: HardwareGoal,
    /// Benchmark history, append-only.
    #[serde(default)]
    pub benchmarks: Vec<BenchmarkResult>,
    /// Monthly throughput samples.
    pub performance: PerformanceSeries,
}

impl ModelRecord {
    pub(crate) fn from_draft(id: ModelId, name: String, draft: ModelDraft) -> Self {
        Self {
            id,
            name,
            model_link: draft.model_link,
            throughput: draft.throughput,
            latency: draft.latency,
            hardware: draft.hardware,
            improvement: draft.improvement,
            inference_engine: draft.inference_engine,
            optimization_target: draft.optimization_target,
            optimization_dataset: draft.optimization_dataset,
            hardware_goal: draft.hardware_goal,
            benchmarks: Vec::new(),
            performance: draft.performance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_parsing_is_case_insensitive() {
        assert_eq!("VLLM".parse::<InferenceEngine>().unwrap(), InferenceEngine::Vllm);
        assert_eq!("trt-llm".parse::<InferenceEngine>().unwrap(), InferenceEngine::TrtLlm);
        assert_eq!("auto".parse::<EngineChoice>().unwrap(), EngineChoice::Auto);
        assert_eq!(
            "tgi".parse::<EngineChoice>().unwrap(),
            EngineChoice::Engine(InferenceEngine::Tgi)
        );
        assert!("onnx".parse::<InferenceEngine>().is_err());
    }

    #[test]
    fn test_engine_serializes_with_display_names() {
        let json = serde_json::to_string(&InferenceEngine::TrtLlm).unwrap();
        assert_eq!(json, "\"TRT-LLM\"");
        let engine: InferenceEngine = serde_json::from_str("\"SGLang\"").unwrap();
        assert_eq!(engine, InferenceEngine::SgLang);
    }

    #[test]
    fn test_gpu_type_defaults_to_auto() {
        assert_eq!(GpuType::default(), GpuType::Auto);
        assert_eq!("a100".parse::<GpuType>().unwrap(), GpuType::A100);
        assert_eq!(serde_json::to_string(&GpuType::Auto).unwrap(), "\"auto\"");
    }

    #[test]
    fn test_series_labels() {
        let series = PerformanceSeries([1, 2, 3, 4, 5, 6]);
        let labeled: Vec<_> = series.labeled().collect();
        assert_eq!(labeled[0], ("Jan", 1));
        assert_eq!(labeled[5], ("Jun", 6));
        assert_eq!(series.first(), 1);
        assert_eq!(series.last(), 6);
    }
}
