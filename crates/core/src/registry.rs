// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! In-memory model registry.
//!
//! Records are kept in insertion order and never removed. Ids are
//! sequential from 1 and names follow the spreadsheet column sequence
//! (`Model A` .. `Model Z`, `Model AA`, ...).

use crate::model::{
    BenchmarkResult, HardwareGoal, InferenceEngine, ModelDraft, ModelId, ModelRecord,
    OptimizationTarget, PerformanceSeries,
};
use metrics::counter;
use tracing::{debug, info};

/// Spreadsheet-style letters for a zero-based index: 0 → A, 25 → Z, 26 → AA.
pub fn model_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Ordered collection of model records.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: Vec<ModelRecord>,
}

impl ModelRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry the dashboard starts with: Models A, B and C.
    pub fn seeded() -> Self {
        let mut registry = Self::new();
        for draft in seed_drafts() {
            registry.insert(draft);
        }
        registry
    }

    fn insert(&mut self, draft: ModelDraft) -> ModelId {
        let id = ModelId(self.models.len() as u32 + 1);
        let name = format!("Model {}", model_letters(self.models.len()));
        self.models.push(ModelRecord::from_draft(id, name, draft));
        id
    }

    /// Append a new record and return its id.
    pub fn add(&mut self, draft: ModelDraft) -> ModelId {
        let id = self.insert(draft);
        if let Some(record) = self.get(id) {
            info!(
                model_id = %id,
                name = %record.name,
                hardware = %record.hardware,
                engine = %record.inference_engine,
                "Model added"
            );
        }
        counter!("mako_models_added_total").increment(1);
        id
    }

    /// Rename a record. The name is trimmed; an empty result is ignored.
    ///
    /// Returns whether the record changed.
    pub fn rename(&mut self, id: ModelId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(record) => {
                debug!(model_id = %id, from = %record.name, to = name, "Model renamed");
                record.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Append a benchmark result. Unknown ids are ignored.
    ///
    /// Returns whether a record received the result.
    pub fn append_benchmark(&mut self, id: ModelId, result: BenchmarkResult) -> bool {
        match self.get_mut(id) {
            Some(record) => {
                record.benchmarks.push(result);
                info!(
                    model_id = %id,
                    benchmarks = record.benchmarks.len(),
                    "Benchmark appended"
                );
                counter!("mako_benchmarks_completed_total").increment(1);
                true
            }
            None => false,
        }
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[ModelRecord] {
        &self.models
    }

    /// Look a record up.
    pub fn get(&self, id: ModelId) -> Option<&ModelRecord> {
        self.models.iter().find(|m| m.id == id)
    }

    fn get_mut(&mut self, id: ModelId) -> Option<&mut ModelRecord> {
        self.models.iter_mut().find(|m| m.id == id)
    }

    /// Whether a record exists.
    pub fn contains(&self, id: ModelId) -> bool {
        self.get(id).is_some()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

fn seed_draft(
    throughput: u32,
    latency: u32,
    hardware: &str,
    improvement: &str,
    target: OptimizationTarget,
    engine: InferenceEngine,
    series: [u32; 6],
) -> ModelDraft {
    ModelDraft {
        model_link: None,
        throughput: format!("{} queries/sec", throughput),
        latency: format!("{} ms", latency),
        hardware: hardware.to_string(),
        improvement: improvement.to_string(),
        inference_engine: engine,
        optimization_target: target,
        optimization_dataset: None,
        hardware_goal: HardwareGoal::Performance,
        performance: PerformanceSeries(series),
    }
}

fn seed_drafts() -> [ModelDraft; 3] {
    [
        seed_draft(
            95,
            45,
            "NVIDIA A100 × 2",
            "+46.2%",
            OptimizationTarget::Throughput,
            InferenceEngine::Vllm,
            [65, 75, 81, 87, 91, 95],
        ),
        seed_draft(
            120,
            32,
            "NVIDIA A100 × 4",
            "+58.3%",
            OptimizationTarget::Latency,
            InferenceEngine::TrtLlm,
            [75, 85, 95, 105, 115, 120],
        ),
        seed_draft(
            78,
            52,
            "NVIDIA T4 × 2",
            "+28.7%",
            OptimizationTarget::Throughput,
            InferenceEngine::SgLang,
            [60, 65, 68, 72, 75, 78],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MetricsGenerator;
    use crate::model::GpuType;
    use crate::wizard::NewModelForm;

    fn a100_pair_draft() -> ModelDraft {
        let mut form = NewModelForm::default();
        form.set_model_link("meta-llama/Llama-2-7b-chat-hf");
        form.set_auto_select_hardware(false);
        form.set_gpu_type(GpuType::A100);
        form.set_gpu_count(2);
        form.to_draft(&mut MetricsGenerator::seeded(7))
    }

    #[test]
    fn test_letters() {
        assert_eq!(model_letters(0), "A");
        assert_eq!(model_letters(25), "Z");
        assert_eq!(model_letters(26), "AA");
        assert_eq!(model_letters(27), "AB");
        assert_eq!(model_letters(701), "ZZ");
        assert_eq!(model_letters(702), "AAA");
    }

    #[test]
    fn test_seeded_models() {
        let registry = ModelRegistry::seeded();
        let names: Vec<_> = registry.list().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Model A", "Model B", "Model C"]);

        let b = registry.get(ModelId(2)).unwrap();
        assert_eq!(b.throughput, "120 queries/sec");
        assert_eq!(b.inference_engine, InferenceEngine::TrtLlm);
        assert_eq!(b.optimization_target, OptimizationTarget::Latency);
        assert!(b.benchmarks.is_empty());
    }

    #[test]
    fn test_add_assigns_next_id_and_letter() {
        let mut registry = ModelRegistry::seeded();
        let id = registry.add(a100_pair_draft());
        assert_eq!(id, ModelId(4));

        let record = registry.get(id).unwrap();
        assert_eq!(record.name, "Model D");
        assert_eq!(record.hardware, "NVIDIA A100 × 2");
        assert!(record.performance.0.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(
            record.model_link.as_deref(),
            Some("meta-llama/Llama-2-7b-chat-hf")
        );
    }

    #[test]
    fn test_names_continue_past_z() {
        let mut registry = ModelRegistry::new();
        for _ in 0..27 {
            registry.add(a100_pair_draft());
        }
        assert_eq!(registry.get(ModelId(26)).unwrap().name, "Model Z");
        assert_eq!(registry.get(ModelId(27)).unwrap().name, "Model AA");
    }

    #[test]
    fn test_rename_blank_is_noop() {
        let mut registry = ModelRegistry::seeded();
        assert!(!registry.rename(ModelId(1), "  "));
        assert_eq!(registry.get(ModelId(1)).unwrap().name, "Model A");
    }

    #[test]
    fn test_rename_changes_only_target() {
        let mut registry = ModelRegistry::seeded();
        assert!(registry.rename(ModelId(2), "  New  "));
        assert_eq!(registry.get(ModelId(2)).unwrap().name, "New");
        assert_eq!(registry.get(ModelId(1)).unwrap().name, "Model A");
        assert_eq!(registry.get(ModelId(3)).unwrap().name, "Model C");
        assert!(!registry.rename(ModelId(99), "Ghost"));
    }

    #[test]
    fn test_append_benchmark_isolated() {
        let mut registry = ModelRegistry::seeded();
        let before = registry.get(ModelId(1)).unwrap().clone();
        let result = MetricsGenerator::seeded(1)
            .generate(&["a100", "t4"], "sharegpt")
            .unwrap();

        assert!(registry.append_benchmark(ModelId(2), result.clone()));
        assert_eq!(registry.get(ModelId(2)).unwrap().benchmarks, vec![result.clone()]);
        assert_eq!(registry.get(ModelId(1)).unwrap(), &before);
        assert!(!registry.append_benchmark(ModelId(42), result));
    }
}
