// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! The "Add New Model" wizard.
//!
//! Steps: `Model & Hardware`, `Advanced Settings`, `Confirmation`. The
//! advanced step is skipped while `show_advanced` is off, in both
//! directions: `next()` goes 0 -> 2 and `back()` goes 2 -> 0.

use super::{StepForm, StepMachine, Transition};
use crate::catalog::DatasetOption;
use crate::generator::MetricsGenerator;
use crate::model::{
    EngineChoice, GpuType, HardwareGoal, ModelDraft, OptimizationMode, OptimizationTarget,
};
use serde::Serialize;

/// Form data of the new-model wizard.
///
/// Fields are private so that dependent fields are always updated
/// together; use the setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewModelForm {
    model_link: String,
    gpu_type: Option<GpuType>,
    gpu_count: u32,
    auto_select_hardware: bool,
    hardware_goal: HardwareGoal,
    optimization_target: OptimizationTarget,
    optimization_mode: OptimizationMode,
    optimization_dataset: Option<&'static DatasetOption>,
    inference_engine: EngineChoice,
    show_advanced: bool,
}

impl Default for NewModelForm {
    fn default() -> Self {
        Self {
            model_link: String::new(),
            gpu_type: Some(GpuType::Auto),
            gpu_count: 1,
            auto_select_hardware: true,
            hardware_goal: HardwareGoal::Performance,
            optimization_target: OptimizationTarget::Throughput,
            optimization_mode: OptimizationMode::General,
            optimization_dataset: None,
            inference_engine: EngineChoice::Auto,
            show_advanced: false,
        }
    }
}

impl NewModelForm {
    /// Model link as typed.
    pub fn model_link(&self) -> &str {
        &self.model_link
    }

    /// Selected GPU type; `None` while manual selection has no choice yet.
    pub fn gpu_type(&self) -> Option<GpuType> {
        self.gpu_type
    }

    /// Selected GPU count.
    pub fn gpu_count(&self) -> u32 {
        self.gpu_count
    }

    /// Whether hardware is picked automatically.
    pub fn auto_select_hardware(&self) -> bool {
        self.auto_select_hardware
    }

    /// Hardware selection preference.
    pub fn hardware_goal(&self) -> HardwareGoal {
        self.hardware_goal
    }

    /// General optimization target.
    pub fn optimization_target(&self) -> OptimizationTarget {
        self.optimization_target
    }

    /// General or dataset-specific optimization.
    pub fn optimization_mode(&self) -> OptimizationMode {
        self.optimization_mode
    }

    /// Dataset for dataset-specific optimization.
    pub fn optimization_dataset(&self) -> Option<&'static DatasetOption> {
        self.optimization_dataset
    }

    /// Engine choice.
    pub fn inference_engine(&self) -> EngineChoice {
        self.inference_engine
    }

    /// Whether the advanced settings step is shown.
    pub fn show_advanced(&self) -> bool {
        self.show_advanced
    }

    /// Set the model link.
    pub fn set_model_link(&mut self, link: impl Into<String>) {
        self.model_link = link.into();
    }

    /// Switching auto-select on forces the `auto` GPU type; switching it
    /// off clears `auto` but keeps a concrete type.
    pub fn set_auto_select_hardware(&mut self, auto_select: bool) {
        self.auto_select_hardware = auto_select;
        self.gpu_type = if auto_select {
            Some(GpuType::Auto)
        } else {
            self.gpu_type.filter(|gpu| *gpu != GpuType::Auto)
        };
    }

    /// Pick a GPU type for manual selection.
    pub fn set_gpu_type(&mut self, gpu: GpuType) {
        self.gpu_type = Some(gpu);
    }

    /// Pick the GPU count.
    pub fn set_gpu_count(&mut self, count: u32) {
        self.gpu_count = count;
    }

    /// Set the hardware selection preference.
    pub fn set_hardware_goal(&mut self, goal: HardwareGoal) {
        self.hardware_goal = goal;
    }

    /// Set the general target. [`OptimizationTarget::Dataset`] is not a
    /// general target; it switches the mode to dataset-specific instead.
    pub fn set_optimization_target(&mut self, target: OptimizationTarget) {
        match target {
            OptimizationTarget::Dataset => self.set_optimization_mode(OptimizationMode::Dataset),
            other => self.optimization_target = other,
        }
    }

    /// Switching to general mode clears the chosen dataset.
    pub fn set_optimization_mode(&mut self, mode: OptimizationMode) {
        self.optimization_mode = mode;
        if mode == OptimizationMode::General {
            self.optimization_dataset = None;
        }
    }

    /// Choose the dataset for dataset-specific optimization.
    pub fn set_optimization_dataset(&mut self, dataset: &'static DatasetOption) {
        self.optimization_dataset = Some(dataset);
    }

    /// Choose the inference engine.
    pub fn set_inference_engine(&mut self, engine: EngineChoice) {
        self.inference_engine = engine;
    }

    /// Show or hide the advanced settings step.
    pub fn set_show_advanced(&mut self, show: bool) {
        self.show_advanced = show;
    }

    fn hardware_selected(&self) -> bool {
        self.auto_select_hardware || (self.gpu_type.is_some() && self.gpu_count > 0)
    }

    /// Lines of the confirmation step.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![("Model Link", self.model_link.clone())];
        match self.gpu_type {
            Some(gpu) if !self.auto_select_hardware => {
                lines.push(("GPU Configuration", format!("{} × {}", gpu.token(), self.gpu_count)))
            }
            _ => lines.push(("Hardware", "Auto-select optimal hardware".to_string())),
        }
        lines.push(("Optimization Target", self.optimization_target.to_string()));
        lines.push(("Inference Engine", self.inference_engine.name().to_string()));
        if self.optimization_mode == OptimizationMode::Dataset {
            lines.push((
                "Dataset-Specific Optimization",
                self.optimization_dataset
                    .map(|d| d.name.to_string())
                    .unwrap_or_default(),
            ));
        }
        lines
    }

    /// Build the record draft for this form.
    ///
    /// Metrics come from [`crate::generator::baseline_metrics`]; an `Auto`
    /// engine is resolved to a concrete one by `generator`.
    pub fn to_draft(&self, generator: &mut MetricsGenerator) -> ModelDraft {
        let gpu = self.gpu_type.unwrap_or_default();
        let baseline = crate::generator::baseline_metrics(gpu, self.gpu_count);
        let inference_engine = match self.inference_engine {
            EngineChoice::Engine(engine) => engine,
            EngineChoice::Auto => generator.pick_engine(),
        };
        let (optimization_target, optimization_dataset) = match self.optimization_mode {
            OptimizationMode::General => (self.optimization_target, None),
            OptimizationMode::Dataset => (
                OptimizationTarget::Dataset,
                self.optimization_dataset.map(DatasetOption::to_ref),
            ),
        };

        ModelDraft {
            model_link: Some(self.model_link.trim().to_string()),
            throughput: format!("{} queries/sec", baseline.series.last()),
            latency: format!("{} ms", baseline.latency_ms),
            hardware: baseline.hardware,
            improvement: format!("+{}%", baseline.improvement_pct),
            inference_engine,
            optimization_target,
            optimization_dataset,
            hardware_goal: self.hardware_goal,
            performance: baseline.series,
        }
    }
}

impl StepForm for NewModelForm {
    const STEPS: &'static [&'static str] = &["Model & Hardware", "Advanced Settings", "Confirmation"];

    fn is_step_valid(&self, step: usize) -> bool {
        match step {
            0 => !self.model_link.trim().is_empty() && self.hardware_selected(),
            1 => {
                self.optimization_mode == OptimizationMode::General
                    || self.optimization_dataset.is_some()
            }
            2 => true,
            _ => false,
        }
    }

    fn is_step_skipped(&self, step: usize) -> bool {
        step == 1 && !self.show_advanced
    }
}

/// Session of the new-model dialog.
#[derive(Debug, Clone, Default)]
pub struct NewModelWizard {
    machine: StepMachine<NewModelForm>,
}

impl NewModelWizard {
    /// A fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying step machine.
    pub fn machine(&self) -> &StepMachine<NewModelForm> {
        &self.machine
    }

    /// Current step index.
    pub fn step(&self) -> usize {
        self.machine.step()
    }

    /// Form data.
    pub fn form(&self) -> &NewModelForm {
        self.machine.form()
    }

    /// Mutable form data.
    pub fn form_mut(&mut self) -> &mut NewModelForm {
        self.machine.form_mut()
    }

    /// Whether the "Next"/"Add Model" control is enabled.
    pub fn can_advance(&self) -> bool {
        self.machine.can_advance()
    }

    /// Advance, or submit on the confirmation step.
    ///
    /// Submitting returns the form and resets the session.
    pub fn next(&mut self) -> Transition<NewModelForm> {
        if !self.machine.is_last_step() {
            return self.machine.forward();
        }
        if !self.machine.can_advance() {
            return Transition::Blocked;
        }
        let submitted = self.machine.form().clone();
        self.machine.reset();
        Transition::Completed(submitted)
    }

    /// Go back one (non-skipped) step.
    pub fn back(&mut self) -> Transition<NewModelForm> {
        self.machine.back()
    }

    /// Cancel: reset every field and return to step 0.
    pub fn close(&mut self) {
        self.machine.reset();
    }
}
