// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! The "Run Benchmark" wizard.
//!
//! Steps: `Select Dataset`, `Configure Hardware`, `Run Benchmark`. The first
//! `next()` on the last step starts a simulated run. Each [`tick`] adds
//! [`PROGRESS_STEP`] percentage points; at 100 the generator is invoked
//! once and the run finishes. The following `next()` emits the result.
//! While a run is in progress the wizard refuses `next()`, `back()` and
//! `close()`.
//!
//! [`tick`]: BenchmarkWizard::tick

use super::{StepForm, StepMachine, Transition};
use crate::catalog::{DatasetOption, HardwareOption};
use crate::generator::MetricsGenerator;
use crate::model::{BenchmarkResult, ModelId};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Percentage points added per tick.
pub const PROGRESS_STEP: u8 = 10;

/// Time between ticks.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// Form data of the benchmark wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchmarkForm {
    dataset: Option<&'static DatasetOption>,
    custom_file: Option<PathBuf>,
    hardware: Vec<&'static HardwareOption>,
}

impl BenchmarkForm {
    /// Selected dataset.
    pub fn dataset(&self) -> Option<&'static DatasetOption> {
        self.dataset
    }

    /// Uploaded file for the custom dataset.
    pub fn custom_file(&self) -> Option<&Path> {
        self.custom_file.as_deref()
    }

    /// Selected hardware, in selection order.
    pub fn hardware(&self) -> &[&'static HardwareOption] {
        &self.hardware
    }

    /// Select a dataset.
    pub fn select_dataset(&mut self, dataset: &'static DatasetOption) {
        self.dataset = Some(dataset);
    }

    /// Attach a file for the custom dataset. The file is not inspected.
    pub fn choose_custom_file(&mut self, path: impl Into<PathBuf>) {
        self.custom_file = Some(path.into());
    }

    /// Add the hardware if absent, remove it if present. Returns whether it
    /// is selected afterwards.
    pub fn toggle_hardware(&mut self, hardware: &'static HardwareOption) -> bool {
        match self.hardware.iter().position(|hw| hw.id == hardware.id) {
            Some(index) => {
                self.hardware.remove(index);
                false
            }
            None => {
                self.hardware.push(hardware);
                true
            }
        }
    }
}

impl StepForm for BenchmarkForm {
    const STEPS: &'static [&'static str] = &["Select Dataset", "Configure Hardware", "Run Benchmark"];

    fn is_step_valid(&self, step: usize) -> bool {
        match step {
            0 => match self.dataset {
                Some(dataset) if dataset.is_custom() => self.custom_file.is_some(),
                Some(_) => true,
                None => false,
            },
            1 => !self.hardware.is_empty(),
            2 => true,
            _ => false,
        }
    }
}

/// Progress of the simulated run.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RunState {
    /// Not started.
    #[default]
    Idle,
    /// Ticking towards 100.
    Running {
        /// Percent complete.
        progress: u8,
    },
    /// Finished; the result waits to be emitted.
    Finished(BenchmarkResult),
}

/// Session of the benchmark dialog, bound to one model.
#[derive(Debug, Clone)]
pub struct BenchmarkWizard {
    model_id: ModelId,
    machine: StepMachine<BenchmarkForm>,
    run: RunState,
    progress_step: u8,
}

impl BenchmarkWizard {
    /// A fresh session for `model_id`.
    pub fn new(model_id: ModelId) -> Self {
        Self {
            model_id,
            machine: StepMachine::new(),
            run: RunState::Idle,
            progress_step: PROGRESS_STEP,
        }
    }

    /// Override the per-tick progress increment (clamped to at least 1).
    pub fn with_progress_step(mut self, step: u8) -> Self {
        self.progress_step = step.max(1);
        self
    }

    /// The model results will be appended to.
    pub fn model_id(&self) -> ModelId {
        self.model_id
    }

    /// The underlying step machine.
    pub fn machine(&self) -> &StepMachine<BenchmarkForm> {
        &self.machine
    }

    /// Current step index.
    pub fn step(&self) -> usize {
        self.machine.step()
    }

    /// Form data.
    pub fn form(&self) -> &BenchmarkForm {
        self.machine.form()
    }

    /// Mutable form data.
    pub fn form_mut(&mut self) -> &mut BenchmarkForm {
        self.machine.form_mut()
    }

    /// Run state.
    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        matches!(self.run, RunState::Running { .. })
    }

    /// Percent complete.
    pub fn progress(&self) -> u8 {
        match self.run {
            RunState::Idle => 0,
            RunState::Running { progress } => progress,
            RunState::Finished(_) => 100,
        }
    }

    /// The finished result, if any.
    pub fn result(&self) -> Option<&BenchmarkResult> {
        match &self.run {
            RunState::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// Whether the primary control is enabled.
    pub fn can_advance(&self) -> bool {
        !self.is_running() && self.machine.can_advance()
    }

    /// Whether the dialog may be dismissed.
    pub fn can_close(&self) -> bool {
        !self.is_running()
    }

    /// Advance; on the last step start the run, or emit a finished result.
    pub fn next(&mut self) -> Transition<BenchmarkResult> {
        if !self.can_advance() {
            return Transition::Blocked;
        }
        if !self.machine.is_last_step() {
            return self.machine.forward();
        }

        match std::mem::take(&mut self.run) {
            RunState::Finished(result) => {
                info!(model_id = %self.model_id, "Benchmark result submitted");
                self.machine.reset();
                Transition::Completed(result)
            }
            _ => {
                info!(
                    model_id = %self.model_id,
                    hardware = self.form().hardware().len(),
                    "Benchmark run started"
                );
                self.run = RunState::Running { progress: 0 };
                Transition::Started
            }
        }
    }

    /// Go back one step. Disabled while running.
    pub fn back(&mut self) -> Transition<BenchmarkResult> {
        if self.is_running() {
            return Transition::Blocked;
        }
        self.machine.back()
    }

    /// One timer tick. Returns the result on the tick that completes the run.
    pub fn tick(&mut self, generator: &mut MetricsGenerator) -> Option<&BenchmarkResult> {
        let RunState::Running { progress } = self.run else {
            return None;
        };
        let progress = progress.saturating_add(self.progress_step).min(100);
        debug!(model_id = %self.model_id, progress, "Benchmark progress");

        if progress < 100 {
            self.run = RunState::Running { progress };
            return None;
        }

        let dataset = self.form().dataset()?;
        let result = generator.benchmark_result(dataset, self.form().hardware());
        info!(
            model_id = %self.model_id,
            dataset = %result.dataset.name,
            samples = result.hardware.len(),
            "Benchmark run finished"
        );
        self.run = RunState::Finished(result);
        self.result()
    }

    /// Dismiss the dialog. Refused while running; otherwise resets.
    pub fn close(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.machine.reset();
        self.run = RunState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn ready() -> BenchmarkWizard {
        let mut wizard = BenchmarkWizard::new(ModelId(1));
        wizard
            .form_mut()
            .select_dataset(catalog::benchmark_dataset("sharegpt").unwrap());
        assert!(wizard.next().completed().is_none());
        wizard
            .form_mut()
            .toggle_hardware(catalog::benchmark_hardware("a100").unwrap());
        wizard
            .form_mut()
            .toggle_hardware(catalog::benchmark_hardware("h100").unwrap());
        let _ = wizard.next();
        assert_eq!(wizard.step(), 2);
        wizard
    }

    #[test]
    fn test_dataset_required() {
        let mut wizard = BenchmarkWizard::new(ModelId(1));
        assert!(wizard.next().is_blocked());
    }

    #[test]
    fn test_custom_dataset_requires_file() {
        let mut wizard = BenchmarkWizard::new(ModelId(1));
        wizard
            .form_mut()
            .select_dataset(catalog::benchmark_dataset("custom").unwrap());
        assert!(!wizard.can_advance());
        wizard.form_mut().choose_custom_file("prompts.jsonl");
        assert_eq!(wizard.next(), Transition::Moved { from: 0, to: 1 });
    }

    #[test]
    fn test_hardware_toggle() {
        let mut form = BenchmarkForm::default();
        let t4 = catalog::benchmark_hardware("t4").unwrap();
        let a10 = catalog::benchmark_hardware("a10").unwrap();
        assert!(form.toggle_hardware(t4));
        assert!(form.toggle_hardware(a10));
        assert!(!form.toggle_hardware(t4));
        assert_eq!(form.hardware(), &[a10]);
        assert!(form.is_step_valid(1));
    }

    #[test]
    fn test_hardware_step_requires_selection() {
        let mut wizard = BenchmarkWizard::new(ModelId(1));
        wizard
            .form_mut()
            .select_dataset(catalog::benchmark_dataset("reasoning").unwrap());
        let _ = wizard.next();
        assert!(wizard.next().is_blocked());
        assert_eq!(wizard.step(), 1);
    }

    #[test]
    fn test_run_completes_after_ten_ticks() {
        let mut wizard = ready();
        let mut generator = MetricsGenerator::seeded(9);
        assert_eq!(wizard.next(), Transition::Started);
        assert!(wizard.is_running());

        for tick in 1..10 {
            assert!(wizard.tick(&mut generator).is_none());
            assert_eq!(wizard.progress(), tick * 10);
        }
        let result = wizard.tick(&mut generator).expect("finished").clone();
        assert_eq!(result.hardware.len(), 2);
        assert_eq!(result.hardware[0].name, "NVIDIA A100");
        assert_eq!(result.dataset.name, "ShareGPT");
        assert!(!wizard.is_running());
        assert!(wizard.tick(&mut generator).is_none());

        assert_eq!(wizard.next(), Transition::Completed(result));
        assert_eq!(wizard.step(), 0);
        assert!(wizard.form().dataset().is_none());
    }

    #[test]
    fn test_controls_disabled_while_running() {
        let mut wizard = ready();
        let _ = wizard.next();
        assert!(wizard.next().is_blocked());
        assert!(wizard.back().is_blocked());
        assert!(!wizard.close());
        assert!(wizard.is_running());
        assert_eq!(wizard.step(), 2);
    }

    #[test]
    fn test_custom_progress_step() {
        let mut wizard = ready().with_progress_step(40);
        let mut generator = MetricsGenerator::seeded(1);
        let _ = wizard.next();
        assert!(wizard.tick(&mut generator).is_none());
        assert!(wizard.tick(&mut generator).is_none());
        assert!(wizard.tick(&mut generator).is_some());
    }

    #[test]
    fn test_close_after_finish_discards_result() {
        let mut wizard = ready();
        let mut generator = MetricsGenerator::seeded(2);
        let _ = wizard.next();
        while wizard.tick(&mut generator).is_none() {}
        assert!(wizard.close());
        assert_eq!(wizard.run_state(), &RunState::Idle);
        assert_eq!(wizard.step(), 0);
    }

    proptest::proptest! {
        #[test]
        fn prop_benchmark_steps_in_bounds(ops in proptest::collection::vec(0u8..6, 0..96)) {
            let mut wizard = BenchmarkWizard::new(ModelId(1));
            let mut generator = MetricsGenerator::seeded(11);
            for op in ops {
                match op {
                    0 => { let _ = wizard.next(); }
                    1 => { let _ = wizard.back(); }
                    2 => {
                        let running = wizard.is_running();
                        proptest::prop_assert_eq!(wizard.close(), !running);
                    }
                    3 => { let _ = wizard.tick(&mut generator); }
                    4 => wizard
                        .form_mut()
                        .select_dataset(catalog::benchmark_dataset("sharegpt").unwrap()),
                    _ => {
                        let _ = wizard
                            .form_mut()
                            .toggle_hardware(catalog::benchmark_hardware("t4").unwrap());
                    }
                }
                proptest::prop_assert!(wizard.step() < wizard.machine().step_count());
                if wizard.is_running() {
                    proptest::prop_assert!(wizard.machine().is_last_step());
                    proptest::prop_assert!(wizard.progress() < 100);
                }
            }
        }
    }
}
