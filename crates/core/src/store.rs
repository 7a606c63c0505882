// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Top-level dashboard state.
//!
//! A [`Dashboard`] owns the registry, the selected model, the metrics
//! generator and the dialog sessions. Shells (the CLI, tests) drive it by
//! reference; there is no global state.

use crate::error::{Error, Result};
use crate::generator::MetricsGenerator;
use crate::model::{BenchmarkResult, ModelId, ModelRecord};
use crate::registry::ModelRegistry;
use crate::report::TcoReport;
use crate::wizard::{BenchmarkWizard, NewModelWizard, ReportWizard, Transition};
use metrics::counter;
use tracing::{debug, warn};

/// Dashboard state.
#[derive(Debug, Clone)]
pub struct Dashboard {
    registry: ModelRegistry,
    selected: Option<ModelId>,
    generator: MetricsGenerator,
    new_model: Option<NewModelWizard>,
    benchmark: Option<BenchmarkWizard>,
    report: ReportWizard,
    progress_step: Option<u8>,
}

impl Dashboard {
    /// A dashboard over the seeded registry with Model A selected.
    pub fn new(generator: MetricsGenerator) -> Self {
        Self::with_registry(ModelRegistry::seeded(), generator)
    }

    /// A dashboard over an existing registry; the first record is selected.
    pub fn with_registry(registry: ModelRegistry, generator: MetricsGenerator) -> Self {
        let selected = registry.list().first().map(|m| m.id);
        Self {
            registry,
            selected,
            generator,
            new_model: None,
            benchmark: None,
            report: ReportWizard::new(),
            progress_step: None,
        }
    }

    /// Override the benchmark progress increment of future sessions.
    pub fn with_progress_step(mut self, step: u8) -> Self {
        self.progress_step = Some(step);
        self
    }

    /// The registry.
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// The random source.
    pub fn generator_mut(&mut self) -> &mut MetricsGenerator {
        &mut self.generator
    }

    /// Select a model. Unknown ids are rejected.
    pub fn select_model(&mut self, id: ModelId) -> Result<&ModelRecord> {
        let record = self.registry.get(id).ok_or(Error::UnknownModel(id))?;
        self.selected = Some(id);
        Ok(record)
    }

    /// The selected model.
    pub fn selected_model(&self) -> Option<&ModelRecord> {
        self.selected.and_then(|id| self.registry.get(id))
    }

    /// Rename a model; see [`ModelRegistry::rename`].
    pub fn rename_model(&mut self, id: ModelId, name: &str) -> bool {
        self.registry.rename(id, name)
    }

    /// Open the new-model dialog, reusing an open session.
    pub fn open_new_model_dialog(&mut self) -> &mut NewModelWizard {
        self.new_model.get_or_insert_with(NewModelWizard::new)
    }

    /// The open new-model session.
    pub fn new_model_dialog(&mut self) -> Option<&mut NewModelWizard> {
        self.new_model.as_mut()
    }

    /// Cancel the new-model dialog, discarding its fields.
    pub fn close_new_model_dialog(&mut self) {
        self.new_model = None;
    }

    /// Advance the new-model dialog. On submit the model is added, the
    /// dialog closes and the new id is returned as the completed value.
    pub fn advance_new_model_dialog(&mut self) -> Transition<ModelId> {
        let Some(wizard) = self.new_model.as_mut() else {
            return Transition::Blocked;
        };
        match wizard.next() {
            Transition::Completed(form) => {
                let draft = form.to_draft(&mut self.generator);
                let id = self.registry.add(draft);
                self.new_model = None;
                Transition::Completed(id)
            }
            Transition::Moved { from, to } => Transition::Moved { from, to },
            Transition::Started => Transition::Started,
            Transition::Blocked => Transition::Blocked,
        }
    }

    /// Open a fresh benchmark dialog bound to `model_id`.
    ///
    /// Fails for unknown models and while a run is in progress. Any idle
    /// session is replaced.
    pub fn open_benchmark_dialog(&mut self, model_id: ModelId) -> Result<&mut BenchmarkWizard> {
        if !self.registry.contains(model_id) {
            return Err(Error::UnknownModel(model_id));
        }
        if self.benchmark.as_ref().is_some_and(BenchmarkWizard::is_running) {
            warn!(model_id = %model_id, "Benchmark dialog is busy");
            return Err(Error::BenchmarkRunning);
        }
        let mut wizard = BenchmarkWizard::new(model_id);
        if let Some(step) = self.progress_step {
            wizard = wizard.with_progress_step(step);
        }
        debug!(model_id = %model_id, "Benchmark dialog opened");
        Ok(self.benchmark.insert(wizard))
    }

    /// The open benchmark session.
    pub fn benchmark_dialog(&mut self) -> Option<&mut BenchmarkWizard> {
        self.benchmark.as_mut()
    }

    /// Close the benchmark dialog. Refused while running.
    pub fn close_benchmark_dialog(&mut self) -> Result<()> {
        match self.benchmark.as_ref() {
            Some(wizard) if wizard.is_running() => Err(Error::BenchmarkRunning),
            _ => {
                self.benchmark = None;
                Ok(())
            }
        }
    }

    /// Advance the benchmark dialog. When the finished result is submitted
    /// it is appended to the bound model and the dialog closes.
    pub fn advance_benchmark_dialog(&mut self) -> Transition<BenchmarkResult> {
        let Some(wizard) = self.benchmark.as_mut() else {
            return Transition::Blocked;
        };
        let model_id = wizard.model_id();
        let transition = wizard.next();
        if let Transition::Completed(result) = &transition {
            self.registry.append_benchmark(model_id, result.clone());
            self.benchmark = None;
        }
        transition
    }

    /// One progress tick of the running benchmark. Returns the percentage.
    pub fn tick_benchmark(&mut self) -> Option<u8> {
        let wizard = self.benchmark.as_mut()?;
        if !wizard.is_running() {
            return None;
        }
        wizard.tick(&mut self.generator);
        Some(wizard.progress())
    }

    /// The report generator panel.
    pub fn report_panel(&mut self) -> &mut ReportWizard {
        &mut self.report
    }

    /// Advance the report generator.
    pub fn advance_report(&mut self) -> Transition<TcoReport> {
        self.report.next()
    }

    /// Complete a pending report generation.
    pub fn finish_report_generation(&mut self) -> Option<&TcoReport> {
        let report = self.report.finish_generation(&mut self.generator)?;
        counter!("mako_reports_generated_total").increment(1);
        Some(report)
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(MetricsGenerator::from_entropy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::GpuType;

    fn dashboard() -> Dashboard {
        Dashboard::new(MetricsGenerator::seeded(21))
    }

    #[test]
    fn test_starts_with_first_model_selected() {
        let dash = dashboard();
        assert_eq!(dash.selected_model().unwrap().name, "Model A");
        assert_eq!(dash.registry().len(), 3);
    }

    #[test]
    fn test_select_unknown_model() {
        let mut dash = dashboard();
        assert_eq!(
            dash.select_model(ModelId(9)).unwrap_err(),
            Error::UnknownModel(ModelId(9))
        );
        assert_eq!(dash.select_model(ModelId(3)).unwrap().name, "Model C");
        assert_eq!(dash.selected_model().unwrap().id, ModelId(3));
    }

    #[test]
    fn test_new_model_flow_adds_record() {
        let mut dash = dashboard();
        let wizard = dash.open_new_model_dialog();
        wizard.form_mut().set_model_link("mistralai/Mistral-7B");
        wizard.form_mut().set_auto_select_hardware(false);
        wizard.form_mut().set_gpu_type(GpuType::A100);
        wizard.form_mut().set_gpu_count(2);

        assert_eq!(dash.advance_new_model_dialog(), Transition::Moved { from: 0, to: 2 });
        assert_eq!(dash.advance_new_model_dialog(), Transition::Completed(ModelId(4)));
        assert!(dash.new_model_dialog().is_none());

        let record = dash.registry().get(ModelId(4)).unwrap();
        assert_eq!(record.name, "Model D");
        assert_eq!(record.hardware, "NVIDIA A100 × 2");
    }

    #[test]
    fn test_close_new_model_discards_fields() {
        let mut dash = dashboard();
        dash.open_new_model_dialog()
            .form_mut()
            .set_model_link("gpt2");
        dash.close_new_model_dialog();
        assert!(dash.open_new_model_dialog().form().model_link().is_empty());
    }

    #[test]
    fn test_advance_without_dialog_is_blocked() {
        let mut dash = dashboard();
        assert!(dash.advance_new_model_dialog().is_blocked());
        assert!(dash.advance_benchmark_dialog().is_blocked());
        assert!(dash.tick_benchmark().is_none());
    }

    #[test]
    fn test_benchmark_unknown_model() {
        let mut dash = dashboard();
        assert!(matches!(
            dash.open_benchmark_dialog(ModelId(7)),
            Err(Error::UnknownModel(ModelId(7)))
        ));
    }

    #[test]
    fn test_reopen_starts_fresh() {
        let mut dash = dashboard();
        let wizard = dash.open_benchmark_dialog(ModelId(1)).unwrap();
        wizard
            .form_mut()
            .select_dataset(catalog::benchmark_dataset("sharegpt").unwrap());
        let _ = wizard.next();
        assert_eq!(wizard.step(), 1);

        let wizard = dash.open_benchmark_dialog(ModelId(1)).unwrap();
        assert_eq!(wizard.step(), 0);
        assert!(wizard.form().dataset().is_none());
    }

    #[test]
    fn test_benchmark_flow_appends_to_bound_model() {
        let mut dash = dashboard();
        let wizard = dash.open_benchmark_dialog(ModelId(2)).unwrap();
        wizard
            .form_mut()
            .select_dataset(catalog::benchmark_dataset("longcontext").unwrap());
        let _ = wizard.next();
        wizard
            .form_mut()
            .toggle_hardware(catalog::benchmark_hardware("v100").unwrap());
        let _ = wizard.next();

        assert_eq!(dash.advance_benchmark_dialog(), Transition::Started);
        assert_eq!(dash.close_benchmark_dialog(), Err(Error::BenchmarkRunning));
        assert!(matches!(
            dash.open_benchmark_dialog(ModelId(1)),
            Err(Error::BenchmarkRunning)
        ));

        let mut ticks = 0;
        while dash.tick_benchmark() != Some(100) {
            ticks += 1;
        }
        assert_eq!(ticks, 9);

        let result = dash.advance_benchmark_dialog().completed().unwrap();
        assert_eq!(result.dataset.name, "Long Context");
        assert!(dash.benchmark_dialog().is_none());
        assert_eq!(dash.registry().get(ModelId(2)).unwrap().benchmarks.len(), 1);
        assert!(dash.registry().get(ModelId(1)).unwrap().benchmarks.is_empty());
    }

    #[test]
    fn test_report_panel_flow() {
        let mut dash = dashboard();
        dash.report_panel().form_mut().set_model_link("org/tiny");
        let _ = dash.advance_report();
        assert_eq!(dash.advance_report(), Transition::Started);
        let report = dash.finish_report_generation().unwrap();
        assert_eq!(report.model, "tiny");
        assert_eq!(dash.report_panel().step(), 2);
        assert!(dash.advance_report().completed().is_some());
        assert_eq!(dash.report_panel().step(), 0);
    }
}
