// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! The benchmark report generator.
//!
//! Steps: `Select Model`, `Choose Hardware`, `View Report`. `next()` on the
//! hardware step starts generation; once the generation delay has passed
//! the shell calls [`ReportWizard::finish_generation`], which builds the
//! report and moves to the last step. `next()` on the last step hands the
//! report out and starts over.
//!
//! Only one mock deployment may be in flight at a time.

use super::{StepForm, StepMachine, Transition};
use crate::catalog::{PricedHardware, REPORT_HARDWARE};
use crate::generator::MetricsGenerator;
use crate::report::{DeployTarget, TcoReport};
use std::time::Duration;
use tracing::{debug, info};

/// How long report generation appears to take.
pub const REPORT_DELAY: Duration = Duration::from_millis(2000);

/// Form data of the report generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportForm {
    model_link: String,
    selected: Vec<bool>,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            model_link: String::new(),
            selected: vec![true; REPORT_HARDWARE.len()],
        }
    }
}

impl ReportForm {
    /// Model link as typed.
    pub fn model_link(&self) -> &str {
        &self.model_link
    }

    /// Set the model link.
    pub fn set_model_link(&mut self, link: impl Into<String>) {
        self.model_link = link.into();
    }

    /// Check or uncheck a hardware box. Unknown ids are ignored.
    pub fn set_hardware(&mut self, hardware_id: &str, checked: bool) {
        if let Some(index) = REPORT_HARDWARE.iter().position(|hw| hw.id == hardware_id) {
            self.selected[index] = checked;
        }
    }

    /// Uncheck every hardware box.
    pub fn clear_hardware(&mut self) {
        self.selected.iter_mut().for_each(|checked| *checked = false);
    }

    /// Whether a hardware box is checked.
    pub fn is_selected(&self, hardware_id: &str) -> bool {
        REPORT_HARDWARE
            .iter()
            .zip(&self.selected)
            .any(|(hw, checked)| *checked && hw.id == hardware_id)
    }

    /// Checked hardware, in catalog order.
    pub fn selected_hardware(&self) -> Vec<&'static PricedHardware> {
        REPORT_HARDWARE
            .iter()
            .zip(&self.selected)
            .filter(|(_, checked)| **checked)
            .map(|(hw, _)| hw)
            .collect()
    }
}

impl StepForm for ReportForm {
    const STEPS: &'static [&'static str] = &["Select Model", "Choose Hardware", "View Report"];

    fn is_step_valid(&self, step: usize) -> bool {
        match step {
            0 => !self.model_link.trim().is_empty(),
            1 => self.selected.iter().any(|checked| *checked),
            2 => true,
            _ => false,
        }
    }
}

/// State of the report generator panel.
#[derive(Debug, Clone, Default)]
pub struct ReportWizard {
    machine: StepMachine<ReportForm>,
    generating: bool,
    report: Option<TcoReport>,
    deploying: Option<DeployTarget>,
}

impl ReportWizard {
    /// A fresh panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying step machine.
    pub fn machine(&self) -> &StepMachine<ReportForm> {
        &self.machine
    }

    /// Current step index.
    pub fn step(&self) -> usize {
        self.machine.step()
    }

    /// Form data.
    pub fn form(&self) -> &ReportForm {
        self.machine.form()
    }

    /// Mutable form data.
    pub fn form_mut(&mut self) -> &mut ReportForm {
        self.machine.form_mut()
    }

    /// Whether generation is pending.
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// The generated report.
    pub fn report(&self) -> Option<&TcoReport> {
        self.report.as_ref()
    }

    /// The deployment in flight.
    pub fn deploying(&self) -> Option<&DeployTarget> {
        self.deploying.as_ref()
    }

    /// Whether "Next"/"Generate Report" is enabled.
    pub fn can_advance(&self) -> bool {
        !self.generating && self.machine.can_advance()
    }

    /// Advance; on the hardware step start generation, on the last step
    /// emit the report and start over.
    pub fn next(&mut self) -> Transition<TcoReport> {
        if !self.can_advance() {
            return Transition::Blocked;
        }
        if self.machine.is_last_step() {
            return match self.report.take() {
                Some(report) => {
                    self.reset();
                    Transition::Completed(report)
                }
                None => Transition::Blocked,
            };
        }
        if self.machine.step() + 1 == self.machine.last_step() {
            debug!(
                hardware = self.form().selected_hardware().len(),
                "Report generation started"
            );
            self.generating = true;
            return Transition::Started;
        }
        self.machine.forward()
    }

    /// Go back one step. Disabled while generating.
    pub fn back(&mut self) -> Transition<TcoReport> {
        if self.generating {
            return Transition::Blocked;
        }
        self.machine.back()
    }

    /// Build the report once the generation delay has passed, and show it.
    pub fn finish_generation(&mut self, generator: &mut MetricsGenerator) -> Option<&TcoReport> {
        if !self.generating {
            return None;
        }
        let hardware = self.form().selected_hardware();
        let report = generator.tco_report(self.form().model_link(), &hardware);
        info!(
            model = %report.model,
            entries = report.entries.len(),
            "Benchmark report generated"
        );
        self.report = Some(report);
        self.generating = false;
        let _ = self.machine.forward::<()>();
        self.report.as_ref()
    }

    /// Claim the single deployment slot for a report row.
    ///
    /// Returns `None` while another deployment is in flight or when the row
    /// does not exist.
    pub fn begin_deploy(&mut self, entry_id: &str) -> Option<DeployTarget> {
        if self.deploying.is_some() {
            return None;
        }
        let target = self.report.as_ref()?.entry(entry_id)?.deploy_target();
        self.deploying = Some(target.clone());
        Some(target)
    }

    /// Release the deployment slot.
    pub fn finish_deploy(&mut self) -> Option<DeployTarget> {
        self.deploying.take()
    }

    /// "Generate New Report": clear everything and return to step 0.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
