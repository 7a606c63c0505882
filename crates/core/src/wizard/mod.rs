// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Multi-step wizard state machines.
//!
//! All three dashboard flows share one [`StepMachine`], parameterized by a
//! [`StepForm`]: the form declares its step labels, which steps are valid,
//! and which steps are currently skipped. The machine owns the step index
//! and keeps it inside `[0, step_count - 1]`.
//!
//! ```text
//! StepMachine<F>
//!   ├─ step index   (bounded)
//!   └─ form: F      (step labels, validity, skip predicate)
//! ```
//!
//! What happens on the last step differs per flow, so each wizard wraps the
//! machine and decides its own terminal action:
//!
//! - [`NewModelWizard`]: emits the submitted form.
//! - [`BenchmarkWizard`]: starts a simulated run, then emits its result.
//! - [`ReportWizard`]: generates a report on the hardware step, then emits it.

pub mod benchmark;
pub mod new_model;
pub mod report;

pub use benchmark::{BenchmarkForm, BenchmarkWizard, RunState};
pub use new_model::{NewModelForm, NewModelWizard};
pub use report::{ReportForm, ReportWizard};

/// Declares the steps of a wizard and when each one may be left.
pub trait StepForm: Default {
    /// Step labels, in order. Must be non-empty.
    const STEPS: &'static [&'static str];

    /// Whether the given step currently allows advancing.
    fn is_step_valid(&self, step: usize) -> bool;

    /// Whether the given step is currently skipped. Step 0 and the last
    /// step are never skipped, whatever this returns.
    fn is_step_skipped(&self, _step: usize) -> bool {
        false
    }
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<T> {
    /// The step index changed.
    Moved {
        /// Step before the move.
        from: usize,
        /// Step after the move.
        to: usize,
    },
    /// Nothing happened: the step is invalid, or the control is disabled.
    Blocked,
    /// A terminal action began and its result is pending.
    Started,
    /// The wizard finished and was reset.
    Completed(T),
}

impl<T> Transition<T> {
    /// Whether the request was ignored.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Transition::Blocked)
    }

    /// The completed value, if any.
    pub fn completed(self) -> Option<T> {
        match self {
            Transition::Completed(value) => Some(value),
            _ => None,
        }
    }
}

/// Step index plus form data.
#[derive(Debug, Clone, Default)]
pub struct StepMachine<F> {
    step: usize,
    form: F,
}

impl<F: StepForm> StepMachine<F> {
    /// A fresh session on step 0 with default form data.
    pub fn new() -> Self {
        Self {
            step: 0,
            form: F::default(),
        }
    }

    /// Current step index.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of steps.
    pub fn step_count(&self) -> usize {
        F::STEPS.len()
    }

    /// Label of the current step.
    pub fn step_label(&self) -> &'static str {
        F::STEPS[self.step]
    }

    /// Index of the last step.
    pub fn last_step(&self) -> usize {
        F::STEPS.len() - 1
    }

    /// Whether the current step is the last one.
    pub fn is_last_step(&self) -> bool {
        self.step == self.last_step()
    }

    /// Form data.
    pub fn form(&self) -> &F {
        &self.form
    }

    /// Mutable form data.
    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Whether the current step allows advancing.
    pub fn can_advance(&self) -> bool {
        self.form.is_step_valid(self.step)
    }

    fn skipped(&self, step: usize) -> bool {
        step != 0 && step != self.last_step() && self.form.is_step_skipped(step)
    }

    /// Move to the next step that is not skipped.
    ///
    /// Blocked when the current step is invalid or already the last step;
    /// completing the last step is the wrapping wizard's job.
    pub fn forward<T>(&mut self) -> Transition<T> {
        if !self.can_advance() || self.is_last_step() {
            return Transition::Blocked;
        }
        let from = self.step;
        match (from + 1..=self.last_step()).find(|&s| !self.skipped(s)) {
            Some(to) => {
                self.step = to;
                Transition::Moved { from, to }
            }
            None => Transition::Blocked,
        }
    }

    /// Move to the previous step that is not skipped.
    ///
    /// The skip predicate is evaluated now, so a step skipped on the way
    /// forward is also skipped on the way back.
    pub fn back<T>(&mut self) -> Transition<T> {
        let from = self.step;
        match (0..from).rev().find(|&s| !self.skipped(s)) {
            Some(to) => {
                self.step = to;
                Transition::Moved { from, to }
            }
            None => Transition::Blocked,
        }
    }

    /// Discard form data and return to step 0.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
