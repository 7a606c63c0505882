// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core of the Mako optimization dashboard.
//!
//! Everything here is synchronous and free of I/O. Timers, deployment and
//! export live in the adapter and benchmark crates.
//!
//! # Quick Start
//!
//! ```no_run
//! use mako_core::{Dashboard, MetricsGenerator, ModelId};
//!
//! let mut dashboard = Dashboard::new(MetricsGenerator::seeded(42));
//! let wizard = dashboard.open_benchmark_dialog(ModelId(1)).unwrap();
//! assert_eq!(wizard.step(), 0);
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - Datasets, GPU types and priced hardware
//! - [`model`] - Model and benchmark records
//! - [`wizard`] - The step machine and the three dialog flows
//! - [`generator`] - Mock throughput and latency numbers
//! - [`report`] - Report entries, ranking and deploy targets
//! - [`registry`] - The in-memory model list
//! - [`store`] - The [`Dashboard`] tying it all together

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod generator;
pub mod model;
pub mod registry;
pub mod report;
pub mod store;
pub mod wizard;

pub use error::{Error, Result};
pub use generator::{baseline_metrics, BaselineMetrics, MetricsGenerator};
pub use model::{
    BenchmarkResult, DatasetRef, EngineChoice, GpuType, HardwareGoal, HardwareSample,
    InferenceEngine, ModelDraft, ModelId, ModelRecord, OptimizationMode, OptimizationTarget,
    PerformanceSeries,
};
pub use registry::ModelRegistry;
pub use report::{DeployTarget, ReportEntry, TcoReport};
pub use store::Dashboard;
pub use wizard::{
    BenchmarkWizard, NewModelWizard, ReportWizard, RunState, StepForm, StepMachine, Transition,
};
