// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Adapters for the Mako dashboard.
//!
//! The core crate is synchronous and does no I/O. This crate supplies the
//! pieces around it: configuration, cost math, the mock deployment seam and
//! the `tokio` timers that drive the simulated benchmark and report flows.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod simulation;
pub mod upstream;

pub use simulation::{generate_report, run_benchmark};
pub use upstream::prelude::*;
