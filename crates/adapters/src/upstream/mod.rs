// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Adapters at the edges of the dashboard core.
//!
//! - **Cost**: hourly, monthly and per-million-query GPU cost of report rows
//! - **Config**: layered settings from defaults, `mako.toml` and `MAKO_*`
//! - **Deploy**: the mock deployment boundary
//!
//! # Example
//!
//! ```ignore
//! use mako_adapters::upstream::prelude::*;
//!
//! let config = DashboardConfig::load()?;
//! let cost_adapter = CostAdapter::with_hours_per_month(config.hours_per_month);
//! let deployer = MockDeployer::new(config.deploy_delay());
//! ```

pub mod config;
pub mod cost;
pub mod deploy;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::config::{ConfigAdapterError, DashboardConfig};
    pub use super::cost::{CostAdapter, CostAdapterError, CostBreakdown, TcoSummary};
    pub use super::deploy::{deploy_entry, DeployError, Deployer, DeploymentReceipt, MockDeployer};
}

pub use self::config::DashboardConfig;
pub use self::cost::CostAdapter;
pub use self::deploy::{Deployer, MockDeployer};
