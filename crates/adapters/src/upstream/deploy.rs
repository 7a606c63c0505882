// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Deployment boundary.
//!
//! Nothing is ever deployed. [`MockDeployer`] waits for a fixed delay and
//! returns a receipt; the Azure and container-export actions only log.
//!
//! # Example
//!
//! ```ignore
//! use mako_adapters::upstream::deploy::{deploy_entry, MockDeployer};
//!
//! let deployer = MockDeployer::new(Duration::from_secs(2));
//! let receipt = deploy_entry(&deployer, dashboard.report_panel(), "h100-optimized").await?;
//! println!("{}", receipt.message);
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mako_core::{DeployTarget, ModelRecord, ReportWizard};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Default mock deployment delay.
pub const DEPLOY_DELAY: Duration = Duration::from_millis(2000);

/// Errors that can occur during deployment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeployError {
    /// Another deployment is in flight
    #[error("A deployment to {0} is already in progress")]
    Busy(String),

    /// The report has no row with this id
    #[error("No report entry '{0}' to deploy")]
    UnknownEntry(String),
}

/// Result type for deployment operations.
pub type Result<T> = std::result::Result<T, DeployError>;

/// Proof of a (mock) deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentReceipt {
    /// What was deployed
    pub target: DeployTarget,
    /// User-facing completion message
    pub message: String,
    /// Completion time
    pub deployed_at: DateTime<Utc>,
}

/// Something that can deploy a report row.
#[async_trait]
pub trait Deployer: Send + Sync {
    /// Deploy `target` and return a receipt once done.
    async fn deploy(&self, target: &DeployTarget) -> Result<DeploymentReceipt>;

    /// "Deploy to Azure" for a model.
    async fn deploy_to_azure(&self, model: &ModelRecord) -> Result<()> {
        info!(model = %model.name, "Deploying to Azure...");
        Ok(())
    }

    /// "Export optimized container" for a model.
    async fn export_container(&self, model: &ModelRecord) -> Result<()> {
        info!(model = %model.name, "Exporting optimized container...");
        Ok(())
    }
}

/// Deployer that sleeps and succeeds.
#[derive(Debug, Clone)]
pub struct MockDeployer {
    delay: Duration,
}

impl Default for MockDeployer {
    fn default() -> Self {
        Self::new(DEPLOY_DELAY)
    }
}

impl MockDeployer {
    /// Create a deployer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Deployer for MockDeployer {
    async fn deploy(&self, target: &DeployTarget) -> Result<DeploymentReceipt> {
        info!(entry = %target.entry_id, optimized = target.optimized, "Deployment started");
        tokio::time::sleep(self.delay).await;

        let message = target.completion_message();
        info!(entry = %target.entry_id, "{}", message);
        Ok(DeploymentReceipt {
            target: target.clone(),
            message,
            deployed_at: Utc::now(),
        })
    }
}

/// Deploy a row of the panel's report, holding the panel's single
/// deployment slot for the duration.
pub async fn deploy_entry<D>(
    deployer: &D,
    panel: &mut ReportWizard,
    entry_id: &str,
) -> Result<DeploymentReceipt>
where
    D: Deployer + ?Sized,
{
    if let Some(current) = panel.deploying() {
        return Err(DeployError::Busy(current.hardware_name.clone()));
    }
    let target = panel
        .begin_deploy(entry_id)
        .ok_or_else(|| DeployError::UnknownEntry(entry_id.to_string()))?;

    let receipt = deployer.deploy(&target).await;
    panel.finish_deploy();
    receipt
}
