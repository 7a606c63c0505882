// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Static option catalogs.
//!
//! Every list the dashboard offers for selection lives here: datasets,
//! GPU types and counts for the new-model form, benchmark hardware, and the
//! priced hardware used by the report generator. Lookups by id return
//! [`Error::UnknownOption`] for ids that are not in the catalog.

use crate::error::{Error, Result};
use crate::model::DatasetRef;
use serde::Serialize;

/// A selectable workload dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetOption {
    /// Stable id (e.g. "sharegpt").
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Token shape of the workload.
    pub description: &'static str,
}

impl DatasetOption {
    /// Whether this is the user-supplied dataset entry.
    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_DATASET.id
    }

    /// Owned name/description pair for storing on records.
    pub fn to_ref(&self) -> DatasetRef {
        DatasetRef {
            name: self.name.to_string(),
            description: self.description.to_string(),
        }
    }
}

/// Standard datasets, offered by every flow.
pub const DATASETS: &[DatasetOption] = &[
    DatasetOption {
        id: "sharegpt",
        name: "ShareGPT",
        description: "250/200 tokens in/out",
    },
    DatasetOption {
        id: "longcontext",
        name: "Long Context",
        description: "2000/500 tokens in/out",
    },
    DatasetOption {
        id: "verylongcontext",
        name: "Very Long Context",
        description: "100000/2000 tokens in/out",
    },
    DatasetOption {
        id: "reasoning",
        name: "Reasoning",
        description: "500/10000 tokens in/out",
    },
];

/// Upload entry, only offered by the benchmark dialog.
pub const CUSTOM_DATASET: DatasetOption = DatasetOption {
    id: "custom",
    name: "Upload your own",
    description: "Custom dataset",
};

/// Datasets offered by the benchmark dialog, custom upload last.
pub fn benchmark_datasets() -> impl Iterator<Item = &'static DatasetOption> {
    DATASETS.iter().chain(std::iter::once(&CUSTOM_DATASET))
}

/// Look up a standard dataset by id.
pub fn dataset(id: &str) -> Result<&'static DatasetOption> {
    DATASETS
        .iter()
        .find(|d| d.id == id)
        .ok_or_else(|| Error::unknown_option("dataset", id))
}

/// Look up a benchmark dataset by id, including the custom upload entry.
pub fn benchmark_dataset(id: &str) -> Result<&'static DatasetOption> {
    benchmark_datasets()
        .find(|d| d.id == id)
        .ok_or_else(|| Error::unknown_option("dataset", id))
}

/// GPU counts offered for manual hardware selection.
pub const GPU_COUNTS: &[u32] = &[1, 2, 4, 8];

/// Hardware offered by the benchmark dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HardwareOption {
    /// Stable id (e.g. "a100").
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
}

/// Benchmark dialog hardware.
pub const BENCHMARK_HARDWARE: &[HardwareOption] = &[
    HardwareOption { id: "a100", name: "NVIDIA A100" },
    HardwareOption { id: "v100", name: "NVIDIA V100" },
    HardwareOption { id: "t4", name: "NVIDIA T4" },
    HardwareOption { id: "a10", name: "NVIDIA A10" },
    HardwareOption { id: "h100", name: "NVIDIA H100" },
];

/// Look up benchmark hardware by id.
pub fn benchmark_hardware(id: &str) -> Result<&'static HardwareOption> {
    BENCHMARK_HARDWARE
        .iter()
        .find(|h| h.id == id)
        .ok_or_else(|| Error::unknown_option("hardware", id))
}

/// Hardware with an hourly rental price, used by the report generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricedHardware {
    /// Stable id (e.g. "a100-40gb").
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Price in USD per GPU hour.
    pub hourly_cost: f64,
}

/// Report generator hardware, in display order.
pub const REPORT_HARDWARE: &[PricedHardware] = &[
    PricedHardware { id: "a100-40gb", name: "NVIDIA A100 40GB", hourly_cost: 3.0 },
    PricedHardware { id: "a100-80gb", name: "NVIDIA A100 80GB", hourly_cost: 4.1 },
    PricedHardware { id: "h100", name: "NVIDIA H100", hourly_cost: 5.5 },
    PricedHardware { id: "v100", name: "NVIDIA V100", hourly_cost: 2.5 },
    PricedHardware { id: "t4", name: "NVIDIA T4", hourly_cost: 0.8 },
    PricedHardware { id: "a10g", name: "NVIDIA A10G", hourly_cost: 1.5 },
    PricedHardware { id: "l4", name: "NVIDIA L4", hourly_cost: 1.2 },
];

/// Look up report hardware by id.
pub fn report_hardware(id: &str) -> Result<&'static PricedHardware> {
    REPORT_HARDWARE
        .iter()
        .find(|h| h.id == id)
        .ok_or_else(|| Error::unknown_option("hardware", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_datasets_end_with_custom() {
        let ids: Vec<_> = benchmark_datasets().map(|d| d.id).collect();
        assert_eq!(
            ids,
            vec!["sharegpt", "longcontext", "verylongcontext", "reasoning", "custom"]
        );
        assert!(benchmark_dataset("custom").unwrap().is_custom());
    }

    #[test]
    fn test_custom_dataset_not_offered_to_new_models() {
        assert!(dataset("custom").is_err());
        assert_eq!(dataset("reasoning").unwrap().name, "Reasoning");
    }

    #[test]
    fn test_unknown_hardware_is_reported_by_kind() {
        let err = report_hardware("tpu-v5").unwrap_err();
        assert_eq!(err.to_string(), "Unknown hardware 'tpu-v5'");
        assert!(benchmark_hardware("h100").is_ok());
    }

    #[test]
    fn test_report_hardware_prices() {
        assert_eq!(report_hardware("t4").unwrap().hourly_cost, 0.8);
        assert_eq!(report_hardware("h100").unwrap().hourly_cost, 5.5);
        assert_eq!(REPORT_HARDWARE.len(), 7);
    }
}
