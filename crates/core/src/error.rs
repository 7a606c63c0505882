// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the dashboard core.
//!
//! Wizard navigation never fails: a blocked step is reported as a
//! [`crate::wizard::Transition::Blocked`] value. Errors only arise where
//! free-form input enters the system, such as catalog ids typed on a
//! command line or a lookup of a model that does not exist.

use crate::model::ModelId;
use thiserror::Error;

/// Errors produced by the dashboard core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input was rejected before it reached a component.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A catalog id did not match any known option.
    #[error("Unknown {kind} '{id}'")]
    UnknownOption {
        /// Which catalog was searched (e.g. "dataset").
        kind: &'static str,
        /// The id that failed to resolve.
        id: String,
    },

    /// No model with this id is registered.
    #[error("Model {0} not found")]
    UnknownModel(ModelId),

    /// The benchmark dialog is running and cannot be closed or reopened.
    #[error("A benchmark is already running")]
    BenchmarkRunning,
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Shorthand for [`Error::UnknownOption`].
    pub fn unknown_option(kind: &'static str, id: impl Into<String>) -> Self {
        Error::UnknownOption {
            kind,
            id: id.into(),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
