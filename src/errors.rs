//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of ZiDrift.
//! The ZiDrift project belongs to the Dunimd project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # ZiDrift Error Module
//!
//! This module defines the error types used throughout ZiDrift for consistent
//! error handling and reporting.
//!
//! ## Error Handling Philosophy
//!
//! - **Explicit Error Types**: Each variant represents a specific category of
//!   failure so callers can react to it appropriately
//! - **Graceful Degradation**: Degenerate inputs (no numeric columns, zero
//!   variance) are handled by policy and never surface as errors
//! - **Serde Support**: Errors can be serialized for logging and transmission
//!
//! ## Error Categories
//!
//! - **Io**: Filesystem and network errors
//! - **Schema**: Malformed rows or incompatible data layout
//! - **Validation**: Invalid parameters, inputs, or API misuse
//! - **Config**: Invalid or unreadable monitor configuration
//! - **Source**: Failures raised by a batch source
//! - **UninitializedReference**: Drift check attempted before a reference was locked
//! - **Explainer**: Failures of the narrative report collaborator
//! - **Serde**: Serialization/deserialization errors
//!
//! ## Usage
//!
//! ```rust
//! use zidrift::errors::{Result, ZiError};
//!
//! fn check(detector: &ZiDriftDetector, batch: &ZiRecordBatch) -> Result<()> {
//!     match detector.detect_drift(batch) {
//!         Err(ZiError::UninitializedReference) => {
//!             // establish a reference first
//!         }
//!         other => { other?; }
//!     }
//!     Ok(())
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout ZiDrift.
pub type Result<T> = std::result::Result<T, ZiError>;

/// Canonical error enumeration for ZiDrift.
#[derive(Debug, Error, Serialize, Deserialize, PartialEq)]
pub enum ZiError {
    /// Errors originating from filesystem or network IO.
    #[error("io error: {0}")]
    Io(String),

    /// Errors caused by malformed rows or incompatible data layout.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Validation errors triggered by invalid parameters, inputs, or misuse.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Invalid or unreadable configuration.
    #[error("config error: {message}")]
    Config { message: String },

    /// Any failure raised by a batch source implementation.
    #[error("source '{source_name}' failed: {message}")]
    Source { source_name: String, message: String },

    /// A drift check was attempted before a reference profile was established.
    #[error("reference profile not established; lock a reference batch before checking drift")]
    UninitializedReference,

    /// Failures of the narrative report collaborator.
    #[error("explainer error: {0}")]
    Explainer(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<io::Error> for ZiError {
    fn from(err: io::Error) -> Self {
        ZiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZiError {
    fn from(err: serde_json::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for ZiError {
    fn from(err: serde_yaml::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for ZiError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            ZiError::Io(err.to_string())
        } else {
            ZiError::schema(err.to_string())
        }
    }
}

impl From<reqwest::Error> for ZiError {
    fn from(err: reqwest::Error) -> Self {
        ZiError::Explainer(err.to_string())
    }
}

impl ZiError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZiError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct schema errors.
    pub fn schema<T: Into<String>>(message: T) -> Self {
        ZiError::Schema {
            message: message.into(),
        }
    }

    /// Helper to construct configuration errors.
    pub fn config<T: Into<String>>(message: T) -> Self {
        ZiError::Config {
            message: message.into(),
        }
    }

    /// Helper to construct batch source errors.
    pub fn source(name: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Source {
            source_name: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct explainer errors.
    pub fn explainer<T: Into<String>>(message: T) -> Self {
        ZiError::Explainer(message.into())
    }
}
