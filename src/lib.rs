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

//! # ZiDrift Core Library
//!
//! This is the main library entry point for ZiDrift, a drift monitor for
//! streams of batched tabular data. A reference profile is locked from an
//! initial batch; every later batch is scored against it per numeric column
//! and classified as drifting or healthy. Drifting results can be handed to a
//! narrative explainer for a business-facing summary.
//!
//! ## Module Overview
//!
//! - **record**: ZiRecord and batch types for tabular rows
//! - **inspect**: Numeric column selection, summary statistics, and the KS test
//! - **drift**: Reference profiles, the drift detector, and drift reports
//! - **ingest**: Batch sources (chunked files, in-memory, synthetic) and drift injection
//! - **explain**: Narrative explainers and the report boundary
//! - **monitor**: The monitoring loop and its caller-owned state
//! - **metrics**: Summary metrics over a drift history
//! - **config**: Monitor configuration loading and validation
//!
//! ## Feature Flags
//!
//! - `csv`: CSV batch sources
//! - `parallel`: Per-column drift scoring with Rayon
//! - `compression`: gzip / zstd compressed batch sources
//! - `full`: Enables all features
//!
//! ## Quick Start
//!
//! ```rust
//! use zidrift::{ZiDriftDetector, ZiRecord};
//! use serde_json::json;
//!
//! let reference: Vec<ZiRecord> = (0..5)
//!     .map(|i| ZiRecord::new(Some(i.to_string()), json!({"amount": 10.0})))
//!     .collect();
//!
//! let mut detector = ZiDriftDetector::new();
//! detector.establish_reference(&reference);
//!
//! let report = detector.detect_drift(&reference).unwrap();
//! assert!(!report.get("amount").unwrap().is_drifting);
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, ZiError>`. Checking drift before a
//! reference is locked fails with `ZiError::UninitializedReference`; degenerate
//! batches (no numeric columns, zero variance) never fail.

pub mod config;
pub mod drift;
pub mod errors;
pub mod explain;
pub mod ingest;
pub mod inspect;
pub mod metrics;
pub mod monitor;
pub mod record;

pub use config::{ZiDetectorConfig, ZiExplainerConfig, ZiMonitorConfig, ZiSourceConfig};
pub use errors::{Result, ZiError};
pub use metrics::ZiDriftMetrics;
pub use record::{ZiRecord, ZiRecordBatch};

pub use drift::{
    ZiColumnProfile, ZiDriftDetector, ZiDriftReport, ZiFeatureDrift, ZiNarrativeRequest,
    ZiReferenceProfile,
};
pub use explain::{ZiChatExplainer, ZiExplainer, ZiFnExplainer, ZiTextStream};
pub use ingest::{
    ZiBatch, ZiBatchPoll, ZiBatchSource, ZiChunkedReader, ZiMemorySource, ZiPerturbation,
    ZiReaderConfig, ZiSyntheticConfig, ZiSyntheticSource,
};
pub use inspect::{ks_two_sample, ZiColumnStats, ZiKsTest, ZiNumericColumns};
pub use monitor::{ZiBatchOutcome, ZiDriftHistoryEntry, ZiDriftStatus, ZiMonitor, ZiMonitorState};
