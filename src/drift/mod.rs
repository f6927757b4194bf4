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

//! # Drift Detection Module
//!
//! The core of ZiDrift: a reference profile is locked from an initial batch,
//! and every later batch is scored against it column by column.
//!
//! ## Module Components
//!
//! - **Profile** ([profile.rs](profile/index.html)): Locked per-column summaries and retained values
//! - **Detector** ([detector.rs](detector/index.html)): Reference locking and drift classification
//! - **Report** ([report.rs](report/index.html)): Per-feature results and the narrative boundary
//!
//! ## Scoring
//!
//! For each numeric column present in both the batch and the reference:
//!
//! - `z_score = |mean(current) - reference.mean| / reference.std` (std floored at 1e-6)
//! - `ks_statistic`, `p_value` from a two-sample KS test against the retained reference values
//! - `is_drifting = z_score > 0.5 || ks_statistic > 0.1`
//!
//! Reported scores are rounded to four decimal places; classification uses
//! the unrounded values.
//!
//! ## Usage
//!
//! ```rust
//! use zidrift::drift::ZiDriftDetector;
//!
//! let mut detector = ZiDriftDetector::new();
//! detector.establish_reference(&reference_batch);
//! let report = detector.detect_drift(&current_batch)?;
//! if let Some(amount) = report.get("amount") {
//!     println!("amount drifting: {}", amount.is_drifting);
//! }
//! ```

pub mod detector;
pub mod profile;
pub mod report;

pub use detector::ZiDriftDetector;
pub use profile::{ZiColumnProfile, ZiReferenceProfile};
pub use report::{ZiDriftReport, ZiFeatureDrift, ZiNarrativeRequest};
