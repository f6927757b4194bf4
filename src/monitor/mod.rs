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

//! # Monitoring Module
//!
//! The monitoring loop around the drift detector. State that a dashboard or
//! driver accumulates across batches lives in an explicit `ZiMonitorState`
//! owned by the caller and passed into every call.
//!
//! ## Lifecycle
//!
//! 1. `ZiMonitorState::new()` and `ZiMonitor::new(source, &config)`
//! 2. `monitor.initialize(&mut state)` locks the first batch as reference
//! 3. `monitor.process_next_batch(&mut state, inject)` per batch until `EndOfStream`
//! 4. Read `state.drift_history`, `state.last_result`, or `ZiDriftMetrics::compute`
//!
//! ## Usage
//!
//! ```rust
//! use zidrift::monitor::{ZiBatchOutcome, ZiMonitor, ZiMonitorState};
//!
//! let mut state = ZiMonitorState::new();
//! let mut monitor = ZiMonitor::new(reader, &config);
//! monitor.initialize(&mut state)?;
//! while let ZiBatchOutcome::Checked { report, .. } = monitor.process_next_batch(&mut state, false)? {
//!     println!("{}", report.to_json());
//! }
//! ```

pub mod session;
pub mod state;

pub use session::{ZiBatchOutcome, ZiMonitor};
pub use state::{ZiDriftHistoryEntry, ZiDriftStatus, ZiMonitorState};
