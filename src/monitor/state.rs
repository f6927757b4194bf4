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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::drift::report::ZiFeatureDrift;

/// Health label of one checked batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZiDriftStatus {
    #[serde(rename = "DRIFT")]
    Drift,
    #[serde(rename = "OK")]
    Ok,
}

impl ZiDriftStatus {
    pub fn from_flag(is_drifting: bool) -> Self {
        if is_drifting {
            ZiDriftStatus::Drift
        } else {
            ZiDriftStatus::Ok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZiDriftStatus::Drift => "DRIFT",
            ZiDriftStatus::Ok => "OK",
        }
    }
}

/// One point of the monitored feature's drift time series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiDriftHistoryEntry {
    /// 1-based position in the history.
    pub batch_index: usize,
    pub ks_statistic: f64,
    pub status: ZiDriftStatus,
    pub checked_at: DateTime<Utc>,
}

/// Caller-owned monitoring state: drift history, the last result of the
/// monitored feature, and display flags.
///
/// Created with [`ZiMonitorState::new`], mutated once per processed batch by
/// the monitor, and read for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZiMonitorState {
    pub drift_history: Vec<ZiDriftHistoryEntry>,
    pub last_result: Option<ZiFeatureDrift>,
    /// Whether the narrative report for the last result should be shown.
    pub show_report: bool,
    pub reference_locked: bool,
    pub last_batch_size: Option<usize>,
}

impl ZiMonitorState {
    #[allow(non_snake_case)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a history point for `drift` and makes it the last result.
    pub fn record(&mut self, drift: ZiFeatureDrift, batch_size: usize) -> &ZiDriftHistoryEntry {
        self.last_result = Some(drift);
        self.last_batch_size = Some(batch_size);
        let entry = ZiDriftHistoryEntry {
            batch_index: self.drift_history.len() + 1,
            ks_statistic: drift.ks_statistic,
            status: ZiDriftStatus::from_flag(drift.is_drifting),
            checked_at: Utc::now(),
        };
        self.drift_history.push(entry);
        &self.drift_history[self.drift_history.len() - 1]
    }

    pub fn last_status(&self) -> Option<ZiDriftStatus> {
        self.last_result
            .as_ref()
            .map(|drift| ZiDriftStatus::from_flag(drift.is_drifting))
    }

    /// KS statistic series of the monitored feature, as `(batch_index, ks)`.
    pub fn ks_series(&self) -> Vec<(usize, f64)> {
        self.drift_history
            .iter()
            .map(|entry| (entry.batch_index, entry.ks_statistic))
            .collect()
    }
}
