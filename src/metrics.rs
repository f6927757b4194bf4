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

use serde::Serialize;
use serde_json::Value;

use crate::monitor::state::{ZiDriftHistoryEntry, ZiDriftStatus};

/// Summary of a monitored feature's drift history.
#[derive(Debug, Serialize, Default, PartialEq)]
pub struct ZiDriftMetrics {
    pub batches_checked: usize,
    pub drifting_batches: usize,
    pub drift_rate: f64,
    pub max_ks: f64,
    pub mean_ks: f64,
    pub last_status: Option<ZiDriftStatus>,
}

impl ZiDriftMetrics {
    #[allow(non_snake_case)]
    pub fn compute(history: &[ZiDriftHistoryEntry]) -> Self {
        let mut metrics = ZiDriftMetrics {
            batches_checked: history.len(),
            ..Default::default()
        };

        if history.is_empty() {
            return metrics;
        }

        let mut ks_total = 0.0f64;
        for entry in history {
            if entry.status == ZiDriftStatus::Drift {
                metrics.drifting_batches += 1;
            }
            ks_total += entry.ks_statistic;
            if entry.ks_statistic > metrics.max_ks {
                metrics.max_ks = entry.ks_statistic;
            }
        }

        metrics.drift_rate = metrics.drifting_batches as f64 / history.len() as f64;
        metrics.mean_ks = ks_total / history.len() as f64;
        metrics.last_status = history.last().map(|entry| entry.status);

        metrics
    }

    #[allow(non_snake_case)]
    pub fn as_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
