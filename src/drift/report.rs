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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::inspect::statistics::round_to;

/// Drift result of one column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiFeatureDrift {
    pub z_score: f64,
    /// 0.0 means identical distributions, 1.0 maximally different.
    pub ks_statistic: f64,
    /// Values below 0.05 are conventionally significant.
    pub p_value: f64,
    pub is_drifting: bool,
}

impl ZiFeatureDrift {
    /// Rounds the reported scores; the drift flag is left as classified.
    pub fn rounded(self, places: u32) -> Self {
        Self {
            z_score: round_to(self.z_score, places),
            ks_statistic: round_to(self.ks_statistic, places),
            p_value: round_to(self.p_value, places),
            is_drifting: self.is_drifting,
        }
    }
}

/// Per-column drift results of one batch, keyed by column name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZiDriftReport {
    features: BTreeMap<String, ZiFeatureDrift>,
}

impl ZiDriftReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature: impl Into<String>, drift: ZiFeatureDrift) {
        self.features.insert(feature.into(), drift);
    }

    pub fn get(&self, feature: &str) -> Option<&ZiFeatureDrift> {
        self.features.get(feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ZiFeatureDrift)> {
        self.features.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Names of the drifting columns.
    pub fn drifting_features(&self) -> Vec<&str> {
        self.features
            .iter()
            .filter(|(_, drift)| drift.is_drifting)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn any_drifting(&self) -> bool {
        self.features.values().any(|drift| drift.is_drifting)
    }

    /// Flattens the result of `feature` for the narrative collaborator.
    pub fn narrative_request(&self, feature: &str) -> Option<ZiNarrativeRequest> {
        self.get(feature)
            .map(|drift| ZiNarrativeRequest::from_feature(feature, drift))
    }

    /// Plain JSON view of the report.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Flattened drift result of a single feature, as handed to an explainer.
///
/// All values are plain `f64`/`bool`; non-finite scores serialize as `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiNarrativeRequest {
    pub feature: String,
    pub z_score: f64,
    pub ks_statistic: f64,
    pub p_value: f64,
    pub is_drifting: bool,
}

impl ZiNarrativeRequest {
    pub fn from_feature(feature: impl Into<String>, drift: &ZiFeatureDrift) -> Self {
        Self {
            feature: feature.into(),
            z_score: drift.z_score,
            ks_statistic: drift.ks_statistic,
            p_value: drift.p_value,
            is_drifting: drift.is_drifting,
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "feature": self.feature,
            "z_score": finite_or_null(self.z_score),
            "ks_statistic": finite_or_null(self.ks_statistic),
            "p_value": finite_or_null(self.p_value),
            "is_drifting": self.is_drifting,
        })
    }
}

fn finite_or_null(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
