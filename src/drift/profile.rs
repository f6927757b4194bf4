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

use crate::inspect::columns::ZiNumericColumns;
use crate::inspect::statistics::ZiColumnStats;

/// Summary statistics locked for one reference column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiColumnProfile {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl From<ZiColumnStats> for ZiColumnProfile {
    fn from(stats: ZiColumnStats) -> Self {
        Self {
            mean: stats.mean,
            std: stats.std,
            min: stats.min,
            max: stats.max,
        }
    }
}

/// The locked statistical baseline: per-column summaries plus the retained
/// reference values needed by the KS test.
///
/// A profile is built in full before it is installed in a detector and is
/// never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZiReferenceProfile {
    columns: BTreeMap<String, ZiColumnProfile>,
    /// Not serialized; a deserialized profile has summaries only.
    #[serde(skip)]
    values: BTreeMap<String, Vec<f64>>,
    rows: usize,
}

impl ZiReferenceProfile {
    /// Builds a profile from the numeric columns of a reference batch. The
    /// column values are owned copies.
    pub fn build(columns: ZiNumericColumns, rows: usize) -> Self {
        let values = columns.into_inner();
        let columns = values
            .iter()
            .map(|(name, data)| (name.clone(), ZiColumnProfile::from(ZiColumnStats::compute(data))))
            .collect();

        Self {
            columns,
            values,
            rows,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ZiColumnProfile> {
        self.columns.get(name)
    }

    /// Retained reference values of `name`.
    pub fn values(&self, name: &str) -> Option<&[f64]> {
        self.values.get(name).map(Vec::as_slice)
    }

    pub fn columns(&self) -> &BTreeMap<String, ZiColumnProfile> {
        &self.columns
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of rows in the batch the profile was built from.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
