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

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::record::ZiRecord;

/// Numeric columns of a batch, keyed by column name.
///
/// A column qualifies when at least one row holds a JSON number for it and no
/// row holds a non-null, non-numeric value for it. Booleans are not numeric.
/// Null and missing cells are skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZiNumericColumns {
    columns: BTreeMap<String, Vec<f64>>,
}

impl ZiNumericColumns {
    /// Selects every numeric column present in `batch`.
    #[allow(non_snake_case)]
    pub fn select(batch: &[ZiRecord]) -> Self {
        let mut values: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        let mut rejected: HashSet<String> = HashSet::new();

        for record in batch {
            let Some(map) = record.columns() else {
                continue;
            };
            for (name, value) in map {
                if rejected.contains(name) {
                    continue;
                }
                match value {
                    Value::Null => {}
                    Value::Number(n) => match n.as_f64() {
                        Some(f) if f.is_finite() => {
                            values.entry(name.clone()).or_default().push(f);
                        }
                        _ => {}
                    },
                    _ => {
                        values.remove(name);
                        rejected.insert(name.clone());
                    }
                }
            }
        }

        Self { columns: values }
    }

    pub fn get(&self, column: &str) -> Option<&[f64]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<f64>> {
        self.columns
    }
}
