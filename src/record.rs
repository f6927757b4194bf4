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

//! # ZiDrift Record Module
//!
//! This module provides the data structures for representing the rows of a
//! tabular batch. A ZiRecord holds one row as a JSON object mapping column
//! names to values; a batch is an ordered sequence of records.
//!
//! ## Design Principles
//!
//! - **Flexibility**: Rows use `serde_json::Value` so numeric and non-numeric
//!   columns can live side by side without a fixed schema
//! - **Immutability-friendly**: Batches are handed to the detector by shared
//!   reference and never modified by it
//!
//! ## Usage Example
//!
//! ```rust
//! use zidrift::record::ZiRecord;
//! use serde_json::json;
//!
//! let record = ZiRecord::new("0".to_string(), json!({"amount": 120.5, "type": "PAYMENT"}));
//! assert_eq!(record.number("amount"), Some(120.5));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a tabular batch.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ZiRecord {
    /// Optional stable identifier for the row, usually its position in the source.
    pub id: Option<String>,

    /// Row contents. Tabular rows are JSON objects keyed by column name;
    /// any other shape contributes no columns.
    pub payload: Value,
}

impl ZiRecord {
    /// Constructs a record with the given payload and optional identifier.
    #[allow(non_snake_case)]
    pub fn new(id: impl Into<Option<String>>, payload: Value) -> Self {
        ZiRecord {
            id: id.into(),
            payload,
        }
    }

    /// Returns the columns of this row when the payload is an object.
    pub fn columns(&self) -> Option<&Map<String, Value>> {
        self.payload.as_object()
    }

    /// Returns the raw value stored under `column`.
    pub fn field(&self, column: &str) -> Option<&Value> {
        self.columns().and_then(|map| map.get(column))
    }

    /// Returns the value under `column` when it is a JSON number.
    pub fn number(&self, column: &str) -> Option<f64> {
        match self.field(column) {
            Some(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value stored under `column`.
    pub fn field_mut(&mut self, column: &str) -> Option<&mut Value> {
        self.payload.as_object_mut().and_then(|map| map.get_mut(column))
    }
}

/// Convenience alias for working on batches of records.
pub type ZiRecordBatch = Vec<ZiRecord>;
