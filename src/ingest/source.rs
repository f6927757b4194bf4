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

use serde_json::{Number, Value};

use crate::errors::Result;
use crate::record::ZiRecordBatch;

/// A batch handed out by a source.
#[derive(Clone, Debug, PartialEq)]
pub struct ZiBatch {
    /// 1-based position of the batch in its source.
    pub index: usize,
    pub records: ZiRecordBatch,
    /// Whether drift was injected into this batch.
    pub perturbed: bool,
}

impl ZiBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Result of polling a source. End of stream is terminal, not an error.
#[derive(Clone, Debug, PartialEq)]
pub enum ZiBatchPoll {
    Batch(ZiBatch),
    EndOfStream,
}

impl ZiBatchPoll {
    pub fn into_batch(self) -> Option<ZiBatch> {
        match self {
            ZiBatchPoll::Batch(batch) => Some(batch),
            ZiBatchPoll::EndOfStream => None,
        }
    }

    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ZiBatchPoll::EndOfStream)
    }
}

/// Hands out fixed-size batches on demand.
pub trait ZiBatchSource {
    /// Returns the next batch, scaled by the source's perturbation when
    /// `inject_perturbation` is set, or `EndOfStream` once exhausted.
    fn next_batch(&mut self, inject_perturbation: bool) -> Result<ZiBatchPoll>;

    fn name(&self) -> &str;
}

impl<S: ZiBatchSource + ?Sized> ZiBatchSource for Box<S> {
    fn next_batch(&mut self, inject_perturbation: bool) -> Result<ZiBatchPoll> {
        (**self).next_batch(inject_perturbation)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Test hook that scales one numeric column to synthesize drift.
#[derive(Clone, Debug, PartialEq)]
pub struct ZiPerturbation {
    pub field: String,
    pub factor: f64,
}

impl Default for ZiPerturbation {
    fn default() -> Self {
        Self {
            field: "amount".to_string(),
            factor: 1.5,
        }
    }
}

impl ZiPerturbation {
    #[allow(non_snake_case)]
    pub fn new(field: impl Into<String>, factor: f64) -> Self {
        Self {
            field: field.into(),
            factor,
        }
    }

    /// Multiplies every numeric value of the field in place. Non-numeric and
    /// missing values are left alone. Returns the number of values scaled.
    pub fn apply(&self, records: &mut ZiRecordBatch) -> usize {
        let mut scaled = 0;
        for record in records.iter_mut() {
            let Some(value) = record.field_mut(&self.field) else {
                continue;
            };
            let Some(current) = value.as_f64() else {
                continue;
            };
            if let Some(number) = Number::from_f64(current * self.factor) {
                *value = Value::Number(number);
                scaled += 1;
            }
        }
        scaled
    }
}
