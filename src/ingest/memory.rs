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

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use crate::errors::Result;
use crate::ingest::source::{ZiBatch, ZiBatchPoll, ZiBatchSource, ZiPerturbation};
use crate::record::{ZiRecord, ZiRecordBatch};

/// Batch source over batches already held in memory.
#[derive(Clone, Debug, Default)]
pub struct ZiMemorySource {
    pending: VecDeque<ZiRecordBatch>,
    perturbation: ZiPerturbation,
    served: usize,
}

impl ZiMemorySource {
    #[allow(non_snake_case)]
    pub fn new(batches: impl IntoIterator<Item = ZiRecordBatch>) -> Self {
        Self {
            pending: batches.into_iter().collect(),
            perturbation: ZiPerturbation::default(),
            served: 0,
        }
    }

    #[allow(non_snake_case)]
    pub fn with_perturbation(mut self, perturbation: ZiPerturbation) -> Self {
        self.perturbation = perturbation;
        self
    }

    /// Number of batches not yet handed out.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl ZiBatchSource for ZiMemorySource {
    fn next_batch(&mut self, inject_perturbation: bool) -> Result<ZiBatchPoll> {
        let Some(mut records) = self.pending.pop_front() else {
            return Ok(ZiBatchPoll::EndOfStream);
        };
        if inject_perturbation {
            self.perturbation.apply(&mut records);
        }
        self.served += 1;
        Ok(ZiBatchPoll::Batch(ZiBatch {
            index: self.served,
            records,
            perturbed: inject_perturbation,
        }))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Shape of the transactions produced by [`ZiSyntheticSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct ZiSyntheticConfig {
    pub batches: usize,
    pub rows: usize,
    pub amount_center: f64,
    pub amount_spread: f64,
    pub seed: Option<u64>,
}

impl Default for ZiSyntheticConfig {
    fn default() -> Self {
        Self {
            batches: 10,
            rows: 1_000,
            amount_center: 1_000.0,
            amount_spread: 200.0,
            seed: None,
        }
    }
}

const TRANSACTION_TYPES: [&str; 5] = ["PAYMENT", "TRANSFER", "CASH_OUT", "DEBIT", "CASH_IN"];

/// Generates batches of random payment transactions with a stable
/// distribution, for simulations and tests.
#[derive(Debug)]
pub struct ZiSyntheticSource {
    config: ZiSyntheticConfig,
    perturbation: ZiPerturbation,
    rng: rand::rngs::StdRng,
    served: usize,
}

impl ZiSyntheticSource {
    #[allow(non_snake_case)]
    pub fn new(config: ZiSyntheticConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };
        Self {
            config,
            perturbation: ZiPerturbation::default(),
            rng,
            served: 0,
        }
    }

    #[allow(non_snake_case)]
    pub fn with_perturbation(mut self, perturbation: ZiPerturbation) -> Self {
        self.perturbation = perturbation;
        self
    }

    fn generate_record(&mut self, step: usize, row: usize) -> ZiRecord {
        // Irwin-Hall approximation of a normal draw.
        let noise: f64 = (0..4).map(|_| self.rng.gen::<f64>()).sum::<f64>() - 2.0;
        let amount = (self.config.amount_center + noise * self.config.amount_spread).max(0.0);
        let old_balance = self.rng.gen_range(0.0..50_000.0_f64);
        let kind = TRANSACTION_TYPES[self.rng.gen_range(0..TRANSACTION_TYPES.len())];
        let is_fraud = i64::from(self.rng.gen_bool(0.01));

        let payload: Value = json!({
            "step": step,
            "type": kind,
            "amount": (amount * 100.0).round() / 100.0,
            "nameOrig": format!("C{}", self.rng.gen_range(1_000_000_000u64..9_999_999_999u64)),
            "oldbalanceOrg": (old_balance * 100.0).round() / 100.0,
            "isFraud": is_fraud,
        });
        ZiRecord::new(Some(format!("{}", (step - 1) * self.config.rows + row)), payload)
    }
}

impl ZiBatchSource for ZiSyntheticSource {
    fn next_batch(&mut self, inject_perturbation: bool) -> Result<ZiBatchPoll> {
        if self.served >= self.config.batches {
            return Ok(ZiBatchPoll::EndOfStream);
        }
        self.served += 1;
        let step = self.served;

        let mut records: ZiRecordBatch = (0..self.config.rows)
            .map(|row| self.generate_record(step, row))
            .collect();
        if inject_perturbation {
            self.perturbation.apply(&mut records);
        }

        Ok(ZiBatchPoll::Batch(ZiBatch {
            index: step,
            records,
            perturbed: inject_perturbation,
        }))
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
