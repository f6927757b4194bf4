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

use crate::config::ZiDetectorConfig;
use crate::drift::profile::{ZiColumnProfile, ZiReferenceProfile};
use crate::drift::report::{ZiDriftReport, ZiFeatureDrift};
use crate::errors::{Result, ZiError};
use crate::inspect::columns::ZiNumericColumns;
use crate::inspect::ks::ks_two_sample;
use crate::inspect::statistics::ZiColumnStats;
use crate::record::ZiRecord;

/// Scores batches against a locked reference profile.
///
/// Each numeric column is checked with two independent tests: a mean shift
/// expressed in reference standard deviations, and a two-sample KS test of
/// the full value distributions. A column drifts when either test crosses its
/// threshold.
#[derive(Clone, Debug, Default)]
pub struct ZiDriftDetector {
    config: ZiDetectorConfig,
    reference: Option<ZiReferenceProfile>,
}

impl ZiDriftDetector {
    #[allow(non_snake_case)]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(non_snake_case)]
    pub fn with_config(mut self, config: ZiDetectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ZiDetectorConfig {
        &self.config
    }

    /// Locks the numeric columns of `batch` as the new reference, replacing any
    /// previous one. A batch without numeric columns yields an empty profile.
    pub fn establish_reference(&mut self, batch: &[ZiRecord]) -> &ZiReferenceProfile {
        let columns = ZiNumericColumns::select(batch);
        let profile = ZiReferenceProfile::build(columns, batch.len());

        log::info!(
            "Reference locked with {} numerical features over {} rows",
            profile.len(),
            profile.rows()
        );

        self.reference.insert(profile)
    }

    pub fn reference(&self) -> Option<&ZiReferenceProfile> {
        self.reference.as_ref()
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Compares the numeric columns of `batch` against the reference. Columns
    /// without a reference counterpart are skipped.
    pub fn detect_drift(&self, batch: &[ZiRecord]) -> Result<ZiDriftReport> {
        let reference = self
            .reference
            .as_ref()
            .ok_or(ZiError::UninitializedReference)?;

        let current = ZiNumericColumns::select(batch);
        let pairs: Vec<(&str, &ZiColumnProfile, &[f64], &[f64])> = current
            .iter()
            .filter_map(|(name, values)| {
                let profile = reference.column(name)?;
                let ref_values = reference.values(name)?;
                Some((name, profile, ref_values, values))
            })
            .collect();

        #[cfg(feature = "parallel")]
        let scored: Vec<(&str, ZiFeatureDrift)> = {
            use rayon::prelude::*;
            pairs
                .par_iter()
                .map(|(name, profile, ref_values, values)| {
                    (*name, self.score_column(profile, ref_values, values))
                })
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let scored: Vec<(&str, ZiFeatureDrift)> = pairs
            .iter()
            .map(|(name, profile, ref_values, values)| {
                (*name, self.score_column(profile, ref_values, values))
            })
            .collect();

        let mut report = ZiDriftReport::new();
        for (name, drift) in scored {
            log::debug!(
                "Column '{}': z={:.4} ks={:.4} p={:.4} drifting={}",
                name,
                drift.z_score,
                drift.ks_statistic,
                drift.p_value,
                drift.is_drifting
            );
            report.insert(name, drift.rounded(self.config.precision));
        }

        log::info!(
            "Drift check over {} rows: {} of {} features drifting",
            batch.len(),
            report.drifting_features().len(),
            report.len()
        );

        Ok(report)
    }

    fn score_column(
        &self,
        profile: &ZiColumnProfile,
        reference: &[f64],
        current: &[f64],
    ) -> ZiFeatureDrift {
        let std = if profile.std > 0.0 {
            profile.std
        } else {
            self.config.std_floor
        };
        let z_score = (ZiColumnStats::compute(current).mean - profile.mean).abs() / std;

        let ks = ks_two_sample(reference, current);

        let is_drifting =
            z_score > self.config.z_threshold || ks.statistic > self.config.ks_threshold;

        ZiFeatureDrift {
            z_score,
            ks_statistic: ks.statistic,
            p_value: ks.p_value,
            is_drifting,
        }
    }
}
