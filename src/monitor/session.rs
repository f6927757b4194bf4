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

use crate::config::ZiMonitorConfig;
use crate::drift::detector::ZiDriftDetector;
use crate::drift::profile::ZiReferenceProfile;
use crate::drift::report::{ZiDriftReport, ZiNarrativeRequest};
use crate::errors::{Result, ZiError};
use crate::explain::{ZiExplainer, ZiTextStream};
use crate::ingest::source::{ZiBatch, ZiBatchPoll, ZiBatchSource};
use crate::monitor::state::ZiMonitorState;

/// Outcome of processing one batch.
#[derive(Clone, Debug, PartialEq)]
pub enum ZiBatchOutcome {
    Checked {
        batch_index: usize,
        report: ZiDriftReport,
    },
    /// The source is exhausted; nothing was checked and the state is unchanged.
    EndOfStream,
}

/// Drives one monitoring loop: pulls batches from a source, scores them with
/// its detector, and records the monitored feature into caller-owned state.
pub struct ZiMonitor<S> {
    source: S,
    detector: ZiDriftDetector,
    monitored_feature: String,
}

impl<S: ZiBatchSource> ZiMonitor<S> {
    #[allow(non_snake_case)]
    pub fn new(source: S, config: &ZiMonitorConfig) -> Self {
        Self {
            source,
            detector: ZiDriftDetector::new().with_config(config.detector.clone()),
            monitored_feature: config.monitored_feature.clone(),
        }
    }

    pub fn detector(&self) -> &ZiDriftDetector {
        &self.detector
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn monitored_feature(&self) -> &str {
        &self.monitored_feature
    }

    /// Pulls the first batch from the source, unperturbed, and locks it as the
    /// reference.
    pub fn initialize(&mut self, state: &mut ZiMonitorState) -> Result<&ZiReferenceProfile> {
        match self.source.next_batch(false)? {
            ZiBatchPoll::Batch(batch) => self.lock_reference(state, &batch),
            ZiBatchPoll::EndOfStream => Err(ZiError::validation(format!(
                "source '{}' ended before a reference batch was read",
                self.source.name()
            ))),
        }
    }

    /// Locks `batch` as the reference. Perturbed batches are rejected.
    pub fn lock_reference(
        &mut self,
        state: &mut ZiMonitorState,
        batch: &ZiBatch,
    ) -> Result<&ZiReferenceProfile> {
        if batch.perturbed {
            log::warn!(
                "Refusing to lock perturbed batch {} as reference",
                batch.index
            );
            return Err(ZiError::validation(
                "a perturbed batch cannot be used as the reference",
            ));
        }

        let profile = self.detector.establish_reference(&batch.records);
        state.reference_locked = true;
        Ok(profile)
    }

    /// Pulls the next batch and checks it for drift.
    ///
    /// `state` changes only when the monitored feature is part of the report:
    /// the report flag is cleared, its result becomes the last result and a
    /// history point is appended. End of stream and a missing feature leave
    /// `state` untouched.
    pub fn process_next_batch(
        &mut self,
        state: &mut ZiMonitorState,
        inject_perturbation: bool,
    ) -> Result<ZiBatchOutcome> {
        if !self.detector.has_reference() {
            return Err(ZiError::UninitializedReference);
        }

        let batch = match self.source.next_batch(inject_perturbation)? {
            ZiBatchPoll::Batch(batch) => batch,
            ZiBatchPoll::EndOfStream => {
                log::info!("End of data stream; no batch checked");
                return Ok(ZiBatchOutcome::EndOfStream);
            }
        };

        let report = self.detector.detect_drift(&batch.records)?;

        match report.get(&self.monitored_feature) {
            Some(drift) => {
                state.show_report = false;
                let entry = state.record(*drift, batch.len());
                log::info!(
                    "[{}] batch {} KS-Stat: {} | Status: {}",
                    self.monitored_feature,
                    entry.batch_index,
                    entry.ks_statistic,
                    entry.status.as_str()
                );
            }
            None => log::warn!(
                "Monitored feature '{}' missing from drift report of batch {}",
                self.monitored_feature,
                batch.index
            ),
        }

        Ok(ZiBatchOutcome::Checked {
            batch_index: batch.index,
            report,
        })
    }

    /// Asks for the narrative report of the last result. Only drifting results
    /// get one; returns whether the flag was set.
    pub fn request_report(&self, state: &mut ZiMonitorState) -> bool {
        state.show_report = state
            .last_result
            .as_ref()
            .is_some_and(|drift| drift.is_drifting);
        state.show_report
    }

    /// Explains the last result of the monitored feature, if any.
    pub fn explain_last(
        &self,
        state: &ZiMonitorState,
        explainer: &dyn ZiExplainer,
    ) -> Option<ZiTextStream> {
        let drift = state.last_result.as_ref()?;
        let request = ZiNarrativeRequest::from_feature(self.monitored_feature.clone(), drift);
        Some(explainer.explain(&request))
    }
}
