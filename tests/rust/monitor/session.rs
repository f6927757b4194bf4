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

//! # ZiDrift Monitor Tests - Session
//!
//! This module contains tests for the monitoring loop and the caller-owned
//! monitor state.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test monitor
//! ```

use serde_json::json;
use zidrift::{
    ZiBatchOutcome, ZiBatchPoll, ZiBatchSource, ZiDriftMetrics, ZiDriftStatus, ZiError,
    ZiFnExplainer, ZiMemorySource, ZiMonitor, ZiMonitorConfig, ZiMonitorState,
    ZiNarrativeRequest, ZiRecord, ZiSyntheticConfig, ZiSyntheticSource,
};

fn amounts(values: &[f64]) -> Vec<ZiRecord> {
    values
        .iter()
        .map(|v| ZiRecord::new(None, json!({"amount": v, "type": "PAYMENT"})))
        .collect()
}

fn base_batch() -> Vec<ZiRecord> {
    amounts(&(1..=40).map(|i| 100.0 + i as f64).collect::<Vec<_>>())
}

fn memory_monitor(batches: Vec<Vec<ZiRecord>>) -> ZiMonitor<ZiMemorySource> {
    ZiMonitor::new(ZiMemorySource::new(batches), &ZiMonitorConfig::default())
}

/// Tests a full pass: reference, a clean batch, an injected batch, then the end.
#[test]
fn monitor_records_history_per_batch() {
    let mut state = ZiMonitorState::new();
    let mut monitor = memory_monitor(vec![base_batch(), base_batch(), base_batch()]);

    let profile = monitor.initialize(&mut state).unwrap();
    assert!(profile.column("amount").is_some());
    assert!(state.reference_locked);
    assert!(state.drift_history.is_empty());

    let clean = monitor.process_next_batch(&mut state, false).unwrap();
    assert!(matches!(clean, ZiBatchOutcome::Checked { batch_index: 2, .. }));
    assert_eq!(state.last_status(), Some(ZiDriftStatus::Ok));

    monitor.process_next_batch(&mut state, true).unwrap();
    assert_eq!(state.last_status(), Some(ZiDriftStatus::Drift));
    assert_eq!(state.last_batch_size, Some(40));

    let statuses: Vec<_> = state.drift_history.iter().map(|e| e.status).collect();
    assert_eq!(statuses, vec![ZiDriftStatus::Ok, ZiDriftStatus::Drift]);
    assert_eq!(state.ks_series().iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(state.drift_history[0].ks_statistic, 0.0);
}

/// Tests that reaching the end of the stream changes nothing in the state.
#[test]
fn end_of_stream_leaves_state_untouched() {
    let mut state = ZiMonitorState::new();
    let mut monitor = memory_monitor(vec![base_batch(), base_batch()]);
    monitor.initialize(&mut state).unwrap();
    monitor.process_next_batch(&mut state, true).unwrap();
    assert!(monitor.request_report(&mut state));

    let before = state.clone();
    let outcome = monitor.process_next_batch(&mut state, false).unwrap();
    assert_eq!(outcome, ZiBatchOutcome::EndOfStream);
    assert_eq!(state, before);

    assert_eq!(monitor.process_next_batch(&mut state, false).unwrap(), ZiBatchOutcome::EndOfStream);
    assert_eq!(state.drift_history.len(), 1);
}

/// Tests that checking a batch before the reference is locked fails.
#[test]
fn processing_before_initialize_fails() {
    let mut state = ZiMonitorState::new();
    let mut monitor = memory_monitor(vec![base_batch()]);

    let err = monitor.process_next_batch(&mut state, false).unwrap_err();
    assert_eq!(err, ZiError::UninitializedReference);
    assert_eq!(state, ZiMonitorState::new());
    assert_eq!(monitor.source().remaining(), 1);
}

/// Tests that an empty source cannot provide a reference.
#[test]
fn initialize_on_empty_source_fails() {
    let mut state = ZiMonitorState::new();
    let mut monitor = memory_monitor(Vec::new());

    let err = monitor.initialize(&mut state).unwrap_err();
    assert!(matches!(err, ZiError::Validation { .. }));
    assert!(!state.reference_locked);
    assert!(!monitor.detector().has_reference());
}

/// Tests that a perturbed batch is refused as the reference.
#[test]
fn perturbed_reference_is_rejected() {
    let mut state = ZiMonitorState::new();
    let mut source = ZiMemorySource::new(vec![base_batch()]);
    let batch = match source.next_batch(true).unwrap() {
        ZiBatchPoll::Batch(batch) => batch,
        ZiBatchPoll::EndOfStream => panic!("expected a batch"),
    };

    let mut monitor = ZiMonitor::new(source, &ZiMonitorConfig::default());
    let err = monitor.lock_reference(&mut state, &batch).unwrap_err();
    assert!(matches!(err, ZiError::Validation { .. }));
    assert!(!state.reference_locked);
    assert!(!monitor.detector().has_reference());
}

/// Tests that a batch without the monitored feature leaves the whole state
/// alone, including a pending report request.
#[test]
fn missing_monitored_feature_keeps_state() {
    let mut state = ZiMonitorState::new();
    let mut monitor = memory_monitor(vec![
        base_batch(),
        base_batch(),
        vec![ZiRecord::new(None, json!({"step": 3}))],
    ]);
    monitor.initialize(&mut state).unwrap();
    monitor.process_next_batch(&mut state, true).unwrap();
    assert!(monitor.request_report(&mut state));

    let before = state.clone();
    match monitor.process_next_batch(&mut state, false).unwrap() {
        ZiBatchOutcome::Checked { report, .. } => assert!(report.is_empty()),
        ZiBatchOutcome::EndOfStream => panic!("expected a checked batch"),
    }
    assert_eq!(state, before);
    assert!(state.show_report);
    assert_eq!(state.drift_history.len(), 1);
}

/// Tests that only drifting results get a narrative report, and that the next
/// checked batch clears the request.
#[test]
fn report_request_follows_last_result() {
    let mut state = ZiMonitorState::new();
    let mut monitor = memory_monitor(vec![base_batch(), base_batch(), base_batch(), base_batch()]);
    assert!(!monitor.request_report(&mut state));

    monitor.initialize(&mut state).unwrap();
    monitor.process_next_batch(&mut state, false).unwrap();
    assert!(!monitor.request_report(&mut state));
    assert!(!state.show_report);

    monitor.process_next_batch(&mut state, true).unwrap();
    assert!(monitor.request_report(&mut state));
    assert!(state.show_report);

    monitor.process_next_batch(&mut state, false).unwrap();
    assert!(!state.show_report);
}

/// Tests that the last result is handed to the explainer under the monitored
/// feature's name.
#[test]
fn explain_last_uses_monitored_feature() {
    let mut state = ZiMonitorState::new();
    let mut monitor = memory_monitor(vec![base_batch(), base_batch()]);
    let explainer = ZiFnExplainer::new(|request: &ZiNarrativeRequest| {
        Ok(format!("{}:{}", request.feature, request.is_drifting))
    });

    assert!(monitor.explain_last(&state, &explainer).is_none());

    monitor.initialize(&mut state).unwrap();
    monitor.process_next_batch(&mut state, true).unwrap();
    let text: String = monitor.explain_last(&state, &explainer).unwrap().collect();
    assert_eq!(text, "amount:true");
}

/// Tests a synthetic stream: clean batches stay healthy, injected ones drift.
#[test]
fn synthetic_stream_flags_injected_batches() {
    let source = ZiSyntheticSource::new(ZiSyntheticConfig {
        batches: 5,
        rows: 2_000,
        seed: Some(42),
        ..Default::default()
    });
    let mut state = ZiMonitorState::new();
    let mut monitor = ZiMonitor::new(source, &ZiMonitorConfig::default());
    monitor.initialize(&mut state).unwrap();

    for inject in [false, true, false, true] {
        monitor.process_next_batch(&mut state, inject).unwrap();
    }
    assert_eq!(monitor.process_next_batch(&mut state, false).unwrap(), ZiBatchOutcome::EndOfStream);

    let statuses: Vec<_> = state.drift_history.iter().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![ZiDriftStatus::Ok, ZiDriftStatus::Drift, ZiDriftStatus::Ok, ZiDriftStatus::Drift]
    );

    let metrics = ZiDriftMetrics::compute(&state.drift_history);
    assert_eq!(metrics.batches_checked, 4);
    assert_eq!(metrics.drifting_batches, 2);
    assert_eq!(metrics.last_status, Some(ZiDriftStatus::Drift));
}

/// Tests that the monitored feature comes from the config.
#[test]
fn monitored_feature_is_configurable() {
    let config = ZiMonitorConfig::from_yaml_str("monitored_feature: oldbalanceOrg\n").unwrap();
    let mut state = ZiMonitorState::new();
    let batches = vec![
        vec![ZiRecord::new(None, json!({"oldbalanceOrg": 10.0, "amount": 1.0}))],
        vec![ZiRecord::new(None, json!({"oldbalanceOrg": 10.0, "amount": 1.0}))],
    ];
    let mut monitor = ZiMonitor::new(ZiMemorySource::new(batches), &config);
    assert_eq!(monitor.monitored_feature(), "oldbalanceOrg");

    monitor.initialize(&mut state).unwrap();
    monitor.process_next_batch(&mut state, true).unwrap();
    assert_eq!(state.drift_history.len(), 1);
    assert_eq!(state.last_status(), Some(ZiDriftStatus::Ok));
}
