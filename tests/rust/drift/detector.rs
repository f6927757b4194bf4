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

//! # ZiDrift Drift Tests - Detector
//!
//! This module contains tests for reference locking and drift classification
//! in the ZiDrift detector.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test detector
//! ```

use serde_json::{json, Value};
use zidrift::{ZiDetectorConfig, ZiDriftDetector, ZiError, ZiRecord};

fn column(name: &str, values: &[f64]) -> Vec<ZiRecord> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| ZiRecord::new(Some(i.to_string()), json!({ name: v })))
        .collect()
}

fn rows(values: Vec<Value>) -> Vec<ZiRecord> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| ZiRecord::new(Some(i.to_string()), v))
        .collect()
}

/// Tests that an identical batch scores zero on both tests.
#[test]
fn identical_constant_batch_is_healthy() {
    let reference = column("amount", &[10.0, 10.0, 10.0, 10.0, 10.0]);
    let mut detector = ZiDriftDetector::new();
    detector.establish_reference(&reference);

    let report = detector.detect_drift(&reference).unwrap();
    let amount = report.get("amount").unwrap();
    assert_eq!(amount.z_score, 0.0);
    assert_eq!(amount.ks_statistic, 0.0);
    assert_eq!(amount.p_value, 1.0);
    assert!(!amount.is_drifting);
}

/// Tests that a mean shift of six reference standard deviations is flagged.
#[test]
fn mean_shift_is_flagged() {
    let mut detector = ZiDriftDetector::new();
    let profile = detector.establish_reference(&column("amount", &[90.0, 100.0, 110.0]));
    let stats = profile.column("amount").unwrap();
    assert_eq!(stats.mean, 100.0);
    assert_eq!(stats.std, 10.0);

    let report = detector
        .detect_drift(&column("amount", &[150.0, 160.0, 170.0]))
        .unwrap();
    let amount = report.get("amount").unwrap();
    assert_eq!(amount.z_score, 6.0);
    assert_eq!(amount.ks_statistic, 1.0);
    assert!(amount.is_drifting);
}

/// Tests that checking drift without a reference fails.
#[test]
fn detect_without_reference_fails() {
    let detector = ZiDriftDetector::new();
    let err = detector.detect_drift(&column("amount", &[1.0])).unwrap_err();
    assert_eq!(err, ZiError::UninitializedReference);
}

/// Tests that a reference without numeric columns yields empty reports.
#[test]
fn reference_without_numeric_columns_reports_nothing() {
    let mut detector = ZiDriftDetector::new();
    let profile = detector.establish_reference(&rows(vec![
        json!({"type": "PAYMENT", "nameOrig": "C1"}),
        json!({"type": "TRANSFER", "nameOrig": "C2"}),
    ]));
    assert!(profile.is_empty());

    let report = detector
        .detect_drift(&column("amount", &[1.0, 2.0, 3.0]))
        .unwrap();
    assert!(report.is_empty());
}

/// Tests that an empty reference batch is accepted.
#[test]
fn empty_reference_batch_is_not_an_error() {
    let mut detector = ZiDriftDetector::new();
    assert!(detector.establish_reference(&[]).is_empty());
    assert!(detector.has_reference());
    assert!(detector.detect_drift(&[]).unwrap().is_empty());
}

/// Tests that columns without a reference basis are skipped and non-numeric
/// columns are never scored.
#[test]
fn only_shared_numeric_columns_are_scored() {
    let mut detector = ZiDriftDetector::new();
    detector.establish_reference(&rows(vec![
        json!({"amount": 1.0, "step": 1, "type": "PAYMENT"}),
        json!({"amount": 2.0, "step": 1, "type": "DEBIT"}),
    ]));

    let report = detector
        .detect_drift(&rows(vec![
            json!({"amount": 1.0, "newbalanceDest": 5.0, "type": "PAYMENT"}),
            json!({"amount": 2.0, "newbalanceDest": 7.0, "type": "CASH_IN"}),
        ]))
        .unwrap();

    assert_eq!(report.iter().map(|(name, _)| name).collect::<Vec<_>>(), vec!["amount"]);
}

/// Tests that the profile records mean, std, min and max per column.
#[test]
fn profile_records_summary_statistics() {
    let mut detector = ZiDriftDetector::new();
    let profile = detector.establish_reference(&rows(vec![
        json!({"amount": 2.0, "oldbalanceOrg": 100}),
        json!({"amount": 4.0, "oldbalanceOrg": 300}),
        json!({"amount": 9.0, "oldbalanceOrg": null}),
    ]));

    let amount = profile.column("amount").unwrap();
    assert_eq!(amount.mean, 5.0);
    assert_eq!(amount.min, 2.0);
    assert_eq!(amount.max, 9.0);
    assert!((amount.std - 13.0_f64.sqrt()).abs() < 1e-12);

    let balance = profile.column("oldbalanceOrg").unwrap();
    assert_eq!(balance.mean, 200.0);
    assert_eq!(profile.values("oldbalanceOrg"), Some(&[100.0, 300.0][..]));
    assert_eq!(profile.rows(), 3);
}

/// Tests that the profile owns its values: changing the batch afterwards does
/// not change later checks.
#[test]
fn profile_is_independent_of_source_batch() {
    let mut batch = column("amount", &[1.0, 2.0, 3.0, 4.0]);
    let mut detector = ZiDriftDetector::new();
    detector.establish_reference(&batch);

    for record in batch.iter_mut() {
        *record.field_mut("amount").unwrap() = json!(1000.0);
    }

    let report = detector
        .detect_drift(&column("amount", &[1.0, 2.0, 3.0, 4.0]))
        .unwrap();
    assert_eq!(report.get("amount").unwrap().ks_statistic, 0.0);
}

/// Tests that establishing a new reference replaces the old one wholesale.
#[test]
fn new_reference_replaces_previous() {
    let mut detector = ZiDriftDetector::new();
    detector.establish_reference(&rows(vec![json!({"amount": 1.0, "step": 1})]));
    detector.establish_reference(&column("amount", &[50.0, 60.0]));

    let reference = detector.reference().unwrap();
    assert_eq!(reference.feature_names().collect::<Vec<_>>(), vec!["amount"]);
    assert!(!detector
        .detect_drift(&column("amount", &[50.0, 60.0]))
        .unwrap()
        .any_drifting());
}

/// Tests that a shape change with an unchanged mean is caught by the KS test.
#[test]
fn bimodal_split_with_same_mean_is_flagged() {
    let reference: Vec<f64> = (0..200).map(|i| -1.0 + i as f64 / 100.0).collect();
    let split: Vec<f64> = (0..200).map(|i| if i % 2 == 0 { -1.0 } else { 0.99 }).collect();

    let mut detector = ZiDriftDetector::new();
    detector.establish_reference(&column("amount", &reference));
    let report = detector.detect_drift(&column("amount", &split)).unwrap();
    let amount = report.get("amount").unwrap();

    assert!(amount.z_score < 0.5);
    assert!(amount.ks_statistic > 0.1);
    assert!(amount.p_value < 0.05);
    assert!(amount.is_drifting);
}

/// Tests that a mean shift driven by a single outlier is caught by the z-score
/// alone.
#[test]
fn outlier_mean_shift_is_flagged_by_z_score() {
    let mut reference = vec![0.0; 99];
    reference.push(1000.0);
    let mut current = vec![0.0; 99];
    current.push(8000.0);

    let mut detector = ZiDriftDetector::new();
    detector.establish_reference(&column("amount", &reference));
    let report = detector.detect_drift(&column("amount", &current)).unwrap();
    let amount = report.get("amount").unwrap();

    assert!(amount.ks_statistic <= 0.1);
    assert!(amount.z_score > 0.5);
    assert!(amount.is_drifting);
}

/// Tests that zero reference variance uses the std floor instead of dividing by zero.
#[test]
fn zero_variance_reference_uses_floor() {
    let mut detector = ZiDriftDetector::new();
    detector.establish_reference(&column("amount", &[5.0, 5.0, 5.0]));

    let report = detector
        .detect_drift(&column("amount", &[5.0, 5.0, 5.000001]))
        .unwrap();
    let amount = report.get("amount").unwrap();
    assert!(amount.z_score.is_finite());
    assert!(amount.z_score > 0.3 && amount.z_score < 0.4);
}

/// Tests that reported scores are rounded to four decimals while the
/// classification uses the exact values.
#[test]
fn scores_are_rounded_but_classification_is_exact() {
    let mut detector = ZiDriftDetector::new();
    detector.establish_reference(&column("amount", &[90.0, 100.0, 110.0]));

    // mean shift of 5.00004 -> z = 0.500004, rounds to 0.5
    let report = detector
        .detect_drift(&column("amount", &[95.00004, 105.00004, 115.00004]))
        .unwrap();
    let amount = report.get("amount").unwrap();
    assert_eq!(amount.z_score, 0.5);
    assert!(amount.is_drifting);

    for (_, drift) in report.iter() {
        for value in [drift.z_score, drift.ks_statistic, drift.p_value] {
            assert_eq!(value, (value * 1e4).round() / 1e4);
        }
    }
}

/// Tests that custom thresholds change the classification.
#[test]
fn thresholds_are_configurable() {
    let config = ZiDetectorConfig {
        z_threshold: 10.0,
        ks_threshold: 1.0,
        ..Default::default()
    };
    let mut detector = ZiDriftDetector::new().with_config(config);
    detector.establish_reference(&column("amount", &[90.0, 100.0, 110.0]));

    let report = detector
        .detect_drift(&column("amount", &[150.0, 160.0, 170.0]))
        .unwrap();
    assert!(!report.get("amount").unwrap().is_drifting);
}

/// Tests that repeated checks of the same batch give identical reports.
#[test]
fn detect_drift_is_idempotent() {
    let mut detector = ZiDriftDetector::new();
    detector.establish_reference(&rows(vec![
        json!({"amount": 1.0, "step": 3}),
        json!({"amount": 7.5, "step": 4}),
        json!({"amount": 3.25, "step": 9}),
    ]));
    let batch = rows(vec![
        json!({"amount": 2.0, "step": 1}),
        json!({"amount": 8.0, "step": 2}),
    ]);

    assert_eq!(detector.detect_drift(&batch).unwrap(), detector.detect_drift(&batch).unwrap());
}

/// Tests that a constant column with an inexact decimal value compared to
/// itself does not drift.
#[test]
fn constant_decimal_column_is_healthy() {
    let batch = column("fee", &[0.1; 1000]);
    let mut detector = ZiDriftDetector::new();
    detector.establish_reference(&batch);

    let fee = *detector.detect_drift(&batch).unwrap().get("fee").unwrap();
    assert_eq!(fee.z_score, 0.0);
    assert!(!fee.is_drifting);
}
