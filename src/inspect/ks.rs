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

//! Two-sample Kolmogorov–Smirnov test.
//!
//! The statistic is the largest gap between the empirical CDFs of the two
//! samples. The two-sided p-value is computed exactly by lattice-path counting
//! for small samples and from the asymptotic Kolmogorov distribution otherwise.

use serde::{Deserialize, Serialize};

/// Largest sample size for which the p-value is computed exactly.
pub const EXACT_MAX_SIZE: u64 = 10_000;

/// Outcome of a two-sample KS test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiKsTest {
    /// Maximum absolute ECDF difference, in `[0, 1]`.
    pub statistic: f64,
    /// Two-sided significance under the same-distribution null, in `[0, 1]`.
    pub p_value: f64,
}

impl ZiKsTest {
    fn identical() -> Self {
        Self {
            statistic: 0.0,
            p_value: 1.0,
        }
    }
}

/// Runs the two-sample KS test. An empty sample yields `D = 0, p = 1`.
pub fn ks_two_sample(reference: &[f64], current: &[f64]) -> ZiKsTest {
    if reference.is_empty() || current.is_empty() {
        return ZiKsTest::identical();
    }

    let n = reference.len() as u64;
    let m = current.len() as u64;
    let gap = max_ecdf_gap(reference, current);
    if gap == 0 {
        return ZiKsTest::identical();
    }

    let statistic = (gap as f64 / (n * m) as f64).clamp(0.0, 1.0);
    let p_value = if n.max(m) <= EXACT_MAX_SIZE {
        exact_p_value(n, m, gap)
    } else {
        asymptotic_p_value(n, m, statistic)
    };

    ZiKsTest {
        statistic,
        p_value: p_value.clamp(0.0, 1.0),
    }
}

/// Returns `max |i * m - j * n|` over the merged walk of both sorted samples,
/// i.e. the KS statistic scaled by `n * m`. Equal values are consumed from both
/// samples before the gap is measured.
fn max_ecdf_gap(a: &[f64], b: &[f64]) -> u64 {
    let a = sorted(a);
    let b = sorted(b);
    let (n, m) = (a.len(), b.len());
    let (mut i, mut j) = (0usize, 0usize);
    let mut best = 0u64;

    while i < n && j < m {
        let x = a[i].min(b[j]);
        while i < n && a[i] <= x {
            i += 1;
        }
        while j < m && b[j] <= x {
            j += 1;
        }
        let gap = (i as u64 * m as u64).abs_diff(j as u64 * n as u64);
        best = best.max(gap);
    }

    best
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// `P(D >= d)` for a uniformly random monotone lattice path from `(0, 0)` to
/// `(n, m)`: the probability that it leaves the band `|i * m - j * n| < gap`.
///
/// From `(i, j)` the path steps to `(i + 1, j)` with probability
/// `(n - i) / (n - i + m - j)`. Only cells inside the band carry mass, and the
/// mass of every step that leaves the band is summed directly, so small
/// p-values keep their precision.
fn exact_p_value(n: u64, m: u64, gap: u64) -> f64 {
    let inside = |i: u64, j: u64| (i * m).abs_diff(j * n) < gap;
    let mut row = vec![0.0f64; m as usize + 1];
    let mut next = vec![0.0f64; m as usize + 1];
    let mut escaped = 0.0f64;
    row[0] = 1.0;

    for i in 0..=n {
        let centre = i * m;
        let lo = if centre < gap { 0 } else { (centre - gap) / n + 1 };
        let hi = ((centre + gap - 1) / n).min(m);
        if lo > hi {
            break;
        }

        for j in lo..=hi {
            let mass = row[j as usize];
            if mass == 0.0 {
                continue;
            }
            let remaining = ((n - i) + (m - j)) as f64;
            if i < n {
                let step = mass * (n - i) as f64 / remaining;
                if inside(i + 1, j) {
                    next[j as usize] += step;
                } else {
                    escaped += step;
                }
            }
            if j < m {
                let step = mass * (m - j) as f64 / remaining;
                if inside(i, j + 1) {
                    row[j as usize + 1] += step;
                } else {
                    escaped += step;
                }
            }
        }

        row[lo as usize..=hi as usize].fill(0.0);
        std::mem::swap(&mut row, &mut next);
    }

    escaped
}

fn asymptotic_p_value(n: u64, m: u64, statistic: f64) -> f64 {
    let en = ((n * m) as f64 / (n + m) as f64).sqrt();
    let lambda = (en + 0.12 + 0.11 / en) * statistic;
    kolmogorov_sf(lambda)
}

/// Survival function of the Kolmogorov distribution,
/// `Q(λ) = 2 Σ (-1)^(k-1) exp(-2 k² λ²)`.
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    // Q(λ) == 1.0 in f64 below 0.2; the series converges too slowly there.
    if lambda < 0.2 {
        return 1.0;
    }
    let mut sum = 0.0;
    for k in 1..=100 {
        let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
        let term = sign * (-2.0 * f64::from(k).powi(2) * lambda.powi(2)).exp();
        sum += term;
        if term.abs() < 1e-12 {
            break;
        }
    }
    (2.0 * sum).clamp(0.0, 1.0)
}
