// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Baseline vs. variant comparison.

use serde::{Deserialize, Serialize};

use crate::metrics::Summary;

/// Relative performance of a variant against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// baseline.mean / variant.mean; above 1 means the variant is faster
    pub speedup: f64,
    /// Percentage change in throughput relative to the baseline
    pub throughput_gain_percent: f64,
    /// baseline.mean - variant.mean in milliseconds; negative on regression
    pub time_saved_ms: f64,
}

impl Comparison {
    /// True when the variant was slower than the baseline.
    pub fn is_regression(&self) -> bool {
        self.time_saved_ms < 0.0
    }
}

/// Compare `variant` against `baseline`.
///
/// Argument order matters: the baseline is always the denominator.
pub fn compare(baseline: &Summary, variant: &Summary) -> Comparison {
    Comparison {
        speedup: baseline.mean() / variant.mean(),
        throughput_gain_percent: (variant.throughput_mbps() / baseline.throughput_mbps() - 1.0)
            * 100.0,
        time_saved_ms: baseline.mean() - variant.mean(),
    }
}
