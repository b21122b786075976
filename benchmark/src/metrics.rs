// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Sample and summary types for benchmark results.
//!
//! Raw trial samples are reduced into [`Statistics`], which the harness wraps
//! into a per-variant [`Summary`]. [`BenchmarkReport`] bundles both summaries
//! and their comparison for JSON output.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use simdbench_core::{BenchError, BenchResult};
use sysinfo::System;

use crate::comparison::Comparison;

/// Bytes in one mebibyte, the unit throughput is reported in.
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// One timed trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Elapsed time in milliseconds
    pub elapsed_ms: f64,
    /// Bytes the module reported for this call
    pub bytes_produced: u64,
}

impl RawSample {
    /// Build a sample from a measured duration.
    pub fn new(elapsed: Duration, bytes_produced: u64) -> Self {
        Self {
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            bytes_produced,
        }
    }
}

/// Ordered samples of one variant, one per timed trial.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    samples: Vec<RawSample>,
}

impl SampleSet {
    /// Create an empty set sized for `capacity` trials.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: RawSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[RawSample] {
        &self.samples
    }

    /// Reduce the set into summary statistics.
    pub fn aggregate(&self) -> BenchResult<Statistics> {
        Statistics::from_samples(&self.samples)
    }
}

impl From<Vec<RawSample>> for SampleSet {
    fn from(samples: Vec<RawSample>) -> Self {
        Self { samples }
    }
}

/// Latency and throughput statistics over a sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Fastest trial in milliseconds
    pub min: f64,
    /// Slowest trial in milliseconds
    pub max: f64,
    /// Arithmetic mean in milliseconds
    pub mean: f64,
    /// Element at index `n / 2` of the sorted times, in milliseconds
    pub median: f64,
    /// Average bytes produced per trial
    pub decompressed_size: f64,
    /// MB/s at the mean latency
    pub throughput_mbps: f64,
}

impl Statistics {
    /// Calculate statistics from raw samples.
    ///
    /// The median is the upper element of the middle pair for even counts and
    /// is never averaged.
    ///
    /// # Errors
    /// Returns `BenchError::EmptyInput` if `samples` is empty.
    pub fn from_samples(samples: &[RawSample]) -> BenchResult<Self> {
        if samples.is_empty() {
            return Err(BenchError::EmptyInput);
        }

        let mut times: Vec<f64> = samples.iter().map(|s| s.elapsed_ms).collect();
        times.sort_by(|a, b| a.total_cmp(b));
        let len = times.len();

        let min = times[0];
        let max = times[len - 1];
        let mean = times.iter().sum::<f64>() / len as f64;
        let median = times[len / 2];

        // u128 cannot overflow for any u32 count of u64 byte totals.
        let total_bytes: u128 = samples.iter().map(|s| u128::from(s.bytes_produced)).sum();
        let decompressed_size = total_bytes as f64 / len as f64;

        Ok(Self {
            min,
            max,
            mean,
            median,
            decompressed_size,
            throughput_mbps: throughput_mbps(decompressed_size, mean),
        })
    }
}

/// Throughput in MB/s for `bytes` produced in `mean_ms` milliseconds.
///
/// A zero mean yields `+inf`; callers treat it as unmeasurable.
pub fn throughput_mbps(bytes: f64, mean_ms: f64) -> f64 {
    if mean_ms == 0.0 {
        return f64::INFINITY;
    }
    (bytes / BYTES_PER_MB) / (mean_ms / 1000.0)
}

/// Benchmark outcome for one module variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Display label, e.g. "SIMD Version"
    pub name: String,
    /// SIMD flag reported by the module
    pub simd_enabled: bool,
    /// Compressed corpus size in bytes
    pub compressed_size: u64,
    /// Number of files in the corpus
    pub file_count: u64,
    /// Number of timed trials
    pub iterations: u32,
    #[serde(flatten)]
    pub stats: Statistics,
}

impl Summary {
    /// Mean latency in milliseconds.
    pub fn mean(&self) -> f64 {
        self.stats.mean
    }

    /// Throughput in MB/s.
    pub fn throughput_mbps(&self) -> f64 {
        self.stats.throughput_mbps
    }
}

/// System information captured at benchmark time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// OS version
    pub os_version: String,
    /// Kernel version
    pub kernel_version: Option<String>,
    /// CPU model name
    pub cpu_model: String,
    /// Number of CPU cores
    pub cpu_cores: usize,
    /// Total system memory in bytes
    pub memory_bytes: u64,
    /// Hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            memory_bytes: sys.total_memory(),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Both variant summaries and their comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Suite identifier
    pub benchmark_suite: String,
    /// Tool version
    pub version: String,
    /// When the run finished
    pub timestamp: DateTime<Utc>,
    pub system_info: SystemInfo,
    pub baseline: Summary,
    pub simd: Summary,
    pub comparison: Comparison,
}

impl BenchmarkReport {
    /// Assemble a report for one completed run.
    pub fn new(baseline: Summary, simd: Summary, comparison: Comparison) -> Self {
        Self {
            benchmark_suite: "simdbench-decompression".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system_info: SystemInfo::collect(),
            baseline,
            simd,
            comparison,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ms: f64, bytes: u64) -> RawSample {
        RawSample {
            elapsed_ms: ms,
            bytes_produced: bytes,
        }
    }

    #[test]
    fn test_statistics_from_samples() {
        let samples: Vec<_> = [5.0, 1.0, 4.0, 2.0, 3.0]
            .iter()
            .map(|&ms| sample(ms, 2048))
            .collect();
        let stats = Statistics::from_samples(&samples).unwrap();

        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.median, 3.0);
        assert!((stats.mean - 3.0).abs() < 1e-9);
        assert_eq!(stats.decompressed_size, 2048.0);
    }

    #[test]
    fn test_lower_median_not_averaged() {
        let samples: Vec<_> = [4.0, 2.0, 1.0, 3.0].iter().map(|&ms| sample(ms, 0)).collect();
        let stats = Statistics::from_samples(&samples).unwrap();
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_equal_samples() {
        let samples = vec![sample(7.25, 100); 6];
        let stats = Statistics::from_samples(&samples).unwrap();
        assert_eq!(stats.min, 7.25);
        assert_eq!(stats.max, 7.25);
        assert_eq!(stats.median, 7.25);
        assert!((stats.mean - 7.25).abs() < 1e-12);
    }

    #[test]
    fn test_ordering_invariants() {
        let times = [12.5, 0.3, 9.9, 9.9, 44.0, 1.7, 0.0, 3.3, 18.2];
        for n in 1..=times.len() {
            let samples: Vec<_> = times[..n].iter().map(|&ms| sample(ms, 10)).collect();
            let stats = Statistics::from_samples(&samples).unwrap();
            assert!(stats.min <= stats.median && stats.median <= stats.max, "n = {}", n);
            assert!(stats.min <= stats.mean && stats.mean <= stats.max, "n = {}", n);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            Statistics::from_samples(&[]),
            Err(BenchError::EmptyInput)
        ));
        assert!(matches!(
            SampleSet::default().aggregate(),
            Err(BenchError::EmptyInput)
        ));
    }

    #[test]
    fn test_single_sample() {
        let set = SampleSet::from(vec![sample(5.0, 1_048_576)]);
        let stats = set.aggregate().unwrap();
        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.decompressed_size, 1_048_576.0);
        assert!((stats.throughput_mbps - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_decompressed_size_is_average() {
        let samples = vec![sample(1.0, 100), sample(1.0, 300)];
        let stats = Statistics::from_samples(&samples).unwrap();
        assert_eq!(stats.decompressed_size, 200.0);
    }

    #[test]
    fn test_huge_byte_counts_do_not_overflow() {
        let samples = vec![sample(1.0, u64::MAX); 3];
        let stats = Statistics::from_samples(&samples).unwrap();
        assert_eq!(stats.decompressed_size, u64::MAX as f64);
    }

    #[test]
    fn test_throughput_inverse_to_mean() {
        let bytes = 10.0 * BYTES_PER_MB;
        let slow = throughput_mbps(bytes, 100.0);
        let fast = throughput_mbps(bytes, 50.0);
        assert!((slow - 100.0).abs() < 1e-9);
        assert!((fast - 2.0 * slow).abs() < 1e-9);
    }

    #[test]
    fn test_zero_mean_throughput_is_infinite() {
        assert_eq!(throughput_mbps(1024.0, 0.0), f64::INFINITY);
        let stats = Statistics::from_samples(&[sample(0.0, 10)]).unwrap();
        assert!(stats.throughput_mbps.is_infinite());
    }

    #[test]
    fn test_raw_sample_from_duration() {
        let s = RawSample::new(Duration::from_micros(2500), 42);
        assert!((s.elapsed_ms - 2.5).abs() < 1e-9);
        assert_eq!(s.bytes_produced, 42);
    }

    #[test]
    fn test_system_info_collect() {
        let info = SystemInfo::collect();
        assert!(!info.os.is_empty());
        assert!(info.cpu_cores > 0);
    }
}
