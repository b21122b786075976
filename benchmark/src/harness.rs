// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark harness for running and timing decompression modules.
//!
//! A run is two sequential phases on the calling thread: a fixed number of
//! untimed warmup calls, then one timed call per iteration. Any failing call
//! aborts the run; no partial samples are returned.

use std::time::Instant;

use simdbench_core::{BenchResult, DecompressModule, Iterations, WARMUP_ITERATIONS};
use tracing::{debug, info, warn};

use crate::metrics::{RawSample, SampleSet, Summary};

/// Drives one module variant through warmup and measurement.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkHarness {
    /// Number of timed trials
    iterations: Iterations,
}

impl BenchmarkHarness {
    /// Create a harness that times `iterations` trials.
    pub fn new(iterations: Iterations) -> Self {
        Self { iterations }
    }

    /// Number of timed trials.
    pub fn iterations(&self) -> Iterations {
        self.iterations
    }

    /// Benchmark `module` and summarize the results under `name`.
    ///
    /// Module metadata is read once, before warmup.
    pub fn run<M>(&self, module: &mut M, name: &str) -> BenchResult<Summary>
    where
        M: DecompressModule + ?Sized,
    {
        let compressed_size = module.compressed_size();
        let simd_enabled = module.is_simd_enabled();
        let file_count = module.file_count();

        let samples = self.collect_samples(module)?;
        let stats = samples.aggregate()?;

        if stats.throughput_mbps.is_infinite() {
            warn!(variant = name, "Mean trial time is zero; throughput is unmeasurable");
        }

        info!(
            variant = name,
            mean_ms = stats.mean,
            median_ms = stats.median,
            throughput_mbps = stats.throughput_mbps,
            "Benchmark complete"
        );

        Ok(Summary {
            name: name.to_string(),
            simd_enabled,
            compressed_size,
            file_count,
            iterations: self.iterations.get(),
            stats,
        })
    }

    /// Run the warmup phase followed by the timed phase.
    pub fn collect_samples<M>(&self, module: &mut M) -> BenchResult<SampleSet>
    where
        M: DecompressModule + ?Sized,
    {
        info!("Warming up ({} iterations)...", WARMUP_ITERATIONS);
        for _ in 0..WARMUP_ITERATIONS {
            module.decompress_once()?;
        }

        info!("Running {} iterations...", self.iterations);
        let count = self.iterations.get();
        let mut samples = SampleSet::with_capacity(count as usize);
        for trial in 0..count {
            let sample = timed_trial(module)?;
            debug!(
                trial,
                elapsed_ms = sample.elapsed_ms,
                bytes = sample.bytes_produced,
                "Trial finished"
            );
            samples.push(sample);
        }

        Ok(samples)
    }
}

/// Time a single decompress call.
pub fn timed_trial<M>(module: &mut M) -> BenchResult<RawSample>
where
    M: DecompressModule + ?Sized,
{
    let start = Instant::now();
    let bytes = module.decompress_once()?;
    let elapsed = start.elapsed();
    Ok(RawSample::new(elapsed, bytes))
}

/// Benchmark `module` for `iterations` timed trials.
///
/// # Errors
/// `BenchError::InvalidArgument` if `iterations < 1`; any error raised by the
/// module during warmup or measurement.
pub fn run<M>(module: &mut M, name: &str, iterations: i64) -> BenchResult<Summary>
where
    M: DecompressModule + ?Sized,
{
    let iterations = Iterations::new(iterations)?;
    BenchmarkHarness::new(iterations).run(module, name)
}
