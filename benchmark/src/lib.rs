// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! simdbench Benchmarking Framework
//!
//! Measures a SIMD build of a decompression module against its scalar
//! baseline.
//!
//! # Flow
//!
//! - **Harness**: 3 warmup calls, then one timed call per iteration
//! - **Metrics**: min/max/mean/median latency and MB/s throughput
//! - **Comparison**: speedup, throughput gain and time saved per iteration
//! - **Reporter**: plain-text blocks or a JSON document

pub mod comparison;
pub mod harness;
pub mod metrics;
pub mod reporter;

pub use comparison::{compare, Comparison};
pub use harness::BenchmarkHarness;
pub use metrics::{BenchmarkReport, RawSample, SampleSet, Statistics, Summary, SystemInfo};
pub use reporter::{format_comparison, format_summary, JsonReporter};
