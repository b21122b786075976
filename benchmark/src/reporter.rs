// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Human-readable and JSON rendering of benchmark results.
//!
//! Nothing here touches the filesystem; callers choose where output goes.

use std::io::Write;

use thiserror::Error;

use crate::comparison::Comparison;
use crate::metrics::{BenchmarkReport, Summary, BYTES_PER_MB};

const RULE_WIDTH: usize = 60;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Render one variant's results.
pub fn format_summary(summary: &Summary) -> String {
    let stats = &summary.stats;
    let rule = rule();

    let mut out = String::new();
    out.push_str(&format!("\n{}\n{}\n{}\n", rule, summary.name, rule));
    out.push_str(&format!("  SIMD Enabled:      {}\n", summary.simd_enabled));
    out.push_str(&format!(
        "  Compressed Size:   {:.2} KB\n",
        summary.compressed_size as f64 / 1024.0
    ));
    out.push_str(&format!(
        "  Decompressed Size: {:.2} MB\n",
        stats.decompressed_size / BYTES_PER_MB
    ));
    out.push_str(&format!("  Iterations:        {}\n", summary.iterations));
    out.push_str(&format!("  Time (min):        {:.2} ms\n", stats.min));
    out.push_str(&format!("  Time (max):        {:.2} ms\n", stats.max));
    out.push_str(&format!("  Time (mean):       {:.2} ms\n", stats.mean));
    out.push_str(&format!("  Time (median):     {:.2} ms\n", stats.median));
    out.push_str(&format!(
        "  Throughput:        {:.2} MB/s\n",
        stats.throughput_mbps
    ));
    out
}

/// Render the comparison block.
pub fn format_comparison(comparison: &Comparison) -> String {
    let rule = rule();
    let sign = if comparison.throughput_gain_percent >= 0.0 {
        "+"
    } else {
        ""
    };

    let mut out = String::new();
    out.push_str(&format!("\n{}\nCOMPARISON\n{}\n", rule, rule));
    out.push_str(&format!("  Speedup:              {:.2}x\n", comparison.speedup));
    out.push_str(&format!(
        "  Throughput gain:      {}{:.1}%\n",
        sign, comparison.throughput_gain_percent
    ));
    out.push_str(&format!(
        "  Time saved per iter:  {:.2} ms\n",
        comparison.time_saved_ms
    ));
    out
}

/// JSON reporter for a completed run.
pub struct JsonReporter;

impl JsonReporter {
    /// Serialize `report` as pretty JSON.
    pub fn render(report: &BenchmarkReport) -> Result<String, ReporterError> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Write `report` as pretty JSON followed by a newline.
    pub fn write_to<W: Write>(mut writer: W, report: &BenchmarkReport) -> Result<(), ReporterError> {
        serde_json::to_writer_pretty(&mut writer, report)?;
        writeln!(writer)?;
        Ok(())
    }
}
