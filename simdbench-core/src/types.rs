// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! All types validate their invariants at creation time.

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::fmt;
use std::path::PathBuf;

use crate::error::BenchError;

/// Iteration count used when none (or an unusable one) is supplied.
pub const DEFAULT_ITERATIONS: u32 = 10;

/// Number of untimed decompress calls issued before measurement starts.
pub const WARMUP_ITERATIONS: u32 = 3;

/// Stem of the shared library built from the decompression crate.
const MODULE_STEM: &str = "wasm_bench";

/// Validated number of timed trials.
/// Must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iterations(u32);

impl Iterations {
    /// Create a new Iterations with validation.
    pub fn new(count: i64) -> Result<Self, BenchError> {
        if count < 1 {
            return Err(BenchError::InvalidArgument {
                field: "iterations",
                value: count.to_string(),
                reason: "At least one timed iteration is required".to_string(),
            });
        }

        let count = u32::try_from(count).map_err(|_| BenchError::InvalidArgument {
            field: "iterations",
            value: count.to_string(),
            reason: format!("Must not exceed {}", u32::MAX),
        })?;

        Ok(Self(count))
    }

    /// Parse a command-line value using the parse-or-default rule.
    ///
    /// Only the leading integer is read, so `"3.9"` is 3 and `"12abc"` is 12.
    /// Absent values, values without leading digits and zero fall back to
    /// [`DEFAULT_ITERATIONS`]. Negative values are kept so that validation
    /// rejects them.
    pub fn parse_or_default(raw: Option<&str>) -> Result<Self, BenchError> {
        match raw.and_then(leading_integer) {
            None | Some(0) => Ok(Self::default()),
            Some(count) => Self::new(count),
        }
    }

    /// Get the inner count.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Iterations {
    fn default() -> Self {
        Self(DEFAULT_ITERATIONS)
    }
}

impl fmt::Display for Iterations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional sign followed by the leading run of ASCII digits.
///
/// Values too large for `i64` saturate; validation rejects them anyway.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Which build of the decompression module a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Scalar build, the reference for every comparison
    Baseline,
    /// Build compiled with SIMD target features
    Simd,
}

impl Variant {
    /// Label used in report headings.
    pub fn default_name(&self) -> &'static str {
        match self {
            Variant::Baseline => "Non-SIMD Version",
            Variant::Simd => "SIMD Version",
        }
    }

    /// Where the module is looked up when no path is configured.
    pub fn default_path(&self) -> PathBuf {
        let dir = match self {
            Variant::Baseline => "pkg-no-simd",
            Variant::Simd => "pkg-simd",
        };
        PathBuf::from(dir).join(format!("{}{}{}", DLL_PREFIX, MODULE_STEM, DLL_SUFFIX))
    }

    /// Build instructions printed when the module cannot be loaded.
    pub fn build_hint(&self) -> String {
        let dest = self.default_path();
        let dest = dest.parent().map(|p| p.display().to_string()).unwrap_or_default();
        let lib = format!("{}{}{}", DLL_PREFIX, MODULE_STEM, DLL_SUFFIX);
        match self {
            Variant::Baseline => format!(
                "Run: cargo build -p wasm-bench --release\n\
                 Then: cp target/release/{lib} {dest}/"
            ),
            Variant::Simd => format!(
                "Run: RUSTFLAGS=\"-Ctarget-cpu=native\" cargo build -p wasm-bench --release --features simd\n\
                 Then: cp target/release/{lib} {dest}/"
            ),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Baseline => write!(f, "non-SIMD"),
            Variant::Simd => write!(f, "SIMD"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterations_validation() {
        assert_eq!(Iterations::new(1).unwrap().get(), 1);
        assert_eq!(Iterations::new(250).unwrap().get(), 250);
        assert!(matches!(
            Iterations::new(0),
            Err(BenchError::InvalidArgument { field: "iterations", .. })
        ));
        assert!(Iterations::new(-4).is_err());
        assert!(Iterations::new(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_parse_or_default() {
        assert_eq!(Iterations::parse_or_default(None).unwrap().get(), 10);
        assert_eq!(Iterations::parse_or_default(Some("abc")).unwrap().get(), 10);
        assert_eq!(Iterations::parse_or_default(Some("0")).unwrap().get(), 10);
        assert_eq!(Iterations::parse_or_default(Some("25")).unwrap().get(), 25);
        assert!(Iterations::parse_or_default(Some("-2")).is_err());
    }

    #[test]
    fn test_parse_or_default_reads_leading_integer() {
        let parse = |s: &str| Iterations::parse_or_default(Some(s)).unwrap().get();
        assert_eq!(parse("3.9"), 3);
        assert_eq!(parse("12abc"), 12);
        assert_eq!(parse(" 7"), 7);
        assert_eq!(parse("+5"), 5);
        assert_eq!(parse("1e3"), 1);
        assert_eq!(parse("00"), 10);
        assert_eq!(parse("-"), 10);
        assert_eq!(parse("x12"), 10);
        assert!(Iterations::parse_or_default(Some("-3.5")).is_err());
        assert!(Iterations::parse_or_default(Some("99999999999999999999")).is_err());
    }

    #[test]
    fn test_variant_defaults() {
        assert_eq!(Variant::Baseline.default_name(), "Non-SIMD Version");
        assert_eq!(Variant::Simd.default_name(), "SIMD Version");
        assert!(Variant::Baseline.default_path().starts_with("pkg-no-simd"));
        assert!(Variant::Simd.default_path().starts_with("pkg-simd"));
        assert!(Variant::Simd.build_hint().contains("--features simd"));
    }
}
