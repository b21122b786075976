//! Custom error types for simdbench.
//!
//! Every failure is an explicit enum variant. No `Box<dyn Error>` and no
//! `anyhow::Result` in library code; the binary decides how to print them.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Variant;

/// Top-level error type for the benchmark.
#[derive(Debug, Error)]
pub enum BenchError {
    // =========================================================================
    // Module Errors - Fatal, Never Retried
    // =========================================================================
    #[error("Failed to load {variant} module from {path}: {reason}")]
    ModuleLoad {
        variant: Variant,
        path: PathBuf,
        reason: String,
    },

    #[error("Foreign call '{symbol}' failed with code {code}")]
    ForeignCall { symbol: &'static str, code: i64 },

    // =========================================================================
    // Argument and Invariant Errors
    // =========================================================================
    #[error("Invalid argument: {field} = {value} - {reason}")]
    InvalidArgument {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Cannot aggregate an empty sample set")]
    EmptyInput,

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl BenchError {
    /// Whether this error means a module variant could not be obtained.
    pub fn is_module_load(&self) -> bool {
        matches!(self, BenchError::ModuleLoad { .. })
    }

    /// Build instructions for the variant that failed to load, if any.
    pub fn build_hint(&self) -> Option<String> {
        match self {
            BenchError::ModuleLoad { variant, .. } => Some(format!(
                "Failed to load {} module. Did you build it?\n{}",
                variant,
                variant.build_hint()
            )),
            _ => None,
        }
    }
}

/// Result type alias using BenchError.
pub type BenchResult<T> = Result<T, BenchError>;
