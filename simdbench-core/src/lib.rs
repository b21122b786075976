//! simdbench Core Library
//!
//! Everything the benchmark needs before a single trial runs: validated
//! configuration, the decompression module contract and its shared-library
//! binding, and the error types shared by the workspace.

pub mod config;
pub mod error;
pub mod module;
pub mod types;

// Re-export commonly used types
pub use config::{BenchConfig, ConfigLoader, ModuleConfig};
pub use error::{BenchError, BenchResult};
pub use module::DecompressModule;
#[cfg(unix)]
pub use module::SharedLibraryModule;
pub use types::{Iterations, Variant, DEFAULT_ITERATIONS, WARMUP_ITERATIONS};
