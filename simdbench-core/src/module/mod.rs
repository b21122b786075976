//! Decompression module abstraction.
//!
//! A module variant is anything that implements [`DecompressModule`]. The
//! production implementation is [`SharedLibraryModule`], a shared library
//! opened at runtime; tests supply in-process implementations.

#[cfg(unix)]
mod dylib;

#[cfg(unix)]
pub use dylib::SharedLibraryModule;

use crate::config::ModuleConfig;
use crate::error::BenchResult;

/// The four entry points a decompression module exposes.
///
/// `decompress_once` takes `&mut self`: a module handle serves one caller at a
/// time and calls into it are never overlapped.
pub trait DecompressModule {
    /// Decompress the module's fixed corpus once, returning the bytes produced.
    fn decompress_once(&mut self) -> BenchResult<u64>;

    /// Total compressed size of the corpus. Stable across calls.
    fn compressed_size(&self) -> u64;

    /// Number of files in the corpus.
    fn file_count(&self) -> u64;

    /// Whether the module was compiled with SIMD support.
    fn is_simd_enabled(&self) -> bool;
}

impl<M: DecompressModule + ?Sized> DecompressModule for Box<M> {
    fn decompress_once(&mut self) -> BenchResult<u64> {
        (**self).decompress_once()
    }

    fn compressed_size(&self) -> u64 {
        (**self).compressed_size()
    }

    fn file_count(&self) -> u64 {
        (**self).file_count()
    }

    fn is_simd_enabled(&self) -> bool {
        (**self).is_simd_enabled()
    }
}

/// Open the shared library described by `config`.
#[cfg(unix)]
pub fn load(config: &ModuleConfig) -> BenchResult<SharedLibraryModule> {
    SharedLibraryModule::open(config.variant, &config.path)
}
