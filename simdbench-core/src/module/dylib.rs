// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! SharedLibraryModule - dlopen wrapper for decompression modules.
//!
//! Resolves the four C-ABI entry points once at load time. All unsafe
//! operations are confined to this file.

use std::ffi::{c_void, CStr, CString};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use tracing::{debug, info};

use super::DecompressModule;
use crate::error::{BenchError, BenchResult};
use crate::types::Variant;

type DecompressOnceFn = unsafe extern "C" fn() -> i64;
type CountFn = unsafe extern "C" fn() -> u64;
type FlagFn = unsafe extern "C" fn() -> i32;

const SYM_DECOMPRESS_ONCE: &str = "decompress_once";
const SYM_COMPRESSED_SIZE: &str = "get_compressed_size";
const SYM_FILE_COUNT: &str = "get_file_count";
const SYM_SIMD_ENABLED: &str = "is_simd_enabled";

/// A decompression module loaded from a shared library.
///
/// The library stays mapped for the lifetime of this value and is closed on
/// drop. The raw handle makes this type neither `Send` nor `Sync`.
pub struct SharedLibraryModule {
    /// Handle returned by dlopen.
    handle: NonNull<c_void>,
    /// Path the library was opened from.
    path: PathBuf,
    decompress_once: DecompressOnceFn,
    get_compressed_size: CountFn,
    get_file_count: CountFn,
    is_simd_enabled: FlagFn,
}

impl SharedLibraryModule {
    /// Open a shared library and resolve the module entry points.
    ///
    /// # Errors
    /// Returns `BenchError::ModuleLoad` if the library cannot be opened or any
    /// of the four symbols is missing.
    pub fn open(variant: Variant, path: impl AsRef<Path>) -> BenchResult<Self> {
        let path = path.as_ref();
        let load_error = |reason: String| BenchError::ModuleLoad {
            variant,
            path: path.to_path_buf(),
            reason,
        };

        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| load_error(format!("Invalid path: {}", e)))?;

        // SAFETY: c_path is a valid NUL-terminated string; flags are valid.
        let raw = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
        let handle = NonNull::new(raw).ok_or_else(|| load_error(last_dl_error()))?;

        debug!(path = %path.display(), "Opened module library");

        let resolved = (|| -> Result<_, String> {
            Ok((
                resolve(handle, SYM_DECOMPRESS_ONCE)?,
                resolve(handle, SYM_COMPRESSED_SIZE)?,
                resolve(handle, SYM_FILE_COUNT)?,
                resolve(handle, SYM_SIMD_ENABLED)?,
            ))
        })();

        let (decompress_once, compressed_size, file_count, simd_enabled) = match resolved {
            Ok(symbols) => symbols,
            Err(reason) => {
                // SAFETY: handle came from a successful dlopen and is closed once.
                unsafe { libc::dlclose(handle.as_ptr()) };
                return Err(load_error(reason));
            }
        };

        // SAFETY: each symbol was exported by the module with the C signature
        // of its alias; the pointers are non-null and valid while the library
        // stays open.
        let module = unsafe {
            Self {
                handle,
                path: path.to_path_buf(),
                decompress_once: std::mem::transmute::<*mut c_void, DecompressOnceFn>(
                    decompress_once,
                ),
                get_compressed_size: std::mem::transmute::<*mut c_void, CountFn>(compressed_size),
                get_file_count: std::mem::transmute::<*mut c_void, CountFn>(file_count),
                is_simd_enabled: std::mem::transmute::<*mut c_void, FlagFn>(simd_enabled),
            }
        };

        info!(
            variant = %variant,
            path = %module.path.display(),
            simd = module.is_simd_enabled(),
            "Loaded decompression module"
        );

        Ok(module)
    }
}

impl DecompressModule for SharedLibraryModule {
    fn decompress_once(&mut self) -> BenchResult<u64> {
        // SAFETY: resolved from the open library; takes no arguments.
        let code = unsafe { (self.decompress_once)() };
        u64::try_from(code).map_err(|_| BenchError::ForeignCall {
            symbol: SYM_DECOMPRESS_ONCE,
            code,
        })
    }

    fn compressed_size(&self) -> u64 {
        // SAFETY: resolved from the open library; takes no arguments.
        unsafe { (self.get_compressed_size)() }
    }

    fn file_count(&self) -> u64 {
        // SAFETY: resolved from the open library; takes no arguments.
        unsafe { (self.get_file_count)() }
    }

    fn is_simd_enabled(&self) -> bool {
        // SAFETY: resolved from the open library; takes no arguments.
        unsafe { (self.is_simd_enabled)() != 0 }
    }
}

impl Drop for SharedLibraryModule {
    fn drop(&mut self) {
        // SAFETY: handle came from a successful dlopen and is closed exactly once.
        let result = unsafe { libc::dlclose(self.handle.as_ptr()) };
        if result != 0 {
            tracing::warn!(path = %self.path.display(), error = %last_dl_error(), "dlclose failed");
        }
    }
}

impl std::fmt::Debug for SharedLibraryModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLibraryModule")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Look up one symbol, returning a non-null address.
fn resolve(handle: NonNull<c_void>, name: &str) -> Result<*mut c_void, String> {
    let c_name = CString::new(name).map_err(|e| e.to_string())?;

    // SAFETY: clears any stale error so the next dlerror reflects dlsym.
    unsafe { libc::dlerror() };
    // SAFETY: handle is open and c_name is NUL-terminated.
    let sym = unsafe { libc::dlsym(handle.as_ptr(), c_name.as_ptr()) };

    if sym.is_null() {
        return Err(format!("Missing symbol '{}': {}", name, last_dl_error()));
    }
    Ok(sym)
}

/// Take the pending dlerror message, if any.
fn last_dl_error() -> String {
    // SAFETY: dlerror returns either null or a NUL-terminated string owned by libc.
    let msg = unsafe { libc::dlerror() };
    if msg.is_null() {
        "unknown dynamic loader error".to_string()
    } else {
        // SAFETY: checked non-null above; copied before any further dl* call.
        unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
    }
}
