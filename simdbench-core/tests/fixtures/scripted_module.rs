// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Minimal decompression module for loader tests.
//!
//! The first two decompress calls report 1000 bytes; every later call fails
//! with code -7.

use std::sync::atomic::{AtomicU32, Ordering};

static CALLS: AtomicU32 = AtomicU32::new(0);

#[no_mangle]
pub extern "C" fn decompress_once() -> i64 {
    match CALLS.fetch_add(1, Ordering::SeqCst) {
        0 | 1 => 1000,
        _ => -7,
    }
}

#[no_mangle]
pub extern "C" fn get_compressed_size() -> u64 {
    42
}

#[no_mangle]
pub extern "C" fn get_file_count() -> u64 {
    10
}

#[no_mangle]
pub extern "C" fn is_simd_enabled() -> i32 {
    1
}
