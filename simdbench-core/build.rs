// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

// build.rs - compiles the scripted test module into a shared library.
//
// The integration tests load it through SharedLibraryModule. Its path is
// exported as SIMDBENCH_SCRIPTED_MODULE. Skipped for cross builds and
// non-Unix targets, where the host-built library could not be loaded.

use std::env;
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::PathBuf;
use std::process::Command;

const FIXTURE: &str = "tests/fixtures/scripted_module.rs";

fn main() {
    println!("cargo:rerun-if-changed={}", FIXTURE);
    println!("cargo:rerun-if-changed=build.rs");

    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    if host != target || env::var("CARGO_CFG_UNIX").is_err() {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let output = out_dir.join(format!("{}scripted_module{}", DLL_PREFIX, DLL_SUFFIX));

    let status = Command::new(rustc)
        .args(["--crate-name", "scripted_module", "--crate-type", "cdylib"])
        .args(["--edition", "2021", "-C", "opt-level=0"])
        .arg("-o")
        .arg(&output)
        .arg(FIXTURE)
        .status()
        .expect("failed to run rustc for the scripted test module");

    if !status.success() {
        panic!("rustc failed to build {}", FIXTURE);
    }

    println!(
        "cargo:rustc-env=SIMDBENCH_SCRIPTED_MODULE={}",
        output.display()
    );
}
