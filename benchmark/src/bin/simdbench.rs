// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI tool that benchmarks the non-SIMD and SIMD decompression modules and
//! prints a comparison.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simdbench_benchmark::{
    compare, format_comparison, format_summary, BenchmarkHarness, BenchmarkReport, JsonReporter,
};
use simdbench_core::{module, BenchConfig, BenchError, ConfigLoader, Iterations, Variant};

#[derive(Parser)]
#[command(name = "simdbench")]
#[command(version, about = "Compare SIMD and non-SIMD builds of a decompression module")]
struct Args {
    /// Number of timed iterations per module (leading integer is used; no digits or 0 falls back to 10)
    #[arg(allow_negative_numbers = true)]
    iterations: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the non-SIMD module library
    #[arg(long)]
    baseline: Option<PathBuf>,

    /// Path to the SIMD module library
    #[arg(long)]
    simd: Option<PathBuf>,

    /// Print the report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(hint) = failure_hint(&e) {
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// Build instructions for errors caused by a missing or broken module build.
fn failure_hint(err: &anyhow::Error) -> Option<String> {
    err.downcast_ref::<BenchError>()
        .and_then(BenchError::build_hint)
}

/// Merge the config file (if any) with command-line overrides.
fn resolve_config(args: &Args) -> Result<BenchConfig, BenchError> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_file(path)?,
        None => BenchConfig::default(),
    };

    if args.iterations.is_some() {
        config = config.with_iterations(Iterations::parse_or_default(args.iterations.as_deref())?);
    }
    if let Some(path) = &args.baseline {
        config = config.with_module_path(Variant::Baseline, path);
    }
    if let Some(path) = &args.simd {
        config = config.with_module_path(Variant::Simd, path);
    }

    Ok(config)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = resolve_config(args)?;
    let text = !args.json;

    if text {
        println!("Decompression Benchmark");
        println!("=======================\n");
    }

    // Both modules are loaded up front so a missing build fails before any timing.
    tracing::info!("Loading non-SIMD module...");
    let mut baseline_module = module::load(&config.baseline)?;
    tracing::info!("Loading SIMD module...");
    let mut simd_module = module::load(&config.simd)?;

    let harness = BenchmarkHarness::new(config.iterations);

    tracing::info!("Running non-SIMD benchmark...");
    let baseline = harness.run(&mut baseline_module, &config.baseline.name)?;
    if text {
        print!("{}", format_summary(&baseline));
    }

    tracing::info!("Running SIMD benchmark...");
    let simd = harness.run(&mut simd_module, &config.simd.name)?;
    if text {
        print!("{}", format_summary(&simd));
    }

    let comparison = compare(&baseline, &simd);
    if comparison.is_regression() {
        tracing::warn!(
            time_saved_ms = comparison.time_saved_ms,
            "SIMD build was slower than the non-SIMD build"
        );
    }
    if text {
        print!("{}", format_comparison(&comparison));
    } else {
        let report = BenchmarkReport::new(baseline, simd, comparison);
        JsonReporter::write_to(io::stdout().lock(), &report)?;
    }

    Ok(())
}
