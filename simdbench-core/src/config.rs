// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict validation.
//!
//! Every field is optional in the file; missing values fall back to the
//! built-in defaults. Invalid values are rejected before any module is loaded.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BenchError, BenchResult};
use crate::types::{Iterations, Variant, DEFAULT_ITERATIONS};

/// Raw module entry as parsed from YAML (before validation).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModuleConfig {
    name: Option<String>,
    path: Option<PathBuf>,
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default = "default_iterations")]
    iterations: i64,
    #[serde(default)]
    baseline: RawModuleConfig,
    #[serde(default)]
    simd: RawModuleConfig,
}

fn default_iterations() -> i64 {
    i64::from(DEFAULT_ITERATIONS)
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            baseline: RawModuleConfig::default(),
            simd: RawModuleConfig::default(),
        }
    }
}

/// Validated location and label of one module variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConfig {
    pub variant: Variant,
    pub name: String,
    pub path: PathBuf,
}

impl ModuleConfig {
    /// Defaults for a variant: its standard label and library path.
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            name: variant.default_name().to_string(),
            path: variant.default_path(),
        }
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub iterations: Iterations,
    pub baseline: ModuleConfig,
    pub simd: ModuleConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: Iterations::default(),
            baseline: ModuleConfig::for_variant(Variant::Baseline),
            simd: ModuleConfig::for_variant(Variant::Simd),
        }
    }
}

impl BenchConfig {
    /// Replace the iteration count.
    pub fn with_iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    /// Replace the library path of one variant.
    pub fn with_module_path(mut self, variant: Variant, path: impl Into<PathBuf>) -> Self {
        match variant {
            Variant::Baseline => self.baseline.path = path.into(),
            Variant::Simd => self.simd.path = path.into(),
        }
        self
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> BenchResult<BenchConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BenchError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| BenchError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn load_string(content: &str) -> BenchResult<BenchConfig> {
        if content.trim().is_empty() {
            return Self::validate(RawConfig::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| BenchError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    /// Validate raw configuration and convert to validated types.
    fn validate(raw: RawConfig) -> BenchResult<BenchConfig> {
        let iterations = Iterations::new(raw.iterations)?;
        let baseline = Self::validate_module(raw.baseline, Variant::Baseline)?;
        let simd = Self::validate_module(raw.simd, Variant::Simd)?;

        Ok(BenchConfig {
            iterations,
            baseline,
            simd,
        })
    }

    /// Validate a single module entry, filling in defaults.
    fn validate_module(raw: RawModuleConfig, variant: Variant) -> BenchResult<ModuleConfig> {
        let defaults = ModuleConfig::for_variant(variant);

        let name = match raw.name {
            Some(name) if name.trim().is_empty() => {
                return Err(BenchError::InvalidArgument {
                    field: "name",
                    value: name,
                    reason: format!("Label for the {} module cannot be empty", variant),
                });
            }
            Some(name) => name,
            None => defaults.name,
        };

        let path = match raw.path {
            Some(path) if path.as_os_str().is_empty() => {
                return Err(BenchError::InvalidArgument {
                    field: "path",
                    value: String::new(),
                    reason: format!("Path of the {} module cannot be empty", variant),
                });
            }
            Some(path) => path,
            None => defaults.path,
        };

        Ok(ModuleConfig {
            variant,
            name,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ConfigLoader::load_string("").unwrap();
        assert_eq!(config, BenchConfig::default());
        assert_eq!(config.iterations.get(), 10);
        assert_eq!(config.baseline.name, "Non-SIMD Version");
        assert_eq!(config.simd.name, "SIMD Version");
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
iterations: 25
baseline:
  name: scalar
  path: /opt/bench/libscalar.so
simd:
  path: /opt/bench/libsimd.so
"#;
        let config = ConfigLoader::load_string(yaml).unwrap();
        assert_eq!(config.iterations.get(), 25);
        assert_eq!(config.baseline.name, "scalar");
        assert_eq!(config.baseline.path, PathBuf::from("/opt/bench/libscalar.so"));
        assert_eq!(config.simd.name, "SIMD Version");
        assert_eq!(config.simd.variant, Variant::Simd);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let result = ConfigLoader::load_string("iterations: 0");
        assert!(matches!(
            result,
            Err(BenchError::InvalidArgument { field: "iterations", .. })
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let yaml = "baseline:\n  name: \"  \"\n";
        assert!(matches!(
            ConfigLoader::load_string(yaml),
            Err(BenchError::InvalidArgument { field: "name", .. })
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ConfigLoader::load_string("warmup: 7");
        assert!(matches!(result, Err(BenchError::ConfigParse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::load_file("/nonexistent/simdbench.yaml");
        assert!(matches!(result, Err(BenchError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "iterations: 3").unwrap();
        let config = ConfigLoader::load_file(file.path()).unwrap();
        assert_eq!(config.iterations.get(), 3);
    }

    #[test]
    fn test_builder_overrides() {
        let config = BenchConfig::default()
            .with_iterations(Iterations::new(7).unwrap())
            .with_module_path(Variant::Simd, "/tmp/libfast.so");
        assert_eq!(config.iterations.get(), 7);
        assert_eq!(config.simd.path, PathBuf::from("/tmp/libfast.so"));
        assert_eq!(config.baseline.path, Variant::Baseline.default_path());
    }
}
