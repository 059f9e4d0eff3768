//! Configuration loading
//!
//! `defaults/analizador.default.toml` is embedded into the binary so that
//! documentation and runtime behavior stay in sync. Callers layer user files
//! and single-key overrides on top of it with [`Loader`] before
//! deserializing into [`AnalyzerConfig`].

use crate::processor::OutputFormat;
use crate::recognizer::{Recovery, RecoveryMode};
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/analizador.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    pub recovery: RecoveryConfig,
    pub output: OutputConfig,
}

/// How the recognizer continues after a syntax error
#[derive(Debug, Clone, Deserialize)]
pub struct RecoveryConfig {
    pub mode: RecoveryMode,
    pub quiet_shifts: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_expected: bool,
}

impl AnalyzerConfig {
    pub fn recovery(&self) -> Recovery {
        Recovery {
            mode: self.recovery.mode,
            quiet_shifts: self.recovery.quiet_shifts,
        }
    }
}

/// Stacks configuration sources on top of `analizador.default.toml`.
/// Later sources win key by key.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Add a TOML file, skipping it when absent (a per-directory
    /// `analizador.toml`, say).
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), false)
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `recovery.mode` for `--halt`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every source and deserialize into [`AnalyzerConfig`]. Unknown
    /// recovery modes and output formats fail here.
    pub fn build(self) -> Result<AnalyzerConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone
pub fn load_defaults() -> Result<AnalyzerConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.recovery.mode, RecoveryMode::Synchronize);
        assert_eq!(config.recovery.quiet_shifts, 3);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.show_expected);
        assert_eq!(config.recovery(), Recovery::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("recovery.mode", "halt")
            .expect("override to apply")
            .set_override("output.format", "json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.recovery.mode, RecoveryMode::Halt);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[recovery]\nquiet_shifts = 0\n[output]\nshow_expected = false")
            .expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.recovery.quiet_shifts, 0);
        assert_eq!(config.recovery.mode, RecoveryMode::Synchronize);
        assert!(!config.output.show_expected);
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/analizador.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn rejects_unknown_mode() {
        let result = Loader::new()
            .set_override("recovery.mode", "panic")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
