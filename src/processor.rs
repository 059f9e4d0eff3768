//! Rendering API for check reports and token streams
//!
//! A processing spec is written `<stage>-<format>`:
//!
//! - `check-text`, `check-json`, `check-yaml`: the check report
//! - `tokens-simple`, `tokens-json`: the token stream
//!
//! ```text
//! let spec = ProcessingSpec::from_string("check-json")?;
//! let processed = process_source("var int edad;", &spec, &load_defaults()?)?;
//! ```

use crate::checker::{CheckReport, Checker, Verdict};
use crate::config::AnalyzerConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::lexer::{tokenize, Tokenizer};
use crate::location::LineIndex;
use crate::token::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// What data to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Tokens,
    Check,
}

/// How to print it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Simple,
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    fn name(&self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Build a spec, rejecting formats the stage cannot produce.
    pub fn new(stage: ProcessingStage, format: OutputFormat) -> Result<Self, ProcessingError> {
        match (stage, format) {
            (ProcessingStage::Tokens, OutputFormat::Simple | OutputFormat::Json) => {}
            (
                ProcessingStage::Check,
                OutputFormat::Text | OutputFormat::Json | OutputFormat::Yaml,
            ) => {}
            (ProcessingStage::Tokens, _) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "Format '{}' not supported for tokens stage (only 'simple' and 'json' are supported)",
                    format.name()
                )))
            }
            (ProcessingStage::Check, _) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "Format '{}' not supported for check stage (only 'text', 'json' and 'yaml' are supported)",
                    format.name()
                )))
            }
        }
        Ok(Self { stage, format })
    }

    /// Parse a format string like "check-json" or "tokens-simple"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "tokens" => ProcessingStage::Tokens,
            "check" => ProcessingStage::Check,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        Self::new(stage, format)
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        vec![
            ProcessingSpec {
                stage: ProcessingStage::Check,
                format: OutputFormat::Text,
            },
            ProcessingSpec {
                stage: ProcessingStage::Check,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Check,
                format: OutputFormat::Yaml,
            },
            ProcessingSpec {
                stage: ProcessingStage::Tokens,
                format: OutputFormat::Simple,
            },
            ProcessingSpec {
                stage: ProcessingStage::Tokens,
                format: OutputFormat::Json,
            },
        ]
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            ProcessingStage::Tokens => "tokens",
            ProcessingStage::Check => "check",
        };
        write!(f, "{}-{}", stage, self.format.name())
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Knobs for report rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Append expected token kinds to text diagnostics
    pub show_expected: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_expected: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportRecord<'a> {
    verdict: Verdict,
    accepted: bool,
    message: &'static str,
    template: Option<&'a str>,
    diagnostics: Vec<DiagnosticRecord>,
}

#[derive(Debug, Serialize)]
struct DiagnosticRecord {
    kind: DiagnosticKind,
    message: String,
    line: usize,
    column: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    expected: Vec<TokenKind>,
}

/// Render a check report for `source` in the requested format
pub fn render_report(
    source: &str,
    report: &CheckReport,
    options: &RenderOptions,
) -> Result<String, ProcessingError> {
    let index = LineIndex::new(source);

    match options.format {
        OutputFormat::Text => {
            let mut result = String::new();
            for diagnostic in &report.diagnostics {
                let position = index.position(diagnostic.span().start);
                result.push_str(&format!("{}: {}", position, diagnostic));
                if options.show_expected {
                    result.push_str(&describe_expected(diagnostic));
                }
                result.push('\n');
            }
            result.push_str(report.verdict.message());
            result.push('\n');
            Ok(result)
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let record = ReportRecord {
                verdict: report.verdict,
                accepted: report.accepted(),
                message: report.verdict.message(),
                template: report.template.as_deref(),
                diagnostics: report
                    .diagnostics
                    .iter()
                    .map(|diagnostic| {
                        let position = index.position(diagnostic.span().start);
                        DiagnosticRecord {
                            kind: diagnostic.kind(),
                            message: diagnostic.message(),
                            line: position.line,
                            column: position.column,
                            expected: diagnostic.expected().to_vec(),
                        }
                    })
                    .collect(),
            };
            if options.format == OutputFormat::Json {
                serde_json::to_string_pretty(&record)
                    .map_err(|e| ProcessingError::Serialization(e.to_string()))
            } else {
                serde_yaml::to_string(&record)
                    .map_err(|e| ProcessingError::Serialization(e.to_string()))
            }
        }
        OutputFormat::Simple => Err(ProcessingError::InvalidFormatType(
            "simple format only works with tokens stage".to_string(),
        )),
    }
}

fn describe_expected(diagnostic: &Diagnostic) -> String {
    let names: Vec<&str> = diagnostic.expected().iter().map(TokenKind::name).collect();
    match names.len() {
        0 => String::new(),
        1 => format!(" (expected {})", names[0]),
        _ => format!(" (expected one of {})", names.join(", ")),
    }
}

/// Render the token stream of `source`
pub fn render_tokens(source: &str, format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let index = LineIndex::new(source);
            let mut result = String::new();
            for item in Tokenizer::new(source) {
                let line = match item {
                    Ok(token) => format!(
                        "{} {} {}",
                        index.position(token.span.start),
                        token.kind,
                        token.text.replace('\n', "\\n")
                    ),
                    Err(error) => format!(
                        "{} ILLEGAL {}",
                        index.position(error.span.start),
                        error.character.escape_debug()
                    ),
                };
                result.push_str(&line);
                result.push('\n');
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(&tokenize(source))
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Text | OutputFormat::Yaml => Err(ProcessingError::InvalidFormatType(
            format!("{} format only works with check stage", format.name()),
        )),
    }
}

/// Result of one processing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub output: String,
    /// Set by the check stage only
    pub verdict: Option<Verdict>,
}

/// Process source text according to the given specification
///
/// The check stage runs with the configured recovery and renders with the
/// configured `show_expected`; the format always comes from `spec`.
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    config: &AnalyzerConfig,
) -> Result<Processed, ProcessingError> {
    match spec.stage {
        ProcessingStage::Tokens => Ok(Processed {
            output: render_tokens(source, spec.format)?,
            verdict: None,
        }),
        ProcessingStage::Check => {
            let report = Checker::from_config(config).check_source(source);
            let options = RenderOptions {
                format: spec.format,
                show_expected: config.output.show_expected,
            };
            Ok(Processed {
                output: render_report(source, &report, &options)?,
                verdict: Some(report.verdict),
            })
        }
    }
}

/// Process a file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &AnalyzerConfig,
) -> Result<Processed, ProcessingError> {
    let source = read_source(file_path)?;
    process_source(&source, spec, config)
}

/// Read a source file, mapping a missing file to its own error
pub fn read_source<P: AsRef<Path>>(file_path: P) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    fs::read_to_string(file_path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            ProcessingError::FileNotFound(file_path.display().to_string())
        }
        _ => ProcessingError::IoError(e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_defaults;
    use crate::recognizer::RecoveryMode;

    #[test]
    fn test_spec_parsing() {
        let spec = ProcessingSpec::from_string("check-json").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Check);
        assert_eq!(spec.format, OutputFormat::Json);
        assert_eq!(spec.to_string(), "check-json");

        let spec = ProcessingSpec::from_string("tokens-simple").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Tokens);
        assert_eq!(spec.format, OutputFormat::Simple);
    }

    #[test]
    fn test_spec_errors() {
        assert_eq!(
            ProcessingSpec::from_string("check"),
            Err(ProcessingError::InvalidFormat("check".to_string()))
        );
        assert_eq!(
            ProcessingSpec::from_string("ast-tag"),
            Err(ProcessingError::InvalidStage("ast".to_string()))
        );
        assert_eq!(
            ProcessingSpec::from_string("check-xml"),
            Err(ProcessingError::InvalidFormatType("xml".to_string()))
        );
        assert!(matches!(
            ProcessingSpec::from_string("tokens-yaml"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("check-simple"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
    }

    #[test]
    fn test_available_formats_round_trip() {
        let formats = available_formats();
        assert_eq!(formats.len(), 5);
        for format in formats {
            assert_eq!(
                ProcessingSpec::from_string(&format).unwrap().to_string(),
                format
            );
        }
    }

    #[test]
    fn test_text_report() {
        let source = "var int\n5;";
        let report = Checker::new().check_source(source);
        let output = render_report(source, &report, &RenderOptions::default()).unwrap();
        assert_eq!(
            output,
            "2:1: Error de sintaxis en token '5' (expected ID)\nSe encontraron errores de sintaxis.\n"
        );
    }

    #[test]
    fn test_text_report_without_expected() {
        let source = "var int";
        let report = Checker::new().check_source(source);
        let options = RenderOptions {
            format: OutputFormat::Text,
            show_expected: false,
        };
        let output = render_report(source, &report, &options).unwrap();
        assert_eq!(
            output,
            "1:8: Error de sintaxis en EOF\nSe encontraron errores de sintaxis.\n"
        );
    }

    #[test]
    fn test_json_report() {
        let source = "var int edad; #";
        let report = Checker::new().check_source(source);
        let options = RenderOptions {
            format: OutputFormat::Json,
            show_expected: true,
        };
        let output = render_report(source, &report, &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["verdict"], "rejected");
        assert_eq!(value["accepted"], false);
        assert_eq!(value["template"], serde_json::Value::Null);
        assert_eq!(value["diagnostics"][0]["kind"], "lexical");
        assert_eq!(value["diagnostics"][0]["message"], "Illegal character '#'");
        assert_eq!(value["diagnostics"][0]["column"], 15);
        assert!(value["diagnostics"][0].get("expected").is_none());
    }

    #[test]
    fn test_yaml_report() {
        let source = "var asd letras;";
        let report = Checker::new().check_source(source);
        let options = RenderOptions {
            format: OutputFormat::Yaml,
            show_expected: true,
        };
        let output = render_report(source, &report, &options).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(value["verdict"].as_str(), Some("accepted"));
        assert_eq!(value["template"].as_str(), Some("declaration"));
        assert_eq!(
            value["diagnostics"].as_sequence().map(|s| s.len()),
            Some(0)
        );
    }

    #[test]
    fn test_simple_tokens() {
        let output = render_tokens("var x;\n@ 7", OutputFormat::Simple).unwrap();
        assert_eq!(
            output,
            "1:1 VAR var\n1:5 ID x\n1:6 SEMI ;\n2:1 ILLEGAL @\n2:3 NUMBER 7\n"
        );
    }

    #[test]
    fn test_json_tokens() {
        let output = render_tokens("si 5", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["kind"], "IF");
        assert_eq!(value[0]["value"], "si");
        assert_eq!(value[1]["kind"], "NUMBER");
        assert_eq!(value[1]["value"], 5);
        assert_eq!(value[1]["span"]["start"], 3);
    }

    #[test]
    fn test_process_source_dispatches() {
        let config = load_defaults().unwrap();
        let spec = ProcessingSpec::from_string("check-text").unwrap();
        let processed = process_source("   ", &spec, &config).unwrap();
        assert_eq!(processed.output, "No hay código para verificar.\n");
        assert_eq!(processed.verdict, Some(Verdict::Empty));

        let spec = ProcessingSpec::from_string("tokens-simple").unwrap();
        let processed = process_source("var", &spec, &config).unwrap();
        assert_eq!(processed.output, "1:1 VAR var\n");
        assert_eq!(processed.verdict, None);
    }

    #[test]
    fn test_process_source_follows_config() {
        let mut config = load_defaults().unwrap();
        config.output.show_expected = false;
        config.recovery.mode = RecoveryMode::Halt;

        let spec = ProcessingSpec::from_string("check-text").unwrap();
        let processed = process_source("var int 5; var int a; 7", &spec, &config).unwrap();
        assert_eq!(
            processed.output,
            "1:9: Error de sintaxis en token '5'\nSe encontraron errores de sintaxis.\n"
        );
        assert_eq!(processed.verdict, Some(Verdict::Rejected));
    }

    #[test]
    fn test_missing_file() {
        let config = load_defaults().unwrap();
        let spec = ProcessingSpec::from_string("check-text").unwrap();
        let result = process_file("/nonexistent/program.txt", &spec, &config);
        assert!(matches!(result, Err(ProcessingError::FileNotFound(_))));
    }
}
