//! The check operation
//!
//! [`Checker`] ties a reserved-word table and a grammar together and runs
//! one check per call: clear the sink, tokenize lazily, recognize, and hand
//! back a [`Verdict`]. It only borrows its tables, so any number of checkers
//! can share the process-wide stock ones.

use crate::config::AnalyzerConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::grammar::{Grammar, STANDARD_GRAMMAR};
use crate::lexer::{ReservedWords, Tokenizer, RESERVED_WORDS};
use crate::recognizer::{Recognizer, Recovery};
use log::info;
use serde::Serialize;
use std::fmt;

/// Outcome of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// One template matched and nothing was reported
    Accepted,
    /// At least one diagnostic was reported
    Rejected,
    /// The text was blank; nothing was checked
    Empty,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// Message shown to the student
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Accepted => "La sintaxis es correcta.",
            Verdict::Rejected => "Se encontraron errores de sintaxis.",
            Verdict::Empty => "No hay código para verificar.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Everything one check produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub verdict: Verdict,
    /// Name of the matched template, when accepted
    pub template: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn accepted(&self) -> bool {
        self.verdict.is_accepted()
    }

    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(Diagnostic::message).collect()
    }
}

/// Runs checks against borrowed, immutable tables
#[derive(Debug, Clone, Copy)]
pub struct Checker<'a> {
    reserved: &'a ReservedWords,
    grammar: &'a Grammar,
    recovery: Recovery,
}

impl Checker<'static> {
    /// Checker over the stock reserved words and grammar
    pub fn new() -> Self {
        Self::with_tables(&RESERVED_WORDS, &STANDARD_GRAMMAR)
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new().with_recovery(config.recovery())
    }
}

impl Default for Checker<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Checker<'a> {
    pub fn with_tables(reserved: &'a ReservedWords, grammar: &'a Grammar) -> Self {
        Self {
            reserved,
            grammar,
            recovery: Recovery::default(),
        }
    }

    pub fn with_recovery(mut self, recovery: Recovery) -> Self {
        self.recovery = recovery;
        self
    }

    /// Check `source`, streaming diagnostics into `sink`.
    ///
    /// The sink is cleared first. Surrounding whitespace is ignored; blank
    /// text yields [`Verdict::Empty`] without touching the tokenizer.
    pub fn check<S>(&self, source: &str, sink: &mut S) -> Verdict
    where
        S: DiagnosticSink + ?Sized,
    {
        self.run(source, sink).0
    }

    /// Check `source`, collecting everything into a [`CheckReport`].
    pub fn check_source(&self, source: &str) -> CheckReport {
        let mut diagnostics = Vec::new();
        let (verdict, template) = self.run(source, &mut diagnostics);
        CheckReport {
            verdict,
            template,
            diagnostics,
        }
    }

    fn run<S>(&self, source: &str, sink: &mut S) -> (Verdict, Option<String>)
    where
        S: DiagnosticSink + ?Sized,
    {
        sink.clear();

        let body = source.trim_end();
        let leading = body.len() - body.trim_start().len();
        if leading == body.len() {
            info!("nothing to check");
            return (Verdict::Empty, None);
        }

        let tokens = Tokenizer::with_reserved(body, self.reserved).starting_at(leading);
        let recognition = Recognizer::new(self.grammar)
            .with_recovery(self.recovery)
            .recognize(tokens, sink);

        if recognition.accepted() {
            let template = recognition.matched.map(|p| p.name.clone());
            info!("accepted as {:?}", template);
            (Verdict::Accepted, template)
        } else {
            info!(
                "rejected with {} lexical and {} syntax errors",
                recognition.lexical_errors, recognition.syntax_errors
            );
            (Verdict::Rejected, None)
        }
    }
}
