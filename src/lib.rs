//! # analizador
//!
//! A recognizer for a small invented teaching language. A program in the
//! language is one of a fixed set of whole-input templates (a variable
//! declaration, a function, a `main` skeleton, an if/else skeleton and a
//! counted loop). Checking a text tokenizes it, matches the tokens against
//! the templates and reports what went wrong, if anything.
//!
//! ```text
//! var int edad;
//! edad = 18;
//! si edad < 18 {
//! contenido
//! } sino {
//! contenido }
//! ```
//!
//! The pieces, leaf first:
//!
//! - [`lexer`]: logos-based tokenizer plus the reserved-word table
//! - [`grammar`]: the closed template set
//! - [`recognizer`]: matches a token stream against the grammar
//! - [`checker`]: the check operation and its [`Verdict`]
//! - [`processor`]: text/JSON/YAML rendering of reports and token streams
//!
//! Nothing here builds a syntax tree or evaluates anything.

pub mod checker;
pub mod config;
pub mod diagnostics;
pub mod grammar;
pub mod lexer;
pub mod location;
pub mod processor;
pub mod recognizer;
pub mod token;

pub use checker::{CheckReport, Checker, Verdict};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, MessageList};
pub use grammar::{Grammar, GrammarError, Production, STANDARD_GRAMMAR};
pub use lexer::{tokenize, LexError, ReservedWords, Tokenizer, RESERVED_WORDS};
pub use recognizer::{Recognition, Recognizer, Recovery, RecoveryMode};
pub use token::{Token, TokenKind, TokenValue};

/// Check `source` with the stock tables and default recovery
pub fn check(source: &str) -> CheckReport {
    Checker::new().check_source(source)
}
