//! Diagnostics and the sink they are reported to
//!
//! A check never fails: every problem becomes a [`Diagnostic`] pushed to a
//! [`DiagnosticSink`] in the order it is found. The messages are the ones
//! the teaching material has always shown, so they are kept verbatim.

use crate::lexer::LexError;
use crate::token::{Span, Token, TokenKind};
use serde::Serialize;
use thiserror::Error;

/// Which stage produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
}

/// A reported problem with the checked text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// A character that matches no lexical pattern
    #[error("Illegal character '{character}'")]
    IllegalCharacter { character: char, span: Span },

    /// A token no remaining template accepts at its position
    #[error("Error de sintaxis en token '{}'", .token.text)]
    UnexpectedToken {
        token: Token,
        expected: Vec<TokenKind>,
    },

    /// Input ended before any template was complete
    #[error("Error de sintaxis en EOF")]
    UnexpectedEof {
        offset: usize,
        expected: Vec<TokenKind>,
    },
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::IllegalCharacter { .. } => DiagnosticKind::Lexical,
            Diagnostic::UnexpectedToken { .. } | Diagnostic::UnexpectedEof { .. } => {
                DiagnosticKind::Syntax
            }
        }
    }

    /// Source range the diagnostic points at; empty at end of input
    pub fn span(&self) -> Span {
        match self {
            Diagnostic::IllegalCharacter { span, .. } => span.clone(),
            Diagnostic::UnexpectedToken { token, .. } => token.span.clone(),
            Diagnostic::UnexpectedEof { offset, .. } => *offset..*offset,
        }
    }

    /// Token kinds that would have been accepted instead
    pub fn expected(&self) -> &[TokenKind] {
        match self {
            Diagnostic::IllegalCharacter { .. } => &[],
            Diagnostic::UnexpectedToken { expected, .. }
            | Diagnostic::UnexpectedEof { expected, .. } => expected,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_syntax(&self) -> bool {
        self.kind() == DiagnosticKind::Syntax
    }
}

impl From<LexError> for Diagnostic {
    fn from(error: LexError) -> Self {
        Diagnostic::IllegalCharacter {
            character: error.character,
            span: error.span,
        }
    }
}

/// Append-only receiver of diagnostics, implemented by whatever displays them
pub trait DiagnosticSink {
    /// Record one diagnostic, after every earlier one.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Forget everything recorded so far. Called before each check.
    fn clear(&mut self);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// Sink that keeps only the messages, for shells that show plain strings
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MessageList(pub Vec<String>);

impl DiagnosticSink for MessageList {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic.message());
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}
