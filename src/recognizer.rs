//! Grammar recognizer
//!
//! Pulls tokens one at a time and matches them against the alternatives of
//! the start symbol. Every template is a flat sequence, so the matcher state
//! is just the set of templates that agree with everything consumed so far
//! plus the position inside them. A token commits the match by narrowing
//! that set; a token that empties it is a syntax error. Nothing is ever
//! re-read, so there is no backtracking across alternatives.
//!
//! When the templates begin with distinct kinds this is plain first-token
//! selection. The stock templates share prefixes (`var int ID ;` begins
//! three of them), which the narrowing handles without lookahead beyond the
//! current token.
//!
//! Lexical errors arrive interleaved with tokens and are forwarded to the
//! sink as they are pulled, so diagnostics come out in source order.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::grammar::{Grammar, Production, STANDARD_GRAMMAR};
use crate::lexer::LexError;
use crate::token::{Token, TokenKind};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// What the driver does after a syntax error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecoveryMode {
    /// Drop the offending token and start over from the start symbol,
    /// staying quiet until enough tokens have been matched again.
    Synchronize,
    /// Stop matching at the first syntax error.
    Halt,
}

/// Error recovery settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recovery {
    pub mode: RecoveryMode,
    /// Tokens that must be matched after a syntax error before the next
    /// one is reported
    pub quiet_shifts: usize,
}

impl Recovery {
    pub const DEFAULT_QUIET_SHIFTS: usize = 3;

    pub fn halt() -> Self {
        Self {
            mode: RecoveryMode::Halt,
            quiet_shifts: Self::DEFAULT_QUIET_SHIFTS,
        }
    }
}

impl Default for Recovery {
    fn default() -> Self {
        Self {
            mode: RecoveryMode::Synchronize,
            quiet_shifts: Self::DEFAULT_QUIET_SHIFTS,
        }
    }
}

/// Summary of one recognition run. The diagnostics themselves went to the
/// sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recognition<'g> {
    /// Template completed when input ran out
    pub matched: Option<&'g Production>,
    pub tokens: usize,
    pub lexical_errors: usize,
    pub syntax_errors: usize,
}

impl Recognition<'_> {
    /// A template matched and nothing at all was reported
    pub fn accepted(&self) -> bool {
        self.matched.is_some() && self.diagnostics() == 0
    }

    pub fn diagnostics(&self) -> usize {
        self.lexical_errors + self.syntax_errors
    }
}

/// Templates still consistent with the tokens consumed since the last
/// (re)start
struct Cursor<'g> {
    live: Vec<&'g Production>,
    position: usize,
}

impl<'g> Cursor<'g> {
    fn start(grammar: &'g Grammar) -> Self {
        Self {
            live: grammar.productions().iter().collect(),
            position: 0,
        }
    }

    fn restart(&mut self, grammar: &'g Grammar) {
        *self = Self::start(grammar);
    }

    /// Consume `kind` if any live template expects it here.
    fn advance(&mut self, kind: TokenKind) -> bool {
        let position = self.position;
        if !self.live.iter().any(|p| p.expects(position) == Some(kind)) {
            return false;
        }
        self.live.retain(|p| p.expects(position) == Some(kind));
        self.position += 1;
        true
    }

    /// Kinds the live templates accept next, without repeats
    fn expected(&self) -> Vec<TokenKind> {
        let mut kinds = Vec::new();
        for kind in self.live.iter().filter_map(|p| p.expects(self.position)) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }

    fn completed(&self) -> Option<&'g Production> {
        self.live
            .iter()
            .copied()
            .find(|p| self.position > 0 && p.len() == self.position)
    }

    fn names(&self) -> Vec<&'g str> {
        let mut names: Vec<&'g str> = Vec::new();
        for production in self.live.iter().copied() {
            if !names.contains(&production.name.as_str()) {
                names.push(&production.name);
            }
        }
        names
    }
}

/// Matches token streams against a borrowed [`Grammar`]
#[derive(Debug, Clone, Copy)]
pub struct Recognizer<'g> {
    grammar: &'g Grammar,
    recovery: Recovery,
}

impl Recognizer<'static> {
    /// Recognizer for the stock grammar
    pub fn standard() -> Self {
        Self::new(&STANDARD_GRAMMAR)
    }
}

impl<'g> Recognizer<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            recovery: Recovery::default(),
        }
    }

    pub fn with_recovery(mut self, recovery: Recovery) -> Self {
        self.recovery = recovery;
        self
    }

    /// Match a whole token stream, reporting every problem to `sink`.
    ///
    /// The stream is always drained, even after matching has stopped, so
    /// every illegal character in the input gets reported.
    pub fn recognize<I, S>(&self, tokens: I, sink: &mut S) -> Recognition<'g>
    where
        I: IntoIterator<Item = Result<Token, LexError>>,
        S: DiagnosticSink + ?Sized,
    {
        let mut outcome = Recognition::default();
        let mut cursor = Cursor::start(self.grammar);
        // Matched tokens still owed before errors are reported again
        let mut quiet = 0usize;
        let mut halted = false;
        let mut end = 0usize;

        for item in tokens {
            let token = match item {
                Ok(token) => token,
                Err(error) => {
                    end = error.span.end;
                    outcome.lexical_errors += 1;
                    sink.report(error.into());
                    continue;
                }
            };
            end = token.span.end;
            outcome.tokens += 1;

            if halted {
                continue;
            }

            if cursor.advance(token.kind) {
                trace!("matched {} at position {}", token, cursor.position);
                if cursor.position == 1 {
                    debug!("{} commits to {:?}", token.kind, cursor.names());
                }
                quiet = quiet.saturating_sub(1);
                continue;
            }

            if quiet == 0 {
                debug!(
                    "syntax error at {} (position {} of {:?})",
                    token,
                    cursor.position,
                    cursor.names()
                );
                outcome.syntax_errors += 1;
                let expected = cursor.expected();
                sink.report(Diagnostic::UnexpectedToken { token, expected });
            } else {
                debug!("discarding {} while resynchronizing", token);
            }

            match self.recovery.mode {
                RecoveryMode::Halt => halted = true,
                RecoveryMode::Synchronize => {
                    quiet = self.recovery.quiet_shifts;
                    cursor.restart(self.grammar);
                }
            }
        }

        if halted {
            return outcome;
        }

        match cursor.completed() {
            Some(production) => {
                debug!("input matches template '{}'", production.name);
                outcome.matched = Some(production);
            }
            None if quiet == 0 => {
                debug!("input ended at position {}", cursor.position);
                outcome.syntax_errors += 1;
                sink.report(Diagnostic::UnexpectedEof {
                    offset: end,
                    expected: cursor.expected(),
                });
            }
            None => debug!("input ended while resynchronizing"),
        }

        outcome
    }
}
