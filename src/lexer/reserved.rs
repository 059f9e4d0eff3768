//! Reserved-word table
//!
//! Identifier-shaped lexemes are looked up here exactly once, right after
//! the identifier pattern matches. A hit reclassifies the lexeme, a miss
//! leaves it as [`TokenKind::Id`].

use crate::token::TokenKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The stock table, built on first use and shared read-only afterwards
pub static RESERVED_WORDS: Lazy<ReservedWords> = Lazy::new(ReservedWords::standard);

const STANDARD_WORDS: &[(&str, TokenKind)] = &[
    ("int", TokenKind::Int),
    ("asd", TokenKind::String),
    ("inn", TokenKind::Main),
    ("funn", TokenKind::Funn),
    ("si", TokenKind::If),
    ("sino", TokenKind::IfElse),
    ("return", TokenKind::Return),
    ("repite", TokenKind::Repite),
    ("contenido", TokenKind::Contenido),
    ("desde", TokenKind::Desde),
    ("hasta", TokenKind::Hasta),
    ("var", TokenKind::Var),
];

/// Mapping from reserved spelling to token kind
#[derive(Debug, Clone)]
pub struct ReservedWords {
    words: HashMap<&'static str, TokenKind>,
}

impl ReservedWords {
    /// The language's reserved words
    pub fn standard() -> Self {
        Self {
            words: STANDARD_WORDS.iter().copied().collect(),
        }
    }

    /// Classify an identifier-shaped lexeme
    pub fn classify(&self, lexeme: &str) -> TokenKind {
        self.words.get(lexeme).copied().unwrap_or(TokenKind::Id)
    }

    pub fn get(&self, lexeme: &str) -> Option<TokenKind> {
        self.words.get(lexeme).copied()
    }

    /// Reserved spellings in alphabetical order
    pub fn words(&self) -> Vec<&'static str> {
        let mut words: Vec<_> = self.words.keys().copied().collect();
        words.sort_unstable();
        words
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self::standard()
    }
}
