//! Tokenizer built on logos
//!
//! logos does the pattern matching (longest match wins, whitespace skipped).
//! This wrapper adds what logos leaves to the caller: reserved-word
//! classification, integer conversion, byte spans relative to the whole
//! source, and one-character recovery after an illegal character.

use crate::lexer::reserved::{ReservedWords, RESERVED_WORDS};
use crate::token::{Span, Token, TokenKind, TokenValue};
use log::{debug, trace};
use logos::Logos;
use std::iter::FusedIterator;
use thiserror::Error;

/// Raw lexical classes recognized by logos
///
/// Identifier-shaped lexemes all come out as `Word`; the reserved-word
/// table decides their final kind.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n]+")]
enum RawToken {
    #[token("+")]
    Plus,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,
    #[token("=")]
    Assign,
    #[token(",")]
    Comma,
    #[token("<")]
    Less,
    #[regex("[0-9]+")]
    Number,
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,
    #[regex(r#""[^"]*""#)]
    DoubleString,
}

/// A character that matches no lexical pattern
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Illegal character '{character}'")]
pub struct LexError {
    pub character: char,
    pub span: Span,
}

/// Lazy token stream over one source string
///
/// Yields `Err` for every illegal character and keeps going. Once it
/// returns `None` it stays exhausted.
pub struct Tokenizer<'src, 'words> {
    source: &'src str,
    /// Offset of `inner`'s input within `source`
    base: usize,
    inner: logos::Lexer<'src, RawToken>,
    reserved: &'words ReservedWords,
}

impl<'src> Tokenizer<'src, 'static> {
    /// Tokenizer using the stock reserved-word table
    pub fn new(source: &'src str) -> Self {
        Self::with_reserved(source, &RESERVED_WORDS)
    }
}

impl<'src, 'words> Tokenizer<'src, 'words> {
    pub fn with_reserved(source: &'src str, reserved: &'words ReservedWords) -> Self {
        Self {
            source,
            base: 0,
            inner: RawToken::lexer(source),
            reserved,
        }
    }

    /// Begin scanning at byte `offset` rather than at the start. Spans stay
    /// relative to the whole source. Offsets that are not character
    /// boundaries are ignored.
    pub fn starting_at(mut self, offset: usize) -> Self {
        if offset > 0 && self.source.is_char_boundary(offset) {
            self.resume_at(offset);
        }
        self
    }

    /// Restart logos right after a skipped character.
    fn resume_at(&mut self, offset: usize) {
        self.base = offset;
        self.inner = RawToken::lexer(&self.source[offset..]);
    }

    fn build(&self, raw: RawToken, slice: &str, span: Span) -> Token {
        let kind = match raw {
            RawToken::Plus => TokenKind::Plus,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Semi => TokenKind::Semi,
            RawToken::Assign => TokenKind::Assign,
            RawToken::Comma => TokenKind::Gt,
            RawToken::Less => TokenKind::Lt,
            RawToken::Number => TokenKind::Number,
            RawToken::Word => self.reserved.classify(slice),
            RawToken::DoubleString => TokenKind::DoubleString,
        };

        match raw {
            RawToken::Number => match slice.parse() {
                Ok(n) => Token::new(kind, TokenValue::Integer(n), span),
                Err(_) => {
                    debug!("integer literal {} saturated to u64::MAX", slice);
                    Token::new(kind, TokenValue::Integer(u64::MAX), span)
                        .with_text(slice.trim_start_matches('0'))
                }
            },
            _ => Token::new(kind, TokenValue::Text(slice.to_string()), span),
        }
    }
}

impl<'src, 'words> Iterator for Tokenizer<'src, 'words> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let local = self.inner.span();
        let span = self.base + local.start..self.base + local.end;

        match result {
            Ok(raw) => {
                let token = self.build(raw, self.inner.slice(), span);
                trace!("token {} at {:?}", token, token.span);
                Some(Ok(token))
            }
            Err(()) => {
                let character = self.source[span.start..].chars().next()?;
                let end = span.start + character.len_utf8();
                // logos may have swallowed a partial match (an unterminated
                // string, say); only the first character is illegal.
                if span.end != end {
                    self.resume_at(end);
                }
                debug!("illegal character {:?} at {}", character, span.start);
                Some(Err(LexError {
                    character,
                    span: span.start..end,
                }))
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_, '_> {}

/// Convenience function to tokenize a string, dropping illegal characters
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).filter_map(|result| result.ok()).collect()
}

/// Tokenize a string, keeping illegal characters apart from the tokens
pub fn tokenize_with_errors(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for result in Tokenizer::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(error) => errors.push(error),
        }
    }

    (tokens, errors)
}
