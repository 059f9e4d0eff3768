//! Token definitions for the checked language
//!
//! [`TokenKind`] is the closed vocabulary shared by the tokenizer and the
//! grammar. The names returned by [`TokenKind::name`] are the historical
//! ones used by the teaching material, which is why the comma is `GT`.

use serde::Serialize;
use std::fmt;

/// Byte range of a lexeme in the source text
pub type Span = logos::Span;

/// All token kinds the tokenizer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    // Punctuation
    Plus,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semi,
    Assign,
    /// Bound to `,`
    Gt,
    Lt,

    // Literals
    Number,
    Id,
    DoubleString,

    // Reserved words
    Int,
    String,
    Main,
    Funn,
    If,
    IfElse,
    Return,
    Repite,
    Contenido,
    Desde,
    Hasta,
    Var,
}

impl TokenKind {
    /// Upper-case name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Plus => "PLUS",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Semi => "SEMI",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Gt => "GT",
            TokenKind::Lt => "LT",
            TokenKind::Number => "NUMBER",
            TokenKind::Id => "ID",
            TokenKind::DoubleString => "DOUBLESTRING",
            TokenKind::Int => "INT",
            TokenKind::String => "STRING",
            TokenKind::Main => "MAIN",
            TokenKind::Funn => "FUNN",
            TokenKind::If => "IF",
            TokenKind::IfElse => "IFELSE",
            TokenKind::Return => "RETURN",
            TokenKind::Repite => "REPITE",
            TokenKind::Contenido => "CONTENIDO",
            TokenKind::Desde => "DESDE",
            TokenKind::Hasta => "HASTA",
            TokenKind::Var => "VAR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value carried by a token
///
/// Numbers are converted when tokenized; everything else keeps its literal
/// text, quotes included for strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Integer(u64),
    Text(String),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Integer(n) => write!(f, "{}", n),
            TokenValue::Text(text) => f.write_str(text),
        }
    }
}

/// A classified lexeme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    /// How the token is written back in messages. Equal to the value's text
    /// except for numbers too large for `value`.
    #[serde(skip)]
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, span: Span) -> Self {
        let text = value.to_string();
        Self {
            kind,
            value,
            text,
            span,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Integer value of a `NUMBER` token
    pub fn as_integer(&self) -> Option<u64> {
        match self.value {
            TokenValue::Integer(n) => Some(n),
            TokenValue::Text(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.text)
    }
}
