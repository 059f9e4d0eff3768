//! Lexer
//!
//! Turns source text into a stream of [`Token`](crate::token::Token)s.
//!
//! Structure:
//!     Pattern matching is done by logos in [`tokenizer`]. Identifier-shaped
//!     lexemes are then reclassified through the [`reserved`] word table, so
//!     logos never has to know about keywords.
//!
//! Whitespace is exactly space, tab and newline. Anything else that matches
//! no pattern comes out of the tokenizer as a [`LexError`] for that single
//! character, after which scanning resumes with the next character.

pub mod reserved;
pub mod tokenizer;

pub use reserved::{ReservedWords, RESERVED_WORDS};
pub use tokenizer::{tokenize, tokenize_with_errors, LexError, Tokenizer};
