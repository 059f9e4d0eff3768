//! Grammar rule set
//!
//! The language is a closed list of whole-input templates: alternatives of a
//! single start symbol, each a fixed sequence of token kinds. There is no
//! recursion, repetition or optional element, so a [`Grammar`] is just the
//! ordered list of `(name, kinds)` pairs plus any detached productions that
//! are defined but never reachable from the start symbol.

pub mod templates;

use crate::token::TokenKind;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The stock grammar, built on first use and shared read-only afterwards
pub static STANDARD_GRAMMAR: Lazy<Grammar> = Lazy::new(Grammar::standard);

/// Name of the start symbol of the stock grammar
pub const START_SYMBOL: &str = "completo";

/// One template: a named, fixed-length sequence of expected token kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Production {
    pub name: String,
    pub kinds: Vec<TokenKind>,
}

impl Production {
    pub fn new(name: impl Into<String>, kinds: impl Into<Vec<TokenKind>>) -> Self {
        Self {
            name: name.into(),
            kinds: kinds.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Expected kind at `position`, or `None` past the end
    pub fn expects(&self, position: usize) -> Option<TokenKind> {
        self.kinds.get(position).copied()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :", self.name)?;
        for kind in &self.kinds {
            write!(f, " {}", kind)?;
        }
        Ok(())
    }
}

/// Problems found while assembling a grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("start symbol '{0}' has no productions")]
    NoProductions(String),
    #[error("production '{0}' expects no tokens")]
    EmptyProduction(String),
    #[error("production '{name}' repeats the sequence of an earlier production")]
    DuplicateProduction { name: String },
}

/// An immutable, closed set of templates
#[derive(Debug, Clone, Serialize)]
pub struct Grammar {
    start: String,
    productions: Vec<Production>,
    detached: Vec<Production>,
}

impl Grammar {
    /// Assemble a grammar, rejecting empty or repeated sequences.
    pub fn new(
        start: impl Into<String>,
        productions: Vec<Production>,
    ) -> Result<Self, GrammarError> {
        let start = start.into();
        if productions.is_empty() {
            return Err(GrammarError::NoProductions(start));
        }
        validate(&productions)?;
        Ok(Self {
            start,
            productions,
            detached: Vec::new(),
        })
    }

    /// Attach productions that exist as rule data only.
    pub fn with_detached(mut self, detached: Vec<Production>) -> Result<Self, GrammarError> {
        validate(&detached)?;
        self.detached = detached;
        Ok(self)
    }

    /// The five stock templates (six productions) and the detached
    /// `condition` rule
    pub fn standard() -> Self {
        let build = |rules: &[(&str, &[TokenKind])]| -> Vec<Production> {
            rules
                .iter()
                .map(|(name, kinds)| Production::new(*name, kinds.to_vec()))
                .collect()
        };
        Self {
            start: START_SYMBOL.to_string(),
            productions: build(templates::START),
            detached: build(templates::CONDITION),
        }
    }

    pub fn start_symbol(&self) -> &str {
        &self.start
    }

    /// Alternatives of the start symbol, in declaration order
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Productions never reachable from the start symbol
    pub fn detached(&self) -> &[Production] {
        &self.detached
    }

    /// Distinct template names, in declaration order
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for production in &self.productions {
            if !names.contains(&production.name.as_str()) {
                names.push(&production.name);
            }
        }
        names
    }

    /// Kinds that can begin an input, in declaration order
    pub fn first_kinds(&self) -> Vec<TokenKind> {
        let mut kinds = Vec::new();
        for kind in self.productions.iter().filter_map(|p| p.expects(0)) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate(productions: &[Production]) -> Result<(), GrammarError> {
    for (index, production) in productions.iter().enumerate() {
        if production.is_empty() {
            return Err(GrammarError::EmptyProduction(production.name.clone()));
        }
        if productions[..index]
            .iter()
            .any(|earlier| earlier.kinds == production.kinds)
        {
            return Err(GrammarError::DuplicateProduction {
                name: production.name.clone(),
            });
        }
    }
    Ok(())
}
