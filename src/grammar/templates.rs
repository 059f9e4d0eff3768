//! The stock templates
//!
//! Each template is a flat sequence of token kinds. `CONTENIDO` is a literal
//! keyword standing in for a body, not a nested statement list.

use crate::token::TokenKind::{self, *};

/// `funn concatenar(int num1, int num2) { return num1 + num2; }`
pub const FUNCTION: &[TokenKind] = &[
    Funn, Id, LParen, Int, Id, Gt, Int, Id, RParen, LBrace, Return, Id, Plus, Id, Semi, RBrace,
];

/// `var int numeros;`
pub const DECLARATION_INT: &[TokenKind] = &[Var, Int, Id, Semi];

/// `var asd letras;`
pub const DECLARATION_STRING: &[TokenKind] = &[Var, String, Id, Semi];

/// `funn inn() { var int resultado; resultado = concatenar(5, 7); }`
pub const MAIN: &[TokenKind] = &[
    Funn, Main, LParen, RParen, LBrace, Var, Int, Id, Semi, Id, Assign, Id, LParen, Number, Gt,
    Number, RParen, Semi, RBrace,
];

/// `var int edad; edad = 18; si edad < 18 { contenido } sino { contenido }`
pub const CONDITIONAL: &[TokenKind] = &[
    Var, Int, Id, Semi, Id, Assign, Number, Semi, If, Id, Lt, Number, LBrace, Contenido, RBrace,
    IfElse, LBrace, Contenido, RBrace,
];

/// `var int ciclito; repite ciclito desde 1 hasta 10 { contenido }`
pub const LOOP: &[TokenKind] = &[
    Var, Int, Id, Semi, Repite, Id, Desde, Number, Hasta, Number, LBrace, Contenido, RBrace,
];

/// Alternatives of the start symbol, in order
pub const START: &[(&str, &[TokenKind])] = &[
    ("function", FUNCTION),
    ("declaration", DECLARATION_INT),
    ("declaration", DECLARATION_STRING),
    ("main", MAIN),
    ("conditional", CONDITIONAL),
    ("loop", LOOP),
];

/// Comparison operators. Defined but not reachable from the start symbol.
pub const CONDITION: &[(&str, &[TokenKind])] = &[
    ("condition", &[Lt]),
    ("condition", &[Gt]),
    ("condition", &[Gt, Gt]),
];
