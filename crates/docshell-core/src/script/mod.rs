//! Shell-line front end.
//!
//! Lines such as `db.users.find({age: 30}).limit(5)` are lexed, parsed into
//! a [`Chain`] and evaluated against a [`Db`](crate::Db), producing the same
//! command text the builders produce when called directly.

/// Syntax tree types
#[allow(missing_docs)]
pub mod ast;
/// Chain evaluator
#[allow(missing_docs)]
pub mod eval;
/// Shell-line lexer
#[allow(missing_docs)]
pub mod lexer;
/// Shell-line parser
#[allow(missing_docs)]
pub mod parser;

// Re-export main types
pub use ast::{Chain, Step};
pub use eval::{evaluate, Evaluator, Target, ROOT};
pub use lexer::{Lexer, LexerError, Token};
pub use parser::{parse_line, ParseError, Parser, MAX_NESTING_DEPTH};
