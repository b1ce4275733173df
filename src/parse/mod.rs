//! Text to chain: `2d6+3`, `d4d6-[2, 5]`, `3d8(+3)`.
//!
//! A chain is a list of nodes joined by `+`, `-`, `*` or `/`. Operators inside
//! an interval are part of it, and `+` or `-` written right after another
//! operator is a sign. Wrapping an operator in parentheses, as in `3d8(+3)`,
//! applies it once per roll of the preceding pool. Each node is handed to a
//! [`NodeParsers`] registry, which by default only knows [`parse_node`].

mod error;
mod lexer;
mod node;
mod parser;
mod registry;

pub use error::{ParseError, ParseErrorKind};
pub(crate) use lexer::TokenKind;
pub use node::parse_node;
pub use registry::{NodeParser, NodeParsers, ParserId};
