use std::fmt;
use std::ops::Range;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, span: Range<usize>, source: &str) -> Self {
        let slice = source.get(span.clone()).unwrap_or_default().to_owned();
        Self { kind, span, slice }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// Nothing between two operators, or no input at all.
    EmptyNode,
    /// No registered node parser recognized the text.
    UnknownNode,
    UnbalancedBracket,
    UnbalancedParenthesis,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNode => write!(f, "expected a die, an interval or a number"),
            Self::UnknownNode => write!(f, "unrecognized dice"),
            Self::UnbalancedBracket => write!(f, "unbalanced bracket"),
            Self::UnbalancedParenthesis => write!(f, "unbalanced parenthesis"),
        }
    }
}
