use super::lexer::TokenKind;
use crate::roll::{Die, FixedDie, Pool, UniformDie};
use logos::Logos;

/// The built-in node parser.
///
/// Recognizes a number (`3`, `-2.5`), a die (`d6`) or an interval
/// (`[2, 5]`), where a die or interval may be prefixed with a count that is
/// itself a number, a die or an interval (`2d6`, `d4d6`, `[1, 2][3, 4]`).
/// Anything else, including values that fail validation, is no match.
pub fn parse_node(text: &str) -> Option<Pool> {
    let tokens: Vec<_> = TokenKind::lexer(text).collect();
    match tokens.as_slice() {
        [TokenKind::Number(value)] => FixedDie::new(*value).ok().map(Pool::new),
        [value] => uniform(*value).map(Pool::new),
        [count, value] => Pool::with_count(uniform(*value)?, count_of(*count)?).ok(),
        _ => None,
    }
}

fn uniform(token: TokenKind) -> Option<Die> {
    match token {
        TokenKind::Die(faces) => UniformDie::with_faces(faces).ok().map(Die::from),
        TokenKind::Interval((min, max)) => UniformDie::new(min, max).ok().map(Die::from),
        _ => None,
    }
}

fn count_of(token: TokenKind) -> Option<Die> {
    match token {
        TokenKind::Number(count) => FixedDie::new(count).ok().map(Die::from),
        other => uniform(other),
    }
}
