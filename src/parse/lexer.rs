use crate::common::{Float, Int};
use logos::{Lexer, Logos};

/// Tokens of a single chain node such as `2d6`, `d4[2, 5]` or `-3.5`.
#[derive(Logos, Debug, Copy, Clone, PartialEq)]
pub enum TokenKind {
    #[regex(r"-?([0-9]+(\.[0-9]*)?|\.[0-9]+)", |lex| lex.slice().parse())]
    Number(Float),

    #[regex(r"d[0-9]+", |lex| lex.slice()[1..].parse())]
    Die(Int),

    #[regex(r"\[[ \t]*-?[0-9]+[ \t]*,[ \t]*-?[0-9]+[ \t]*\]", parse_interval)]
    Interval((Int, Int)),

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

fn parse_interval(lex: &mut Lexer<TokenKind>) -> Option<(Int, Int)> {
    let inner = lex.slice().trim_start_matches('[').trim_end_matches(']');
    let (min, max) = inner.split_once(',')?;
    Some((min.trim().parse().ok()?, max.trim().parse().ok()?))
}
