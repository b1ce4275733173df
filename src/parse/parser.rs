use super::{NodeParsers, ParseError, ParseErrorKind};
use crate::common::Operation;
use crate::roll::Chain;
use std::ops::Range;

type PResult<T> = Result<T, ParseError>;

/// The text of one node and the operation joining it to the nodes before it.
#[derive(Debug, PartialEq)]
struct Segment {
    operation: Operation,
    span: Range<usize>,
}

/// Splits `source` at its top-level operators.
///
/// Characters inside `[...]` are never operators. A `+` or `-` at the start,
/// or right after another operator, is the sign of a number. An operator
/// following text that ends in `(` is the each variant of `+` or `-`.
/// Brackets and parentheses must be balanced.
fn split(source: &str) -> PResult<Vec<Segment>> {
    let end = source.trim_end().len();
    let start = end - source[..end].trim_start().len();

    let mut segments = vec![];
    let mut operation = Operation::Plus;
    let mut node_start = start;
    let mut open_bracket: Option<usize> = None;
    let mut open_parens: Vec<usize> = vec![];
    let mut previous: Option<char> = None;

    for (i, c) in source[start..end].char_indices().map(|(i, c)| (i + start, c)) {
        match (c, open_bracket) {
            ('[', None) => open_bracket = Some(i),
            ('[', Some(_)) | (']', None) => {
                return Err(ParseError::new(ParseErrorKind::UnbalancedBracket, i..i + 1, source))
            }
            (']', Some(_)) => open_bracket = None,
            (_, Some(_)) => {}
            ('(', None) => open_parens.push(i),
            (')', None) => {
                if open_parens.pop().is_none() {
                    let kind = ParseErrorKind::UnbalancedParenthesis;
                    return Err(ParseError::new(kind, i..i + 1, source));
                }
            }
            (_, None) if is_sign(c, previous) => {}
            (_, None) => {
                if let Some(found) = Operation::from_symbol(c) {
                    let text = &source[node_start..i];
                    segments.push(Segment {
                        operation,
                        span: node_start..i,
                    });
                    operation = if text.trim_end().ends_with('(') {
                        found.to_each().unwrap_or(found)
                    } else {
                        found
                    };
                    node_start = i + 1;
                }
            }
        }
        if !c.is_whitespace() {
            previous = Some(c);
        }
    }

    if let Some(i) = open_bracket {
        return Err(ParseError::new(ParseErrorKind::UnbalancedBracket, i..i + 1, source));
    }
    if let Some(&i) = open_parens.last() {
        let kind = ParseErrorKind::UnbalancedParenthesis;
        return Err(ParseError::new(kind, i..i + 1, source));
    }
    segments.push(Segment {
        operation,
        span: node_start..end,
    });
    Ok(segments)
}

fn is_sign(c: char, previous: Option<char>) -> bool {
    matches!(c, '+' | '-') && matches!(previous, None | Some('+' | '-' | '*' | '/' | '[' | ','))
}

fn node_text(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '(' | ')')).collect()
}

pub(crate) fn parse_chain(source: &str, parsers: &NodeParsers) -> PResult<Chain> {
    let mut chain: Option<Chain> = None;
    for Segment { operation, span } in split(source)? {
        let text = node_text(&source[span.clone()]);
        if text.trim().is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptyNode, span, source));
        }
        let pool = parsers
            .parse_node(&text)
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnknownNode, span, source))?;
        chain = Some(match chain {
            Some(chain) => chain.append(operation, pool),
            None => Chain::new(pool),
        });
    }
    // split always yields at least one segment
    chain.ok_or_else(|| ParseError::new(ParseErrorKind::EmptyNode, 0..source.len(), source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::ValueProvider;

    fn parse(s: &str) -> PResult<Chain> {
        parse_chain(s, &NodeParsers::new())
    }

    fn check(s: &str, printed: &str, min: f64, max: f64) {
        let chain = parse(s).unwrap();
        assert_eq!(chain.to_string(), printed);
        assert_eq!((chain.minimum(), chain.maximum()), (min, max), "{}", s);
    }

    fn check_err(s: &str, kind: ParseErrorKind, span: Range<usize>) {
        let err = parse(s).unwrap_err();
        assert_eq!((err.kind, err.span), (kind, span), "{}", s);
    }

    fn operations(s: &str) -> Vec<Operation> {
        split(s).unwrap().into_iter().map(|s| s.operation).collect()
    }

    #[test]
    fn test_split() {
        use Operation::*;
        assert_eq!(operations("d6"), vec![Plus]);
        assert_eq!(operations("2d6+3"), vec![Plus, Plus]);
        assert_eq!(operations("d8*2/d4-1"), vec![Plus, Multiply, Divide, Minus]);
        assert_eq!(operations("3d8(+3)"), vec![Plus, EachPlus]);
        assert_eq!(operations("d10d100(-50)+10"), vec![Plus, EachMinus, Plus]);
        assert_eq!(operations("d6 ( * 2)"), vec![Plus, Multiply]);
        assert_eq!(operations("-3--3"), vec![Plus, Minus]);
        assert_eq!(operations("[-3, -1]-[-2, 2]"), vec![Plus, Minus]);
        assert_eq!(
            split("  d6 + 2 ").unwrap(),
            vec![
                Segment {
                    operation: Plus,
                    span: 2..5
                },
                Segment {
                    operation: Plus,
                    span: 6..8
                },
            ]
        );
    }

    #[test]
    fn test_parse() {
        check("d12", "d12", 1.0, 12.0);
        check("2d6+3", "2d6+3", 5.0, 15.0);
        check(" 2d6 + 3 ", "2d6+3", 5.0, 15.0);
        check("d4d6-[2,5]", "d4d6-[2, 5]", -4.0, 22.0);
        check("3d8(+3)", "3d8(+3)", 12.0, 33.0);
        check("d2d10/d2*2", "d2d10/d2*2", 1.0, 40.0);
        check("[-100, -10]", "[-100, -10]", -100.0, -10.0);
        check("d6+-3", "d6+-3", -2.0, 3.0);
        check("-3", "-3", -3.0, -3.0);
        check("d6(-1.5)", "d6(-1.5)", -0.5, 4.5);
        check("(d6)*(2)", "d6*2", 2.0, 12.0);
    }

    #[test]
    fn test_round_trip() {
        for s in ["d2d20*d4[3, 6]+40", "d10d100(-50)+10", "[2, 3]d4(+d6)(-[-2, 1])/2"] {
            let chain = parse(s).unwrap();
            assert_eq!(chain.to_string(), s);
            let again = parse(&chain.to_string()).unwrap();
            assert_eq!(again, chain);
        }
    }

    #[test]
    fn test_parse_errors() {
        check_err("", ParseErrorKind::EmptyNode, 0..0);
        check_err("   ", ParseErrorKind::EmptyNode, 0..0);
        check_err("d6+", ParseErrorKind::EmptyNode, 3..3);
        check_err("*3", ParseErrorKind::EmptyNode, 0..0);
        check_err("d6+()", ParseErrorKind::EmptyNode, 3..5);
        check_err("d6+x", ParseErrorKind::UnknownNode, 3..4);
        check_err("d6 3", ParseErrorKind::UnknownNode, 0..4);
        check_err("d6+[1, 2", ParseErrorKind::UnbalancedBracket, 3..4);
        check_err("d6]", ParseErrorKind::UnbalancedBracket, 2..3);
        check_err("[[1, 2]]", ParseErrorKind::UnbalancedBracket, 1..2);
        check_err("d6(+3", ParseErrorKind::UnbalancedParenthesis, 2..3);
        check_err("d6)+3", ParseErrorKind::UnbalancedParenthesis, 2..3);
        check_err("((d6)*2", ParseErrorKind::UnbalancedParenthesis, 0..1);
        check_err("d6(+[1, 2)]", ParseErrorKind::UnbalancedParenthesis, 2..3);
    }

    #[test]
    fn test_error_slice() {
        let err = parse("2d6 + d0").unwrap_err();
        assert_eq!(err.slice, " d0");
        assert_eq!(err.to_string(), "error at position 5 (\" d0\"): unrecognized dice");
    }
}
