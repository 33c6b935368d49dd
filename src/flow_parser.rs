use winnow::combinator::{alt, eof, preceded, terminated};
use winnow::prelude::*;
use winnow::token::rest;

use crate::error::Error;
use crate::lexer::SourceLine;

/// One `source arrow destination` triple of a flow line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowStep<'s> {
    pub src: &'s str,
    pub label: Option<String>,
    pub dst: &'s str,
}

/// Split a flow line into its edge steps. `A --> B -(x)-> C` yields
/// `(A, None, B)` and `(B, Some("x"), C)`.
///
/// A line too short to hold an edge is reported as [`Error::EmptyFlow`];
/// callers decide whether that is fatal. A dangling trailing token is dropped.
pub fn tokenize_flow<'s>(line: &SourceLine<'s>) -> Result<Vec<FlowStep<'s>>, Error> {
    let tokens: Vec<&str> = line.text.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(Error::EmptyFlow {
            line: line.number,
            text: line.text.to_string(),
        });
    }
    if tokens.len() % 2 == 0 {
        tracing::warn!(
            line = line.number,
            token = tokens[tokens.len() - 1],
            "ignoring trailing token that does not complete an edge"
        );
    }

    let mut steps = Vec::with_capacity(tokens.len() / 2);
    let mut i = 0;
    while i + 2 < tokens.len() {
        let token = tokens[i + 1];
        let label = parse_arrow(token).map_err(|_| Error::MalformedArrow {
            line: line.number,
            token: token.to_string(),
        })?;
        steps.push(FlowStep {
            src: tokens[i],
            label,
            dst: tokens[i + 2],
        });
        i += 2;
    }
    Ok(steps)
}

/// Decode a whole arrow token into its label. `-()->` has no label.
pub fn parse_arrow(token: &str) -> Result<Option<String>, String> {
    let mut input = token;
    arrow(&mut input).map_err(|_| format!("malformed arrow: {token}"))
}

fn arrow(input: &mut &str) -> winnow::Result<Option<String>> {
    alt((
        terminated("-->", eof).value(None),
        terminated("->", eof).value(None),
        labeled_arrow.map(|label: &str| (!label.is_empty()).then(|| label.to_string())),
    ))
    .parse_next(input)
}

fn labeled_arrow<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    preceded("-(", rest.verify_map(|body: &'s str| body.strip_suffix(")->"))).parse_next(input)
}
