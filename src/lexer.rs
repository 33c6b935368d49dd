use winnow::prelude::*;

/// Marker that opens a configuration directive line.
pub const DIRECTIVE_MARKER: char = '%';

pub fn directive_marker(input: &mut &str) -> winnow::Result<char> {
    DIRECTIVE_MARKER.parse_next(input)
}

/// A trimmed, non-empty document line and its 1-based position in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'s> {
    pub number: usize,
    pub text: &'s str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lines<'s> {
    pub directives: Vec<SourceLine<'s>>,
    pub flows: Vec<SourceLine<'s>>,
}

pub fn classify(input: &str) -> Lines<'_> {
    let mut lines = Lines::default();
    for (idx, raw) in input.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        let line = SourceLine {
            number: idx + 1,
            text,
        };
        if directive_marker.parse_peek(text).is_ok() {
            lines.directives.push(line);
        } else {
            lines.flows.push(line);
        }
    }
    lines
}

/// Number plain strings from 1, for callers that hold lines rather than a document.
pub fn number_lines<'s>(lines: &[&'s str]) -> Vec<SourceLine<'s>> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, text)| SourceLine {
            number: idx + 1,
            text: text.trim(),
        })
        .filter(|line| !line.text.is_empty())
        .collect()
}
