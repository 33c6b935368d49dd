use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which preset table a `type` or `theme` directive looked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    DiagramType,
    ColorScheme,
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetKind::DiagramType => f.write_str("diagram type"),
            PresetKind::ColorScheme => f.write_str("color scheme"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: malformed arrow `{token}` (expected `-->`, `->` or `-(label)->`)")]
    MalformedArrow { line: usize, token: String },

    /// Not fatal: the graph builder skips such lines.
    #[error("line {line}: `{text}` does not form an edge")]
    EmptyFlow { line: usize, text: String },

    #[error("line {line}: malformed directive `{text}` (expected `% key: value`)")]
    MalformedDirective { line: usize, text: String },

    #[error("line {line}: unknown config key `{key}`")]
    UnknownConfigKey { line: usize, key: String },

    #[error("line {line}: unknown {kind} `{name}`")]
    UnknownPreset {
        line: usize,
        kind: PresetKind,
        name: String,
    },

    #[error("line {line}: invalid value `{value}` for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },

    #[error("document not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("render engine `{program}` failed: {message}")]
    RenderEngine { program: String, message: String },
}

impl Error {
    /// Source line the error points at, for document-level errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedArrow { line, .. }
            | Error::EmptyFlow { line, .. }
            | Error::MalformedDirective { line, .. }
            | Error::UnknownConfigKey { line, .. }
            | Error::UnknownPreset { line, .. }
            | Error::InvalidValue { line, .. } => Some(*line),
            Error::DocumentNotFound { .. } | Error::Read { .. } | Error::RenderEngine { .. } => {
                None
            }
        }
    }
}
