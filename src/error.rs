// SPDX-License-Identifier: MIT

//! Typed error handling for gatekeeper-rs
//!
//! Parsing is the only fallible part of the condition subsystem; builders
//! and the renderer always produce output. The workflow layer adds I/O and
//! YAML failures on top.

use thiserror::Error;

/// Errors produced while parsing a raw condition string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was empty or whitespace only
    #[error("empty expression")]
    Empty,

    /// A token appeared where the grammar does not allow one
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    /// An opened group was never closed
    #[error("expected ')' at position {position}")]
    MissingClosingParen { token: String, position: usize },

    /// The tokenizer produced a zero-length literal.
    ///
    /// Not produced by the current tokenizer; repeated operators such as
    /// `&&&&` surface as [`ParseError::UnexpectedToken`].
    #[error("unexpected empty literal at position {position}")]
    EmptyLiteral { position: usize },
}

impl ParseError {
    /// Character offset of the offending token, when there is one
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Empty => None,
            ParseError::UnexpectedToken { position, .. }
            | ParseError::MissingClosingParen { position, .. }
            | ParseError::EmptyLiteral { position } => Some(*position),
        }
    }
}

/// Top-level error type for gatekeeper-rs
#[derive(Debug, Error)]
pub enum GatekeeperError {
    /// Condition parse failures
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration errors (invalid env vars, bad wrap settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Workflow document without a usable frontmatter block
    #[error("Frontmatter error: {0}")]
    Frontmatter(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl GatekeeperError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a frontmatter error
    pub fn frontmatter(message: impl Into<String>) -> Self {
        Self::Frontmatter(message.into())
    }
}
