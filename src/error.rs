use thiserror::Error;

use crate::value::Kind;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the decoder and by typed access to a [`Value`].
///
/// [`Value`]: crate::Value
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input. `line` is 1-based, `column` counts bytes from the
    /// start of the offending line, and `context` holds up to 20 bytes of
    /// source starting at that line.
    #[error("{message} at line {line},{column} >>> {context}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        context: String,
    },

    /// A typed accessor was applied to the wrong variant.
    #[error("type mismatch: expected {expected:?}, found {found:?}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// Vector access past the end.
    #[error("index {index} out of bounds for vector of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A file or stream could not be read.
    #[error("could not read '{path}'")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if the error is a syntax error.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    /// The reported source position of a syntax error, if any.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Syntax { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}
