//! Syntax error types

use thiserror::Error;

use crate::Span;

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("parse error: {message}")]
    Parse { message: String, span: Span },

    #[error("failed to print module: {0}")]
    Emit(#[from] std::io::Error),

    #[error("printed module is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl SyntaxError {
    /// Source location of the error, when it has one
    pub fn span(&self) -> Option<Span> {
        match self {
            SyntaxError::Parse { span, .. } => Some(*span),
            SyntaxError::Emit(_) | SyntaxError::InvalidUtf8(_) => None,
        }
    }
}
