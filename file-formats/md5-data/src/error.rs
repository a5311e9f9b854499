//! Error handling for the shared MD5 parse plumbing

use std::io;

use thiserror::Error;

/// Errors produced by the lexer and the low-level I/O helpers
#[derive(Debug, Error)]
pub enum Md5DataError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input ended where a token was required
    #[error("unexpected end of file at line {line}")]
    UnexpectedEof {
        /// 1-based line the input ended on
        line: usize,
    },

    /// A specific token was required but something else was found
    #[error("expected '{expected}' but found '{found}' at line {line}")]
    UnexpectedToken {
        /// The token text that was required
        expected: String,
        /// The token text actually read
        found: String,
        /// 1-based line of the offending token
        line: usize,
    },

    /// A token could not be parsed as the requested number type
    #[error("invalid number '{token}' at line {line}")]
    InvalidNumber {
        /// The token text that failed to parse
        token: String,
        /// 1-based line of the offending token
        line: usize,
    },
}

/// Type alias for Results from the shared plumbing
pub type Result<T> = std::result::Result<T, Md5DataError>;
