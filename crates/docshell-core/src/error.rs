//! Error types for docshell.

use std::fmt;

use crate::script::ParseError;

/// The main error type for docshell operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Serialization/deserialization error
    Serialization(String),

    /// A shell line could not be lexed or parsed
    Parse(ParseError),

    /// A collection was referenced that is not registered on the database handle
    UnknownCollection(String),

    /// A method was called that the target does not provide
    UnknownMethod {
        /// What the method was called on (`db`, `collection`, `query`, `result`)
        target: String,
        /// The method name as written
        method: String,
    },

    /// An argument could not be mapped onto the builder
    InvalidArgument {
        /// Method that received the argument
        method: String,
        /// What was wrong with it
        reason: String,
    },

    /// Input rejected before evaluation (size limits, bad names)
    InvalidInput(String),

    /// Invalid operation
    InvalidOperation(String),

    /// No help entry exists for the topic
    NoHelp(String),

    /// An error raised by one line of a multi-line script
    AtLine {
        /// 1-based line number
        line: usize,
        /// The underlying error
        error: Box<Error>,
    },
}

impl Error {
    pub(crate) fn invalid_argument(method: &str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::UnknownCollection(name) => write!(f, "Unknown collection: {}", name),
            Error::UnknownMethod { target, method } => {
                write!(f, "{} has no method '{}'", target, method)
            }
            Error::InvalidArgument { method, reason } => {
                write!(f, "Invalid argument to {}(): {}", method, reason)
            }
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            Error::NoHelp(topic) => write!(f, "No help available for command: {}", topic),
            Error::AtLine { line, error } => write!(f, "line {}: {}", line, error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::AtLine { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

/// A specialized `Result` type for docshell operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::UnknownMethod {
            target: "query".to_string(),
            method: "frobnicate".to_string(),
        };
        assert_eq!(err.to_string(), "query has no method 'frobnicate'");

        let err = Error::invalid_argument("limit", "expected a non-negative integer");
        assert_eq!(
            err.to_string(),
            "Invalid argument to limit(): expected a non-negative integer"
        );
    }

    #[test]
    fn test_io_source() {
        use std::error::Error as _;

        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.source().is_some());
        assert!(Error::NoHelp("x".into()).source().is_none());
    }
}
