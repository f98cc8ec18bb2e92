//! Centralized error handling for gapedit
//! Defines common error types and error codes

use std::fmt;

/// Category of the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File system or I/O errors
    Io,
    /// Internal logic or invariant violations
    Internal,
    /// Errors that don't fit other categories
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "IO"),
            Self::Internal => write!(f, "Internal"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A structured error in gapedit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditError {
    /// What kind of error occurred
    pub kind: ErrorKind,
    /// Machine-readable error code (e.g., "IO_ERROR", "NO_PATH")
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl EditError {
    /// Create a new error
    pub fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Check if the message contains a substring (useful for tests)
    pub fn contains_msg(&self, sub: &str) -> bool {
        self.message.contains(sub)
    }
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}): {}", self.kind, self.code, self.message)
    }
}

impl std::error::Error for EditError {}

impl From<std::io::Error> for EditError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, crate::constants::errors::IO_ERROR, err.to_string())
    }
}

/// Result alias for gapedit operations
pub type Result<T> = std::result::Result<T, EditError>;
