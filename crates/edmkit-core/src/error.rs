//! Error handling for EDMKit
//!
//! Provides the error types used across the workspace:
//! - Interpreter errors (a directive rejected by the command builder)
//! - Decode errors (a serialized command list the consumer cannot accept)
//! - The umbrella [`Error`] type for serialization and I/O paths
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::source::SourceContext;
use thiserror::Error;

/// Reason a directive was rejected.
///
/// The display text is the human-readable part of an [`InterpreterError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpreterErrorKind {
    /// No coordinate mode (absolute/incremental) selected yet
    #[error("CoordinateMode Undefined")]
    CoordinateModeUndefined,

    /// No motion mode in effect for a motion directive
    #[error("MotionMode Undefined")]
    MotionModeUndefined,

    /// No coordinate system selected yet
    #[error("Coordinate Not Set")]
    CoordinateSystemNotSet,

    /// No feed speed set yet
    #[error("Feed Speed Not Set")]
    FeedSpeedNotSet,

    /// A value lies outside its permitted range
    #[error("{name} ({value}) Out of Range")]
    OutOfRange {
        /// Name of the offending argument.
        name: &'static str,
        /// The rejected value, as written by the caller.
        value: String,
    },

    /// A floating point argument is NaN or infinite
    #[error("{name} Value Not Valid: {value}")]
    NotNumeric {
        /// Name of the offending argument.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl InterpreterErrorKind {
    /// Build an out-of-range reason for `name`.
    pub fn out_of_range(name: &'static str, value: impl ToString) -> Self {
        Self::OutOfRange {
            name,
            value: value.to_string(),
        }
    }

    /// Build a not-numeric reason for `name`.
    pub fn not_numeric(name: &'static str, value: impl ToString) -> Self {
        Self::NotNumeric {
            name,
            value: value.to_string(),
        }
    }
}

/// A directive failed validation.
///
/// Carries the reason plus the caller's line number and source text so the
/// failing call can be located in the machining program.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} (line {line}): {text}")]
pub struct InterpreterError {
    /// Why the directive was rejected.
    pub kind: InterpreterErrorKind,
    /// Line of the failing call.
    pub line: u32,
    /// Literal text of the failing call.
    pub text: String,
}

impl InterpreterError {
    /// Attach a source location to a rejection reason.
    pub fn new(kind: InterpreterErrorKind, source: &SourceContext) -> Self {
        Self {
            kind,
            line: source.line,
            text: source.text.clone(),
        }
    }
}

/// A serialized command list could not be decoded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The document is not valid JSON at all
    #[error("Malformed command list: {reason}")]
    Malformed {
        /// Parser message.
        reason: String,
    },

    /// The top-level value is not an array
    #[error("Command list is not an array")]
    NotAnArray,

    /// An element of the list is not an object
    #[error("Command {index} is not an object")]
    NotAnObject {
        /// Position of the element in the list.
        index: usize,
    },

    /// An element has a missing, unknown, or ill-typed field
    #[error("Command {index} invalid: {reason}")]
    InvalidRecord {
        /// Position of the element in the list.
        index: usize,
        /// Decoder message.
        reason: String,
    },
}

/// Main error type for EDMKit
///
/// A unified error type for APIs that touch serialization or I/O in
/// addition to directive validation.
#[derive(Error, Debug)]
pub enum Error {
    /// Directive rejected
    #[error(transparent)]
    Interpreter(#[from] InterpreterError),

    /// Command list decode failure
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// JSON encoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a directive rejection
    pub fn is_interpreter_error(&self) -> bool {
        matches!(self, Error::Interpreter(_))
    }

    /// Check if this is a decode error
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpreter_error_display() {
        let source = SourceContext::new(12, "rapid_move(x=1)");
        let err = InterpreterError::new(InterpreterErrorKind::CoordinateModeUndefined, &source);
        assert_eq!(
            err.to_string(),
            "CoordinateMode Undefined (line 12): rapid_move(x=1)"
        );
    }

    #[test]
    fn test_out_of_range_display() {
        let kind = InterpreterErrorKind::out_of_range("Eleparam Index", 1000);
        assert_eq!(kind.to_string(), "Eleparam Index (1000) Out of Range");

        let kind = InterpreterErrorKind::not_numeric("Coordinate x", f64::NAN);
        assert_eq!(kind.to_string(), "Coordinate x Value Not Valid: NaN");
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidRecord {
            index: 3,
            reason: "missing field `FeedSpeed`".to_string(),
        };
        assert_eq!(err.to_string(), "Command 3 invalid: missing field `FeedSpeed`");
        assert_eq!(DecodeError::NotAnArray.to_string(), "Command list is not an array");
    }

    #[test]
    fn test_error_conversion() {
        let source = SourceContext::new(1, "feed_speed(0)");
        let err: Error = InterpreterError::new(
            InterpreterErrorKind::out_of_range("Feed Speed Value", 0),
            &source,
        )
        .into();
        assert!(err.is_interpreter_error());
        assert!(!err.is_decode_error());

        let err: Error = DecodeError::NotAnObject { index: 0 }.into();
        assert!(err.is_decode_error());
    }
}
