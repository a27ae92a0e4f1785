//! Caller source location attached to every emitted command.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;

/// Where a directive came from in the caller's program.
///
/// `line` and `text` are recorded verbatim in each command so a failing
/// command on the machine can be traced back to the call that produced it.
/// Neither field is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceContext {
    /// Line number of the call.
    pub line: u32,
    /// Literal text of the call.
    pub text: String,
}

impl SourceContext {
    /// Create a context from an explicit line and text.
    pub fn new(line: u32, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }

    /// Create a context whose line is taken from the calling location.
    ///
    /// Must be reached through `#[track_caller]` functions for the line to
    /// point at user code rather than library internals.
    #[track_caller]
    pub fn caller(text: impl Into<String>) -> Self {
        Self::new(Location::caller().line(), text)
    }
}

impl fmt::Display for SourceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(line {}): {}", self.line, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_captures_line() {
        let expected = line!() + 1;
        let ctx = SourceContext::caller("pause()");
        assert_eq!(ctx.line, expected);
        assert_eq!(ctx.text, "pause()");
    }

    #[test]
    fn test_track_caller_propagates() {
        #[track_caller]
        fn through() -> SourceContext {
            SourceContext::caller("through()")
        }

        let expected = line!() + 1;
        let ctx = through();
        assert_eq!(ctx.line, expected);
    }

    #[test]
    fn test_display() {
        let ctx = SourceContext::new(7, "program_end()");
        assert_eq!(ctx.to_string(), "(line 7): program_end()");
    }
}
