use std::fmt;

/// Error kind for serializer and fallback-converter errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input string.
    Format,
    /// Value or declared type outside what the implementation handles.
    Unsupported,
    /// Logical error (invalid state, generic).
    Logic,
}

/// Error returned by serializer and fallback-converter implementations.
#[derive(Debug)]
pub struct SerializerError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SerializerError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Format, message: msg.into() }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Unsupported, message: msg.into() }
    }

    pub fn logic(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Logic, message: msg.into() }
    }

    /// Add context to the error, preserving the original ErrorKind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl fmt::Display for SerializerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SerializerError {}

// ---------------------------------------------------------------------------
// From impls: standard error types → SerializerError with correct ErrorKind
// ---------------------------------------------------------------------------

impl From<serde_json::Error> for SerializerError {
    fn from(e: serde_json::Error) -> Self {
        Self::format(e.to_string())
    }
}

impl From<std::num::ParseIntError> for SerializerError {
    fn from(e: std::num::ParseIntError) -> Self {
        Self::format(e.to_string())
    }
}

impl From<std::num::ParseFloatError> for SerializerError {
    fn from(e: std::num::ParseFloatError) -> Self {
        Self::format(e.to_string())
    }
}

impl From<chrono::ParseError> for SerializerError {
    fn from(e: chrono::ParseError) -> Self {
        Self::format(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_preserves_kind() {
        let e = SerializerError::format("bad digit").with_context("field 'x'");
        assert_eq!(e.kind, ErrorKind::Format);
        assert_eq!(e.message, "field 'x': bad digit");
    }

    #[test]
    fn display_includes_kind() {
        let e = SerializerError::unsupported("no such type");
        assert_eq!(e.to_string(), "Unsupported: no such type");
    }
}
