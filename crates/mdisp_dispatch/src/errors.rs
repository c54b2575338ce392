//! Error types for dispatch and invocation.
//!
//! Callables report failures as [`CallError`]. Factory functions
//! (`division_by_zero()`, `type_mismatch()`, ...) are the public way to build
//! one; they fill in both the structured `kind` and the rendered `message`.
//!
//! [`InvokeError`] wraps everything that can go wrong between "here are some
//! arguments" and "the callable returned". A dispatch miss is an ordinary
//! outcome for callers probing for optional operations, so it is an `Err`
//! value and never a panic.

use std::fmt;

/// Typed category of a [`CallError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallErrorKind {
    // Arithmetic
    DivisionByZero,

    // Arguments
    TypeMismatch { expected: String, got: String },
    ArityMismatch { expected: usize, got: usize },

    /// Anything a callable reports that has no structured kind.
    Custom { message: String },
}

impl fmt::Display for CallErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::ArityMismatch { expected, got } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "expected {expected} {arg_word}, got {got}")
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Failure reported by a [`Callable`](crate::Callable).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CallError {
    /// Structured category.
    pub kind: CallErrorKind,

    /// Human-readable message, `kind.to_string()` for factory-built errors.
    pub message: String,
}

impl CallError {
    /// Create an error with just a message, using the `Custom` kind.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: CallErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: CallErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

/// Division or remainder by zero.
#[cold]
pub fn division_by_zero() -> CallError {
    CallError::from_kind(CallErrorKind::DivisionByZero)
}

/// An argument (or return slot) of the wrong type reached a callable.
#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> CallError {
    CallError::from_kind(CallErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// A callable received the wrong number of arguments.
#[cold]
pub fn wrong_arg_count(expected: usize, got: usize) -> CallError {
    CallError::from_kind(CallErrorKind::ArityMismatch { expected, got })
}

/// Error returned by [`Holder::invoke`](crate::Holder::invoke) and
/// [`Book::invoke`](crate::Book::invoke).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvokeError {
    /// No registered signature accepts the argument types.
    #[error("`{holder}` has no implementation for {args}")]
    NotFound { holder: String, args: String },

    /// The book has no holder under the requested index or name.
    #[error("book `{book}` has no holder {key}")]
    NoSuchHolder { book: String, key: String },

    /// The caller's return storage cannot hold the resolved return type.
    #[error("return storage of type {found} cannot hold {expected}")]
    ReturnSlotMismatch { expected: String, found: String },

    /// The callable ran and failed.
    #[error(transparent)]
    Call(#[from] CallError),
}

impl InvokeError {
    /// Whether this is a dispatch miss rather than a failed call.
    ///
    /// Probing callers ("does this type support `eq`?") treat a missing
    /// holder the same as a missing signature.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoSuchHolder { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_messages() {
        assert_eq!(division_by_zero().to_string(), "division by zero");
        assert_eq!(
            type_mismatch("int", "double").to_string(),
            "type mismatch: expected int, got double"
        );
        assert_eq!(wrong_arg_count(1, 3).to_string(), "expected 1 argument, got 3");
        assert_eq!(wrong_arg_count(2, 0).to_string(), "expected 2 arguments, got 0");
        assert_eq!(CallError::new("boom").kind, CallErrorKind::Custom {
            message: "boom".to_string()
        });
    }

    #[test]
    fn test_call_errors_convert_transparently() {
        let err = InvokeError::from(division_by_zero());
        assert_eq!(err.to_string(), "division by zero");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_misses_are_not_found() {
        let missing = InvokeError::NotFound {
            holder: "add".to_string(),
            args: "(Text, Text)".to_string(),
        };
        let no_holder = InvokeError::NoSuchHolder {
            book: "base".to_string(),
            key: "`mul`".to_string(),
        };
        assert!(missing.is_not_found());
        assert!(no_holder.is_not_found());
        assert_eq!(missing.to_string(), "`add` has no implementation for (Text, Text)");
        assert_eq!(no_holder.to_string(), "book `base` has no holder `mul`");
    }
}
