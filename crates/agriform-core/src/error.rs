//! Error types for the AgriForm engine with categorization:
//!
//! - **Wiring errors**: form-construction misuse, fail fast (exit code 1)
//! - **Store errors**: session store IO (exit code 2)
//! - **Lookup errors**: unknown fields or forms (exit code 3)
//!
//! Per-field validation failures are deliberately NOT represented here.
//! They are data (a mapping of field name to message) so that `validate`
//! stays pure; see the `validate` module.

use thiserror::Error;

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Error type for form construction and engine misuse.
///
/// These surface static wiring defects, not user input problems. A
/// correctly constructed form never produces one of these at runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A field with this name is already registered for the form
    #[error("field '{name}' is already registered")]
    DuplicateField {
        /// The colliding field name
        name: String,
    },

    /// No field with this name is registered for the form
    #[error("no field named '{name}' is registered")]
    UnknownField {
        /// The name that was looked up
        name: String,
    },

    /// No form definition with this name is shipped
    #[error("no form named '{name}' exists")]
    UnknownForm {
        /// The name that was looked up
        name: String,
    },

    /// A field name failed boundary validation
    #[error("invalid field name: {details}")]
    InvalidFieldName {
        /// Human-readable explanation of the naming rules violated
        details: String,
    },

    /// A pattern field declared a regex that does not compile
    #[error("invalid pattern for field '{name}': {details}")]
    InvalidPattern {
        /// The field carrying the bad pattern
        name: String,
        /// The regex compiler's diagnostic
        details: String,
    },

    /// An enum field declared no options
    #[error("enum field '{name}' must declare at least one option")]
    EmptyOptions {
        /// The field with the empty option set
        name: String,
    },

    /// The external submit collaborator reported failure
    #[error("submission failed: {message}")]
    Submission {
        /// The collaborator's message, surfaced verbatim
        message: String,
    },

    /// The session store could not be read or written
    #[error("session store error: {details}")]
    SessionStore {
        /// Underlying IO or serialization detail
        details: String,
    },
}

// Convenience constructors using functional patterns
impl FormError {
    /// Create a `DuplicateField` error
    #[must_use]
    pub fn duplicate_field(name: impl Into<String>) -> Self {
        Self::DuplicateField { name: name.into() }
    }

    /// Create an `UnknownField` error
    #[must_use]
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    /// Create an `UnknownForm` error
    #[must_use]
    pub fn unknown_form(name: impl Into<String>) -> Self {
        Self::UnknownForm { name: name.into() }
    }

    /// Create an `InvalidFieldName` error
    #[must_use]
    pub fn invalid_field_name(details: impl Into<String>) -> Self {
        Self::InvalidFieldName {
            details: details.into(),
        }
    }

    /// Create an `InvalidPattern` error
    #[must_use]
    pub fn invalid_pattern(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidPattern {
            name: name.into(),
            details: details.into(),
        }
    }

    /// Create an `EmptyOptions` error
    #[must_use]
    pub fn empty_options(name: impl Into<String>) -> Self {
        Self::EmptyOptions { name: name.into() }
    }

    /// Create a `Submission` error
    #[must_use]
    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission {
            message: message.into(),
        }
    }

    /// Create a `SessionStore` error
    #[must_use]
    pub fn session_store(details: impl Into<String>) -> Self {
        Self::SessionStore {
            details: details.into(),
        }
    }

    /// Check if this is a `DuplicateField` error
    #[must_use]
    pub const fn is_duplicate_field(&self) -> bool {
        matches!(self, Self::DuplicateField { .. })
    }

    /// Check if this is an `UnknownField` error
    #[must_use]
    pub const fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField { .. })
    }

    /// Check if this is an `InvalidPattern` error
    #[must_use]
    pub const fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }

    /// Check if this is a `Submission` error
    #[must_use]
    pub const fn is_submission(&self) -> bool {
        matches!(self, Self::Submission { .. })
    }
}

impl FormError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit code scheme:
    /// - 1: User error (form wiring, invalid names, bad patterns)
    /// - 2: System error (submission collaborator, session store IO)
    /// - 3: Not found (unknown fields or forms)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::DuplicateField { .. }
            | Self::InvalidFieldName { .. }
            | Self::InvalidPattern { .. }
            | Self::EmptyOptions { .. } => 1,
            Self::Submission { .. } | Self::SessionStore { .. } => 2,
            Self::UnknownField { .. } | Self::UnknownForm { .. } => 3,
        }
    }
}

/// Failure reported by the external submit collaborator.
///
/// The engine does not interpret this beyond "failure occurred"; the
/// message is surfaced as the whole-form error, falling back to a generic
/// retry prompt when the collaborator supplies nothing usable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SubmissionError {
    message: String,
}

impl SubmissionError {
    /// Create a submission error with the given message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The collaborator's message, which may be empty
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SubmissionError> for FormError {
    fn from(err: SubmissionError) -> Self {
        Self::submission(err.message)
    }
}
