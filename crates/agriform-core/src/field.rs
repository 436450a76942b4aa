//! Field declarations: names, kinds, and specs
//!
//! # Parse-at-Boundaries Pattern
//!
//! Field declarations validate on construction:
//! - `FieldName` trims and validates its input once, then cannot represent
//!   an invalid name
//! - `FieldSpec` compiles pattern regexes and checks enum option sets at
//!   build time, so a constructed spec is always runnable
//!
//! Format checking for a field's current value lives on `FieldKind::check`;
//! it is a pure function of the value and never fails, it only reports.

use std::sync::LazyLock;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// Single-`@`, dot-terminated-domain heuristic. Deliberately loose: it
/// rejects obvious typos without chasing the full address grammar.
static EMAIL_RE: LazyLock<Option<regex::Regex>> =
    LazyLock::new(|| regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Website check tolerant of a missing scheme ("example.com" passes).
static URL_RE: LazyLock<Option<regex::Regex>> = LazyLock::new(|| {
    regex::Regex::new(
        r"^(https?://)?(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)$",
    )
    .ok()
});

/// Validate a field name according to naming rules
///
/// Rules:
/// - Must start with a letter
/// - Can contain letters, numbers, underscores
/// - Must be 1-64 characters
fn validate_field_name(s: &str) -> Result<()> {
    if s.is_empty() {
        return Err(FormError::invalid_field_name("name cannot be empty"));
    }

    if s.len() > FieldName::MAX_LENGTH {
        return Err(FormError::invalid_field_name(format!(
            "name is {} characters (max {})",
            s.len(),
            FieldName::MAX_LENGTH
        )));
    }

    if !s.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(FormError::invalid_field_name(format!(
            "name '{s}' must start with a letter"
        )));
    }

    if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(FormError::invalid_field_name(format!(
            "name '{s}' must contain only letters, numbers, or underscores"
        )));
    }

    Ok(())
}

/// A validated field name
///
/// # Construction
///
/// ```rust
/// use agriform_core::FieldName;
///
/// let name = FieldName::parse("contact_email")?;
/// # Ok::<(), agriform_core::FormError>(())
/// ```
///
/// # Guarantees
///
/// - Non-empty
/// - Starts with a letter
/// - Contains only alphanumeric or underscore
/// - 1-64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct FieldName(String);

impl FieldName {
    /// Maximum allowed length for a field name
    pub const MAX_LENGTH: usize = 64;

    /// Parse and validate a field name (trims whitespace first)
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidFieldName` if the name is invalid.
    pub fn parse(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        let trimmed = s.trim();
        validate_field_name(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    /// Get the field name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into an owned String
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for FieldName {
    type Error = FormError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for FieldName {
    type Error = FormError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<FieldName> for String {
    #[allow(clippy::use_self)] // Self refers to String, not FieldName
    fn from(name: FieldName) -> String {
        name.0
    }
}

/// The base kind of a field, carrying its format check where one exists.
///
/// Pattern kinds hold a regex compiled (case-insensitively) at spec build
/// time together with the hint message surfaced when a value fails it.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Free text, no format check
    Text,
    /// Email address (single `@`, dot-terminated domain)
    Email,
    /// Website URL, scheme optional
    Url,
    /// ISO calendar date (`YYYY-MM-DD`)
    Date,
    /// One of a closed set of options
    Enum {
        /// The allowed values, in declaration order
        options: Vec<String>,
    },
    /// Custom case-insensitive pattern with a human-readable hint
    Pattern {
        /// Compiled case-insensitive regex
        regex: regex::Regex,
        /// Message surfaced when a non-empty value fails the pattern
        hint: String,
    },
}

impl FieldKind {
    /// Short kind label for display and schema output
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Url => "url",
            Self::Date => "date",
            Self::Enum { .. } => "enum",
            Self::Pattern { .. } => "pattern",
        }
    }

    /// Run this kind's format check against a non-empty value.
    ///
    /// Returns the error message on failure, `None` when the value passes.
    /// Callers must not invoke this for empty values; emptiness is the
    /// required-check's concern, not a format concern.
    #[must_use]
    pub fn check(&self, value: &str) -> Option<String> {
        match self {
            Self::Text => None,
            Self::Email => (!matches_or_pass(&EMAIL_RE, value))
                .then(|| "Please enter a valid email address".to_string()),
            Self::Url => (!matches_or_pass(&URL_RE, value))
                .then(|| "Please enter a valid website URL".to_string()),
            Self::Date => chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .is_err()
                .then(|| "Please enter a valid date (YYYY-MM-DD)".to_string()),
            Self::Enum { options } => (!options.iter().any(|o| o == value))
                .then(|| format!("Please select one of: {}", options.iter().join(", "))),
            Self::Pattern { regex, hint } => (!regex.is_match(value)).then(|| hint.clone()),
        }
    }
}

/// A regex that failed to initialize cannot reject anything.
fn matches_or_pass(re: &LazyLock<Option<regex::Regex>>, value: &str) -> bool {
    re.as_ref().map_or(true, |re| re.is_match(value))
}

/// A single field declaration: name, label, kind, and requiredness.
///
/// Specs are immutable once built. Conditional fields carry the same shape;
/// whether they participate in a validation pass is the rule resolver's
/// decision, not the spec's.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: FieldName,
    label: String,
    kind: FieldKind,
    required: bool,
}

impl FieldSpec {
    /// Start building a spec with the given name and label
    #[must_use]
    pub fn builder(name: impl Into<String>, label: impl Into<String>) -> FieldSpecBuilder {
        FieldSpecBuilder::new(name, label)
    }

    /// The field's unique name within its form
    #[must_use]
    pub const fn name(&self) -> &FieldName {
        &self.name
    }

    /// The human-readable label used in error messages
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The field's kind and format check
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether an empty value is an error when the field is in scope
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// The required-check message for this field
    #[must_use]
    pub fn required_message(&self) -> String {
        format!("{} is required", self.label)
    }
}

/// Unvalidated kind selection inside the builder
#[derive(Debug, Clone)]
enum KindDraft {
    Text,
    Email,
    Url,
    Date,
    Enum(Vec<String>),
    Pattern { pattern: String, hint: String },
}

/// Builder for constructing `FieldSpec` instances
///
/// Uses functional patterns with method chaining; validation happens once
/// in `build`.
#[derive(Debug, Clone)]
pub struct FieldSpecBuilder {
    name: String,
    label: String,
    kind: KindDraft,
    required: bool,
}

impl FieldSpecBuilder {
    /// Create a new builder with name and label; kind defaults to text
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: KindDraft::Text,
            required: false,
        }
    }

    /// Mark this field as required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Use the email format check
    #[must_use]
    pub fn email(mut self) -> Self {
        self.kind = KindDraft::Email;
        self
    }

    /// Use the URL format check
    #[must_use]
    pub fn url(mut self) -> Self {
        self.kind = KindDraft::Url;
        self
    }

    /// Use the calendar-date format check
    #[must_use]
    pub fn date(mut self) -> Self {
        self.kind = KindDraft::Date;
        self
    }

    /// Restrict the value to a closed option set
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kind = KindDraft::Enum(options.into_iter().map(Into::into).collect());
        self
    }

    /// Check the value against a case-insensitive pattern, surfacing `hint`
    /// on mismatch
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>, hint: impl Into<String>) -> Self {
        self.kind = KindDraft::Pattern {
            pattern: pattern.into(),
            hint: hint.into(),
        };
        self
    }

    /// Build the spec, validating the name and the kind declaration
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidFieldName` for a bad name,
    /// `FormError::EmptyOptions` for an enum kind with no options, and
    /// `FormError::InvalidPattern` when the pattern does not compile.
    pub fn build(self) -> Result<FieldSpec> {
        let name = FieldName::parse(self.name)?;

        let kind = match self.kind {
            KindDraft::Text => FieldKind::Text,
            KindDraft::Email => FieldKind::Email,
            KindDraft::Url => FieldKind::Url,
            KindDraft::Date => FieldKind::Date,
            KindDraft::Enum(options) => {
                if options.is_empty() {
                    return Err(FormError::empty_options(name.as_str()));
                }
                FieldKind::Enum { options }
            }
            KindDraft::Pattern { pattern, hint } => {
                let regex = regex::RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| FormError::invalid_pattern(name.as_str(), e.to_string()))?;
                FieldKind::Pattern { regex, hint }
            }
        };

        Ok(FieldSpec {
            name,
            label: self.label,
            kind,
            required: self.required,
        })
    }
}
