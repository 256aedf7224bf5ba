//! Error types for validation failures
//!
//! Three layers, from the leaves up:
//!
//! - [`ErrorEntry`]: one path-tagged message, the unit every check reports.
//! - [`Failure`]: what a check returns on rejection, a single entry or an
//!   ordered collection of nested failures (one per failing field, branch,
//!   or element). [`flatten`] turns the tree into a flat list.
//! - [`ValidationFailure`]: the titled envelope handed to callers of
//!   [`Validator::validate`](crate::Validator::validate). Built once, at the
//!   top.
//!
//! [`SpecError`] is separate: it is returned when a specification itself is
//! malformed, at construction time, and never during validation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Path;

// ============================================================================
// ERROR CODE
// ============================================================================

/// Category of a validation failure, for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    /// Value has the wrong primitive category, is not an object, or is not
    /// an instance of the expected class.
    TypeMismatch,
    /// A `Required` value was null or absent.
    MissingField,
    /// No branch of an `Or` accepted the value.
    UnionMismatch,
    /// Reserved for intersection-level reports; `And` currently surfaces the
    /// failing branches' own entries.
    IntersectionMismatch,
    /// A list was shorter or longer than its bounds.
    LengthBound,
    /// A `Cast` could not coerce the value without loss.
    CastFailure,
    /// A user predicate rejected the value.
    CustomValidationFailure,
}

impl ErrorCode {
    /// Stable snake_case identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type_mismatch",
            Self::MissingField => "missing_field",
            Self::UnionMismatch => "union_mismatch",
            Self::IntersectionMismatch => "intersection_mismatch",
            Self::LengthBound => "length_bound",
            Self::CastFailure => "cast_failure",
            Self::CustomValidationFailure => "custom_validation_failure",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ERROR ENTRY
// ============================================================================

/// A single, leaf-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Location of the offending value, `None` at an anonymous root.
    pub path: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Failure category.
    pub code: ErrorCode,
}

impl ErrorEntry {
    /// Creates an entry located at `path`.
    pub fn new(code: ErrorCode, path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.location().map(str::to_owned),
            message: message.into(),
            code,
        }
    }

    /// Creates an entry for a user predicate rejection.
    ///
    /// This is the constructor custom predicates are expected to use.
    pub fn custom(path: &Path, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CustomValidationFailure, path, message)
    }

    pub(crate) fn type_mismatch(path: &Path, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TypeMismatch, path, message)
    }

    pub(crate) fn missing_field(path: &Path) -> Self {
        Self::new(
            ErrorCode::MissingField,
            path,
            format!("{} is required.", path.display_label()),
        )
    }
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{path}] {}: {}", self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

// ============================================================================
// FAILURE TREE
// ============================================================================

/// A rejected check: one entry, or the ordered failures of several
/// independent sub-checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// A single leaf error.
    Entry(ErrorEntry),
    /// Failures of sibling checks, in declaration order.
    Many(Vec<Failure>),
}

impl Failure {
    /// Flattens the tree depth-first, preserving order.
    pub fn flatten(self) -> Vec<ErrorEntry> {
        let mut entries = Vec::new();
        self.flatten_into(&mut entries);
        entries
    }

    fn flatten_into(self, entries: &mut Vec<ErrorEntry>) {
        match self {
            Self::Entry(entry) => entries.push(entry),
            Self::Many(failures) => {
                for failure in failures {
                    failure.flatten_into(entries);
                }
            }
        }
    }

    /// Number of leaf entries.
    pub fn len(&self) -> usize {
        match self {
            Self::Entry(_) => 1,
            Self::Many(failures) => failures.iter().map(Self::len).sum(),
        }
    }

    /// True when the tree holds no entry at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<ErrorEntry> for Failure {
    fn from(entry: ErrorEntry) -> Self {
        Self::Entry(entry)
    }
}

impl From<Vec<Failure>> for Failure {
    fn from(failures: Vec<Failure>) -> Self {
        Self::Many(failures)
    }
}

impl From<Vec<ErrorEntry>> for Failure {
    fn from(entries: Vec<ErrorEntry>) -> Self {
        Self::Many(entries.into_iter().map(Self::Entry).collect())
    }
}

/// Normalizes nested failure collections into one flat, ordered list.
pub fn flatten<I>(failures: I) -> Vec<ErrorEntry>
where
    I: IntoIterator<Item = Failure>,
{
    Failure::Many(failures.into_iter().collect()).flatten()
}

// ============================================================================
// ERROR ENVELOPE
// ============================================================================

/// The single error shape returned to callers of a validator.
///
/// `message` is `"Invalid <name>"` (or `"Invalid data"` for anonymous
/// validators); `errors` is the flat list of every rejection found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message} ({} error(s))", .errors.len())]
pub struct ValidationFailure {
    /// Title of the envelope.
    pub message: String,
    /// Every rejection, in declaration order.
    pub errors: Vec<ErrorEntry>,
}

impl ValidationFailure {
    /// Wraps a failure tree under a title.
    pub fn new(message: impl Into<String>, failure: Failure) -> Self {
        Self {
            message: message.into(),
            errors: failure.flatten(),
        }
    }

    /// Paths of all entries, in order.
    pub fn paths(&self) -> Vec<Option<&str>> {
        self.errors.iter().map(|e| e.path.as_deref()).collect()
    }
}

// ============================================================================
// SPEC CONSTRUCTION ERROR
// ============================================================================

/// A specification that cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SpecError {
    /// `And` / `Or` need at least one branch.
    #[error("{combinator} requires at least one specification")]
    EmptyBranches { combinator: &'static str },

    /// `List` lower bound above its upper bound.
    #[error("List minimum length {min} exceeds maximum length {max}")]
    InvalidBounds { min: usize, max: usize },

    /// Only String, Number and Boolean can be cast to.
    #[error("Only base types (String, Number, Boolean) can be cast to, got {target}")]
    NonPrimitiveCastTarget { target: String },
}

// ============================================================================
// TESTS
// ============================================================================
