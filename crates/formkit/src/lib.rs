//! Dynamic Form Model
//!
//! An owned, schema-validated form state for a user-registration form:
//! fixed scalar fields, a hobby multi-select, and a variable-length list
//! of visited-country entries with a country → city dependent select.
//!
//! # Architecture
//!
//! ```text
//! Renderer ──set_field/blur/append/remove──► FormSession
//!                                               │ owns
//!                                  ┌────────────┼─────────────┐
//!                                  ▼            ▼             ▼
//!                              FormState  ValidationSchema  ErrorReport
//!                                  │                          ▲
//!                                  └──── validate(state) ─────┘
//!
//! FormSession::submit ──(report empty)──► SubmissionSink
//! ```
//!
//! Validation never runs on a change event; it runs on blur (for touched
//! fields) and on every submission attempt, and the report is recomputed
//! from scratch each time so structural edits cannot leave stale entries.

pub mod bindings;
pub mod options;
pub mod path;
pub mod schema;
pub mod session;
pub mod state;
pub mod validate;

pub use path::{EntryField, FieldPath};
pub use schema::{Check, CheckKind, ValidationSchema};
pub use session::{FormSession, SubmissionPayload, SubmissionSink, SubmitOutcome};
pub use state::{CountryEntry, FieldValue, FormEvent, FormState};
pub use validate::{validate, ErrorKind, ErrorReport, FieldError};

use thiserror::Error;

/// Structural errors raised on malformed paths, indices or value types.
///
/// These are programmer errors in the calling renderer, not user-facing
/// validation failures; they are never folded into an [`ErrorReport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A path string did not name any field of the form.
    #[error("unknown field path: {0}")]
    UnknownPath(String),

    /// An entry index referenced a row that does not exist.
    #[error("entry index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// Offending index.
        index: usize,
        /// Current number of country entries.
        len: usize,
    },

    /// A value of the wrong type was supplied for a field.
    #[error("wrong value type for {path}: expected {expected}, got {found}")]
    ValueType {
        /// Field the value was addressed to.
        path: FieldPath,
        /// Value kind the field accepts.
        expected: &'static str,
        /// Value kind that was supplied.
        found: &'static str,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FormError>;
