//! Validation engine and error report
//!
//! [`validate`] is a pure function from `(state, schema)` to an
//! [`ErrorReport`]. The report is rebuilt from scratch on every pass, so
//! structural edits (row removal, cascade clears) can never leave stale
//! entries keyed by shifted or vanished indices.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::options::is_city_of;
use crate::path::{EntryField, FieldPath};
use crate::schema::{Check, CheckKind, ValidationSchema};
use crate::state::{FormState, ValueRef};

/// Classification of a validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Required field left empty or unset.
    Required,
    /// Text exceeds its length bound.
    TooLong,
    /// Collection below its minimum size.
    TooFewItems,
    /// Dependent value outside its derived option set.
    InvalidOption,
}

/// One field's validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Failure classification.
    pub kind: ErrorKind,
    /// Short user-facing message.
    pub message: String,
}

/// The complete set of current validation failures, keyed by field path.
///
/// Deterministically ordered; serializes as a path-string → error map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorReport {
    entries: BTreeMap<FieldPath, FieldError>,
}

impl ErrorReport {
    /// Whether no field is currently failing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Error for the given path, if any.
    pub fn get(&self, path: FieldPath) -> Option<&FieldError> {
        self.entries.get(&path)
    }

    /// Message for the given path, if any.
    pub fn message(&self, path: FieldPath) -> Option<&str> {
        self.entries.get(&path).map(|e| e.message.as_str())
    }

    /// Failing paths with their errors, in path order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &FieldError)> {
        self.entries.iter().map(|(path, error)| (*path, error))
    }

    /// Failing paths, in path order.
    pub fn paths(&self) -> impl Iterator<Item = FieldPath> + '_ {
        self.entries.keys().copied()
    }

    /// Copy of this report restricted to the paths `keep` accepts.
    pub(crate) fn filtered(&self, keep: impl Fn(FieldPath) -> bool) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(path, _)| keep(**path))
                .map(|(path, error)| (*path, error.clone()))
                .collect(),
        }
    }

    fn insert_first(&mut self, path: FieldPath, error: FieldError) {
        self.entries.entry(path).or_insert(error);
    }
}

impl Serialize for ErrorReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, error) in &self.entries {
            map.serialize_entry(&path.to_string(), error)?;
        }
        map.end()
    }
}

/// Validate `state` against `schema`.
///
/// Pure: the same inputs always yield the same report. Every fixed rule
/// row runs once; every per-entry rule row runs against each country entry
/// at its current index. The first failing check per path wins.
pub fn validate(state: &FormState, schema: &ValidationSchema) -> ErrorReport {
    let mut report = ErrorReport::default();

    for rule in &schema.fixed {
        if let Some(error) = first_failure(state, rule.path, &rule.checks) {
            report.insert_first(rule.path, error);
        }
    }

    for index in 0..state.entries().len() {
        for rule in &schema.per_entry {
            let path = FieldPath::Entry(index, rule.field);
            if let Some(error) = first_failure(state, path, &rule.checks) {
                report.insert_first(path, error);
            }
        }
    }

    report
}

fn first_failure(state: &FormState, path: FieldPath, checks: &[Check]) -> Option<FieldError> {
    checks.iter().find_map(|check| run_check(state, path, check))
}

fn run_check(state: &FormState, path: FieldPath, check: &Check) -> Option<FieldError> {
    let failed = match check.kind {
        CheckKind::Required => is_blank(state, path),
        CheckKind::MaxLength(limit) => match state.value_at(path) {
            Ok(ValueRef::Text(text)) => text.chars().count() > limit,
            _ => false,
        },
        CheckKind::MinItems(min) => match state.value_at(path) {
            Ok(ValueRef::List(list)) => list.len() < min,
            _ => false,
        },
        CheckKind::AllowedCity => city_out_of_set(state, path),
    };

    failed.then(|| FieldError {
        kind: kind_of(&check.kind),
        message: check.message.clone(),
    })
}

// Fixed rule rows addressing an entry that no longer exists are skipped;
// per-entry rows are always generated in range.
fn is_blank(state: &FormState, path: FieldPath) -> bool {
    match state.value_at(path) {
        Ok(ValueRef::Text(text)) => text.is_empty(),
        Ok(ValueRef::Date(date)) => date.is_none(),
        Ok(ValueRef::List(list)) => list.is_empty(),
        Err(_) => false,
    }
}

fn city_out_of_set(state: &FormState, path: FieldPath) -> bool {
    let FieldPath::Entry(index, EntryField::City) = path else {
        return false;
    };
    state.entries().get(index).is_some_and(|entry| {
        !entry.country.is_empty()
            && !entry.city.is_empty()
            && !is_city_of(&entry.country, &entry.city)
    })
}

fn kind_of(kind: &CheckKind) -> ErrorKind {
    match kind {
        CheckKind::Required => ErrorKind::Required,
        CheckKind::MaxLength(_) => ErrorKind::TooLong,
        CheckKind::MinItems(_) => ErrorKind::TooFewItems,
        CheckKind::AllowedCity => ErrorKind::InvalidOption,
    }
}
