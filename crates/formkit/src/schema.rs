//! Declarative validation schema
//!
//! A [`ValidationSchema`] is a table of rule rows: fixed rows bind checks
//! to one [`FieldPath`], per-entry rows bind checks to one entry field and
//! are applied to every country entry at its current index. Each check
//! carries its own user-facing message.

use serde::{Deserialize, Serialize};

use crate::path::{EntryField, FieldPath};

/// Message shown for every required-field violation.
pub const REQUIRED_MESSAGE: &str = "Required";

/// What a single check verifies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckKind {
    /// Non-empty text, non-null date or non-empty list.
    Required,
    /// Text at most this many characters.
    MaxLength(usize),
    /// List with at least this many items.
    MinItems(usize),
    /// City is a member of the option set for the entry's country.
    /// Only fires once both country and city are non-empty.
    AllowedCity,
}

/// One predicate plus its error message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Predicate to apply.
    pub kind: CheckKind,
    /// Message reported when the predicate fails.
    pub message: String,
}

impl Check {
    /// Presence check with the standard message.
    pub fn required() -> Self {
        Self {
            kind: CheckKind::Required,
            message: REQUIRED_MESSAGE.to_owned(),
        }
    }

    /// Length bound on a text field.
    pub fn max_length(limit: usize, message: impl Into<String>) -> Self {
        Self {
            kind: CheckKind::MaxLength(limit),
            message: message.into(),
        }
    }

    /// Minimum-size bound on a collection field.
    pub fn min_items(min: usize, message: impl Into<String>) -> Self {
        Self {
            kind: CheckKind::MinItems(min),
            message: message.into(),
        }
    }

    /// Country → city membership check.
    pub fn allowed_city(message: impl Into<String>) -> Self {
        Self {
            kind: CheckKind::AllowedCity,
            message: message.into(),
        }
    }
}

/// Checks bound to one fixed field path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Field the checks apply to.
    pub path: FieldPath,
    /// Checks in evaluation order; the first failure is reported.
    pub checks: Vec<Check>,
}

/// Checks applied to one field of every country entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRule {
    /// Entry field the checks apply to.
    pub field: EntryField,
    /// Checks in evaluation order; the first failure is reported.
    pub checks: Vec<Check>,
}

/// The complete rule set for a form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSchema {
    /// Rules on scalar fields and the hobby set.
    pub fixed: Vec<FieldRule>,
    /// Rules applied per element of the country-entry list.
    pub per_entry: Vec<EntryRule>,
}

impl ValidationSchema {
    /// Rule set of the registration form: every scalar required, names
    /// capped at 32 characters, at least one hobby, and per-entry
    /// country/city/visited-date requirements with the city constrained
    /// to the selected country's option set.
    pub fn registration() -> Self {
        Self {
            fixed: vec![
                FieldRule {
                    path: FieldPath::FirstName,
                    checks: vec![
                        Check::required(),
                        Check::max_length(32, "First name must be 32 characters or less"),
                    ],
                },
                FieldRule {
                    path: FieldPath::LastName,
                    checks: vec![
                        Check::required(),
                        Check::max_length(32, "Last name must be 32 characters or less"),
                    ],
                },
                FieldRule {
                    path: FieldPath::BirthDate,
                    checks: vec![Check::required()],
                },
                FieldRule {
                    path: FieldPath::Gender,
                    checks: vec![Check::required()],
                },
                FieldRule {
                    path: FieldPath::Hobbies,
                    checks: vec![Check::min_items(1, "At least 1 hobby required")],
                },
                FieldRule {
                    path: FieldPath::Address,
                    checks: vec![Check::required()],
                },
            ],
            per_entry: vec![
                EntryRule {
                    field: EntryField::Country,
                    checks: vec![Check::required()],
                },
                EntryRule {
                    field: EntryField::City,
                    checks: vec![
                        Check::required(),
                        Check::allowed_city("City is not available for the selected country"),
                    ],
                },
                EntryRule {
                    field: EntryField::VisitedDate,
                    checks: vec![Check::required()],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_schema_covers_every_field() {
        let schema = ValidationSchema::registration();
        let fixed: Vec<FieldPath> = schema.fixed.iter().map(|r| r.path).collect();
        assert_eq!(
            fixed,
            vec![
                FieldPath::FirstName,
                FieldPath::LastName,
                FieldPath::BirthDate,
                FieldPath::Gender,
                FieldPath::Hobbies,
                FieldPath::Address,
            ]
        );
        assert_eq!(schema.per_entry.len(), 3);
    }

    #[test]
    fn test_name_rules_have_length_cap() {
        let schema = ValidationSchema::registration();
        let first = schema.fixed.iter().find(|r| r.path == FieldPath::FirstName).unwrap();
        assert_eq!(first.checks[0], Check::required());
        assert!(matches!(first.checks[1].kind, CheckKind::MaxLength(32)));
    }

    #[test]
    fn test_city_rule_constrains_membership() {
        let schema = ValidationSchema::registration();
        let city = schema
            .per_entry
            .iter()
            .find(|r| r.field == EntryField::City)
            .unwrap();
        assert!(city.checks.iter().any(|c| c.kind == CheckKind::AllowedCity));
    }
}
