//! Renderer bindings - stable, queryable identifiers
//!
//! External test tooling locates controls and error slots through these
//! ids, never through visual layout. Ids are kebab-case; an error slot is
//! its control's id with an `-error` suffix.

use crate::path::{EntryField, FieldPath};

/// Identifier of the submit action.
pub const SUBMIT_BUTTON_ID: &str = "submit-button";

/// Identifier of the input control bound to `path`.
pub fn control_id(path: FieldPath) -> String {
    match path {
        FieldPath::FirstName => "first-name".to_owned(),
        FieldPath::LastName => "last-name".to_owned(),
        FieldPath::BirthDate => "birth-date".to_owned(),
        FieldPath::Gender => "gender".to_owned(),
        FieldPath::Hobbies => "hobbies".to_owned(),
        FieldPath::Address => "address".to_owned(),
        FieldPath::Entry(index, field) => {
            let field = match field {
                EntryField::Country => "country",
                EntryField::City => "city",
                EntryField::VisitedDate => "visited-date",
            };
            format!("countries-{index}-{field}")
        }
    }
}

/// Identifier of the error-message slot for `path`.
pub fn error_slot_id(path: FieldPath) -> String {
    format!("{}-error", control_id(path))
}
