//! Form session - triggering policy and submission gate
//!
//! [`FormSession`] mediates between a renderer and the model. It owns the
//! state, the schema, the touched-field set and the currently surfaced
//! [`ErrorReport`], and it enforces the triggering policy: change events
//! never validate, blur validates and surfaces errors for touched fields,
//! and a submission attempt validates everything and blocks the
//! [`SubmissionSink`] while any error exists.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::path::FieldPath;
use crate::schema::ValidationSchema;
use crate::state::{CountryEntry, FieldValue, FormEvent, FormState};
use crate::validate::{validate, ErrorReport};
use crate::Result;

/// Consumer of a fully validated payload.
///
/// The only observed behavior in this system is to display the payload;
/// a real deployment would put a network call behind this trait.
pub trait SubmissionSink {
    /// Receive the validated form values.
    fn accept(&mut self, payload: &SubmissionPayload);
}

/// Plain snapshot of all field values handed to the [`SubmissionSink`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Gender selection.
    pub gender: String,
    /// Selected hobbies in display order.
    pub hobbies: Vec<String>,
    /// Free-text address.
    pub address: String,
    /// Visited-country entries in insertion order.
    pub countries: Vec<CountryEntry>,
}

impl SubmissionPayload {
    fn of(state: &FormState) -> Self {
        Self {
            first_name: state.first_name().to_owned(),
            last_name: state.last_name().to_owned(),
            birth_date: state.birth_date(),
            gender: state.gender().to_owned(),
            hobbies: state.hobbies().to_vec(),
            address: state.address().to_owned(),
            countries: state.entries().to_vec(),
        }
    }

    /// Pretty-printed JSON rendition, as the demo sink echoes it.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of a submission attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The payload was handed to the sink.
    Accepted,
    /// Validation failed; the sink was not invoked.
    Rejected {
        /// Number of failing fields.
        errors: usize,
    },
}

/// A live editing session over one [`FormState`].
#[derive(Clone, Debug)]
pub struct FormSession {
    state: FormState,
    schema: ValidationSchema,
    touched: BTreeSet<FieldPath>,
    errors: ErrorReport,
    submit_attempted: bool,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    /// Session over a fresh state with the registration schema.
    pub fn new() -> Self {
        Self::with_schema(ValidationSchema::registration())
    }

    /// Session over a fresh state with a custom schema.
    pub fn with_schema(schema: ValidationSchema) -> Self {
        Self {
            state: FormState::new(),
            schema,
            touched: BTreeSet::new(),
            errors: ErrorReport::default(),
            submit_attempted: false,
        }
    }

    /// Read-only snapshot of the current state.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Currently surfaced validation errors.
    pub fn errors(&self) -> &ErrorReport {
        &self.errors
    }

    /// Schema in effect for this session.
    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    /// Drain state-transition events accumulated so far.
    pub fn take_events(&mut self) -> Vec<FormEvent> {
        self.state.take_events()
    }

    /// Forward a change event. Never validates: errors surface on blur or
    /// submit, not on every keystroke.
    pub fn set_field(&mut self, path: FieldPath, value: impl Into<FieldValue>) -> Result<()> {
        self.state.set_field(path, value.into())
    }

    /// Forward a blur event: mark the field touched and refresh the report.
    /// Until the first submission attempt only touched fields surface.
    pub fn blur(&mut self, path: FieldPath) -> Result<()> {
        // Reject paths that do not address an existing field.
        self.state.value_at(path)?;
        self.touched.insert(path);
        self.refresh();
        Ok(())
    }

    /// Append an empty country entry. Always allowed, even while earlier
    /// rows are invalid.
    pub fn append_entry(&mut self) -> usize {
        self.state.append_entry()
    }

    /// Remove the entry at `index` and recompute the report against the
    /// post-removal state, so no error path references a shifted or
    /// vanished row.
    pub fn remove_entry(&mut self, index: usize) -> Result<CountryEntry> {
        let removed = self.state.remove_entry(index)?;
        let len = self.state.entries().len();
        self.touched
            .retain(|path| !matches!(path, FieldPath::Entry(i, _) if *i >= len));
        self.refresh();
        Ok(removed)
    }

    /// Attempt submission: validate everything, surface all errors, and
    /// invoke the sink only when the report is empty.
    pub fn submit(&mut self, sink: &mut dyn SubmissionSink) -> SubmitOutcome {
        self.submit_attempted = true;
        let report = validate(&self.state, &self.schema);

        if report.is_empty() {
            let payload = SubmissionPayload::of(&self.state);
            debug!("submission accepted");
            sink.accept(&payload);
            self.errors = report;
            SubmitOutcome::Accepted
        } else {
            let errors = report.len();
            warn!(errors, "submission blocked by validation errors");
            self.errors = report;
            SubmitOutcome::Rejected { errors }
        }
    }

    fn refresh(&mut self) {
        let report = validate(&self.state, &self.schema);
        let surfaced = if self.submit_attempted {
            report
        } else {
            let touched = &self.touched;
            report.filtered(|path| touched.contains(&path))
        };
        self.errors = surfaced;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::EntryField;
    use crate::validate::ErrorKind;
    use crate::FormError;

    #[derive(Default)]
    struct TestSink {
        accepted: Vec<SubmissionPayload>,
    }

    impl SubmissionSink for TestSink {
        fn accept(&mut self, payload: &SubmissionPayload) {
            self.accepted.push(payload.clone());
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fill_valid(session: &mut FormSession) {
        session.set_field(FieldPath::FirstName, "Anil").unwrap();
        session.set_field(FieldPath::LastName, "Bozkus").unwrap();
        session.set_field(FieldPath::BirthDate, date(1990, 4, 2)).unwrap();
        session.set_field(FieldPath::Gender, "Man").unwrap();
        session
            .set_field(FieldPath::Hobbies, vec!["Travelling".to_owned()])
            .unwrap();
        session.set_field(FieldPath::Address, "Hauptstrasse 1, Berlin").unwrap();
        session
            .set_field(FieldPath::Entry(0, EntryField::Country), "France")
            .unwrap();
        session
            .set_field(FieldPath::Entry(0, EntryField::City), "Paris")
            .unwrap();
        session
            .set_field(FieldPath::Entry(0, EntryField::VisitedDate), date(2019, 9, 30))
            .unwrap();
    }

    #[test]
    fn test_change_events_never_validate() {
        let mut session = FormSession::new();
        session.set_field(FieldPath::FirstName, "").unwrap();
        session.set_field(FieldPath::LastName, "B").unwrap();
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_blur_surfaces_only_touched_fields() {
        let mut session = FormSession::new();
        session.blur(FieldPath::FirstName).unwrap();

        assert_eq!(session.errors().message(FieldPath::FirstName), Some("Required"));
        assert!(session.errors().get(FieldPath::LastName).is_none());
    }

    #[test]
    fn test_blur_on_missing_entry_fails_fast() {
        let mut session = FormSession::new();
        let err = session.blur(FieldPath::Entry(5, EntryField::City)).unwrap_err();
        assert_eq!(err, FormError::IndexOutOfBounds { index: 5, len: 1 });
    }

    #[test]
    fn test_submission_blocked_and_sink_not_invoked() {
        let mut session = FormSession::new();
        let mut sink = TestSink::default();

        let outcome = session.submit(&mut sink);

        assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
        assert!(sink.accepted.is_empty());
        // All failing fields surface after a submission attempt.
        assert_eq!(session.errors().message(FieldPath::FirstName), Some("Required"));
        assert_eq!(
            session.errors().get(FieldPath::Hobbies).unwrap().kind,
            ErrorKind::TooFewItems
        );
    }

    #[test]
    fn test_valid_submission_reaches_sink() {
        let mut session = FormSession::new();
        let mut sink = TestSink::default();
        fill_valid(&mut session);

        let outcome = session.submit(&mut sink);

        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert!(session.errors().is_empty());
        assert_eq!(sink.accepted.len(), 1);
        let payload = &sink.accepted[0];
        assert_eq!(payload.first_name, "Anil");
        assert_eq!(payload.countries[0].city, "Paris");

        let json = payload.to_json().unwrap();
        assert!(json.contains("\"countries\""));
        assert!(json.contains("\"visitedDate\": \"2019-09-30\""));
    }

    #[test]
    fn test_fix_then_resubmit_succeeds() {
        let mut session = FormSession::new();
        let mut sink = TestSink::default();

        assert!(matches!(session.submit(&mut sink), SubmitOutcome::Rejected { .. }));
        fill_valid(&mut session);
        assert_eq!(session.submit(&mut sink), SubmitOutcome::Accepted);
        assert_eq!(sink.accepted.len(), 1);
    }

    #[test]
    fn test_invalid_city_blocks_submission() {
        let mut session = FormSession::new();
        let mut sink = TestSink::default();
        fill_valid(&mut session);
        session
            .set_field(FieldPath::Entry(0, EntryField::Country), "Germany")
            .unwrap();
        // Cascade cleared the city; pick an out-of-set one on purpose.
        session
            .set_field(FieldPath::Entry(0, EntryField::City), "Paris")
            .unwrap();

        let outcome = session.submit(&mut sink);

        assert_eq!(outcome, SubmitOutcome::Rejected { errors: 1 });
        assert_eq!(
            session.errors().get(FieldPath::Entry(0, EntryField::City)).unwrap().kind,
            ErrorKind::InvalidOption
        );
        assert!(sink.accepted.is_empty());
    }

    #[test]
    fn test_country_change_cascades_before_next_observation() {
        let mut session = FormSession::new();
        session
            .set_field(FieldPath::Entry(0, EntryField::Country), "Germany")
            .unwrap();
        session
            .set_field(FieldPath::Entry(0, EntryField::City), "Berlin")
            .unwrap();

        session
            .set_field(FieldPath::Entry(0, EntryField::Country), "France")
            .unwrap();

        assert_eq!(session.state().entries()[0].city, "");
    }

    #[test]
    fn test_remove_entry_refreshes_surfaced_report() {
        let mut session = FormSession::new();
        let mut sink = TestSink::default();
        fill_valid(&mut session);
        session.append_entry();

        assert!(matches!(session.submit(&mut sink), SubmitOutcome::Rejected { .. }));
        assert!(session
            .errors()
            .paths()
            .any(|p| matches!(p, FieldPath::Entry(1, _))));

        session.remove_entry(1).unwrap();

        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_append_then_remove_scenario() {
        // One seeded entry, two appends, remove the middle row.
        let mut session = FormSession::new();
        session
            .set_field(FieldPath::Entry(0, EntryField::Country), "Germany")
            .unwrap();
        session.append_entry();
        session.append_entry();
        session
            .set_field(FieldPath::Entry(2, EntryField::Country), "France")
            .unwrap();
        assert_eq!(session.state().entries().len(), 3);

        session.remove_entry(1).unwrap();

        let entries = session.state().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].country, "Germany");
        assert_eq!(entries[1].country, "France");
    }
}
