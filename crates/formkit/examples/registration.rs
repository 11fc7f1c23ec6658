//! Scripted renderer/sink pair driving a registration session.
//!
//! Submits once with an empty form to show the blocked submission and the
//! per-field error slots, then fills every field and submits again; the
//! sink echoes the accepted payload as pretty JSON.

use chrono::NaiveDate;
use formkit::{
    bindings, EntryField, FieldPath, FormSession, SubmissionPayload, SubmissionSink,
};

struct AlertSink;

impl SubmissionSink for AlertSink {
    fn accept(&mut self, payload: &SubmissionPayload) {
        println!("{}", payload.to_json().expect("payload serializes"));
    }
}

fn main() -> formkit::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut session = FormSession::new();
    let mut sink = AlertSink;

    // First attempt: everything empty, submission is blocked.
    let outcome = session.submit(&mut sink);
    println!("first attempt: {outcome:?}");
    for (path, error) in session.errors().iter() {
        println!("  [{}] *{}", bindings::error_slot_id(path), error.message);
    }

    // Fill the form the way a renderer would forward change events.
    session.set_field(FieldPath::FirstName, "Anil")?;
    session.set_field(FieldPath::LastName, "Bozkus")?;
    session.set_field(FieldPath::BirthDate, NaiveDate::from_ymd_opt(1990, 4, 2))?;
    session.set_field(FieldPath::Gender, "Man")?;
    session.set_field(
        FieldPath::Hobbies,
        vec!["Comics".to_owned(), "Travelling".to_owned()],
    )?;
    session.set_field(FieldPath::Address, "Hauptstrasse 1, Berlin")?;

    // Visited countries: pick Germany/Berlin, then switch the country and
    // watch the dependent city get cleared.
    session.set_field(FieldPath::Entry(0, EntryField::Country), "Germany")?;
    session.set_field(FieldPath::Entry(0, EntryField::City), "Berlin")?;
    session.set_field(FieldPath::Entry(0, EntryField::Country), "France")?;
    assert_eq!(session.state().entries()[0].city, "");
    session.set_field(FieldPath::Entry(0, EntryField::City), "Paris")?;
    session.set_field(
        FieldPath::Entry(0, EntryField::VisitedDate),
        NaiveDate::from_ymd_opt(2019, 9, 30),
    )?;

    let index = session.append_entry();
    session.set_field(FieldPath::Entry(index, EntryField::Country), "Germany")?;
    session.set_field(FieldPath::Entry(index, EntryField::City), "Frankfurt")?;
    session.set_field(
        FieldPath::Entry(index, EntryField::VisitedDate),
        NaiveDate::from_ymd_opt(2022, 3, 8),
    )?;

    // Second attempt: the sink receives the payload.
    let outcome = session.submit(&mut sink);
    println!("second attempt: {outcome:?}");
    Ok(())
}
