//! Form state aggregate
//!
//! [`FormState`] owns every field value and encapsulates all mutation:
//! scalar edits, the hobby set, and the ordered list of country entries.
//! The one non-obvious rule lives here: changing an entry's country clears
//! a city that is not valid for the new country, in the same call, so no
//! observer ever sees a mismatched country/city pair.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::options::is_city_of;
use crate::path::{EntryField, FieldPath};
use crate::{FormError, Result};

/// One row of the visited-countries section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryEntry {
    /// Country name; empty until selected.
    pub country: String,
    /// City name; empty or a member of `cities_for(country)`.
    pub city: String,
    /// Date the country was visited.
    pub visited_date: Option<NaiveDate>,
}

/// Typed value accepted by [`FormState::set_field`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Text for name/gender/address/country/city fields.
    Text(String),
    /// Date for birth and visited dates; `None` clears the field.
    Date(Option<NaiveDate>),
    /// Replacement hobby selection.
    Hobbies(Vec<String>),
}

impl FieldValue {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::Hobbies(_) => "hobby list",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(Some(value))
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(value: Option<NaiveDate>) -> Self {
        Self::Date(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::Hobbies(value)
    }
}

/// State transition notifications accumulated during operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// A field took a new value.
    FieldChanged {
        /// Path of the changed field.
        path: FieldPath,
    },
    /// A country change invalidated the entry's previous city.
    CityCleared {
        /// Index of the affected entry.
        index: usize,
        /// City value that was cleared.
        previous: String,
    },
    /// A fresh entry was appended.
    EntryAppended {
        /// Index of the new entry.
        index: usize,
    },
    /// An entry was removed.
    EntryRemoved {
        /// Index the entry occupied before removal.
        index: usize,
    },
}

/// Borrowed view of one field's current value.
pub(crate) enum ValueRef<'a> {
    Text(&'a str),
    Date(Option<NaiveDate>),
    List(&'a [String]),
}

/// The complete, owned state of the registration form.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    first_name: String,
    last_name: String,
    birth_date: Option<NaiveDate>,
    gender: String,
    address: String,
    hobbies: Vec<String>,
    entries: Vec<CountryEntry>,
    #[serde(skip)]
    events: Vec<FormEvent>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Fresh state with one empty country entry (the form never starts
    /// with zero rows).
    pub fn new() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            birth_date: None,
            gender: String::new(),
            address: String::new(),
            hobbies: vec![],
            entries: vec![CountryEntry::default()],
            events: vec![],
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Selected hobbies in stable display order, duplicate-free.
    pub fn hobbies(&self) -> &[String] {
        &self.hobbies
    }

    /// Country entries in insertion order.
    pub fn entries(&self) -> &[CountryEntry] {
        &self.entries
    }

    /// Replace the value at `path`.
    ///
    /// Changing `countryEntries[i].country` cascade-clears the entry's city
    /// when the old city is not valid for the new country. Every other path
    /// is replaced with no side effects on siblings. Unknown indices and
    /// mismatched value types fail fast with [`FormError`].
    pub fn set_field(&mut self, path: FieldPath, value: FieldValue) -> Result<()> {
        match (path, value) {
            (FieldPath::FirstName, FieldValue::Text(v)) => self.first_name = v,
            (FieldPath::LastName, FieldValue::Text(v)) => self.last_name = v,
            (FieldPath::Gender, FieldValue::Text(v)) => self.gender = v,
            (FieldPath::Address, FieldValue::Text(v)) => self.address = v,
            (FieldPath::BirthDate, FieldValue::Date(v)) => self.birth_date = v,
            (FieldPath::Hobbies, FieldValue::Hobbies(list)) => {
                self.hobbies = dedup_preserving_order(list);
            }
            (FieldPath::Entry(index, field), value) => {
                return self.set_entry_field(index, field, value)
            }
            (path, value) => {
                return Err(FormError::ValueType {
                    path,
                    expected: path.value_kind(),
                    found: value.kind(),
                })
            }
        }
        self.raise(FormEvent::FieldChanged { path });
        Ok(())
    }

    fn set_entry_field(&mut self, index: usize, field: EntryField, value: FieldValue) -> Result<()> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(FormError::IndexOutOfBounds { index, len })?;

        let mut cleared = None;
        match (field, value) {
            (EntryField::Country, FieldValue::Text(country)) => {
                if country != entry.country {
                    entry.country = country;
                    // The dependent city survives only if it is still a
                    // member of the new country's city set.
                    if !entry.city.is_empty() && !is_city_of(&entry.country, &entry.city) {
                        cleared = Some(std::mem::take(&mut entry.city));
                    }
                }
            }
            (EntryField::City, FieldValue::Text(city)) => entry.city = city,
            (EntryField::VisitedDate, FieldValue::Date(date)) => entry.visited_date = date,
            (field, value) => {
                let path = FieldPath::Entry(index, field);
                return Err(FormError::ValueType {
                    path,
                    expected: path.value_kind(),
                    found: value.kind(),
                });
            }
        }

        if let Some(previous) = cleared {
            debug!(index, previous = %previous, "country changed, dependent city cleared");
            self.raise(FormEvent::CityCleared { index, previous });
        }
        self.raise(FormEvent::FieldChanged {
            path: FieldPath::Entry(index, field),
        });
        Ok(())
    }

    /// Append an all-default entry at the end, returning its index.
    ///
    /// Appending is always allowed, even while earlier rows are invalid.
    pub fn append_entry(&mut self) -> usize {
        self.entries.push(CountryEntry::default());
        let index = self.entries.len() - 1;
        self.raise(FormEvent::EntryAppended { index });
        index
    }

    /// Remove the entry at `index`, preserving the relative order of the
    /// survivors. Out-of-range indices are an explicit error, never a no-op.
    pub fn remove_entry(&mut self, index: usize) -> Result<CountryEntry> {
        let len = self.entries.len();
        if index >= len {
            return Err(FormError::IndexOutOfBounds { index, len });
        }
        let removed = self.entries.remove(index);
        self.raise(FormEvent::EntryRemoved { index });
        Ok(removed)
    }

    /// Current value at `path`, for validation and structural checks.
    pub(crate) fn value_at(&self, path: FieldPath) -> Result<ValueRef<'_>> {
        Ok(match path {
            FieldPath::FirstName => ValueRef::Text(&self.first_name),
            FieldPath::LastName => ValueRef::Text(&self.last_name),
            FieldPath::BirthDate => ValueRef::Date(self.birth_date),
            FieldPath::Gender => ValueRef::Text(&self.gender),
            FieldPath::Hobbies => ValueRef::List(&self.hobbies),
            FieldPath::Address => ValueRef::Text(&self.address),
            FieldPath::Entry(index, field) => {
                let entry = self.entries.get(index).ok_or(FormError::IndexOutOfBounds {
                    index,
                    len: self.entries.len(),
                })?;
                match field {
                    EntryField::Country => ValueRef::Text(&entry.country),
                    EntryField::City => ValueRef::Text(&entry.city),
                    EntryField::VisitedDate => ValueRef::Date(entry.visited_date),
                }
            }
        })
    }

    /// Get and clear accumulated events.
    pub fn take_events(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise(&mut self, event: FormEvent) {
        self.events.push(event);
    }
}

fn dedup_preserving_order(list: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(list.len());
    for item in list {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
