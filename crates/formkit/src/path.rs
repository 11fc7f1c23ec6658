//! Field paths - typed addresses for every value in the form
//!
//! A [`FieldPath`] locates one value inside [`FormState`](crate::FormState):
//! a top-level scalar, the hobby set, or one field of an indexed country
//! entry. The `Display`/`FromStr` pair speaks the dotted/indexed grammar
//! used at the renderer boundary (`countryEntries[2].city`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FormError;

/// One field of a [`CountryEntry`](crate::CountryEntry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntryField {
    /// Country name (controls the city option set).
    Country,
    /// City name, constrained by the selected country.
    City,
    /// Date the country was visited.
    VisitedDate,
}

impl EntryField {
    fn name(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::City => "city",
            Self::VisitedDate => "visitedDate",
        }
    }
}

/// Address of a single value within the form state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldPath {
    /// First name scalar.
    FirstName,
    /// Last name scalar.
    LastName,
    /// Date of birth.
    BirthDate,
    /// Gender selection.
    Gender,
    /// Hobby multi-select.
    Hobbies,
    /// Free-text address.
    Address,
    /// Field of the country entry at the given index.
    Entry(usize, EntryField),
}

impl FieldPath {
    /// Kind of value this path accepts, for type-mismatch diagnostics.
    pub(crate) fn value_kind(self) -> &'static str {
        match self {
            Self::BirthDate | Self::Entry(_, EntryField::VisitedDate) => "date",
            Self::Hobbies => "hobby list",
            _ => "text",
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstName => write!(f, "firstName"),
            Self::LastName => write!(f, "lastName"),
            Self::BirthDate => write!(f, "birthDate"),
            Self::Gender => write!(f, "gender"),
            Self::Hobbies => write!(f, "hobbies"),
            Self::Address => write!(f, "address"),
            Self::Entry(index, field) => write!(f, "countryEntries[{index}].{}", field.name()),
        }
    }
}

impl FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" => return Ok(Self::FirstName),
            "lastName" => return Ok(Self::LastName),
            "birthDate" => return Ok(Self::BirthDate),
            "gender" => return Ok(Self::Gender),
            "hobbies" => return Ok(Self::Hobbies),
            "address" => return Ok(Self::Address),
            _ => {}
        }

        parse_entry_path(s).ok_or_else(|| FormError::UnknownPath(s.to_owned()))
    }
}

fn parse_entry_path(s: &str) -> Option<FieldPath> {
    let rest = s.strip_prefix("countryEntries[")?;
    let (index, rest) = rest.split_once("].")?;
    let index: usize = index.parse().ok()?;
    let field = match rest {
        "country" => EntryField::Country,
        "city" => EntryField::City,
        "visitedDate" => EntryField::VisitedDate,
        _ => return None,
    };
    Some(FieldPath::Entry(index, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        assert_eq!(FieldPath::FirstName.to_string(), "firstName");
        assert_eq!(FieldPath::Hobbies.to_string(), "hobbies");
        assert_eq!(
            FieldPath::Entry(2, EntryField::City).to_string(),
            "countryEntries[2].city"
        );
    }

    #[test]
    fn test_path_parse() {
        assert_eq!("birthDate".parse::<FieldPath>().unwrap(), FieldPath::BirthDate);
        assert_eq!(
            "countryEntries[0].visitedDate".parse::<FieldPath>().unwrap(),
            FieldPath::Entry(0, EntryField::VisitedDate)
        );
    }

    #[test]
    fn test_path_roundtrip() {
        let paths = [
            FieldPath::FirstName,
            FieldPath::LastName,
            FieldPath::BirthDate,
            FieldPath::Gender,
            FieldPath::Hobbies,
            FieldPath::Address,
            FieldPath::Entry(0, EntryField::Country),
            FieldPath::Entry(12, EntryField::City),
            FieldPath::Entry(3, EntryField::VisitedDate),
        ];
        for path in paths {
            assert_eq!(path.to_string().parse::<FieldPath>().unwrap(), path);
        }
    }

    #[test]
    fn test_unknown_path_fails_fast() {
        assert!(matches!(
            "middleName".parse::<FieldPath>(),
            Err(FormError::UnknownPath(_))
        ));
        assert!(matches!(
            "countryEntries[x].city".parse::<FieldPath>(),
            Err(FormError::UnknownPath(_))
        ));
        assert!(matches!(
            "countryEntries[0].continent".parse::<FieldPath>(),
            Err(FormError::UnknownPath(_))
        ));
    }
}
