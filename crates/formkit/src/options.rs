//! Option catalogs - the closed value sets offered by the form
//!
//! The country → city relation is a static lookup table so the dependent
//! select is enforced structurally instead of by free-text validation.

/// Countries offered by the visited-countries section, in display order.
pub const COUNTRIES: [&str; 2] = ["Germany", "France"];

/// Hobby labels offered by the multi-select, in display order.
pub const HOBBIES: [&str; 5] = ["Comics", "PC Games", "Travelling", "Swimming", "Photography"];

/// Gender options, in display order.
pub const GENDERS: [&str; 2] = ["Man", "Woman"];

/// Cities selectable for the given country, in display order.
///
/// Pure lookup: unknown or empty countries yield an empty slice, so a row
/// without a country offers no city choices at all.
pub fn cities_for(country: &str) -> &'static [&'static str] {
    match country {
        "Germany" => &["Frankfurt", "Berlin"],
        "France" => &["Paris", "Lille"],
        _ => &[],
    }
}

/// Whether `city` is a valid choice for `country`.
pub fn is_city_of(country: &str, city: &str) -> bool {
    cities_for(country).contains(&city)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cities_for_known_countries() {
        assert_eq!(cities_for("Germany"), ["Frankfurt", "Berlin"]);
        assert_eq!(cities_for("France"), ["Paris", "Lille"]);
    }

    #[test]
    fn test_cities_for_unknown_or_empty() {
        assert!(cities_for("").is_empty());
        assert!(cities_for("Atlantis").is_empty());
    }

    #[test]
    fn test_cities_for_is_idempotent() {
        for country in COUNTRIES {
            assert_eq!(cities_for(country), cities_for(country));
        }
    }

    #[test]
    fn test_is_city_of() {
        assert!(is_city_of("Germany", "Berlin"));
        assert!(!is_city_of("Germany", "Paris"));
        assert!(!is_city_of("", "Berlin"));
    }
}
