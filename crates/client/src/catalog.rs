//! Static country catalog backing the add-city form.

/// A country selectable when recording a city.
pub struct Country {
    pub label: &'static str,
    pub code: &'static str,
}

/// The countries the original entry form offered. Unlisted codes are still
/// accepted; the catalog only drives labels and help text.
pub const COUNTRIES: &[Country] = &[
    Country { label: "Brasil", code: "BR" },
    Country { label: "Estados Unidos", code: "EUA" },
    Country { label: "França", code: "FR" },
    Country { label: "Espanha", code: "ES" },
    Country { label: "Portugal", code: "PT" },
    Country { label: "Itália", code: "IT" },
];

/// Looks up a catalog entry by code, case-insensitively.
pub fn find(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Human-readable label for a country code; falls back to the code itself.
pub fn label_for(code: &str) -> &str {
    find(code).map(|c| c.label).unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("br").unwrap().label, "Brasil");
        assert_eq!(find("FR").unwrap().label, "França");
    }

    #[test]
    fn label_falls_back_to_code() {
        assert_eq!(label_for("JP"), "JP");
    }
}
