/// Conference slug utilities
///
/// Slugs are human-friendly identifiers in the format: {ACRONYM}{YEAR}
/// Examples: RUSTFEST2026, EUROCONF2024, DEVSUMMIT2025

/// Parse a conference slug into (acronym, year) components.
///
/// The acronym is the leading run of ASCII letters (at least two), the year
/// is everything after it.
///
/// # Examples
/// ```
/// use symposia::utils::parse_conference_slug;
///
/// assert_eq!(parse_conference_slug("RUSTFEST2026"), Some(("RUSTFEST".to_string(), 2026)));
/// assert_eq!(parse_conference_slug("euroconf2024"), Some(("EUROCONF".to_string(), 2024))); // case insensitive
/// assert_eq!(parse_conference_slug("RUSTFEST"), None); // missing year
/// assert_eq!(parse_conference_slug("2026"), None); // missing acronym
/// ```
pub fn parse_conference_slug(slug: &str) -> Option<(String, i32)> {
    let slug_upper = slug.trim().to_uppercase();

    let split = slug_upper
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(slug_upper.len());

    let (acronym, year_str) = slug_upper.split_at(split);
    if acronym.len() < 2 {
        return None;
    }

    let year = year_str.parse::<i32>().ok()?;
    // Sanity check: year should be reasonable (1990-2100)
    if !(1990..=2100).contains(&year) {
        return None;
    }

    Some((acronym.to_string(), year))
}

/// Generate a slug from acronym and year
///
/// # Examples
/// ```
/// use symposia::utils::make_conference_slug;
///
/// assert_eq!(make_conference_slug("RUSTFEST", 2026), "RUSTFEST2026");
/// assert_eq!(make_conference_slug("euroconf", 2024), "EUROCONF2024");
/// ```
pub fn make_conference_slug(acronym: &str, year: i32) -> String {
    format!("{}{}", acronym.to_uppercase(), year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        assert_eq!(
            parse_conference_slug("RUSTFEST2026"),
            Some(("RUSTFEST".to_string(), 2026))
        );
        assert_eq!(
            parse_conference_slug("DEVSUMMIT1998"),
            Some(("DEVSUMMIT".to_string(), 1998))
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            parse_conference_slug("rustfest2026"),
            Some(("RUSTFEST".to_string(), 2026))
        );
        assert_eq!(
            parse_conference_slug("EuroConf2024"),
            Some(("EUROCONF".to_string(), 2024))
        );
    }

    #[test]
    fn test_missing_parts() {
        assert_eq!(parse_conference_slug("RUSTFEST"), None);
        assert_eq!(parse_conference_slug("2026"), None);
        assert_eq!(parse_conference_slug(""), None);
    }

    #[test]
    fn test_short_acronym_rejected() {
        assert_eq!(parse_conference_slug("A2026"), None);
    }

    #[test]
    fn test_invalid_year() {
        assert_eq!(parse_conference_slug("RUSTFESTabcd"), None);
        assert_eq!(parse_conference_slug("RUSTFEST1800"), None); // too old
        assert_eq!(parse_conference_slug("RUSTFEST2200"), None); // too far future
    }

    #[test]
    fn test_make_slug() {
        assert_eq!(make_conference_slug("RUSTFEST", 2026), "RUSTFEST2026");
        assert_eq!(make_conference_slug("euroconf", 2024), "EUROCONF2024");
    }

    #[test]
    fn test_roundtrip() {
        let slug = make_conference_slug("DevSummit", 2025);
        assert_eq!(
            parse_conference_slug(&slug),
            Some(("DEVSUMMIT".to_string(), 2025))
        );
    }
}
