//! Presenter name normalization.
//!
//! Presenters get registered more than once (submission forms, organizer
//! imports, registration desk), so names are folded to a canonical form for
//! dedup and search: lowercase, accents stripped, whitespace collapsed.

use unicode_normalization::UnicodeNormalization;

/// Normalize a presenter name for matching purposes.
///
/// NFD-decomposes the name, drops combining diacritical marks, lowercases,
/// and collapses whitespace. Letters that do not decompose into base +
/// accent (Ł, ø, æ, ...) are mapped explicitly first.
///
/// # Examples
///
/// ```
/// use symposia::utils::normalize_name;
///
/// assert_eq!(normalize_name("José García"), "jose garcia");
/// assert_eq!(normalize_name("Łukasz Müller"), "lukasz muller");
/// assert_eq!(normalize_name("  Grace   Hopper  "), "grace hopper");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .map(fold_non_decomposing)
        .collect::<String>()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Normalize a name and also remove punctuation for looser matching.
///
/// Useful for matching "O'Brien" with "OBrien" or "Jean-Pierre" with
/// "Jean Pierre".
///
/// # Examples
///
/// ```
/// use symposia::utils::normalize_name_loose;
///
/// assert_eq!(normalize_name_loose("O'Brien"), "obrien");
/// assert_eq!(normalize_name_loose("Jean-Pierre"), "jeanpierre");
/// ```
pub fn normalize_name_loose(name: &str) -> String {
    normalize_name(name)
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Map letters that are distinct characters rather than accented variants,
/// which NFD leaves untouched.
fn fold_non_decomposing(c: char) -> char {
    match c {
        'Ł' => 'L',
        'ł' => 'l',
        'Ø' => 'O',
        'ø' => 'o',
        'Æ' => 'A',
        'æ' => 'a',
        'Å' => 'A',
        'å' => 'a',
        'ß' => 's',
        'Ð' => 'D',
        'ð' => 'd',
        'Þ' => 'T',
        'þ' => 't',
        'Đ' => 'D',
        'đ' => 'd',
        'İ' => 'I',
        'ı' => 'i',
        'Ğ' => 'G',
        'ğ' => 'g',
        'Ş' => 'S',
        'ş' => 's',
        _ => c,
    }
}

/// Combining diacritical mark ranges, per the Unicode charts.
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accents_stripped() {
        assert_eq!(normalize_name("José García"), "jose garcia");
        assert_eq!(normalize_name("Schrödinger"), "schrodinger");
        assert_eq!(normalize_name("Émile Durkheim"), "emile durkheim");
    }

    #[test]
    fn test_non_decomposing_letters() {
        assert_eq!(normalize_name("Łukasz"), "lukasz");
        assert_eq!(normalize_name("Søren Kierkegaard"), "soren kierkegaard");
        assert_eq!(normalize_name("Weierstraß"), "weierstras");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize_name("  Grace   Hopper  "), "grace hopper");
        assert_eq!(normalize_name("Ada\tLovelace"), "ada lovelace");
    }

    #[test]
    fn test_already_plain() {
        assert_eq!(normalize_name("alan turing"), "alan turing");
    }

    #[test]
    fn test_loose_drops_punctuation() {
        assert_eq!(normalize_name_loose("O'Brien"), "obrien");
        assert_eq!(normalize_name_loose("Jean-Pierre Dupont"), "jeanpierre dupont");
        assert_eq!(normalize_name_loose("Dr. Smith Jr."), "dr smith jr");
    }

    #[test]
    fn test_loose_keeps_word_boundaries() {
        assert_eq!(normalize_name_loose("Mary Jane Watson"), "mary jane watson");
    }
}
