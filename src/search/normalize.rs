//! Text normalization
//!
//! Every comparison in the pipeline happens on normalized text: lowercase,
//! diacritics stripped, trimmed, internal whitespace runs collapsed to one space.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize text for matching.
///
/// - Unicode NFKD decomposition, then lowercase
/// - combining marks dropped ("Azúcar" -> "azucar")
/// - whitespace trimmed and collapsed
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    // Lowercasing after decomposition catches uppercase letters that only
    // appear once compatibility forms are expanded
    let folded: String = text
        .nfkd()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let mut out = String::with_capacity(folded.len());
    for word in folded.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Length in characters, which is what every length threshold is measured in
pub fn char_len(normalized: &str) -> usize {
    normalized.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_diacritics() {
        assert_eq!(normalize("Azúcar"), "azucar");
        assert_eq!(normalize("CAFÉ Crème"), "cafe creme");
        assert_eq!(normalize("Pingüino"), "pinguino");
        assert_eq!(normalize("Ñandú"), "nandu");
    }

    #[test]
    fn test_decomposed_input() {
        // "e" followed by a combining acute accent
        assert_eq!(normalize("cafe\u{0301}"), "cafe");
    }

    #[test]
    fn test_whitespace_handling() {
        assert_eq!(normalize("  aceite   de\toliva \n"), "aceite de oliva");
        assert_eq!(normalize("leche\u{00A0}entera"), "leche entera");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t "), "");
    }

    #[test]
    fn test_idempotent_examples() {
        for s in ["Garbanzos", "Aceite de Oliva", "İstanbul", "ﬁlete", "  Ü  ", "\u{3381}"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_char_len() {
        assert_eq!(char_len("azucar"), 6);
        assert_eq!(char_len(""), 0);
    }
}
