// crates/citydb-core/src/text.rs

//! # Text folding and edit distance
//!
//! Name search compares ASCII-folded, lower-case keys. Folding goes through
//! `deunicode`, which covers the Baltic, Polish and Cyrillic letters found
//! in the catalog (`ā` → `a`, `ł` → `l`, `ж` → `zh`, ...).

/// Convert a string into a folded key suitable for comparison.
///
/// 1\) Transliterate Unicode → ASCII (e.g. `Jēkabpils` -> `Jekabpils`)
/// 2\) Normalize to lowercase
///
/// ```rust
/// use citydb_core::text::fold_key;
///
/// assert_eq!(fold_key("Jēkabpils"), "jekabpils");
/// assert_eq!(fold_key("Łódź"), "lodz");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Normalizes a free-text place name for matching.
///
/// Everything except letters and spaces is dropped (digits, punctuation,
/// quotes), the rest is folded with [`fold_key`] and trimmed. Transliteration
/// artefacts such as the apostrophe produced for a Cyrillic soft sign are
/// dropped as well.
///
/// ```rust
/// use citydb_core::text::normalize_name;
///
/// assert_eq!(normalize_name("  Valmiera!! "), "valmiera");
/// assert_eq!(normalize_name("Ogre-2"), "ogre");
/// assert_eq!(normalize_name("Līvāni"), "livani");
/// ```
pub fn normalize_name(s: &str) -> String {
    let letters: String = s
        .chars()
        .filter(|c| c.is_alphabetic() || *c == ' ')
        .collect();
    fold_key(&letters)
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Levenshtein distance over Unicode scalar values; insertions, deletions and
/// substitutions each cost 1.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Bounded variant of [`edit_distance`]: `None` as soon as the distance is
/// known to exceed `limit`.
///
/// ```rust
/// use citydb_core::text::edit_distance_within;
///
/// assert_eq!(edit_distance_within("cesis", "cesis", 0), Some(0));
/// assert_eq!(edit_distance_within("talsi", "tukums", 2), None);
/// ```
pub fn edit_distance_within(a: &str, b: &str, limit: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len().abs_diff(b.len()) > limit {
        return None;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
            row_min = row_min.min(curr[j + 1]);
        }
        // Row minima never decrease, so the final distance is at least this.
        if row_min > limit {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let d = prev[b.len()];
    (d <= limit).then_some(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_distances() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("riga", ""), 4);
        assert_eq!(edit_distance("", "riga"), 4);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("vamier", "valmiera"), 2);
        assert_eq!(edit_distance("ventspils", "ventspils"), 0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // One substitution, even though 'ā' is two bytes in UTF-8.
        assert_eq!(edit_distance("limbazi", "limbāzi"), 1);
    }

    #[test]
    fn bounded_agrees_with_unbounded_when_within_limit() {
        let pairs = [
            ("vamier", "valmiera"),
            ("daugavpils", "daugavpils"),
            ("saldus", "sigulda"),
            ("bauska", "auce"),
            ("", "ape"),
        ];
        for (a, b) in pairs {
            let full = edit_distance(a, b);
            assert_eq!(edit_distance_within(a, b, full), Some(full), "{a} vs {b}");
            assert_eq!(edit_distance_within(a, b, full + 3), Some(full), "{a} vs {b}");
            if full > 0 {
                assert_eq!(edit_distance_within(a, b, full - 1), None, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn normalization_drops_noise_and_folds() {
        assert_eq!(normalize_name("Rēzekne"), "rezekne");
        assert_eq!(normalize_name("  KRĀSLAVA  "), "kraslava");
        assert_eq!(normalize_name("Sv. Jānis"), "sv janis");
        assert_eq!(normalize_name("123 !!"), "");
        assert_eq!(normalize_name("Šiauliai"), "siauliai");
        assert_eq!(normalize_name("Võru"), "voru");
    }
}
