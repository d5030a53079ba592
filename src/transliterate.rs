//! Uzbek Latin → Cyrillic script conversion for stored record text.
//!
//! Pure rendering step; stored content stays in Latin script. Digraphs
//! must be substituted before single letters, otherwise `sh` would come
//! out as `сҳ` instead of `ш`.

/// Two-character sequences (and apostrophe-bearing vowels/consonants)
/// that map to a single Cyrillic phoneme. Tried in table order at every
/// position before the single-letter map.
const DIGRAPHS: &[(&str, &str)] = &[
    ("Sh", "Ш"),
    ("sh", "ш"),
    ("Ch", "Ч"),
    ("ch", "ч"),
    ("Ng", "Нг"),
    ("ng", "нг"),
    ("O'", "Ў"),
    ("o'", "ў"),
    ("G'", "Ғ"),
    ("g'", "ғ"),
];

fn map_single(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        'a' => "а",
        'b' => "б",
        'd' => "д",
        'e' => "е",
        'f' => "ф",
        'g' => "г",
        'h' => "ҳ",
        'i' => "и",
        'j' => "ж",
        'k' => "к",
        'l' => "л",
        'm' => "м",
        'n' => "н",
        'o' => "о",
        'p' => "п",
        'q' => "қ",
        'r' => "р",
        's' => "с",
        't' => "т",
        'u' => "у",
        'v' => "в",
        'x' => "х",
        'y' => "й",
        'z' => "з",
        'A' => "А",
        'B' => "Б",
        'D' => "Д",
        'E' => "Е",
        'F' => "Ф",
        'G' => "Г",
        'H' => "Ҳ",
        'I' => "И",
        'J' => "Ж",
        'K' => "К",
        'L' => "Л",
        'M' => "М",
        'N' => "Н",
        'O' => "О",
        'P' => "П",
        'Q' => "Қ",
        'R' => "Р",
        'S' => "С",
        'T' => "Т",
        'U' => "У",
        'V' => "В",
        'X' => "Х",
        'Y' => "Й",
        'Z' => "З",
        '\'' => "ъ",
        _ => return None,
    };
    Some(mapped)
}

/// Convert Latin-script Uzbek text to Cyrillic. Total function: unmapped
/// characters pass through unchanged, so arbitrary input is safe and
/// already-Cyrillic text comes back as-is.
pub fn latin_to_cyrillic(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);
    let mut rest = text;

    'scan: while let Some(ch) = rest.chars().next() {
        for (latin, cyrillic) in DIGRAPHS {
            if let Some(remainder) = rest.strip_prefix(latin) {
                result.push_str(cyrillic);
                rest = remainder;
                continue 'scan;
            }
        }

        match map_single(ch) {
            Some(cyrillic) => result.push_str(cyrillic),
            None => result.push(ch),
        }
        rest = &rest[ch.len_utf8()..];
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digraphs_substituted_as_one_character() {
        assert_eq!(latin_to_cyrillic("sh"), "ш");
        assert_eq!(latin_to_cyrillic("ch"), "ч");
        assert_eq!(latin_to_cyrillic("o'"), "ў");
    }

    #[test]
    fn test_word_conversion() {
        assert_eq!(latin_to_cyrillic("shahar"), "шаҳар");
        assert_eq!(latin_to_cyrillic("O'zbekiston"), "Ўзбекистон");
    }

    #[test]
    fn test_unmapped_characters_pass_through() {
        assert_eq!(latin_to_cyrillic("42 kg!"), "42 кг!");
        assert_eq!(latin_to_cyrillic("c"), "c");
    }
}
