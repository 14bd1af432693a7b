/// Transliteration equivalences for Indian names written in Latin script.
/// Applied strictly top to bottom in a single pass over the whole string;
/// later rules see the output of earlier ones, so the order is part of the
/// algorithm and must not be reshuffled.
const REPLACEMENTS: &[(&str, &str)] = &[
    // Vowel length variants
    ("aa", "a"),
    ("ee", "i"),
    ("ii", "i"),
    ("oo", "u"),
    ("uu", "u"),
    // Aspirated consonants
    ("kh", "k"),
    ("gh", "g"),
    ("chh", "ch"),
    ("jh", "j"),
    ("th", "t"),
    ("dh", "d"),
    ("ph", "p"),
    ("bh", "b"),
    // Sibilants and borrowed letters
    ("sh", "s"),
    ("x", "ks"),
    ("z", "j"),
    ("w", "v"),
    ("f", "p"),
    ("q", "k"),
    // Doubled retroflex/nasal consonants
    ("tt", "t"),
    ("dd", "d"),
    ("nn", "n"),
    ("ll", "l"),
    ("ng", "n"),
    // y is a vowel sound in most transliterations
    ("y", "i"),
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Lowercase, keep letters, map name separators (whitespace, dots,
/// hyphens) to single spaces, drop everything else.
fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;
    for c in name.chars() {
        if c.is_ascii_alphabetic() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '.' || c == '-' {
            pending_space = true;
        }
    }
    out
}

fn collapse_repeats(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if prev != Some(c) {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// The shared reduction pipeline: normalize, apply the equivalence table,
/// collapse immediate repeats. Still lowercase, still carries vowels.
fn reduce(name: &str) -> String {
    let mut s = normalize(name);
    for (pattern, replacement) in REPLACEMENTS {
        s = s.replace(pattern, replacement);
    }
    collapse_repeats(&s)
}

/// Keep the first character of a word, then drop all vowels.
fn consonant_skeleton(word: &str) -> String {
    let mut chars = word.chars();
    let mut out = String::with_capacity(word.len());
    if let Some(first) = chars.next() {
        out.push(first);
    }
    for c in chars {
        if !is_vowel(c) {
            out.push(c);
        }
    }
    out
}

/// Deterministic phonetic code for a name: one consonant skeleton per word,
/// space-joined, uppercase. E.g. "Shailesh" and "Shylesh" both code to
/// "SLS"; "Ram Kumar" codes to "RM KMR".
pub fn phonetic_code(name: &str) -> String {
    reduce(name)
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(consonant_skeleton)
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Looser variant: strips word boundaries and every vowel, including
/// word-initial ones. "Ayesha Khan" codes to "SKN".
pub fn phonetic_code_aggressive(name: &str) -> String {
    reduce(name)
        .chars()
        .filter(|c| !is_vowel(*c) && *c != ' ')
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_deterministic() {
        assert_eq!(phonetic_code("Shailesh"), phonetic_code("Shailesh"));
        assert_eq!(phonetic_code("Ram Kumar"), phonetic_code("Ram Kumar"));
    }

    #[test]
    fn spelling_variants_share_a_code() {
        assert_eq!(phonetic_code("Shailesh"), phonetic_code("Shylesh"));
        assert_eq!(phonetic_code("Shailesh"), "SLS");
    }

    #[test]
    fn vowel_length_variants_share_a_code() {
        assert_eq!(phonetic_code("Geeta"), phonetic_code("Gita"));
        assert_eq!(phonetic_code("Suneeta"), phonetic_code("Sunita"));
        assert_eq!(phonetic_code("Raam"), phonetic_code("Ram"));
    }

    #[test]
    fn aspiration_variants_share_a_code() {
        assert_eq!(phonetic_code("Santhosh"), phonetic_code("Santosh"));
        assert_eq!(phonetic_code("Thakur"), phonetic_code("Takur"));
        assert_eq!(phonetic_code("Bharat"), phonetic_code("Barat"));
    }

    #[test]
    fn sibilant_variants_share_a_code() {
        assert_eq!(phonetic_code("Lakshmi"), phonetic_code("Laxmi"));
        assert_eq!(phonetic_code("Vivek"), phonetic_code("Wiwek"));
        assert_eq!(phonetic_code("Zoya"), phonetic_code("Joya"));
        assert_eq!(phonetic_code("Farhan"), phonetic_code("Pharhan"));
    }

    #[test]
    fn doubled_consonants_share_a_code() {
        assert_eq!(phonetic_code("Dutta"), phonetic_code("Duta"));
        assert_eq!(phonetic_code("Reddy"), phonetic_code("Redy"));
        assert_eq!(phonetic_code("Pillai"), phonetic_code("Pilai"));
    }

    #[test]
    fn terminal_y_treated_as_vowel() {
        assert_eq!(phonetic_code("Ayesha"), phonetic_code("Aisha"));
        assert_eq!(phonetic_code("Vijay"), phonetic_code("Vijai"));
    }

    #[test]
    fn multi_word_names_keep_word_boundaries() {
        assert_eq!(phonetic_code("Ram Kumar"), "RM KMR");
        assert_eq!(phonetic_code("R. K. Sharma"), "R K SRM");
    }

    #[test]
    fn separators_and_noise_are_stripped() {
        assert_eq!(phonetic_code("Anand-Rao"), phonetic_code("Anand Rao"));
        assert_eq!(phonetic_code("D'Souza"), phonetic_code("DSouza"));
        assert_eq!(phonetic_code("  Ram  "), "RM");
    }

    #[test]
    fn empty_and_non_alpha_input_code_to_empty() {
        assert_eq!(phonetic_code(""), "");
        assert_eq!(phonetic_code("   "), "");
        assert_eq!(phonetic_code("1234 !!"), "");
    }

    #[test]
    fn aggressive_variant_drops_spaces_and_all_vowels() {
        assert_eq!(phonetic_code_aggressive("Ram Kumar"), "RMKMR");
        assert_eq!(phonetic_code_aggressive("Ayesha"), "S");
        assert_eq!(
            phonetic_code_aggressive("Shailesh"),
            phonetic_code_aggressive("Shylesh")
        );
    }
}
