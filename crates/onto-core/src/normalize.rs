//! Element-name and type-tag normalization
//!
//! `normalize_name` maps a raw element name to its canonical display form.
//! It is deterministic and idempotent, and it never changes letter case.
//!
//! Rules, in order:
//!
//! 1. `est_rest` / `a_rest` (verb forms) become `est rest` / `a rest` with the
//!    remaining underscores turned into spaces; nothing else is applied.
//! 2. Otherwise underscores become spaces.
//! 3. French elision: a standalone `l`, `d`, `qu`, `jusqu`, ... followed by a
//!    space and a word becomes `l'word`.
//! 4. `aujourd hui` becomes `aujourd'hui`.
//! 5. Whitespace runs collapse to one space; the result is trimmed.

use ahash::AHashMap;

/// Prefixes that mark a verb-form element name
const VERB_PREFIXES: [&str; 2] = ["est", "a"];

/// Prefixes that take an apostrophe before the next word
const ELISION_PREFIXES: [&str; 14] = [
    "l", "d", "j", "m", "t", "s", "c", "n", "qu", "jusqu", "lorsqu", "puisqu", "quoiqu", "quelqu",
];

/// Canonical form of a raw element name
pub fn normalize_name(raw: &str) -> String {
    if let Some(verb) = verb_form(raw) {
        return verb;
    }

    let spaced = collapse_whitespace(&raw.replace('_', " "));
    let elided = apply_elision(&spaced);
    let fixed = elided.replace("aujourd hui", "aujourd'hui");
    collapse_whitespace(&fixed)
}

/// Normalized grouping key of a type tag: lowercase, underscores as spaces
pub fn normalize_type(tag: &str) -> String {
    collapse_whitespace(&tag.replace('_', " ")).to_lowercase()
}

/// Deduplicate a slash-joined type string.
///
/// Tags sharing a normalized key collapse to their longest original-cased
/// variant (lexicographically smallest on equal length); survivors are
/// sorted and re-joined with `/`.
pub fn dedup_types(combined: &str) -> String {
    let mut chosen: AHashMap<String, &str> = AHashMap::new();

    for tag in combined.split('/').map(str::trim) {
        let key = normalize_type(tag);
        if key.is_empty() {
            continue;
        }
        chosen
            .entry(key)
            .and_modify(|current| {
                if prefer_variant(tag, current) {
                    *current = tag;
                }
            })
            .or_insert(tag);
    }

    let mut tags: Vec<&str> = chosen.into_values().collect();
    tags.sort_unstable();
    tags.join("/")
}

/// Collapse whitespace runs to single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn prefer_variant(candidate: &str, current: &str) -> bool {
    let (a, b) = (candidate.chars().count(), current.chars().count());
    a > b || (a == b && candidate < current)
}

/// `est_...` / `a_...` names. The spaced output is recognized too, so the
/// result stays a fixed point.
fn verb_form(raw: &str) -> Option<String> {
    let (prefix, rest) = raw.split_once(|c: char| c == '_' || c == ' ')?;
    if !VERB_PREFIXES.contains(&prefix) {
        return None;
    }
    Some(collapse_whitespace(&format!(
        "{} {}",
        prefix,
        rest.replace('_', " ")
    )))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True if `word` ends with an elision prefix that starts on a word boundary
fn ends_with_elision_prefix(word: &str) -> bool {
    ELISION_PREFIXES.iter().any(|prefix| {
        word.strip_suffix(prefix)
            .is_some_and(|head| head.chars().last().map_or(true, |c| !is_word_char(c)))
    })
}

/// Expects whitespace already collapsed
fn apply_elision(text: &str) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    let mut out = String::with_capacity(text.len());

    for (idx, word) in words.iter().enumerate() {
        out.push_str(word);
        if let Some(next) = words.get(idx + 1) {
            let next_starts_word = next.chars().next().is_some_and(is_word_char);
            if next_starts_word && ends_with_elision_prefix(word) {
                out.push('\'');
            } else {
                out.push(' ');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_underscores_to_spaces() {
        assert_eq!(normalize_name("Foo_Bar"), "Foo Bar");
        assert_eq!(normalize_name("Foo Bar"), "Foo Bar");
        assert_eq!(normalize_name("  Foo__Bar  "), "Foo Bar");
    }

    #[test]
    fn test_verb_forms_skip_elision() {
        assert_eq!(normalize_name("est_situe_dans"), "est situe dans");
        assert_eq!(normalize_name("a_l_interieur"), "a l interieur");
        assert_eq!(normalize_name("est__grand"), "est grand");
        // "at" is not a verb prefix
        assert_eq!(normalize_name("at_l_ecole"), "at l'ecole");
    }

    #[test]
    fn test_elision() {
        assert_eq!(normalize_name("l_homme"), "l'homme");
        assert_eq!(normalize_name("jusqu_a"), "jusqu'a");
        assert_eq!(normalize_name("qu_il"), "qu'il");
        assert_eq!(normalize_name("lorsqu_il_d_abord"), "lorsqu'il d'abord");
        // prefix must start on a word boundary
        assert_eq!(normalize_name("bol_rouge"), "bol rouge");
        assert_eq!(normalize_name("Paris_et_Lyon"), "Paris et Lyon");
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(normalize_name("L_Homme"), "L Homme");
        assert_eq!(normalize_name("Grande_Pomme"), "Grande Pomme");
    }

    #[test]
    fn test_aujourd_hui() {
        assert_eq!(normalize_name("aujourd_hui"), "aujourd'hui");
        assert_eq!(normalize_name("c_est_aujourd hui"), "c'est aujourd'hui");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Foo_Bar",
            "est_a__b",
            "a_l_homme",
            " a l_homme",
            "l  homme",
            "qu_l_x",
            "d_l_x",
            "aujourd_hui",
            "\test_grand",
            "a_",
            "est",
            "",
            "   ",
            "jusqu_au_bout",
            "C_est_la_vie",
        ];
        for input in inputs {
            let once = normalize_name(input);
            assert_eq!(normalize_name(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_normalize_type() {
        assert_eq!(normalize_type("Living_Thing "), "living thing");
        assert_eq!(normalize_type("PERSON"), "person");
    }

    #[test]
    fn test_dedup_types_collapses_casing() {
        let deduped = dedup_types("Person/person/PERSON");
        assert_eq!(deduped, "PERSON");
        assert_eq!(deduped.split('/').count(), 1);
    }

    #[test]
    fn test_dedup_types_keeps_longest_and_sorts() {
        assert_eq!(dedup_types("Living_Thing/living thing/Fruit"), "Fruit/Living_Thing");
        assert_eq!(dedup_types("fruit / Animal /"), "Animal/fruit");
        assert_eq!(dedup_types(""), "");
    }
}
