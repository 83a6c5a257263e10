//! Relevance scoring
//!
//! `fuzzy` is deliberately asymmetric: the substring shortcut only checks
//! whether the query occurs inside the target.

use strsim::levenshtein;

use crate::config::SearchConfig;
use crate::model::Element;

/// Similarity of `query` to `target` in `[0, 1]`, rounded to two decimals.
///
/// 1.0 when the lowercase target contains the lowercase query; otherwise the
/// normalized edit similarity, zeroed below `min_similarity`.
pub fn fuzzy(query: &str, target: &str, min_similarity: f64) -> f64 {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    if query.is_empty() {
        return 0.0;
    }
    if target.contains(&query) {
        return 1.0;
    }

    let score = similarity(&query, &target);
    if score < min_similarity {
        return 0.0;
    }
    round2(score)
}

/// `1 - distance / max_len`; two empty strings score 0
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted relevance of an element for a query.
///
/// With `name_match_floor` the score never drops below the name similarity,
/// so an exact name hit ranks 1.0 whatever the type and description say.
pub fn relevance(query: &str, element: &Element, config: &SearchConfig) -> f64 {
    let name = fuzzy(query, &element.name, config.min_similarity);
    let element_type = fuzzy(query, &element.element_type, config.min_similarity);
    let description = fuzzy(query, &element.description, config.min_similarity);

    let weighted = config.name_weight * name
        + config.type_weight * element_type
        + config.description_weight * description;

    let score = if config.name_match_floor {
        weighted.max(name)
    } else {
        weighted
    };
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f64 = 0.3;

    fn element(name: &str, element_type: &str, description: &str) -> Element {
        Element {
            name: name.into(),
            element_type: element_type.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_fuzzy_reference_values() {
        assert_eq!(fuzzy("apple", "apple", MIN), 1.0);
        assert_eq!(fuzzy("apple", "banana", MIN), 0.0);
        assert_eq!(fuzzy("apple", "appl", MIN), 0.8);
    }

    #[test]
    fn test_fuzzy_is_asymmetric() {
        assert_eq!(fuzzy("appl", "apple", MIN), 1.0);
        assert_eq!(fuzzy("apple", "appl", MIN), 0.8);
    }

    #[test]
    fn test_fuzzy_case_and_empty() {
        assert_eq!(fuzzy("APPLE", "green apple pie", MIN), 1.0);
        assert_eq!(fuzzy("", "apple", MIN), 0.0);
        assert_eq!(fuzzy("", "", MIN), 0.0);
        assert_eq!(similarity("", ""), 0.0);
    }

    #[test]
    fn test_fuzzy_rounds_to_two_decimals() {
        // distance 1 over 3 chars
        assert_eq!(fuzzy("cat", "car", MIN), 0.67);
    }

    #[test]
    fn test_relevance_weights() {
        let config = SearchConfig {
            name_match_floor: false,
            ..Default::default()
        };
        let score = relevance("fruit", &element("Pomme", "Fruit", "a fruit"), &config);
        // type 1.0 * 0.3 + description 1.0 * 0.1
        assert!((score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_relevance_name_floor() {
        let config = SearchConfig::default();
        assert_eq!(relevance("fruit", &element("Fruit", "Category", ""), &config), 1.0);
        assert_eq!(relevance("fruit", &element("Frut", "Category", ""), &config), 0.8);
    }

    #[test]
    fn test_relevance_capped() {
        let config = SearchConfig {
            name_weight: 1.0,
            type_weight: 1.0,
            ..Default::default()
        };
        assert_eq!(relevance("fruit", &element("Fruit", "Fruit", ""), &config), 1.0);
    }
}
