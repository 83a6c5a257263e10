//! Does a window's text mention an element?

use crate::model::ContextWindow;

/// True if the element name is recognizably present in the window
pub fn element_in_context(name: &str, window: &ContextWindow) -> bool {
    element_in_text(name, &window.text())
}

/// Match against precomputed lowercase window text.
///
/// Tried in order: the lowercase name as a substring, the same with
/// underscores as spaces, a strict majority of its `_`/space tokens, and for
/// `est_`/`a_` names the part after the first underscore.
pub fn element_in_text(name: &str, text: &str) -> bool {
    let name = name.to_lowercase();
    if name.trim().is_empty() {
        return false;
    }

    if text.contains(&name) {
        return true;
    }

    if text.contains(&name.replace('_', " ")) {
        return true;
    }

    let parts: Vec<&str> = name
        .split(|c: char| c == '_' || c == ' ')
        .filter(|p| !p.is_empty())
        .collect();
    if !parts.is_empty() {
        let matched = parts.iter().filter(|p| text.contains(*p)).count();
        if matched * 2 > parts.len() {
            return true;
        }
    }

    if name.contains("est_") || name.contains("a_") {
        if let Some((_, rest)) = name.split_once('_') {
            if !rest.is_empty() && text.contains(rest) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(before: &[&str], element: &str, after: &[&str]) -> ContextWindow {
        ContextWindow::new(1, "f", element)
            .with_before(before.iter().copied())
            .with_after(after.iter().copied())
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let w = window(&["une"], "Pomme", &["rouge"]);
        assert!(element_in_context("POMME", &w));
        assert!(element_in_context("pomme rouge", &w));
    }

    #[test]
    fn test_underscore_name_matches_spaced_text() {
        let w = window(&["la"], "grande", &["pomme", "verte"]);
        assert!(element_in_context("grande_pomme", &w));
    }

    #[test]
    fn test_majority_of_tokens() {
        let w = window(&["le"], "chat", &["noir", "dort"]);
        // 2 of 3 tokens present
        assert!(element_in_text("chat_noir_blanc", &w.text()));
        // 1 of 2 is not a strict majority
        assert!(!element_in_text("chien_noir", &w.text()));
    }

    #[test]
    fn test_verb_form_remainder() {
        // 1 of 2 tokens, but the remainder after "est_" is present
        assert!(element_in_text("est_grand", "il grandit vite"));
        assert!(!element_in_text("tres_grand", "il grandit vite"));
    }

    #[test]
    fn test_empty_name_never_matches() {
        let w = window(&["a"], "b", &["c"]);
        assert!(!element_in_context("", &w));
        assert!(!element_in_context("  ", &w));
    }
}
