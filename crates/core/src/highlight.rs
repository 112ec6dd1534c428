//! Ingredient highlighting for instruction lines.
//!
//! Each instruction line is HTML-escaped once, then every ingredient name is wrapped in
//! `<strong>` in the order the ingredients appear on the recipe. Every ingredient scans the
//! output of the previous one, so overlapping names produce nested or doubled markers and
//! reordering the ingredient list changes the output.
//!
//! Escaping is maud's: `&`, `<`, `>` and `"` become entities, `'` is left as is.

use crate::recipe::Ingredient;
use maud::{html, Markup, PreEscaped};
use regex::{Regex, RegexBuilder};

const OPEN_MARKER: &str = "<strong>";
const CLOSE_MARKER: &str = "</strong>";

/// Escapes `text` and bolds every case-insensitive occurrence of each ingredient name.
///
/// Matching is literal, not word-bounded (`egg` matches inside `eggs`), and runs against the
/// escaped text. Matched substrings keep their original casing. Ingredients with an empty
/// name are skipped.
pub fn highlight_ingredients(text: &str, ingredients: &[Ingredient]) -> Markup {
    let mut marked = html! { (text) }.into_string();

    for ingredient in ingredients {
        let Some(pattern) = ingredient_pattern(&ingredient.name) else {
            continue;
        };
        marked = wrap_occurrences(&marked, &pattern);
    }

    PreEscaped(marked)
}

fn ingredient_pattern(name: &str) -> Option<Regex> {
    if name.is_empty() {
        return None;
    }

    match RegexBuilder::new(&regex::escape(name))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            // Only reachable for names exceeding the regex size limit.
            tracing::warn!("skipping highlight for ingredient {:?}: {}", name, e);
            None
        }
    }
}

fn wrap_occurrences(haystack: &str, pattern: &Regex) -> String {
    let mut result = String::with_capacity(haystack.len());
    let mut pos = 0;

    for found in pattern.find_iter(haystack) {
        result.push_str(&haystack[pos..found.start()]);
        result.push_str(OPEN_MARKER);
        result.push_str(found.as_str());
        result.push_str(CLOSE_MARKER);
        pos = found.end();
    }
    result.push_str(&haystack[pos..]);

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<Ingredient> {
        names
            .iter()
            .map(|name| Ingredient::new(*name, 1.0, ""))
            .collect()
    }

    fn highlight(text: &str, names: &[&str]) -> String {
        highlight_ingredients(text, &named(names)).into_string()
    }

    #[test]
    fn test_bolds_substring_and_separate_ingredient() {
        assert_eq!(
            highlight("Add 2 eggs and salt", &["egg", "salt"]),
            "Add 2 <strong>egg</strong>s and <strong>salt</strong>"
        );
    }

    #[test]
    fn test_preserves_original_casing() {
        assert_eq!(
            highlight("Season with SALT", &["salt"]),
            "Season with <strong>SALT</strong>"
        );
        assert_eq!(
            highlight("Salt, then more salt", &["SALT"]),
            "<strong>Salt</strong>, then more <strong>salt</strong>"
        );
    }

    #[test]
    fn test_no_occurrence_leaves_text_unchanged() {
        assert_eq!(highlight("Preheat the oven", &["butter"]), "Preheat the oven");
    }

    #[test]
    fn test_escapes_text_before_matching() {
        assert_eq!(
            highlight("Mix salt & pepper <gently>", &["pepper"]),
            "Mix salt &amp; <strong>pepper</strong> &lt;gently&gt;"
        );
    }

    #[test]
    fn test_quotes_are_escaped_and_apostrophes_kept() {
        assert_eq!(
            highlight("Say \"cheese\" & don't add baker's yeast", &["cheese", "baker's yeast"]),
            "Say &quot;<strong>cheese</strong>&quot; &amp; don't add <strong>baker's yeast</strong>"
        );
    }

    #[test]
    fn test_matches_ingredient_next_to_escaped_characters() {
        assert_eq!(
            highlight("Whisk<milk>&cream", &["milk", "cream"]),
            "Whisk&lt;<strong>milk</strong>&gt;&amp;<strong>cream</strong>"
        );
    }

    #[test]
    fn test_non_overlapping_repeated_matches() {
        assert_eq!(
            highlight("aaaa", &["aa"]),
            "<strong>aa</strong><strong>aa</strong>"
        );
    }

    #[test]
    fn test_later_ingredient_matches_inside_earlier_marker() {
        // "egg" is wrapped first, then "eggs" no longer appears contiguously.
        assert_eq!(
            highlight("Beat the eggs", &["egg", "eggs"]),
            "Beat the <strong>egg</strong>s"
        );
        // Reversed order: "eggs" wraps first, then "egg" nests inside it.
        assert_eq!(
            highlight("Beat the eggs", &["eggs", "egg"]),
            "Beat the <strong><strong>egg</strong>s</strong>"
        );
    }

    #[test]
    fn test_ingredient_named_like_marker_text_is_matched() {
        assert_eq!(
            highlight("Add the strong cheese", &["cheese", "strong"]),
            "Add the <strong>strong</strong> <<strong>strong</strong>>cheese</<strong>strong</strong>>"
        );
    }

    #[test]
    fn test_empty_ingredient_name_is_skipped() {
        assert_eq!(highlight("Stir well", &["", "stir"]), "<strong>Stir</strong> well");
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert_eq!(
            highlight("Add salt (coarse). Add salt.", &["salt (coarse)"]),
            "Add <strong>salt (coarse)</strong>. Add salt."
        );
    }

    #[test]
    fn test_multibyte_text_is_handled() {
        assert_eq!(
            highlight("Tilsett smør og SMØR", &["smør"]),
            "Tilsett <strong>smør</strong> og <strong>SMØR</strong>"
        );
    }

    #[test]
    fn test_empty_ingredient_list_only_escapes() {
        assert_eq!(highlight("1 < 2", &[]), "1 &lt; 2");
    }
}
