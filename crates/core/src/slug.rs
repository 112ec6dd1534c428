//! Recipe name to slug derivation.
//!
//! A slug is the lower-case, hyphen-delimited identifier used both as a recipe's primary key
//! and as the stem of its storage filename:
//!
//! ```
//! use recipes_core::slugify;
//!
//! assert_eq!(slugify("Pasta Carbonara"), "pasta-carbonara");
//! assert_eq!(slugify("  A!! B__C  "), "a-b-c");
//! assert_eq!(slugify("???"), "");
//! ```

use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("static slug pattern is valid"));

/// Derives the URL-safe slug for a recipe name.
///
/// The name is lower-cased and trimmed, every run of characters outside `[a-z0-9]` becomes a
/// single `-`, and leading/trailing `-` are removed. Characters that lower-case to something
/// outside `a-z0-9` (including all non-ASCII letters) count as separators.
///
/// Never fails; a name with no ASCII alphanumerics yields the empty string.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
