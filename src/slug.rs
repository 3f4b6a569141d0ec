//! Title normalization. Output filenames are derived from the raw
//! (non-emoji) title by slugifying it: lowercase, strip anything outside
//! the word/whitespace/hyphen character classes, collapse runs of
//! whitespace and hyphens into single hyphens, trim hyphens from the ends,
//! and truncate to 80 characters.

use once_cell::sync::Lazy;
use regex::Regex;

const HTML_EXTENSION: &str = ".html";
const MAX_SLUG_LEN: usize = 80;

// The character classes are Unicode-aware: word characters of any script
// survive normalization.
static STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("strip pattern"));
static COLLAPSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").expect("collapse pattern"));

/// Normalizes a raw title into a URL-safe slug.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let cleaned = STRIP.replace_all(&lowered, "");
    let hyphenated = COLLAPSE.replace_all(&cleaned, "-");
    hyphenated
        .trim_matches('-')
        .chars()
        .take(MAX_SLUG_LEN)
        .collect()
}

/// Derives the output filename for a raw title: the slug plus the `.html`
/// suffix. Deterministic; collision handling happens at write time, not
/// here.
pub fn filename(title: &str) -> String {
    format!("{}{}", slugify(title), HTML_EXTENSION)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_collapses_whitespace_and_hyphen_runs() {
        assert_eq!(slugify("one  two --  three"), "one-two-three");
    }

    #[test]
    fn test_trims_leading_and_trailing_hyphens() {
        assert_eq!(slugify("  --spaced out--  "), "spaced-out");
    }

    #[test]
    fn test_truncates_to_eighty_characters() {
        let title = "word ".repeat(40);
        let slug = slugify(&title);
        // truncation happens after trimming, so a trailing hyphen can
        // survive at exactly the length cap
        assert_eq!(slug.chars().count(), 80);
        assert!(slug.starts_with("word-word"));
    }

    #[test]
    fn test_filename_matches_invariant() {
        let pattern = Regex::new(r"^[a-z0-9-]+\.html$").unwrap();
        for title in &["Trending Video 2024!", "A (very) spicy clip", "x"] {
            let name = filename(title);
            assert!(pattern.is_match(&name), "bad filename {}", name);
        }
    }

    #[test]
    fn test_preserves_non_ascii_word_characters() {
        // `\w` is Unicode-aware, so non-Latin titles survive normalization
        assert_eq!(slugify("كلمة أخرى"), "كلمة-أخرى");
    }
}
