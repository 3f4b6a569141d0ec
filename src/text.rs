//! The text assembler: builds strings of a random target word count by
//! sampling whole keyword phrases with replacement and truncating to size.

use rand::seq::SliceRandom;
use rand::Rng;

/// The pool substituted when a language has no loaded keyword phrases.
const FALLBACK_POOL: &[&str] = &["Keyword", "Trending", "Video"];

/// Builds a string of between `min_words` and `max_words` (inclusive)
/// whitespace-separated words; the target count is drawn uniformly from
/// that range. Whole phrases are sampled from `pool` with replacement and
/// split into words, which are appended until the target is reached or
/// exceeded and then truncated to exactly the target. A pure function of
/// the pool and the random source.
pub fn build_text<R: Rng>(
    rng: &mut R,
    min_words: usize,
    max_words: usize,
    pool: &[String],
) -> String {
    let target = rng.gen_range(min_words..=max_words);
    let mut words: Vec<&str> = Vec::with_capacity(target);
    while words.len() < target {
        let phrase = match pool.choose(rng) {
            Some(phrase) => phrase.as_str(),
            None => FALLBACK_POOL[rng.gen_range(0..FALLBACK_POOL.len())],
        };
        words.extend(phrase.split_whitespace());
    }
    words.truncate(target);
    words.join(" ")
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(phrases: &[&str]) -> Vec<String> {
        phrases.iter().map(|p| p.to_string()).collect()
    }

    fn word_count(text: &str) -> usize {
        text.split_whitespace().count()
    }

    #[test]
    fn test_word_count_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = pool(&["one two three", "four", "five six seven eight nine"]);
        for _ in 0..200 {
            let count = word_count(&build_text(&mut rng, 3, 8, &pool));
            assert!((3..=8).contains(&count), "got {} words", count);
        }
    }

    #[test]
    fn test_truncates_to_exact_target() {
        let mut rng = StdRng::seed_from_u64(0);
        // every sampled phrase overshoots any target in [2, 4]
        let pool = pool(&["a b c d e f g h i j"]);
        for _ in 0..50 {
            let count = word_count(&build_text(&mut rng, 2, 4, &pool));
            assert!((2..=4).contains(&count), "got {} words", count);
        }
    }

    #[test]
    fn test_empty_pool_falls_back() {
        let mut rng = StdRng::seed_from_u64(3);
        let text = build_text(&mut rng, 5, 5, &[]);
        assert_eq!(word_count(&text), 5);
        for word in text.split_whitespace() {
            assert!(
                FALLBACK_POOL.contains(&word),
                "unexpected fallback word {}",
                word
            );
        }
    }

    #[test]
    fn test_deterministic_for_a_seed() {
        let pool = pool(&["lorem ipsum dolor", "sit amet"]);
        let first = build_text(&mut StdRng::seed_from_u64(42), 10, 20, &pool);
        let second = build_text(&mut StdRng::seed_from_u64(42), 10, 20, &pool);
        assert_eq!(first, second);
    }
}
