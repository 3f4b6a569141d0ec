//! Assembling [`PageRecord`]s, the ephemeral unit of one batch run. Each
//! record carries an emoji-wrapped generated title, the slug-derived output
//! filename, description and keyword strings, a language, and a timestamp
//! within the last hour of the batch's capture instant.

use crate::keywords::{Language, Pools};
use crate::slug;
use crate::text::build_text;
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// The emoji set used to wrap display titles; one is drawn independently
/// for each side.
const EMOJIS: &[&str] = &[
    "🔥", "🎥", "🔞", "😱", "✅", "🌟", "📺", "🎬", "✨", "💎", "⚡",
];

/// The title length buckets (word counts). A generated title may run up to
/// two words over its chosen bucket.
const TITLE_LENGTHS: &[usize] = &[5, 7, 9, 11];

/// One generated page. Construction is the only randomized step; rendering
/// a record is a pure function of its fields.
pub struct PageRecord {
    /// The emoji-wrapped generated title.
    pub display_title: String,

    /// The output filename, derived from the raw title via [`crate::slug`].
    pub filename: String,

    /// A longer generated phrase, 120 to 350 words.
    pub description: String,

    /// A short generated phrase, 3 to 8 words.
    pub keywords: String,

    pub language: Language,

    /// A point within the hour preceding the batch's capture instant.
    pub timestamp: DateTime<Utc>,
}

impl PageRecord {
    /// Generates one record in `language` from the loaded pools.
    /// `base_time` is the batch's capture instant; the record's timestamp
    /// is an independent uniform offset of up to an hour before it.
    pub fn generate<R: Rng>(
        rng: &mut R,
        language: Language,
        pools: &Pools,
        base_time: DateTime<Utc>,
    ) -> PageRecord {
        let pool = pools.phrases(language);
        let timestamp = base_time
            - Duration::seconds(rng.gen_range(0..=3599))
            - Duration::microseconds(rng.gen_range(0..=999_999));

        let title_length = TITLE_LENGTHS[rng.gen_range(0..TITLE_LENGTHS.len())];
        let raw_title = build_text(rng, title_length, title_length + 2, pool);
        let display_title = format!(
            "{} {} {}",
            EMOJIS[rng.gen_range(0..EMOJIS.len())],
            raw_title,
            EMOJIS[rng.gen_range(0..EMOJIS.len())]
        );

        PageRecord {
            filename: slug::filename(&raw_title),
            display_title,
            description: build_text(rng, 120, 350, pool),
            keywords: build_text(rng, 3, 8, pool),
            language,
            timestamp,
        }
    }

    /// The ISO-8601-style encoding with an explicit UTC offset.
    pub fn date_iso(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
    }

    /// The space-separated SQL-style encoding.
    pub fn date_sql(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Builds the per-record language assignments for a batch: half primary
/// (rounded down), the remainder secondary, shuffled so language alternates
/// unpredictably across the batch.
pub fn language_assignments<R: Rng>(rng: &mut R, count: usize) -> Vec<Language> {
    let half = count / 2;
    let mut assignments = Vec::with_capacity(count);
    assignments.resize(half, Language::Primary);
    assignments.resize(count, Language::Secondary);
    assignments.shuffle(rng);
    assignments
}
