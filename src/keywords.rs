//! Keyword pools. Each language's pool is the concatenation of every
//! candidate keyword file that exists on disk, one phrase per line, blank
//! lines ignored. Missing files are silently skipped, so a language may end
//! up with an empty pool; the text assembler substitutes a fixed fallback
//! pool in that case.

use crate::util::open;
use anyhow::Result;
use std::io::BufRead;
use std::path::Path;

/// The two text-generation modes, analogous to two locales. Each batch is
/// split half-and-half between them before a randomized shuffle of the
/// assignment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    Primary,
    Secondary,
}

/// The in-memory keyword phrase pools, one per [`Language`].
pub struct Pools {
    primary: Vec<String>,
    secondary: Vec<String>,
}

impl Pools {
    /// Constructs pools directly from phrase lists.
    pub fn new(primary: Vec<String>, secondary: Vec<String>) -> Pools {
        Pools { primary, secondary }
    }

    /// Loads both pools from their candidate file lists. Files that do not
    /// exist are skipped; read errors on existing files propagate.
    pub fn load<P: AsRef<Path>>(primary: &[P], secondary: &[P]) -> Result<Pools> {
        let pools = Pools {
            primary: load_pool(primary)?,
            secondary: load_pool(secondary)?,
        };
        log::info!(
            "Loaded {} primary and {} secondary keyword phrases",
            pools.primary.len(),
            pools.secondary.len()
        );
        Ok(pools)
    }

    /// Returns the phrase pool for `language`. May be empty.
    pub fn phrases(&self, language: Language) -> &[String] {
        match language {
            Language::Primary => &self.primary,
            Language::Secondary => &self.secondary,
        }
    }
}

fn load_pool<P: AsRef<Path>>(candidates: &[P]) -> Result<Vec<String>> {
    let mut phrases = Vec::new();
    for candidate in candidates {
        let path = candidate.as_ref();
        if !path.exists() {
            continue;
        }
        for line in open(path, "keyword")?.lines() {
            let line = line?;
            let phrase = line.trim();
            if !phrase.is_empty() {
                phrases.push(phrase.to_owned());
            }
        }
    }
    Ok(phrases)
}
