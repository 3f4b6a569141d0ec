//! The batch assembler: resolves the target directory, assembles a batch
//! of cross-linked [`PageRecord`]s, renders each through the template, and
//! writes the results to disk. Per-file write failures do not abort the
//! batch; they are captured as structured outcomes in the [`BatchReport`]
//! so callers can observe partial failures.

use crate::config::Config;
use crate::keywords::Pools;
use crate::record::{language_assignments, PageRecord};
use crate::render::Renderer;
use crate::target::{html_file_count, select_target_directory};
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Bounds on the internal links sampled per page (the upper end is also
/// capped by the candidate pool size).
const LINKS_MIN: usize = 3;
const LINKS_MAX: usize = 6;

/// One run's generator: the run configuration, the loaded keyword pools,
/// and the template renderer.
pub struct Generator {
    config: Config,
    pools: Pools,
    renderer: Renderer,
}

impl Generator {
    /// Loads the keyword pools and template named by `config`. Missing
    /// keyword files are skipped and a missing template falls back to the
    /// built-in one; read errors on existing keyword files propagate.
    pub fn new(config: Config) -> anyhow::Result<Generator> {
        let pools = Pools::load(&config.primary_keywords, &config.secondary_keywords)?;
        let renderer = Renderer::load(&config.template_file);
        Ok(Generator {
            config,
            pools,
            renderer,
        })
    }

    /// Runs one batch of `count` pages: selects the target directory,
    /// assembles and cross-links the records, renders them, and writes
    /// each to disk with single-retry collision handling.
    pub fn run_batch<R: Rng>(&self, rng: &mut R, count: usize) -> Result<BatchReport> {
        let target = select_target_directory(
            rng,
            &self.config.output_root,
            &self.config.folder_bases,
            self.config.max_files_per_folder,
        )
        .map_err(Error::TargetDirectory)?;
        let preexisting = html_file_count(&target)?;
        log::info!(
            "Target directory: {} (contains {} files)",
            target.display(),
            preexisting
        );

        let base_time = Utc::now();
        let records: Vec<PageRecord> = language_assignments(rng, count)
            .into_iter()
            .map(|language| PageRecord::generate(rng, language, &self.pools, base_time))
            .collect();

        let mut outcomes = Vec::with_capacity(count);
        for (i, record) in records.iter().enumerate() {
            let links = choose_links(rng, &records, i);
            let content = self.renderer.render(record, &links);
            let outcome = write_page(rng, &target, &record.filename, &content);
            if let Err(err) = &outcome.result {
                log::warn!("Writing `{}`: {}", outcome.path.display(), err);
            }
            outcomes.push(outcome);
        }

        let report = BatchReport {
            target_directory: target,
            preexisting,
            outcomes,
        };
        log::info!(
            "Created {} of {} files in {}",
            report.written(),
            count,
            report.target_directory.display()
        );
        Ok(report)
    }
}

/// Picks the internal links for the record at `index`: the other records
/// of the same language when at least three exist, otherwise all other
/// records of the batch; between three and six of them (capped by the pool
/// size), sampled without replacement.
fn choose_links<'a, R: Rng>(
    rng: &mut R,
    records: &'a [PageRecord],
    index: usize,
) -> Vec<&'a PageRecord> {
    let others: Vec<&PageRecord> = records
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, record)| record)
        .collect();
    let same_language: Vec<&PageRecord> = others
        .iter()
        .copied()
        .filter(|record| record.language == records[index].language)
        .collect();
    let pool = if same_language.len() >= LINKS_MIN {
        same_language
    } else {
        others
    };
    let amount = rng.gen_range(LINKS_MIN..=LINKS_MAX).min(pool.len());
    pool.choose_multiple(rng, amount).copied().collect()
}

/// Writes one rendered page into `dir`. A pre-existing path is deconflicted
/// once by inserting a random lowercase letter before the extension; a
/// second collision is not retried and overwrites.
fn write_page<R: Rng>(rng: &mut R, dir: &Path, filename: &str, content: &str) -> FileOutcome {
    let mut path = dir.join(filename);
    if path.exists() {
        path = dir.join(deconflict(rng, filename));
    }
    let result = fs::write(&path, content);
    FileOutcome { path, result }
}

/// Rewrites a colliding filename by inserting `-<letter>` before `.html`.
fn deconflict<R: Rng>(rng: &mut R, filename: &str) -> String {
    let letter = rng.gen_range(b'a'..=b'z') as char;
    match filename.strip_suffix(".html") {
        Some(stem) => format!("{}-{}.html", stem, letter),
        None => format!("{}-{}", filename, letter),
    }
}

/// The per-file and aggregate results of one batch run.
pub struct BatchReport {
    /// The directory every page of the batch was written into.
    pub target_directory: PathBuf,

    /// How many `.html` files the directory held before the batch.
    pub preexisting: usize,

    /// One outcome per attempted page, in batch order.
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// The number of pages written successfully.
    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// The outcomes that failed, with their reasons.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// The result of writing one page.
pub struct FileOutcome {
    /// The path the write was attempted at (after any collision rename).
    pub path: PathBuf,

    /// The write result; failures carry the underlying I/O reason.
    pub result: io::Result<()>,
}

/// The result of a fallible batch operation.
type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a batch run.
#[derive(Debug)]
pub enum Error {
    /// Returned for failures selecting or creating the target directory.
    TargetDirectory(io::Error),

    /// Returned for other I/O errors during the run.
    Io(io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TargetDirectory(err) => {
                write!(f, "Selecting target directory: {}", err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::TargetDirectory(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use
    /// the `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
