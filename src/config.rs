//! Configuration for a generator run. Settings live in an optional
//! `pagemill.yaml` in the project directory; every field carries a default,
//! so the file can be omitted entirely (or specify only the fields it wants
//! to override).

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct Capacity(usize);
impl Default for Capacity {
    fn default() -> Self {
        Capacity(500)
    }
}

#[derive(Deserialize)]
struct BatchSize(usize);
impl Default for BatchSize {
    fn default() -> Self {
        BatchSize(50)
    }
}

/// The on-disk shape of `pagemill.yaml`. Paths are interpreted relative to
/// the project directory.
#[derive(Deserialize)]
#[serde(default)]
struct Project {
    template_file: PathBuf,
    primary_keywords: Vec<PathBuf>,
    secondary_keywords: Vec<PathBuf>,
    output_root: PathBuf,
    folder_bases: Vec<String>,
    max_files_per_folder: Capacity,
    batch_size: BatchSize,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            template_file: PathBuf::from("test.html"),
            primary_keywords: candidate_set("primary"),
            secondary_keywords: candidate_set("secondary"),
            output_root: PathBuf::from("."),
            folder_bases: ["video", "new", "raw", "viral", "clips", "watch", "hot"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_files_per_folder: Capacity::default(),
            batch_size: BatchSize::default(),
        }
    }
}

/// The candidate keyword file names for one language, in load order.
fn candidate_set(language: &str) -> Vec<PathBuf> {
    ["full_keywords", "triplets", "keywords"]
        .iter()
        .map(|prefix| PathBuf::from(format!("{}_{}.txt", prefix, language)))
        .collect()
}

/// The resolved run configuration.
pub struct Config {
    /// The page template file. A missing or unreadable file falls back to
    /// the built-in minimal template at load time.
    pub template_file: PathBuf,

    /// Candidate keyword files for the primary language; every one that
    /// exists contributes to the primary pool.
    pub primary_keywords: Vec<PathBuf>,

    /// Candidate keyword files for the secondary language.
    pub secondary_keywords: Vec<PathBuf>,

    /// The directory under which the two-level output tree is rooted.
    pub output_root: PathBuf,

    /// The ordered base folder names searched by the directory selector.
    pub folder_bases: Vec<String>,

    /// The `.html` file count at which a target directory is considered
    /// full.
    pub max_files_per_folder: usize,

    /// The number of pages generated by one run, absent a CLI override.
    pub batch_size: usize,
}

impl Config {
    pub const PROJECT_FILE: &'static str = "pagemill.yaml";

    /// Loads configuration from [`Config::PROJECT_FILE`] under `dir`,
    /// falling back to the built-in defaults when the file does not exist.
    pub fn load(dir: &Path) -> Result<Config> {
        let path = dir.join(Self::PROJECT_FILE);
        let project = if path.exists() {
            serde_yaml::from_reader(crate::util::open(&path, "project")?)?
        } else {
            Project::default()
        };
        Ok(Config::from_project(project, dir))
    }

    /// Replaces the configured template with `template`, resolved against
    /// the project directory `dir` (an absolute path is taken as-is).
    /// Applied for the CLI override before the template is loaded.
    pub fn override_template(&mut self, dir: &Path, template: &Path) {
        self.template_file = dir.join(template);
    }

    fn from_project(project: Project, dir: &Path) -> Config {
        let join = |relpath: PathBuf| dir.join(relpath);
        Config {
            template_file: join(project.template_file),
            primary_keywords: project.primary_keywords.into_iter().map(join).collect(),
            secondary_keywords: project.secondary_keywords.into_iter().map(join).collect(),
            output_root: join(project.output_root),
            folder_bases: project.folder_bases,
            max_files_per_folder: project.max_files_per_folder.0,
            batch_size: project.batch_size.0,
        }
    }
}

impl Default for Config {
    /// The built-in defaults, rooted at the working directory.
    fn default() -> Config {
        Config::from_project(Project::default(), Path::new("."))
    }
}
