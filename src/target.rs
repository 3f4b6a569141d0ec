//! Selecting the target directory for a batch: a two-level `base/sub` path
//! whose population is capped. The newest subdirectory of the first base
//! folder that has one is reused while it holds fewer than the capacity
//! limit of `.html` files; otherwise a fresh randomly-labelled
//! subdirectory is created under a randomly chosen base.
//!
//! Only the single most-recently-created subdirectory of each base is ever
//! inspected. Earlier, under-capacity subdirectories are never revisited; a
//! full newest bin falls straight through to the next base and ultimately
//! to allocation. This keeps selection cheap (no full inventory scan) at
//! the cost of occasionally stranding head-room in older bins.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const HTML_EXTENSION: &str = ".html";
const LABEL_LEN: usize = 3;

/// Returns the directory the next batch should be written into, creating a
/// new `base/<label>` subdirectory when no existing bin is usable. `bases`
/// is searched in order; allocation picks a base at random and a random
/// 3-letter lowercase label.
pub fn select_target_directory<R: Rng>(
    rng: &mut R,
    root: &Path,
    bases: &[String],
    capacity: usize,
) -> io::Result<PathBuf> {
    for base in bases {
        let base_path = root.join(base);
        if !base_path.is_dir() {
            continue;
        }
        if let Some(latest) = newest_subdirectory(&base_path)? {
            if html_file_count(&latest)? < capacity {
                return Ok(latest);
            }
        }
    }

    let base = bases.choose(rng).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "no base folder names configured")
    })?;
    let label: String = (0..LABEL_LEN)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect();
    let path = root.join(base).join(label);
    fs::create_dir_all(&path)?;
    Ok(path)
}

/// Counts the entries of `dir` whose names end in `.html`.
pub fn html_file_count(dir: &Path) -> io::Result<usize> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        if entry?.file_name().to_string_lossy().ends_with(HTML_EXTENSION) {
            count += 1;
        }
    }
    Ok(count)
}

fn newest_subdirectory(base: &Path) -> io::Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in fs::read_dir(base)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let created = creation_time(&entry.metadata()?);
        match &newest {
            Some((time, _)) if *time >= created => {}
            _ => newest = Some((created, entry.path())),
        }
    }
    Ok(newest.map(|(_, path)| path))
}

// Birth time is not available on every filesystem; fall back to mtime,
// then to the epoch.
fn creation_time(metadata: &fs::Metadata) -> SystemTime {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;
    use std::thread;
    use std::time::Duration;

    fn bases(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn fill(dir: &Path, count: usize) {
        for i in 0..count {
            fs::write(dir.join(format!("page-{}.html", i)), "x").unwrap();
        }
    }

    #[test]
    fn test_reuses_newest_directory_below_capacity() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        let sub = root.path().join("video").join("abc");
        fs::create_dir_all(&sub)?;
        fill(&sub, 3);

        let mut rng = StdRng::seed_from_u64(1);
        let target =
            select_target_directory(&mut rng, root.path(), &bases(&["video"]), 500)?;
        assert_eq!(target, sub);
        Ok(())
    }

    #[test]
    fn test_full_directory_triggers_allocation() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        let sub = root.path().join("video").join("abc");
        fs::create_dir_all(&sub)?;
        fill(&sub, 5);

        let mut rng = StdRng::seed_from_u64(1);
        let target = select_target_directory(&mut rng, root.path(), &bases(&["video"]), 5)?;
        assert_ne!(target, sub);
        assert!(target.is_dir());
        assert_eq!(html_file_count(&target)?, 0);

        let label = target.file_name().unwrap().to_string_lossy().into_owned();
        assert!(Regex::new(r"^[a-z]{3}$").unwrap().is_match(&label));
        Ok(())
    }

    #[test]
    fn test_allocates_when_no_base_exists() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        let names = bases(&["video", "new"]);
        let mut rng = StdRng::seed_from_u64(9);
        let target = select_target_directory(&mut rng, root.path(), &names, 500)?;
        assert!(target.is_dir());
        let base = target
            .parent()
            .unwrap()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert!(names.contains(&base));
        Ok(())
    }

    #[test]
    fn test_only_newest_subdirectory_is_checked() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        let older = root.path().join("video").join("aaa");
        fs::create_dir_all(&older)?;
        // ensure distinguishable creation times
        thread::sleep(Duration::from_millis(20));
        let newer = root.path().join("video").join("bbb");
        fs::create_dir_all(&newer)?;
        fill(&newer, 5);

        // the older bin has room, but only the newest one is inspected
        let mut rng = StdRng::seed_from_u64(1);
        let target = select_target_directory(&mut rng, root.path(), &bases(&["video"]), 5)?;
        assert_ne!(target, older);
        assert_ne!(target, newer);
        Ok(())
    }

    #[test]
    fn test_html_file_count_ignores_other_extensions() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        fs::write(root.path().join("a.html"), "x")?;
        fs::write(root.path().join("b.html"), "x")?;
        fs::write(root.path().join("c.txt"), "x")?;
        fs::create_dir(root.path().join("d"))?;
        assert_eq!(html_file_count(root.path())?, 2);
        Ok(())
    }
}
