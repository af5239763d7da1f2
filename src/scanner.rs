/*!
 * Directory scanning.
 *
 * Walks a root directory (following symbolic links) and yields, one directory
 * at a time, the subtitle, video and backup files found directly inside it.
 * Unreadable entries are logged and skipped so one bad subtree never stops
 * the rest of the walk.
 */

use log::{debug, error};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::ScanError;
use crate::matcher::Matcher;

/// Files of interest found directly inside one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryScan {
    pub dir: PathBuf,
    pub subtitles: BTreeSet<PathBuf>,
    pub videos: BTreeSet<PathBuf>,
    pub backups: BTreeSet<PathBuf>,
}

impl DirectoryScan {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    /// Sort `path` into the sets it belongs to
    pub fn classify(&mut self, matcher: &Matcher, path: PathBuf) {
        if matcher.is_video(&path) {
            self.videos.insert(path.clone());
        }
        if matcher.is_backup(&path) {
            self.backups.insert(path.clone());
        }
        if matcher.is_subtitle(&path) {
            self.subtitles.insert(path);
        }
    }
}

/// Produces a lazy sequence of [`DirectoryScan`] for a root directory
pub struct Scanner<'m> {
    matcher: &'m Matcher,
}

impl<'m> Scanner<'m> {
    pub fn new(matcher: &'m Matcher) -> Self {
        Self { matcher }
    }

    /// Walk `root`, yielding every directory that contains at least one file.
    /// Errors are logged as they happen.
    pub fn scan(&self, root: &Path) -> impl Iterator<Item = DirectoryScan> {
        let matcher = self.matcher;

        let walker = if root.is_dir() {
            Some(WalkDir::new(root).follow_links(true).into_iter())
        } else {
            log_scan_error(&ScanError::NotADirectory(root.to_path_buf()));
            None
        };

        walker
            .into_iter()
            .flatten()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_dir() => Some(entry.into_path()),
                Ok(_) => None,
                Err(e) => {
                    log_scan_error(&ScanError::from(e));
                    None
                }
            })
            .filter_map(move |dir| scan_directory(matcher, &dir))
    }
}

/// List the files directly inside `dir`. Returns `None` when the directory
/// has no files. Entry errors here are also seen by the outer walk, which
/// reports them.
fn scan_directory(matcher: &Matcher, dir: &Path) -> Option<DirectoryScan> {
    let mut scan = DirectoryScan::new(dir);
    let mut file_count = 0usize;

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
    {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => {}
            Ok(entry) => {
                file_count += 1;
                scan.classify(matcher, entry.into_path());
            }
            Err(e) => debug!("Skipping unreadable entry in {:?}: {}", dir, e),
        }
    }

    if file_count == 0 {
        return None;
    }

    debug!(
        "Scanned {:?}: {} subtitle(s), {} video(s), {} backup(s)",
        scan.dir,
        scan.subtitles.len(),
        scan.videos.len(),
        scan.backups.len()
    );
    Some(scan)
}

fn log_scan_error(e: &ScanError) {
    error!("{}", e);
}
