/*!
 * Suffix matching between subtitle, video and backup files.
 *
 * A subtitle such as `movie.zh.srt` is split into its base `movie` and the
 * recognized suffix `zh.srt`; the related video is then `<base>.<video suffix>`
 * for the first configured video suffix present in the same directory.
 * All suffix comparisons are case-insensitive over the trailing `.suffix`.
 */

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::app_config::Config;

/// A subtitle path split at its recognized suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleMatch {
    /// Full path with `.<suffix>` removed
    pub base: PathBuf,
    /// Suffix as configured (not as spelled on disk)
    pub suffix: String,
}

/// Splits `name` at a trailing `.<suffix>`, ignoring ASCII case.
/// Returns the part before the dot. Names need not be valid UTF-8.
fn strip_suffix_ignore_case<'a>(name: &'a OsStr, suffix: &str) -> Option<&'a OsStr> {
    let bytes = name.as_encoded_bytes();
    let split = bytes.len().checked_sub(suffix.len() + 1)?;
    let (head, tail) = bytes.split_at(split);
    if tail[0] != b'.' || !tail[1..].eq_ignore_ascii_case(suffix.as_bytes()) {
        return None;
    }
    // SAFETY: `head` comes from `name` and ends right before an ASCII '.',
    // which is a valid boundary for encoded OS string bytes.
    Some(unsafe { OsStr::from_encoded_bytes_unchecked(head) })
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    strip_suffix_ignore_case(path.as_os_str(), suffix).is_some()
}

/// Matches files against the configured suffix lists
#[derive(Debug, Clone)]
pub struct Matcher {
    subtitle_suffixes: Vec<String>,
    video_suffixes: Vec<String>,
    backup_suffix: String,
}

impl Matcher {
    pub fn new(config: &Config) -> Self {
        Self {
            subtitle_suffixes: config.subtitle_suffixes.clone(),
            video_suffixes: config.video_suffixes.clone(),
            backup_suffix: config.backup_suffix.clone(),
        }
    }

    /// Split a subtitle path into base name and the first matching suffix
    pub fn split_subtitle(&self, path: &Path) -> Option<SubtitleMatch> {
        self.subtitle_suffixes.iter().find_map(|suffix| {
            strip_suffix_ignore_case(path.as_os_str(), suffix).map(|base| SubtitleMatch {
                base: PathBuf::from(base),
                suffix: suffix.clone(),
            })
        })
    }

    /// Find `<base>.<suffix>` among `videos`, trying suffixes in order.
    /// For each suffix an exact spelling wins over a case-insensitive one.
    pub fn find_video<'a>(&self, base: &Path, videos: &'a BTreeSet<PathBuf>) -> Option<&'a PathBuf> {
        self.video_suffixes.iter().find_map(|suffix| {
            let mut exact = OsString::from(base.as_os_str());
            exact.push(".");
            exact.push(suffix);

            videos.get(Path::new(&exact)).or_else(|| {
                videos.iter().find(|video| {
                    strip_suffix_ignore_case(video.as_os_str(), suffix)
                        .is_some_and(|video_base| video_base == base.as_os_str())
                })
            })
        })
    }

    pub fn is_subtitle(&self, path: &Path) -> bool {
        self.subtitle_suffixes.iter().any(|suffix| has_suffix(path, suffix))
    }

    pub fn is_video(&self, path: &Path) -> bool {
        self.video_suffixes.iter().any(|suffix| has_suffix(path, suffix))
    }

    pub fn is_backup(&self, path: &Path) -> bool {
        has_suffix(path, &self.backup_suffix)
    }

    /// The marker path for a subtitle: `<subtitle>.<backup suffix>`
    pub fn backup_path(&self, subtitle: &Path) -> PathBuf {
        let mut name = subtitle.as_os_str().to_os_string();
        name.push(".");
        name.push(&self.backup_suffix);
        PathBuf::from(name)
    }
}
