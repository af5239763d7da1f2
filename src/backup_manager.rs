/*!
 * Backup and revert around each synchronizer run.
 *
 * Before a subtitle is synced in place it is copied to
 * `<subtitle>.<backup suffix>`. That copy doubles as a marker: while it exists
 * the subtitle counts as processed and later runs leave it alone.
 *
 * A run that fails, or that exits successfully without changing a byte, is
 * reverted: the backup is moved back over the subtitle, which restores the
 * original content and clears the marker so the next run retries.
 */

use log::{error, info, warn};
use std::fmt;
use std::path::Path;

use crate::errors::FileError;
use crate::file_utils::FileManager;
use crate::matcher::Matcher;
use crate::scanner::DirectoryScan;
use crate::sync_runner::Synchronizer;

/// Why a subtitle was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No configured subtitle suffix matched
    NoSuffixMatch,
    /// A backup marker already exists
    AlreadyProcessed,
    /// No video with the same base name in the directory
    NoVideo,
}

/// Why a subtitle was restored from its backup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertReason {
    /// The synchronizer failed (or lost the output file)
    SyncFailed,
    /// The synchronizer succeeded but the content is byte-identical
    Unchanged,
}

/// Result of processing a single subtitle file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// New content written; the backup stays as the processed marker
    Synced,
    Skipped(SkipReason),
    Reverted(RevertReason),
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synced => write!(f, "synced"),
            Self::Skipped(SkipReason::NoSuffixMatch) => write!(f, "skipped (not matched)"),
            Self::Skipped(SkipReason::AlreadyProcessed) => write!(f, "skipped (processed)"),
            Self::Skipped(SkipReason::NoVideo) => write!(f, "skipped (no related video)"),
            Self::Reverted(RevertReason::SyncFailed) => write!(f, "reverted (sync failed)"),
            Self::Reverted(RevertReason::Unchanged) => write!(f, "reverted (file not changed)"),
        }
    }
}

/// Wraps synchronizer runs with backup creation and revert
pub struct BackupManager<'a> {
    matcher: &'a Matcher,
    synchronizer: &'a dyn Synchronizer,
}

impl<'a> BackupManager<'a> {
    pub fn new(matcher: &'a Matcher, synchronizer: &'a dyn Synchronizer) -> Self {
        Self {
            matcher,
            synchronizer,
        }
    }

    /// Process one subtitle from `scan`.
    ///
    /// Synchronizer failures are handled here and reported through the
    /// returned outcome. Only filesystem errors are returned as `Err`.
    pub fn process(&self, subtitle: &Path, scan: &DirectoryScan) -> Result<SyncOutcome, FileError> {
        let Some(matched) = self.matcher.split_subtitle(subtitle) else {
            info!("{} not matched, skip it", subtitle.display());
            return Ok(SyncOutcome::Skipped(SkipReason::NoSuffixMatch));
        };

        let backup = self.matcher.backup_path(subtitle);
        if scan.backups.contains(&backup) || backup.exists() {
            info!("{} processed, skip it", subtitle.display());
            return Ok(SyncOutcome::Skipped(SkipReason::AlreadyProcessed));
        }

        let Some(video) = self.matcher.find_video(&matched.base, &scan.videos) else {
            info!("{} no related video, skip it", subtitle.display());
            return Ok(SyncOutcome::Skipped(SkipReason::NoVideo));
        };

        FileManager::copy_file(subtitle, &backup)?;

        if let Err(e) = self.synchronizer.sync(video, subtitle, subtitle) {
            error!("{}", e);
            info!(
                "revert {} to {} because sync subtitle failed",
                backup.display(),
                subtitle.display()
            );
            self.revert(subtitle, &backup)?;
            return Ok(SyncOutcome::Reverted(RevertReason::SyncFailed));
        }

        if !FileManager::file_exists(subtitle) {
            warn!(
                "revert {} to {} because sync left no output",
                backup.display(),
                subtitle.display()
            );
            self.revert(subtitle, &backup)?;
            return Ok(SyncOutcome::Reverted(RevertReason::SyncFailed));
        }

        if FileManager::same_content(subtitle, &backup)? {
            info!(
                "revert {} to {} because file not change",
                backup.display(),
                subtitle.display()
            );
            self.revert(subtitle, &backup)?;
            return Ok(SyncOutcome::Reverted(RevertReason::Unchanged));
        }

        info!("{} synced with {}", subtitle.display(), video.display());
        Ok(SyncOutcome::Synced)
    }

    /// Move `backup` back over `subtitle`.
    ///
    /// Returns `false` without touching anything when there is no backup.
    pub fn revert(&self, subtitle: &Path, backup: &Path) -> Result<bool, FileError> {
        if !FileManager::file_exists(backup) {
            return Ok(false);
        }
        if FileManager::file_exists(subtitle) {
            FileManager::remove_file(subtitle)?;
        }
        FileManager::move_file(backup, subtitle)?;
        Ok(true)
    }
}
