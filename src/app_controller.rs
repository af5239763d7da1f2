use log::{error, info};
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::backup_manager::{BackupManager, SyncOutcome};
use crate::matcher::Matcher;
use crate::scanner::Scanner;
use crate::sync_runner::{CommandSynchronizer, Synchronizer};

// @module: Application controller for subtitle synchronization

/// Counts of what happened during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Directories that contained at least one file
    pub directories: usize,
    pub synced: usize,
    pub skipped: usize,
    pub reverted: usize,
    /// Files whose attempt was aborted by a filesystem error
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Synced => self.synced += 1,
            SyncOutcome::Skipped(_) => self.skipped += 1,
            SyncOutcome::Reverted(_) => self.reverted += 1,
        }
    }
}

impl AddAssign for RunSummary {
    fn add_assign(&mut self, other: Self) {
        self.directories += other.directories;
        self.synced += other.synced;
        self.skipped += other.skipped;
        self.reverted += other.reverted;
        self.failed += other.failed;
    }
}

/// Main application controller for subtitle synchronization
pub struct Controller<S: Synchronizer = CommandSynchronizer> {
    // @field: App configuration
    config: Config,
    matcher: Matcher,
    synchronizer: S,
}

impl Controller<CommandSynchronizer> {
    // @method: Create a controller running the configured sync tool
    pub fn with_config(config: Config) -> Self {
        let synchronizer = CommandSynchronizer::new(config.sync_tool.clone());
        Self::with_synchronizer(config, synchronizer)
    }
}

impl<S: Synchronizer> Controller<S> {
    pub fn with_synchronizer(config: Config, synchronizer: S) -> Self {
        let matcher = Matcher::new(&config);
        Self {
            config,
            matcher,
            synchronizer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn synchronizer(&self) -> &S {
        &self.synchronizer
    }

    /// Process every root in order. Failures never stop later roots.
    pub fn run(&self, dirs: &[PathBuf]) -> RunSummary {
        let mut summary = RunSummary::default();
        for dir in dirs {
            summary += self.run_dir(dir);
        }

        info!(
            "Sync completed: {} synced, {} reverted, {} skipped, {} errors in {} directories",
            summary.synced, summary.reverted, summary.skipped, summary.failed, summary.directories
        );
        summary
    }

    /// Walk one root and process each subtitle found in it
    pub fn run_dir(&self, dir: &Path) -> RunSummary {
        info!("start process {}", dir.display());

        let scanner = Scanner::new(&self.matcher);
        let backups = BackupManager::new(&self.matcher, &self.synchronizer);
        let mut summary = RunSummary::default();

        for scan in scanner.scan(dir) {
            summary.directories += 1;

            for subtitle in &scan.subtitles {
                match backups.process(subtitle, &scan) {
                    Ok(outcome) => summary.record(outcome),
                    Err(e) => {
                        error!("Error processing file {}: {}", subtitle.display(), e);
                        summary.failed += 1;
                    }
                }
            }
        }

        summary
    }
}
