/*!
 * # sub-sync - Subtitle synchronization against sibling videos
 *
 * A Rust library and CLI that walks directory trees, pairs subtitle files with
 * the video they belong to, and realigns them with an external synchronizer
 * (ffsubsync's `ffs` by default).
 *
 * ## Features
 *
 * - Configurable, ordered subtitle and video suffix lists (`zh.ass`, `mkv`, ...)
 * - Backup before every sync, kept afterwards as a "processed" marker
 * - Automatic revert when the synchronizer fails or changes nothing
 * - Per-file error containment: one bad file never stops the run
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `scanner`: Per-directory collection of subtitle, video and backup files
 * - `matcher`: Suffix splitting and subtitle/video pairing
 * - `sync_runner`: The external synchronizer and its test doubles
 * - `backup_manager`: Backup, sync, and revert for a single subtitle
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod backup_manager;
pub mod errors;
pub mod file_utils;
pub mod matcher;
pub mod scanner;
pub mod sync_runner;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use backup_manager::{BackupManager, RevertReason, SkipReason, SyncOutcome};
pub use errors::{AppError, FileError, ScanError, SyncError};
pub use matcher::{Matcher, SubtitleMatch};
pub use scanner::{DirectoryScan, Scanner};
pub use sync_runner::{CommandSynchronizer, Synchronizer};
