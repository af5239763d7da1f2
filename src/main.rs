// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use sub_sync::app_config::{self, Config, LogLevel};
use sub_sync::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// sub-sync - sync subtitles by video
///
/// Scans directories for subtitles that sit next to a video with the same base
/// name and realigns them with an external synchronizer.
#[derive(Parser, Debug)]
#[command(name = "sub-sync")]
#[command(version)]
#[command(about = "sync subtitles by video")]
#[command(long_about = "sub-sync scans directories for subtitles paired with a video and realigns them.

For every `<name>.zh.srt` (or other configured suffix) next to `<name>.mkv`
(or other configured video suffix) it runs:

    ffs <name>.mkv -i <name>.zh.srt -o <name>.zh.srt

The original subtitle is first copied to `<name>.zh.srt.sub_sync_back`. If the
sync fails or changes nothing, the copy is moved back; otherwise it stays as a
marker so the file is skipped on later runs.

EXAMPLES:
    sub-sync /media/movies /media/shows        # Sync everything under two roots
    sub-sync --sub-ext en.srt /media/movies    # Also sync English .srt subtitles
    SYNC_DIRS=\"/a /b\" sub-sync                  # Roots from the environment
    sub-sync --completions bash > sub-sync.bash

ENVIRONMENT:
    SYNC_DIRS       space-separated directories, used when none are given
    SUB_EXT_LIST    space-separated subtitle suffixes added to the defaults
    VIDEO_EXT_LIST  space-separated video suffixes added to the defaults
    SUB_SYNC_TOOL   synchronizer program (default: ffs)")]
struct CommandLineOptions {
    /// Directories to scan (falls back to $SYNC_DIRS)
    #[arg(value_name = "DIRS", required_unless_present = "env_dirs")]
    dirs: Vec<PathBuf>,

    /// Space-separated directories, normally taken from $SYNC_DIRS
    #[arg(
        long = "sync-dirs",
        env = app_config::SYNC_DIRS_ENV,
        value_delimiter = ' ',
        hide = true
    )]
    env_dirs: Vec<PathBuf>,

    /// Extra subtitle suffix, e.g. "en.srt" (repeatable)
    #[arg(long = "sub-ext", value_name = "SUFFIX")]
    sub_ext: Vec<String>,

    /// Extra video suffix, e.g. "avi" (repeatable)
    #[arg(long = "video-ext", value_name = "SUFFIX")]
    video_ext: Vec<String>,

    /// Synchronizer program to run
    #[arg(long, env = app_config::SYNC_TOOL_ENV, value_name = "PROGRAM")]
    sync_tool: Option<String>,

    /// JSON configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    // Level changes after startup go through log::set_max_level
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} - {} - {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "sub-sync", &mut std::io::stdout());
        return Ok(());
    }

    let dirs = resolve_dirs(&cli);
    let config = build_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config);
    controller.run(&dirs);

    Ok(())
}

/// Directories from the command line, else from the environment.
/// Exits with a usage error when neither provides any.
fn resolve_dirs(cli: &CommandLineOptions) -> Vec<PathBuf> {
    let dirs = selected_dirs(cli);
    if dirs.is_empty() {
        CommandLineOptions::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                format!("no DIRS given and ${} is empty", app_config::SYNC_DIRS_ENV),
            )
            .exit();
    }
    dirs
}

fn selected_dirs(cli: &CommandLineOptions) -> Vec<PathBuf> {
    if !cli.dirs.is_empty() {
        return cli.dirs.clone();
    }
    // Repeated spaces in the variable leave empty entries behind
    cli.env_dirs
        .iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .cloned()
        .collect()
}

/// Defaults (or the config file), then environment, then command-line flags
fn build_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    config.apply_env();
    config.add_subtitle_suffixes(&cli.sub_ext);
    config.add_video_suffixes(&cli.video_ext);

    if let Some(tool) = &cli.sync_tool {
        config.sync_tool = tool.clone();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}
