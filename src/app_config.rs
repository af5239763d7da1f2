use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles loading, extending and validating the settings that
/// decide which files are sync candidates and which tool realigns them.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Subtitle suffixes, checked in order (e.g. "zh.ass")
    #[serde(default = "default_subtitle_suffixes")]
    pub subtitle_suffixes: Vec<String>,

    /// Video suffixes, checked in order (e.g. "mkv")
    #[serde(default = "default_video_suffixes")]
    pub video_suffixes: Vec<String>,

    /// Suffix appended to a subtitle path to form its backup marker
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,

    /// Program invoked as `<tool> <video> -i <sub> -o <sub>`
    #[serde(default = "default_sync_tool")]
    pub sync_tool: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Environment key listing directories to scan when none are given
pub const SYNC_DIRS_ENV: &str = "SYNC_DIRS";

/// Environment key overriding the sync tool
pub const SYNC_TOOL_ENV: &str = "SUB_SYNC_TOOL";

/// Environment key holding extra subtitle suffixes
pub const SUB_EXT_ENV: &str = "SUB_EXT_LIST";

/// Environment key holding extra video suffixes
pub const VIDEO_EXT_ENV: &str = "VIDEO_EXT_LIST";

fn default_subtitle_suffixes() -> Vec<String> {
    vec!["zh.ass".to_string(), "zh.srt".to_string()]
}

fn default_video_suffixes() -> Vec<String> {
    vec!["mkv".to_string(), "mp4".to_string()]
}

fn default_backup_suffix() -> String {
    "sub_sync_back".to_string()
}

fn default_sync_tool() -> String {
    // ffsubsync's entry point
    "ffs".to_string()
}

/// Appends each item of `extra`, keeping the first occurrence of any suffix
/// (compared case-insensitively).
fn extend_suffixes<I, S>(list: &mut Vec<String>, extra: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for item in extra {
        let item = item.as_ref().trim();
        if item.is_empty() {
            continue;
        }
        if !list.iter().any(|existing| existing.eq_ignore_ascii_case(item)) {
            list.push(item.to_string());
        }
    }
}

impl Config {
    /// Load a configuration file; missing fields take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Extend the suffix lists from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Extend the suffix lists using `lookup` in place of the environment.
    /// Each list reads its own key. Malformed entries are skipped with a warning.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(SUB_EXT_ENV) {
            extend_suffixes(&mut self.subtitle_suffixes, valid_env_suffixes(SUB_EXT_ENV, &value));
        }
        if let Some(value) = lookup(VIDEO_EXT_ENV) {
            extend_suffixes(&mut self.video_suffixes, valid_env_suffixes(VIDEO_EXT_ENV, &value));
        }
    }

    pub fn add_subtitle_suffixes<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_suffixes(&mut self.subtitle_suffixes, extra);
    }

    pub fn add_video_suffixes<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_suffixes(&mut self.video_suffixes, extra);
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.subtitle_suffixes.is_empty() {
            return Err(anyhow!("At least one subtitle suffix is required"));
        }
        if self.video_suffixes.is_empty() {
            return Err(anyhow!("At least one video suffix is required"));
        }

        for suffix in self.subtitle_suffixes.iter().chain(self.video_suffixes.iter()) {
            validate_suffix(suffix)?;
        }

        validate_suffix(&self.backup_suffix)
            .context("Invalid backup suffix")?;

        // A backup marker must never be mistaken for a sync candidate
        if self
            .subtitle_suffixes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&self.backup_suffix))
        {
            return Err(anyhow!(
                "Backup suffix '{}' is also listed as a subtitle suffix",
                self.backup_suffix
            ));
        }

        if self.sync_tool.trim().is_empty() {
            return Err(anyhow!("Sync tool must not be empty"));
        }

        Ok(())
    }
}

fn valid_env_suffixes<'a>(key: &str, value: &'a str) -> Vec<&'a str> {
    value
        .split_whitespace()
        .filter(|suffix| match validate_suffix(suffix) {
            Ok(()) => true,
            Err(e) => {
                warn!("Ignoring {} entry: {}", key, e);
                false
            }
        })
        .collect()
}

fn validate_suffix(suffix: &str) -> Result<()> {
    if suffix.trim().is_empty() {
        return Err(anyhow!("Suffix must not be empty"));
    }
    if suffix.starts_with('.') || suffix.ends_with('.') {
        return Err(anyhow!("Suffix '{}' must not start or end with '.'", suffix));
    }
    if suffix.contains('/') || suffix.contains(std::path::MAIN_SEPARATOR) {
        return Err(anyhow!("Suffix '{}' must not contain a path separator", suffix));
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subtitle_suffixes: default_subtitle_suffixes(),
            video_suffixes: default_video_suffixes(),
            backup_suffix: default_backup_suffix(),
            sync_tool: default_sync_tool(),
            log_level: LogLevel::default(),
        }
    }
}
