/*!
 * Integration tests running the real command synchronizer.
 *
 * The sync tool is set to `sh`, so `sh <video> -i <sub> -o <sub>` executes the
 * fake video file as a script: each test's video doubles as the synchronizer.
 */

#![cfg(unix)]

use anyhow::Result;
use std::fs;
use std::path::Path;

use sub_sync::app_config::Config;
use sub_sync::app_controller::Controller;
use crate::common;

fn shell_config() -> Config {
    let mut config = Config::default();
    config.sync_tool = "sh".to_string();
    config
}

fn write_pair(dir: &Path, script: &str) -> Result<(std::path::PathBuf, std::path::PathBuf)> {
    let video = common::create_test_file(dir, "movie.mkv", script)?;
    let subtitle = common::create_test_file(dir, "movie.zh.srt", common::SAMPLE_SUBTITLE)?;
    Ok((video, subtitle))
}

/// movie.mkv + movie.zh.srt, tool exits non-zero: arguments are passed in
/// order and the subtitle is restored byte for byte
#[test]
fn test_command_withNonZeroExit_shouldPassArgumentsAndRevert() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let (video, subtitle) = write_pair(
        temp_dir.path(),
        "printf '%s\\n' \"$0\" \"$@\" > \"$2.args\"\nprintf 'garbage' > \"$4\"\nexit 3\n",
    )?;

    let summary = Controller::with_config(shell_config()).run(&[temp_dir.path().to_path_buf()]);

    let args = fs::read_to_string(temp_dir.path().join("movie.zh.srt.args"))?;
    let expected = format!(
        "{}\n-i\n{}\n-o\n{}\n",
        video.display(),
        subtitle.display(),
        subtitle.display()
    );
    assert_eq!(args, expected);
    assert_eq!(summary.reverted, 1);
    assert_eq!(fs::read_to_string(&subtitle)?, common::SAMPLE_SUBTITLE);
    assert!(!common::backup_of(&subtitle).exists());
    Ok(())
}

#[test]
fn test_command_withChangedOutput_shouldKeepBackup() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (_, subtitle) = write_pair(temp_dir.path(), "printf 'retimed\\n' >> \"$4\"\n")?;

    let summary = Controller::with_config(shell_config()).run(&[temp_dir.path().to_path_buf()]);

    assert_eq!(summary.synced, 1);
    assert_eq!(
        fs::read_to_string(&subtitle)?,
        format!("{}retimed\n", common::SAMPLE_SUBTITLE)
    );
    assert_eq!(fs::read_to_string(common::backup_of(&subtitle))?, common::SAMPLE_SUBTITLE);
    Ok(())
}

#[test]
fn test_command_withSuccessButNoChange_shouldRevert() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (_, subtitle) = write_pair(temp_dir.path(), "exit 0\n")?;

    let summary = Controller::with_config(shell_config()).run(&[temp_dir.path().to_path_buf()]);

    assert_eq!(summary.reverted, 1);
    assert_eq!(fs::read_to_string(&subtitle)?, common::SAMPLE_SUBTITLE);
    assert!(!common::backup_of(&subtitle).exists());
    Ok(())
}

#[test]
fn test_command_withMissingTool_shouldRevert() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (_, subtitle) = write_pair(temp_dir.path(), "exit 0\n")?;
    let mut config = Config::default();
    config.sync_tool = temp_dir.path().join("no-such-ffs").display().to_string();

    let summary = Controller::with_config(config).run(&[temp_dir.path().to_path_buf()]);

    assert_eq!(summary.reverted, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(fs::read_to_string(&subtitle)?, common::SAMPLE_SUBTITLE);
    assert!(!common::backup_of(&subtitle).exists());
    Ok(())
}
