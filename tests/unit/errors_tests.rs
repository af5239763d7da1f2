/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use sub_sync::errors::{AppError, FileError, FileOperation, ScanError, SyncError};

#[test]
fn test_syncError_exitStatus_shouldDisplayCommandAndCode() {
    let error = SyncError::ExitStatus {
        command: "ffs movie.mkv -i movie.zh.srt -o movie.zh.srt".to_string(),
        code: Some(3),
    };
    let display = format!("{}", error);
    assert!(display.contains("ffs movie.mkv -i movie.zh.srt -o movie.zh.srt"));
    assert!(display.contains("run failed, exit: 3"));
}

#[test]
fn test_syncError_killedBySignal_shouldSaySignal() {
    let error = SyncError::ExitStatus {
        command: "ffs".to_string(),
        code: None,
    };
    assert!(format!("{}", error).ends_with("exit: signal"));
}

#[test]
fn test_syncError_launch_shouldKeepIoSource() {
    let error = SyncError::Launch {
        command: "ffs".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
    };
    let source = std::error::Error::source(&error).expect("source should be kept");
    assert!(source.to_string().contains("No such file"));
}

#[test]
fn test_fileError_shouldDisplayOperationAndPath() {
    let error = FileError::new(
        FileOperation::Move,
        "/tmp/a.zh.srt.sub_sync_back",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );
    let display = format!("{}", error);
    assert!(display.contains("Failed to move"));
    assert!(display.contains("a.zh.srt.sub_sync_back"));
    assert!(display.contains("denied"));
}

#[test]
fn test_scanError_notADirectory_shouldDisplayPath() {
    let error = ScanError::NotADirectory(PathBuf::from("/nowhere"));
    assert!(format!("{}", error).contains("/nowhere"));
}

#[test]
fn test_appError_fromFileError_shouldWrapCorrectly() {
    let file_error = FileError::new(
        FileOperation::Copy,
        "x.srt",
        std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
    );
    let app_error: AppError = file_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("disk full"));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeConfigError() {
    let app_error: AppError = anyhow::anyhow!("bad suffix").into();
    assert!(matches!(app_error, AppError::Config(ref msg) if msg == "bad suffix"));
}
