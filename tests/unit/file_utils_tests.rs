/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use sub_sync::errors::FileOperation;
use sub_sync::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()), "directories are not files");
    Ok(())
}

/// Copy keeps the source and duplicates its bytes
#[test]
fn test_copy_file_withValidSource_shouldDuplicateBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "a.zh.srt", common::SAMPLE_SUBTITLE)?;
    let target = temp_dir.path().join("a.zh.srt.sub_sync_back");

    FileManager::copy_file(&source, &target)?;

    assert_eq!(fs::read(&source)?, fs::read(&target)?);
    Ok(())
}

#[test]
fn test_copy_file_withMissingSource_shouldReportCopyError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let err = FileManager::copy_file(temp_dir.path().join("missing"), temp_dir.path().join("out"))
        .unwrap_err();

    assert_eq!(err.operation, FileOperation::Copy);
    Ok(())
}

/// Move replaces the target and removes the source
#[test]
fn test_move_file_shouldReplaceTarget() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let backup = common::create_test_file(temp_dir.path(), "a.bak", "original")?;
    let target = common::create_test_file(temp_dir.path(), "a.srt", "changed")?;

    FileManager::move_file(&backup, &target)?;

    assert!(!backup.exists());
    assert_eq!(fs::read_to_string(&target)?, "original");
    Ok(())
}

#[test]
fn test_remove_file_withMissingFile_shouldReportRemoveError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let err = FileManager::remove_file(temp_dir.path().join("missing")).unwrap_err();

    assert_eq!(err.operation, FileOperation::Remove);
    Ok(())
}

/// Digest is the SHA-256 of the bytes
#[test]
fn test_content_digest_withKnownContent_shouldMatchSha256() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "abc.txt", "abc")?;

    assert_eq!(
        FileManager::content_digest(&file)?,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    Ok(())
}

#[test]
fn test_same_content_shouldCompareBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let a = common::create_test_file(temp_dir.path(), "a", "same")?;
    let b = common::create_test_file(temp_dir.path(), "b", "same")?;
    let c = common::create_test_file(temp_dir.path(), "c", "same\n")?;

    assert!(FileManager::same_content(&a, &b)?);
    assert!(!FileManager::same_content(&a, &c)?);
    Ok(())
}

#[test]
fn test_same_content_withMissingFile_shouldReportReadError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let a = common::create_test_file(temp_dir.path(), "a", "x")?;

    let err = FileManager::same_content(&a, temp_dir.path().join("gone")).unwrap_err();

    assert_eq!(err.operation, FileOperation::Read);
    Ok(())
}
