use log::info;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::errors::{FileError, FileOperation};

// @module: File utilities backing the backup/revert workflow

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    /// Copy `from` to `to` byte for byte, replacing `to` if present
    pub fn copy_file<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> Result<(), FileError> {
        let from = from.as_ref();
        let to = to.as_ref();

        fs::copy(from, to).map_err(|e| FileError::new(FileOperation::Copy, from, e))?;

        info!("Copied {:?} to {:?}", from, to);
        Ok(())
    }

    /// Rename `from` onto `to`
    pub fn move_file<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> Result<(), FileError> {
        let from = from.as_ref();
        let to = to.as_ref();

        fs::rename(from, to).map_err(|e| FileError::new(FileOperation::Move, from, e))?;

        info!("Moved {:?} to {:?}", from, to);
        Ok(())
    }

    pub fn remove_file<P: AsRef<Path>>(path: P) -> Result<(), FileError> {
        let path = path.as_ref();

        fs::remove_file(path).map_err(|e| FileError::new(FileOperation::Remove, path, e))?;

        info!("Removed {:?}", path);
        Ok(())
    }

    /// SHA-256 of the file contents, as lowercase hex
    pub fn content_digest<P: AsRef<Path>>(path: P) -> Result<String, FileError> {
        let path = path.as_ref();
        let read_err = |e: io::Error| FileError::new(FileOperation::Read, path, e);

        let mut file = File::open(path).map_err(read_err)?;
        let mut hasher = Sha256::new();
        io::copy(&mut file, &mut hasher).map_err(read_err)?;

        Ok(format!("{:x}", hasher.finalize()))
    }

    /// True when both files hold the same bytes
    pub fn same_content<P1: AsRef<Path>, P2: AsRef<Path>>(a: P1, b: P2) -> Result<bool, FileError> {
        Ok(Self::content_digest(a)? == Self::content_digest(b)?)
    }
}
