/*!
 * External subtitle synchronizer.
 *
 * The synchronizer is an opaque command-line program, invoked as
 * `<tool> <video> -i <input subtitle> -o <output subtitle>`. It runs to
 * completion on the calling thread; exit code zero is success. Failures are
 * returned to the caller, which logs them alongside the revert it triggers.
 */

use log::{debug, info};
use std::fmt::Debug;
use std::path::Path;
use std::process::Command;

use crate::errors::SyncError;

pub mod mock;

/// Common trait for anything that can realign a subtitle against a video
///
/// The backup workflow only needs success or failure from a run, so the
/// command-line tool and the test doubles share this interface.
pub trait Synchronizer: Debug {
    /// Realign `input` against `video`, writing the result to `output`
    ///
    /// # Returns
    /// * `Result<(), SyncError>` - Ok when the tool reports success
    fn sync(&self, video: &Path, input: &Path, output: &Path) -> Result<(), SyncError>;
}

/// Runs a synchronizer executable such as `ffs` (ffsubsync)
#[derive(Debug, Clone)]
pub struct CommandSynchronizer {
    program: String,
}

impl CommandSynchronizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn build_command(&self, video: &Path, input: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(video)
            .arg("-i")
            .arg(input)
            .arg("-o")
            .arg(output);
        command
    }

    fn describe(&self, video: &Path, input: &Path, output: &Path) -> String {
        format!(
            "{} {} -i {} -o {}",
            self.program,
            video.display(),
            input.display(),
            output.display()
        )
    }
}

impl Synchronizer for CommandSynchronizer {
    fn sync(&self, video: &Path, input: &Path, output: &Path) -> Result<(), SyncError> {
        let description = self.describe(video, input, output);
        debug!("CMD: {} started", description);

        let status = self
            .build_command(video, input, output)
            .status()
            .map_err(|source| SyncError::Launch {
                command: description.clone(),
                source,
            })?;

        if !status.success() {
            return Err(SyncError::ExitStatus {
                command: description,
                code: status.code(),
            });
        }

        info!("CMD: {} finished", description);
        Ok(())
    }
}
