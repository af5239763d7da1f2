/*!
 * Mock synchronizer implementations for testing.
 *
 * This module provides synchronizers that simulate the outcomes the backup
 * workflow has to handle:
 * - `MockSynchronizer::rewriting()` - succeeds and changes the subtitle
 * - `MockSynchronizer::unchanged()` - succeeds without touching the subtitle
 * - `MockSynchronizer::failing()` - exits with an error
 * - `MockSynchronizer::corrupt_then_fail()` - overwrites the subtitle, then exits with an error
 * - `MockSynchronizer::deleting()` - succeeds but removes the output file
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::SyncError;
use crate::sync_runner::Synchronizer;

/// Behavior mode for the mock synchronizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Appends a retiming marker line to the output
    Rewriting,
    /// Leaves the output byte-identical to the input
    Unchanged,
    /// Exits with the given code and writes nothing
    Failing { code: i32 },
    /// Corrupts the output, then fails
    CorruptThenFail,
    /// Removes the output and reports success
    Deleting,
}

/// One recorded invocation: (video, input, output)
pub type MockCall = (PathBuf, PathBuf, PathBuf);

/// Mock synchronizer recording every call it receives
#[derive(Debug, Clone)]
pub struct MockSynchronizer {
    behavior: MockBehavior,
    call_count: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

/// Line appended by [`MockBehavior::Rewriting`]
pub const RETIMED_MARKER: &str = "# retimed by mock";

impl MockSynchronizer {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn rewriting() -> Self {
        Self::new(MockBehavior::Rewriting)
    }

    pub fn unchanged() -> Self {
        Self::new(MockBehavior::Unchanged)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing { code: 1 })
    }

    pub fn corrupt_then_fail() -> Self {
        Self::new(MockBehavior::CorruptThenFail)
    }

    pub fn deleting() -> Self {
        Self::new(MockBehavior::Deleting)
    }

    /// Number of times `sync` was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Snapshot of the recorded calls, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn command(&self, video: &Path, input: &Path, output: &Path) -> String {
        format!(
            "mock {} -i {} -o {}",
            video.display(),
            input.display(),
            output.display()
        )
    }
}

impl Synchronizer for MockSynchronizer {
    fn sync(&self, video: &Path, input: &Path, output: &Path) -> Result<(), SyncError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((video.to_path_buf(), input.to_path_buf(), output.to_path_buf()));
        }

        let command = self.command(video, input, output);
        let io_failure = |source: std::io::Error| SyncError::Launch {
            command: command.clone(),
            source,
        };

        match self.behavior {
            MockBehavior::Rewriting => {
                let mut content = fs::read(input).map_err(io_failure)?;
                content.extend_from_slice(RETIMED_MARKER.as_bytes());
                content.push(b'\n');
                fs::write(output, content).map_err(io_failure)
            }
            MockBehavior::Unchanged => {
                if input != output {
                    fs::copy(input, output).map_err(io_failure)?;
                }
                Ok(())
            }
            MockBehavior::Failing { code } => Err(SyncError::ExitStatus {
                command,
                code: Some(code),
            }),
            MockBehavior::CorruptThenFail => {
                fs::write(output, b"half-written").map_err(io_failure)?;
                Err(SyncError::ExitStatus {
                    command,
                    code: Some(2),
                })
            }
            MockBehavior::Deleting => fs::remove_file(output).map_err(io_failure),
        }
    }
}
