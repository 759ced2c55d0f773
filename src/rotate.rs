// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Startup rotation of the on-disk log files.
//!
//! A logs directory holds at most four generations of the log, from newest to oldest:
//!
//! ```text
//! 0.current.txt
//! 1.previous.txt
//! 2.older.txt
//! 3.oldest.txt
//! ```
//!
//! Each rotation drops the oldest generation, shifts the others one slot down and starts an
//! empty current generation.
//!
//! The current generation stays exclusively locked while it is being written. If another
//! process holds that lock, the directory is left alone.

use std::fs;
use std::fs::File;
use std::fs::TryLockError;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;

/// File names of the retained generations, newest first.
pub const GENERATIONS: [&str; 4] = ["0.current.txt", "1.previous.txt", "2.older.txt", "3.oldest.txt"];

/// The rotation window of a logs directory.
#[derive(Debug, Clone)]
pub struct Rotation {
    dir: PathBuf,
}

/// The outcome of [`Rotation::acquire`].
#[derive(Debug)]
pub struct Acquired {
    /// The freshly created and locked current generation, or `None` if it could not be
    /// created.
    pub file: Option<File>,
    /// Rotation steps that failed. The remaining steps still ran.
    pub failures: Vec<Error>,
    /// Another process holds the current generation. Nothing was rotated.
    pub in_use: bool,
}

impl Rotation {
    /// Create a rotation over the given logs directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The logs directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the generation at `index`, where `0` is the current one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`GENERATIONS.len()`](GENERATIONS).
    pub fn generation(&self, index: usize) -> PathBuf {
        self.dir.join(GENERATIONS[index])
    }

    /// Path of the current generation.
    pub fn current(&self) -> PathBuf {
        self.generation(0)
    }

    /// Rotate the existing generations and open a new, empty current generation.
    ///
    /// # Errors
    ///
    /// Returns an error only if the logs directory cannot be created. A current generation that
    /// cannot be created, or that is locked by another process, is reported as `file: None`.
    pub fn acquire(&self) -> Result<Acquired, Error> {
        fs::create_dir_all(&self.dir).map_err(|err| {
            Error::new("failed to create log directory")
                .with_context("path", self.dir.display())
                .with_source(err)
        })?;

        // hold the outgoing generation until its successor is locked
        let outgoing = match File::open(self.current()) {
            Ok(file) => match file.try_lock() {
                Ok(()) => Some(file),
                Err(TryLockError::WouldBlock) => {
                    return Ok(Acquired {
                        file: None,
                        failures: vec![],
                        in_use: true,
                    });
                }
                // locking unsupported here, rotate anyway
                Err(TryLockError::Error(_)) => None,
            },
            Err(_) => None,
        };

        let failures = self.shift();
        let created = File::create(self.current()).ok();
        let in_use = created
            .as_ref()
            .is_some_and(|file| matches!(file.try_lock(), Err(TryLockError::WouldBlock)));
        let file = created.filter(|_| !in_use);
        drop(outgoing);

        Ok(Acquired {
            file,
            failures,
            in_use,
        })
    }

    /// Shift every generation one slot towards the oldest, dropping the oldest first.
    ///
    /// Each step is attempted regardless of earlier failures. Missing generations are skipped.
    pub fn shift(&self) -> Vec<Error> {
        let mut failures = vec![];

        let oldest = self.generation(GENERATIONS.len() - 1);
        if let Err(err) = ignore_missing(fs::remove_file(&oldest)) {
            failures.push(
                Error::new("failed to delete oldest log file")
                    .with_context("path", oldest.display())
                    .with_source(err),
            );
        }

        for index in (0..GENERATIONS.len() - 1).rev() {
            let from = self.generation(index);
            let to = self.generation(index + 1);
            if let Err(err) = ignore_missing(fs::rename(&from, &to)) {
                failures.push(
                    Error::new("failed to rename log file")
                        .with_context("from", from.display())
                        .with_context("to", to.display())
                        .with_source(err),
                );
            }
        }

        failures
    }
}

fn ignore_missing(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    fn seed(rotation: &Rotation, index: usize) {
        fs::write(rotation.generation(index), format!("generation {index}")).unwrap();
    }

    fn read(rotation: &Rotation, index: usize) -> Option<String> {
        fs::read_to_string(rotation.generation(index)).ok()
    }

    #[test]
    fn test_full_window_shifts_down() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let rotation = Rotation::new(temp_dir.path());
        for index in 0..4 {
            seed(&rotation, index);
        }

        let acquired = rotation.acquire().unwrap();
        assert!(acquired.failures.is_empty(), "{:?}", acquired.failures);
        let mut file = acquired.file.expect("current generation must be writable");
        file.write_all(b"fresh").unwrap();
        drop(file);

        assert_eq!(read(&rotation, 0).as_deref(), Some("fresh"));
        assert_eq!(read(&rotation, 1).as_deref(), Some("generation 0"));
        assert_eq!(read(&rotation, 2).as_deref(), Some("generation 1"));
        assert_eq!(read(&rotation, 3).as_deref(), Some("generation 2"));
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 4);
    }

    #[test]
    fn test_only_current_exists() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let rotation = Rotation::new(temp_dir.path());
        seed(&rotation, 0);

        let acquired = rotation.acquire().unwrap();
        assert!(acquired.failures.is_empty(), "{:?}", acquired.failures);
        assert!(acquired.file.is_some());

        assert_eq!(read(&rotation, 0).as_deref(), Some(""));
        assert_eq!(read(&rotation, 1).as_deref(), Some("generation 0"));
        assert_eq!(read(&rotation, 2), None);
        assert_eq!(read(&rotation, 3), None);
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let rotation = Rotation::new(temp_dir.path().join("user").join("logs"));

        let acquired = rotation.acquire().unwrap();
        assert!(acquired.file.is_some());
        assert!(rotation.current().is_file());
    }

    #[test]
    fn test_window_never_exceeds_four_files() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let rotation = Rotation::new(temp_dir.path());

        for run in 0..10 {
            let acquired = rotation.acquire().unwrap();
            let mut file = acquired.file.unwrap();
            write!(file, "run {run}").unwrap();
        }

        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 4);
        assert_eq!(read(&rotation, 0).as_deref(), Some("run 9"));
        assert_eq!(read(&rotation, 3).as_deref(), Some("run 6"));
    }

    #[test]
    fn test_locked_current_is_left_alone() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let rotation = Rotation::new(temp_dir.path());

        let mut running = rotation.acquire().unwrap().file.unwrap();
        running.write_all(b"running").unwrap();

        let second = rotation.acquire().unwrap();
        assert!(second.in_use);
        assert!(second.file.is_none());
        assert!(second.failures.is_empty());
        assert_eq!(read(&rotation, 0).as_deref(), Some("running"));
        assert_eq!(read(&rotation, 1), None);

        drop(running);
        let third = rotation.acquire().unwrap();
        assert!(!third.in_use);
        assert!(third.file.is_some());
        assert_eq!(read(&rotation, 1).as_deref(), Some("running"));
    }

    #[test]
    fn test_directory_creation_failure() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let blocker = temp_dir.path().join("logs");
        fs::write(&blocker, "not a directory").unwrap();

        let err = Rotation::new(&blocker).acquire().unwrap_err();
        assert_eq!(err.message(), "failed to create log directory");
    }

    #[test]
    fn test_blocked_generations_are_reported_and_skipped() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let rotation = Rotation::new(temp_dir.path());
        // non-empty directories can neither be removed as files nor replaced by a rename
        for index in 0..4 {
            let dir = rotation.generation(index);
            fs::create_dir(&dir).unwrap();
            fs::write(dir.join("keep"), "x").unwrap();
        }

        let acquired = rotation.acquire().unwrap();
        assert!(acquired.file.is_none());
        assert_eq!(acquired.failures.len(), 4);
        assert_eq!(
            acquired.failures[0].message(),
            "failed to delete oldest log file"
        );
        for failure in &acquired.failures[1..] {
            assert_eq!(failure.message(), "failed to rename log file");
        }
    }
}
