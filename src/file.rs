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

use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::Error;

/// The file side of a logger.
///
/// Owns the current generation's writer, and with it the file's exclusive lock. Every line is
/// flushed before [`FileSink::write_line`] returns. The sink turns itself off on the first failed write and stays off.
#[derive(Debug)]
pub(crate) struct FileSink {
    enabled: AtomicBool,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileSink {
    pub(crate) fn new(file: Option<File>) -> Self {
        Self {
            enabled: AtomicBool::new(file.is_some()),
            writer: Mutex::new(file.map(BufWriter::new)),
        }
    }

    pub(crate) fn disabled() -> Self {
        Self::new(None)
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Append `line` and a newline, then flush.
    ///
    /// Does nothing once the sink is disabled.
    pub(crate) fn write_line(&self, line: &str) -> Result<(), Error> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut guard = self.lock();
        let Some(writer) = guard.as_mut() else {
            return Ok(());
        };

        if let Err(err) = write_and_flush(writer, line) {
            self.enabled.store(false, Ordering::Release);
            // the buffer may hold a partial line, do not try to flush it again
            if let Some(writer) = guard.take() {
                let (file, _) = writer.into_parts();
                drop(file);
            }
            return Err(Error::new("failed to write log file").with_source(err));
        }

        Ok(())
    }

    /// Release the writer, then the file underneath.
    ///
    /// Only the first call on an enabled sink does any work.
    pub(crate) fn dispose(&self) -> Result<(), Error> {
        if !self.enabled.swap(false, Ordering::AcqRel) {
            return Ok(());
        }

        let Some(writer) = self.lock().take() else {
            return Ok(());
        };
        let file = writer.into_inner().map_err(|err| {
            Error::new("failed to flush log file on dispose").with_source(err.into_error())
        })?;
        let _ = file.unlock();
        drop(file);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Option<BufWriter<File>>> {
        // a panic while holding the lock cannot leave half a line behind: lines are flushed
        // with a single write before the guard is released
        self.writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn write_and_flush(writer: &mut impl Write, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}
