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

use crate::Level;
use crate::Location;
use crate::LoggerBuilder;
use crate::Record;
use crate::clock::Clock;
use crate::clock::console_timestamp;
use crate::clock::file_timestamp;
use crate::console::Console;
use crate::file::FileSink;

/// A leveled logger with a console sink and a file sink.
///
/// Each sink has its own minimum level. A record is formatted once and then offered to both
/// sinks independently, so it may reach neither, either or both.
///
/// File lines look like:
///
/// ```text
/// [2024-08-11T22:44:57][WARN][inventory:42] item stack overflowed
/// [2024-08-11T22:44:58][ui:7] hello world
/// ```
///
/// Console lines carry the time of day instead: `[22:44:57][WARN][inventory:42] ...`.
///
/// Emission never fails and never panics. A logger is `Send + Sync` and can be shared across
/// threads, typically behind an [`Arc`](std::sync::Arc).
#[derive(Debug)]
pub struct Logger {
    console_level: Level,
    file_level: Level,
    push_diagnostics: bool,
    debug_enabled: bool,
    console: Box<dyn Console>,
    file: FileSink,
    clock: Clock,
}

impl Logger {
    /// Create a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(super) fn new(
        console_level: Level,
        file_level: Level,
        push_diagnostics: bool,
        debug_enabled: bool,
        console: Box<dyn Console>,
        file: FileSink,
        clock: Clock,
    ) -> Self {
        Self {
            console_level,
            file_level,
            push_diagnostics,
            debug_enabled,
            console,
            file,
            clock,
        }
    }

    /// The minimum level printed to the console.
    pub fn console_level(&self) -> Level {
        self.console_level
    }

    /// The minimum level written to the log file.
    pub fn file_level(&self) -> Level {
        self.file_level
    }

    /// Whether records still reach the log file.
    ///
    /// This is `false` if no logs directory was configured, if the log file could not be
    /// created, after a failed write, and after [`dispose`](Logger::dispose).
    pub fn is_file_sink_enabled(&self) -> bool {
        self.file.is_enabled()
    }

    /// Whether a record of `level` would reach any sink.
    pub fn enabled(&self, level: Level) -> bool {
        if level == Level::Debug && !self.debug_enabled {
            return false;
        }

        self.console_level.accepts(level)
            || (self.file.is_enabled() && self.file_level.accepts(level))
    }

    /// Log a debug message.
    ///
    /// Skipped entirely when debug emission is disabled.
    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log_at(Level::Debug, Some(Location::caller()), message.as_ref());
    }

    /// Log an info message.
    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log_at(Level::Info, Some(Location::caller()), message.as_ref());
    }

    /// Log a warning.
    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log_at(Level::Warn, Some(Location::caller()), message.as_ref());
    }

    /// Log an error.
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log_at(Level::Error, Some(Location::caller()), message.as_ref());
    }

    /// Log an alert.
    #[track_caller]
    pub fn alert(&self, message: impl AsRef<str>) {
        self.log_at(Level::Alert, Some(Location::caller()), message.as_ref());
    }

    /// Log a fatal failure.
    #[track_caller]
    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log_at(Level::Fatal, Some(Location::caller()), message.as_ref());
    }

    /// Log a message at `level`, attributed to the caller.
    #[track_caller]
    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        self.log_at(level, Some(Location::caller()), message.as_ref());
    }

    /// Log a message at `level` with an explicit call site.
    ///
    /// Pass `None` to omit the call-site bracket.
    pub fn log_at(&self, level: Level, location: Option<Location<'_>>, message: &str) {
        if !self.enabled(level) {
            return;
        }

        self.dispatch(&Record::new(level, message, location));
    }

    fn dispatch(&self, record: &Record) {
        let level = record.level();
        let body = record.body();
        let now = self.clock.now();

        if self.console_level.accepts(level) {
            let line = format!("{}{body}", console_timestamp(&now));
            match level {
                Level::Warn | Level::Alert if self.push_diagnostics => {
                    self.console.push_warning(&line)
                }
                Level::Error | Level::Fatal if self.push_diagnostics => {
                    self.console.push_error(&line)
                }
                _ => self.console.print(level, &line),
            }
        }

        if self.file_level.accepts(level) {
            let line = format!("{}{body}", file_timestamp(&now));
            if let Err(err) = self.file.write_line(&line) {
                // the file sink is off now, so this only reaches the console
                self.log_at(
                    Level::Warn,
                    None,
                    &format!("{err}; continuing without log file"),
                );
            }
        }
    }

    /// Release the log file.
    ///
    /// The writer is flushed and closed, then the file. Later records only reach the console.
    /// Calling this again, or on a logger without a file sink, does nothing.
    pub fn dispose(&self) {
        if let Err(err) = self.file.dispose() {
            self.log_at(Level::Warn, None, &err.to_string());
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.dispose();
    }
}
