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

use std::path::PathBuf;

use crate::Level;
use crate::Logger;
use crate::clock::Clock;
use crate::console::Console;
use crate::console::Terminal;
use crate::file::FileSink;
use crate::rotate::Rotation;

/// A builder for configuring a [`Logger`].
///
/// Building never fails. If the logs directory or the current log file cannot be set up, the
/// logger reports it as a warning on the console and runs without a file sink.
///
/// # Examples
///
/// ```
/// use tetralog::Level;
/// use tetralog::Logger;
///
/// let logs = tempfile::tempdir().unwrap();
/// let logger = Logger::builder()
///     .console_level(Level::Info)
///     .file_level(Level::Debug)
///     .logs_dir(logs.path())
///     .build();
///
/// logger.info("hello world");
/// logger.dispose();
/// ```
#[must_use = "call `build` to construct the logger"]
#[derive(Debug)]
pub struct LoggerBuilder {
    console_level: Level,
    file_level: Level,
    push_diagnostics: bool,
    debug_enabled: bool,
    console: Box<dyn Console>,
    logs_dir: Option<PathBuf>,
    clock: Clock,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Create a builder with the default settings and no logs directory.
    pub fn new() -> Self {
        Self {
            console_level: Level::Debug,
            file_level: Level::Debug,
            push_diagnostics: true,
            debug_enabled: cfg!(debug_assertions),
            console: Box::new(Terminal::default()),
            logs_dir: None,
            clock: Clock::default(),
        }
    }

    /// Create a builder that keeps its logs in the per-user data directory of `app`.
    ///
    /// On Linux this is `$XDG_DATA_HOME/<app>/logs`, on macOS
    /// `~/Library/Application Support/<app>/logs` and on Windows
    /// `%LOCALAPPDATA%\<app>\logs`. If the platform has no such directory, the logger runs
    /// without a file sink.
    pub fn for_app(app: impl AsRef<str>) -> Self {
        let logs_dir = dirs::data_local_dir().map(|dir| dir.join(app.as_ref()).join("logs"));
        Self {
            logs_dir,
            ..Self::new()
        }
    }

    /// Set the minimum level printed to the console.
    ///
    /// Default to [`Level::Debug`].
    pub fn console_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }

    /// Set the minimum level written to the log file.
    ///
    /// Default to [`Level::Debug`].
    pub fn file_level(mut self, level: Level) -> Self {
        self.file_level = level;
        self
    }

    /// Route console output of warning and error records to the console's diagnostic channels
    /// instead of its plain output.
    ///
    /// `Warn` and `Alert` go to [`Console::push_warning`], `Error` and `Fatal` go to
    /// [`Console::push_error`]. Default to `true`.
    pub fn push_diagnostics(mut self, push: bool) -> Self {
        self.push_diagnostics = push;
        self
    }

    /// Whether debug records are emitted at all.
    ///
    /// When disabled, debug calls return before any formatting happens, regardless of the
    /// configured levels. Default to `true` in builds with debug assertions and `false`
    /// otherwise.
    pub fn debug_enabled(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }

    /// Set the console outputs.
    ///
    /// Default to [`Terminal`].
    pub fn console(mut self, console: impl Into<Box<dyn Console>>) -> Self {
        self.console = console.into();
        self
    }

    /// Set the directory holding the rotated log files.
    ///
    /// Without a logs directory, the logger only writes to the console.
    pub fn logs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = Some(dir.into());
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Rotate the log files and construct the [`Logger`].
    ///
    /// Rotation runs on every call. Build one logger per logs directory and process.
    pub fn build(self) -> Logger {
        let LoggerBuilder {
            console_level,
            file_level,
            push_diagnostics,
            debug_enabled,
            console,
            logs_dir,
            clock,
        } = self;

        let mut warnings = vec![];
        let file = match logs_dir.map(Rotation::new) {
            None => FileSink::disabled(),
            Some(rotation) => match rotation.acquire() {
                Ok(acquired) => {
                    warnings.extend(
                        acquired
                            .failures
                            .iter()
                            .map(|err| format!("log rotation step failed: {err}")),
                    );
                    if acquired.in_use {
                        warnings.push(format!(
                            "could not acquire logging stream: {} is in use by another instance",
                            rotation.current().display()
                        ));
                    } else if acquired.file.is_none() {
                        warnings.push(format!(
                            "could not acquire logging stream: {}",
                            rotation.current().display()
                        ));
                    }
                    FileSink::new(acquired.file)
                }
                Err(err) => {
                    warnings.push(format!("could not acquire logging stream: {err}"));
                    FileSink::disabled()
                }
            },
        };

        let logger = Logger::new(
            console_level,
            file_level,
            push_diagnostics,
            debug_enabled,
            console,
            file,
            clock,
        );
        for warning in warnings {
            logger.log_at(Level::Warn, None, &warning);
        }
        logger
    }
}
