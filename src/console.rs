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

//! Console outputs.

use std::fmt;
use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

#[cfg(feature = "colored")]
use colored::Color;
#[cfg(feature = "colored")]
use colored::Colorize;

use crate::Level;

/// The console side of a logger.
///
/// A host usually has two kinds of console surfaces: a plain output that can be styled per
/// level, and diagnostic channels for warnings and errors that it surfaces specially (a
/// debugger panel, an error overlay, stderr). Lines handed to a `Console` are complete: they
/// already carry the time of day and the record body.
pub trait Console: fmt::Debug + Send + Sync + 'static {
    /// Print a line to the plain output, styled for `level`.
    fn print(&self, level: Level, line: &str);

    /// Push a line to the host's warning channel.
    fn push_warning(&self, line: &str);

    /// Push a line to the host's error channel.
    fn push_error(&self, line: &str);
}

impl<T: Console> From<T> for Box<dyn Console> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// Customize the color of each log level.
#[cfg(feature = "colored")]
#[derive(Debug, Clone)]
pub struct LevelColor {
    /// Color for debug level logs.
    pub debug: Color,
    /// Color for info level logs.
    pub info: Color,
    /// Color for warning level logs.
    pub warn: Color,
    /// Color for error level logs.
    pub error: Color,
    /// Color for alert level logs.
    pub alert: Color,
    /// Color for fatal level logs.
    pub fatal: Color,
}

#[cfg(feature = "colored")]
impl Default for LevelColor {
    fn default() -> Self {
        Self {
            debug: Color::BrightBlack,
            info: Color::White,
            warn: Color::Yellow,
            error: Color::Red,
            alert: Color::Magenta,
            fatal: Color::BrightRed,
        }
    }
}

#[cfg(feature = "colored")]
impl LevelColor {
    /// The color for `level`.
    pub fn color(&self, level: Level) -> Color {
        match level {
            Level::Debug => self.debug,
            Level::Info => self.info,
            Level::Warn => self.warn,
            Level::Error => self.error,
            Level::Alert => self.alert,
            Level::Fatal => self.fatal,
        }
    }
}

/// A console that prints to stdout and pushes diagnostics to stderr.
///
/// Plain output is colored per level unless the `colored` feature is off or
/// [`no_color`](Terminal::no_color) is set. Write failures are ignored.
#[derive(Debug, Clone, Default)]
pub struct Terminal {
    #[cfg(feature = "colored")]
    colors: LevelColor,
    #[cfg_attr(not(feature = "colored"), allow(dead_code))]
    no_color: bool,
}

impl Terminal {
    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Override the level colors.
    #[cfg(feature = "colored")]
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    #[cfg(feature = "colored")]
    fn styled(&self, level: Level, line: &str) -> String {
        if self.no_color {
            line.to_string()
        } else {
            line.color(self.colors.color(level)).to_string()
        }
    }

    #[cfg(not(feature = "colored"))]
    fn styled(&self, _: Level, line: &str) -> String {
        line.to_string()
    }
}

impl Console for Terminal {
    fn print(&self, level: Level, line: &str) {
        let line = self.styled(level, line);
        let _ = writeln!(io::stdout().lock(), "{line}");
    }

    fn push_warning(&self, line: &str) {
        let line = self.styled(Level::Warn, &format!("WARNING: {line}"));
        let _ = writeln!(io::stderr().lock(), "{line}");
    }

    fn push_error(&self, line: &str) {
        let line = self.styled(Level::Error, &format!("ERROR: {line}"));
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

/// The surface a captured line was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Plain output, styled for the given level.
    Print(Level),
    /// The warning channel.
    Warning,
    /// The error channel.
    Error,
}

/// A line received by a [`Captured`] console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub channel: Channel,
    pub text: String,
}

/// A console that keeps every line in memory.
///
/// Clones share the same buffer, so a handle can be kept after the console is moved into a
/// logger.
///
/// # Examples
///
/// ```
/// use tetralog::Logger;
/// use tetralog::console::Captured;
///
/// let captured = Captured::default();
/// let logger = Logger::builder().console(captured.clone()).build();
/// logger.info("hello world");
/// assert!(captured.lines()[0].text.ends_with("hello world"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Captured {
    lines: Arc<Mutex<Vec<ConsoleLine>>>,
}

impl Captured {
    /// All lines received so far.
    pub fn lines(&self) -> Vec<ConsoleLine> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Remove and return all lines received so far.
    pub fn take(&self) -> Vec<ConsoleLine> {
        std::mem::take(
            &mut *self
                .lines
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    fn push(&self, channel: Channel, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(ConsoleLine {
                channel,
                text: line.to_string(),
            });
    }
}

impl Console for Captured {
    fn print(&self, level: Level, line: &str) {
        self.push(Channel::Print(level), line);
    }

    fn push_warning(&self, line: &str) {
        self.push(Channel::Warning, line);
    }

    fn push_error(&self, line: &str) {
        self.push(Channel::Error, line);
    }
}
