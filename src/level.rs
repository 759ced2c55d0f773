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

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The severity of a log record.
///
/// Levels are ordered from least to most severe:
///
/// - `Debug`
/// - `Info`
/// - `Warn`
/// - `Error`
/// - `Alert`
/// - `Fatal`
///
/// A sink configured with threshold `T` accepts a record of level `L` iff `T <= L`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// Diagnostic chatter, only emitted when debug emission is enabled.
    #[default]
    Debug = 0,
    /// Designates useful information.
    Info = 1,
    /// Designates hazardous situations.
    Warn = 2,
    /// Designates errors the application can recover from.
    Error = 3,
    /// Designates conditions the user should act upon.
    Alert = 4,
    /// Designates failures the application cannot survive.
    Fatal = 5,
}

impl Level {
    /// All levels from least to most severe.
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Alert,
        Level::Fatal,
    ];

    /// Return the string representation of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Alert => "ALERT",
            Level::Fatal => "FATAL",
        }
    }

    /// The bracketed tag that leads every record body.
    ///
    /// Info records carry no tag.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Debug => "[DEBUG]",
            Level::Info => "",
            Level::Warn => "[WARN]",
            Level::Error => "[ERROR]",
            Level::Alert => "[ALERT]",
            Level::Fatal => "[FATAL]",
        }
    }

    /// Whether a sink with this threshold accepts a record of `level`.
    pub fn accepts(&self, level: Level) -> bool {
        *self <= level
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Level, Self::Err> {
        let s = s.trim();
        for level in Level::ALL {
            if s.eq_ignore_ascii_case(level.as_str()) {
                return Ok(level);
            }
        }

        // common spellings used by other logging configs
        match s.to_ascii_lowercase().as_str() {
            "warning" => Ok(Level::Warn),
            "trace" => Ok(Level::Debug),
            _ => Err(Error::new(format!("malformed level: {s:?}"))),
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}
