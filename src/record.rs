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
use std::fmt::Write;

use crate::Level;

/// The source location a record was emitted from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location<'a> {
    file: &'a str,
    line: u32,
}

impl<'a> Location<'a> {
    /// Create a location from a source path and a line number.
    pub fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// The source path as given, e.g. `src/app/ui.rs`.
    pub fn file(&self) -> &'a str {
        self.file
    }

    /// The line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The file name with directories and the last extension removed.
    ///
    /// Both `/` and `\` are treated as separators so paths recorded on another platform are
    /// shortened the same way.
    pub fn file_stem(&self) -> &'a str {
        let name = self.file.rsplit(['/', '\\']).next().unwrap_or(self.file);
        match name.rfind('.') {
            None | Some(0) => name,
            Some(idx) => &name[..idx],
        }
    }

    fn is_blank(&self) -> bool {
        self.file.trim().is_empty()
    }
}

impl Location<'static> {
    /// The location of the caller, following `#[track_caller]` frames.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line())
    }
}

impl<'a> From<&'a std::panic::Location<'a>> for Location<'a> {
    fn from(location: &'a std::panic::Location<'a>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// A single log event.
///
/// Records are built per call and dropped once every sink has seen them.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    level: Level,
    message: &'a str,
    location: Option<Location<'a>>,
}

impl<'a> Record<'a> {
    /// Create a record.
    pub fn new(level: Level, message: &'a str, location: Option<Location<'a>>) -> Self {
        Self {
            level,
            message,
            location,
        }
    }

    /// The severity.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message text.
    pub fn message(&self) -> &'a str {
        self.message
    }

    /// The call site, if known.
    ///
    /// A location whose path is blank is treated as unknown.
    pub fn location(&self) -> Option<Location<'a>> {
        self.location.filter(|location| !location.is_blank())
    }

    /// Render the text shared by every sink, without any timestamp.
    ///
    /// Output format:
    ///
    /// ```text
    /// [WARN][ui:42] disk is almost full
    /// [ui:7] hello world
    /// [ERROR] no call site
    /// ```
    pub fn body(&self) -> String {
        let mut body = String::with_capacity(self.message.len() + 32);
        // SAFETY: write to a string always succeeds
        write!(&mut body, "{self}").unwrap();
        body
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.level.label())?;
        match self.location() {
            Some(location) => write!(f, "[{}:{}] ", location.file_stem(), location.line())?,
            None => f.write_char(' ')?,
        }
        f.write_str(self.message)
    }
}
