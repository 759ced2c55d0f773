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

//! Bridge from the [`log`] crate.
//!
//! Third-party code logging through `log::info!` and friends reaches both sinks with its own
//! file and line. `Trace` records are treated as `Debug`.

use std::borrow::Cow;

use crate::Level;
use crate::Location;
use crate::Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        if !Logger::enabled(self, level) {
            return;
        }

        let message = match record.args().as_str() {
            Some(message) => Cow::Borrowed(message),
            None => Cow::Owned(record.args().to_string()),
        };
        let location = record
            .file()
            .map(|file| Location::new(file, record.line().unwrap_or_default()));
        self.log_at(level, location, &message);
    }

    // every line is flushed as it is written
    fn flush(&self) {}
}
