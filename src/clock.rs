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

use jiff::Zoned;

/// Where a logger reads the wall-clock time from.
#[derive(Debug, Default)]
pub(crate) enum Clock {
    #[default]
    System,
    #[cfg(test)]
    Manual(ManualClock),
}

impl Clock {
    pub(crate) fn now(&self) -> Zoned {
        match self {
            Clock::System => Zoned::now(),
            #[cfg(test)]
            Clock::Manual(clock) => clock.now(),
        }
    }
}

/// Sortable local timestamp with seconds precision, as written to the log file.
pub(crate) fn file_timestamp(now: &Zoned) -> String {
    now.strftime("[%Y-%m-%dT%H:%M:%S]").to_string()
}

/// Time of day, as shown on the console.
pub(crate) fn console_timestamp(now: &Zoned) -> String {
    now.strftime("[%H:%M:%S]").to_string()
}

/// A clock frozen at a fixed instant.
#[derive(Debug)]
#[cfg(test)]
pub(crate) struct ManualClock {
    now: Zoned,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new(now: Zoned) -> ManualClock {
        ManualClock { now }
    }

    fn now(&self) -> Zoned {
        self.now.clone()
    }
}
