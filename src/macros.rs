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

//! Formatting macros.
//!
//! Each macro takes a logger (anything that derefs to [`Logger`](crate::Logger)) followed by
//! `format!` arguments. The call site is attributed through `file!()` and `line!()`, and the
//! message is only formatted if some sink would accept it.

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log_at(
                level,
                ::std::option::Option::Some($crate::Location::new(file!(), line!())),
                &::std::format!($($arg)+),
            );
        }
    }};
}

/// Log a debug message.
///
/// When debug emission is disabled the arguments are not evaluated.
///
/// ```
/// let logger = tetralog::Logger::builder().build();
/// tetralog::debug!(logger, "loaded {} assets", 42);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log an alert.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Alert, $($arg)+)
    };
}

/// Log a fatal failure.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Fatal, $($arg)+)
    };
}
