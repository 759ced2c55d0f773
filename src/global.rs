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

//! The process-wide default logger.
//!
//! Libraries should take a [`Logger`] explicitly. Applications that want one logger for the
//! whole process configure it here once, near the start of `main`, and dispose it at the end.
//!
//! ```no_run
//! use tetralog::Level;
//! use tetralog::LoggerBuilder;
//!
//! fn main() {
//!     let logger = tetralog::global::configure(
//!         LoggerBuilder::for_app("my-app").console_level(Level::Info),
//!     )
//!     .expect("logger is configured once");
//!
//!     logger.info("hello world");
//!     log::warn!("third-party records land in the same files");
//!
//!     tetralog::global::dispose();
//! }
//! ```

use std::sync::OnceLock;

use crate::Error;
use crate::Logger;
use crate::LoggerBuilder;
use crate::panic_hook;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Build the process-wide logger and wire it into the process.
///
/// This rotates the log files, installs the logger as the [`log`] crate's global logger and
/// installs the [panic hook](panic_hook::install).
///
/// # Errors
///
/// Returns an error if the default logger is already configured, or if another `log` backend
/// has been installed. In the latter case the logger is still usable through [`logger`].
pub fn configure(builder: LoggerBuilder) -> Result<&'static Logger, Error> {
    let mut built = false;
    let logger = DEFAULT_LOGGER.get_or_init(|| {
        built = true;
        builder.build()
    });
    if !built {
        return Err(Error::new("default logger has been already configured"));
    }

    panic_hook::install(logger);
    log::set_logger(logger)
        .map_err(|err| Error::new("log global logger has been already setup").with_source(err))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(logger)
}

/// The process-wide logger, if [`configure`] has been called.
pub fn logger() -> Option<&'static Logger> {
    DEFAULT_LOGGER.get()
}

/// Release the process-wide logger's log file.
///
/// Safe to call more than once, and before or without [`configure`].
pub fn dispose() {
    if let Some(logger) = DEFAULT_LOGGER.get() {
        logger.dispose();
    }
}
