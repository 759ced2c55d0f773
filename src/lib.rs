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

//! Tetralog is a leveled logging facility for desktop applications.
//!
//! # Overview
//!
//! A [`Logger`] routes each record to two independent sinks, an interactive console and a log
//! file, each with its own minimum [`Level`]. On startup the log files are rotated through a
//! window of four generations (see [`rotate`]), so the logs of the last few runs stay on disk.
//!
//! Records carry the call site they were emitted from. The per-level methods capture it
//! through `#[track_caller]`, the macros through `file!()` and `line!()`.
//!
//! # Examples
//!
//! An explicitly passed logger:
//!
//! ```
//! use tetralog::Level;
//! use tetralog::Logger;
//!
//! let logs = tempfile::tempdir().unwrap();
//! let logger = Logger::builder()
//!     .console_level(Level::Info)
//!     .file_level(Level::Debug)
//!     .logs_dir(logs.path())
//!     .build();
//!
//! logger.info("hello world");
//! tetralog::alert!(logger, "update {} available", "1.2.0");
//!
//! logger.dispose();
//! ```
//!
//! A process-wide logger is available through [`global`].

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod console;
pub mod global;
pub mod panic_hook;
pub mod rotate;

mod bridge;
mod clock;
mod error;
mod file;
mod level;
mod logger;
mod macros;
mod record;

pub use self::error::Error;
pub use self::level::Level;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::record::Location;
pub use self::record::Record;
