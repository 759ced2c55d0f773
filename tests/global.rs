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

use std::fs;

use tempfile::TempDir;
use tetralog::Level;
use tetralog::LoggerBuilder;
use tetralog::console::Captured;
use tetralog::rotate::Rotation;

#[test]
fn test_default_logger_lifecycle() {
    // dispose before configure is a no-op
    tetralog::global::dispose();
    assert!(tetralog::global::logger().is_none());

    let logs = TempDir::new().expect("failed to create a temporary directory");
    let captured = Captured::default();
    let logger = tetralog::global::configure(
        LoggerBuilder::new()
            .console_level(Level::Warn)
            .console(captured.clone())
            .logs_dir(logs.path()),
    )
    .unwrap();
    assert!(std::ptr::eq(logger, tetralog::global::logger().unwrap()));

    let second = tetralog::global::configure(LoggerBuilder::new().console(Captured::default()));
    assert!(second.is_err());

    log::info!("from the log crate");
    log::error!("broken {}", "pipe");
    logger.info("direct");

    tetralog::global::dispose();
    tetralog::global::dispose();
    assert!(!logger.is_file_sink_enabled());

    let content = fs::read_to_string(Rotation::new(logs.path()).current()).unwrap();
    let bodies = content
        .lines()
        .map(|line| line.split_once(']').unwrap().1)
        .collect::<Vec<_>>();
    assert_eq!(bodies.len(), 3);
    assert!(bodies[0].starts_with("[global:"), "{}", bodies[0]);
    assert!(bodies[0].ends_with("] from the log crate"), "{}", bodies[0]);
    assert!(bodies[1].starts_with("[ERROR][global:"), "{}", bodies[1]);
    assert!(bodies[1].ends_with("] broken pipe"), "{}", bodies[1]);
    assert!(bodies[2].ends_with("] direct"), "{}", bodies[2]);

    let console = captured.take();
    assert_eq!(console.len(), 1);
    assert!(console[0].text.ends_with("] broken pipe"));
}
