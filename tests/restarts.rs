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
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;
use tetralog::Level;
use tetralog::Logger;
use tetralog::console::Captured;
use tetralog::rotate::GENERATIONS;
use tetralog::rotate::Rotation;

fn run(logs: &TempDir, message: &str) {
    let logger = Logger::builder()
        .console(Captured::default())
        .logs_dir(logs.path())
        .build();
    assert!(logger.is_file_sink_enabled());
    logger.info(message);
    logger.dispose();
}

fn read(logs: &TempDir, index: usize) -> String {
    fs::read_to_string(Rotation::new(logs.path()).generation(index)).unwrap()
}

#[test]
fn test_generations_follow_application_runs() {
    let logs = TempDir::new().expect("failed to create a temporary directory");

    for run_index in 0..6 {
        run(&logs, &format!("run {run_index}"));
    }

    let mut names = fs::read_dir(logs.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect::<Vec<_>>();
    names.sort();
    assert_eq!(names, GENERATIONS);

    for (index, run_index) in [(0, 5), (1, 4), (2, 3), (3, 2)] {
        let content = read(&logs, index);
        assert!(
            content.ends_with(&format!(" run {run_index}\n")),
            "generation {index}: {content}"
        );
    }
}

#[test]
fn test_file_line_format() {
    let logs = TempDir::new().expect("failed to create a temporary directory");
    let logger = Logger::builder()
        .console(Captured::default())
        .logs_dir(logs.path())
        .build();

    let line = line!() + 1;
    logger.error("oops");
    logger.log_at(Level::Info, None, "no call site");
    logger.dispose();

    let content = read(&logs, 0);
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);

    // [YYYY-MM-DDTHH:MM:SS]
    let (stamp, body) = lines[0].split_at(21);
    assert!(stamp.starts_with('[') && stamp.ends_with(']'), "{stamp}");
    assert_eq!(&stamp[11..12], "T");
    assert_eq!(body, format!("[ERROR][restarts:{line}] oops"));

    assert_eq!(&lines[1][21..], " no call site");
}

#[test]
fn test_concurrent_lines_do_not_interleave() {
    let logs = TempDir::new().expect("failed to create a temporary directory");
    let logger = Arc::new(
        Logger::builder()
            .console_level(Level::Fatal)
            .console(Captured::default())
            .logs_dir(logs.path())
            .build(),
    );

    let handles = (0..8)
        .map(|worker| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    logger.warn(format!("worker {worker} message {i} {}", "x".repeat(64)));
                }
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.join().unwrap();
    }
    logger.dispose();

    let content = read(&logs, 0);
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 8 * 200);
    for line in lines {
        assert!(line.contains("[WARN][restarts:"), "{line}");
        assert!(line.ends_with(&"x".repeat(64)), "{line}");
    }
}

#[test]
fn test_second_instance_leaves_running_logs_alone() {
    let logs = TempDir::new().expect("failed to create a temporary directory");
    let first = Logger::builder()
        .console(Captured::default())
        .logs_dir(logs.path())
        .build();
    first.info("first before");

    let captured = Captured::default();
    let second = Logger::builder()
        .console(captured.clone())
        .push_diagnostics(false)
        .logs_dir(logs.path())
        .build();
    assert!(first.is_file_sink_enabled());
    assert!(!second.is_file_sink_enabled());
    let warnings = captured.take();
    assert_eq!(warnings.len(), 1);
    assert!(
        warnings[0].text.ends_with("is in use by another instance"),
        "{}",
        warnings[0].text
    );

    first.info("first after");
    second.info("second");

    let current = read(&logs, 0);
    assert!(current.contains(" first before\n"), "{current}");
    assert!(current.ends_with(" first after\n"), "{current}");
    assert!(!current.contains("second"), "{current}");
    assert!(!Rotation::new(logs.path()).generation(1).exists());

    // once the first instance lets go, the next start rotates normally
    first.dispose();
    second.dispose();
    run(&logs, "third");
    assert!(read(&logs, 1).ends_with(" first after\n"));
    assert!(read(&logs, 0).ends_with(" third\n"));
}
