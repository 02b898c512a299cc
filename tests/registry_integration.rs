//! 注册表端到端测试：双写、级别过滤、并发与回读

use modlog::{LogLevel, LogRegistry, ModLogConfig};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// 拆出一行中的 (level, module, basename, line, message)
fn parse_line(line: &str) -> (String, String, String, u32, String) {
    let (timestamp, rest) = line.split_once("] [").expect("timestamp prefix");
    assert_eq!(timestamp.len(), "[YYYY-MM-DD HH:MM:SS.mmm".len());
    let (level, rest) = rest.split_once("] [").unwrap();
    let (module, rest) = rest.split_once("] ").unwrap();
    let (location, message) = rest.split_once(" - ").unwrap();
    let (file, line_no) = location.rsplit_once(':').unwrap();
    (
        level.to_string(),
        module.to_string(),
        file.to_string(),
        line_no.parse().unwrap(),
        message.to_string(),
    )
}

#[test]
fn planner_warning_lands_in_both_files() {
    let temp_dir = TempDir::new().unwrap();
    let registry = LogRegistry::with_directory(temp_dir.path());

    registry.write_log(
        "Planner",
        LogLevel::Warn,
        "planner.cpp",
        42,
        "value out of range",
    );

    for file in ["Planner.log", "ALL_LOGS_SUMMARY.log"] {
        let lines = read_lines(&temp_dir.path().join(file));
        assert_eq!(lines.len(), 1, "{}", file);
        assert!(lines[0].ends_with("] [WARN] [Planner] planner.cpp:42 - value out of range"));
    }
}

#[test]
fn fields_round_trip_through_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let registry = LogRegistry::with_directory(temp_dir.path());

    registry.write_log(
        "Perception",
        LogLevel::Error,
        "/home/robot/src/perception/lidar_driver.cpp",
        1337,
        "lost 3 packets: checksum [0x1f] - retrying",
    );

    let module_line = &read_lines(&temp_dir.path().join("Perception.log"))[0];
    let summary_line = &read_lines(&temp_dir.path().join("ALL_LOGS_SUMMARY.log"))[0];

    let expected = (
        "ERROR".to_string(),
        "Perception".to_string(),
        "lidar_driver.cpp".to_string(),
        1337,
        "lost 3 packets: checksum [0x1f] - retrying".to_string(),
    );
    assert_eq!(parse_line(module_line), expected);
    assert_eq!(parse_line(summary_line), expected);
}

#[test]
fn module_minimum_does_not_affect_summary() {
    let temp_dir = TempDir::new().unwrap();
    let config = ModLogConfig::with_directory(temp_dir.path()).module_level("Ctrl", LogLevel::Warn);
    let registry = LogRegistry::new(config);

    for level in LogLevel::ALL {
        registry.write_log("Ctrl", level, "ctrl.rs", 1, "tick");
    }

    let module_levels: Vec<String> = read_lines(&temp_dir.path().join("Ctrl.log"))
        .iter()
        .map(|line| parse_line(line).0)
        .collect();
    assert_eq!(module_levels, ["WARN", "ERROR"]);

    let summary_levels: Vec<String> = read_lines(&temp_dir.path().join("ALL_LOGS_SUMMARY.log"))
        .iter()
        .map(|line| parse_line(line).0)
        .collect();
    assert_eq!(summary_levels, ["DEBUG", "INFO", "WARN", "ERROR"]);
}

#[test]
fn reopening_the_directory_appends() {
    let temp_dir = TempDir::new().unwrap();

    for run in 0..3 {
        let registry = LogRegistry::with_directory(temp_dir.path());
        registry.write_log("Main", LogLevel::Info, "main.rs", 1, &format!("run {}", run));
    }

    assert_eq!(read_lines(&temp_dir.path().join("Main.log")).len(), 3);
    assert_eq!(
        read_lines(&temp_dir.path().join("ALL_LOGS_SUMMARY.log")).len(),
        3
    );
}

#[test]
fn hundred_threads_ten_modules() {
    const THREADS: usize = 100;
    const RECORDS: usize = 100;
    const MODULES: usize = 10;

    let temp_dir = TempDir::new().unwrap();
    let registry = LogRegistry::with_directory(temp_dir.path());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let module = format!("Module{}", t % MODULES);
                for i in 0..RECORDS {
                    registry.write_log(
                        &module,
                        LogLevel::Info,
                        "worker.rs",
                        i as u32,
                        &format!("thread {} record {}", t, i),
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let threads_per_module = THREADS / MODULES;
    for m in 0..MODULES {
        let module = format!("Module{}", m);
        let lines = read_lines(&temp_dir.path().join(format!("{}.log", module)));
        assert_eq!(lines.len(), RECORDS * threads_per_module);

        let mut per_thread: HashMap<String, usize> = HashMap::new();
        for line in &lines {
            let (level, parsed_module, file, _, message) = parse_line(line);
            assert_eq!(level, "INFO");
            assert_eq!(parsed_module, module);
            assert_eq!(file, "worker.rs");
            let thread_id = message.split(' ').nth(1).unwrap().to_string();
            *per_thread.entry(thread_id).or_default() += 1;
        }
        assert_eq!(per_thread.len(), threads_per_module);
        assert!(per_thread.values().all(|&count| count == RECORDS));
    }

    let summary = read_lines(&temp_dir.path().join("ALL_LOGS_SUMMARY.log"));
    assert_eq!(summary.len(), THREADS * RECORDS);
    for line in &summary {
        parse_line(line);
    }

    let diag = registry.diagnostics();
    assert_eq!(diag.loggers_created, MODULES as u64);
    assert_eq!(diag.records_dispatched, (THREADS * RECORDS) as u64);
    assert_eq!(diag.module_lines_written, (THREADS * RECORDS) as u64);
    assert_eq!(diag.summary_lines_written, (THREADS * RECORDS) as u64);
    assert_eq!(diag.write_failures, 0);
}

#[test]
fn concurrent_get_logger_returns_one_instance() {
    let temp_dir = TempDir::new().unwrap();
    let registry = LogRegistry::with_directory(temp_dir.path());

    let barrier = Arc::new(std::sync::Barrier::new(32));
    let handles: Vec<_> = (0..32)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.get_logger("Fresh").unwrap()
            })
        })
        .collect();

    let loggers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(loggers.iter().all(|l| Arc::ptr_eq(l, &loggers[0])));
    assert_eq!(registry.diagnostics().loggers_created, 1);
}

#[test]
fn export_lists_summary_then_modules() {
    let temp_dir = TempDir::new().unwrap();
    let registry = LogRegistry::with_directory(temp_dir.path());
    registry.write_log("Zeta", LogLevel::Info, "z.rs", 1, "z");
    registry.write_log("Alpha", LogLevel::Info, "a.rs", 1, "a");

    let mut out = Vec::new();
    registry.export_logs_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        format!("Logs exported to: {}", temp_dir.path().display())
    );
    assert!(lines[1].ends_with("ALL_LOGS_SUMMARY.log"));
    assert!(lines[2].ends_with("Alpha.log"));
    assert!(lines[3].ends_with("Zeta.log"));
}
