//! 单文件日志记录器
//!
//! 每个 `FileLogger` 独占一个以追加模式打开的文件。写入在记录器自己的锁内
//! 完成格式化、写入与刷新，因此进程崩溃前已返回的每一行都已落盘。

use crate::core::level::LogLevel;
use crate::core::record::LogRecord;
use crate::error::Result;
use crate::utils::FileTools;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// 一次写入的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// 已写入并刷新
    Written,
    /// 级别低于最小级别，被丢弃
    Filtered,
    /// 文件未能打开，记录器处于关闭状态
    Closed,
    /// 写入或刷新时发生 I/O 错误
    Failed,
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written)
    }
}

/// 单文件日志记录器
#[derive(Debug)]
pub struct FileLogger {
    /// 日志文件路径，构造后不变
    file_path: PathBuf,
    /// 最小级别
    minimum_level: LogLevel,
    /// 打开失败时为 `None`，之后永不重试
    writer: Option<Mutex<BufWriter<File>>>,
}

impl FileLogger {
    /// 以追加模式打开 `file_path`
    ///
    /// 打开失败时向标准错误报告一次，记录器随后保持关闭，所有写入都是空操作。
    pub fn new(file_path: impl Into<PathBuf>, minimum_level: LogLevel) -> Self {
        let file_path = file_path.into();
        match FileTools::open_file_append(&file_path) {
            Ok(file) => Self::from_file(file_path, minimum_level, file),
            Err(e) => {
                eprintln!(
                    "Error: Cannot open log file: {}: {}",
                    file_path.display(),
                    e
                );
                Self {
                    file_path,
                    minimum_level,
                    writer: None,
                }
            }
        }
    }

    /// 与 [`FileLogger::new`] 相同，但把打开错误返回给调用者
    pub fn try_new(file_path: impl Into<PathBuf>, minimum_level: LogLevel) -> Result<Self> {
        let file_path = file_path.into();
        let file = FileTools::open_file_append(&file_path)?;
        Ok(Self::from_file(file_path, minimum_level, file))
    }

    fn from_file(file_path: PathBuf, minimum_level: LogLevel, file: File) -> Self {
        tracing::debug!("Opened log file {}", file_path.display());
        Self {
            file_path,
            minimum_level,
            writer: Some(Mutex::new(BufWriter::new(file))),
        }
    }

    /// 写入一条记录
    ///
    /// 从不返回错误、从不 panic；结果仅用于统计。
    pub fn write(
        &self,
        level: LogLevel,
        module: &str,
        source_file: &str,
        source_line: u32,
        message: &str,
    ) -> WriteOutcome {
        self.write_record(&LogRecord::new(
            level,
            module,
            source_file,
            source_line,
            message,
        ))
    }

    /// 写入一条已构造的记录
    pub fn write_record(&self, record: &LogRecord<'_>) -> WriteOutcome {
        if record.level < self.minimum_level {
            return WriteOutcome::Filtered;
        }
        let Some(writer) = self.writer.as_ref() else {
            return WriteOutcome::Closed;
        };

        let mut guard = lock_recovering(writer);
        // 时间戳在锁内生成，同一文件内的时间戳随行序单调不减
        let line = record.format_now();
        let result = guard
            .write_all(line.as_bytes())
            .and_then(|_| guard.flush());

        match result {
            Ok(()) => WriteOutcome::Written,
            Err(_) => WriteOutcome::Failed,
        }
    }

    /// 该级别的记录是否会被写入
    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.minimum_level && self.is_open()
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn minimum_level(&self) -> LogLevel {
        self.minimum_level
    }
}

/// 锁中毒后继续使用内部数据；日志不能因为别的线程 panic 而失效
fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
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

    #[test]
    fn test_file_logger_creation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Planner.log");

        let logger = FileLogger::new(&path, LogLevel::Debug);
        assert!(logger.is_open());
        assert_eq!(logger.file_path(), path.as_path());
        assert_eq!(logger.minimum_level(), LogLevel::Debug);
        assert!(path.exists());
        assert!(read_lines(&path).is_empty());
    }

    #[test]
    fn test_write_formats_one_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Planner.log");
        let logger = FileLogger::new(&path, LogLevel::Debug);

        let outcome = logger.write(
            LogLevel::Warn,
            "Planner",
            "src/planner.cpp",
            42,
            "value out of range",
        );
        assert_eq!(outcome, WriteOutcome::Written);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with('['));
        assert_eq!(&lines[0][24..26], "] ");
        assert!(lines[0].ends_with("] [WARN] [Planner] planner.cpp:42 - value out of range"));
    }

    #[test]
    fn test_below_minimum_is_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Ctrl.log");
        let logger = FileLogger::new(&path, LogLevel::Warn);

        assert_eq!(
            logger.write(LogLevel::Debug, "Ctrl", "c.rs", 1, "debug"),
            WriteOutcome::Filtered
        );
        assert_eq!(
            logger.write(LogLevel::Info, "Ctrl", "c.rs", 2, "info"),
            WriteOutcome::Filtered
        );
        assert!(logger
            .write(LogLevel::Error, "Ctrl", "c.rs", 3, "error")
            .is_written());

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[ERROR] [Ctrl] c.rs:3 - error"));
    }

    #[test]
    fn test_open_failure_degrades_to_noop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no_such_dir").join("X.log");

        let logger = FileLogger::new(&path, LogLevel::Debug);
        assert!(!logger.is_open());
        assert!(!logger.accepts(LogLevel::Error));
        assert_eq!(
            logger.write(LogLevel::Error, "X", "x.rs", 1, "lost"),
            WriteOutcome::Closed
        );
        assert!(!path.exists());

        assert!(FileLogger::try_new(&path, LogLevel::Debug).is_err());
    }

    #[test]
    fn test_append_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Run.log");

        {
            let logger = FileLogger::new(&path, LogLevel::Debug);
            logger.write(LogLevel::Info, "Run", "r.rs", 1, "first run");
        }
        {
            let logger = FileLogger::try_new(&path, LogLevel::Debug).unwrap();
            logger.write(LogLevel::Info, "Run", "r.rs", 1, "second run");
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first run"));
        assert!(lines[1].ends_with("second run"));
    }

    #[test]
    fn test_line_is_visible_without_drop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Durable.log");
        let logger = FileLogger::new(&path, LogLevel::Debug);

        logger.write(LogLevel::Info, "Durable", "d.rs", 7, "flushed");
        // 记录器仍然存活，内容必须已经可见
        assert_eq!(read_lines(&path).len(), 1);
        drop(logger);
    }

    #[test]
    fn test_concurrent_writes_do_not_interleave() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Shared.log");
        let logger = Arc::new(FileLogger::new(&path, LogLevel::Debug));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for i in 0..200 {
                        let message = format!("thread {} record {} {}", t, i, "x".repeat(64));
                        logger.write(LogLevel::Info, "Shared", "s.rs", i, &message);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 8 * 200);
        for line in &lines {
            assert!(line.contains("] [INFO] [Shared] s.rs:"));
            assert!(line.ends_with(&"x".repeat(64)));
        }
    }
}
