//! 日志记录与行格式
//!
//! 每条记录只在调用栈上存在，格式化为一行固定布局的文本：
//!
//! ```text
//! [YYYY-MM-DD HH:MM:SS.mmm] [LEVEL] [MODULE] basename:line - message
//! ```

use crate::core::level::LogLevel;
use chrono::{DateTime, Local};
use std::fmt;

/// 时间戳格式，毫秒截断而非四舍五入
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// 当前本地时间的时间戳字符串
pub fn current_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// 按固定格式输出时间戳
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// 取路径的最后一段，`/` 与 `\` 都视为分隔符
pub fn basename(path: &str) -> &str {
    match path.rfind(|c: char| c == '/' || c == '\\') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// 一条日志记录
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    pub module: &'a str,
    pub source_file: &'a str,
    pub source_line: u32,
    pub message: &'a str,
}

impl<'a> LogRecord<'a> {
    pub fn new(
        level: LogLevel,
        module: &'a str,
        source_file: &'a str,
        source_line: u32,
        message: &'a str,
    ) -> Self {
        Self {
            level,
            module,
            source_file,
            source_line,
            message,
        }
    }

    /// 用给定时间戳格式化为一行（含换行符）
    pub fn format_line(&self, timestamp: &str) -> String {
        format!("[{}] {}\n", timestamp, self)
    }

    /// 用当前时间格式化为一行（含换行符）
    pub fn format_now(&self) -> String {
        self.format_line(&current_timestamp())
    }
}

/// 不含时间戳的部分：`[LEVEL] [MODULE] basename:line - message`
impl fmt::Display for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {}:{} - {}",
            self.level,
            self.module,
            basename(self.source_file),
            self.source_line,
            self.message
        )
    }
}
