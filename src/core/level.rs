//! 日志级别
//!
//! 四个固定级别，按严重程度全序排列：`Debug < Info < Warn < Error`。

use crate::error::ModLogError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// 日志级别枚举
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(try_from = "String")]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// 所有级别，从低到高
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// 写入日志行时使用的大写名称
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ModLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(ModLogError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ModLogError;

    fn try_from(value: String) -> Result<Self, ModLogError> {
        value.parse()
    }
}

impl From<tracing_core::Level> for LogLevel {
    /// `TRACE` 没有对应级别，并入 `DEBUG`
    fn from(level: tracing_core::Level) -> Self {
        match level {
            tracing_core::Level::TRACE | tracing_core::Level::DEBUG => LogLevel::Debug,
            tracing_core::Level::INFO => LogLevel::Info,
            tracing_core::Level::WARN => LogLevel::Warn,
            tracing_core::Level::ERROR => LogLevel::Error,
        }
    }
}
