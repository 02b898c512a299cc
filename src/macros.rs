//! 调用点宏
//!
//! 宏负责格式化消息并捕获 `file!()` 与 `line!()`，然后调用
//! [`LogRegistry::write_log`](crate::LogRegistry::write_log)。第一个参数是任何能
//! 解引用到 `LogRegistry` 的表达式：`Arc<LogRegistry>`、`ExportGuard`、
//! `modlog::global()` 等。
//!
//! ```no_run
//! use modlog::{minfo, modlog, LogLevel, LogRegistry};
//!
//! let registry = LogRegistry::with_directory("/tmp/robot_logs");
//! modlog!(registry, "Planner", LogLevel::Warn, "value out of range: {}", 3.5);
//! minfo!(registry, "Controller", "loop closed in {} ms", 12);
//! ```

/// 以指定级别写一条记录
#[macro_export]
macro_rules! modlog {
    ($registry:expr, $module:expr, $level:expr, $($arg:tt)+) => {{
        let message = ::std::format!($($arg)+);
        $registry.write_log($module, $level, ::std::file!(), ::std::line!(), &message);
    }};
}

/// `DEBUG` 级别
#[macro_export]
macro_rules! mdebug {
    ($registry:expr, $module:expr, $($arg:tt)+) => {
        $crate::modlog!($registry, $module, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// `INFO` 级别
#[macro_export]
macro_rules! minfo {
    ($registry:expr, $module:expr, $($arg:tt)+) => {
        $crate::modlog!($registry, $module, $crate::LogLevel::Info, $($arg)+)
    };
}

/// `WARN` 级别
#[macro_export]
macro_rules! mwarn {
    ($registry:expr, $module:expr, $($arg:tt)+) => {
        $crate::modlog!($registry, $module, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// `ERROR` 级别
#[macro_export]
macro_rules! merror {
    ($registry:expr, $module:expr, $($arg:tt)+) => {
        $crate::modlog!($registry, $module, $crate::LogLevel::Error, $($arg)+)
    };
}
