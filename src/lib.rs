//! modlog - 按模块分文件的日志库
//!
//! modlog 把每条日志记录同时写入该模块专属的 `<MODULE>.log` 与一个按到达顺序
//! 汇总所有模块的 `ALL_LOGS_SUMMARY.log`，不触碰终端输出。每次写入都在记录器
//! 自己的锁内完成格式化与刷新，进程崩溃前写入的每一行都已落盘。
//!
//! 日志行格式：
//!
//! ```text
//! [YYYY-MM-DD HH:MM:SS.mmm] [LEVEL] [MODULE] basename:line - message
//! ```
//!
//! # 快速开始
//!
//! ```no_run
//! use modlog::{minfo, mwarn, LogLevel, LogRegistry};
//!
//! fn main() {
//!     // 目录取自 LOG_DIR / ROS_WORKSPACE，否则回退到固定路径
//!     let registry = LogRegistry::from_env();
//!     let _guard = registry.export_guard();
//!
//!     minfo!(registry, "Planner", "planning horizon {} s", 4.0);
//!     mwarn!(registry, "Controller", "saturated at {}", 1.2);
//!     registry.write_log("Planner", LogLevel::Error, file!(), line!(), "no path found");
//! }
//! ```
//!
//! # 进程级实例
//!
//! ```no_run
//! use modlog::LogLevel;
//!
//! fn main() -> modlog::Result<()> {
//!     let _guard = modlog::init()?;
//!     modlog::write_log("Planner", LogLevel::Info, file!(), line!(), "started");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod env_config;
pub mod error;
pub mod macros;
pub mod registry;
pub mod shutdown;
pub mod sinks;
pub mod utils;

// 重新导出主要类型
pub use config::{load_config_from_file, load_config_from_str, validate_config, ModLogConfig};
pub use diagnostics::DiagnosticsSnapshot;
pub use env_config::DirectorySource;
pub use error::{ModLogError, Result};
pub use registry::{ExportReport, LogRegistry};
pub use shutdown::{ExportGuard, ShutdownState};

// 重新导出核心功能
pub use crate::core::layer::ModuleFileLayer;
pub use crate::core::level::LogLevel;
pub use sinks::file_logger::{FileLogger, WriteOutcome};

use once_cell::sync::OnceCell;
use std::sync::Arc;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 进程级注册表实例
static GLOBAL_REGISTRY: OnceCell<Arc<LogRegistry>> = OnceCell::new();

/// 使用默认配置初始化进程级注册表
///
/// 返回的守卫离开作用域时导出一次日志位置。已初始化时返回
/// [`ModLogError::AlreadyInitialized`]。
pub fn init() -> Result<ExportGuard> {
    init_with_config(ModLogConfig::default())
}

/// 使用指定配置初始化进程级注册表
pub fn init_with_config(config: ModLogConfig) -> Result<ExportGuard> {
    validate_config(&config)?;

    let mut created = false;
    let registry = GLOBAL_REGISTRY.get_or_init(|| {
        created = true;
        LogRegistry::new(config)
    });
    if !created {
        return Err(ModLogError::AlreadyInitialized);
    }

    Ok(registry.export_guard())
}

/// 进程级注册表
///
/// 未调用 `init*` 时在第一次使用时以默认配置创建。
pub fn global() -> &'static Arc<LogRegistry> {
    GLOBAL_REGISTRY.get_or_init(LogRegistry::from_env)
}

/// 进程级注册表是否已经创建
pub fn is_initialized() -> bool {
    GLOBAL_REGISTRY.get().is_some()
}

/// 向进程级注册表写一条记录
///
/// 同时写入模块文件与汇总文件。从不返回错误。
pub fn write_log(module: &str, level: LogLevel, source_file: &str, source_line: u32, message: &str) {
    global().write_log(module, level, source_file, source_line, message);
}

/// 导出进程级注册表的日志位置
///
/// 与 `init` 返回的守卫共用同一个"只导出一次"的标记；注册表从未创建或已经
/// 导出过时返回 `None`。
pub fn shutdown() -> Option<ExportReport> {
    GLOBAL_REGISTRY
        .get()
        .and_then(|registry| registry.shutdown_export())
}
