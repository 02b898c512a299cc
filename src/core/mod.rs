//! modlog 核心模块
//!
//! 本模块包含日志级别、记录格式以及 tracing 桥接层。

pub mod layer;
pub mod level;
pub mod record;

// 重新导出核心类型
pub use layer::ModuleFileLayer;
pub use level::LogLevel;
pub use record::{basename, current_timestamp, LogRecord};
