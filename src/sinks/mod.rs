//! modlog Sinks 模块
//!
//! 日志输出目标。目前只有一种：以追加模式写入单个文件的 [`FileLogger`]。

pub mod file_logger;

pub use file_logger::{FileLogger, WriteOutcome};
