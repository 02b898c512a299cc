//! 注册表的内部诊断计数。
//!
//! 记录路径从不报错，这些计数是观察"静默丢弃"究竟发生了多少次的唯一途径。

use crate::sinks::file_logger::WriteOutcome;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 内部诊断与指标数据结构。
///
/// 使用原子操作确保线程安全。
#[derive(Debug)]
pub struct Diagnostics {
    /// 注册表创建时间
    start_time: Instant,

    /// `write_log` 调用次数
    records_dispatched: AtomicU64,

    /// 写入模块文件的行数
    module_lines_written: AtomicU64,

    /// 写入汇总文件的行数
    summary_lines_written: AtomicU64,

    /// 因低于最小级别而被模块记录器丢弃的记录数
    records_filtered: AtomicU64,

    /// 因模块记录器不可用而未写入模块文件的记录数
    records_without_module_file: AtomicU64,

    /// 写入或刷新失败次数
    write_failures: AtomicU64,

    /// 创建成功的模块记录器数量
    loggers_created: AtomicU64,

    /// 文件打开失败次数（含汇总文件）
    open_failures: AtomicU64,

    /// `export_logs` 调用次数
    exports: AtomicU64,
}

/// 诊断数据的快照，用于外部查询。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsSnapshot {
    pub uptime: Duration,
    pub records_dispatched: u64,
    pub module_lines_written: u64,
    pub summary_lines_written: u64,
    pub records_filtered: u64,
    pub records_without_module_file: u64,
    pub write_failures: u64,
    pub loggers_created: u64,
    pub open_failures: u64,
    pub exports: u64,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// 创建新的诊断实例。
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            records_dispatched: AtomicU64::new(0),
            module_lines_written: AtomicU64::new(0),
            summary_lines_written: AtomicU64::new(0),
            records_filtered: AtomicU64::new(0),
            records_without_module_file: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            loggers_created: AtomicU64::new(0),
            open_failures: AtomicU64::new(0),
            exports: AtomicU64::new(0),
        }
    }

    pub fn increment_records_dispatched(&self) {
        self.records_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_loggers_created(&self) {
        self.loggers_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_open_failures(&self) {
        self.open_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_exports(&self) {
        self.exports.fetch_add(1, Ordering::Relaxed);
    }

    /// 模块记录器不存在（打开失败或模块名无效）
    pub fn increment_records_without_module_file(&self) {
        self.records_without_module_file
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 统计一次模块文件写入的结果
    pub fn record_module_outcome(&self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => {
                self.module_lines_written.fetch_add(1, Ordering::Relaxed);
            }
            WriteOutcome::Filtered => {
                self.records_filtered.fetch_add(1, Ordering::Relaxed);
            }
            WriteOutcome::Closed => self.increment_records_without_module_file(),
            WriteOutcome::Failed => {
                self.write_failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// 统计一次汇总文件写入的结果
    pub fn record_summary_outcome(&self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => {
                self.summary_lines_written.fetch_add(1, Ordering::Relaxed);
            }
            WriteOutcome::Failed => {
                self.write_failures.fetch_add(1, Ordering::Relaxed);
            }
            // 汇总记录器接受所有级别；关闭状态已计入 open_failures
            WriteOutcome::Filtered | WriteOutcome::Closed => {}
        }
    }

    /// 获取诊断数据的快照。
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            uptime: self.start_time.elapsed(),
            records_dispatched: self.records_dispatched.load(Ordering::Relaxed),
            module_lines_written: self.module_lines_written.load(Ordering::Relaxed),
            summary_lines_written: self.summary_lines_written.load(Ordering::Relaxed),
            records_filtered: self.records_filtered.load(Ordering::Relaxed),
            records_without_module_file: self
                .records_without_module_file
                .load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
            loggers_created: self.loggers_created.load(Ordering::Relaxed),
            open_failures: self.open_failures.load(Ordering::Relaxed),
            exports: self.exports.load(Ordering::Relaxed),
        }
    }
}
