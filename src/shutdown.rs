//! 退出时导出
//!
//! `ExportGuard` 在作用域结束时对注册表调用一次 `export_logs`：正常返回、
//! 提前返回以及展开中的 panic 都会经过它。进程被强制终止时不会执行，
//! 此时只有逐行刷新保护已写入的内容。

use crate::registry::{ExportReport, LogRegistry};
use std::ops::Deref;
use std::sync::Arc;

/// 导出状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    /// 尚未导出
    Running,
    /// 已导出
    Exported,
}

/// 作用域导出守卫
///
/// 析构时调用 [`LogRegistry::shutdown_export`]。导出是否已发生记录在注册表上，
/// 同一注册表的多个守卫与 `modlog::shutdown` 合计只导出一次。
/// 可以解引用为 [`LogRegistry`]，持有守卫即可写日志。
#[derive(Debug)]
#[must_use = "dropping the guard immediately exports the logs"]
pub struct ExportGuard {
    registry: Arc<LogRegistry>,
}

impl ExportGuard {
    pub fn new(registry: Arc<LogRegistry>) -> Self {
        Self { registry }
    }

    /// 立即导出；之后再调用或析构都不会重复导出
    pub fn finish(&mut self) -> Option<ExportReport> {
        self.registry.shutdown_export()
    }

    pub fn state(&self) -> ShutdownState {
        self.registry.shutdown_state()
    }

    pub fn registry(&self) -> &Arc<LogRegistry> {
        &self.registry
    }
}

impl Deref for ExportGuard {
    type Target = LogRegistry;

    fn deref(&self) -> &LogRegistry {
        &self.registry
    }
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.finish();
    }
}
