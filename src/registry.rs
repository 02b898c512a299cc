//! 日志注册表
//!
//! `LogRegistry` 持有模块名到 [`FileLogger`] 的映射以及一个汇总记录器。
//! 两级锁：
//!
//! - 注册表锁只保护映射本身，仅在查找或创建模块记录器、导出快照时持有；
//! - 每个 `FileLogger` 自己的锁只在写一行时持有。
//!
//! 因此写模块 A 的线程永远不会阻塞写模块 B 的线程。

use crate::config::{module_file_name, ModLogConfig};
use crate::core::level::LogLevel;
use crate::core::record::LogRecord;
use crate::diagnostics::{Diagnostics, DiagnosticsSnapshot};
use crate::env_config::{DirectorySource, EnvConfig};
use crate::error::{ModLogError, Result};
use crate::shutdown::{ExportGuard, ShutdownState};
use crate::sinks::file_logger::FileLogger;
use crate::utils::FileTools;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// 一次导出的结果：日志目录以及所有日志文件的路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub directory: PathBuf,
    pub summary: PathBuf,
    /// 按模块名排序
    pub modules: Vec<PathBuf>,
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Logs exported to: {}", self.directory.display())?;
        writeln!(f, "  * Summary: {}", self.summary.display())?;
        for path in &self.modules {
            writeln!(f, "  - {}", path.display())?;
        }
        Ok(())
    }
}

/// 日志注册表
#[derive(Debug)]
pub struct LogRegistry {
    /// 基础目录，构造后不变
    base_directory: PathBuf,
    directory_source: DirectorySource,
    config: ModLogConfig,
    /// 汇总记录器，先于任何模块记录器创建
    summary: Arc<FileLogger>,
    loggers: Mutex<HashMap<String, Arc<FileLogger>>>,
    /// 已在标准错误上报过创建失败的模块名
    reported_failures: Mutex<HashSet<String>>,
    diagnostics: Diagnostics,
    /// 退出导出是否已经执行
    shutdown_exported: AtomicBool,
}

impl LogRegistry {
    /// 创建注册表
    ///
    /// 解析并创建日志目录，然后打开汇总文件。目录创建失败不致命：
    /// 之后的文件打开会失败，相应写入变为空操作。
    pub fn new(config: ModLogConfig) -> Arc<Self> {
        let (base_directory, directory_source) = EnvConfig::resolve_log_directory(&config);

        if let Err(e) = FileTools::ensure_directory_exists(&base_directory) {
            tracing::warn!(
                "Failed to create log directory {}: {}",
                base_directory.display(),
                e
            );
        }

        let diagnostics = Diagnostics::new();
        let summary = FileLogger::new(
            base_directory.join(&config.summary_file_name),
            LogLevel::Debug,
        );
        if !summary.is_open() {
            diagnostics.increment_open_failures();
        }

        tracing::debug!(
            "modlog registry at {} ({:?})",
            base_directory.display(),
            directory_source
        );

        Arc::new(Self {
            base_directory,
            directory_source,
            config,
            summary: Arc::new(summary),
            loggers: Mutex::new(HashMap::new()),
            reported_failures: Mutex::new(HashSet::new()),
            diagnostics,
            shutdown_exported: AtomicBool::new(false),
        })
    }

    /// 校验配置后创建注册表；目录或汇总文件不可用时返回错误
    pub fn try_new(config: ModLogConfig) -> Result<Arc<Self>> {
        crate::config::validate_config(&config)?;
        let (directory, _) = EnvConfig::resolve_log_directory(&config);
        FileTools::ensure_directory_exists(&directory)?;

        let registry = Self::new(config);
        if !registry.summary.is_open() {
            return Err(ModLogError::invalid_path(format!(
                "无法打开汇总日志: {}",
                registry.summary.file_path().display()
            )));
        }
        Ok(registry)
    }

    /// 使用默认配置，目录取自环境变量
    pub fn from_env() -> Arc<Self> {
        Self::new(ModLogConfig::default())
    }

    /// 使用固定目录
    pub fn with_directory(directory: impl Into<PathBuf>) -> Arc<Self> {
        Self::new(ModLogConfig::with_directory(directory))
    }

    /// 获取模块记录器，首次使用时按配置的最小级别创建
    pub fn get_logger(&self, module: &str) -> Option<Arc<FileLogger>> {
        self.get_logger_with_level(module, self.config.level_for(module))
    }

    /// 获取模块记录器，首次使用时以 `minimum_level` 创建
    ///
    /// 已存在的记录器原样返回，`minimum_level` 被忽略。文件打开失败时不注册、
    /// 返回 `None`，下一次调用会重新尝试；同一模块名的失败只在标准错误上报一次。
    pub fn get_logger_with_level(
        &self,
        module: &str,
        minimum_level: LogLevel,
    ) -> Option<Arc<FileLogger>> {
        let mut loggers = self.lock_loggers();

        if let Some(logger) = loggers.get(module) {
            return Some(Arc::clone(logger));
        }

        let file_name = module_file_name(module);
        if !FileTools::is_plain_file_name(&file_name) {
            self.report_failure_once(module, || {
                format!("Error: Invalid module name for log file: {:?}", module)
            });
            return None;
        }

        let file_path = self.base_directory.join(&file_name);
        let logger = match FileLogger::try_new(&file_path, minimum_level) {
            Ok(logger) => Arc::new(logger),
            Err(e) => {
                self.report_failure_once(module, || {
                    format!("Error: Cannot open log file: {}: {}", file_path.display(), e)
                });
                return None;
            }
        };
        loggers.insert(module.to_string(), Arc::clone(&logger));
        self.diagnostics.increment_loggers_created();
        Some(logger)
    }

    /// 汇总记录器，构造后总是存在
    pub fn summary_logger(&self) -> &Arc<FileLogger> {
        &self.summary
    }

    /// 把一条记录同时写入模块文件和汇总文件
    ///
    /// 两次写入相互独立：模块记录器不可用时记录仍会进入汇总文件。
    /// 从不返回错误、从不 panic。
    pub fn write_log(
        &self,
        module: &str,
        level: LogLevel,
        source_file: &str,
        source_line: u32,
        message: &str,
    ) {
        self.diagnostics.increment_records_dispatched();
        let record = LogRecord::new(level, module, source_file, source_line, message);

        match self.get_logger(module) {
            Some(logger) => self
                .diagnostics
                .record_module_outcome(logger.write_record(&record)),
            None => self.diagnostics.increment_records_without_module_file(),
        }

        self.diagnostics
            .record_summary_outcome(self.summary.write_record(&record));
    }

    /// 向标准输出报告日志目录与所有日志文件
    ///
    /// 只做报告，不关闭任何文件；可以重复调用。
    pub fn export_logs(&self) -> ExportReport {
        let report = self.export_report();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let _ = write!(out, "{}", report).and_then(|_| out.flush());
        report
    }

    /// 把导出报告写入任意输出
    pub fn export_logs_to<W: Write>(&self, out: &mut W) -> io::Result<ExportReport> {
        let report = self.export_report();
        write!(out, "{}", report)?;
        out.flush()?;
        Ok(report)
    }

    /// 在注册表锁内生成路径快照
    pub fn export_report(&self) -> ExportReport {
        let mut entries: Vec<(String, PathBuf)> = self
            .lock_loggers()
            .iter()
            .map(|(name, logger)| (name.clone(), logger.file_path().to_path_buf()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let modules = entries.into_iter().map(|(_, path)| path).collect();

        self.diagnostics.increment_exports();
        tracing::info!("Exported logs in {}", self.base_directory.display());

        ExportReport {
            directory: self.base_directory.clone(),
            summary: self.summary.file_path().to_path_buf(),
            modules,
        }
    }

    /// 退出时的导出，整个注册表生命周期内只执行一次
    ///
    /// 第一次调用导出并返回报告，之后返回 `None`。
    pub fn shutdown_export(&self) -> Option<ExportReport> {
        if self.shutdown_exported.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(self.export_logs())
    }

    pub fn shutdown_state(&self) -> ShutdownState {
        if self.shutdown_exported.load(Ordering::SeqCst) {
            ShutdownState::Exported
        } else {
            ShutdownState::Running
        }
    }

    /// 创建作用域守卫，离开作用域时导出一次
    pub fn export_guard(self: &Arc<Self>) -> ExportGuard {
        ExportGuard::new(Arc::clone(self))
    }

    pub fn log_directory(&self) -> &Path {
        &self.base_directory
    }

    /// 日志目录取自哪里
    pub fn directory_source(&self) -> DirectorySource {
        self.directory_source
    }

    pub fn config(&self) -> &ModLogConfig {
        &self.config
    }

    /// 已注册的模块名，已排序
    pub fn module_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock_loggers().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn diagnostics(&self) -> DiagnosticsSnapshot {
        self.diagnostics.snapshot()
    }

    fn report_failure_once<F: FnOnce() -> String>(&self, module: &str, message: F) {
        self.diagnostics.increment_open_failures();
        let first = self
            .reported_failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(module.to_string());
        if first {
            eprintln!("{}", message());
        }
    }

    fn lock_loggers(&self) -> MutexGuard<'_, HashMap<String, Arc<FileLogger>>> {
        self.loggers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
