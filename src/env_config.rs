//! 环境变量配置模块
//!
//! 决定日志基础目录。优先级：
//!
//! 1. 配置中显式给出的 `directory`
//! 2. 日志目录变量（默认 `LOG_DIR`）
//! 3. 工作区变量（默认 `ROS_WORKSPACE`）拼接 `workspace_subdir`
//! 4. `fallback_directory`
//!
//! 环境只在注册表构造时读取一次。空字符串视为未设置。

use crate::config::ModLogConfig;
use std::env;
use std::path::PathBuf;

/// 日志目录的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorySource {
    Config,
    LogDirEnv,
    WorkspaceEnv,
    Fallback,
}

/// 环境变量配置管理器
pub struct EnvConfig;

impl EnvConfig {
    /// 从进程环境解析日志目录
    pub fn resolve_log_directory(config: &ModLogConfig) -> (PathBuf, DirectorySource) {
        Self::resolve_with(config, |key| env::var(key).ok())
    }

    /// 用任意查找函数解析日志目录
    pub fn resolve_with<F>(config: &ModLogConfig, lookup: F) -> (PathBuf, DirectorySource)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(directory) = &config.directory {
            return (directory.clone(), DirectorySource::Config);
        }

        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(dir) = non_empty(&config.log_dir_env) {
            return (PathBuf::from(dir), DirectorySource::LogDirEnv);
        }

        if let Some(workspace) = non_empty(&config.workspace_env) {
            return (
                PathBuf::from(workspace).join(&config.workspace_subdir),
                DirectorySource::WorkspaceEnv,
            );
        }

        (config.fallback_directory.clone(), DirectorySource::Fallback)
    }
}
