//! 定义 modlog 的配置结构体。

use crate::core::level::LogLevel;
use crate::error::{ModLogError, Result};
use crate::utils::FileTools;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

// --- 辅助函数，用于提供配置项的默认值 ---
fn default_log_dir_env() -> String {
    "LOG_DIR".to_string()
}
fn default_workspace_env() -> String {
    "ROS_WORKSPACE".to_string()
}
fn default_workspace_subdir() -> PathBuf {
    PathBuf::from("logs/current")
}
fn default_fallback_directory() -> PathBuf {
    PathBuf::from("/tmp/two_stage_int_logs")
}
fn default_summary_file_name() -> String {
    "ALL_LOGS_SUMMARY.log".to_string()
}

/// 模块日志文件的扩展名
pub const MODULE_FILE_EXTENSION: &str = "log";

/// 模块日志文件名 `<module>.log`
pub fn module_file_name(module: &str) -> String {
    format!("{}.{}", module, MODULE_FILE_EXTENSION)
}

/// modlog 的顶层配置结构体。
///
/// 所有字段都有默认值，空的 TOML 文档即得到默认配置。
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModLogConfig {
    /// 显式指定的日志目录，优先级最高
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// 日志目录环境变量名
    #[serde(default = "default_log_dir_env")]
    pub log_dir_env: String,
    /// 工作区环境变量名
    #[serde(default = "default_workspace_env")]
    pub workspace_env: String,
    /// 拼接在工作区路径之后的子目录
    #[serde(default = "default_workspace_subdir")]
    pub workspace_subdir: PathBuf,
    /// 最后的回退目录
    #[serde(default = "default_fallback_directory")]
    pub fallback_directory: PathBuf,
    /// 汇总日志文件名
    #[serde(default = "default_summary_file_name")]
    pub summary_file_name: String,
    /// 未单独配置的模块使用的最小级别
    #[serde(default)]
    pub default_module_level: LogLevel,
    /// 按模块名配置的最小级别
    #[serde(default)]
    pub module_levels: HashMap<String, LogLevel>,
}

impl Default for ModLogConfig {
    fn default() -> Self {
        Self {
            directory: None,
            log_dir_env: default_log_dir_env(),
            workspace_env: default_workspace_env(),
            workspace_subdir: default_workspace_subdir(),
            fallback_directory: default_fallback_directory(),
            summary_file_name: default_summary_file_name(),
            default_module_level: LogLevel::default(),
            module_levels: HashMap::new(),
        }
    }
}

impl ModLogConfig {
    /// 使用固定目录的配置
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            ..Default::default()
        }
    }

    /// 设置某个模块的最小级别
    pub fn module_level(mut self, module: impl Into<String>, level: LogLevel) -> Self {
        self.module_levels.insert(module.into(), level);
        self
    }

    /// 设置默认模块最小级别
    pub fn default_module_level(mut self, level: LogLevel) -> Self {
        self.default_module_level = level;
        self
    }

    /// 模块的最小级别
    pub fn level_for(&self, module: &str) -> LogLevel {
        self.module_levels
            .get(module)
            .copied()
            .unwrap_or(self.default_module_level)
    }
}

/// 用于从 TOML 文件加载 `ModLogConfig` 的辅助函数。
pub fn load_config_from_file(path: &std::path::Path) -> Result<ModLogConfig> {
    if !path.exists() {
        return Err(ModLogError::ConfigFileMissing(
            path.to_string_lossy().into_owned(),
        ));
    }

    let config_str = std::fs::read_to_string(path)?;
    load_config_from_str(&config_str)
}

/// 用于从 TOML 字符串加载 `ModLogConfig` 的辅助函数。
pub fn load_config_from_str(config_str: &str) -> Result<ModLogConfig> {
    let config: ModLogConfig = toml::from_str(config_str)?;
    validate_config(&config)?;
    Ok(config)
}

/// 验证配置的有效性。
pub fn validate_config(config: &ModLogConfig) -> Result<()> {
    if !FileTools::is_plain_file_name(&config.summary_file_name) {
        return Err(ModLogError::InvalidPath(format!(
            "汇总日志文件名无效: {:?}",
            config.summary_file_name
        )));
    }

    for module in config.module_levels.keys() {
        if !FileTools::is_plain_file_name(&module_file_name(module)) {
            return Err(ModLogError::InvalidPath(format!(
                "模块名无效: {:?}",
                module
            )));
        }
    }

    if config.log_dir_env.is_empty() || config.workspace_env.is_empty() {
        return Err(ModLogError::config("环境变量名不能为空"));
    }

    Ok(())
}
