//! 文件工具模块
//!
//! 提供日志目录与日志文件相关的辅助函数：目录创建、追加模式打开、
//! 文件名合法性检查。

use crate::error::{ModLogError, Result};
use std::fs::{self, File, OpenOptions};
use std::path::Path;

/// 文件工具结构体
///
/// 提供各种文件操作的静态方法
pub struct FileTools;

impl FileTools {
    /// 确保目录存在，如果不存在则创建
    ///
    /// # 参数
    ///
    /// * `path` - 目录路径
    ///
    /// # 返回值
    ///
    /// 成功时返回 `Ok(())`，路径被普通文件占用或创建失败时返回错误
    pub fn ensure_directory_exists<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();

        if !path.exists() {
            fs::create_dir_all(path)?
        } else if !path.is_dir() {
            return Err(ModLogError::IoError {
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("路径存在但不是目录: {}", path.display()),
                ),
            });
        }

        Ok(())
    }

    /// 以追加模式打开文件，文件不存在时创建
    ///
    /// 不会创建父目录；目录由注册表在构造时负责。
    pub fn open_file_append<P: AsRef<Path>>(file_path: P) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path.as_ref())
            .map_err(|e| ModLogError::IoError { source: e })
    }

    /// 检查名称能否直接作为日志目录下的单个文件名
    ///
    /// 拒绝空串、`.`、`..` 以及包含路径分隔符或 NUL 的名称。
    pub fn is_plain_file_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(|c: char| c == '/' || c == '\\' || c == '\0')
    }
}
