// ==========================================
// 云安全基线管理系统 - 应用配置
// ==========================================
// 来源优先级: 环境变量 > 配置文件(JSON) > 默认值
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 环境变量键
pub mod env_keys {
    pub const DB_PATH: &str = "CLOUD_BASELINE_DB_PATH";
    pub const IMPORT_PATH: &str = "CLOUD_BASELINE_IMPORT_PATH";
    pub const EXPORT_PATH: &str = "CLOUD_BASELINE_EXPORT_PATH";
    pub const LOG_LEVEL: &str = "CLOUD_BASELINE_LOG_LEVEL";
}

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 文件路径
    pub path: String,
    /// busy_timeout（毫秒）
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: crate::db::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

/// 表格导入导出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabularConfig {
    /// 上传文件暂存目录
    pub import_path: PathBuf,
    /// 导出文件目录
    pub export_path: PathBuf,
}

impl Default for TabularConfig {
    fn default() -> Self {
        Self {
            import_path: PathBuf::from("./data/import"),
            export_path: PathBuf::from("./data/export"),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// 日志级别（EnvFilter 语法）
    pub level: String,
    /// 输出格式: text | json
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub tabular: TabularConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// 加载配置
    ///
    /// # 参数
    /// - path: 可选的 JSON 配置文件路径；None 时仅使用默认值
    ///
    /// # 返回
    /// - Ok(AppConfig): 已应用环境变量覆写的配置
    /// - Err(ConfigError): 文件读取或解析失败
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// 从 JSON 文件读取配置（缺省字段使用默认值）
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写（空值忽略）
    pub fn apply_env_overrides(&mut self) {
        if let Some(v) = read_env(env_keys::DB_PATH) {
            self.database.path = v;
        }
        if let Some(v) = read_env(env_keys::IMPORT_PATH) {
            self.tabular.import_path = PathBuf::from(v);
        }
        if let Some(v) = read_env(env_keys::EXPORT_PATH) {
            self.tabular.export_path = PathBuf::from(v);
        }
        if let Some(v) = read_env(env_keys::LOG_LEVEL) {
            self.log.level = v;
        }
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 获取默认数据库路径
///
/// 优先使用用户数据目录；拿不到时回退到当前目录
pub fn default_db_path() -> String {
    let mut path = PathBuf::from("./cloud_baseline.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("cloud-baseline");
        // best-effort: 目录创建失败时由打开数据库时报错
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("cloud_baseline.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_db_path() {
        let path = default_db_path();
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "database": {{ "path": "/tmp/x.db" }}, "log": {{ "format": "json" }} }}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database.path, "/tmp/x.db");
        assert_eq!(config.database.busy_timeout_ms, crate::db::DEFAULT_BUSY_TIMEOUT_MS);
        assert_eq!(config.log.format, "json");
        assert_eq!(config.log.level, "info");
        assert_eq!(config.tabular.export_path, PathBuf::from("./data/export"));
    }

    #[test]
    fn test_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        let result = AppConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::from_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
