// ==========================================
// 云安全基线管理系统 - 配置层
// ==========================================
// 职责: 应用配置加载（JSON 文件 + 环境变量覆写）
// 约束: 配置在进程启动时构造一次，以值的形式注入 AppState
// ==========================================

pub mod app_config;

// 重导出核心配置类型
pub use app_config::{
    default_db_path, env_keys, AppConfig, ConfigError, DatabaseConfig, LogConfig, TabularConfig,
};
