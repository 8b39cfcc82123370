// ==========================================
// 云安全基线管理系统 - 应用层
// ==========================================
// 职责: 依赖装配 + 命令入口
// ==========================================

pub mod commands;
pub mod state;

// 重导出
pub use state::AppState;
