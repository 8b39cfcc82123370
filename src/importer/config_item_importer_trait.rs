// ==========================================
// 云安全基线管理系统 - 配置项导入 Trait
// ==========================================
// 职责: 定义配置项批量导入接口（不包含实现）
// 实现者: ConfigItemImporterImpl
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::row_mapper::SkippedRow;
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 导入结果汇总
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub batch_id: String,
    /// 实际写入行数
    pub imported: usize,
    /// 阶段 A 跳过的结构性无效行
    pub skipped_rows: Vec<SkippedRow>,
    pub elapsed_ms: u64,
}

#[async_trait]
pub trait ConfigItemImporter: Send + Sync {
    /// 从文件导入配置项
    ///
    /// # 导入流程（3 个阶段）
    /// A. 解析: 文件 → 候选行（结构无效的行跳过）
    /// B. 校验: 按文档顺序逐行做引用完整性校验，首个失败行终止整批
    /// C. 落库: 单事务批量写入，全部成功或全部回滚
    ///
    /// # 返回
    /// - Ok(ImportSummary): 写入行数 + 跳过行
    /// - Err(InvalidData): 文件为空或无有效行
    /// - Err(RowRejected): 引用校验失败（未写入任何行）
    /// - Err(Persist): 写入失败（已回滚）
    async fn import_from_file(&self, file_path: &Path) -> ImportResult<ImportSummary>;

    /// 保存上传的文件到导入目录
    ///
    /// 文件名加时间戳前缀，避免并发上传互相覆盖
    async fn stage_upload(&self, bytes: &[u8], file_name: &str) -> ImportResult<PathBuf>;
}
