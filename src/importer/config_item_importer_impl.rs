// ==========================================
// 云安全基线管理系统 - 配置项导入器实现
// ==========================================
// 流程: 解析 → 映射（跳过无效行） → 引用校验（首错终止） → 单事务落库
// 红线:
// - 全程保持文档顺序，报告的失败序号依赖此顺序
// - 校验失败时不写入任何行
// ==========================================

use crate::engine::ReferenceValidator;
use crate::importer::config_item_importer_trait::{ConfigItemImporter, ImportSummary};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::FileParser;
use crate::importer::row_mapper::{map_rows, CandidateRow};
use crate::repository::ConfigItemRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

pub struct ConfigItemImporterImpl {
    item_repo: Arc<dyn ConfigItemRepository>,
    validator: Arc<ReferenceValidator>,
    file_parser: Box<dyn FileParser>,
    import_dir: PathBuf,
}

impl ConfigItemImporterImpl {
    /// # 参数
    /// - item_repo: 配置项仓储
    /// - validator: 引用完整性校验器
    /// - file_parser: 文件解析器
    /// - import_dir: 上传文件暂存目录
    pub fn new(
        item_repo: Arc<dyn ConfigItemRepository>,
        validator: Arc<ReferenceValidator>,
        file_parser: Box<dyn FileParser>,
        import_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            item_repo,
            validator,
            file_parser,
            import_dir: import_dir.into(),
        }
    }

    /// 阶段 B: 按顺序校验，返回首个失败行
    fn validate_candidates(&self, candidates: &[CandidateRow]) -> ImportResult<()> {
        for (idx, candidate) in candidates.iter().enumerate() {
            if let Err(source) = self.validator.validate_input(&candidate.input) {
                warn!(
                    position = idx + 1,
                    line = candidate.line,
                    error = %source,
                    "导入行引用校验失败，放弃整批"
                );
                return Err(ImportError::RowRejected {
                    position: idx + 1,
                    line: candidate.line,
                    source,
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigItemImporter for ConfigItemImporterImpl {
    #[instrument(skip(self, file_path), fields(batch_id))]
    async fn import_from_file(&self, file_path: &Path) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(file_path = %file_path.display(), "开始导入配置项");

        // === 阶段 A: 解析 + 映射 ===
        let rows = self.file_parser.parse_rows(file_path)?;
        debug!(total_rows = rows.len(), "文件解析完成");

        let mapped = map_rows(&rows)?;
        info!(
            candidates = mapped.candidates.len(),
            skipped = mapped.skipped.len(),
            "行映射完成"
        );

        // === 阶段 B: 引用校验 ===
        self.validate_candidates(&mapped.candidates)?;

        // === 阶段 C: 单事务落库 ===
        let inputs: Vec<_> = mapped.candidates.into_iter().map(|c| c.input).collect();
        let imported = self.item_repo.batch_insert(&inputs)?;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(imported, elapsed_ms, "配置项导入完成");

        Ok(ImportSummary {
            batch_id,
            imported,
            skipped_rows: mapped.skipped,
            elapsed_ms,
        })
    }

    async fn stage_upload(&self, bytes: &[u8], file_name: &str) -> ImportResult<PathBuf> {
        // 只取文件名部分，丢弃客户端路径
        let base_name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ImportError::InvalidData(format!("上传文件名无效: {}", file_name)))?;

        let ext = Path::new(base_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        tokio::fs::create_dir_all(&self.import_dir)
            .await
            .map_err(ImportError::Staging)?;

        let staged_name = format!(
            "{}_{}_{}",
            Utc::now().timestamp(),
            &Uuid::new_v4().simple().to_string()[..8],
            base_name
        );
        let staged_path = self.import_dir.join(staged_name);
        tokio::fs::write(&staged_path, bytes)
            .await
            .map_err(ImportError::Staging)?;

        debug!(path = %staged_path.display(), size = bytes.len(), "上传文件已暂存");
        Ok(staged_path)
    }
}
