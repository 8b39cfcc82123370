// ==========================================
// 云安全基线管理系统 - 行映射（阶段 A 后半）
// ==========================================
// 列顺序（从 1 开始）:
//   1 ID | 2 服务商 ID | 3 产品 ID | 4 名称 | 5 推荐值 | 6 风险说明
//   7 检查方法 | 8 配置方式 | 9 参考资料 | 10 创建时间 | 11 更新时间
// 导入只读第 2–9 列；1、10、11 列由服务端生成
// 规则:
// - 已填列数 < 9 的行跳过（记录日志，不报错）
// - 服务商/产品 ID 不是非负整数（u32）的行跳过
// - 总行数 < 2（缺表头或数据）或无有效候选 → InvalidData
// ==========================================

use crate::domain::ConfigItemInput;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use serde::Serialize;
use tracing::warn;

/// 一行至少需要的已填列数
pub const MIN_POPULATED_COLUMNS: usize = 9;

mod col {
    pub const PROVIDER_ID: usize = 1;
    pub const PRODUCT_ID: usize = 2;
    pub const NAME: usize = 3;
    pub const RECOMMENDED_VALUE: usize = 4;
    pub const RISK_DESCRIPTION: usize = 5;
    pub const CHECK_METHOD: usize = 6;
    pub const CONFIGURATION_METHOD: usize = 7;
    pub const REFERENCE: usize = 8;
}

/// 映射成功的候选行
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    pub line: usize,
    pub input: ConfigItemInput,
}

/// 被跳过的行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct MappedRows {
    pub candidates: Vec<CandidateRow>,
    pub skipped: Vec<SkippedRow>,
}

/// ID 列允许两侧空白；内容列保持原样
fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse::<u32>().ok().map(i64::from)
}

fn map_row(row: &RawRow) -> Result<ConfigItemInput, String> {
    if row.populated() < MIN_POPULATED_COLUMNS {
        return Err(format!(
            "列数不足: 需要 {} 列，实际 {} 列",
            MIN_POPULATED_COLUMNS,
            row.populated()
        ));
    }

    let provider_raw = row.cell(col::PROVIDER_ID);
    let cloud_provider_id =
        parse_id(provider_raw).ok_or_else(|| format!("服务商 ID 无效: {:?}", provider_raw))?;

    let product_raw = row.cell(col::PRODUCT_ID);
    let product_id =
        parse_id(product_raw).ok_or_else(|| format!("产品 ID 无效: {:?}", product_raw))?;

    Ok(ConfigItemInput {
        cloud_provider_id,
        product_id,
        name: row.cell(col::NAME).to_string(),
        recommended_value: row.cell(col::RECOMMENDED_VALUE).to_string(),
        risk_description: row.cell(col::RISK_DESCRIPTION).to_string(),
        check_method: row.cell(col::CHECK_METHOD).to_string(),
        configuration_method: row.cell(col::CONFIGURATION_METHOD).to_string(),
        reference: row.cell(col::REFERENCE).to_string(),
    })
}

/// 将解析后的行（含表头）映射为候选配置项，保持文档顺序
pub fn map_rows(rows: &[RawRow]) -> ImportResult<MappedRows> {
    if rows.len() < 2 {
        return Err(ImportError::InvalidData(
            "文件至少需要表头和一行数据".to_string(),
        ));
    }

    let mut mapped = MappedRows::default();
    for row in &rows[1..] {
        match map_row(row) {
            Ok(input) => mapped.candidates.push(CandidateRow {
                line: row.line,
                input,
            }),
            Err(reason) => {
                warn!(row = row.line, reason = %reason, "跳过无效行");
                mapped.skipped.push(SkippedRow {
                    line: row.line,
                    reason,
                });
            }
        }
    }

    if mapped.candidates.is_empty() {
        return Err(ImportError::InvalidData("没有可导入的有效数据行".to_string()));
    }

    Ok(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: usize, cells: &[&str]) -> RawRow {
        RawRow::new(line, cells.iter().map(|c| c.to_string()).collect())
    }

    fn header() -> RawRow {
        row(1, &["ID", "云服务商", "云产品", "配置项名称", "推荐配置值", "风险说明", "检查方法", "配置方式", "参考资料"])
    }

    fn full(line: usize, provider: &str, product: &str, name: &str) -> RawRow {
        row(line, &["", provider, product, name, "on", "risk", "check", "how", "ref"])
    }

    #[test]
    fn test_short_row_skipped() {
        let rows = vec![
            header(),
            row(2, &["", "1", "10", "a", "b"]),
            full(3, "1", "10", "ok"),
        ];

        let mapped = map_rows(&rows).unwrap();
        assert_eq!(mapped.candidates.len(), 1);
        assert_eq!(mapped.candidates[0].line, 3);
        assert_eq!(mapped.candidates[0].input.name, "ok");
        assert_eq!(mapped.skipped[0].line, 2);
    }

    #[test]
    fn test_bad_ids_skipped() {
        let rows = vec![
            header(),
            full(2, "AWS", "10", "a"),
            full(3, "1", "-5", "b"),
            full(4, "1", "4294967296", "c"),
            full(5, "2", "20", "d"),
        ];

        let mapped = map_rows(&rows).unwrap();
        assert_eq!(mapped.skipped.len(), 3);
        assert_eq!(mapped.candidates.len(), 1);
        assert_eq!(mapped.candidates[0].input.cloud_provider_id, 2);
        assert_eq!(mapped.candidates[0].input.product_id, 20);
    }

    #[test]
    fn test_ids_trimmed_content_kept() {
        let rows = vec![
            header(),
            row(2, &["", " 1 ", "10\t", "ssh ", "  port 22", "risk\n", "c", "m", "ref"]),
        ];

        let input = &map_rows(&rows).unwrap().candidates[0].input;
        assert_eq!((input.cloud_provider_id, input.product_id), (1, 10));
        assert_eq!(input.content(), ("ssh ", "  port 22", "risk\n", "c", "m", "ref"));
    }

    #[test]
    fn test_header_only_is_invalid() {
        let err = map_rows(&[header()]).unwrap_err();
        assert!(matches!(err, ImportError::InvalidData(_)));
    }

    #[test]
    fn test_no_valid_candidates_is_invalid() {
        let err = map_rows(&[header(), row(2, &["x"])]).unwrap_err();
        assert!(matches!(err, ImportError::InvalidData(_)));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let mut cells = vec!["7", "1", "10", "n", "v", "r", "c", "m", "ref"];
        cells.extend(["2024-01-01 00:00:00", "2024-01-02 00:00:00"]);
        let mapped = map_rows(&[header(), row(2, &cells)]).unwrap();

        let input = &mapped.candidates[0].input;
        assert_eq!(input.reference, "ref");
        assert_eq!(input.content(), ("n", "v", "r", "c", "m", "ref"));
    }
}
