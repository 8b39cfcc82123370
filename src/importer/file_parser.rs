// ==========================================
// 云安全基线管理系统 - 文件解析器实现
// ==========================================
// 阶段 A 前半: 文件读取 → 按位置的行数据
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 约束:
// - 保留文档顺序与行号
// - 每行去掉尾部空白单元格（“已填列数”按此计算），其余单元格不做 trim
// - 完全空白的行直接丢弃
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// 按位置读取的原始行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 文档中的行号（从 1 开始）
    pub line: usize,
    pub cells: Vec<String>,
}

impl RawRow {
    /// 单元格内容原样保留；仅尾部的空白单元格被去掉
    pub fn new(line: usize, mut cells: Vec<String>) -> Self {
        while cells.last().is_some_and(|c| c.trim().is_empty()) {
            cells.pop();
        }
        Self { line, cells }
    }

    /// 已填列数（尾部空白单元格不计）
    pub fn populated(&self) -> usize {
        self.cells.len()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }
}

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser: Send + Sync {
    /// 解析文件为行列表（含表头行）
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        // 表头按普通行返回，由映射阶段跳过
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1);

            let row = RawRow::new(line, record.iter().map(str::to_string).collect());
            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 数据区不一定从 A1 开始
        let first_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);
        let first_col = range.start().map(|(_, c)| c as usize).unwrap_or(0);

        let mut rows = Vec::new();
        for (idx, data_row) in range.rows().enumerate() {
            let mut cells = vec![String::new(); first_col];
            cells.extend(data_row.iter().map(|cell| cell.to_string()));

            let row = RawRow::new(first_row + idx + 1, cells);
            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_rows(file_path),
            "xlsx" | "xls" => ExcelParser.parse_rows(file_path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_rows_keep_positions() {
        let file = csv_file(&[
            "ID,云服务商,云产品,配置项名称",
            "1,1,10,SSH 端口",
            "2,1,10,\"多行\n说明\"",
            "3,1,10,RDP",
        ]);

        let rows = CsvParser.parse_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[1].cells, vec!["1", "1", "10", "SSH 端口"]);
        assert_eq!(rows[2].line, 3);
        // 引号内换行占两行
        assert_eq!(rows[3].line, 5);
    }

    #[test]
    fn test_trailing_empty_cells_not_counted() {
        let file = csv_file(&["h", "1,2,3,,,", ",,,"]);
        let rows = CsvParser.parse_rows(file.path()).unwrap();

        // 全空行丢弃
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].populated(), 3);
        assert_eq!(rows[1].cell(7), "");
    }

    #[test]
    fn test_cell_whitespace_preserved() {
        let file = csv_file(&["h", "1, 2 ,\"  port 22\",\"risk\n\",  ,"]);
        let rows = CsvParser.parse_rows(file.path()).unwrap();

        assert_eq!(rows[1].cells, vec!["1", " 2 ", "  port 22", "risk\n"]);
        assert_eq!(rows[1].populated(), 4);
    }

    #[test]
    fn test_file_not_found() {
        let result = UniversalFileParser.parse_rows(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = UniversalFileParser.parse_rows(Path::new("items.json"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "json"));
    }
}
