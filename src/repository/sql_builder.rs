// ==========================================
// 云安全基线管理系统 - SQL 构建工具
// ==========================================
// 职责: 动态 WHERE 条件 + 参数列表同步构建
// 约束: 所有条件值均以参数绑定，不拼接进 SQL
// ==========================================

use rusqlite::types::Value;

/// LIKE 转义字符
pub const LIKE_ESCAPE: char = '\\';

/// 将关键字转义为 `%keyword%` 形式的 LIKE 模式
///
/// `%`、`_`、`\` 按字面量匹配
pub fn like_contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// SQL 查询构建器（流式 API）
///
/// # 示例
/// ```
/// use cloud_baseline::repository::sql_builder::SqlQueryBuilder;
///
/// let (sql, params) = SqlQueryBuilder::new("SELECT * FROM configuration_items ci")
///     .and_eq("ci.cloud_provider_id", Some(1))
///     .and_eq("ci.product_id", None)
///     .order_by("ci.id ASC")
///     .limit_offset(10, 20)
///     .build();
///
/// assert_eq!(
///     sql,
///     "SELECT * FROM configuration_items ci WHERE ci.cloud_provider_id = ? ORDER BY ci.id ASC LIMIT ? OFFSET ?"
/// );
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SqlQueryBuilder {
    select_clause: String,
    where_clauses: Vec<String>,
    params: Vec<Value>,
    order_by_clause: Option<String>,
    limit_offset: Option<(i64, i64)>,
}

impl SqlQueryBuilder {
    /// 创建新的 SQL 查询构建器
    pub fn new(select: &str) -> Self {
        Self {
            select_clause: select.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_by_clause: None,
            limit_offset: None,
        }
    }

    /// 条件添加 `column = ?`
    pub fn and_eq(mut self, column: &str, value: Option<i64>) -> Self {
        if let Some(v) = value {
            self.where_clauses.push(format!("{} = ?", column));
            self.params.push(Value::from(v));
        }
        self
    }

    /// 条件添加多列 OR 组合的子串匹配（大小写不敏感）
    pub fn and_contains_any(mut self, columns: &[&str], keyword: Option<&str>) -> Self {
        if let Some(k) = keyword {
            let pattern = like_contains_pattern(k);
            let ors = columns
                .iter()
                .map(|c| format!("{} LIKE ? ESCAPE '{}'", c, LIKE_ESCAPE))
                .collect::<Vec<_>>()
                .join(" OR ");
            self.where_clauses.push(format!("({})", ors));
            for _ in columns {
                self.params.push(Value::from(pattern.clone()));
            }
        }
        self
    }

    /// 添加 ORDER BY 子句
    pub fn order_by(mut self, order: &str) -> Self {
        self.order_by_clause = Some(order.to_string());
        self
    }

    /// 添加 LIMIT/OFFSET（以参数绑定）
    pub fn limit_offset(mut self, limit: i64, offset: i64) -> Self {
        self.limit_offset = Some((limit, offset));
        self
    }

    /// 构建最终的 SQL 语句与参数
    pub fn build(self) -> (String, Vec<Value>) {
        let mut sql = self.select_clause;
        let mut params = self.params;

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(order) = &self.order_by_clause {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        if let Some((limit, offset)) = self.limit_offset {
            sql.push_str(" LIMIT ? OFFSET ?");
            params.push(Value::from(limit));
            params.push(Value::from(offset));
        }

        (sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_contains_pattern("ssh"), "%ssh%");
        assert_eq!(like_contains_pattern("100%"), "%100\\%%");
        assert_eq!(like_contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_contains_pattern("c:\\"), "%c:\\\\%");
    }

    #[test]
    fn test_builder_without_filters() {
        let (sql, params) = SqlQueryBuilder::new("SELECT COUNT(*) FROM t").build();
        assert_eq!(sql, "SELECT COUNT(*) FROM t");
        assert!(params.is_empty());
    }

    #[test]
    fn test_builder_keyword_or_combined() {
        let (sql, params) = SqlQueryBuilder::new("SELECT * FROM t")
            .and_eq("a", Some(1))
            .and_contains_any(&["x", "y"], Some("k"))
            .build();

        assert_eq!(
            sql,
            "SELECT * FROM t WHERE a = ? AND (x LIKE ? ESCAPE '\\' OR y LIKE ? ESCAPE '\\')"
        );
        assert_eq!(params.len(), 3);
    }
}
