// ==========================================
// 云安全基线管理系统 - 安全配置项 Repository 实现
// ==========================================
// 职责: configuration_items 表的 CRUD + 过滤分页 + 批量写入
// 约束: 过滤条件全部参数绑定（SqlQueryBuilder）
// ==========================================

use crate::domain::{ConfigItem, ConfigItemDetail, ConfigItemInput, ConfigItemQuery};
use crate::repository::config_item_repo::ConfigItemRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sql_builder::SqlQueryBuilder;
use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, Transaction};
use std::sync::{Arc, Mutex};
use tracing::debug;

const ITEM_COLUMNS: &str = r#"
    ci.id, ci.cloud_provider_id, ci.product_id, ci.name, ci.recommended_value,
    ci.risk_description, ci.check_method, ci.configuration_method, ci.reference,
    ci.created_at, ci.updated_at
"#;

/// 关键字匹配列
const KEYWORD_COLUMNS: [&str; 3] = ["ci.name", "ci.recommended_value", "ci.risk_description"];

const INSERT_SQL: &str = r#"
    INSERT INTO configuration_items (
        cloud_provider_id, product_id, name, recommended_value, risk_description,
        check_method, configuration_method, reference, created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

pub struct ConfigItemRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigItemRepositoryImpl {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> rusqlite::Result<ConfigItem> {
        Ok(ConfigItem {
            id: row.get(0)?,
            cloud_provider_id: row.get(1)?,
            product_id: row.get(2)?,
            name: row.get(3)?,
            recommended_value: row.get(4)?,
            risk_description: row.get(5)?,
            check_method: row.get(6)?,
            configuration_method: row.get(7)?,
            reference: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    fn map_detail_row(row: &Row) -> rusqlite::Result<ConfigItemDetail> {
        Ok(ConfigItemDetail {
            item: Self::map_row(row)?,
            provider_name: row.get(11)?,
            product_name: row.get(12)?,
        })
    }

    fn find_by_id_with(conn: &Connection, id: i64) -> RepositoryResult<Option<ConfigItem>> {
        let item = conn
            .query_row(
                &format!(
                    "SELECT {} FROM configuration_items ci WHERE ci.id = ?1",
                    ITEM_COLUMNS
                ),
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(item)
    }

    fn insert_with(
        conn: &Connection,
        input: &ConfigItemInput,
        now: DateTime<Utc>,
    ) -> RepositoryResult<i64> {
        conn.execute(
            INSERT_SQL,
            params![
                input.cloud_provider_id,
                input.product_id,
                input.name,
                input.recommended_value,
                input.risk_description,
                input.check_method,
                input.configuration_method,
                input.reference,
                now,
                now
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 在事务中批量插入
    fn batch_insert_tx(tx: &Transaction, inputs: &[ConfigItemInput]) -> RepositoryResult<usize> {
        let now = Utc::now();
        let mut stmt = tx.prepare(INSERT_SQL)?;

        let mut count = 0;
        for input in inputs {
            stmt.execute(params![
                input.cloud_provider_id,
                input.product_id,
                input.name,
                input.recommended_value,
                input.risk_description,
                input.check_method,
                input.configuration_method,
                input.reference,
                now,
                now
            ])?;
            count += 1;
        }

        Ok(count)
    }
}

impl ConfigItemRepository for ConfigItemRepositoryImpl {
    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<ConfigItem>> {
        let conn = self.get_conn()?;
        Self::find_by_id_with(&conn, id)
    }

    fn find_by_provider_and_product(
        &self,
        provider_id: i64,
        product_id: i64,
    ) -> RepositoryResult<Vec<ConfigItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM configuration_items ci \
             WHERE ci.cloud_provider_id = ?1 AND ci.product_id = ?2 ORDER BY ci.id ASC",
            ITEM_COLUMNS
        ))?;
        let items = stmt
            .query_map(params![provider_id, product_id], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn find_by_filter(
        &self,
        query: &ConfigItemQuery,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<(Vec<ConfigItemDetail>, i64)> {
        let conn = self.get_conn()?;

        // ===== 总数（忽略分页） =====
        let (count_sql, count_params) =
            SqlQueryBuilder::new("SELECT COUNT(*) FROM configuration_items ci")
                .and_eq("ci.cloud_provider_id", query.cloud_provider_id)
                .and_eq("ci.product_id", query.product_id)
                .and_contains_any(&KEYWORD_COLUMNS, query.keyword.as_deref())
                .build();
        let total: i64 =
            conn.query_row(&count_sql, params_from_iter(count_params.iter()), |row| {
                row.get(0)
            })?;

        // ===== 当前页 =====
        let select = format!(
            "SELECT {}, cp.name, pr.name FROM configuration_items ci \
             LEFT JOIN cloud_providers cp ON cp.id = ci.cloud_provider_id \
             LEFT JOIN cloud_products pr ON pr.id = ci.product_id",
            ITEM_COLUMNS
        );
        let (sql, page_params) = SqlQueryBuilder::new(&select)
            .and_eq("ci.cloud_provider_id", query.cloud_provider_id)
            .and_eq("ci.product_id", query.product_id)
            .and_contains_any(&KEYWORD_COLUMNS, query.keyword.as_deref())
            .order_by("ci.id ASC")
            .limit_offset(limit, offset)
            .build();

        debug!(sql = %sql, total, offset, limit, "配置项过滤查询");

        let mut stmt = conn.prepare(&sql)?;
        let data = stmt
            .query_map(params_from_iter(page_params.iter()), Self::map_detail_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok((data, total))
    }

    fn insert(&self, input: &ConfigItemInput) -> RepositoryResult<ConfigItem> {
        let conn = self.get_conn()?;
        let now = Utc::now();
        let id = Self::insert_with(&conn, input, now)?;

        Ok(ConfigItem {
            id,
            cloud_provider_id: input.cloud_provider_id,
            product_id: input.product_id,
            name: input.name.clone(),
            recommended_value: input.recommended_value.clone(),
            risk_description: input.risk_description.clone(),
            check_method: input.check_method.clone(),
            configuration_method: input.configuration_method.clone(),
            reference: input.reference.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    fn update(&self, id: i64, input: &ConfigItemInput) -> RepositoryResult<ConfigItem> {
        let conn = self.get_conn()?;

        let rows = conn.execute(
            r#"
            UPDATE configuration_items
            SET cloud_provider_id = ?1, product_id = ?2, name = ?3, recommended_value = ?4,
                risk_description = ?5, check_method = ?6, configuration_method = ?7,
                reference = ?8, updated_at = ?9
            WHERE id = ?10
            "#,
            params![
                input.cloud_provider_id,
                input.product_id,
                input.name,
                input.recommended_value,
                input.risk_description,
                input.check_method,
                input.configuration_method,
                input.reference,
                Utc::now(),
                id
            ],
        )?;

        if rows == 0 {
            return Err(RepositoryError::not_found("ConfigItem", id));
        }

        Self::find_by_id_with(&conn, id)?
            .ok_or_else(|| RepositoryError::not_found("ConfigItem", id))
    }

    fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM configuration_items WHERE id = ?1", params![id])?;
        Ok(rows)
    }

    fn batch_insert(&self, inputs: &[ConfigItemInput]) -> RepositoryResult<usize> {
        if inputs.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        // 任一行失败时 tx 被 drop，自动回滚
        let count = Self::batch_insert_tx(&tx, inputs)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        debug!(count, "配置项批量写入完成");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductInput, ProviderInput};
    use crate::repository::{
        ProductRepository, ProductRepositoryImpl, ProviderRepository, ProviderRepositoryImpl,
    };

    struct Fixture {
        conn: Arc<Mutex<Connection>>,
        items: ConfigItemRepositoryImpl,
        provider_id: i64,
        product_id: i64,
        other_product_id: i64,
    }

    fn setup() -> Fixture {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));

        let providers = ProviderRepositoryImpl::from_connection(conn.clone());
        let products = ProductRepositoryImpl::from_connection(conn.clone());
        let aws = providers.insert(&ProviderInput::new("AWS", "aws")).unwrap();
        let ec2 = products.insert(&ProductInput::new(aws.id, "EC2", "ec2")).unwrap();
        let s3 = products.insert(&ProductInput::new(aws.id, "S3", "s3")).unwrap();

        Fixture {
            items: ConfigItemRepositoryImpl::from_connection(conn.clone()),
            conn,
            provider_id: aws.id,
            product_id: ec2.id,
            other_product_id: s3.id,
        }
    }

    fn input(f: &Fixture, product_id: i64, name: &str, risk: &str) -> ConfigItemInput {
        let mut input = ConfigItemInput::new(f.provider_id, product_id, name);
        input.recommended_value = "enabled".to_string();
        input.risk_description = risk.to_string();
        input
    }

    #[test]
    fn test_insert_update_delete() {
        let f = setup();
        let created = f
            .items
            .insert(&input(&f, f.product_id, "SSH 端口", "暴露 22 端口"))
            .unwrap();

        std::thread::sleep(std::time::Duration::from_millis(5));
        let mut changed = ConfigItemInput::from(&created);
        changed.recommended_value = "disabled".to_string();
        let updated = f.items.update(created.id, &changed).unwrap();
        assert_eq!(updated.recommended_value, "disabled");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        assert_eq!(f.items.delete(created.id).unwrap(), 1);
        assert!(f.items.find_by_id(created.id).unwrap().is_none());
    }

    #[test]
    fn test_filter_with_keyword_and_pagination() {
        let f = setup();
        for i in 0..15 {
            f.items
                .insert(&input(&f, f.product_id, &format!("ec2-item-{}", i), "普通"))
                .unwrap();
        }
        f.items
            .insert(&input(&f, f.other_product_id, "s3 公共读", "数据泄露"))
            .unwrap();

        let query = ConfigItemQuery {
            cloud_provider_id: Some(f.provider_id),
            product_id: Some(f.product_id),
            keyword: None,
        };
        let (page, total) = f.items.find_by_filter(&query, 10, 10).unwrap();
        assert_eq!(total, 15);
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].item.name, "ec2-item-10");
        assert_eq!(page[0].provider_name.as_deref(), Some("AWS"));
        assert_eq!(page[0].product_name.as_deref(), Some("EC2"));

        let query = ConfigItemQuery {
            keyword: Some("泄露".to_string()),
            ..Default::default()
        };
        let (page, total) = f.items.find_by_filter(&query, 0, 10).unwrap();
        assert_eq!(total, 1);
        assert_eq!(page[0].item.name, "s3 公共读");
    }

    #[test]
    fn test_keyword_wildcards_are_literal() {
        let f = setup();
        f.items.insert(&input(&f, f.product_id, "100% 加密", "")).unwrap();
        f.items.insert(&input(&f, f.product_id, "1000 次", "")).unwrap();

        let query = ConfigItemQuery {
            keyword: Some("100%".to_string()),
            ..Default::default()
        };
        let (page, total) = f.items.find_by_filter(&query, 0, 10).unwrap();
        assert_eq!(total, 1);
        assert_eq!(page[0].item.name, "100% 加密");
    }

    #[test]
    fn test_batch_insert() {
        let f = setup();
        let inputs = vec![
            input(&f, f.product_id, "a", ""),
            input(&f, f.product_id, "b", ""),
        ];

        assert_eq!(f.items.batch_insert(&inputs).unwrap(), 2);
        assert_eq!(f.items.batch_insert(&[]).unwrap(), 0);
        assert_eq!(
            f.items
                .find_by_provider_and_product(f.provider_id, f.product_id)
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_batch_insert_rolls_back_on_failed_row() {
        let f = setup();
        f.conn
            .lock()
            .unwrap()
            .execute_batch(
                r#"
                CREATE TRIGGER fail_on_boom BEFORE INSERT ON configuration_items
                WHEN NEW.name = 'boom'
                BEGIN
                    SELECT RAISE(ABORT, 'boom');
                END;
                "#,
            )
            .unwrap();

        let inputs = vec![
            input(&f, f.product_id, "first", ""),
            input(&f, f.product_id, "boom", ""),
            input(&f, f.product_id, "third", ""),
        ];
        assert!(f.items.batch_insert(&inputs).is_err());

        let count: i64 = f
            .conn
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM configuration_items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
