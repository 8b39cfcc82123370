// ==========================================
// 云安全基线管理系统 - 云产品 Repository 实现
// ==========================================
// 职责: cloud_products 表的 CRUD（rusqlite）
// ==========================================

use crate::domain::{Product, ProductInput};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::product_repo::ProductRepository;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    SELECT p.id, p.cloud_provider_id, p.name, p.code, p.description, p.created_at, p.updated_at
    FROM cloud_products p
"#;

pub struct ProductRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepositoryImpl {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> rusqlite::Result<Product> {
        Ok(Product {
            id: row.get(0)?,
            cloud_provider_id: row.get(1)?,
            name: row.get(2)?,
            code: row.get(3)?,
            description: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn find_by_id_with(conn: &Connection, id: i64) -> RepositoryResult<Option<Product>> {
        let product = conn
            .query_row(
                &format!("{} WHERE p.id = ?1", SELECT_COLUMNS),
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(product)
    }
}

impl ProductRepository for ProductRepositoryImpl {
    fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY p.id ASC", SELECT_COLUMNS))?;
        let products = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        Self::find_by_id_with(&conn, id)
    }

    fn find_by_provider_id(&self, provider_id: i64) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE p.cloud_provider_id = ?1 ORDER BY p.id ASC",
            SELECT_COLUMNS
        ))?;
        let products = stmt
            .query_map(params![provider_id], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn find_by_provider_code(&self, provider_code: &str) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} INNER JOIN cloud_providers cp ON cp.id = p.cloud_provider_id \
             WHERE cp.code = ?1 ORDER BY p.id ASC",
            SELECT_COLUMNS
        ))?;
        let products = stmt
            .query_map(params![provider_code], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn find_by_code(&self, provider_id: i64, code: &str) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let product = conn
            .query_row(
                &format!(
                    "{} WHERE p.cloud_provider_id = ?1 AND p.code = ?2",
                    SELECT_COLUMNS
                ),
                params![provider_id, code],
                Self::map_row,
            )
            .optional()?;
        Ok(product)
    }

    fn insert(&self, input: &ProductInput) -> RepositoryResult<Product> {
        let conn = self.get_conn()?;
        let now = Utc::now();

        conn.execute(
            r#"
            INSERT INTO cloud_products (
                cloud_provider_id, name, code, description, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                input.cloud_provider_id,
                input.name,
                input.code,
                input.description,
                now,
                now
            ],
        )?;

        Ok(Product {
            id: conn.last_insert_rowid(),
            cloud_provider_id: input.cloud_provider_id,
            name: input.name.clone(),
            code: input.code.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    fn update(&self, id: i64, input: &ProductInput) -> RepositoryResult<Product> {
        let conn = self.get_conn()?;

        let rows = conn.execute(
            r#"
            UPDATE cloud_products
            SET cloud_provider_id = ?1, name = ?2, code = ?3, description = ?4, updated_at = ?5
            WHERE id = ?6
            "#,
            params![
                input.cloud_provider_id,
                input.name,
                input.code,
                input.description,
                Utc::now(),
                id
            ],
        )?;

        if rows == 0 {
            return Err(RepositoryError::not_found("Product", id));
        }

        Self::find_by_id_with(&conn, id)?.ok_or_else(|| RepositoryError::not_found("Product", id))
    }

    fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM cloud_products WHERE id = ?1", params![id])?;
        Ok(rows)
    }
}
