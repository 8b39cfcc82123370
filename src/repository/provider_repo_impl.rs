// ==========================================
// 云安全基线管理系统 - 云服务商 Repository 实现
// ==========================================
// 职责: cloud_providers 表的 CRUD（rusqlite）
// ==========================================

use crate::domain::{Provider, ProviderInput};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::provider_repo::ProviderRepository;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str =
    "SELECT id, name, code, description, created_at, updated_at FROM cloud_providers";

pub struct ProviderRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ProviderRepositoryImpl {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> rusqlite::Result<Provider> {
        Ok(Provider {
            id: row.get(0)?,
            name: row.get(1)?,
            code: row.get(2)?,
            description: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn find_by_id_with(conn: &Connection, id: i64) -> RepositoryResult<Option<Provider>> {
        let provider = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(provider)
    }
}

impl ProviderRepository for ProviderRepositoryImpl {
    fn find_all(&self) -> RepositoryResult<Vec<Provider>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))?;
        let providers = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(providers)
    }

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Provider>> {
        let conn = self.get_conn()?;
        Self::find_by_id_with(&conn, id)
    }

    fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Provider>> {
        let conn = self.get_conn()?;
        let provider = conn
            .query_row(
                &format!("{} WHERE code = ?1", SELECT_COLUMNS),
                params![code],
                Self::map_row,
            )
            .optional()?;
        Ok(provider)
    }

    fn insert(&self, input: &ProviderInput) -> RepositoryResult<Provider> {
        let conn = self.get_conn()?;
        let now = Utc::now();

        conn.execute(
            r#"
            INSERT INTO cloud_providers (name, code, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![input.name, input.code, input.description, now, now],
        )?;

        Ok(Provider {
            id: conn.last_insert_rowid(),
            name: input.name.clone(),
            code: input.code.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    fn update(&self, id: i64, input: &ProviderInput) -> RepositoryResult<Provider> {
        let conn = self.get_conn()?;

        let rows = conn.execute(
            r#"
            UPDATE cloud_providers
            SET name = ?1, code = ?2, description = ?3, updated_at = ?4
            WHERE id = ?5
            "#,
            params![input.name, input.code, input.description, Utc::now(), id],
        )?;

        if rows == 0 {
            return Err(RepositoryError::not_found("Provider", id));
        }

        Self::find_by_id_with(&conn, id)?.ok_or_else(|| RepositoryError::not_found("Provider", id))
    }

    fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM cloud_providers WHERE id = ?1", params![id])?;
        Ok(rows)
    }
}
