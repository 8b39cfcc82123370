// ==========================================
// 云安全基线管理系统 - 云产品 Repository Trait
// ==========================================
// 红线: Repository 不含业务规则，只做数据 CRUD
// 实现者: ProductRepositoryImpl（rusqlite）
// ==========================================

use crate::domain::{Product, ProductInput};
use crate::repository::error::RepositoryResult;

pub trait ProductRepository: Send + Sync {
    /// 查询全部产品（按 id 升序）
    fn find_all(&self) -> RepositoryResult<Vec<Product>>;

    /// 按 ID 查询
    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>>;

    /// 查询某服务商下的全部产品
    fn find_by_provider_id(&self, provider_id: i64) -> RepositoryResult<Vec<Product>>;

    /// 按服务商代码查询产品（JOIN cloud_providers）
    fn find_by_provider_code(&self, provider_code: &str) -> RepositoryResult<Vec<Product>>;

    /// 按 (provider_id, code) 复合键查询
    fn find_by_code(&self, provider_id: i64, code: &str) -> RepositoryResult<Option<Product>>;

    fn insert(&self, input: &ProductInput) -> RepositoryResult<Product>;

    /// 整体替换更新（created_at 不变）
    fn update(&self, id: i64, input: &ProductInput) -> RepositoryResult<Product>;

    /// 硬删除（不级联），返回受影响行数
    fn delete(&self, id: i64) -> RepositoryResult<usize>;
}
