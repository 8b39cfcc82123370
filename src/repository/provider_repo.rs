// ==========================================
// 云安全基线管理系统 - 云服务商 Repository Trait
// ==========================================
// 红线: Repository 不含业务规则，只做数据 CRUD
// 实现者: ProviderRepositoryImpl（rusqlite）
// ==========================================

use crate::domain::{Provider, ProviderInput};
use crate::repository::error::RepositoryResult;

pub trait ProviderRepository: Send + Sync {
    /// 查询全部服务商（按 id 升序）
    fn find_all(&self) -> RepositoryResult<Vec<Provider>>;

    /// 按 ID 查询
    ///
    /// # 返回
    /// - Ok(Some(provider)): 找到
    /// - Ok(None): 不存在
    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Provider>>;

    /// 按代码查询（code 全局唯一）
    fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Provider>>;

    /// 插入，返回带 ID 与时间戳的记录
    fn insert(&self, input: &ProviderInput) -> RepositoryResult<Provider>;

    /// 整体替换更新（created_at 不变）
    ///
    /// # 返回
    /// - Err(NotFound): 记录不存在
    fn update(&self, id: i64, input: &ProviderInput) -> RepositoryResult<Provider>;

    /// 硬删除（不级联），返回受影响行数
    fn delete(&self, id: i64) -> RepositoryResult<usize>;
}
