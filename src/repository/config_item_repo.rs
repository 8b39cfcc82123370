// ==========================================
// 云安全基线管理系统 - 安全配置项 Repository Trait
// ==========================================
// 红线: Repository 不校验 (provider, product) 一致性
//       一致性由 engine::ReferenceValidator 负责
// 实现者: ConfigItemRepositoryImpl（rusqlite）
// ==========================================

use crate::domain::{ConfigItem, ConfigItemDetail, ConfigItemInput, ConfigItemQuery};
use crate::repository::error::RepositoryResult;

pub trait ConfigItemRepository: Send + Sync {
    /// 按 ID 查询
    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<ConfigItem>>;

    /// 按 (provider, product) 查询全部配置项
    fn find_by_provider_and_product(
        &self,
        provider_id: i64,
        product_id: i64,
    ) -> RepositoryResult<Vec<ConfigItem>>;

    /// 条件 + 分页查询
    ///
    /// # 返回
    /// (当前页数据（附带服务商/产品名称）, 忽略分页的总数)
    fn find_by_filter(
        &self,
        query: &ConfigItemQuery,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<(Vec<ConfigItemDetail>, i64)>;

    fn insert(&self, input: &ConfigItemInput) -> RepositoryResult<ConfigItem>;

    /// 整体替换更新（created_at 不变）
    fn update(&self, id: i64, input: &ConfigItemInput) -> RepositoryResult<ConfigItem>;

    fn delete(&self, id: i64) -> RepositoryResult<usize>;

    /// 单事务批量插入（全部成功或全部回滚）
    ///
    /// # 返回
    /// 插入行数
    fn batch_insert(&self, inputs: &[ConfigItemInput]) -> RepositoryResult<usize>;
}
