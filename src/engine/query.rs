// ==========================================
// 云安全基线管理系统 - 配置项过滤分页引擎
// ==========================================
// 职责: 过滤条件 + 分页 → 有界、确定性的查询结果
// 红线:
// - 按不存在的服务商/产品过滤是错误，不是空页
// - 总数忽略分页；结果按 id 升序
// ==========================================

use crate::domain::{ConfigItemDetail, ConfigItemFilter, PageResult};
use crate::engine::error::IntegrityResult;
use crate::engine::integrity::ReferenceValidator;
use crate::engine::pagination::Pagination;
use crate::repository::ConfigItemRepository;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct ConfigItemQueryEngine {
    item_repo: Arc<dyn ConfigItemRepository>,
    validator: Arc<ReferenceValidator>,
}

impl ConfigItemQueryEngine {
    pub fn new(item_repo: Arc<dyn ConfigItemRepository>, validator: Arc<ReferenceValidator>) -> Self {
        Self {
            item_repo,
            validator,
        }
    }

    /// 执行过滤分页查询
    ///
    /// # 步骤
    /// 1. 归一化分页参数
    /// 2. 预检过滤引用的服务商、产品存在
    /// 3. 计数 + 取当前页（两次独立读取）
    #[instrument(skip(self), fields(page = filter.page, page_size = filter.page_size))]
    pub fn query(&self, filter: &ConfigItemFilter) -> IntegrityResult<PageResult<ConfigItemDetail>> {
        let pagination = Pagination::normalize(filter.page, filter.page_size);

        if let Some(provider_id) = filter.cloud_provider_id {
            self.validator.ensure_provider(provider_id)?;
        }
        if let Some(product_id) = filter.product_id {
            self.validator.ensure_product(product_id)?;
        }

        let criteria = filter.criteria();
        let (data, total) =
            self.item_repo
                .find_by_filter(&criteria, pagination.offset(), pagination.limit())?;

        debug!(total, returned = data.len(), "配置项查询完成");

        Ok(PageResult {
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigItem, ConfigItemInput, ConfigItemQuery};
    use crate::engine::error::IntegrityError;
    use crate::engine::integrity::tests::MockCatalog;
    use crate::repository::RepositoryResult;
    use std::sync::Mutex;

    /// 记录收到的 offset/limit
    #[derive(Default)]
    struct RecordingItems {
        calls: Mutex<Vec<(ConfigItemQuery, i64, i64)>>,
    }

    impl ConfigItemRepository for RecordingItems {
        fn find_by_id(&self, _: i64) -> RepositoryResult<Option<ConfigItem>> {
            Ok(None)
        }
        fn find_by_provider_and_product(&self, _: i64, _: i64) -> RepositoryResult<Vec<ConfigItem>> {
            Ok(Vec::new())
        }
        fn find_by_filter(
            &self,
            query: &ConfigItemQuery,
            offset: i64,
            limit: i64,
        ) -> RepositoryResult<(Vec<ConfigItemDetail>, i64)> {
            self.calls.lock().unwrap().push((query.clone(), offset, limit));
            Ok((Vec::new(), 42))
        }
        fn insert(&self, _: &ConfigItemInput) -> RepositoryResult<ConfigItem> {
            unimplemented!()
        }
        fn update(&self, _: i64, _: &ConfigItemInput) -> RepositoryResult<ConfigItem> {
            unimplemented!()
        }
        fn delete(&self, _: i64) -> RepositoryResult<usize> {
            unimplemented!()
        }
        fn batch_insert(&self, _: &[ConfigItemInput]) -> RepositoryResult<usize> {
            unimplemented!()
        }
    }

    fn engine() -> (ConfigItemQueryEngine, Arc<RecordingItems>) {
        let catalog = Arc::new(MockCatalog::with(&[(1, "aws")], &[(10, 1, "ec2")]));
        let validator = Arc::new(ReferenceValidator::new(catalog.clone(), catalog));
        let items = Arc::new(RecordingItems::default());
        (ConfigItemQueryEngine::new(items.clone(), validator), items)
    }

    #[test]
    fn test_missing_provider_is_error() {
        let (engine, items) = engine();
        let err = engine
            .query(&ConfigItemFilter::default().with_provider(7))
            .unwrap_err();

        assert!(matches!(err, IntegrityError::ProviderNotFound(7)));
        assert!(items.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_product_is_error() {
        let (engine, _) = engine();
        let err = engine
            .query(&ConfigItemFilter::default().with_product(77))
            .unwrap_err();
        assert!(matches!(err, IntegrityError::ProductNotFound(77)));
    }

    #[test]
    fn test_pagination_normalized_before_store() {
        let (engine, items) = engine();
        let result = engine
            .query(
                &ConfigItemFilter::default()
                    .with_provider(1)
                    .with_product(10)
                    .with_keyword(" ssh ")
                    .with_page(3, 500),
            )
            .unwrap();

        assert_eq!(result.total, 42);
        assert_eq!(result.page, 3);
        assert_eq!(result.page_size, 100);

        let calls = items.calls.lock().unwrap();
        let (criteria, offset, limit) = &calls[0];
        assert_eq!(criteria.keyword.as_deref(), Some("ssh"));
        assert_eq!((*offset, *limit), (200, 100));
    }
}
