// ==========================================
// 云安全基线管理系统 - 引用完整性校验
// ==========================================
// 红线: (provider, product) 必须相互一致，而不仅是各自存在
// 顺序: 服务商存在 → 产品存在 → 产品归属于该服务商
// 约束: 每次校验都是新鲜读取，不缓存实体
// ==========================================

use crate::domain::{ConfigItem, ConfigItemInput, Product, Provider};
use crate::engine::error::{IntegrityError, IntegrityResult};
use crate::repository::{ProductRepository, ProviderRepository};
use std::sync::Arc;
use tracing::debug;

pub struct ReferenceValidator {
    provider_repo: Arc<dyn ProviderRepository>,
    product_repo: Arc<dyn ProductRepository>,
}

impl ReferenceValidator {
    pub fn new(
        provider_repo: Arc<dyn ProviderRepository>,
        product_repo: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            provider_repo,
            product_repo,
        }
    }

    /// 校验 (provider_id, product_id) 引用
    pub fn validate(&self, provider_id: i64, product_id: i64) -> IntegrityResult<()> {
        self.ensure_provider(provider_id)?;
        let product = self.ensure_product(product_id)?;

        if product.cloud_provider_id != provider_id {
            debug!(
                provider_id,
                product_id,
                owner_provider_id = product.cloud_provider_id,
                "产品归属不一致"
            );
            return Err(IntegrityError::ProductProviderMismatch {
                product_id,
                provider_id,
                owner_provider_id: product.cloud_provider_id,
            });
        }

        Ok(())
    }

    pub fn validate_input(&self, input: &ConfigItemInput) -> IntegrityResult<()> {
        self.validate(input.cloud_provider_id, input.product_id)
    }

    /// 更新场景校验
    ///
    /// 关联 ID 均未变化时跳过查询；任一变化时执行完整校验
    /// （只换服务商也必须重新核对产品归属）
    ///
    /// # 返回
    /// - Ok(true): 执行了校验
    /// - Ok(false): 关联未变化，跳过
    pub fn validate_update(
        &self,
        existing: &ConfigItem,
        input: &ConfigItemInput,
    ) -> IntegrityResult<bool> {
        let provider_changed = existing.cloud_provider_id != input.cloud_provider_id;
        let product_changed = existing.product_id != input.product_id;

        if !provider_changed && !product_changed {
            return Ok(false);
        }

        self.validate_input(input)?;
        Ok(true)
    }

    /// 服务商必须存在
    pub fn ensure_provider(&self, provider_id: i64) -> IntegrityResult<Provider> {
        self.provider_repo
            .find_by_id(provider_id)?
            .ok_or(IntegrityError::ProviderNotFound(provider_id))
    }

    /// 产品必须存在
    pub fn ensure_product(&self, product_id: i64) -> IntegrityResult<Product> {
        self.product_repo
            .find_by_id(product_id)?
            .ok_or(IntegrityError::ProductNotFound(product_id))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{ProductInput, ProviderInput};
    use crate::repository::{RepositoryError, RepositoryResult};
    use chrono::Utc;
    use std::sync::Mutex;

    /// 记录查询顺序的内存仓储
    #[derive(Default)]
    pub(crate) struct MockCatalog {
        pub providers: Vec<Provider>,
        pub products: Vec<Product>,
        pub lookups: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl MockCatalog {
        pub fn with(providers: &[(i64, &str)], products: &[(i64, i64, &str)]) -> Self {
            let now = Utc::now();
            Self {
                providers: providers
                    .iter()
                    .map(|(id, code)| Provider {
                        id: *id,
                        name: code.to_uppercase(),
                        code: code.to_string(),
                        description: String::new(),
                        created_at: now,
                        updated_at: now,
                    })
                    .collect(),
                products: products
                    .iter()
                    .map(|(id, provider_id, code)| Product {
                        id: *id,
                        cloud_provider_id: *provider_id,
                        name: code.to_uppercase(),
                        code: code.to_string(),
                        description: String::new(),
                        created_at: now,
                        updated_at: now,
                    })
                    .collect(),
                ..Default::default()
            }
        }

        fn record(&self, what: String) -> RepositoryResult<()> {
            self.lookups.lock().unwrap().push(what);
            if self.fail {
                return Err(RepositoryError::DatabaseQueryError("disk I/O error".into()));
            }
            Ok(())
        }

        pub fn lookups(&self) -> Vec<String> {
            self.lookups.lock().unwrap().clone()
        }
    }

    impl ProviderRepository for MockCatalog {
        fn find_all(&self) -> RepositoryResult<Vec<Provider>> {
            Ok(self.providers.clone())
        }
        fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Provider>> {
            self.record(format!("provider:{}", id))?;
            Ok(self.providers.iter().find(|p| p.id == id).cloned())
        }
        fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Provider>> {
            Ok(self.providers.iter().find(|p| p.code == code).cloned())
        }
        fn insert(&self, _: &ProviderInput) -> RepositoryResult<Provider> {
            unimplemented!()
        }
        fn update(&self, _: i64, _: &ProviderInput) -> RepositoryResult<Provider> {
            unimplemented!()
        }
        fn delete(&self, _: i64) -> RepositoryResult<usize> {
            unimplemented!()
        }
    }

    impl ProductRepository for MockCatalog {
        fn find_all(&self) -> RepositoryResult<Vec<Product>> {
            Ok(self.products.clone())
        }
        fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
            self.record(format!("product:{}", id))?;
            Ok(self.products.iter().find(|p| p.id == id).cloned())
        }
        fn find_by_provider_id(&self, provider_id: i64) -> RepositoryResult<Vec<Product>> {
            Ok(self
                .products
                .iter()
                .filter(|p| p.cloud_provider_id == provider_id)
                .cloned()
                .collect())
        }
        fn find_by_provider_code(&self, _: &str) -> RepositoryResult<Vec<Product>> {
            unimplemented!()
        }
        fn find_by_code(&self, _: i64, _: &str) -> RepositoryResult<Option<Product>> {
            unimplemented!()
        }
        fn insert(&self, _: &ProductInput) -> RepositoryResult<Product> {
            unimplemented!()
        }
        fn update(&self, _: i64, _: &ProductInput) -> RepositoryResult<Product> {
            unimplemented!()
        }
        fn delete(&self, _: i64) -> RepositoryResult<usize> {
            unimplemented!()
        }
    }

    fn validator(catalog: &Arc<MockCatalog>) -> ReferenceValidator {
        ReferenceValidator::new(catalog.clone(), catalog.clone())
    }

    fn aws_catalog() -> Arc<MockCatalog> {
        Arc::new(MockCatalog::with(
            &[(1, "aws"), (2, "azure")],
            &[(10, 1, "ec2"), (20, 2, "vm")],
        ))
    }

    #[test]
    fn test_consistent_pair_passes() {
        let catalog = aws_catalog();
        assert!(validator(&catalog).validate(1, 10).is_ok());
        assert_eq!(catalog.lookups(), vec!["provider:1", "product:10"]);
    }

    #[test]
    fn test_mismatched_pair_rejected() {
        let catalog = aws_catalog();
        let err = validator(&catalog).validate(2, 10).unwrap_err();

        assert!(matches!(
            err,
            IntegrityError::ProductProviderMismatch {
                product_id: 10,
                provider_id: 2,
                owner_provider_id: 1
            }
        ));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_provider_checked_before_product() {
        let catalog = aws_catalog();
        let err = validator(&catalog).validate(99, 999).unwrap_err();

        assert!(matches!(err, IntegrityError::ProviderNotFound(99)));
        assert_eq!(catalog.lookups(), vec!["provider:99"]);
    }

    #[test]
    fn test_missing_product() {
        let catalog = aws_catalog();
        let err = validator(&catalog).validate(1, 999).unwrap_err();
        assert!(matches!(err, IntegrityError::ProductNotFound(999)));
    }

    #[test]
    fn test_store_failure_propagates() {
        let catalog = Arc::new(MockCatalog {
            fail: true,
            ..Default::default()
        });
        let err = validator(&catalog).validate(1, 10).unwrap_err();
        assert!(matches!(err, IntegrityError::Store(_)));
    }

    #[test]
    fn test_update_skips_when_references_unchanged() {
        let catalog = aws_catalog();
        let now = Utc::now();
        let existing = ConfigItem {
            id: 1,
            cloud_provider_id: 1,
            product_id: 10,
            name: "a".into(),
            recommended_value: String::new(),
            risk_description: String::new(),
            check_method: String::new(),
            configuration_method: String::new(),
            reference: String::new(),
            created_at: now,
            updated_at: now,
        };

        let mut input = ConfigItemInput::from(&existing);
        input.name = "renamed".into();
        assert!(!validator(&catalog).validate_update(&existing, &input).unwrap());
        assert!(catalog.lookups().is_empty());

        // 只改服务商，产品归属仍需核对
        input.cloud_provider_id = 2;
        let err = validator(&catalog)
            .validate_update(&existing, &input)
            .unwrap_err();
        assert!(matches!(err, IntegrityError::ProductProviderMismatch { .. }));
    }
}
