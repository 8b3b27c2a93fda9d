//! Data-access service base
//!
//! [`DataService`] wraps one [`Model`] and normalizes its failures: whatever the
//! adapter reports is logged and reclassified as [`IgnitorError::NotFound`] or
//! [`IgnitorError::Database`], so raw persistence errors never travel further up.

use crate::error::{IgnitorError, Result};
use crate::persistence::{Auditable, CreateArgs, Model, PersistenceError};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

/// Behaviour switches for a [`DataService`].
///
/// Partial settings merge over the defaults, either with struct update syntax or
/// through serde:
///
/// ```
/// use ignitor::service::ServiceOptions;
///
/// let options = ServiceOptions {
///     enable_audit_fields: true,
///     ..ServiceOptions::default()
/// };
/// assert_eq!(options.default_page_size, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceOptions {
    pub enable_soft_delete: bool,
    /// Stamp `created_at`/`updated_at` on create
    pub enable_audit_fields: bool,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            enable_soft_delete: false,
            enable_audit_fields: false,
            default_page_size: 10,
            max_page_size: 1000,
        }
    }
}

pub struct DataService<M: Model> {
    model: Arc<M>,
    model_name: String,
    options: ServiceOptions,
}

impl<M: Model> Clone for DataService<M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            model_name: self.model_name.clone(),
            options: self.options.clone(),
        }
    }
}

impl<M: Model> DataService<M> {
    pub fn new(model: Arc<M>, model_name: impl Into<String>) -> Self {
        Self::with_options(model, model_name, ServiceOptions::default())
    }

    pub fn with_options(model: Arc<M>, model_name: impl Into<String>, options: ServiceOptions) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            options,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// First record matching `filter`; `Ok(None)` when nothing matches.
    pub async fn find_one(
        &self,
        filter: M::Filter,
        include: Option<M::Include>,
    ) -> Result<Option<M::Record>> {
        self.model
            .find_first(filter, include)
            .await
            .map_err(|e| self.handle_database_error(e, "findOne"))
    }

    /// Create a record, stamping audit timestamps first when enabled.
    pub async fn create(
        &self,
        mut data: M::CreateInput,
        include: Option<M::Include>,
    ) -> Result<M::Record> {
        if self.options.enable_audit_fields {
            let now = Utc::now();
            data.stamp_audit_fields(now, now);
        }

        self.model
            .create(CreateArgs { data, include })
            .await
            .map_err(|e| self.handle_database_error(e, "create"))
    }

    /// Page size to use for a request: the default when none is asked for,
    /// capped at `max_page_size`, never below 1.
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.options.default_page_size)
            .min(self.options.max_page_size)
            .max(1)
    }

    fn handle_database_error(&self, error: PersistenceError, operation: &str) -> IgnitorError {
        tracing::error!(
            model = %self.model_name,
            operation,
            code = ?error.code,
            "Database error in {}.{}: {}",
            self.model_name,
            operation,
            error.message
        );

        if error.is_record_not_found() {
            return IgnitorError::not_found(format!("{} not found", self.model_name));
        }

        IgnitorError::database(
            format!("Database operation failed: {}.{}", self.model_name, operation),
            error.message,
            error.code,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{Auditable, MemoryTable};
    use chrono::{DateTime, Duration};

    #[derive(Debug, Clone, PartialEq)]
    struct Product {
        sku: String,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    }

    impl Auditable for Product {
        fn stamp_audit_fields(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
            self.created_at = Some(created_at);
            self.updated_at = Some(updated_at);
        }
    }

    fn product(sku: &str) -> Product {
        Product {
            sku: sku.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn service(options: ServiceOptions) -> (Arc<MemoryTable<Product>>, DataService<MemoryTable<Product>>) {
        let table = Arc::new(MemoryTable::new("products"));
        let service = DataService::with_options(Arc::clone(&table), "Product", options);
        (table, service)
    }

    #[tokio::test]
    async fn find_one_miss_is_none_not_error() {
        let (_, service) = service(ServiceOptions::default());
        let found = service
            .find_one(Box::new(|p: &Product| p.sku == "missing"), None)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn create_then_find_one() {
        let (_, service) = service(ServiceOptions::default());
        service.create(product("sku-1"), None).await.unwrap();

        let found = service
            .find_one(Box::new(|p: &Product| p.sku == "sku-1"), None)
            .await
            .unwrap();
        assert_eq!(found.map(|p| p.sku), Some("sku-1".to_string()));
    }

    #[tokio::test]
    async fn audit_fields_are_stamped_only_when_enabled() {
        let (_, plain) = service(ServiceOptions::default());
        let created = plain.create(product("a"), None).await.unwrap();
        assert_eq!(created.created_at, None);
        assert_eq!(created.updated_at, None);

        let (_, audited) = service(ServiceOptions {
            enable_audit_fields: true,
            ..ServiceOptions::default()
        });
        let before = Utc::now();
        let created = audited.create(product("b"), None).await.unwrap();

        let created_at = created.created_at.unwrap();
        assert_eq!(Some(created_at), created.updated_at);
        assert!(created_at >= before);
        assert!(created_at - before < Duration::seconds(1));
    }

    #[tokio::test]
    async fn not_found_code_becomes_not_found_error() {
        let (table, service) = service(ServiceOptions::default());
        table.fail_next(PersistenceError::record_not_found("Record to update not found."));

        let err = service.create(product("x"), None).await.unwrap_err();
        assert!(matches!(err, IgnitorError::NotFound(ref msg) if msg == "Product not found"));
    }

    #[tokio::test]
    async fn other_codes_become_database_error_with_code_preserved() {
        let (table, service) = service(ServiceOptions::default());
        table.fail_next(PersistenceError::with_code("23505", "duplicate key"));

        match service.create(product("x"), None).await.unwrap_err() {
            IgnitorError::Database { message, details } => {
                assert_eq!(message, "Database operation failed: Product.create");
                assert_eq!(details.code.as_deref(), Some("23505"));
                assert_eq!(details.original_error, "duplicate key");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        table.fail_next(PersistenceError::new("timeout"));
        let err = service
            .find_one(Box::new(|_: &Product| true), None)
            .await
            .unwrap_err();
        assert!(matches!(err, IgnitorError::Database { ref details, .. } if details.code.is_none()));
    }

    #[test]
    fn options_merge_over_defaults() {
        let options: ServiceOptions =
            serde_json::from_str(r#"{"enableAuditFields": true, "maxPageSize": 50}"#).unwrap();
        assert!(options.enable_audit_fields);
        assert!(!options.enable_soft_delete);
        assert_eq!(options.default_page_size, 10);
        assert_eq!(options.max_page_size, 50);
    }

    #[test]
    fn page_size_is_capped() {
        let (_, service) = service(ServiceOptions {
            max_page_size: 100,
            ..ServiceOptions::default()
        });
        assert_eq!(service.page_size(None), 10);
        assert_eq!(service.page_size(Some(500)), 100);
        assert_eq!(service.page_size(Some(0)), 1);
    }
}
