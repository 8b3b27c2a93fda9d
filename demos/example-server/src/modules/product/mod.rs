use ignitor::persistence::MemoryDatabase;
use ignitor::prelude::*;

pub mod controller;
pub mod model;
pub mod service;

pub use controller::ProductController;
pub use model::Product;
pub use service::ProductService;

#[derive(Default)]
pub struct ProductModule {
    controller: Option<Arc<ProductController>>,
}

#[async_trait]
impl Module for ProductModule {
    fn name(&self) -> &str {
        "products"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    async fn setup_services(&mut self, ctx: &Arc<Context>) -> Result<()> {
        let table = ctx
            .database::<MemoryDatabase>()?
            .table::<Product>("products")
            .map_err(|e| IgnitorError::Internal(e.to_string()))?;

        let options = ServiceOptions {
            enable_audit_fields: true,
            ..ServiceOptions::default()
        };
        let service = Arc::new(ProductService::new(DataService::with_options(
            table, "Product", options,
        )));
        self.controller = Some(Arc::new(ProductController::new(service)));
        Ok(())
    }

    async fn setup_routes(&mut self, _ctx: &Arc<Context>) -> Result<Router> {
        let controller = self
            .controller
            .clone()
            .ok_or_else(|| IgnitorError::Internal("ProductModule services not set up".into()))?;
        Ok(ProductController::router(controller))
    }

    async fn cleanup(&mut self) -> Result<()> {
        self.controller = None;
        Ok(())
    }
}
