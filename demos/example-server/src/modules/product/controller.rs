use super::model::{CreateProductRequest, Product};
use super::service::ProductService;
use axum::routing::{get, post};
use ignitor::prelude::*;

pub struct ProductController {
    service: Arc<ProductService>,
}

impl Controller for ProductController {}

impl ProductController {
    pub fn new(service: Arc<ProductService>) -> Self {
        Self { service }
    }

    pub fn router(controller: Arc<Self>) -> Router {
        Router::new()
            .route("/products", post(create))
            .route("/products/{id}", get(get_one))
            .with_state(controller)
    }
}

async fn create(
    State(controller): State<Arc<ProductController>>,
    channel: ResponseChannel,
    Json(req): Json<CreateProductRequest>,
) -> Result<ApiResponse<Product>> {
    let product = controller.service.create(req).await?;
    Ok(controller.send_created_response(channel, product, None))
}

async fn get_one(
    State(controller): State<Arc<ProductController>>,
    channel: ResponseChannel,
    Path(id): Path<String>,
) -> Result<ApiResponse<Product>> {
    let product = controller.service.get(id).await?;
    Ok(controller.send_response(channel, None, StatusCode::Ok, Some(product)))
}
