use super::model::{CreateProductRequest, Product};
use ignitor::persistence::MemoryTable;
use ignitor::prelude::*;
use uuid::Uuid;

pub struct ProductService {
    data: DataService<MemoryTable<Product>>,
}

impl ProductService {
    pub fn new(data: DataService<MemoryTable<Product>>) -> Self {
        Self { data }
    }

    pub async fn create(&self, req: CreateProductRequest) -> Result<Product> {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: req.name,
            price: req.price,
            created_at: None,
            updated_at: None,
        };
        self.data.create(product, None).await
    }

    pub async fn get(&self, id: String) -> Result<Product> {
        self.data
            .find_one(Box::new(move |p: &Product| p.id == id), None)
            .await?
            .ok_or_else(|| IgnitorError::not_found("Product not found"))
    }
}
