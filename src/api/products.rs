//! Product endpoints.

use super::{endpoints, ApiClient};
use crate::errors::AppError;
use crate::models::{BatchId, Product, VerificationPatch};

impl ApiClient {
    /// GET /product/ - List a batch's products, optionally for one truck.
    pub async fn list_products(
        &self,
        batch: &BatchId,
        plate: Option<&str>,
    ) -> Result<Vec<Product>, AppError> {
        let mut query = vec![("batch_id", batch.as_str())];
        if let Some(plate) = plate {
            query.push(("patent", plate));
        }

        self.fetch(self.get(endpoints::PRODUCTS).query(&query))
            .await
    }

    /// GET /product/:id - Full product record.
    pub async fn product_detail(&self, id: i64) -> Result<Product, AppError> {
        self.fetch(self.get(&endpoints::product(id))).await
    }

    /// GET /product/search-product/ - Candidates for a scanned or typed code.
    pub async fn search_products(
        &self,
        code: &str,
        batch: &BatchId,
    ) -> Result<Vec<Product>, AppError> {
        let results: Option<Vec<Product>> = self
            .fetch(
                self.get(endpoints::SEARCH_PRODUCTS)
                    .query(&[("query", code), ("batch_id", batch.as_str())]),
            )
            .await?;

        Ok(results.unwrap_or_default())
    }

    /// PATCH /product/:id - Mark a product verified at one checkpoint.
    pub async fn patch_product(&self, id: i64, patch: &VerificationPatch) -> Result<(), AppError> {
        self.submit(self.patch(&endpoints::product(id)).json(patch))
            .await
    }

    /// POST /product/:id/scan - Append a scan event.
    pub async fn record_scan(&self, id: i64) -> Result<(), AppError> {
        self.submit(
            self.post(&endpoints::product_scan(id))
                .json(&serde_json::json!({})),
        )
        .await
    }
}
