//! Batch endpoints.

use super::{endpoints, ApiClient};
use crate::errors::AppError;
use crate::models::BatchId;

impl ApiClient {
    /// GET /product_batch/last-today - Resolve the batch created today.
    pub async fn last_batch_today(&self) -> Result<BatchId, AppError> {
        let batch: Option<BatchId> = self.fetch(self.get(endpoints::LAST_BATCH)).await?;
        let batch = batch
            .filter(|b| !b.as_str().is_empty())
            .ok_or_else(|| AppError::NotFound("No batch has been created today".to_string()))?;

        tracing::debug!("Current batch: {}", batch);
        Ok(batch)
    }
}
