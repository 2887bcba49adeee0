//! Product list shown on every role screen.

use crate::api::ApiClient;
use crate::errors::AppError;
use crate::filter::ProductFilter;
use crate::models::{BatchId, Checkpoint, Product, Role, Session};

/// The day's products as one role sees them, plus the view filter.
#[derive(Debug, Clone)]
pub struct ProductBoard {
    pub role: Role,
    pub batch: BatchId,
    pub products: Vec<Product>,
    pub filter: ProductFilter,
}

impl ProductBoard {
    /// Fetch the current batch, then the products the session may see.
    ///
    /// Drivers only see their own truck.
    pub async fn load(api: &ApiClient, session: &Session) -> Result<Self, AppError> {
        let batch = api.last_batch_today().await?;

        let plate = match session.role {
            Role::Driver => Some(session.license_plate().ok_or_else(|| {
                AppError::Validation("Your account has no license plate assigned".to_string())
            })?),
            Role::Admin | Role::Warehouse => None,
        };

        let products = api.list_products(&batch, plate).await?;
        tracing::info!(
            "Loaded {} products for batch {} ({})",
            products.len(),
            batch,
            session.role
        );

        Ok(Self {
            role: session.role,
            batch,
            products,
            filter: ProductFilter::default(),
        })
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.role.checkpoint()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_pending_only(&mut self, pending_only: bool) {
        self.filter.pending_at = pending_only.then(|| self.checkpoint());
    }

    /// Products passing the current filter.
    pub fn visible(&self) -> Vec<&Product> {
        self.filter.apply(&self.products)
    }

    pub fn pending_count(&self) -> usize {
        let checkpoint = self.checkpoint();
        self.products
            .iter()
            .filter(|p| !p.is_verified_for(checkpoint))
            .count()
    }
}

/// One list entry.
pub fn render_card(product: &Product, checkpoint: Checkpoint) -> String {
    format!(
        "{} | code {} | plate {} | {} {} | {}",
        product.name,
        product.code,
        product.patent.as_deref().unwrap_or("-"),
        checkpoint.label(),
        product.state_for(checkpoint).as_str(),
        product.location.as_deref().unwrap_or("-"),
    )
}

/// Full record for the detail view.
pub fn render_detail(product: &Product) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    format!(
        "Code: {}\nName: {}\nAddress: {}\nClient: {}\nPhone: {}\nDriver status: {}\nWarehouse status: {}\nPlate: {}\nQuantity: {}",
        product.code,
        product.name,
        field(&product.address),
        field(&product.name_client),
        field(&product.phone_client),
        product.state_for(Checkpoint::Driver).as_str(),
        product.state_for(Checkpoint::Warehouse).as_str(),
        field(&product.patent),
        product
            .stock
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string()),
    )
}

/// One entry in a selection list.
pub fn render_candidate(product: &Product) -> String {
    format!(
        "{} : {} (plate {}, quantity {})",
        product.code,
        product.name,
        product.patent.as_deref().unwrap_or("-"),
        product
            .stock
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string()),
    )
}
