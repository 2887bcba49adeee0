//! Code resolution and verification against the backend.

use chrono::Utc;

use super::resolve::eligible_candidates;
use super::NoMatch;
use crate::api::ApiClient;
use crate::errors::AppError;
use crate::models::{Checkpoint, Product, Role, Session, VerificationPatch};
use crate::screens::{BulkReport, Notice, Selection};

/// Result of pushing one code through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Exactly one candidate; it has been verified
    Verified(VerifiedProduct),
    /// Several candidates; the user must choose
    NeedsSelection(Vec<Product>),
    /// Nothing to verify
    NoMatch(NoMatch),
}

impl ScanOutcome {
    /// Dialog for the outcome. A pending selection has no dialog of its own.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            ScanOutcome::Verified(verified) => Some(verified.notice()),
            ScanOutcome::NeedsSelection(_) => None,
            ScanOutcome::NoMatch(no_match) => Some(no_match.notice()),
        }
    }
}

/// A product the backend accepted as verified.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedProduct {
    pub product: Product,
    pub checkpoint: Checkpoint,
}

impl VerifiedProduct {
    pub fn notice(&self) -> Notice {
        let mut message = format!(
            "Product: {}\nCode: {}",
            self.product.name, self.product.code
        );
        if self.checkpoint == Checkpoint::Warehouse {
            message.push_str(&format!(
                "\nPlate: {}",
                self.product.patent.as_deref().unwrap_or("-")
            ));
        }
        Notice::success("Product scanned!", message)
    }
}

/// Resolution pipeline bound to one session.
#[derive(Debug, Clone, Copy)]
pub struct ScanWorkflow<'a> {
    api: &'a ApiClient,
    session: &'a Session,
}

impl<'a> ScanWorkflow<'a> {
    pub fn new(api: &'a ApiClient, session: &'a Session) -> Self {
        Self { api, session }
    }

    /// Resolve a code that already passed the scanner's format filter.
    pub async fn process(&self, code: &str) -> Result<ScanOutcome, AppError> {
        let batch = self.api.last_batch_today().await?;
        let results = self.api.search_products(code, &batch).await?;
        tracing::info!("Code {} matched {} products in batch {}", code, results.len(), batch);

        match eligible_candidates(self.session, code, results) {
            Err(no_match) => {
                tracing::info!("No product to verify for {}: {:?}", code, no_match);
                Ok(ScanOutcome::NoMatch(no_match))
            }
            Ok(mut candidates) if candidates.len() == 1 => {
                let verified = self.verify(candidates.remove(0)).await?;
                Ok(ScanOutcome::Verified(verified))
            }
            Ok(candidates) => Ok(ScanOutcome::NeedsSelection(candidates)),
        }
    }

    /// Resolve a code typed by hand. Only blank input is rejected.
    pub async fn process_manual(&self, input: &str) -> Result<ScanOutcome, AppError> {
        let code = input.trim();
        if code.is_empty() {
            return Err(AppError::Validation("Enter the product code".to_string()));
        }
        self.process(code).await
    }

    /// Mark one product verified at the session's checkpoint and record the scan.
    pub async fn verify(&self, product: Product) -> Result<VerifiedProduct, AppError> {
        if self.session.role == Role::Driver {
            let on_my_truck = self
                .session
                .license_plate()
                .is_some_and(|plate| product.belongs_to_plate(plate));
            if !on_my_truck {
                return Err(AppError::Forbidden(format!(
                    "This product belongs to plate {}, you cannot scan it",
                    product.patent.as_deref().unwrap_or("-")
                )));
            }
        }

        let checkpoint = self.session.role.checkpoint();
        let patch =
            VerificationPatch::verified(checkpoint, self.session.user_id, Utc::now().to_rfc3339());

        self.api.patch_product(product.id, &patch).await?;
        self.api.record_scan(product.id).await?;

        tracing::info!(
            "Product {} ({}) verified for {}",
            product.id,
            product.code,
            checkpoint.label()
        );

        Ok(VerifiedProduct {
            product,
            checkpoint,
        })
    }

    /// Verify every checked candidate one after another.
    ///
    /// A rejected token stops the run and is returned as the error.
    pub async fn verify_selected(
        &self,
        selection: &Selection<Product>,
    ) -> Result<BulkReport, AppError> {
        let workflow = *self;
        selection
            .run_bulk(
                |product| product.code.clone(),
                move |product| async move { workflow.verify(product).await.map(|_| ()) },
            )
            .await
    }
}

/// Dialog summarizing a bulk verification.
pub fn bulk_notice(report: &BulkReport) -> Notice {
    if report.total == 0 {
        Notice::info("Nothing selected", "No product was verified.")
    } else if report.all_succeeded() {
        Notice::success("Products verified", report.summary())
    } else if report.succeeded.is_empty() {
        Notice::error("Verification failed", report.summary())
    } else {
        Notice::warning("Partially verified", report.summary())
    }
}
