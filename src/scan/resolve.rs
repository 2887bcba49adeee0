//! Candidate filtering for a scanned or typed code.

use crate::models::{Checkpoint, Product, Role, Session};
use crate::screens::Notice;

/// Why a code did not lead to any product to verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoMatch {
    /// The search returned nothing
    NotFound { code: String },
    /// Everything found belongs to another truck
    PlateNotAuthorized { code: String },
    /// Everything found is already verified at the session's checkpoint
    NothingPending {
        already_verified: usize,
        checkpoint: Checkpoint,
    },
}

impl NoMatch {
    pub fn notice(&self) -> Notice {
        match self {
            NoMatch::NotFound { code } => Notice::info(
                "Product not found",
                format!("No product exists with code: {}", code),
            ),
            NoMatch::PlateNotAuthorized { .. } => Notice::info(
                "Plate not authorized",
                "The result does not belong to your plate.",
            ),
            NoMatch::NothingPending {
                already_verified,
                checkpoint,
            } => Notice::info(
                "Nothing pending",
                format!(
                    "All ({}) are already verified for {}.",
                    already_verified,
                    checkpoint.label()
                ),
            ),
        }
    }
}

/// Reduce search results to the products this session may still verify.
///
/// Drivers keep only products on their own plate; then anything already
/// verified at the session's checkpoint is dropped.
pub fn eligible_candidates(
    session: &Session,
    code: &str,
    results: Vec<Product>,
) -> Result<Vec<Product>, NoMatch> {
    if results.is_empty() {
        return Err(NoMatch::NotFound {
            code: code.to_string(),
        });
    }

    let owned: Vec<Product> = match session.role {
        Role::Driver => match session.license_plate() {
            Some(plate) => results
                .into_iter()
                .filter(|p| p.belongs_to_plate(plate))
                .collect(),
            None => Vec::new(),
        },
        Role::Admin | Role::Warehouse => results,
    };

    if owned.is_empty() {
        return Err(NoMatch::PlateNotAuthorized {
            code: code.to_string(),
        });
    }

    let checkpoint = session.role.checkpoint();
    let owned_count = owned.len();
    let pending: Vec<Product> = owned
        .into_iter()
        .filter(|p| !p.is_verified_for(checkpoint))
        .collect();

    if pending.is_empty() {
        return Err(NoMatch::NothingPending {
            already_verified: owned_count,
            checkpoint,
        });
    }

    Ok(pending)
}
