//! Product model as returned by the inventory backend.

use serde::{Deserialize, Serialize};

use super::Checkpoint;

/// Status value the backend uses for a verified checkpoint.
pub const VERIFIED: &str = "Verificado";

/// Per-checkpoint verification state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum VerificationState {
    #[serde(rename = "Verificado")]
    Verified,
    #[default]
    #[serde(rename = "Pendiente")]
    #[serde(other)]
    Pending,
}

impl VerificationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationState::Verified => VERIFIED,
            VerificationState::Pending => "Pendiente",
        }
    }
}

/// A product line scheduled in a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_code: Option<String>,
    pub name: String,
    /// License plate of the truck the product is loaded on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patent: Option<String>,
    /// Driver verification state
    #[serde(default)]
    pub status_p: Option<VerificationState>,
    /// Warehouse verification state
    #[serde(default)]
    pub status_b: Option<VerificationState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl Product {
    pub fn state_for(&self, checkpoint: Checkpoint) -> VerificationState {
        let state = match checkpoint {
            Checkpoint::Driver => &self.status_p,
            Checkpoint::Warehouse => &self.status_b,
        };
        state.clone().unwrap_or_default()
    }

    pub fn is_verified_for(&self, checkpoint: Checkpoint) -> bool {
        self.state_for(checkpoint) == VerificationState::Verified
    }

    /// Whether the product is loaded on the given truck.
    pub fn belongs_to_plate(&self, plate: &str) -> bool {
        matches!(self.patent.as_deref().map(str::trim), Some(p) if !p.is_empty() && p == plate)
    }
}

/// Partial update marking a product verified at one checkpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VerificationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_p: Option<VerificationState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by_p: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at_p: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_b: Option<VerificationState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by_b: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at_b: Option<String>,
}

impl VerificationPatch {
    pub fn verified(checkpoint: Checkpoint, user_id: i64, at: String) -> Self {
        match checkpoint {
            Checkpoint::Driver => Self {
                status_p: Some(VerificationState::Verified),
                verified_by_p: Some(user_id),
                verified_at_p: Some(at),
                status_b: None,
                verified_by_b: None,
                verified_at_b: None,
            },
            Checkpoint::Warehouse => Self {
                status_p: None,
                verified_by_p: None,
                verified_at_p: None,
                status_b: Some(VerificationState::Verified),
                verified_by_b: Some(user_id),
                verified_at_b: Some(at),
            },
        }
    }
}
