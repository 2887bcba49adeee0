//! Quadrature (truck reconciliation) and notification payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Product the backend still expects to be verified before accepting a quadrature.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PendingProduct {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Structured rejection detail for a quadrature request.
#[derive(Debug, Clone, Deserialize)]
pub struct QuadratureRejection {
    #[serde(default)]
    pub pending_products: Vec<PendingProduct>,
}

impl QuadratureRejection {
    /// Pull the pending product codes out of an error `detail`, if it has that shape.
    pub fn pending_codes(detail: &Value) -> Option<Vec<String>> {
        if !detail.get("pending_products").is_some_and(Value::is_array) {
            return None;
        }
        let rejection: QuadratureRejection = serde_json::from_value(detail.clone()).ok()?;
        Some(
            rejection
                .pending_products
                .into_iter()
                .map(|p| p.code)
                .collect(),
        )
    }
}

/// How the backend answered a quadrature confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmReply {
    Accepted,
    /// Refused with a 4xx; `detail` is the raw error detail, if any
    Rejected { detail: Option<Value> },
}

/// Reply from the administrator contact lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminPhone {
    #[serde(default)]
    pub phone: Option<String>,
}

/// Outbound WhatsApp message.
#[derive(Debug, Clone, Serialize)]
pub struct WhatsAppMessage {
    pub to: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pending_codes_from_detail() {
        let detail = json!({
            "pending_products": [{ "code": "111", "name": "Mesa" }, { "code": "222" }]
        });
        assert_eq!(
            QuadratureRejection::pending_codes(&detail),
            Some(vec!["111".to_string(), "222".to_string()])
        );
    }

    #[test]
    fn test_pending_codes_absent() {
        assert_eq!(QuadratureRejection::pending_codes(&json!("texto")), None);
        assert_eq!(QuadratureRejection::pending_codes(&json!({ "other": 1 })), None);
    }
}
