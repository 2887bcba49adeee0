//! Batch identifier model.

use serde::{Deserialize, Serialize};

/// Opaque identifier of the day's product batch.
///
/// The backend answers with either a number or a string; both are kept as text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawBatchId", into = "String")]
pub struct BatchId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBatchId {
    Number(i64),
    Text(String),
}

impl From<RawBatchId> for BatchId {
    fn from(raw: RawBatchId) -> Self {
        match raw {
            RawBatchId::Number(n) => BatchId(n.to_string()),
            RawBatchId::Text(s) => BatchId(s.trim().to_string()),
        }
    }
}

impl From<BatchId> for String {
    fn from(id: BatchId) -> Self {
        id.0
    }
}

impl BatchId {
    pub fn new(id: impl Into<String>) -> Self {
        BatchId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_text_ids() {
        let numeric: BatchId = serde_json::from_str("42").unwrap();
        let text: BatchId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(numeric, text);
        assert_eq!(numeric.as_str(), "42");
    }

    #[test]
    fn test_null_means_no_batch() {
        let missing: Option<BatchId> = serde_json::from_str("null").unwrap();
        assert!(missing.is_none());
    }
}
