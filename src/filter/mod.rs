//! Local product list filtering.
//!
//! Runs over the already-fetched list; never touches the backend.

use crate::models::{Checkpoint, Product};

/// View filter applied to a product list.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against name and codes
    pub query: String,
    /// Restrict to products not yet verified at this checkpoint
    pub pending_at: Option<Checkpoint>,
}

impl ProductFilter {
    /// Whether a single product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(checkpoint) = self.pending_at {
            if product.is_verified_for(checkpoint) {
                return false;
            }
        }

        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        product.name.to_lowercase().contains(&needle)
            || product.code.to_lowercase().contains(&needle)
            || product
                .secondary_code
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
    }

    /// Apply the filter, keeping the original order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VerificationState;

    fn product(id: i64, code: &str, name: &str) -> Product {
        Product {
            id,
            code: code.to_string(),
            secondary_code: None,
            name: name.to_string(),
            patent: None,
            status_p: None,
            status_b: None,
            name_client: None,
            phone_client: None,
            address: None,
            location: None,
            stock: None,
        }
    }

    fn query(text: &str) -> ProductFilter {
        ProductFilter {
            query: text.to_string(),
            pending_at: None,
        }
    }

    fn pending(text: &str, checkpoint: Checkpoint) -> ProductFilter {
        ProductFilter {
            query: text.to_string(),
            pending_at: Some(checkpoint),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "111", "Mesa comedor"),
            product(2, "222", "Silla"),
            product(3, "123", "Lampara"),
        ]
    }

    #[test]
    fn test_query_matches_code_substring() {
        let products = sample();
        let codes: Vec<&str> = query("12")
            .apply(&products)
            .iter()
            .map(|p| p.code.as_str())
            .collect();
        assert_eq!(codes, vec!["123"]);
    }

    #[test]
    fn test_query_is_case_insensitive_on_name() {
        let products = sample();
        let hits = query("SILL").apply(&products);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn test_blank_query_keeps_everything() {
        let products = sample();
        assert_eq!(query("   ").apply(&products).len(), 3);
    }

    #[test]
    fn test_secondary_code_is_searched() {
        let mut products = sample();
        products[1].secondary_code = Some("ALT-900".to_string());
        let hits = query("alt-9").apply(&products);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn test_pending_toggle_applies_before_query() {
        let mut products = sample();
        products[2].status_p = Some(VerificationState::Verified);
        products[0].status_b = Some(VerificationState::Verified);

        let driver_pending = pending("1", Checkpoint::Driver);
        let ids: Vec<i64> = driver_pending.apply(&products).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);

        let warehouse_pending = pending("", Checkpoint::Warehouse);
        let ids: Vec<i64> = warehouse_pending.apply(&products).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
