//! Backend route table.

pub const TOKEN: &str = "/token";

// Batches
pub const LAST_BATCH: &str = "/product_batch/last-today";

// Products
pub const PRODUCTS: &str = "/product/";
pub const SEARCH_PRODUCTS: &str = "/product/search-product/";

pub fn product(id: i64) -> String {
    format!("/product/{}", id)
}

pub fn product_scan(id: i64) -> String {
    format!("/product/{}/scan", id)
}

pub fn confirm_quadrature(plate: &str) -> String {
    format!(
        "/product/patente/{}/confirm-quadrature",
        urlencoding::encode(plate)
    )
}

// Users and notifications
pub const USERS: &str = "/users/";
pub const ADMIN_PHONE: &str = "/users/admin-phone";
pub const SEND_WHATSAPP: &str = "/whatsapp/send";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plate_is_percent_encoded() {
        assert_eq!(
            confirm_quadrature("AB CD/12"),
            "/product/patente/AB%20CD%2F12/confirm-quadrature"
        );
    }
}
