//! Data models for the Flopar client.
//!
//! These models follow the inventory backend's JSON field names.

mod batch;
mod product;
mod quadrature;
mod session;
mod user;

pub use batch::*;
pub use product::*;
pub use quadrature::*;
pub use session::*;
pub use user::*;
