//! Product categories, stored as one JSON document in the site settings.
//!
//! Slugs are unique and act as the product-to-category key. A category that
//! products still reference can be renamed or hidden but not deleted, and
//! its slug cannot change.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod routes;
pub mod services;

pub use registry::CategoryError;
pub use services::CategoryService;
