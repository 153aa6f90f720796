//! Site settings: a flat key/value store resolved into typed configuration.
//!
//! Missing or malformed values never fail a read; they fall back to the
//! compiled-in defaults. The category list and size chart are stored as JSON
//! documents under their own keys.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/settings` | Public settings (active categories only) |
//! | GET | `/api/admin/settings` | Full settings |
//! | PUT | `/api/admin/settings` | Update scalar settings |
//! | PUT | `/api/admin/settings/size-chart` | Replace the size chart |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod services;
pub mod store;

pub use services::SettingsService;
pub use store::{PgSettingsStore, SettingsStore};
