//! Product catalog: storefront browsing, search, WhatsApp enquiries and
//! admin CRUD for products and their images.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/products` | Active products (`?category=&q=`) |
//! | GET | `/api/products/{id}` | Active product with images |
//! | GET | `/api/products/{id}/inquiry` | WhatsApp enquiry link |
//! | GET | `/api/admin/stats` | Catalog counters |
//! | GET, POST | `/api/admin/products` | List all / create |
//! | GET, PUT, DELETE | `/api/admin/products/{id}` | Read / replace / delete |
//! | PATCH | `/api/admin/products/{id}/active` | Show or hide |
//! | POST | `/api/admin/products/{id}/images` | Attach an image URL |
//! | DELETE | `/api/admin/products/{id}/images/{image_id}` | Detach an image |

pub mod dtos;
pub mod handlers;
pub mod inquiry;
pub mod models;
pub mod routes;
pub mod search;
pub mod services;
pub mod store;

pub use services::ProductService;
pub use store::{PgProductStore, ProductStore};
