//! In-memory product catalogue HTTP service.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!                 │                   PRODUCT API                     │
//!                 │                                                   │
//!   Request ──────┼─▶ http::server ─▶ http::products ─▶ products::    │
//!                 │   (middleware)     (decode)         service       │
//!                 │                                       │           │
//!                 │                         validator ◀───┤           │
//!                 │                                       ▼           │
//!   Response ◀────┼── http::response ◀──────────────── store          │
//!                 │   (status mapping)              (RwLock<Vec>)     │
//!                 │                                                   │
//!                 │   config · lifecycle · observability              │
//!                 └──────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod products;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use products::{MemoryStore, ProductService};
