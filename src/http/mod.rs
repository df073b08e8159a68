//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (attach request ID)
//!     → products.rs (decode payload, call ProductService)
//!     → response.rs (map errors to status + JSON body)
//!     → Send to client
//! ```

pub mod middleware;
pub mod products;
pub mod request;
pub mod response;
pub mod server;
pub mod status;

pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use response::{ApiError, ErrorBody};
pub use server::{AppState, HttpServer};
