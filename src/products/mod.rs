//! Product catalogue core.
//!
//! # Data Flow
//! ```text
//! decoded ProductCandidate
//!     → validator.rs (collect every rule violation)
//!     → ValidProduct (proof that the candidate passed)
//!     → store.rs (assign id / replace in place, under one lock)
//!     → Product (stored copy returned to the caller)
//! ```
//!
//! # Design Decisions
//! - The store only accepts `ValidProduct`, so validation cannot be skipped
//! - Client-caused failures are values (`ProductError`), never panics
//! - The store is a value injected at startup, not process-global state

pub mod errors;
pub mod model;
pub mod service;
pub mod store;
pub mod validator;

pub use errors::{FieldViolation, ProductError, ProductResult, StoreError, ValidationError};
pub use model::{Product, ProductCandidate, ProductId};
pub use service::ProductService;
pub use store::{MemoryStore, ProductRepository};
pub use validator::{validate, ValidProduct};
