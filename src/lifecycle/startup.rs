//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the product store from configuration
//! - Optionally seed the demo catalogue
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Seed records go through the same validator as client input

use std::sync::Arc;

use thiserror::Error;

use crate::config::StoreConfig;
use crate::products::{MemoryStore, ProductCandidate, ProductError, ProductService};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to seed product {name:?}: {source}")]
    Seed {
        name: String,
        #[source]
        source: ProductError,
    },
}

/// The products loaded when `seed_demo_data` is enabled.
pub fn demo_products() -> Vec<ProductCandidate> {
    vec![
        ProductCandidate {
            name: "Coffee".to_string(),
            description: "best coffee description".to_string(),
            price: 18.75,
            tax_rate: 1.25,
            licence_number: "upe-bev-coffee".to_string(),
        },
        ProductCandidate {
            name: "Tea".to_string(),
            description: "best tea description".to_string(),
            price: 8.75,
            tax_rate: 1.25,
            licence_number: "rjb-bev-tea".to_string(),
        },
    ]
}

/// Construct the product service described by `config`.
pub fn build_product_service(config: &StoreConfig) -> Result<ProductService, StartupError> {
    let store = Arc::new(MemoryStore::with_max_records(config.max_records));
    let service = ProductService::new(store);

    if config.seed_demo_data {
        for candidate in demo_products() {
            let name = candidate.name.clone();
            service
                .create(candidate)
                .map_err(|source| StartupError::Seed { name, source })?;
        }
        tracing::info!(products = service.count(), "Demo products loaded");
    }

    Ok(service)
}
