//! In-memory product store.
//!
//! # Responsibilities
//! - Own the authoritative, insertion-ordered product list
//! - Assign ids from a high-water mark that only grows
//! - Serialize writers against each other and against readers
//!
//! # Design Decisions
//! - One `RwLock` guards the list and the id counter together, since
//!   assigning an id depends on what the list has held
//! - Lookups are a linear scan; the collection is small
//! - No I/O or `.await` happens while the lock is held

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use jiff::Timestamp;

use crate::products::errors::StoreError;
use crate::products::model::{Product, ProductId};
use crate::products::validator::ValidProduct;

/// Storage backend for products.
pub trait ProductRepository: Send + Sync {
    /// Snapshot of every product in insertion order.
    fn list(&self) -> Vec<Product>;

    /// Store a new product under a freshly assigned id.
    fn insert(&self, product: ValidProduct) -> Result<Product, StoreError>;

    /// Replace the product with `id` in place, keeping its id and position.
    fn update_by_id(&self, id: ProductId, product: ValidProduct) -> Result<Product, StoreError>;

    /// Number of stored products.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
struct Inner {
    products: Vec<Product>,
    /// Next id to hand out. Always greater than every id ever assigned.
    next_id: u64,
}

/// A [`ProductRepository`] held entirely in process memory.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    max_records: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::with_max_records(None)
    }

    /// Create an empty store that refuses inserts past `max_records`.
    pub fn with_max_records(max_records: Option<usize>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                products: Vec::new(),
                next_id: 1,
            }),
            max_records,
        }
    }

    // Every critical section leaves `Inner` consistent, so a panic in another
    // holder does not invalidate the data.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductRepository for MemoryStore {
    fn list(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    fn insert(&self, product: ValidProduct) -> Result<Product, StoreError> {
        let candidate = product.into_inner();
        let mut inner = self.write();

        if let Some(limit) = self.max_records {
            if inner.products.len() >= limit {
                return Err(StoreError::CapacityExceeded { limit });
            }
        }

        let id = ProductId(inner.next_id);
        inner.next_id += 1;

        let now = Timestamp::now();
        let stored = Product {
            id,
            name: candidate.name,
            description: candidate.description,
            price: candidate.price,
            tax_rate: candidate.tax_rate,
            licence_number: candidate.licence_number,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        inner.products.push(stored.clone());

        tracing::debug!(product_id = %id, total = inner.products.len(), "Product inserted");
        Ok(stored)
    }

    fn update_by_id(&self, id: ProductId, product: ValidProduct) -> Result<Product, StoreError> {
        let candidate = product.into_inner();
        let mut inner = self.write();

        let slot = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound { id })?;

        *slot = Product {
            id,
            name: candidate.name,
            description: candidate.description,
            price: candidate.price,
            tax_rate: candidate.tax_rate,
            licence_number: candidate.licence_number,
            created_at: slot.created_at,
            updated_at: Timestamp::now(),
            deleted_at: slot.deleted_at,
        };

        tracing::debug!(product_id = %id, "Product replaced");
        Ok(slot.clone())
    }

    fn len(&self) -> usize {
        self.read().products.len()
    }
}
