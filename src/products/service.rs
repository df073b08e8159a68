//! Validation-then-storage pipeline shared by every transport.

use std::fmt;
use std::sync::Arc;

use crate::observability::metrics;
use crate::products::errors::{ProductResult, ValidationError};
use crate::products::model::{Product, ProductCandidate, ProductId};
use crate::products::store::ProductRepository;
use crate::products::validator::ValidProduct;

/// Entry point for list, create and replace.
#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// All products in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.repository.list()
    }

    /// Validate `candidate` and store it under a new id.
    pub fn create(&self, candidate: ProductCandidate) -> ProductResult<Product> {
        let valid = admit(candidate)?;
        let stored = self.repository.insert(valid)?;
        metrics::record_store_size(self.repository.len());
        Ok(stored)
    }

    /// Validate `candidate` and use it to replace product `id` wholesale.
    ///
    /// Validation runs first, so a malformed payload is reported even when
    /// `id` does not exist.
    pub fn replace(&self, id: ProductId, candidate: ProductCandidate) -> ProductResult<Product> {
        let valid = admit(candidate)?;
        Ok(self.repository.update_by_id(id, valid)?)
    }

    /// Number of stored products.
    pub fn count(&self) -> usize {
        self.repository.len()
    }
}

impl fmt::Debug for ProductService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductService")
            .field("products", &self.repository.len())
            .finish()
    }
}

fn admit(candidate: ProductCandidate) -> Result<ValidProduct, ValidationError> {
    ValidProduct::new(candidate).inspect_err(|err| {
        for violation in err.violations() {
            metrics::record_validation_failure(violation.field());
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::errors::{FieldViolation, ProductError, StoreError};
    use crate::products::store::MemoryStore;

    fn service() -> ProductService {
        ProductService::new(Arc::new(MemoryStore::new()))
    }

    fn coffee() -> ProductCandidate {
        ProductCandidate {
            name: "Coffee".into(),
            description: "best coffee description".into(),
            price: 18.75,
            tax_rate: 1.25,
            licence_number: "upe-bev-coffee".into(),
        }
    }

    #[test]
    fn test_create_assigns_id() {
        let service = service();
        let stored = service.create(coffee()).unwrap();
        assert_eq!(stored.id, ProductId(1));
        assert_eq!(service.count(), 1);
    }

    #[test]
    fn test_invalid_candidate_never_reaches_store() {
        let service = service();
        let candidate = ProductCandidate {
            name: "X".into(),
            price: 0.0,
            tax_rate: 1.0,
            licence_number: "a-b-c".into(),
            ..Default::default()
        };

        let err = service.create(candidate).unwrap_err();
        let violations = err.validation().unwrap();
        assert_eq!(
            violations.violations(),
            &[FieldViolation::OutOfRange { field: "price" }]
        );
        assert_eq!(service.count(), 0);

        // A rejected create does not burn an id.
        assert_eq!(service.create(coffee()).unwrap().id, ProductId(1));
    }

    #[test]
    fn test_replace_unknown_id() {
        let service = service();
        service.create(coffee()).unwrap();

        let err = service.replace(ProductId(7), coffee()).unwrap_err();
        assert_eq!(
            err,
            ProductError::Store(StoreError::NotFound { id: ProductId(7) })
        );
    }

    #[test]
    fn test_replace_validates_before_lookup() {
        let service = service();
        let mut bad = coffee();
        bad.licence_number = "upe123".into();

        let err = service.replace(ProductId(7), bad).unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[test]
    fn test_replace_keeps_id() {
        let service = service();
        service.create(coffee()).unwrap();

        let mut tea = coffee();
        tea.name = "Tea".into();
        let stored = service.replace(ProductId(1), tea).unwrap();

        assert_eq!(stored.id, ProductId(1));
        assert_eq!(service.list()[0].name, "Tea");
    }
}
