//! Product validation and storage errors.

use serde::Serialize;
use thiserror::Error;

use crate::products::model::ProductId;

/// A single rule a candidate product broke.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldViolation {
    #[error("{field} is required")]
    RequiredFieldMissing { field: &'static str },

    #[error("{field} must be greater than zero")]
    OutOfRange { field: &'static str },

    #[error("{field} does not match the expected pattern")]
    PatternMismatch { field: &'static str },
}

impl FieldViolation {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::RequiredFieldMissing { field }
            | Self::OutOfRange { field }
            | Self::PatternMismatch { field } => field,
        }
    }
}

/// Every violation found in one candidate. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid product: {}", join_violations(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Returns `None` when there is nothing to report.
    pub(crate) fn from_violations(violations: Vec<FieldViolation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by a product store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("product {id} not found")]
    NotFound { id: ProductId },

    #[error("product store is full ({limit} records)")]
    CapacityExceeded { limit: usize },
}

/// Outcome of a create or replace request that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProductError {
    /// The validation failure, if that is what this is.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(_) => None,
        }
    }
}

/// Result type for product operations.
pub type ProductResult<T> = Result<T, ProductError>;
