//! Product admission rules.
//!
//! # Rules
//! - `name` must be non-empty
//! - `price` and `gst` must be strictly positive
//! - `licenceNumber` must be exactly one `word-word-word` token of
//!   lowercase ASCII letters
//!
//! All broken rules are collected and reported together, in the order
//! above, rather than stopping at the first one.

use std::sync::LazyLock;

use regex::Regex;

use crate::products::errors::{FieldViolation, ValidationError};
use crate::products::model::ProductCandidate;

pub const FIELD_NAME: &str = "name";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_GST: &str = "gst";
pub const FIELD_LICENCE_NUMBER: &str = "licenceNumber";

static LICENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]+-[a-z]+-[a-z]+$").expect("licence pattern is a valid regex")
});

/// Check a candidate against every rule.
pub fn validate(candidate: &ProductCandidate) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if candidate.name.is_empty() {
        violations.push(FieldViolation::RequiredFieldMissing { field: FIELD_NAME });
    }
    if !is_positive(candidate.price) {
        violations.push(FieldViolation::OutOfRange { field: FIELD_PRICE });
    }
    if !is_positive(candidate.tax_rate) {
        violations.push(FieldViolation::OutOfRange { field: FIELD_GST });
    }
    if !is_valid_licence_number(&candidate.licence_number) {
        violations.push(FieldViolation::PatternMismatch {
            field: FIELD_LICENCE_NUMBER,
        });
    }

    match ValidationError::from_violations(violations) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Whether `value` is an acceptable licence number.
pub fn is_valid_licence_number(value: &str) -> bool {
    !value.is_empty() && LICENCE_PATTERN.find_iter(value).count() == 1
}

// NaN compares false, so it is rejected along with zero and negatives.
fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// A candidate that passed [`validate`].
///
/// This is the only input the store accepts, so nothing unvalidated can be
/// admitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProduct(ProductCandidate);

impl ValidProduct {
    pub fn new(candidate: ProductCandidate) -> Result<Self, ValidationError> {
        validate(&candidate)?;
        Ok(Self(candidate))
    }

    pub fn candidate(&self) -> &ProductCandidate {
        &self.0
    }

    pub fn into_inner(self) -> ProductCandidate {
        self.0
    }
}

impl TryFrom<ProductCandidate> for ValidProduct {
    type Error = ValidationError;

    fn try_from(candidate: ProductCandidate) -> Result<Self, Self::Error> {
        Self::new(candidate)
    }
}
