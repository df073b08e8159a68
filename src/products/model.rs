//! Product record types.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Store-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for u64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// A product as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Goods and services tax rate.
    #[serde(rename = "gst")]
    pub tax_rate: f64,
    pub licence_number: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Reserved for soft deletion; nothing sets it yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

/// A decoded product payload that has not been validated or stored.
///
/// Absent fields fall back to empty values so that the validator, not the
/// decoder, reports what is missing. There is no `id` field: whatever a
/// client sends under that key is skipped during decoding, since ids are
/// only ever assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductCandidate {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "gst")]
    pub tax_rate: f64,
    pub licence_number: String,
}
