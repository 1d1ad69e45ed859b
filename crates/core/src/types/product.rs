//! Product catalog records.
//!
//! Field names and serde renames match the upstream catalog JSON
//! (`inStock`, lowercase category/gender, fractional shoe sizes).

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product as served by the catalog source. Never mutated by this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub gender: Gender,
    pub image: String,
    pub sizes: Vec<Size>,
    pub rating: f32,
    pub reviews: u32,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
    pub description: String,
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Running,
    Casual,
    Boots,
}

impl Category {
    /// Lowercase name as used in the catalog JSON and filter queries.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Casual => "casual",
            Self::Boots => "boots",
        }
    }
}

/// Target gender/age segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
    Kids,
}

impl Gender {
    /// Lowercase name as used in the catalog JSON and filter queries.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kids => "kids",
        }
    }
}

/// A shoe size, stored in tenths so half sizes stay exact and hashable.
///
/// Serializes as the fractional number the catalog uses (`7.5`), but the
/// in-memory representation is an integer so sizes can key cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Size(u16);

/// Error constructing a [`Size`] from a fractional value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SizeError {
    #[error("size {0} is out of range")]
    OutOfRange(f64),
    #[error("size {0} is not a whole or half size")]
    NotHalfStep(f64),
}

impl Size {
    /// Create a whole size (e.g., UK 9).
    #[must_use]
    pub const fn whole(size: u16) -> Self {
        Self(size * 10)
    }

    /// Create a half size (e.g., UK 9.5).
    #[must_use]
    pub const fn half(size: u16) -> Self {
        Self(size * 10 + 5)
    }

    /// The size in tenths (9.5 -> 95).
    #[must_use]
    pub const fn as_tenths(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 10 == 0 {
            write!(f, "{}", self.0 / 10)
        } else {
            write!(f, "{}.{}", self.0 / 10, self.0 % 10)
        }
    }
}

impl From<Size> for f64 {
    fn from(size: Size) -> Self {
        Self::from(size.0) / 10.0
    }
}

impl TryFrom<f64> for Size {
    type Error = SizeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !(0.0..=100.0).contains(&value) {
            return Err(SizeError::OutOfRange(value));
        }
        let tenths = (value * 10.0).round();
        if (value * 10.0 - tenths).abs() > f64::EPSILON || tenths as u16 % 5 != 0 {
            return Err(SizeError::NotHalfStep(value));
        }
        Ok(Self(tenths as u16))
    }
}
