//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{domain::users::records::UserId, ids::TypedId};

/// Product Id
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category: Category,
    pub image_url: Option<String>,
    pub seller_id: UserId,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Electronics,
    Fashion,
    Home,
    Books,
    Sports,
    Toys,
    Food,
    Other,
}

impl Category {
    pub const ALL: [Self; 8] = [
        Self::Electronics,
        Self::Fashion,
        Self::Home,
        Self::Books,
        Self::Sports,
        Self::Toys,
        Self::Food,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "ELECTRONICS",
            Self::Fashion => "FASHION",
            Self::Home => "HOME",
            Self::Books => "BOOKS",
            Self::Sports => "SPORTS",
            Self::Toys => "TOYS",
            Self::Food => "FOOD",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct InvalidCategoryError(pub String);

impl FromStr for Category {
    type Err = InvalidCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| InvalidCategoryError(value.to_string()))
    }
}
