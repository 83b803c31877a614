//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product catalog categories
///
/// Wire format uses the display names ("Coffee Bean", "Pastry", ...),
/// matching what existing catalog data stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "Coffee Bean")]
    CoffeeBean,
    Pastry,
    Equipment,
    Ingredient,
    Merchandise,
}

impl ProductType {
    /// Display name, identical to the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Self::CoffeeBean => "Coffee Bean",
            Self::Pastry => "Pastry",
            Self::Equipment => "Equipment",
            Self::Ingredient => "Ingredient",
            Self::Merchandise => "Merchandise",
        }
    }

    /// All known product types
    pub const ALL: [ProductType; 5] = [
        Self::CoffeeBean,
        Self::Pastry,
        Self::Equipment,
        Self::Ingredient,
        Self::Merchandise,
    ];
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Product entity
///
/// `sku` is stored trimmed and uppercased, unique per owner.
/// `qr_reference` is always derivable from `sku` alone and is regenerated
/// whenever the SKU changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<String>,
    pub owner_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub price: Decimal,
    pub stock: i64,
    pub sku: String,
    pub description: Option<String>,
    pub supplier: Option<String>,
    /// Public detail URL embedded in the product's QR code
    pub qr_reference: String,
    /// Unix epoch milliseconds, re-stamped on every mutation
    pub last_updated: i64,
}

impl Product {
    /// Timestamp as a chrono value, for display formatting
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_updated)
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub price: Decimal,
    pub stock: i64,
    /// Optional; a blank or missing SKU is generated from the name
    pub sku: Option<String>,
    pub description: Option<String>,
    pub supplier: Option<String>,
}

/// Update product payload (partial merge)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub supplier: Option<String>,
}

impl ProductUpdate {
    /// True when the update would change the SKU or the name, which
    /// requires the QR reference to be regenerated.
    pub fn touches_identity(&self) -> bool {
        self.sku.is_some() || self.name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_wire_format() {
        let json = serde_json::to_string(&ProductType::CoffeeBean).unwrap();
        assert_eq!(json, "\"Coffee Bean\"");

        let t: ProductType = serde_json::from_str("\"Pastry\"").unwrap();
        assert_eq!(t, ProductType::Pastry);
    }

    #[test]
    fn test_product_type_display_matches_serde() {
        for t in ProductType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t));
        }
    }

    #[test]
    fn test_update_touches_identity() {
        assert!(!ProductUpdate::default().touches_identity());
        assert!(
            ProductUpdate {
                name: Some("New Name".into()),
                ..Default::default()
            }
            .touches_identity()
        );
        assert!(
            ProductUpdate {
                sku: Some("zzz-9999".into()),
                ..Default::default()
            }
            .touches_identity()
        );
    }
}
