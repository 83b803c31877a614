//! Product record model
//!
//! Storage-side shape of a product row. The record id is the SDK's native
//! [`RecordId`]; conversion into the API-facing [`Product`] renders it as
//! the canonical `product:key` string.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::{Product, ProductType};

pub const PRODUCT_TABLE: &str = "product";

/// Stored product row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Option<RecordId>,
    pub owner_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub price: Decimal,
    pub stock: i64,
    pub sku: String,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub qr_reference: String,
    /// Unix epoch milliseconds
    pub last_updated: i64,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            id: record.id.as_ref().map(RecordId::to_string),
            owner_id: record.owner_id,
            name: record.name,
            product_type: record.product_type,
            price: record.price,
            stock: record.stock,
            sku: record.sku,
            description: record.description,
            supplier: record.supplier,
            qr_reference: record.qr_reference,
            last_updated: record.last_updated,
        }
    }
}

/// Parse a client-supplied id into a product [`RecordId`]
///
/// Accepts both the canonical `product:key` form and a bare key; the
/// `⟨...⟩` escaping some keys pick up in display form is stripped.
pub fn product_record_id(id: &str) -> RecordId {
    let key = match id.split_once(':') {
        Some((table, key)) if table == PRODUCT_TABLE => key,
        _ => id,
    };
    let key = key.trim_start_matches('⟨').trim_end_matches('⟩');
    RecordId::from_table_key(PRODUCT_TABLE, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_both_forms() {
        assert_eq!(
            product_record_id("product:abc"),
            RecordId::from_table_key("product", "abc")
        );
        assert_eq!(
            product_record_id("abc"),
            RecordId::from_table_key("product", "abc")
        );
    }
}
