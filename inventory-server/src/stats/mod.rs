//! Inventory Statistics
//!
//! Read-only aggregations over an in-memory product collection, typically
//! the result of a repository `find_all`. Every function here is pure and
//! O(n) over its input; thresholds are passed in by the caller (they live
//! in `Config`), never hard-coded.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use shared::models::{Product, ProductType};

/// Number of products per type
pub fn count_by_type(products: &[Product]) -> BTreeMap<ProductType, usize> {
    let mut counts = BTreeMap::new();
    for product in products {
        *counts.entry(product.product_type).or_insert(0) += 1;
    }
    counts
}

/// Σ price × stock per type
pub fn value_by_type(products: &[Product]) -> BTreeMap<ProductType, Decimal> {
    let mut values = BTreeMap::new();
    for product in products {
        *values.entry(product.product_type).or_insert(Decimal::ZERO) +=
            product.price * Decimal::from(product.stock);
    }
    values
}

/// Units in stock per type
pub fn stock_by_type(products: &[Product]) -> BTreeMap<ProductType, i64> {
    let mut stocks = BTreeMap::new();
    for product in products {
        *stocks.entry(product.product_type).or_insert(0) += product.stock;
    }
    stocks
}

/// Σ price × stock across the whole collection
pub fn total_value(products: &[Product]) -> Decimal {
    products
        .iter()
        .map(|p| p.price * Decimal::from(p.stock))
        .sum()
}

/// Total units in stock
pub fn total_stock(products: &[Product]) -> i64 {
    products.iter().map(|p| p.stock).sum()
}

/// Mean list price, zero for an empty collection
pub fn average_price(products: &[Product]) -> Decimal {
    if products.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = products.iter().map(|p| p.price).sum();
    sum / Decimal::from(products.len() as i64)
}

/// Products with stock strictly below `threshold`
pub fn low_stock_count(products: &[Product], threshold: i64) -> usize {
    products.iter().filter(|p| p.stock < threshold).count()
}

/// Aggregated inventory summary for dashboards
#[derive(Debug, Clone, Serialize)]
pub struct InventorySummary {
    pub total_products: usize,
    pub total_stock: i64,
    pub total_value: Decimal,
    pub average_price: Decimal,
    /// Products below the reorder threshold
    pub low_stock_count: usize,
    /// Products below the critical threshold
    pub critical_stock_count: usize,
    pub count_by_type: BTreeMap<ProductType, usize>,
    pub value_by_type: BTreeMap<ProductType, Decimal>,
    pub stock_by_type: BTreeMap<ProductType, i64>,
}

impl InventorySummary {
    pub fn compute(
        products: &[Product],
        low_stock_threshold: i64,
        critical_stock_threshold: i64,
    ) -> Self {
        Self {
            total_products: products.len(),
            total_stock: total_stock(products),
            total_value: total_value(products),
            average_price: average_price(products),
            low_stock_count: low_stock_count(products, low_stock_threshold),
            critical_stock_count: low_stock_count(products, critical_stock_threshold),
            count_by_type: count_by_type(products),
            value_by_type: value_by_type(products),
            stock_by_type: stock_by_type(products),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(product_type: ProductType, price: Decimal, stock: i64) -> Product {
        Product {
            id: None,
            owner_id: "owner-1".into(),
            name: "Test".into(),
            product_type,
            price,
            stock,
            sku: "TS-1000".into(),
            description: None,
            supplier: None,
            qr_reference: "https://shop.example.com/product/TS-1000".into(),
            last_updated: 0,
        }
    }

    #[test]
    fn total_value_sums_price_times_stock() {
        let products = vec![
            product(ProductType::CoffeeBean, Decimal::from(10), 2),
            product(ProductType::Pastry, Decimal::from(5), 3),
        ];
        assert_eq!(total_value(&products), Decimal::from(35));
    }

    #[test]
    fn total_value_is_exact_for_decimal_prices() {
        // 0.1 * 3 would already drift with f64 accumulation
        let products = vec![product(ProductType::Pastry, Decimal::new(10, 2), 3)];
        assert_eq!(total_value(&products), Decimal::new(30, 2));
    }

    #[test]
    fn low_stock_threshold_is_strict() {
        let products = vec![
            product(ProductType::CoffeeBean, Decimal::ONE, 19),
            product(ProductType::CoffeeBean, Decimal::ONE, 20),
            product(ProductType::CoffeeBean, Decimal::ONE, 21),
        ];
        assert_eq!(low_stock_count(&products, 20), 1);
        assert_eq!(low_stock_count(&products, 10), 0);
        assert_eq!(low_stock_count(&products, 22), 3);
    }

    #[test]
    fn by_type_aggregations() {
        let products = vec![
            product(ProductType::CoffeeBean, Decimal::from(10), 2),
            product(ProductType::CoffeeBean, Decimal::from(4), 5),
            product(ProductType::Equipment, Decimal::from(100), 1),
        ];

        let counts = count_by_type(&products);
        assert_eq!(counts.get(&ProductType::CoffeeBean), Some(&2));
        assert_eq!(counts.get(&ProductType::Equipment), Some(&1));
        assert_eq!(counts.get(&ProductType::Pastry), None);

        let values = value_by_type(&products);
        assert_eq!(values.get(&ProductType::CoffeeBean), Some(&Decimal::from(40)));
        assert_eq!(values.get(&ProductType::Equipment), Some(&Decimal::from(100)));

        let stocks = stock_by_type(&products);
        assert_eq!(stocks.get(&ProductType::CoffeeBean), Some(&7));
    }

    #[test]
    fn average_price_of_empty_collection_is_zero() {
        assert_eq!(average_price(&[]), Decimal::ZERO);
        assert_eq!(total_value(&[]), Decimal::ZERO);
        assert_eq!(total_stock(&[]), 0);
    }

    #[test]
    fn summary_bundles_all_aggregations() {
        let products = vec![
            product(ProductType::CoffeeBean, Decimal::from(10), 2),
            product(ProductType::Pastry, Decimal::from(5), 25),
        ];

        let summary = InventorySummary::compute(&products, 20, 10);
        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.total_stock, 27);
        assert_eq!(summary.total_value, Decimal::from(145));
        assert_eq!(summary.average_price, Decimal::new(75, 1));
        assert_eq!(summary.low_stock_count, 1);
        assert_eq!(summary.critical_stock_count, 1);
    }

    #[test]
    fn summary_serializes_type_maps_with_display_keys() {
        let products = vec![product(ProductType::CoffeeBean, Decimal::from(10), 2)];
        let summary = InventorySummary::compute(&products, 20, 10);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["count_by_type"].get("Coffee Bean").is_some());
    }
}
