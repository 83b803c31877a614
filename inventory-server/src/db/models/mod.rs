//! Storage-layer record models

pub mod product;

pub use product::{PRODUCT_TABLE, ProductRecord, product_record_id};
