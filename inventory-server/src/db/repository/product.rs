//! Product Repository
//!
//! Owner-scoped CRUD over the product table, including the derived-field
//! rules: a blank SKU on create is generated from the name, and the QR
//! reference is recomputed whenever the effective SKU may have changed.

use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{PRODUCT_TABLE, ProductRecord, product_record_id};
use crate::qr;
use crate::sku::{SkuExists, SkuGenerator};
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::now_millis;

// =============================================================================
// Product Repository
// =============================================================================

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
    sku: Arc<SkuGenerator>,
    public_base_url: String,
}

impl ProductRepository {
    pub fn new(
        db: Surreal<Db>,
        sku: Arc<SkuGenerator>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            base: BaseRepository::new(db),
            sku,
            public_base_url: public_base_url.into(),
        }
    }

    /// Find all products owned by `owner_id`, most recently updated first
    ///
    /// A blank owner id fails softly: the error is logged and an empty list
    /// is returned, so list views render empty instead of crashing.
    pub async fn find_all(&self, owner_id: &str) -> RepoResult<Vec<Product>> {
        if owner_id.trim().is_empty() {
            tracing::error!("Product list requested without an owner id");
            return Ok(Vec::new());
        }

        let records: Vec<ProductRecord> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE owner_id = $owner ORDER BY last_updated DESC")
            .bind(("owner", owner_id.to_string()))
            .await?
            .take(0)?;
        Ok(records.into_iter().map(Product::from).collect())
    }

    /// Find a product by id, scoped to its owner
    ///
    /// An id owned by someone else is a plain miss, not an error.
    pub async fn find_by_id(&self, id: &str, owner_id: &str) -> RepoResult<Option<Product>> {
        let record: Option<ProductRecord> = self.base.db().select(product_record_id(id)).await?;
        Ok(record
            .filter(|r| r.owner_id == owner_id)
            .map(Product::from))
    }

    /// Find a product by SKU, case-insensitive and owner-unscoped
    ///
    /// Intentionally public: this backs the QR-scan detail page, which has
    /// no authenticated owner context.
    pub async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<Product>> {
        let needle = sku.trim().to_uppercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let records: Vec<ProductRecord> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE string::uppercase(sku) = $sku LIMIT 1")
            .bind(("sku", needle))
            .await?
            .take(0)?;
        Ok(records.into_iter().next().map(Product::from))
    }

    /// Check whether a SKU is already taken within one owner's catalog
    pub async fn sku_exists(&self, sku: &str, owner_id: &str) -> RepoResult<bool> {
        let needle = sku.trim().to_uppercase();
        if needle.is_empty() {
            return Ok(false);
        }

        let ids: Vec<RecordId> = self
            .base
            .db()
            .query("SELECT VALUE id FROM product WHERE owner_id = $owner AND sku = $sku LIMIT 1")
            .bind(("owner", owner_id.to_string()))
            .bind(("sku", needle))
            .await?
            .take(0)?;
        Ok(!ids.is_empty())
    }

    /// Create a new product
    ///
    /// A blank SKU is generated from the name; a supplied SKU is normalized
    /// and checked for duplicates. The QR reference is derived from the
    /// final SKU, whichever way it was obtained.
    pub async fn create(&self, data: ProductCreate, owner_id: &str) -> RepoResult<Product> {
        if owner_id.trim().is_empty() {
            tracing::error!("Product create requested without an authenticated owner");
            return Err(RepoError::Unauthenticated);
        }

        let name = data.name.trim().to_string();
        if name.is_empty() {
            return Err(RepoError::Validation("name must not be empty".into()));
        }
        if data.price < Decimal::ZERO {
            return Err(RepoError::Validation(
                "price must be zero or greater".into(),
            ));
        }
        if data.stock < 0 {
            return Err(RepoError::Validation(
                "stock must be zero or greater".into(),
            ));
        }

        let sku = match data.sku.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(supplied) => {
                let normalized = supplied.to_uppercase();
                if self.sku_exists(&normalized, owner_id).await? {
                    return Err(RepoError::Duplicate(format!(
                        "SKU {} already exists",
                        normalized
                    )));
                }
                normalized
            }
            None => self
                .sku
                .generate(&name, owner_id, self)
                .await
                .map_err(|e| RepoError::Validation(e.message.clone()))?,
        };

        let qr_reference = qr::build(&self.public_base_url, &sku);

        let record = ProductRecord {
            id: None,
            owner_id: owner_id.to_string(),
            name,
            product_type: data.product_type,
            price: data.price,
            stock: data.stock,
            sku,
            description: normalize_optional(data.description),
            supplier: normalize_optional(data.supplier),
            qr_reference,
            last_updated: now_millis(),
        };

        let created: Option<ProductRecord> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(record)
            .await?;

        created
            .map(Product::from)
            .ok_or_else(|| RepoError::Database("Create returned no record".to_string()))
    }

    /// Update a product (partial merge), scoped to its owner
    ///
    /// A SKU or name change regenerates the QR reference from the effective
    /// SKU. `last_updated` advances on every successful update, even within
    /// the same millisecond. Returns `Ok(None)` when no owned record
    /// matches.
    pub async fn update(
        &self,
        id: &str,
        changes: ProductUpdate,
        owner_id: &str,
    ) -> RepoResult<Option<Product>> {
        if owner_id.trim().is_empty() {
            tracing::error!("Product update requested without an authenticated owner");
            return Err(RepoError::Unauthenticated);
        }

        let record_id = product_record_id(id);
        let current: Option<ProductRecord> = self.base.db().select(record_id.clone()).await?;
        let Some(current) = current.filter(|r| r.owner_id == owner_id) else {
            return Ok(None);
        };

        let name = match changes.name.as_deref().map(str::trim) {
            Some("") => return Err(RepoError::Validation("name must not be empty".into())),
            Some(n) => Some(n.to_string()),
            None => None,
        };
        if let Some(price) = changes.price
            && price < Decimal::ZERO
        {
            return Err(RepoError::Validation(
                "price must be zero or greater".into(),
            ));
        }
        if let Some(stock) = changes.stock
            && stock < 0
        {
            return Err(RepoError::Validation(
                "stock must be zero or greater".into(),
            ));
        }

        // Effective SKU: the changed value (normalized) or the existing one
        let new_sku = changes
            .sku
            .as_deref()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty());
        if let Some(ref sku) = new_sku
            && sku != &current.sku
            && self.sku_exists(sku, owner_id).await?
        {
            return Err(RepoError::Duplicate(format!("SKU {} already exists", sku)));
        }

        let touches_identity = changes.sku.is_some() || changes.name.is_some();
        let effective_sku = new_sku.clone().unwrap_or_else(|| current.sku.clone());
        let qr_reference = touches_identity.then(|| qr::build(&self.public_base_url, &effective_sku));

        // Monotonic stamp, even for updates landing in the same millisecond
        let last_updated = now_millis().max(current.last_updated + 1);

        let mut set_parts: Vec<&str> = vec!["last_updated = $last_updated"];
        if name.is_some() {
            set_parts.push("name = $name");
        }
        if changes.product_type.is_some() {
            set_parts.push("type = $type");
        }
        if changes.price.is_some() {
            set_parts.push("price = $price");
        }
        if changes.stock.is_some() {
            set_parts.push("stock = $stock");
        }
        if new_sku.is_some() {
            set_parts.push("sku = $sku");
        }
        if changes.description.is_some() {
            set_parts.push("description = $description");
        }
        if changes.supplier.is_some() {
            set_parts.push("supplier = $supplier");
        }
        if qr_reference.is_some() {
            set_parts.push("qr_reference = $qr_reference");
        }

        let query_str = format!(
            "UPDATE $record SET {} WHERE owner_id = $owner RETURN AFTER",
            set_parts.join(", ")
        );

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("record", record_id))
            .bind(("owner", owner_id.to_string()))
            .bind(("last_updated", last_updated));

        if let Some(v) = name {
            query = query.bind(("name", v));
        }
        if let Some(v) = changes.product_type {
            query = query.bind(("type", v));
        }
        if let Some(v) = changes.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = changes.stock {
            query = query.bind(("stock", v));
        }
        if let Some(v) = new_sku {
            query = query.bind(("sku", v));
        }
        if let Some(v) = changes.description {
            query = query.bind(("description", v.trim().to_string()));
        }
        if let Some(v) = changes.supplier {
            query = query.bind(("supplier", v.trim().to_string()));
        }
        if let Some(v) = qr_reference {
            query = query.bind(("qr_reference", v));
        }

        let mut result = query.await?;
        let updated: Vec<ProductRecord> = result.take(0)?;
        Ok(updated.into_iter().next().map(Product::from))
    }

    /// Hard delete a product, scoped to its owner
    ///
    /// Idempotent: returns whether a record was actually removed, so a
    /// second delete of the same id yields `false` rather than an error.
    pub async fn delete(&self, id: &str, owner_id: &str) -> RepoResult<bool> {
        if owner_id.trim().is_empty() {
            tracing::error!("Product delete requested without an authenticated owner");
            return Err(RepoError::Unauthenticated);
        }

        let mut result = self
            .base
            .db()
            .query("DELETE product WHERE id = $record AND owner_id = $owner RETURN BEFORE")
            .bind(("record", product_record_id(id)))
            .bind(("owner", owner_id.to_string()))
            .await?;
        let removed: Vec<ProductRecord> = result.take(0)?;
        Ok(!removed.is_empty())
    }

    /// Rewrite stale QR references across one owner's catalog
    ///
    /// Recomputes every product's QR reference from its SKU against the
    /// configured base URL and updates the rows that differ (base URL
    /// changes, legacy payload formats). Per-record failures are collected
    /// rather than aborting the sweep.
    pub async fn refresh_qr_references(&self, owner_id: &str) -> RepoResult<QrRefreshReport> {
        if owner_id.trim().is_empty() {
            tracing::error!("QR refresh requested without an authenticated owner");
            return Err(RepoError::Unauthenticated);
        }

        let records: Vec<ProductRecord> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE owner_id = $owner")
            .bind(("owner", owner_id.to_string()))
            .await?
            .take(0)?;

        let mut report = QrRefreshReport::default();
        for record in records {
            let expected = qr::build(&self.public_base_url, &record.sku);
            if record.qr_reference == expected {
                continue;
            }
            let Some(id) = record.id else {
                continue;
            };

            let stamp = now_millis().max(record.last_updated + 1);
            let outcome = self
                .base
                .db()
                .query("UPDATE $record SET qr_reference = $qr, last_updated = $last_updated")
                .bind(("record", id.clone()))
                .bind(("qr", expected))
                .bind(("last_updated", stamp))
                .await
                .and_then(|r| r.check());

            match outcome {
                Ok(_) => report.updated += 1,
                Err(e) => {
                    tracing::error!(record = %id, error = %e, "Failed to refresh QR reference");
                    report.errors.push(format!("{}: {}", record.sku, e));
                }
            }
        }

        Ok(report)
    }
}

/// Outcome of a QR reference maintenance sweep
#[derive(Debug, Clone, Default, Serialize)]
pub struct QrRefreshReport {
    pub updated: usize,
    pub errors: Vec<String>,
}

impl SkuExists for ProductRepository {
    async fn sku_taken(&self, sku: &str, owner_id: &str) -> bool {
        match self.sku_exists(sku, owner_id).await {
            Ok(taken) => taken,
            Err(e) => {
                // A failed probe counts as "free" so generation can proceed;
                // the unique index still rejects an actual collision.
                tracing::error!(error = %e, "SKU existence probe failed");
                false
            }
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
