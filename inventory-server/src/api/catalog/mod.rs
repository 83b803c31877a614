//! Public catalog API module
//!
//! The single unauthenticated entry point into the data model: the route a
//! scanned QR code resolves to.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/product/{sku}", get(handler::get_by_sku))
}
