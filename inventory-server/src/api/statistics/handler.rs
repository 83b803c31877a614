//! Statistics API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::stats::InventorySummary;
use crate::utils::AppResult;

/// GET /api/statistics/inventory — aggregated inventory summary
///
/// Loads the owner's catalog once and folds it through the pure
/// aggregation functions; thresholds come from configuration.
pub async fn inventory(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<InventorySummary>> {
    let products = state.products.find_all(&user.id).await?;

    let summary = InventorySummary::compute(
        &products,
        state.config.low_stock_threshold,
        state.config.critical_stock_threshold,
    );
    Ok(Json(summary))
}
