//! Auth API Handlers

use axum::Json;
use serde::Serialize;

use crate::auth::CurrentUser;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// GET /api/auth/me — identify the authenticated owner
///
/// Token issuance happens at the external identity provider; this endpoint
/// only reflects what the presented token resolves to.
pub async fn me(user: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        email: user.email,
    })
}
