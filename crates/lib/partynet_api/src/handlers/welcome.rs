//! Banner and session-introspection endpoints.

use axum::extract::State;
use axum::{Extension, Json};

use crate::AppState;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{MeResponse, SessionInfo, WelcomeResponse};
use crate::routes::API_PREFIX;

/// `GET /` — points clients at the REST API.
pub async fn root(State(state): State<AppState>) -> String {
    format!(
        "Hello! The REST API endpoint is http://{}{}",
        state.config.bind_addr, API_PREFIX
    )
}

/// `GET /rest` — greeting for authenticated clients.
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome PartyNetworkApp!".to_string(),
    })
}

/// `GET /rest/me` — the identity carried by the caller's token.
pub async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        user: SessionInfo::from(&user.0),
    })
}
