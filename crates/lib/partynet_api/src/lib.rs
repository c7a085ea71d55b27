//! # partynet_api
//!
//! HTTP API library for the PartyNetwork auth gateway.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use partynet_core::auth::TokenCodec;
use partynet_core::store::UserStore;

use crate::config::ApiConfig;
use crate::handlers::{auth, welcome};

/// Shared application state passed to all handlers.
///
/// Everything in here is read-only once the server is running.
#[derive(Clone)]
pub struct AppState {
    /// User/group store.
    pub store: Arc<dyn UserStore>,
    /// Session token codec holding the signing secret.
    pub tokens: Arc<TokenCodec>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Builds the state, deriving the token codec from `config`.
    pub fn new(store: Arc<dyn UserStore>, config: ApiConfig) -> Self {
        let tokens = TokenCodec::new(config.jwt_secret.as_bytes(), config.token_ttl());
        Self {
            store,
            tokens: Arc::new(tokens),
            config,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_ROOT, get(welcome::root))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler))
        .route(routes::POST_AUTH_REGISTER, post(auth::register_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::GET_API_WELCOME, get(welcome::welcome))
        .route(routes::GET_API_ME, get(welcome::me))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
