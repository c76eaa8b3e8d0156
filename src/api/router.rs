use axum::{routing::{delete, get, post}, Router};
use std::sync::Arc;
use crate::db::Database;
use super::AppState;
use super::handlers;

pub fn routes<D: Database>(state: Arc<AppState<D>>) -> Router {
    Router::new()
        // Health (public)
        .route("/health", get(handlers::health::health_check))
        // Auth (public)
        .route("/api/v1/auth/login", post(handlers::auth::login::<D>))
        .route("/api/v1/auth/logout", post(handlers::auth::logout))
        // Clients (staff)
        .route(
            "/api/v1/clients",
            get(handlers::clients::list::<D>)
                .post(handlers::clients::create::<D>)
                .put(handlers::clients::update::<D>),
        )
        .route("/api/v1/clients/{id}", delete(handlers::clients::delete::<D>))
        // Reference codes (any signed-in user)
        .route("/api/v1/users/page-settings", get(handlers::users::page_settings::<D>))
        // Users (admin only)
        .route(
            "/api/v1/users",
            get(handlers::users::list::<D>)
                .post(handlers::users::create::<D>)
                .put(handlers::users::update::<D>),
        )
        .route("/api/v1/users/{id}", delete(handlers::users::delete::<D>))
        .with_state(state)
}
