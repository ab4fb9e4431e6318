//! Route-Definitionen fuer die REST-API (/v1/...)

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Erstellt den vollstaendigen /v1/-Router
pub fn v1_router() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/v1/auth/register", post(handlers::auth::register))
        .route("/v1/auth/verify-code", post(handlers::auth::verify_code))
        .route("/v1/auth/login", post(handlers::auth::login))
        .route(
            "/v1/auth/forgot-password",
            post(handlers::auth::forgot_password),
        )
        .route(
            "/v1/auth/reset-password",
            post(handlers::auth::reset_password),
        )
        // Profil
        .route("/v1/me", get(handlers::profil::me))
        .route("/v1/profile", get(handlers::profil::get_profil))
        .route("/v1/profile", put(handlers::profil::put_profil))
        // Admin
        .route("/v1/users", get(handlers::admin::list_users))
        .route("/v1/users", post(handlers::admin::create_user))
        .route("/v1/users", delete(handlers::admin::purge_users))
        .route("/v1/users/:email", get(handlers::admin::get_user))
        .route("/v1/users/:email", delete(handlers::admin::delete_user))
}
