//! Route tables shared by the server binary and the integration tests.
//!
//! Reads are public; everything that mutates the program goes through
//! [`crate::middleware::require_api_token`], which the binary layers onto
//! [`protected_routes`].

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::{Pool, Postgres};

use crate::handlers;

async fn root() -> &'static str {
    "Symposia conference API"
}

/// Read-only routes, served without authentication.
pub fn public_routes() -> Router<Pool<Postgres>> {
    Router::new()
        .route("/", get(root))
        .route("/conferences", get(handlers::list_conferences))
        .route("/conferences/{id}", get(handlers::get_conference))
        .route("/conferences/{id}/categories", get(handlers::list_categories))
        .route("/conferences/{id}/sections", get(handlers::list_sections))
        .route(
            "/conferences/{id}/conflicts/summary",
            get(handlers::conflicts_summary),
        )
        .route("/categories/{id}", get(handlers::get_category))
        .route("/sections/{id}", get(handlers::get_section))
        .route("/presentations", get(handlers::list_presentations))
        .route("/presentations/{id}", get(handlers::get_presentation))
        .route("/presenters", get(handlers::list_presenters))
        .route("/presenters/{id}", get(handlers::get_presenter))
        .route(
            "/presenters/{id}/conflicts",
            get(handlers::list_declared_conflicts),
        )
        .route("/presenter-roles", get(handlers::list_presenter_roles))
        .route("/presenter-roles/{id}", get(handlers::get_presenter_role))
}

/// Mutating routes; the binary puts these behind the API-token middleware.
pub fn protected_routes() -> Router<Pool<Postgres>> {
    Router::new()
        .route("/conferences", post(handlers::create_conference))
        .route(
            "/conferences/{id}",
            axum::routing::put(handlers::update_conference).delete(handlers::delete_conference),
        )
        .route("/categories", post(handlers::create_category))
        .route(
            "/categories/{id}",
            axum::routing::put(handlers::update_category).delete(handlers::delete_category),
        )
        .route("/sections", post(handlers::create_section))
        .route(
            "/sections/{id}",
            axum::routing::put(handlers::update_section).delete(handlers::delete_section),
        )
        .route("/presentations", post(handlers::create_presentation))
        .route(
            "/presentations/{id}",
            axum::routing::put(handlers::update_presentation)
                .delete(handlers::delete_presentation),
        )
        .route(
            "/presentations/{id}/check-conflicts",
            post(handlers::check_conflicts),
        )
        .route(
            "/presentations/{id}/assign-with-conflict-check",
            post(handlers::assign_with_conflict_check),
        )
        .route(
            "/presentations/{id}/unassign",
            post(handlers::unassign_section),
        )
        .route("/presenters", post(handlers::create_presenter))
        .route(
            "/presenters/{id}",
            axum::routing::put(handlers::update_presenter).delete(handlers::delete_presenter),
        )
        .route(
            "/presenters/{id}/conflicts",
            post(handlers::create_declared_conflict),
        )
        .route(
            "/declared-conflicts/{id}",
            axum::routing::delete(handlers::delete_declared_conflict),
        )
        .route("/presenter-roles", post(handlers::create_presenter_role))
        .route(
            "/presenter-roles/{id}",
            axum::routing::put(handlers::update_presenter_role)
                .delete(handlers::delete_presenter_role),
        )
}
