use axum::Router;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

/// Create a test database pool, or None when `DATABASE_URL` is not set
/// (so the suite can run without a provisioned database).
pub async fn try_create_test_pool() -> Option<Pool<Postgres>> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to create test database pool");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations for tests");

    Some(pool)
}

/// Create the application router for testing.
///
/// The token middleware is not applied here; these tests exercise resource
/// and conflict semantics, not authentication.
pub fn create_test_app(pool: Pool<Postgres>) -> Router {
    symposia::router::public_routes()
        .merge(symposia::router::protected_routes())
        .with_state(pool)
}
