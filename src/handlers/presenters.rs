use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::{Pool, Postgres};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::models::{CreatePresenter, Presenter, UpdatePresenter};
use crate::utils::normalize_name;

const PRESENTER_COLUMNS: &str = "id, full_name, normalized_name, email, \
     affiliation, bio, created_at, updated_at";

#[derive(Debug, Deserialize, IntoParams)]
pub struct PresenterQuery {
    /// Substring search against the normalized name (accent- and
    /// case-insensitive)
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/presenters",
    tag = "presenters",
    params(PresenterQuery),
    responses(
        (status = 200, description = "List of presenters", body = Vec<Presenter>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_presenters(
    State(pool): State<Pool<Postgres>>,
    Query(query): Query<PresenterQuery>,
) -> Result<Json<Vec<Presenter>>, StatusCode> {
    let needle = query.search.as_deref().map(normalize_name);

    let presenters = sqlx::query_as::<_, Presenter>(&format!(
        "SELECT {PRESENTER_COLUMNS} FROM presenters
        WHERE ($1::text IS NULL OR normalized_name LIKE '%' || $1 || '%')
        ORDER BY normalized_name"
    ))
    .bind(needle)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch presenters: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(presenters))
}

#[utoipa::path(
    get,
    path = "/presenters/{id}",
    tag = "presenters",
    params(("id" = Uuid, Path, description = "Presenter ID")),
    responses(
        (status = 200, description = "Presenter found", body = Presenter),
        (status = 404, description = "Presenter not found")
    )
)]
pub async fn get_presenter(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Presenter>, StatusCode> {
    sqlx::query_as::<_, Presenter>(&format!(
        "SELECT {PRESENTER_COLUMNS} FROM presenters WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
    .map(Json)
    .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    post,
    path = "/presenters",
    tag = "presenters",
    request_body = CreatePresenter,
    responses(
        (status = 201, description = "Presenter created", body = Presenter),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_presenter(
    State(pool): State<Pool<Postgres>>,
    Json(new_presenter): Json<CreatePresenter>,
) -> Result<(StatusCode, Json<Presenter>), StatusCode> {
    let normalized = normalize_name(&new_presenter.full_name);

    let presenter = sqlx::query_as::<_, Presenter>(&format!(
        "INSERT INTO presenters (full_name, normalized_name, email, affiliation, bio, creator, modifier)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {PRESENTER_COLUMNS}"
    ))
    .bind(&new_presenter.full_name)
    .bind(&normalized)
    .bind(&new_presenter.email)
    .bind(&new_presenter.affiliation)
    .bind(&new_presenter.bio)
    .bind(&new_presenter.creator)
    .bind(&new_presenter.modifier)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create presenter: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(presenter)))
}

#[utoipa::path(
    put,
    path = "/presenters/{id}",
    tag = "presenters",
    params(("id" = Uuid, Path, description = "Presenter ID")),
    request_body = UpdatePresenter,
    responses(
        (status = 200, description = "Presenter updated", body = Presenter),
        (status = 404, description = "Presenter not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_presenter(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdatePresenter>,
) -> Result<Json<Presenter>, StatusCode> {
    let existing = sqlx::query_as::<_, Presenter>(&format!(
        "SELECT {PRESENTER_COLUMNS} FROM presenters WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
    .ok_or(StatusCode::NOT_FOUND)?;

    // normalized_name follows full_name
    let full_name = update.full_name.unwrap_or(existing.full_name);
    let normalized = normalize_name(&full_name);

    let presenter = sqlx::query_as::<_, Presenter>(&format!(
        "UPDATE presenters
        SET full_name = $1, normalized_name = $2, email = $3, affiliation = $4,
            bio = $5, modifier = $6, updated_at = NOW()
        WHERE id = $7
        RETURNING {PRESENTER_COLUMNS}"
    ))
    .bind(&full_name)
    .bind(&normalized)
    .bind(update.email.or(existing.email))
    .bind(update.affiliation.or(existing.affiliation))
    .bind(update.bio.or(existing.bio))
    .bind(&update.modifier)
    .bind(id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update presenter: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(presenter))
}

#[utoipa::path(
    delete,
    path = "/presenters/{id}",
    tag = "presenters",
    params(("id" = Uuid, Path, description = "Presenter ID")),
    responses(
        (status = 204, description = "Presenter deleted"),
        (status = 404, description = "Presenter not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_presenter(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let result = sqlx::query("DELETE FROM presenters WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(StatusCode::NO_CONTENT)
}
