use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::{Pool, Postgres};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::models::{CreatePresentation, Presentation, PresentationStatus, UpdatePresentation};

pub(crate) const PRESENTATION_COLUMNS: &str = "id, conference_id, section_id, title, \
     abstract, status, position, created_at, updated_at";

#[derive(Debug, Deserialize, IntoParams)]
pub struct PresentationQuery {
    /// Filter by conference ID
    pub conference_id: Option<Uuid>,
    /// Filter by assigned section ID
    pub section_id: Option<Uuid>,
    /// Filter by status
    pub status: Option<PresentationStatus>,
}

#[utoipa::path(
    get,
    path = "/presentations",
    tag = "presentations",
    params(PresentationQuery),
    responses(
        (status = 200, description = "List of presentations", body = Vec<Presentation>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_presentations(
    State(pool): State<Pool<Postgres>>,
    Query(query): Query<PresentationQuery>,
) -> Result<Json<Vec<Presentation>>, StatusCode> {
    let presentations = sqlx::query_as::<_, Presentation>(&format!(
        "SELECT {PRESENTATION_COLUMNS} FROM presentations
        WHERE ($1::uuid IS NULL OR conference_id = $1)
          AND ($2::uuid IS NULL OR section_id = $2)
          AND ($3::presentation_status IS NULL OR status = $3)
        ORDER BY created_at DESC"
    ))
    .bind(query.conference_id)
    .bind(query.section_id)
    .bind(query.status)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch presentations: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(presentations))
}

#[utoipa::path(
    get,
    path = "/presentations/{id}",
    tag = "presentations",
    params(("id" = Uuid, Path, description = "Presentation ID")),
    responses(
        (status = 200, description = "Presentation found", body = Presentation),
        (status = 404, description = "Presentation not found")
    )
)]
pub async fn get_presentation(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Presentation>, StatusCode> {
    sqlx::query_as::<_, Presentation>(&format!(
        "SELECT {PRESENTATION_COLUMNS} FROM presentations WHERE id = $1"
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
    path = "/presentations",
    tag = "presentations",
    request_body = CreatePresentation,
    responses(
        (status = 201, description = "Presentation created", body = Presentation),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_presentation(
    State(pool): State<Pool<Postgres>>,
    Json(new_presentation): Json<CreatePresentation>,
) -> Result<(StatusCode, Json<Presentation>), StatusCode> {
    let presentation = sqlx::query_as::<_, Presentation>(&format!(
        "INSERT INTO presentations (conference_id, title, abstract, status, creator, modifier)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {PRESENTATION_COLUMNS}"
    ))
    .bind(new_presentation.conference_id)
    .bind(&new_presentation.title)
    .bind(&new_presentation.abstract_text)
    .bind(
        new_presentation
            .status
            .unwrap_or(PresentationStatus::Draft),
    )
    .bind(&new_presentation.creator)
    .bind(&new_presentation.modifier)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create presentation: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(presentation)))
}

#[utoipa::path(
    put,
    path = "/presentations/{id}",
    tag = "presentations",
    params(("id" = Uuid, Path, description = "Presentation ID")),
    request_body = UpdatePresentation,
    responses(
        (status = 200, description = "Presentation updated", body = Presentation),
        (status = 404, description = "Presentation not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_presentation(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdatePresentation>,
) -> Result<Json<Presentation>, StatusCode> {
    let existing = sqlx::query_as::<_, Presentation>(&format!(
        "SELECT {PRESENTATION_COLUMNS} FROM presentations WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
    .ok_or(StatusCode::NOT_FOUND)?;

    let presentation = sqlx::query_as::<_, Presentation>(&format!(
        "UPDATE presentations
        SET title = $1, abstract = $2, status = $3, position = $4,
            modifier = $5, updated_at = NOW()
        WHERE id = $6
        RETURNING {PRESENTATION_COLUMNS}"
    ))
    .bind(update.title.unwrap_or(existing.title))
    .bind(update.abstract_text.or(existing.abstract_text))
    .bind(update.status.unwrap_or(existing.status))
    .bind(update.position.or(existing.position))
    .bind(&update.modifier)
    .bind(id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update presentation: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(presentation))
}

#[utoipa::path(
    delete,
    path = "/presentations/{id}",
    tag = "presentations",
    params(("id" = Uuid, Path, description = "Presentation ID")),
    responses(
        (status = 204, description = "Presentation deleted"),
        (status = 404, description = "Presentation not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_presentation(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let result = sqlx::query("DELETE FROM presentations WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(StatusCode::NO_CONTENT)
}
