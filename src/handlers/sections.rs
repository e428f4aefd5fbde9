use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::conferences::resolve_conference_id;
use crate::models::{CreateSection, Section, UpdateSection};

pub(crate) const SECTION_COLUMNS: &str = "id, conference_id, category_id, name, room, \
     start_time, end_time, capacity, created_at, updated_at";

/// A section may be fully unscheduled, but a window with only one endpoint
/// or a start at/after its end is rejected.
fn validate_window(
    start: &Option<chrono::DateTime<chrono::Utc>>,
    end: &Option<chrono::DateTime<chrono::Utc>>,
) -> Result<(), StatusCode> {
    match (start, end) {
        (None, None) => Ok(()),
        (Some(start), Some(end)) if start < end => Ok(()),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

#[utoipa::path(
    get,
    path = "/conferences/{id}/sections",
    tag = "sections",
    params(("id" = String, Path, description = "Conference ID (UUID) or slug")),
    responses(
        (status = 200, description = "Sections of the conference", body = Vec<Section>),
        (status = 404, description = "Conference not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_sections(
    State(pool): State<Pool<Postgres>>,
    Path(id_or_slug): Path<String>,
) -> Result<Json<Vec<Section>>, StatusCode> {
    let conference_id = resolve_conference_id(&pool, &id_or_slug).await?;

    let sections = sqlx::query_as::<_, Section>(&format!(
        "SELECT {SECTION_COLUMNS} FROM sections
        WHERE conference_id = $1
        ORDER BY start_time NULLS LAST, name"
    ))
    .bind(conference_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch sections: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(sections))
}

#[utoipa::path(
    get,
    path = "/sections/{id}",
    tag = "sections",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section found", body = Section),
        (status = 404, description = "Section not found")
    )
)]
pub async fn get_section(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Section>, StatusCode> {
    sqlx::query_as::<_, Section>(&format!(
        "SELECT {SECTION_COLUMNS} FROM sections WHERE id = $1"
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
    path = "/sections",
    tag = "sections",
    request_body = CreateSection,
    responses(
        (status = 201, description = "Section created", body = Section),
        (status = 400, description = "Invalid time window"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_section(
    State(pool): State<Pool<Postgres>>,
    Json(new_section): Json<CreateSection>,
) -> Result<(StatusCode, Json<Section>), StatusCode> {
    validate_window(&new_section.start_time, &new_section.end_time)?;

    let section = sqlx::query_as::<_, Section>(&format!(
        "INSERT INTO sections (
            conference_id, category_id, name, room, start_time, end_time,
            capacity, creator, modifier
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {SECTION_COLUMNS}"
    ))
    .bind(new_section.conference_id)
    .bind(new_section.category_id)
    .bind(&new_section.name)
    .bind(&new_section.room)
    .bind(new_section.start_time)
    .bind(new_section.end_time)
    .bind(new_section.capacity)
    .bind(&new_section.creator)
    .bind(&new_section.modifier)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create section: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(section)))
}

#[utoipa::path(
    put,
    path = "/sections/{id}",
    tag = "sections",
    params(("id" = Uuid, Path, description = "Section ID")),
    request_body = UpdateSection,
    responses(
        (status = 200, description = "Section updated", body = Section),
        (status = 400, description = "Invalid time window"),
        (status = 404, description = "Section not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_section(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateSection>,
) -> Result<Json<Section>, StatusCode> {
    let existing = sqlx::query_as::<_, Section>(&format!(
        "SELECT {SECTION_COLUMNS} FROM sections WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
    .ok_or(StatusCode::NOT_FOUND)?;

    let start_time = update.start_time.or(existing.start_time);
    let end_time = update.end_time.or(existing.end_time);
    validate_window(&start_time, &end_time)?;

    let section = sqlx::query_as::<_, Section>(&format!(
        "UPDATE sections
        SET category_id = $1, name = $2, room = $3, start_time = $4,
            end_time = $5, capacity = $6, modifier = $7, updated_at = NOW()
        WHERE id = $8
        RETURNING {SECTION_COLUMNS}"
    ))
    .bind(update.category_id.or(existing.category_id))
    .bind(update.name.unwrap_or(existing.name))
    .bind(update.room.or(existing.room))
    .bind(start_time)
    .bind(end_time)
    .bind(update.capacity.or(existing.capacity))
    .bind(&update.modifier)
    .bind(id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update section: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(section))
}

#[utoipa::path(
    delete,
    path = "/sections/{id}",
    tag = "sections",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 204, description = "Section deleted"),
        (status = 404, description = "Section not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_section(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let result = sqlx::query("DELETE FROM sections WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(StatusCode::NO_CONTENT)
}
