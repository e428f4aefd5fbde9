use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{Conference, CreateConference, UpdateConference};
use crate::utils::parse_conference_slug;

const CONFERENCE_COLUMNS: &str = "id, acronym, year, name, start_date, end_date, \
     city, country, timezone, website_url, created_at, updated_at";

/// Resolve a conference ID or slug to a UUID
pub(crate) async fn resolve_conference_id(
    pool: &Pool<Postgres>,
    id_or_slug: &str,
) -> Result<Uuid, StatusCode> {
    // Try parsing as UUID first
    if let Ok(uuid) = Uuid::parse_str(id_or_slug) {
        return Ok(uuid);
    }

    // Try parsing as slug (e.g., RUSTFEST2026)
    if let Some((acronym, year)) = parse_conference_slug(id_or_slug) {
        let result = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM conferences WHERE acronym = $1 AND year = $2",
        )
        .bind(&acronym)
        .bind(year)
        .fetch_optional(pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        return result.ok_or(StatusCode::NOT_FOUND);
    }

    // Invalid format
    Err(StatusCode::BAD_REQUEST)
}

#[utoipa::path(
    get,
    path = "/conferences",
    tag = "conferences",
    responses(
        (status = 200, description = "List all conferences", body = Vec<Conference>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_conferences(
    State(pool): State<Pool<Postgres>>,
) -> Result<Json<Vec<Conference>>, StatusCode> {
    let conferences = sqlx::query_as::<_, Conference>(&format!(
        "SELECT {CONFERENCE_COLUMNS} FROM conferences ORDER BY year DESC, acronym"
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch conferences: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(conferences))
}

#[utoipa::path(
    get,
    path = "/conferences/{id}",
    tag = "conferences",
    params(("id" = String, Path, description = "Conference ID (UUID) or slug (e.g., RUSTFEST2026)")),
    responses(
        (status = 200, description = "Conference found", body = Conference),
        (status = 404, description = "Conference not found"),
        (status = 400, description = "Invalid ID format")
    )
)]
pub async fn get_conference(
    State(pool): State<Pool<Postgres>>,
    Path(id_or_slug): Path<String>,
) -> Result<Json<Conference>, StatusCode> {
    let id = resolve_conference_id(&pool, &id_or_slug).await?;

    sqlx::query_as::<_, Conference>(&format!(
        "SELECT {CONFERENCE_COLUMNS} FROM conferences WHERE id = $1"
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
    path = "/conferences",
    tag = "conferences",
    request_body = CreateConference,
    responses(
        (status = 201, description = "Conference created", body = Conference),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_conference(
    State(pool): State<Pool<Postgres>>,
    Json(new_conference): Json<CreateConference>,
) -> Result<(StatusCode, Json<Conference>), StatusCode> {
    let conference = sqlx::query_as::<_, Conference>(&format!(
        "INSERT INTO conferences (
            acronym, year, name, start_date, end_date,
            city, country, timezone, website_url, creator, modifier
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {CONFERENCE_COLUMNS}"
    ))
    .bind(new_conference.acronym.to_uppercase())
    .bind(new_conference.year)
    .bind(&new_conference.name)
    .bind(new_conference.start_date)
    .bind(new_conference.end_date)
    .bind(&new_conference.city)
    .bind(&new_conference.country)
    .bind(&new_conference.timezone)
    .bind(&new_conference.website_url)
    .bind(&new_conference.creator)
    .bind(&new_conference.modifier)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create conference: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(conference)))
}

#[utoipa::path(
    put,
    path = "/conferences/{id}",
    tag = "conferences",
    params(("id" = String, Path, description = "Conference ID (UUID) or slug")),
    request_body = UpdateConference,
    responses(
        (status = 200, description = "Conference updated", body = Conference),
        (status = 404, description = "Conference not found"),
        (status = 400, description = "Invalid ID format"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_conference(
    State(pool): State<Pool<Postgres>>,
    Path(id_or_slug): Path<String>,
    Json(update): Json<UpdateConference>,
) -> Result<Json<Conference>, StatusCode> {
    let id = resolve_conference_id(&pool, &id_or_slug).await?;

    // First fetch the existing conference
    let existing = sqlx::query_as::<_, Conference>(&format!(
        "SELECT {CONFERENCE_COLUMNS} FROM conferences WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
    .ok_or(StatusCode::NOT_FOUND)?;

    // Update with provided values or keep existing
    let conference = sqlx::query_as::<_, Conference>(&format!(
        "UPDATE conferences
        SET acronym = $1, year = $2, name = $3, start_date = $4, end_date = $5,
            city = $6, country = $7, timezone = $8, website_url = $9,
            modifier = $10, updated_at = NOW()
        WHERE id = $11
        RETURNING {CONFERENCE_COLUMNS}"
    ))
    .bind(
        update
            .acronym
            .map(|a| a.to_uppercase())
            .unwrap_or(existing.acronym),
    )
    .bind(update.year.unwrap_or(existing.year))
    .bind(update.name.unwrap_or(existing.name))
    .bind(update.start_date.or(existing.start_date))
    .bind(update.end_date.or(existing.end_date))
    .bind(update.city.or(existing.city))
    .bind(update.country.or(existing.country))
    .bind(update.timezone.or(existing.timezone))
    .bind(update.website_url.or(existing.website_url))
    .bind(&update.modifier)
    .bind(id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update conference: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(conference))
}

#[utoipa::path(
    delete,
    path = "/conferences/{id}",
    tag = "conferences",
    params(("id" = String, Path, description = "Conference ID (UUID) or slug")),
    responses(
        (status = 204, description = "Conference deleted"),
        (status = 404, description = "Conference not found"),
        (status = 400, description = "Invalid ID format"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_conference(
    State(pool): State<Pool<Postgres>>,
    Path(id_or_slug): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let id = resolve_conference_id(&pool, &id_or_slug).await?;
    let result = sqlx::query("DELETE FROM conferences WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(StatusCode::NO_CONTENT)
}
