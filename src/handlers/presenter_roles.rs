use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::{Pool, Postgres};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::models::{CreatePresenterRole, PresenterRole, UpdatePresenterRole};

const ROLE_COLUMNS: &str = "id, presentation_id, presenter_id, is_presenter, \
     position, presented_as_name, created_at, updated_at";

#[derive(Debug, Deserialize, IntoParams)]
pub struct PresenterRoleQuery {
    /// Filter by presentation ID
    pub presentation_id: Option<Uuid>,
    /// Filter by presenter ID
    pub presenter_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/presenter-roles",
    tag = "presenter-roles",
    params(PresenterRoleQuery),
    responses(
        (status = 200, description = "List of presenter roles", body = Vec<PresenterRole>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_presenter_roles(
    State(pool): State<Pool<Postgres>>,
    Query(query): Query<PresenterRoleQuery>,
) -> Result<Json<Vec<PresenterRole>>, StatusCode> {
    let roles = match (query.presentation_id, query.presenter_id) {
        (Some(presentation_id), Some(presenter_id)) => {
            sqlx::query_as::<_, PresenterRole>(&format!(
                "SELECT {ROLE_COLUMNS} FROM presenter_roles
                WHERE presentation_id = $1 AND presenter_id = $2
                ORDER BY position"
            ))
            .bind(presentation_id)
            .bind(presenter_id)
            .fetch_all(&pool)
            .await
        }
        (Some(presentation_id), None) => {
            sqlx::query_as::<_, PresenterRole>(&format!(
                "SELECT {ROLE_COLUMNS} FROM presenter_roles
                WHERE presentation_id = $1
                ORDER BY position"
            ))
            .bind(presentation_id)
            .fetch_all(&pool)
            .await
        }
        (None, Some(presenter_id)) => {
            sqlx::query_as::<_, PresenterRole>(&format!(
                "SELECT {ROLE_COLUMNS} FROM presenter_roles
                WHERE presenter_id = $1
                ORDER BY created_at DESC"
            ))
            .bind(presenter_id)
            .fetch_all(&pool)
            .await
        }
        (None, None) => {
            sqlx::query_as::<_, PresenterRole>(&format!(
                "SELECT {ROLE_COLUMNS} FROM presenter_roles
                ORDER BY created_at DESC
                LIMIT 100"
            ))
            .fetch_all(&pool)
            .await
        }
    };

    roles
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

#[utoipa::path(
    get,
    path = "/presenter-roles/{id}",
    tag = "presenter-roles",
    params(("id" = Uuid, Path, description = "Presenter role ID")),
    responses(
        (status = 200, description = "Presenter role found", body = PresenterRole),
        (status = 404, description = "Presenter role not found")
    )
)]
pub async fn get_presenter_role(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PresenterRole>, StatusCode> {
    sqlx::query_as::<_, PresenterRole>(&format!(
        "SELECT {ROLE_COLUMNS} FROM presenter_roles WHERE id = $1"
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
    path = "/presenter-roles",
    tag = "presenter-roles",
    request_body = CreatePresenterRole,
    responses(
        (status = 201, description = "Presenter role created", body = PresenterRole),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_presenter_role(
    State(pool): State<Pool<Postgres>>,
    Json(new_role): Json<CreatePresenterRole>,
) -> Result<(StatusCode, Json<PresenterRole>), StatusCode> {
    let role = sqlx::query_as::<_, PresenterRole>(&format!(
        "INSERT INTO presenter_roles (
            presentation_id, presenter_id, is_presenter, position,
            presented_as_name, creator, modifier
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {ROLE_COLUMNS}"
    ))
    .bind(new_role.presentation_id)
    .bind(new_role.presenter_id)
    .bind(new_role.is_presenter.unwrap_or(true))
    .bind(new_role.position)
    .bind(&new_role.presented_as_name)
    .bind(&new_role.creator)
    .bind(&new_role.modifier)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create presenter role: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(role)))
}

#[utoipa::path(
    put,
    path = "/presenter-roles/{id}",
    tag = "presenter-roles",
    params(("id" = Uuid, Path, description = "Presenter role ID")),
    request_body = UpdatePresenterRole,
    responses(
        (status = 200, description = "Presenter role updated", body = PresenterRole),
        (status = 404, description = "Presenter role not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_presenter_role(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdatePresenterRole>,
) -> Result<Json<PresenterRole>, StatusCode> {
    let existing = sqlx::query_as::<_, PresenterRole>(&format!(
        "SELECT {ROLE_COLUMNS} FROM presenter_roles WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
    .ok_or(StatusCode::NOT_FOUND)?;

    let role = sqlx::query_as::<_, PresenterRole>(&format!(
        "UPDATE presenter_roles
        SET is_presenter = $1, position = $2, presented_as_name = $3,
            modifier = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING {ROLE_COLUMNS}"
    ))
    .bind(update.is_presenter.unwrap_or(existing.is_presenter))
    .bind(update.position.unwrap_or(existing.position))
    .bind(update.presented_as_name.or(existing.presented_as_name))
    .bind(&update.modifier)
    .bind(id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update presenter role: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(role))
}

#[utoipa::path(
    delete,
    path = "/presenter-roles/{id}",
    tag = "presenter-roles",
    params(("id" = Uuid, Path, description = "Presenter role ID")),
    responses(
        (status = 204, description = "Presenter role deleted"),
        (status = 404, description = "Presenter role not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_presenter_role(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let result = sqlx::query("DELETE FROM presenter_roles WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(StatusCode::NO_CONTENT)
}
