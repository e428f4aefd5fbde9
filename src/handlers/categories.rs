use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::conferences::resolve_conference_id;
use crate::models::{Category, CreateCategory, UpdateCategory};

const CATEGORY_COLUMNS: &str =
    "id, conference_id, name, description, color, created_at, updated_at";

#[utoipa::path(
    get,
    path = "/conferences/{id}/categories",
    tag = "categories",
    params(("id" = String, Path, description = "Conference ID (UUID) or slug")),
    responses(
        (status = 200, description = "Categories of the conference", body = Vec<Category>),
        (status = 404, description = "Conference not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_categories(
    State(pool): State<Pool<Postgres>>,
    Path(id_or_slug): Path<String>,
) -> Result<Json<Vec<Category>>, StatusCode> {
    let conference_id = resolve_conference_id(&pool, &id_or_slug).await?;

    let categories = sqlx::query_as::<_, Category>(&format!(
        "SELECT {CATEGORY_COLUMNS} FROM categories WHERE conference_id = $1 ORDER BY name"
    ))
    .bind(conference_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch categories: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>, StatusCode> {
    sqlx::query_as::<_, Category>(&format!(
        "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
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
    path = "/categories",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_category(
    State(pool): State<Pool<Postgres>>,
    Json(new_category): Json<CreateCategory>,
) -> Result<(StatusCode, Json<Category>), StatusCode> {
    let category = sqlx::query_as::<_, Category>(&format!(
        "INSERT INTO categories (conference_id, name, description, color, creator, modifier)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {CATEGORY_COLUMNS}"
    ))
    .bind(new_category.conference_id)
    .bind(&new_category.name)
    .bind(&new_category.description)
    .bind(&new_category.color)
    .bind(&new_category.creator)
    .bind(&new_category.modifier)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create category: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_category(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateCategory>,
) -> Result<Json<Category>, StatusCode> {
    let existing = sqlx::query_as::<_, Category>(&format!(
        "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
    .ok_or(StatusCode::NOT_FOUND)?;

    let category = sqlx::query_as::<_, Category>(&format!(
        "UPDATE categories
        SET name = $1, description = $2, color = $3, modifier = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING {CATEGORY_COLUMNS}"
    ))
    .bind(update.name.unwrap_or(existing.name))
    .bind(update.description.or(existing.description))
    .bind(update.color.or(existing.color))
    .bind(&update.modifier)
    .bind(id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update category: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_category(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(StatusCode::NO_CONTENT)
}
