use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Presentation track within a conference (e.g., "Talks", "Workshops", "Posters")
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub conference_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Display color used by schedule clients (hex, e.g., "#1f77b4")
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for creating a category
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategory {
    pub conference_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub creator: String,
    pub modifier: String,
}

/// Request model for updating a category
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub modifier: String,
}
