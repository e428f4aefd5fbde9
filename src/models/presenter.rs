use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Presenter response model
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Presenter {
    pub id: Uuid,
    pub full_name: String,
    /// Unicode-folded form of `full_name`, maintained server-side for
    /// dedup and search
    pub normalized_name: String,
    pub email: Option<String>,
    pub affiliation: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for creating a presenter
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePresenter {
    pub full_name: String,
    pub email: Option<String>,
    pub affiliation: Option<String>,
    pub bio: Option<String>,
    pub creator: String,
    pub modifier: String,
}

/// Request model for updating a presenter
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePresenter {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub affiliation: Option<String>,
    pub bio: Option<String>,
    pub modifier: String,
}
