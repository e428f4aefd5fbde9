use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Presentation status enum matching the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "presentation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PresentationStatus {
    Draft,
    Submitted,
    Accepted,
    Rejected,
    Withdrawn,
}

/// Presentation response model
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Presentation {
    pub id: Uuid,
    pub conference_id: Uuid,
    /// Assigned section, if the presentation has been placed in the program
    pub section_id: Option<Uuid>,
    pub title: String,
    #[sqlx(rename = "abstract")]
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub status: PresentationStatus,
    /// Ordering within the assigned section
    pub position: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for creating a presentation.
///
/// Section placement is not part of creation; assignments go through the
/// conflict-checked assignment endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePresentation {
    pub conference_id: Uuid,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub status: Option<PresentationStatus>,
    pub creator: String,
    pub modifier: String,
}

/// Request model for updating a presentation
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePresentation {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub status: Option<PresentationStatus>,
    pub position: Option<i32>,
    pub modifier: String,
}

/// Link between a presenter and a presentation.
///
/// `is_presenter` is false for co-authors who are credited but do not take
/// the stage; only presenting roles participate in conflict detection.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct PresenterRole {
    pub id: Uuid,
    pub presentation_id: Uuid,
    pub presenter_id: Uuid,
    pub is_presenter: bool,
    pub position: i32,
    /// Display-name override for the program (e.g., stage name)
    pub presented_as_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for linking a presenter to a presentation
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePresenterRole {
    pub presentation_id: Uuid,
    pub presenter_id: Uuid,
    pub is_presenter: Option<bool>,
    pub position: i32,
    pub presented_as_name: Option<String>,
    pub creator: String,
    pub modifier: String,
}

/// Request model for updating a presenter role
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePresenterRole {
    pub is_presenter: Option<bool>,
    pub position: Option<i32>,
    pub presented_as_name: Option<String>,
    pub modifier: String,
}
