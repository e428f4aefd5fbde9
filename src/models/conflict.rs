use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Declared-conflict kind enum matching the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "conflict_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeclaredConflictKind {
    /// Explicit start/end window the presenter is unavailable for
    TimeSlot,
    /// Whole calendar day the presenter is unavailable on
    FullDay,
}

/// Presenter-submitted unavailability record.
///
/// `time_slot` records carry `start_time`/`end_time`; `full_day` records
/// carry `date`. The unused fields are NULL.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct DeclaredConflict {
    pub id: Uuid,
    pub presenter_id: Uuid,
    pub kind: DeclaredConflictKind,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for declaring a conflict for a presenter
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDeclaredConflict {
    pub kind: DeclaredConflictKind,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
    pub creator: String,
    pub modifier: String,
}
