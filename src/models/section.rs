use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schedule::TimeWindow;

/// Scheduled block within a conference day.
///
/// Unscheduled sections carry neither `start_time` nor `end_time`; a section
/// with only one of the two is treated as unscheduled for conflict purposes.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Section {
    pub id: Uuid,
    pub conference_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub room: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Section {
    /// The section's time window, if it is fully scheduled.
    pub fn window(&self) -> Option<TimeWindow> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(TimeWindow { start, end }),
            _ => None,
        }
    }
}

/// Request model for creating a section
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSection {
    pub conference_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub room: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub creator: String,
    pub modifier: String,
}

/// Request model for updating a section
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSection {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub room: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub modifier: String,
}
