use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

/// Conference response model (matches database schema)
#[derive(Debug, sqlx::FromRow, ToSchema)]
pub struct Conference {
    pub id: Uuid,
    /// Short uppercase identifier (e.g., RUSTFEST, EUROCONF)
    pub acronym: String,
    pub year: i32,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// IANA timezone name the program is published in
    pub timezone: Option<String>,
    pub website_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conference {
    /// Get the human-friendly slug (e.g., RUSTFEST2026)
    pub fn slug(&self) -> String {
        format!("{}{}", self.acronym.to_uppercase(), self.year)
    }
}

// Custom serialization to include computed slug field
impl Serialize for Conference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Conference", 13)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("slug", &self.slug())?;
        state.serialize_field("acronym", &self.acronym)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("start_date", &self.start_date)?;
        state.serialize_field("end_date", &self.end_date)?;
        state.serialize_field("city", &self.city)?;
        state.serialize_field("country", &self.country)?;
        state.serialize_field("timezone", &self.timezone)?;
        state.serialize_field("website_url", &self.website_url)?;
        state.serialize_field("created_at", &self.created_at)?;
        state.serialize_field("updated_at", &self.updated_at)?;
        state.end()
    }
}

/// Request model for creating a new conference
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateConference {
    pub acronym: String,
    pub year: i32,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub timezone: Option<String>,
    pub website_url: Option<String>,
    pub creator: String,
    pub modifier: String,
}

/// Request model for updating a conference
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateConference {
    pub acronym: Option<String>,
    pub year: Option<i32>,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub timezone: Option<String>,
    pub website_url: Option<String>,
    pub modifier: String,
}
