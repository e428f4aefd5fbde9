//! Conflict-detection endpoints: declared-unavailability CRUD, the dry-run
//! check, the conflict-gated assignment, and the conference-wide summary.
//!
//! Handlers here only load rows and shape responses; the decisions live in
//! [`crate::schedule`].

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, Pool, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use super::conferences::resolve_conference_id;
use super::presentations::PRESENTATION_COLUMNS;
use super::sections::SECTION_COLUMNS;
use crate::models::{
    CreateDeclaredConflict, DeclaredConflict, DeclaredConflictKind, Presentation, Section,
};
use crate::schedule::{
    detect_conflicts, double_booking_summary, ConflictReport, DeclaredWindow, DoubleBooking,
    PresenterRef, PresenterSchedule, ScheduleConflict, ScheduledEntry, ScheduledPresentation,
    TimeWindow,
};

const DECLARED_COLUMNS: &str =
    "id, presenter_id, kind, start_time, end_time, date, note, created_at, updated_at";

/// Request body for the dry-run conflict check
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckConflictsRequest {
    pub section_id: Uuid,
}

/// Request body for the conflict-gated assignment
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignSectionRequest {
    pub section_id: Uuid,
    /// Assign even when blocking conflicts exist; they are returned as
    /// warnings instead
    #[serde(default)]
    pub force_assign: bool,
    pub modifier: String,
}

/// Request body for clearing a section assignment
#[derive(Debug, Deserialize, ToSchema)]
pub struct UnassignSectionRequest {
    pub modifier: String,
}

/// Successful assignment response
#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentOutcome {
    pub presentation: Presentation,
    pub warnings: Vec<ScheduleConflict>,
}

/// Conference-wide double-booking report
#[derive(Debug, Serialize, ToSchema)]
pub struct ConflictSummary {
    pub conference_id: Uuid,
    pub presentations_scanned: usize,
    pub double_bookings: Vec<DoubleBooking>,
}

#[derive(sqlx::FromRow)]
struct PresenterRow {
    id: Uuid,
    full_name: String,
}

#[derive(sqlx::FromRow)]
struct OtherPresentationRow {
    presentation_id: Uuid,
    title: String,
    section_id: Uuid,
    section_name: String,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow)]
struct DeclaredRow {
    id: Uuid,
    kind: DeclaredConflictKind,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    date: Option<NaiveDate>,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    presentation_id: Uuid,
    title: String,
    section_id: Uuid,
    section_name: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    presenter_id: Uuid,
    presenter_name: String,
}

fn internal(e: sqlx::Error) -> StatusCode {
    tracing::error!("Conflict query failed: {:?}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn fetch_presentation(pool: &Pool<Postgres>, id: Uuid) -> Result<Presentation, StatusCode> {
    sqlx::query_as::<_, Presentation>(&format!(
        "SELECT {PRESENTATION_COLUMNS} FROM presentations WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(internal)?
    .ok_or(StatusCode::NOT_FOUND)
}

async fn fetch_section(pool: &Pool<Postgres>, id: Uuid) -> Result<Section, StatusCode> {
    sqlx::query_as::<_, Section>(&format!(
        "SELECT {SECTION_COLUMNS} FROM sections WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(internal)?
    .ok_or(StatusCode::NOT_FOUND)
}

/// Reduce a declared-conflict row to the detector's comparable form.
/// Rows missing the fields their kind requires are dropped.
fn declared_window(row: DeclaredRow) -> Option<DeclaredWindow> {
    match row.kind {
        DeclaredConflictKind::TimeSlot => match (row.start_time, row.end_time) {
            (Some(start), Some(end)) => Some(DeclaredWindow::TimeSlot {
                id: row.id,
                window: TimeWindow::new(start, end),
            }),
            _ => None,
        },
        DeclaredConflictKind::FullDay => row.date.map(|date| DeclaredWindow::FullDay {
            id: row.id,
            date,
        }),
    }
}

/// Load the conflict-detection context for every presenter of the candidate
/// presentation: their other accepted scheduled presentations and their
/// declared unavailability.
async fn load_presenter_schedules(
    conn: &mut PgConnection,
    presentation_id: Uuid,
) -> Result<Vec<PresenterSchedule>, sqlx::Error> {
    let presenters = sqlx::query_as::<_, PresenterRow>(
        "SELECT p.id, p.full_name FROM presenters p
         JOIN presenter_roles r ON r.presenter_id = p.id
         WHERE r.presentation_id = $1 AND r.is_presenter
         ORDER BY r.position",
    )
    .bind(presentation_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut schedules = Vec::with_capacity(presenters.len());
    for presenter in presenters {
        let others = sqlx::query_as::<_, OtherPresentationRow>(
            "SELECT pr.id AS presentation_id, pr.title, s.id AS section_id,
                    s.name AS section_name, s.start_time, s.end_time
             FROM presentations pr
             JOIN presenter_roles r ON r.presentation_id = pr.id
             JOIN sections s ON s.id = pr.section_id
             WHERE r.presenter_id = $1 AND r.is_presenter
               AND pr.id <> $2 AND pr.status = 'accepted'",
        )
        .bind(presenter.id)
        .bind(presentation_id)
        .fetch_all(&mut *conn)
        .await?;

        let declared = sqlx::query_as::<_, DeclaredRow>(
            "SELECT id, kind, start_time, end_time, date
             FROM declared_conflicts WHERE presenter_id = $1",
        )
        .bind(presenter.id)
        .fetch_all(&mut *conn)
        .await?;

        schedules.push(PresenterSchedule {
            presenter_id: presenter.id,
            presenter_name: presenter.full_name,
            other_presentations: others
                .into_iter()
                .map(|row| ScheduledPresentation {
                    presentation_id: row.presentation_id,
                    title: row.title,
                    section_id: row.section_id,
                    section_name: row.section_name,
                    window: match (row.start_time, row.end_time) {
                        (Some(start), Some(end)) => Some(TimeWindow::new(start, end)),
                        _ => None,
                    },
                })
                .collect(),
            declared: declared.into_iter().filter_map(declared_window).collect(),
        });
    }

    Ok(schedules)
}

#[utoipa::path(
    post,
    path = "/presentations/{id}/check-conflicts",
    tag = "conflicts",
    params(("id" = Uuid, Path, description = "Presentation ID")),
    request_body = CheckConflictsRequest,
    responses(
        (status = 200, description = "Conflict report for the proposed assignment", body = ConflictReport),
        (status = 404, description = "Presentation or section not found"),
        (status = 400, description = "Section belongs to a different conference"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn check_conflicts(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
    Json(body): Json<CheckConflictsRequest>,
) -> Result<Json<ConflictReport>, StatusCode> {
    let presentation = fetch_presentation(&pool, id).await?;
    let section = fetch_section(&pool, body.section_id).await?;
    if section.conference_id != presentation.conference_id {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut conn = pool.acquire().await.map_err(internal)?;
    let schedules = load_presenter_schedules(&mut conn, id)
        .await
        .map_err(internal)?;

    Ok(Json(detect_conflicts(section.window(), &schedules)))
}

#[utoipa::path(
    post,
    path = "/presentations/{id}/assign-with-conflict-check",
    tag = "conflicts",
    params(("id" = Uuid, Path, description = "Presentation ID")),
    request_body = AssignSectionRequest,
    responses(
        (status = 200, description = "Assigned; blocking findings surfaced as warnings when forced", body = AssignmentOutcome),
        (status = 409, description = "Blocking conflicts and no override", body = ConflictReport),
        (status = 404, description = "Presentation or section not found"),
        (status = 400, description = "Section belongs to a different conference"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn assign_with_conflict_check(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
    Json(body): Json<AssignSectionRequest>,
) -> Result<Response, StatusCode> {
    let presentation = fetch_presentation(&pool, id).await?;
    let section = fetch_section(&pool, body.section_id).await?;
    if section.conference_id != presentation.conference_id {
        return Err(StatusCode::BAD_REQUEST);
    }

    // Check and write in one transaction. Locking the presenter rows first
    // serializes racing assignments that share a presenter, so the second
    // one re-reads the first one's committed schedule.
    let mut tx = pool.begin().await.map_err(internal)?;

    sqlx::query(
        "SELECT p.id FROM presenters p
         JOIN presenter_roles r ON r.presenter_id = p.id
         WHERE r.presentation_id = $1 AND r.is_presenter
         FOR UPDATE OF p",
    )
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(internal)?;

    let schedules = load_presenter_schedules(&mut tx, id)
        .await
        .map_err(internal)?;
    let report = detect_conflicts(section.window(), &schedules);

    if !report.can_proceed && !body.force_assign {
        return Ok((StatusCode::CONFLICT, Json(report)).into_response());
    }

    let updated = sqlx::query_as::<_, Presentation>(&format!(
        "UPDATE presentations
        SET section_id = $1, modifier = $2, updated_at = NOW()
        WHERE id = $3
        RETURNING {PRESENTATION_COLUMNS}"
    ))
    .bind(body.section_id)
    .bind(&body.modifier)
    .bind(id)
    .fetch_one(&mut *tx)
    .await
    .map_err(internal)?;

    tx.commit().await.map_err(internal)?;

    let warnings = if body.force_assign {
        report.into_warnings().conflicts
    } else {
        report.conflicts
    };

    Ok((
        StatusCode::OK,
        Json(AssignmentOutcome {
            presentation: updated,
            warnings,
        }),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/presentations/{id}/unassign",
    tag = "conflicts",
    params(("id" = Uuid, Path, description = "Presentation ID")),
    request_body = UnassignSectionRequest,
    responses(
        (status = 200, description = "Section assignment cleared", body = Presentation),
        (status = 404, description = "Presentation not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn unassign_section(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UnassignSectionRequest>,
) -> Result<Json<Presentation>, StatusCode> {
    sqlx::query_as::<_, Presentation>(&format!(
        "UPDATE presentations
        SET section_id = NULL, position = NULL, modifier = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING {PRESENTATION_COLUMNS}"
    ))
    .bind(&body.modifier)
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(internal)?
    .map(Json)
    .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    get,
    path = "/conferences/{id}/conflicts/summary",
    tag = "conflicts",
    params(("id" = String, Path, description = "Conference ID (UUID) or slug")),
    responses(
        (status = 200, description = "Double-booking report over the scheduled program", body = ConflictSummary),
        (status = 404, description = "Conference not found"),
        (status = 400, description = "Invalid ID format"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn conflicts_summary(
    State(pool): State<Pool<Postgres>>,
    Path(id_or_slug): Path<String>,
) -> Result<Json<ConflictSummary>, StatusCode> {
    let conference_id = resolve_conference_id(&pool, &id_or_slug).await?;

    let rows = sqlx::query_as::<_, SummaryRow>(
        "SELECT p.id AS presentation_id, p.title, s.id AS section_id,
                s.name AS section_name, s.start_time, s.end_time,
                pe.id AS presenter_id, pe.full_name AS presenter_name
         FROM presentations p
         JOIN sections s ON s.id = p.section_id
         JOIN presenter_roles r ON r.presentation_id = p.id AND r.is_presenter
         JOIN presenters pe ON pe.id = r.presenter_id
         WHERE p.conference_id = $1 AND p.status = 'accepted'
           AND s.start_time IS NOT NULL AND s.end_time IS NOT NULL
         ORDER BY p.id, r.position",
    )
    .bind(conference_id)
    .fetch_all(&pool)
    .await
    .map_err(internal)?;

    // rows arrive grouped by presentation
    let mut entries: Vec<ScheduledEntry> = Vec::new();
    for row in rows {
        let presenter = PresenterRef {
            id: row.presenter_id,
            name: row.presenter_name,
        };
        match entries.last_mut() {
            Some(entry) if entry.presentation_id == row.presentation_id => {
                entry.presenters.push(presenter);
            }
            _ => entries.push(ScheduledEntry {
                presentation_id: row.presentation_id,
                title: row.title,
                section_id: row.section_id,
                section_name: row.section_name,
                window: TimeWindow::new(row.start_time, row.end_time),
                presenters: vec![presenter],
            }),
        }
    }

    let double_bookings = double_booking_summary(&entries);

    Ok(Json(ConflictSummary {
        conference_id,
        presentations_scanned: entries.len(),
        double_bookings,
    }))
}

#[utoipa::path(
    get,
    path = "/presenters/{id}/conflicts",
    tag = "conflicts",
    params(("id" = Uuid, Path, description = "Presenter ID")),
    responses(
        (status = 200, description = "Declared conflicts of the presenter", body = Vec<DeclaredConflict>),
        (status = 404, description = "Presenter not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_declared_conflicts(
    State(pool): State<Pool<Postgres>>,
    Path(presenter_id): Path<Uuid>,
) -> Result<Json<Vec<DeclaredConflict>>, StatusCode> {
    ensure_presenter_exists(&pool, presenter_id).await?;

    let conflicts = sqlx::query_as::<_, DeclaredConflict>(&format!(
        "SELECT {DECLARED_COLUMNS} FROM declared_conflicts
        WHERE presenter_id = $1
        ORDER BY created_at"
    ))
    .bind(presenter_id)
    .fetch_all(&pool)
    .await
    .map_err(internal)?;

    Ok(Json(conflicts))
}

#[utoipa::path(
    post,
    path = "/presenters/{id}/conflicts",
    tag = "conflicts",
    params(("id" = Uuid, Path, description = "Presenter ID")),
    request_body = CreateDeclaredConflict,
    responses(
        (status = 201, description = "Declared conflict recorded", body = DeclaredConflict),
        (status = 400, description = "Fields do not match the conflict kind"),
        (status = 404, description = "Presenter not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_declared_conflict(
    State(pool): State<Pool<Postgres>>,
    Path(presenter_id): Path<Uuid>,
    Json(new_conflict): Json<CreateDeclaredConflict>,
) -> Result<(StatusCode, Json<DeclaredConflict>), StatusCode> {
    ensure_presenter_exists(&pool, presenter_id).await?;

    // Each kind requires its own fields; the others are stored as NULL.
    let (start_time, end_time, date) = match new_conflict.kind {
        DeclaredConflictKind::TimeSlot => match (new_conflict.start_time, new_conflict.end_time) {
            (Some(start), Some(end)) if start < end => (Some(start), Some(end), None),
            _ => return Err(StatusCode::BAD_REQUEST),
        },
        DeclaredConflictKind::FullDay => match new_conflict.date {
            Some(date) => (None, None, Some(date)),
            None => return Err(StatusCode::BAD_REQUEST),
        },
    };

    let conflict = sqlx::query_as::<_, DeclaredConflict>(&format!(
        "INSERT INTO declared_conflicts (
            presenter_id, kind, start_time, end_time, date, note, creator, modifier
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {DECLARED_COLUMNS}"
    ))
    .bind(presenter_id)
    .bind(new_conflict.kind)
    .bind(start_time)
    .bind(end_time)
    .bind(date)
    .bind(&new_conflict.note)
    .bind(&new_conflict.creator)
    .bind(&new_conflict.modifier)
    .fetch_one(&pool)
    .await
    .map_err(internal)?;

    Ok((StatusCode::CREATED, Json(conflict)))
}

#[utoipa::path(
    delete,
    path = "/declared-conflicts/{id}",
    tag = "conflicts",
    params(("id" = Uuid, Path, description = "Declared conflict ID")),
    responses(
        (status = 204, description = "Declared conflict removed"),
        (status = 404, description = "Declared conflict not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_declared_conflict(
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let result = sqlx::query("DELETE FROM declared_conflicts WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(internal)?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_presenter_exists(pool: &Pool<Postgres>, id: Uuid) -> Result<(), StatusCode> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM presenters WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(internal)?
        .map(|_| ())
        .ok_or(StatusCode::NOT_FOUND)
}
