//! Scheduling conflict detection.
//!
//! The detector is pure: handlers load the relevant rows, build
//! [`PresenterSchedule`] values, and hand them over. Nothing in here touches
//! the database, which keeps the logic unit-testable in isolation.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::overlap::TimeWindow;

/// Conflict classification in API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConflictSeverity {
    /// Prevents assignment unless explicitly overridden
    Blocking,
    /// Informational only
    Warning,
}

/// Conflict kind in API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictKind {
    /// Presenter already holds another presentation in an overlapping slot
    PresenterTimeConflict,
    /// Proposed slot collides with a presenter-declared unavailability
    PresenterDeclaredConflict,
}

/// A single finding produced by the detector
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleConflict {
    pub kind: ConflictKind,
    pub severity: ConflictSeverity,
    pub presenter_id: Uuid,
    pub presenter_name: String,
    /// Colliding presentation, for time conflicts
    pub presentation_id: Option<Uuid>,
    pub presentation_title: Option<String>,
    pub section_id: Option<Uuid>,
    /// Colliding unavailability record, for declared conflicts
    pub declared_conflict_id: Option<Uuid>,
    pub message: String,
}

/// Detector output: findings plus the overall verdict
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConflictReport {
    pub conflicts: Vec<ScheduleConflict>,
    /// True iff no blocking conflict was found
    pub can_proceed: bool,
}

impl ConflictReport {
    fn from_conflicts(conflicts: Vec<ScheduleConflict>) -> Self {
        let can_proceed = !conflicts
            .iter()
            .any(|c| c.severity == ConflictSeverity::Blocking);
        ConflictReport {
            conflicts,
            can_proceed,
        }
    }

    pub fn empty() -> Self {
        ConflictReport {
            conflicts: Vec::new(),
            can_proceed: true,
        }
    }

    /// Downgrade every finding to a warning, for forced assignments.
    pub fn into_warnings(mut self) -> Self {
        for conflict in &mut self.conflicts {
            conflict.severity = ConflictSeverity::Warning;
        }
        self.can_proceed = true;
        self
    }
}

/// One of a presenter's other presentations, with its slot if scheduled
#[derive(Debug, Clone)]
pub struct ScheduledPresentation {
    pub presentation_id: Uuid,
    pub title: String,
    pub section_id: Uuid,
    pub section_name: String,
    /// None when the assigned section has no times yet
    pub window: Option<TimeWindow>,
}

/// A presenter's declared unavailability, already reduced to comparable form
#[derive(Debug, Clone)]
pub enum DeclaredWindow {
    TimeSlot { id: Uuid, window: TimeWindow },
    FullDay { id: Uuid, date: NaiveDate },
}

/// Everything the detector needs to know about one presenter of the
/// candidate presentation
#[derive(Debug, Clone)]
pub struct PresenterSchedule {
    pub presenter_id: Uuid,
    pub presenter_name: String,
    pub other_presentations: Vec<ScheduledPresentation>,
    pub declared: Vec<DeclaredWindow>,
}

/// Check a proposed slot against every presenter's existing commitments.
///
/// A proposed window of `None` (unscheduled section) can never collide and
/// yields an empty passing report. Entries with missing times are skipped
/// rather than treated as all-day blocks.
pub fn detect_conflicts(
    proposed: Option<TimeWindow>,
    presenters: &[PresenterSchedule],
) -> ConflictReport {
    let Some(window) = proposed else {
        return ConflictReport::empty();
    };

    let mut conflicts = Vec::new();

    for presenter in presenters {
        for other in &presenter.other_presentations {
            let Some(other_window) = other.window else {
                continue;
            };
            if window.overlaps(&other_window) {
                conflicts.push(ScheduleConflict {
                    kind: ConflictKind::PresenterTimeConflict,
                    severity: ConflictSeverity::Blocking,
                    presenter_id: presenter.presenter_id,
                    presenter_name: presenter.presenter_name.clone(),
                    presentation_id: Some(other.presentation_id),
                    presentation_title: Some(other.title.clone()),
                    section_id: Some(other.section_id),
                    declared_conflict_id: None,
                    message: format!(
                        "{} is already presenting \"{}\" in \"{}\" during the proposed slot",
                        presenter.presenter_name, other.title, other.section_name
                    ),
                });
            }
        }

        for declared in &presenter.declared {
            match declared {
                DeclaredWindow::TimeSlot {
                    id,
                    window: declared_window,
                } => {
                    if window.overlaps(declared_window) {
                        conflicts.push(declared_finding(
                            presenter,
                            *id,
                            format!(
                                "{} declared unavailability overlapping the proposed slot",
                                presenter.presenter_name
                            ),
                        ));
                    }
                }
                DeclaredWindow::FullDay { id, date } => {
                    if window.covers_date(*date) {
                        conflicts.push(declared_finding(
                            presenter,
                            *id,
                            format!(
                                "{} declared unavailability for all of {}",
                                presenter.presenter_name, date
                            ),
                        ));
                    }
                }
            }
        }
    }

    ConflictReport::from_conflicts(conflicts)
}

fn declared_finding(
    presenter: &PresenterSchedule,
    declared_conflict_id: Uuid,
    message: String,
) -> ScheduleConflict {
    ScheduleConflict {
        kind: ConflictKind::PresenterDeclaredConflict,
        severity: ConflictSeverity::Blocking,
        presenter_id: presenter.presenter_id,
        presenter_name: presenter.presenter_name.clone(),
        presentation_id: None,
        presentation_title: None,
        section_id: None,
        declared_conflict_id: Some(declared_conflict_id),
        message,
    }
}

/// Reference to a presenter inside a summary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PresenterRef {
    pub id: Uuid,
    pub name: String,
}

/// A scheduled presentation as seen by the conference-wide summary scan
#[derive(Debug, Clone)]
pub struct ScheduledEntry {
    pub presentation_id: Uuid,
    pub title: String,
    pub section_id: Uuid,
    pub section_name: String,
    pub window: TimeWindow,
    pub presenters: Vec<PresenterRef>,
}

/// One slot of a double-booking pair
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookedSlot {
    pub presentation_id: Uuid,
    pub title: String,
    pub section_id: Uuid,
    pub section_name: String,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub end_time: chrono::DateTime<chrono::Utc>,
}

impl BookedSlot {
    fn from_entry(entry: &ScheduledEntry) -> Self {
        BookedSlot {
            presentation_id: entry.presentation_id,
            title: entry.title.clone(),
            section_id: entry.section_id,
            section_name: entry.section_name.clone(),
            start_time: entry.window.start,
            end_time: entry.window.end,
        }
    }
}

/// A presenter booked into two overlapping slots
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DoubleBooking {
    pub presenter_id: Uuid,
    pub presenter_name: String,
    pub first: BookedSlot,
    pub second: BookedSlot,
}

/// Pairwise scan over all scheduled presentations of a conference.
///
/// Emits one finding per presenter per overlapping pair; pairs are visited
/// once (`i < j`), so no finding is reported twice.
pub fn double_booking_summary(entries: &[ScheduledEntry]) -> Vec<DoubleBooking> {
    let mut findings = Vec::new();

    for (i, a) in entries.iter().enumerate() {
        for b in &entries[i + 1..] {
            if !a.window.overlaps(&b.window) {
                continue;
            }
            for presenter in &a.presenters {
                if b.presenters.iter().any(|p| p.id == presenter.id) {
                    findings.push(DoubleBooking {
                        presenter_id: presenter.id,
                        presenter_name: presenter.name.clone(),
                        first: BookedSlot::from_entry(a),
                        second: BookedSlot::from_entry(b),
                    });
                }
            }
        }
    }

    findings
}
