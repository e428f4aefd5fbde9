mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use serial_test::serial;
use uuid::Uuid;

/// Helper to create a test server; None when no database is configured
async fn try_setup() -> Option<TestServer> {
    let pool = common::try_create_test_pool().await?;
    let app = common::create_test_app(pool);
    Some(TestServer::new(app).unwrap())
}

macro_rules! require_server {
    () => {
        match try_setup().await {
            Some(server) => server,
            None => {
                eprintln!("DATABASE_URL not set; skipping");
                return;
            }
        }
    };
}

/// Generate a distinct year per test conference, kept inside the range the
/// slug parser accepts. Cross-run uniqueness comes from the random acronym.
fn unique_test_year() -> i32 {
    use std::sync::atomic::{AtomicI32, Ordering};
    static COUNTER: AtomicI32 = AtomicI32::new(1990);
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Letters-only acronym so the slug stays parseable and unique across runs
fn unique_acronym() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(10)
        .map(|c| {
            if c.is_ascii_digit() {
                (b'G' + c.to_digit(10).unwrap() as u8) as char
            } else {
                c
            }
        })
        .collect::<String>()
        .to_uppercase()
}

async fn create_conference(server: &TestServer) -> Value {
    let body = json!({
        "acronym": unique_acronym(),
        "year": unique_test_year(),
        "name": "Test Conference",
        "creator": "test_user",
        "modifier": "test_user"
    });
    let response = server.post("/conferences").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn create_section(
    server: &TestServer,
    conference_id: &str,
    name: &str,
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Value {
    let body = json!({
        "conference_id": conference_id,
        "name": name,
        "start_time": start_time,
        "end_time": end_time,
        "creator": "test_user",
        "modifier": "test_user"
    });
    let response = server.post("/sections").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn create_presenter(server: &TestServer, full_name: &str) -> Value {
    let body = json!({
        "full_name": full_name,
        "creator": "test_user",
        "modifier": "test_user"
    });
    let response = server.post("/presenters").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn create_accepted_presentation(
    server: &TestServer,
    conference_id: &str,
    title: &str,
) -> Value {
    let body = json!({
        "conference_id": conference_id,
        "title": title,
        "status": "accepted",
        "creator": "test_user",
        "modifier": "test_user"
    });
    let response = server.post("/presentations").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn link_presenter(server: &TestServer, presentation_id: &str, presenter_id: &str) {
    let body = json!({
        "presentation_id": presentation_id,
        "presenter_id": presenter_id,
        "position": 0,
        "creator": "test_user",
        "modifier": "test_user"
    });
    let response = server.post("/presenter-roles").json(&body).await;
    response.assert_status(StatusCode::CREATED);
}

async fn assign(
    server: &TestServer,
    presentation_id: &str,
    section_id: &str,
    force: bool,
) -> axum_test::TestResponse {
    server
        .post(&format!(
            "/presentations/{presentation_id}/assign-with-conflict-check"
        ))
        .json(&json!({
            "section_id": section_id,
            "force_assign": force,
            "modifier": "test_user"
        }))
        .await
}

async fn check(server: &TestServer, presentation_id: &str, section_id: &str) -> Value {
    let response = server
        .post(&format!("/presentations/{presentation_id}/check-conflicts"))
        .json(&json!({ "section_id": section_id }))
        .await;
    response.assert_status_ok();
    response.json()
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("value should have an id").to_string()
}

// ============================================================================
// Conference API Tests
// ============================================================================

#[tokio::test]
async fn test_root() {
    let server = require_server!();
    let response = server.get("/").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_get_conference_not_found() {
    let server = require_server!();

    let fake_id = Uuid::new_v4();
    let response = server.get(&format!("/conferences/{fake_id}")).await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_get_conference_invalid_id() {
    let server = require_server!();

    let response = server.get("/conferences/!!!").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_conference_crud() {
    let server = require_server!();

    let created = create_conference(&server).await;
    let conference_id = id_of(&created);
    let slug = created["slug"].as_str().expect("slug should be computed");

    // Read back by UUID and by slug
    let response = server.get(&format!("/conferences/{conference_id}")).await;
    response.assert_status_ok();
    let fetched: Value = response.json();
    assert_eq!(fetched["id"], created["id"]);

    let response = server.get(&format!("/conferences/{slug}")).await;
    response.assert_status_ok();
    let by_slug: Value = response.json();
    assert_eq!(by_slug["id"], created["id"]);

    // Update
    let response = server
        .put(&format!("/conferences/{conference_id}"))
        .json(&json!({ "city": "Lisbon", "modifier": "test_user" }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["city"], "Lisbon");

    // Delete
    let response = server.delete(&format!("/conferences/{conference_id}")).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/conferences/{conference_id}")).await;
    response.assert_status_not_found();
}

// ============================================================================
// Section API Tests
// ============================================================================

#[tokio::test]
#[serial]
async fn test_section_window_validation() {
    let server = require_server!();
    let conference = create_conference(&server).await;
    let conference_id = id_of(&conference);

    // Only one endpoint
    let response = server
        .post("/sections")
        .json(&json!({
            "conference_id": conference_id,
            "name": "Half-scheduled",
            "start_time": "2030-05-01T09:00:00Z",
            "creator": "test_user",
            "modifier": "test_user"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Start at/after end
    let response = server
        .post("/sections")
        .json(&json!({
            "conference_id": conference_id,
            "name": "Backwards",
            "start_time": "2030-05-01T10:00:00Z",
            "end_time": "2030-05-01T09:00:00Z",
            "creator": "test_user",
            "modifier": "test_user"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Fully unscheduled is fine
    let section = create_section(&server, &conference_id, "Unscheduled", None, None).await;
    assert!(section["start_time"].is_null());
}

// ============================================================================
// Presenter API Tests
// ============================================================================

#[tokio::test]
#[serial]
async fn test_presenter_normalization_and_search() {
    let server = require_server!();

    let marker = unique_acronym().to_lowercase();
    let name = format!("José García {marker}");
    let presenter = create_presenter(&server, &name).await;

    let normalized = presenter["normalized_name"].as_str().unwrap();
    assert_eq!(normalized, format!("jose garcia {marker}"));

    // Accent-insensitive search
    let response = server
        .get(&format!("/presenters?search=Jose%20Garcia%20{marker}"))
        .await;
    response.assert_status_ok();
    let found: Vec<Value> = response.json();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], presenter["id"]);
}

// ============================================================================
// Conflict Detection Tests
// ============================================================================

#[tokio::test]
#[serial]
async fn test_adjacent_slots_do_not_conflict() {
    let server = require_server!();
    let conference = create_conference(&server).await;
    let conference_id = id_of(&conference);

    let first = create_section(
        &server,
        &conference_id,
        "Morning A",
        Some("2030-05-01T09:00:00Z"),
        Some("2030-05-01T09:30:00Z"),
    )
    .await;
    let second = create_section(
        &server,
        &conference_id,
        "Morning B",
        Some("2030-05-01T09:30:00Z"),
        Some("2030-05-01T10:00:00Z"),
    )
    .await;

    let presenter = create_presenter(&server, "Back To Back").await;
    let talk_a = create_accepted_presentation(&server, &conference_id, "Talk A").await;
    let talk_b = create_accepted_presentation(&server, &conference_id, "Talk B").await;
    link_presenter(&server, &id_of(&talk_a), &id_of(&presenter)).await;
    link_presenter(&server, &id_of(&talk_b), &id_of(&presenter)).await;

    assign(&server, &id_of(&talk_a), &id_of(&first), false)
        .await
        .assert_status_ok();

    // Shared endpoint only: not a conflict
    let report = check(&server, &id_of(&talk_b), &id_of(&second)).await;
    assert_eq!(report["can_proceed"], true);
    assert!(report["conflicts"].as_array().unwrap().is_empty());

    assign(&server, &id_of(&talk_b), &id_of(&second), false)
        .await
        .assert_status_ok();

    // No double bookings in the summary either
    let response = server
        .get(&format!("/conferences/{conference_id}/conflicts/summary"))
        .await;
    response.assert_status_ok();
    let summary: Value = response.json();
    assert_eq!(summary["presentations_scanned"], 2);
    assert!(summary["double_bookings"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_overlapping_slots_block_assignment() {
    let server = require_server!();
    let conference = create_conference(&server).await;
    let conference_id = id_of(&conference);

    let first = create_section(
        &server,
        &conference_id,
        "Morning A",
        Some("2030-05-01T09:00:00Z"),
        Some("2030-05-01T10:00:00Z"),
    )
    .await;
    let second = create_section(
        &server,
        &conference_id,
        "Morning B",
        Some("2030-05-01T09:30:00Z"),
        Some("2030-05-01T10:30:00Z"),
    )
    .await;

    let presenter = create_presenter(&server, "Busy Speaker").await;
    let talk_a = create_accepted_presentation(&server, &conference_id, "Talk A").await;
    let talk_b = create_accepted_presentation(&server, &conference_id, "Talk B").await;
    link_presenter(&server, &id_of(&talk_a), &id_of(&presenter)).await;
    link_presenter(&server, &id_of(&talk_b), &id_of(&presenter)).await;

    assign(&server, &id_of(&talk_a), &id_of(&first), false)
        .await
        .assert_status_ok();

    // Dry run reports exactly one blocking time conflict
    let report = check(&server, &id_of(&talk_b), &id_of(&second)).await;
    assert_eq!(report["can_proceed"], false);
    let conflicts = report["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["kind"], "PRESENTER_TIME_CONFLICT");
    assert_eq!(conflicts[0]["severity"], "BLOCKING");
    assert_eq!(conflicts[0]["presentation_title"], "Talk A");

    // Assignment without override is rejected with the report
    let response = assign(&server, &id_of(&talk_b), &id_of(&second), false).await;
    response.assert_status(StatusCode::CONFLICT);
    let rejected: Value = response.json();
    assert_eq!(rejected["can_proceed"], false);
    assert_eq!(rejected["conflicts"].as_array().unwrap().len(), 1);

    // The presentation stays unassigned
    let response = server.get(&format!("/presentations/{}", id_of(&talk_b))).await;
    response.assert_status_ok();
    let talk: Value = response.json();
    assert!(talk["section_id"].is_null());
}

#[tokio::test]
#[serial]
async fn test_force_assign_surfaces_warnings() {
    let server = require_server!();
    let conference = create_conference(&server).await;
    let conference_id = id_of(&conference);

    let first = create_section(
        &server,
        &conference_id,
        "Morning A",
        Some("2030-05-01T09:00:00Z"),
        Some("2030-05-01T10:00:00Z"),
    )
    .await;
    let second = create_section(
        &server,
        &conference_id,
        "Morning B",
        Some("2030-05-01T09:30:00Z"),
        Some("2030-05-01T10:30:00Z"),
    )
    .await;

    let presenter = create_presenter(&server, "Overridden Speaker").await;
    let talk_a = create_accepted_presentation(&server, &conference_id, "Talk A").await;
    let talk_b = create_accepted_presentation(&server, &conference_id, "Talk B").await;
    link_presenter(&server, &id_of(&talk_a), &id_of(&presenter)).await;
    link_presenter(&server, &id_of(&talk_b), &id_of(&presenter)).await;

    assign(&server, &id_of(&talk_a), &id_of(&first), false)
        .await
        .assert_status_ok();

    let response = assign(&server, &id_of(&talk_b), &id_of(&second), true).await;
    response.assert_status_ok();
    let outcome: Value = response.json();
    assert_eq!(outcome["presentation"]["section_id"], second["id"]);
    let warnings = outcome["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["severity"], "WARNING");

    // Both bookings now show up in the conference summary, once
    let response = server
        .get(&format!("/conferences/{conference_id}/conflicts/summary"))
        .await;
    response.assert_status_ok();
    let summary: Value = response.json();
    let bookings = summary["double_bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["presenter_id"], presenter["id"]);

    // Unassigning clears the overlap
    let response = server
        .post(&format!("/presentations/{}/unassign", id_of(&talk_b)))
        .json(&json!({ "modifier": "test_user" }))
        .await;
    response.assert_status_ok();
    let cleared: Value = response.json();
    assert!(cleared["section_id"].is_null());

    let response = server
        .get(&format!("/conferences/{conference_id}/conflicts/summary"))
        .await;
    let summary: Value = response.json();
    assert!(summary["double_bookings"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_declared_full_day_blocks_assignment() {
    let server = require_server!();
    let conference = create_conference(&server).await;
    let conference_id = id_of(&conference);

    let section = create_section(
        &server,
        &conference_id,
        "Afternoon",
        Some("2030-06-02T14:00:00Z"),
        Some("2030-06-02T15:00:00Z"),
    )
    .await;

    let presenter = create_presenter(&server, "Away That Day").await;
    let presenter_id = id_of(&presenter);
    let talk = create_accepted_presentation(&server, &conference_id, "Keynote").await;
    link_presenter(&server, &id_of(&talk), &presenter_id).await;

    let response = server
        .post(&format!("/presenters/{presenter_id}/conflicts"))
        .json(&json!({
            "kind": "full_day",
            "date": "2030-06-02",
            "note": "travel",
            "creator": "test_user",
            "modifier": "test_user"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let declared: Value = response.json();

    // Any slot on that date is blocked, regardless of time
    let report = check(&server, &id_of(&talk), &id_of(&section)).await;
    assert_eq!(report["can_proceed"], false);
    let conflicts = report["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["kind"], "PRESENTER_DECLARED_CONFLICT");
    assert_eq!(conflicts[0]["declared_conflict_id"], declared["id"]);

    let response = assign(&server, &id_of(&talk), &id_of(&section), false).await;
    response.assert_status(StatusCode::CONFLICT);

    // Removing the declaration unblocks the slot
    let response = server
        .delete(&format!("/declared-conflicts/{}", id_of(&declared)))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let report = check(&server, &id_of(&talk), &id_of(&section)).await;
    assert_eq!(report["can_proceed"], true);

    assign(&server, &id_of(&talk), &id_of(&section), false)
        .await
        .assert_status_ok();
}

#[tokio::test]
#[serial]
async fn test_declared_time_slot_validation_and_overlap() {
    let server = require_server!();
    let conference = create_conference(&server).await;
    let conference_id = id_of(&conference);

    let presenter = create_presenter(&server, "Partially Away").await;
    let presenter_id = id_of(&presenter);

    // time_slot declarations need both endpoints, in order
    let response = server
        .post(&format!("/presenters/{presenter_id}/conflicts"))
        .json(&json!({
            "kind": "time_slot",
            "start_time": "2030-06-03T09:00:00Z",
            "creator": "test_user",
            "modifier": "test_user"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post(&format!("/presenters/{presenter_id}/conflicts"))
        .json(&json!({
            "kind": "time_slot",
            "start_time": "2030-06-03T09:00:00Z",
            "end_time": "2030-06-03T12:00:00Z",
            "creator": "test_user",
            "modifier": "test_user"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = server.get(&format!("/presenters/{presenter_id}/conflicts")).await;
    response.assert_status_ok();
    let declared: Vec<Value> = response.json();
    assert_eq!(declared.len(), 1);

    let talk = create_accepted_presentation(&server, &conference_id, "Workshop").await;
    link_presenter(&server, &id_of(&talk), &presenter_id).await;

    // Overlapping the declared window blocks
    let inside = create_section(
        &server,
        &conference_id,
        "Late morning",
        Some("2030-06-03T11:00:00Z"),
        Some("2030-06-03T11:45:00Z"),
    )
    .await;
    let report = check(&server, &id_of(&talk), &id_of(&inside)).await;
    assert_eq!(report["can_proceed"], false);

    // Touching the declared window's end is fine
    let after = create_section(
        &server,
        &conference_id,
        "Afternoon",
        Some("2030-06-03T12:00:00Z"),
        Some("2030-06-03T13:00:00Z"),
    )
    .await;
    let report = check(&server, &id_of(&talk), &id_of(&after)).await;
    assert_eq!(report["can_proceed"], true);
}

#[tokio::test]
#[serial]
async fn test_assignment_into_unscheduled_section_passes() {
    let server = require_server!();
    let conference = create_conference(&server).await;
    let conference_id = id_of(&conference);

    let section = create_section(&server, &conference_id, "TBD", None, None).await;
    let presenter = create_presenter(&server, "Flexible Speaker").await;
    let talk = create_accepted_presentation(&server, &conference_id, "Floating talk").await;
    link_presenter(&server, &id_of(&talk), &id_of(&presenter)).await;

    let report = check(&server, &id_of(&talk), &id_of(&section)).await;
    assert_eq!(report["can_proceed"], true);

    assign(&server, &id_of(&talk), &id_of(&section), false)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_check_conflicts_unknown_presentation() {
    let server = require_server!();

    let response = server
        .post(&format!("/presentations/{}/check-conflicts", Uuid::new_v4()))
        .json(&json!({ "section_id": Uuid::new_v4() }))
        .await;
    response.assert_status_not_found();
}
