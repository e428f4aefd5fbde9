use axum::middleware::from_fn;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use symposia::middleware::require_api_token;
use symposia::router;

#[derive(OpenApi)]
#[openapi(
    paths(
        symposia::handlers::conferences::list_conferences,
        symposia::handlers::conferences::get_conference,
        symposia::handlers::conferences::create_conference,
        symposia::handlers::conferences::update_conference,
        symposia::handlers::conferences::delete_conference,
        symposia::handlers::categories::list_categories,
        symposia::handlers::categories::get_category,
        symposia::handlers::categories::create_category,
        symposia::handlers::categories::update_category,
        symposia::handlers::categories::delete_category,
        symposia::handlers::sections::list_sections,
        symposia::handlers::sections::get_section,
        symposia::handlers::sections::create_section,
        symposia::handlers::sections::update_section,
        symposia::handlers::sections::delete_section,
        symposia::handlers::presentations::list_presentations,
        symposia::handlers::presentations::get_presentation,
        symposia::handlers::presentations::create_presentation,
        symposia::handlers::presentations::update_presentation,
        symposia::handlers::presentations::delete_presentation,
        symposia::handlers::presenters::list_presenters,
        symposia::handlers::presenters::get_presenter,
        symposia::handlers::presenters::create_presenter,
        symposia::handlers::presenters::update_presenter,
        symposia::handlers::presenters::delete_presenter,
        symposia::handlers::presenter_roles::list_presenter_roles,
        symposia::handlers::presenter_roles::get_presenter_role,
        symposia::handlers::presenter_roles::create_presenter_role,
        symposia::handlers::presenter_roles::update_presenter_role,
        symposia::handlers::presenter_roles::delete_presenter_role,
        symposia::handlers::conflicts::check_conflicts,
        symposia::handlers::conflicts::assign_with_conflict_check,
        symposia::handlers::conflicts::unassign_section,
        symposia::handlers::conflicts::conflicts_summary,
        symposia::handlers::conflicts::list_declared_conflicts,
        symposia::handlers::conflicts::create_declared_conflict,
        symposia::handlers::conflicts::delete_declared_conflict,
    ),
    components(schemas(
        symposia::models::Conference,
        symposia::models::CreateConference,
        symposia::models::UpdateConference,
        symposia::models::Category,
        symposia::models::CreateCategory,
        symposia::models::UpdateCategory,
        symposia::models::Section,
        symposia::models::CreateSection,
        symposia::models::UpdateSection,
        symposia::models::Presentation,
        symposia::models::PresentationStatus,
        symposia::models::CreatePresentation,
        symposia::models::UpdatePresentation,
        symposia::models::Presenter,
        symposia::models::CreatePresenter,
        symposia::models::UpdatePresenter,
        symposia::models::PresenterRole,
        symposia::models::CreatePresenterRole,
        symposia::models::UpdatePresenterRole,
        symposia::models::DeclaredConflict,
        symposia::models::DeclaredConflictKind,
        symposia::models::CreateDeclaredConflict,
        symposia::schedule::ConflictReport,
        symposia::schedule::ScheduleConflict,
        symposia::schedule::ConflictKind,
        symposia::schedule::ConflictSeverity,
        symposia::schedule::PresenterRef,
        symposia::schedule::BookedSlot,
        symposia::schedule::DoubleBooking,
        symposia::handlers::conflicts::CheckConflictsRequest,
        symposia::handlers::conflicts::AssignSectionRequest,
        symposia::handlers::conflicts::UnassignSectionRequest,
        symposia::handlers::conflicts::AssignmentOutcome,
        symposia::handlers::conflicts::ConflictSummary,
    )),
    tags(
        (name = "conferences", description = "Conference management"),
        (name = "categories", description = "Presentation tracks"),
        (name = "sections", description = "Scheduled time-slot containers"),
        (name = "presentations", description = "Submitted talks"),
        (name = "presenters", description = "People on stage"),
        (name = "presenter-roles", description = "Presentation/presenter links"),
        (name = "conflicts", description = "Scheduling conflict detection"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), sqlx::Error> {
    dotenv().ok();

    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run database migrations");

    let api = router::public_routes()
        .merge(router::protected_routes().route_layer(from_fn(require_api_token)));

    let app = api
        .with_state(pool)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!("Server is running on http://{addr}");
    axum::serve(listener, app).await.unwrap();

    Ok(())
}
