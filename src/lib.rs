pub mod models;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod schedule;
pub mod utils;

// Re-export commonly used items (avoiding ambiguous re-exports)
pub use models::{
    Category, CreateCategory, UpdateCategory,
    Conference, CreateConference, UpdateConference,
    CreateDeclaredConflict, DeclaredConflict, DeclaredConflictKind,
    CreatePresentation, Presentation, PresentationStatus, UpdatePresentation,
    CreatePresenter, Presenter, UpdatePresenter,
    CreatePresenterRole, PresenterRole, UpdatePresenterRole,
    CreateSection, Section, UpdateSection,
};
pub use handlers::*;
pub use schedule::{
    detect_conflicts, double_booking_summary, overlaps, ConflictKind, ConflictReport,
    ConflictSeverity, ScheduleConflict, TimeWindow,
};
pub use utils::{make_conference_slug, normalize_name, normalize_name_loose, parse_conference_slug};
