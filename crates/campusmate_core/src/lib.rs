//! Core domain logic for CampusMate.
//! This crate is the single source of truth for attendance, CGPA and
//! state-document invariants.

pub mod engine;
pub mod logging;
pub mod model;
pub mod persist;
pub mod service;
pub mod store;

pub use engine::attendance::{
    attendance_insight, classes_can_skip, classes_must_attend, is_at_risk,
    most_at_risk_subject, overall_attendance, subject_percent, AttendanceInsight,
    OverallStanding, SubjectStanding, DEFAULT_NO_DATA_CLASSES_NEEDED, DEFAULT_TARGET_PERCENT,
    MAX_SEARCH_ITERATIONS,
};
pub use engine::cgpa::{add_semester, format_cgpa, overall_cgpa};
pub use engine::focus_timer::{FocusTimer, TickOutcome};
pub use engine::percent::rounded_percent;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::DocumentMeta;
pub use model::profile::{Profile, ProfileField};
pub use model::semester::{CgpaData, SemesterRecord};
pub use model::state::{AppState, Theme};
pub use model::subject::{Subject, SubjectValidationError};
pub use model::task::Task;
pub use model::timetable::Timetable;
pub use persist::{load_state, save_state, PersistError, StateWriter, WriterStats, STORAGE_KEY};
pub use service::reducer::{reduce, Action};
pub use service::report::{Dashboard, SubjectReport};
pub use service::session::CompanionSession;
pub use store::{open_store, open_store_in_memory, KvStore, SqliteKvStore, StoreError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
