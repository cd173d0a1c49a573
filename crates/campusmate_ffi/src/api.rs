//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose dashboard reads and state actions to Dart via FRB.
//! - Own the single process-wide companion session.
//! - Own the focus timer the host ticks once per second.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every action call persists through the session writer; callers never
//!   wait for disk I/O.

use campusmate_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_store,
    ping as ping_inner, Action, CompanionSession, Dashboard, DocumentMeta, FocusTimer,
    OverallStanding, ProfileField, SubjectReport, SubjectStanding, TickOutcome,
};
use log::{error, info};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

const STATE_DB_FILE_NAME: &str = "campusmate_state.sqlite3";
const STATE_DB_PATH_ENV: &str = "CAMPUSMATE_DB_PATH";
static STATE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Mutex<Option<CompanionSession>> = Mutex::new(None);
static FOCUS_TIMER: Mutex<Option<FocusTimer>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Per-subject row for the attendance screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectItem {
    pub subject_id: String,
    pub name: String,
    pub attended: u32,
    pub total: u32,
    pub percent: u32,
    pub at_risk: bool,
    pub can_skip: u32,
    pub must_attend: u32,
    /// `no_classes|comfortable|safe|borderline|shortage`.
    pub standing: String,
}

/// Dashboard envelope for home/attendance/CGPA screens.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub message: String,
    pub overall_percent: u32,
    /// `excellent|safe|shortage`.
    pub overall_standing: String,
    pub pending_tasks: u32,
    pub subjects: Vec<SubjectItem>,
    pub most_at_risk_subject_id: Option<String>,
    pub classes_needed: Option<u32>,
    pub cgpa: Option<String>,
    pub focus_subject: String,
}

impl DashboardResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            overall_percent: 0,
            overall_standing: standing_label(OverallStanding::Shortage).to_string(),
            pending_tasks: 0,
            subjects: Vec::new(),
            most_at_risk_subject_id: None,
            classes_needed: None,
            cgpa: None,
            focus_subject: String::new(),
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the call reached the session.
    pub ok: bool,
    /// Whether the state changed (rejected input is `ok` but unchanged).
    pub changed: bool,
    pub message: String,
}

impl ActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            message: message.into(),
        }
    }
}

/// Returns dashboard figures computed from the current state.
#[flutter_rust_bridge::frb(sync)]
pub fn companion_dashboard() -> DashboardResponse {
    match with_session(|session| session.dashboard()) {
        Ok(dashboard) => to_dashboard_response(dashboard),
        Err(err) => DashboardResponse::failure(format!("companion_dashboard failed: {err}")),
    }
}

/// Returns the full state document as JSON for screens that render raw sections.
///
/// Returns an empty string when the session cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn companion_state_json() -> String {
    with_session(|session| serde_json::to_string(session.state()))
        .and_then(|result| result.map_err(|err| err.to_string()))
        .unwrap_or_else(|err| {
            error!("event=ffi_state_json module=ffi status=error error={err}");
            String::new()
        })
}

#[flutter_rust_bridge::frb(sync)]
pub fn attendance_add_subject(name: String) -> ActionResponse {
    dispatch("attendance_add_subject", Action::AddSubject { name })
}

#[flutter_rust_bridge::frb(sync)]
pub fn attendance_mark(subject_id: String, present: bool) -> ActionResponse {
    dispatch(
        "attendance_mark",
        Action::MarkAttendance {
            subject_id,
            present,
        },
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_add(title: String) -> ActionResponse {
    dispatch("task_add", Action::AddTask { title })
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> ActionResponse {
    dispatch("task_toggle", Action::ToggleTask { task_id })
}

#[flutter_rust_bridge::frb(sync)]
pub fn timetable_add_slot(day: String, slot: String) -> ActionResponse {
    dispatch("timetable_add_slot", Action::AddTimetableSlot { day, slot })
}

/// Updates one profile field; `field` is `name|usn|college|branch|semester`.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_update(field: String, value: String) -> ActionResponse {
    let Some(field) = parse_profile_field(&field) else {
        return ActionResponse::failure(format!("profile_update failed: unknown field `{field}`"));
    };
    dispatch("profile_update", Action::UpdateProfileField { field, value })
}

/// Records metadata for one picked document.
#[flutter_rust_bridge::frb(sync)]
pub fn docs_add(name: String, size: u64, uploaded_at: String) -> ActionResponse {
    let doc = DocumentMeta::new(name, size, uploaded_at);
    dispatch("docs_add", Action::AddDocuments { docs: vec![doc] })
}

#[flutter_rust_bridge::frb(sync)]
pub fn docs_remove(doc_id: String) -> ActionResponse {
    dispatch("docs_remove", Action::RemoveDocument { doc_id })
}

#[flutter_rust_bridge::frb(sync)]
pub fn cgpa_add_semester(name: String, sgpa: String, credits: String) -> ActionResponse {
    dispatch(
        "cgpa_add_semester",
        Action::AddSemester {
            name,
            sgpa,
            credits,
        },
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn theme_toggle() -> ActionResponse {
    dispatch("theme_toggle", Action::ToggleTheme)
}

/// Focus timer snapshot returned by every timer call.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTimerResponse {
    pub minutes: u32,
    pub seconds_left: u32,
    pub running: bool,
    /// `MM:SS`.
    pub display: String,
    pub progress_percent: f64,
    /// Set only by the tick that reached zero.
    pub finished: bool,
}

#[flutter_rust_bridge::frb(sync)]
pub fn focus_timer_state() -> FocusTimerResponse {
    with_focus_timer(|timer| to_timer_response(timer, false))
}

/// Changes the session length; ignored while the timer runs.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_timer_set_minutes(minutes: u32) -> FocusTimerResponse {
    with_focus_timer(|timer| {
        timer.set_minutes(minutes);
        to_timer_response(timer, false)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn focus_timer_toggle() -> FocusTimerResponse {
    with_focus_timer(|timer| {
        timer.toggle_running();
        to_timer_response(timer, false)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn focus_timer_reset() -> FocusTimerResponse {
    with_focus_timer(|timer| {
        timer.reset();
        to_timer_response(timer, false)
    })
}

/// Advances the countdown by one second. The host calls this from its own ticker.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_timer_tick() -> FocusTimerResponse {
    with_focus_timer(|timer| {
        let finished = timer.tick() == TickOutcome::Finished;
        if finished {
            info!("event=focus_timer module=ffi status=finished minutes={}", timer.minutes());
        }
        to_timer_response(timer, finished)
    })
}

/// Blocks until pending state writes reach the store. Call before app exit.
#[flutter_rust_bridge::frb(sync)]
pub fn companion_flush() -> String {
    match with_session(|session| session.flush()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

fn dispatch(operation: &str, action: Action) -> ActionResponse {
    match with_session(|session| session.dispatch(action)) {
        Ok(changed) => ActionResponse {
            ok: true,
            changed,
            message: if changed {
                "Saved.".to_string()
            } else {
                "No changes.".to_string()
            },
        },
        Err(err) => ActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn with_session<T>(f: impl FnOnce(&mut CompanionSession) -> T) -> Result<T, String> {
    let mut guard = lock_session();
    if guard.is_none() {
        let db_path = resolve_state_db_path();
        let store =
            open_store(&db_path).map_err(|err| format!("state DB open failed: {err}"))?;
        let session = CompanionSession::start(store)
            .map_err(|err| format!("session start failed: {err}"))?;
        *guard = Some(session);
    }
    match guard.as_mut() {
        Some(session) => Ok(f(session)),
        None => Err("session unavailable".to_string()),
    }
}

fn with_focus_timer<T>(f: impl FnOnce(&mut FocusTimer) -> T) -> T {
    let mut guard = FOCUS_TIMER.lock().unwrap_or_else(PoisonError::into_inner);
    f(guard.get_or_insert_with(FocusTimer::default))
}

fn to_timer_response(timer: &FocusTimer, finished: bool) -> FocusTimerResponse {
    FocusTimerResponse {
        minutes: timer.minutes(),
        seconds_left: timer.seconds_left(),
        running: timer.is_running(),
        display: timer.display(),
        progress_percent: timer.progress_percent(),
        finished,
    }
}

fn lock_session() -> MutexGuard<'static, Option<CompanionSession>> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

fn resolve_state_db_path() -> PathBuf {
    STATE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(STATE_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STATE_DB_FILE_NAME)
        })
        .clone()
}

fn parse_profile_field(value: &str) -> Option<ProfileField> {
    match value.trim().to_ascii_lowercase().as_str() {
        "name" => Some(ProfileField::Name),
        "usn" => Some(ProfileField::Usn),
        "college" => Some(ProfileField::College),
        "branch" => Some(ProfileField::Branch),
        "semester" => Some(ProfileField::Semester),
        _ => None,
    }
}

fn to_dashboard_response(dashboard: Dashboard) -> DashboardResponse {
    let (most_at_risk_subject_id, classes_needed) = match dashboard.insight {
        Some(insight) => (Some(insight.most_at_risk.id), Some(insight.classes_needed)),
        None => (None, None),
    };
    DashboardResponse {
        ok: true,
        message: String::new(),
        overall_percent: dashboard.overall_percent,
        overall_standing: standing_label(dashboard.overall_standing).to_string(),
        pending_tasks: u32::try_from(dashboard.pending_tasks).unwrap_or(u32::MAX),
        subjects: dashboard.subjects.into_iter().map(to_subject_item).collect(),
        most_at_risk_subject_id,
        classes_needed,
        cgpa: dashboard.cgpa_display,
        focus_subject: dashboard.hint.focus_subject,
    }
}

fn to_subject_item(report: SubjectReport) -> SubjectItem {
    SubjectItem {
        standing: subject_standing_label(report.standing).to_string(),
        subject_id: report.subject_id,
        name: report.name,
        attended: report.attended,
        total: report.total,
        percent: report.percent,
        at_risk: report.at_risk,
        can_skip: report.can_skip,
        must_attend: report.must_attend,
    }
}

fn standing_label(standing: OverallStanding) -> &'static str {
    match standing {
        OverallStanding::Excellent => "excellent",
        OverallStanding::Safe => "safe",
        OverallStanding::Shortage => "shortage",
    }
}

fn subject_standing_label(standing: SubjectStanding) -> &'static str {
    match standing {
        SubjectStanding::NoClasses => "no_classes",
        SubjectStanding::Comfortable { .. } => "comfortable",
        SubjectStanding::Safe { .. } => "safe",
        SubjectStanding::Borderline => "borderline",
        SubjectStanding::Shortage { .. } => "shortage",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        attendance_add_subject, attendance_mark, cgpa_add_semester, companion_dashboard,
        companion_flush, companion_state_json, core_version, docs_add, docs_remove,
        focus_timer_reset, focus_timer_set_minutes, focus_timer_state, focus_timer_tick,
        focus_timer_toggle, init_logging, parse_profile_field, ping, profile_update, task_add,
        task_toggle,
    };
    use campusmate_core::ProfileField;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn profile_field_parsing() {
        assert_eq!(parse_profile_field(" USN "), Some(ProfileField::Usn));
        assert_eq!(parse_profile_field("age"), None);
        assert!(!profile_update("age".to_string(), "20".to_string()).ok);
    }

    #[test]
    fn added_subject_shows_in_dashboard_and_tracks_marks() {
        let name = unique_token("subject");
        let added = attendance_add_subject(name.clone());
        assert!(added.ok && added.changed, "{}", added.message);

        let dashboard = companion_dashboard();
        assert!(dashboard.ok, "{}", dashboard.message);
        let item = dashboard
            .subjects
            .iter()
            .find(|item| item.name == name)
            .expect("new subject listed");
        assert_eq!(item.standing, "no_classes");
        assert_eq!(item.must_attend, 3);

        let marked = attendance_mark(item.subject_id.clone(), true);
        assert!(marked.changed);
        let dashboard = companion_dashboard();
        let item = dashboard
            .subjects
            .iter()
            .find(|item| item.name == name)
            .expect("subject still listed");
        assert_eq!((item.attended, item.total, item.percent), (1, 1, 100));
    }

    #[test]
    fn blank_inputs_are_ok_but_unchanged() {
        let task = task_add("   ".to_string());
        assert!(task.ok);
        assert!(!task.changed);

        let semester = cgpa_add_semester("Sem".to_string(), "8".to_string(), String::new());
        assert!(semester.ok);
        assert!(!semester.changed);
    }

    #[test]
    fn tasks_and_docs_roundtrip_through_state_json() {
        let title = unique_token("task");
        assert!(task_add(title.clone()).changed);
        let doc_name = unique_token("doc");
        assert!(docs_add(doc_name.clone(), 2048, "today".to_string()).changed);
        assert_eq!(companion_flush(), "");

        let state: serde_json::Value = serde_json::from_str(&companion_state_json()).unwrap();
        let task_id = state["tasks"]
            .as_array()
            .unwrap()
            .iter()
            .find(|task| task["title"] == title.as_str())
            .and_then(|task| task["id"].as_str())
            .expect("task persisted in state")
            .to_string();
        assert!(task_toggle(task_id).changed);

        let doc_id = state["docs"]
            .as_array()
            .unwrap()
            .iter()
            .find(|doc| doc["name"] == doc_name.as_str())
            .and_then(|doc| doc["id"].as_str())
            .expect("doc persisted in state")
            .to_string();
        assert_eq!(state["docs"][0]["tag"], "General");
        assert!(docs_remove(doc_id.clone()).changed);
        assert!(!docs_remove(doc_id).changed);
    }

    #[test]
    fn focus_timer_runs_to_completion() {
        let idle = focus_timer_reset();
        assert!(!idle.running);

        let one_minute = focus_timer_set_minutes(1);
        assert_eq!(one_minute.display, "01:00");
        assert_eq!(one_minute.progress_percent, 0.0);

        assert!(focus_timer_toggle().running);
        assert_eq!(focus_timer_set_minutes(45).minutes, 1);
        for _ in 0..59 {
            assert!(!focus_timer_tick().finished);
        }
        let done = focus_timer_tick();
        assert!(done.finished);
        assert!(!done.running);
        assert_eq!(done.display, "00:00");
        assert_eq!(done.progress_percent, 100.0);

        let idle_tick = focus_timer_tick();
        assert!(!idle_tick.finished);
        assert_eq!(focus_timer_state().seconds_left, 0);
        assert_eq!(focus_timer_reset().seconds_left, 60);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
