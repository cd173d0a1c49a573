//! Pure state transitions.
//!
//! # Responsibility
//! - Map one user action onto a new `AppState`.
//! - Apply input validation as silent no-ops.
//!
//! # Invariants
//! - Reducers never mutate their input and never perform I/O.
//! - Rejected input returns a state equal to the input.

use crate::engine::cgpa;
use crate::model::document::DocumentMeta;
use crate::model::profile::ProfileField;
use crate::model::state::AppState;
use crate::model::subject::Subject;
use crate::model::task::Task;

/// User-level actions the presentation layer can dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddSubject { name: String },
    MarkAttendance { subject_id: String, present: bool },
    AddTask { title: String },
    ToggleTask { task_id: String },
    AddTimetableSlot { day: String, slot: String },
    UpdateProfileField { field: ProfileField, value: String },
    AddDocuments { docs: Vec<DocumentMeta> },
    RemoveDocument { doc_id: String },
    AddSemester { name: String, sgpa: String, credits: String },
    ToggleTheme,
}

impl Action {
    /// Stable label used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddSubject { .. } => "add_subject",
            Self::MarkAttendance { .. } => "mark_attendance",
            Self::AddTask { .. } => "add_task",
            Self::ToggleTask { .. } => "toggle_task",
            Self::AddTimetableSlot { .. } => "add_timetable_slot",
            Self::UpdateProfileField { .. } => "update_profile_field",
            Self::AddDocuments { .. } => "add_documents",
            Self::RemoveDocument { .. } => "remove_document",
            Self::AddSemester { .. } => "add_semester",
            Self::ToggleTheme => "toggle_theme",
        }
    }
}

pub fn reduce(state: &AppState, action: Action) -> AppState {
    match action {
        Action::AddSubject { name } => add_subject(state, &name),
        Action::MarkAttendance {
            subject_id,
            present,
        } => apply_subject_mark(state, &subject_id, present),
        Action::AddTask { title } => add_task(state, &title),
        Action::ToggleTask { task_id } => toggle_task(state, &task_id),
        Action::AddTimetableSlot { day, slot } => add_timetable_slot(state, &day, &slot),
        Action::UpdateProfileField { field, value } => update_profile_field(state, field, value),
        Action::AddDocuments { docs } => add_documents(state, docs),
        Action::RemoveDocument { doc_id } => remove_document(state, &doc_id),
        Action::AddSemester {
            name,
            sgpa,
            credits,
        } => add_semester(state, &name, &sgpa, &credits),
        Action::ToggleTheme => toggle_theme(state),
    }
}

/// Appends an empty subject. Blank names are ignored.
pub fn add_subject(state: &AppState, name: &str) -> AppState {
    let name = name.trim();
    let mut next = state.clone();
    if !name.is_empty() {
        next.subjects.push(Subject::new(name));
    }
    next
}

/// Records one held class for `subject_id`. Unknown ids are ignored.
pub fn apply_subject_mark(state: &AppState, subject_id: &str, present: bool) -> AppState {
    let mut next = state.clone();
    if let Some(subject) = next.subjects.iter_mut().find(|s| s.id == subject_id) {
        subject.record_class(present);
    }
    next
}

/// Prepends a pending task. Blank titles are ignored.
pub fn add_task(state: &AppState, title: &str) -> AppState {
    let title = title.trim();
    let mut next = state.clone();
    if !title.is_empty() {
        next.tasks.insert(0, Task::new(title));
    }
    next
}

pub fn toggle_task(state: &AppState, task_id: &str) -> AppState {
    let mut next = state.clone();
    if let Some(task) = next.tasks.iter_mut().find(|t| t.id == task_id) {
        task.done = !task.done;
    }
    next
}

/// Appends a slot to an existing day. Blank slots and unknown days are ignored.
pub fn add_timetable_slot(state: &AppState, day: &str, slot: &str) -> AppState {
    let slot = slot.trim();
    let mut next = state.clone();
    if !slot.is_empty() {
        next.timetable.push_slot(day, slot);
    }
    next
}

pub fn update_profile_field(state: &AppState, field: ProfileField, value: String) -> AppState {
    let mut next = state.clone();
    next.profile.set_field(field, value);
    next
}

/// Prepends picked documents, keeping their pick order.
pub fn add_documents(state: &AppState, docs: Vec<DocumentMeta>) -> AppState {
    let mut next = state.clone();
    next.docs = docs.into_iter().chain(state.docs.iter().cloned()).collect();
    next
}

pub fn remove_document(state: &AppState, doc_id: &str) -> AppState {
    let mut next = state.clone();
    next.docs.retain(|doc| doc.id != doc_id);
    next
}

pub fn add_semester(state: &AppState, name: &str, sgpa: &str, credits: &str) -> AppState {
    let mut next = state.clone();
    next.cgpa_data.semesters = cgpa::add_semester(&state.cgpa_data.semesters, name, sgpa, credits);
    next
}

pub fn toggle_theme(state: &AppState) -> AppState {
    let mut next = state.clone();
    next.theme = state.theme.toggled();
    next
}
