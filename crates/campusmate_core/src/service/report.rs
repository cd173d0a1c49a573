//! Read-only dashboard projection of the state document.

use crate::engine::assistant::{pending_task_count, study_hint, StudyHint};
use crate::engine::attendance::{
    attendance_insight, classes_can_skip, classes_must_attend, is_at_risk, overall_attendance,
    overall_standing, subject_percent, subject_standing, AttendanceInsight, OverallStanding,
    SubjectStanding, DEFAULT_TARGET_PERCENT,
};
use crate::engine::cgpa::{format_cgpa, overall_cgpa};
use crate::model::state::AppState;
use crate::model::subject::Subject;

/// Engine outputs for one subject against the default target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectReport {
    pub subject_id: String,
    pub name: String,
    pub attended: u32,
    pub total: u32,
    pub percent: u32,
    pub at_risk: bool,
    pub can_skip: u32,
    pub must_attend: u32,
    pub standing: SubjectStanding,
}

impl SubjectReport {
    pub fn from_subject(subject: &Subject) -> Self {
        Self {
            subject_id: subject.id.clone(),
            name: subject.name.clone(),
            attended: subject.attended,
            total: subject.total,
            percent: subject_percent(subject),
            at_risk: is_at_risk(subject, DEFAULT_TARGET_PERCENT),
            can_skip: classes_can_skip(subject, DEFAULT_TARGET_PERCENT),
            must_attend: classes_must_attend(subject, DEFAULT_TARGET_PERCENT),
            standing: subject_standing(subject, DEFAULT_TARGET_PERCENT),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub overall_percent: u32,
    pub overall_standing: OverallStanding,
    pub pending_tasks: usize,
    pub subjects: Vec<SubjectReport>,
    pub insight: Option<AttendanceInsight>,
    pub cgpa: Option<f64>,
    /// Two-decimal CGPA string, `None` when there are no credits.
    pub cgpa_display: Option<String>,
    pub hint: StudyHint,
}

impl Dashboard {
    pub fn from_state(state: &AppState) -> Self {
        let overall_percent = overall_attendance(&state.subjects);
        let cgpa = overall_cgpa(&state.cgpa_data.semesters);
        Self {
            overall_percent,
            overall_standing: overall_standing(overall_percent),
            pending_tasks: pending_task_count(&state.tasks),
            subjects: state.subjects.iter().map(SubjectReport::from_subject).collect(),
            insight: attendance_insight(&state.subjects),
            cgpa,
            cgpa_display: cgpa.map(format_cgpa),
            hint: study_hint(&state.subjects, &state.tasks),
        }
    }
}
