//! Rule-based study hint combining attendance and pending tasks.

use crate::engine::attendance::{
    most_at_risk_subject, overall_attendance, overall_standing, OverallStanding,
};
use crate::model::subject::Subject;
use crate::model::task::Task;

/// Focus label used when no subject is tracked yet.
pub const FALLBACK_FOCUS_SUBJECT: &str = "your core subject";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyHint {
    pub overall_percent: u32,
    pub overall_standing: OverallStanding,
    /// Name of the most at-risk subject, or the fallback label.
    pub focus_subject: String,
    pub pending_tasks: usize,
}

pub fn study_hint(subjects: &[Subject], tasks: &[Task]) -> StudyHint {
    let overall_percent = overall_attendance(subjects);
    StudyHint {
        overall_percent,
        overall_standing: overall_standing(overall_percent),
        focus_subject: most_at_risk_subject(subjects)
            .map_or_else(|| FALLBACK_FOCUS_SUBJECT.to_string(), |s| s.name.clone()),
        pending_tasks: pending_task_count(tasks),
    }
}

pub fn pending_task_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| task.is_pending()).count()
}

#[cfg(test)]
mod tests {
    use super::{study_hint, FALLBACK_FOCUS_SUBJECT};
    use crate::engine::attendance::OverallStanding;
    use crate::model::subject::Subject;
    use crate::model::task::Task;

    #[test]
    fn hint_falls_back_without_subjects() {
        let hint = study_hint(&[], &[]);
        assert_eq!(hint.overall_percent, 0);
        assert_eq!(hint.overall_standing, OverallStanding::Shortage);
        assert_eq!(hint.focus_subject, FALLBACK_FOCUS_SUBJECT);
        assert_eq!(hint.pending_tasks, 0);
    }

    #[test]
    fn hint_names_weakest_subject_and_counts_pending_tasks() {
        let subjects = vec![
            Subject::with_counts("1", "DSA", 18, 22).unwrap(),
            Subject::with_counts("2", "DBMS", 12, 18).unwrap(),
        ];
        let mut done = Task::new("done");
        done.done = true;
        let tasks = vec![Task::new("one"), done, Task::new("two")];

        let hint = study_hint(&subjects, &tasks);
        assert_eq!(hint.focus_subject, "DBMS");
        assert_eq!(hint.pending_tasks, 2);
        // 30 / 40
        assert_eq!(hint.overall_percent, 75);
        assert_eq!(hint.overall_standing, OverallStanding::Safe);
    }
}
