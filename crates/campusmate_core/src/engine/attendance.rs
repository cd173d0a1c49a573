//! Attendance projections over subject counters.
//!
//! # Responsibility
//! - Compute overall and per-subject percentages.
//! - Project how many classes a student can skip or must attend.
//! - Rank subjects by risk.
//!
//! # Invariants
//! - All functions are pure and never mutate their input.
//! - Zero totals never fault; they map to documented defaults.
//! - `classes_must_attend` never returns more than `MAX_SEARCH_ITERATIONS`.

use crate::engine::percent::rounded_percent;
use crate::model::subject::Subject;
use std::cmp::Ordering;

/// Attendance threshold below which a subject is at risk.
pub const DEFAULT_TARGET_PERCENT: u32 = 75;
/// Answer for `classes_must_attend` when no class has been held yet.
pub const DEFAULT_NO_DATA_CLASSES_NEEDED: u32 = 3;
/// Upper bound of the must-attend search.
pub const MAX_SEARCH_ITERATIONS: u32 = 200;

const COMFORTABLE_PERCENT: u32 = 90;
const EXCELLENT_OVERALL_PERCENT: u32 = 85;

/// Per-subject standing used to pick the advice shown next to a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectStanding {
    /// No class has been marked yet.
    NoClasses,
    /// At or above 90%.
    Comfortable { can_skip: u32 },
    /// At or above target with room to skip.
    Safe { can_skip: u32 },
    /// At or above target, but one more absence drops below it.
    Borderline,
    /// Below target.
    Shortage { must_attend: u32 },
}

/// Standing of the overall attendance percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStanding {
    Excellent,
    Safe,
    Shortage,
}

/// Most at-risk subject plus the classes needed to recover it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceInsight {
    pub most_at_risk: Subject,
    pub classes_needed: u32,
}

/// Overall attendance percent across all subjects.
pub fn overall_attendance(subjects: &[Subject]) -> u32 {
    let (attended, total) = subjects.iter().fold((0_u64, 0_u64), |(a, t), s| {
        (a + u64::from(s.attended), t + u64::from(s.total))
    });
    rounded_percent(attended, total)
}

pub fn subject_percent(subject: &Subject) -> u32 {
    rounded_percent(u64::from(subject.attended), u64::from(subject.total))
}

/// Returns whether a subject with held classes sits below `target`.
pub fn is_at_risk(subject: &Subject, target: u32) -> bool {
    subject.total > 0 && subject_percent(subject) < target
}

/// Maximum consecutive absences that keep the subject at or above `target`.
///
/// Returns `0` when no class has been held or the subject is already below
/// target. A `target` of `0` is treated as `1`.
pub fn classes_can_skip(subject: &Subject, target: u32) -> u32 {
    let target = target.max(1);
    let attended = u64::from(subject.attended);
    let total = u64::from(subject.total);
    if total == 0 || rounded_percent(attended, total) < target {
        return 0;
    }

    // round_half_up(100a / t) >= target  <=>  t <= 200a / (2 * target - 1)
    let max_total = u128::from(attended) * 200 / (2 * u128::from(target) - 1);
    let skipped = max_total.saturating_sub(u128::from(total));
    u32::try_from(skipped).unwrap_or(u32::MAX)
}

/// Minimum consecutive attended classes that bring the subject to `target`.
///
/// Returns `DEFAULT_NO_DATA_CLASSES_NEEDED` when no class has been held,
/// and caps the search at `MAX_SEARCH_ITERATIONS`.
pub fn classes_must_attend(subject: &Subject, target: u32) -> u32 {
    if subject.total == 0 {
        return DEFAULT_NO_DATA_CLASSES_NEEDED;
    }

    let attended = u64::from(subject.attended);
    let total = u64::from(subject.total);
    (0..MAX_SEARCH_ITERATIONS)
        .find(|need| {
            let need = u64::from(*need);
            rounded_percent(attended + need, total + need) >= target
        })
        .unwrap_or(MAX_SEARCH_ITERATIONS)
}

/// Subject with the lowest `attended / max(total, 1)` ratio.
///
/// Ties keep the first subject in input order.
pub fn most_at_risk_subject(subjects: &[Subject]) -> Option<&Subject> {
    subjects
        .iter()
        .min_by(|left, right| compare_attendance_ratio(left, right))
}

/// Most at-risk subject and the classes needed to reach the default target.
pub fn attendance_insight(subjects: &[Subject]) -> Option<AttendanceInsight> {
    let most_at_risk = most_at_risk_subject(subjects)?;
    Some(AttendanceInsight {
        classes_needed: classes_must_attend(most_at_risk, DEFAULT_TARGET_PERCENT),
        most_at_risk: most_at_risk.clone(),
    })
}

/// Classifies a subject against `target`.
pub fn subject_standing(subject: &Subject, target: u32) -> SubjectStanding {
    if subject.total == 0 {
        return SubjectStanding::NoClasses;
    }

    let percent = subject_percent(subject);
    if percent >= COMFORTABLE_PERCENT {
        return SubjectStanding::Comfortable {
            can_skip: classes_can_skip(subject, target),
        };
    }
    if percent >= target {
        return match classes_can_skip(subject, target) {
            0 => SubjectStanding::Borderline,
            can_skip => SubjectStanding::Safe { can_skip },
        };
    }
    SubjectStanding::Shortage {
        must_attend: classes_must_attend(subject, target),
    }
}

pub fn overall_standing(overall_percent: u32) -> OverallStanding {
    if overall_percent >= EXCELLENT_OVERALL_PERCENT {
        OverallStanding::Excellent
    } else if overall_percent >= DEFAULT_TARGET_PERCENT {
        OverallStanding::Safe
    } else {
        OverallStanding::Shortage
    }
}

fn compare_attendance_ratio(left: &Subject, right: &Subject) -> Ordering {
    // a/b vs c/d  <=>  a*d vs c*b, with zero totals counted as 1.
    let left_cross = u64::from(left.attended) * u64::from(right.total.max(1));
    let right_cross = u64::from(right.attended) * u64::from(left.total.max(1));
    left_cross.cmp(&right_cross)
}
