//! Credit-weighted CGPA aggregation.
//!
//! # Invariants
//! - Unparsable SGPA/credit text counts as `0`; its credits still weigh in
//!   the denominator when they parse.
//! - No result is produced when the credit sum is zero.

use crate::engine::percent::parse_decimal;
use crate::model::semester::SemesterRecord;
use uuid::Uuid;

/// Exact credit-weighted CGPA, or `None` without credits.
pub fn overall_cgpa(semesters: &[SemesterRecord]) -> Option<f64> {
    let (points, credits) = semesters.iter().fold((0.0_f64, 0.0_f64), |(p, c), sem| {
        let sgpa = parse_decimal(&sem.sgpa);
        let credits = parse_decimal(&sem.credits);
        (p + sgpa * credits, c + credits)
    });

    if credits == 0.0 {
        return None;
    }
    Some(points / credits)
}

/// Two-decimal display form of a CGPA value.
///
/// Exact halfway values round up (`8.125` -> `"8.13"`); everything else
/// keeps the nearest two-decimal rendering.
pub fn format_cgpa(value: f64) -> String {
    let doubled = value * 200.0;
    // A zero fused residue means `value * 200.0` was not rounded.
    let exact_tie = doubled.fract() == 0.0
        && doubled.rem_euclid(2.0) == 1.0
        && value.mul_add(200.0, -doubled) == 0.0;
    if exact_tie {
        let hundredths = (doubled + 1.0) / 2.0;
        return format!("{:.2}", hundredths / 100.0);
    }
    format!("{value:.2}")
}

/// Returns `semesters` with one new record appended.
///
/// Blank `name`, `sgpa` or `credits` (after trimming) leaves the list unchanged.
pub fn add_semester(
    semesters: &[SemesterRecord],
    name: &str,
    sgpa: &str,
    credits: &str,
) -> Vec<SemesterRecord> {
    let mut updated = semesters.to_vec();
    let (name, sgpa, credits) = (name.trim(), sgpa.trim(), credits.trim());
    if name.is_empty() || sgpa.is_empty() || credits.is_empty() {
        return updated;
    }

    updated.push(SemesterRecord {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        sgpa: sgpa.to_string(),
        credits: credits.to_string(),
    });
    updated
}
