//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `campusmate_core` linkage without the Flutter runtime.
//! - Print engine output for the default document so changes to the
//!   attendance/CGPA rules are visible at a glance.

use campusmate_core::{AppState, Dashboard, SubjectStanding};

fn main() {
    println!("campusmate_core ping={}", campusmate_core::ping());
    println!("campusmate_core version={}", campusmate_core::core_version());

    let dashboard = Dashboard::from_state(&AppState::default_document());
    println!(
        "overall={}% standing={:?} pending_tasks={}",
        dashboard.overall_percent, dashboard.overall_standing, dashboard.pending_tasks
    );
    for subject in &dashboard.subjects {
        println!(
            "subject={} {}/{} percent={}% {}",
            subject.name,
            subject.attended,
            subject.total,
            subject.percent,
            describe(subject.standing)
        );
    }
    if let Some(insight) = &dashboard.insight {
        println!(
            "most_at_risk={} classes_needed={}",
            insight.most_at_risk.name, insight.classes_needed
        );
    }
    println!(
        "cgpa={}",
        dashboard.cgpa_display.as_deref().unwrap_or("n/a")
    );
}

fn describe(standing: SubjectStanding) -> String {
    match standing {
        SubjectStanding::NoClasses => "no classes yet".to_string(),
        SubjectStanding::Comfortable { can_skip } | SubjectStanding::Safe { can_skip } => {
            format!("can_skip={can_skip}")
        }
        SubjectStanding::Borderline => "no skips left".to_string(),
        SubjectStanding::Shortage { must_attend } => format!("must_attend={must_attend}"),
    }
}
