//! Aggregate application state document.
//!
//! # Responsibility
//! - Own every persisted section as one serializable value.
//! - Provide the hardcoded default document used for first launch and
//!   for filling gaps in older saved data.
//!
//! # Invariants
//! - The whole document is the unit of persistence.
//! - Wire field names match the saved-document schema (`cgpaData`).

use crate::model::document::DocumentMeta;
use crate::model::profile::Profile;
use crate::model::semester::{CgpaData, SemesterRecord};
use crate::model::subject::Subject;
use crate::model::task::Task;
use crate::model::timetable::Timetable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub theme: Theme,
    pub subjects: Vec<Subject>,
    pub tasks: Vec<Task>,
    pub docs: Vec<DocumentMeta>,
    pub timetable: Timetable,
    pub profile: Profile,
    #[serde(rename = "cgpaData")]
    pub cgpa_data: CgpaData,
}

impl Default for AppState {
    fn default() -> Self {
        Self::default_document()
    }
}

impl AppState {
    /// First-launch document with sample data in every section.
    pub fn default_document() -> Self {
        Self {
            theme: Theme::Dark,
            subjects: vec![
                sample_subject("1", "DSA", 18, 22),
                sample_subject("2", "OS", 15, 20),
                sample_subject("3", "DBMS", 12, 18),
            ],
            tasks: vec![
                sample_task("1", "Finish DSA assignment", "Today"),
                sample_task("2", "Revise OS Unit 2", "Tomorrow"),
            ],
            docs: Vec::new(),
            timetable: Timetable::from_days([
                ("Monday", vec!["9–10 DSA", "10–11 DBMS", "2–3 OS"]),
                ("Tuesday", vec!["9–10 Maths", "11–12 DBMS Lab"]),
                ("Wednesday", vec!["10–11 DAA", "2–4 Mini Project"]),
                ("Thursday", vec!["9–10 OS", "3–4 Sports"]),
                ("Friday", vec!["9–10 DBMS", "11–12 DSA"]),
            ]),
            profile: Profile {
                name: "Nandhu".to_string(),
                usn: "4NI24IS161".to_string(),
                college: "The National Institute of Engineering".to_string(),
                branch: "ISE".to_string(),
                semester: "3rd Sem".to_string(),
            },
            cgpa_data: CgpaData {
                semesters: vec![
                    sample_semester("1", "Sem 1", "8.2", "20"),
                    sample_semester("2", "Sem 2", "8.5", "22"),
                ],
            },
        }
    }
}

fn sample_subject(id: &str, name: &str, attended: u32, total: u32) -> Subject {
    Subject {
        id: id.to_string(),
        name: name.to_string(),
        attended,
        total,
    }
}

fn sample_task(id: &str, title: &str, due: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        due: due.to_string(),
        done: false,
    }
}

fn sample_semester(id: &str, name: &str, sgpa: &str, credits: &str) -> SemesterRecord {
    SemesterRecord {
        id: id.to_string(),
        name: name.to_string(),
        sgpa: sgpa.to_string(),
        credits: credits.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, Theme};

    #[test]
    fn default_document_uses_wire_section_names() {
        let json = serde_json::to_value(AppState::default_document()).unwrap();
        for key in ["theme", "subjects", "tasks", "docs", "timetable", "profile", "cgpaData"] {
            assert!(json.get(key).is_some(), "missing section `{key}`");
        }
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["cgpaData"]["semesters"][1]["sgpa"], "8.5");
    }

    #[test]
    fn theme_toggles_both_ways() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
