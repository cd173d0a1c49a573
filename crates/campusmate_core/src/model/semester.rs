//! Semester grade record used by the CGPA engine.
//!
//! `sgpa` and `credits` stay as user-entered text; parsing happens at
//! computation time so malformed input is never lost from the document.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sgpa: String,
    #[serde(default)]
    pub credits: String,
}

/// `cgpaData` section of the state document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CgpaData {
    #[serde(default)]
    pub semesters: Vec<SemesterRecord>,
}
