//! Subject attendance record.
//!
//! # Invariants
//! - `attended <= total` for every constructed or deserialized subject.
//! - Marking a class always increments `total`; `attended` only when present.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Validation failures for subject counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectValidationError {
    /// More classes attended than held.
    AttendedExceedsTotal { attended: u32, total: u32 },
}

impl Display for SubjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AttendedExceedsTotal { attended, total } => write!(
                f,
                "attended ({attended}) must be <= total ({total})"
            ),
        }
    }
}

impl Error for SubjectValidationError {}

/// One tracked course with its attendance counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SubjectWire")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub attended: u32,
    pub total: u32,
}

#[derive(Deserialize)]
struct SubjectWire {
    id: String,
    name: String,
    #[serde(default)]
    attended: u32,
    #[serde(default)]
    total: u32,
}

impl TryFrom<SubjectWire> for Subject {
    type Error = SubjectValidationError;

    fn try_from(value: SubjectWire) -> Result<Self, Self::Error> {
        Self::with_counts(value.id, value.name, value.attended, value.total)
    }
}

impl Subject {
    /// Creates an empty subject (`0/0`) with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            attended: 0,
            total: 0,
        }
    }

    /// Creates a subject with explicit id and counters.
    ///
    /// # Errors
    /// - Returns `AttendedExceedsTotal` when `attended > total`.
    pub fn with_counts(
        id: impl Into<String>,
        name: impl Into<String>,
        attended: u32,
        total: u32,
    ) -> Result<Self, SubjectValidationError> {
        if attended > total {
            return Err(SubjectValidationError::AttendedExceedsTotal { attended, total });
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            attended,
            total,
        })
    }

    /// Records one held class.
    pub fn record_class(&mut self, present: bool) {
        self.total = self.total.saturating_add(1);
        if present {
            self.attended = self.attended.saturating_add(1).min(self.total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Subject, SubjectValidationError};

    #[test]
    fn new_subject_starts_empty() {
        let subject = Subject::new("Maths");
        assert!(!subject.id.is_empty());
        assert_eq!((subject.attended, subject.total), (0, 0));
    }

    #[test]
    fn record_class_keeps_attended_within_total() {
        let mut subject = Subject::new("OS");
        subject.record_class(true);
        subject.record_class(false);
        subject.record_class(true);
        assert_eq!((subject.attended, subject.total), (2, 3));
    }

    #[test]
    fn deserialize_rejects_attended_above_total() {
        let value = serde_json::json!({
            "id": "1",
            "name": "DSA",
            "attended": 5,
            "total": 4
        });
        let err = serde_json::from_value::<Subject>(value).unwrap_err();
        assert!(err.to_string().contains("attended (5) must be <= total (4)"));
        assert_eq!(
            Subject::with_counts("1", "DSA", 5, 4).unwrap_err(),
            SubjectValidationError::AttendedExceedsTotal {
                attended: 5,
                total: 4
            }
        );
    }
}
