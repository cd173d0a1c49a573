//! To-do item tracked alongside attendance.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Due label assigned to tasks created from free-form input.
pub const CUSTOM_DUE_LABEL: &str = "Custom";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Free-form due label; older saves may omit it.
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Creates a pending task with a generated id and the custom due label.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            due: CUSTOM_DUE_LABEL.to_string(),
            done: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.done
    }
}
