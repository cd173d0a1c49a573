//! Metadata for documents the user attached.
//!
//! Only metadata lives in core; file bytes stay with the host picker.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_DOCUMENT_TAG: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    /// Host-formatted local timestamp string.
    #[serde(rename = "uploadedAt", default)]
    pub uploaded_at: String,
    #[serde(default = "default_tag")]
    pub tag: String,
}

impl DocumentMeta {
    /// Creates metadata with a generated id and the default tag.
    pub fn new(name: impl Into<String>, size: u64, uploaded_at: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            size,
            uploaded_at: uploaded_at.into(),
            tag: default_tag(),
        }
    }
}

fn default_tag() -> String {
    DEFAULT_DOCUMENT_TAG.to_string()
}
