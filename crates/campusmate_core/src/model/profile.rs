//! Student profile section.

use serde::{Deserialize, Serialize};

/// Missing fields load as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    /// University seat number.
    pub usn: String,
    pub college: String,
    pub branch: String,
    pub semester: String,
}

/// Editable profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Usn,
    College,
    Branch,
    Semester,
}

impl Profile {
    /// Replaces one field value verbatim (no trimming, edits are keystroke-level).
    pub fn set_field(&mut self, field: ProfileField, value: String) {
        let slot = match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Usn => &mut self.usn,
            ProfileField::College => &mut self.college,
            ProfileField::Branch => &mut self.branch,
            ProfileField::Semester => &mut self.semester,
        };
        *slot = value;
    }
}
