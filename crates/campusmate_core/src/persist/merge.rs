//! Default-merge applied to loaded documents.
//!
//! A loaded section replaces its default when present. Inside a section,
//! gaps are filled at the finest level that still decodes:
//!
//! | key         | section      | merge unit | absent / not decodable |
//! |-------------|--------------|------------|------------------------|
//! | `theme`     | `Theme`      | whole value | default theme (`dark`) |
//! | `subjects`  | `Vec<Subject>` | element  | sample subjects |
//! | `tasks`     | `Vec<Task>`  | element    | sample tasks |
//! | `docs`      | `Vec<DocumentMeta>` | element | empty |
//! | `timetable` | `Timetable`  | day        | Monday–Friday sample |
//! | `profile`   | `Profile`    | field      | sample profile |
//! | `cgpaData`  | `CgpaData`   | semester   | sample semesters; a present object without `semesters` yields an empty list |
//!
//! Record fields added after a document was saved take their serde
//! defaults. A list element or timetable day that still fails to decode is
//! dropped on its own and the rest of the section is kept. A section whose
//! outer shape is wrong (for example `tasks` not being a list) falls back
//! to its default.
//!
//! Unknown keys are dropped. New sections must be added to this table and
//! to `merge_with_defaults` together.

use crate::model::semester::CgpaData;
use crate::model::state::AppState;
use crate::model::timetable::Timetable;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Builds a state from `defaults` overlaid with valid parts of `loaded`.
pub fn merge_with_defaults(defaults: &AppState, loaded: &Map<String, Value>) -> AppState {
    let mut merged = defaults.clone();
    merge_section(loaded, "theme", &mut merged.theme);
    merge_list(loaded, "subjects", &mut merged.subjects);
    merge_list(loaded, "tasks", &mut merged.tasks);
    merge_list(loaded, "docs", &mut merged.docs);
    merge_timetable(loaded, &mut merged.timetable);
    merge_section(loaded, "profile", &mut merged.profile);
    merge_cgpa(loaded, &mut merged.cgpa_data);
    merged
}

fn merge_section<T: DeserializeOwned>(loaded: &Map<String, Value>, key: &str, slot: &mut T) {
    let Some(value) = loaded.get(key) else {
        return;
    };
    match T::deserialize(value) {
        Ok(section) => *slot = section,
        Err(err) => warn!(
            "event=state_merge module=persist status=fallback section={key} error={err}"
        ),
    }
}

fn merge_list<T: DeserializeOwned>(loaded: &Map<String, Value>, key: &str, slot: &mut Vec<T>) {
    if let Some(items) = loaded.get(key).and_then(|value| decode_list(key, value)) {
        *slot = items;
    }
}

/// Decodes each element on its own; `None` when `value` is not a list.
fn decode_list<T: DeserializeOwned>(key: &str, value: &Value) -> Option<Vec<T>> {
    let Value::Array(items) = value else {
        warn!("event=state_merge module=persist status=fallback section={key} error=not a list");
        return None;
    };
    let decoded = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!(
                    "event=state_merge module=persist status=dropped section={key} index={index} error={err}"
                );
                None
            }
        })
        .collect();
    Some(decoded)
}

fn merge_timetable(loaded: &Map<String, Value>, slot: &mut Timetable) {
    let Some(value) = loaded.get("timetable") else {
        return;
    };
    let Value::Object(days) = value else {
        warn!("event=state_merge module=persist status=fallback section=timetable error=not an object");
        return;
    };
    let days = days.iter().filter_map(|(day, slots)| {
        match Vec::<String>::deserialize(slots) {
            Ok(slots) => Some((day.clone(), slots)),
            Err(err) => {
                warn!(
                    "event=state_merge module=persist status=dropped section=timetable day={day} error={err}"
                );
                None
            }
        }
    });
    *slot = Timetable::from_days(days);
}

fn merge_cgpa(loaded: &Map<String, Value>, slot: &mut CgpaData) {
    let Some(value) = loaded.get("cgpaData") else {
        return;
    };
    let Value::Object(section) = value else {
        warn!("event=state_merge module=persist status=fallback section=cgpaData error=not an object");
        return;
    };
    let semesters = match section.get("semesters") {
        None => Vec::new(),
        Some(list) => match decode_list("cgpaData.semesters", list) {
            Some(semesters) => semesters,
            None => return,
        },
    };
    *slot = CgpaData { semesters };
}

#[cfg(test)]
mod tests {
    use super::merge_with_defaults;
    use crate::model::state::{AppState, Theme};
    use serde_json::{json, Map, Value};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn empty_object_yields_defaults() {
        let defaults = AppState::default_document();
        assert_eq!(merge_with_defaults(&defaults, &Map::new()), defaults);
    }

    #[test]
    fn present_sections_replace_defaults() {
        let defaults = AppState::default_document();
        let loaded = object(json!({
            "theme": "light",
            "subjects": [{ "id": "9", "name": "CN", "attended": 1, "total": 2 }],
            "legacyField": 42
        }));

        let merged = merge_with_defaults(&defaults, &loaded);
        assert_eq!(merged.theme, Theme::Light);
        assert_eq!(merged.subjects.len(), 1);
        assert_eq!(merged.subjects[0].name, "CN");
        assert_eq!(merged.tasks, defaults.tasks);
        assert_eq!(merged.cgpa_data, defaults.cgpa_data);
    }

    #[test]
    fn wrongly_shaped_sections_keep_defaults() {
        let defaults = AppState::default_document();
        let loaded = object(json!({
            "theme": "sepia",
            "subjects": { "id": "1" },
            "profile": null,
            "timetable": ["Monday"],
            "cgpaData": { "semesters": "none" },
            "tasks": []
        }));

        let merged = merge_with_defaults(&defaults, &loaded);
        assert_eq!(merged.theme, Theme::Dark);
        assert_eq!(merged.subjects, defaults.subjects);
        assert_eq!(merged.profile, defaults.profile);
        assert_eq!(merged.timetable, defaults.timetable);
        assert_eq!(merged.cgpa_data, defaults.cgpa_data);
        assert!(merged.tasks.is_empty());
    }

    #[test]
    fn invalid_elements_are_dropped_individually() {
        let defaults = AppState::default_document();
        let loaded = object(json!({
            "subjects": [
                { "id": "1", "name": "DSA", "attended": 9, "total": 3 },
                { "id": "2", "name": "OS", "attended": 4, "total": 5 }
            ],
            "tasks": [{ "title": "no id" }, { "id": "t1", "title": "Mine", "done": true }],
            "timetable": { "Monday": ["9-10 DSA"], "Tuesday": 7 }
        }));

        let merged = merge_with_defaults(&defaults, &loaded);
        assert_eq!(merged.subjects.len(), 1);
        assert_eq!(merged.subjects[0].name, "OS");
        assert_eq!(merged.tasks.len(), 1);
        assert_eq!(merged.tasks[0].id, "t1");
        assert_eq!(merged.timetable.days().collect::<Vec<_>>(), ["Monday"]);
        assert_eq!(merged.timetable.slots("Monday").unwrap(), ["9-10 DSA"]);
    }

    #[test]
    fn profile_missing_a_field_keeps_saved_values() {
        let defaults = AppState::default_document();
        let loaded = object(json!({
            "profile": { "name": "Asha", "usn": "1XX", "college": "RVCE", "branch": "CSE" }
        }));

        let merged = merge_with_defaults(&defaults, &loaded);
        assert_eq!(merged.profile.name, "Asha");
        assert_eq!(merged.profile.usn, "1XX");
        assert_eq!(merged.profile.college, "RVCE");
        assert_eq!(merged.profile.branch, "CSE");
        assert_eq!(merged.profile.semester, "");
    }

    #[test]
    fn records_missing_later_fields_take_field_defaults() {
        let defaults = AppState::default_document();
        let loaded = object(json!({
            "tasks": [{ "id": "t1", "title": "Mine", "done": false }],
            "subjects": [{ "id": "s1", "name": "Maths" }],
            "docs": [{ "id": "d1", "name": "notes.pdf" }],
            "cgpaData": { "semesters": [{ "id": "m1", "name": "Sem 1", "sgpa": "9" }] }
        }));

        let merged = merge_with_defaults(&defaults, &loaded);
        assert_eq!(merged.tasks.len(), 1);
        assert_eq!(merged.tasks[0].title, "Mine");
        assert_eq!(merged.tasks[0].due, "");
        assert_eq!((merged.subjects[0].attended, merged.subjects[0].total), (0, 0));
        assert_eq!(merged.docs[0].size, 0);
        assert_eq!(merged.docs[0].tag, "General");
        assert_eq!(merged.cgpa_data.semesters[0].credits, "");
    }

    #[test]
    fn cgpa_section_without_semesters_is_empty() {
        let defaults = AppState::default_document();
        let merged = merge_with_defaults(&defaults, &object(json!({ "cgpaData": {} })));
        assert!(merged.cgpa_data.semesters.is_empty());
    }
}
