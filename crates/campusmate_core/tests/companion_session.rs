use campusmate_core::{
    load_state, open_store, save_state, Action, AppState, CompanionSession, KvStore,
    ProfileField, STORAGE_KEY,
};
use std::path::Path;

fn restored(path: &Path) -> AppState {
    load_state(&open_store(path).unwrap()).expect("state should be saved")
}

#[test]
fn first_start_uses_defaults_and_writes_them_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    let session = CompanionSession::start(open_store(&path).unwrap()).unwrap();
    assert_eq!(session.state(), &AppState::default_document());
    session.flush();

    assert_eq!(restored(&path), AppState::default_document());
}

#[test]
fn changed_states_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    let mut session = CompanionSession::start(open_store(&path).unwrap()).unwrap();
    assert!(session.dispatch(Action::MarkAttendance {
        subject_id: "3".to_string(),
        present: true,
    }));
    assert!(session.dispatch(Action::AddTask {
        title: "Submit lab record".to_string(),
    }));
    assert!(session.dispatch(Action::UpdateProfileField {
        field: ProfileField::Semester,
        value: "4th Sem".to_string(),
    }));
    session.flush();

    let saved = restored(&path);
    assert_eq!(&saved, session.state());
    assert_eq!((saved.subjects[2].attended, saved.subjects[2].total), (13, 19));
    assert_eq!(saved.tasks[0].title, "Submit lab record");
    assert_eq!(saved.profile.semester, "4th Sem");
}

#[test]
fn rejected_actions_do_not_submit_saves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    let mut session = CompanionSession::start(open_store(&path).unwrap()).unwrap();
    session.flush();
    let before = session.writer_stats();

    assert!(!session.dispatch(Action::AddSubject {
        name: "  ".to_string(),
    }));
    assert!(!session.dispatch(Action::AddSemester {
        name: "Sem 3".to_string(),
        sgpa: String::new(),
        credits: "21".to_string(),
    }));
    assert!(!session.dispatch(Action::ToggleTask {
        task_id: "missing".to_string(),
    }));
    session.flush();

    assert_eq!(session.writer_stats().submitted, before.submitted);
}

#[test]
fn restart_restores_saved_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    {
        let mut session = CompanionSession::start(open_store(&path).unwrap()).unwrap();
        session.dispatch(Action::ToggleTheme);
        session.dispatch(Action::AddSemester {
            name: "Sem 3".to_string(),
            sgpa: "9.1".to_string(),
            credits: "21".to_string(),
        });
    }

    let session = CompanionSession::start(open_store(&path).unwrap()).unwrap();
    assert_eq!(session.state().cgpa_data.semesters.len(), 3);
    assert_ne!(session.state().theme, AppState::default_document().theme);

    let dashboard = session.dashboard();
    assert!(dashboard.cgpa.is_some());
    assert_eq!(dashboard.subjects.len(), 3);
}

#[test]
fn older_saves_gain_default_sections_on_start() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    let mut legacy = AppState::default_document();
    legacy.subjects.clear();
    save_state(&open_store(&path).unwrap(), &legacy).unwrap();
    {
        let store = open_store(&path).unwrap();
        store
            .connection()
            .execute(
                "UPDATE kv_entries SET value = json_remove(value, '$.timetable');",
                [],
            )
            .unwrap();
    }

    let session = CompanionSession::start(open_store(&path).unwrap()).unwrap();
    assert!(session.state().subjects.is_empty());
    assert_eq!(
        session.state().timetable,
        AppState::default_document().timetable
    );
    session.flush();

    let saved = restored(&path);
    assert!(saved.timetable.slots("Monday").is_some());
}

#[test]
fn older_records_keep_user_data_through_start() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");
    {
        let store = open_store(&path).unwrap();
        store
            .set(
                STORAGE_KEY,
                r#"{"profile":{"name":"Asha","usn":"1XX","college":"RVCE","branch":"CSE"},"tasks":[{"id":"t1","title":"Mine","done":false}]}"#,
            )
            .unwrap();
    }

    let session = CompanionSession::start(open_store(&path).unwrap()).unwrap();
    assert_eq!(session.state().profile.name, "Asha");
    assert_eq!(session.state().tasks.len(), 1);
    assert_eq!(session.state().tasks[0].title, "Mine");
    session.flush();

    let saved = restored(&path);
    assert_eq!(saved.profile.name, "Asha");
    assert_eq!(saved.profile.branch, "CSE");
    assert_eq!(saved.tasks.len(), 1);
    assert_eq!(saved.tasks[0].id, "t1");
    assert_eq!(saved.tasks[0].due, "");
}
