//! Running companion session: in-memory state plus write-back.
//!
//! # Responsibility
//! - Load the saved document once at startup.
//! - Route actions through pure reducers and persist changed states.
//!
//! # Invariants
//! - The in-memory state is the source of truth for the session.
//! - Every state change submits exactly one full-document save.
//! - Unchanged states (rejected input) trigger no save.

use crate::model::state::AppState;
use crate::persist::{load_state, PersistError, StateWriter, WriterStats};
use crate::service::reducer::{reduce, Action};
use crate::service::report::Dashboard;
use crate::store::KvStore;
use log::{debug, info};

pub struct CompanionSession {
    state: AppState,
    writer: StateWriter,
}

impl CompanionSession {
    /// Loads saved state (or defaults) and starts the background writer.
    ///
    /// The merged document is written back once so older saves pick up
    /// newly added default sections.
    ///
    /// # Errors
    /// - Returns `WriterSpawn` when the writer thread cannot start.
    pub fn start<S>(store: S) -> Result<Self, PersistError>
    where
        S: KvStore + Send + 'static,
    {
        let loaded = load_state(&store);
        let restored = loaded.is_some();
        let state = loaded.unwrap_or_default();
        let writer = StateWriter::spawn(store)?;
        writer.submit(state.clone());

        info!(
            "event=session_start module=session status=ok restored={} subjects={} tasks={}",
            restored,
            state.subjects.len(),
            state.tasks.len()
        );
        Ok(Self { state, writer })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies `action`; returns whether the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let action_name = action.name();
        let next = reduce(&self.state, action);
        if next == self.state {
            debug!("event=state_transition module=session action={action_name} changed=false");
            return false;
        }

        self.state = next;
        self.writer.submit(self.state.clone());
        debug!("event=state_transition module=session action={action_name} changed=true");
        true
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::from_state(&self.state)
    }

    /// Waits until every submitted state has been written or dropped.
    pub fn flush(&self) {
        self.writer.flush();
    }

    pub fn writer_stats(&self) -> WriterStats {
        self.writer.stats()
    }
}
